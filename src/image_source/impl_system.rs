use crate::image_source::interface::{CapturedImage, ImageSource, SourceMode};
use crate::library::logger::interface::Logger;
use futures::executor::block_on;
use std::path::Path;
use std::process::Command;
use std::sync::Arc;

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "gif", "tif", "tiff", "webp"];

/// Photo library through the native file dialog, camera through a still-capture program.
pub struct ImageSourceSystem {
    camera_command: Vec<String>,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl ImageSourceSystem {
    pub fn new(camera_command: Vec<String>, logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            camera_command,
            logger: logger.with_namespace("image_source"),
        }
    }

    fn pick_from_library(
        &self,
    ) -> Result<Option<CapturedImage>, Box<dyn std::error::Error + Send + Sync>> {
        // The async dialog hands itself to the main thread where the platform requires it.
        let picked = block_on(
            rfd::AsyncFileDialog::new()
                .set_title("Photo Library")
                .add_filter("Images", IMAGE_EXTENSIONS)
                .pick_file(),
        );

        match picked {
            Some(file) => {
                self.logger.info(&format!("Picked {}", file.path().display()))?;
                Ok(Some(load(file.path())?))
            }
            None => Ok(None),
        }
    }

    fn capture_from_camera(
        &self,
    ) -> Result<Option<CapturedImage>, Box<dyn std::error::Error + Send + Sync>> {
        let (program, args) = self
            .camera_command
            .split_first()
            .ok_or("Camera command is empty")?;

        let output = tempfile::Builder::new()
            .prefix("flower-lens-")
            .suffix(".jpg")
            .tempfile()?;

        self.logger
            .info(&format!("Running {} {}", program, args.join(" ")))?;

        let status = Command::new(program)
            .args(args)
            .arg(output.path())
            .status()?;

        if !status.success() {
            return Err(format!("Camera command {} failed: {}", program, status).into());
        }

        // Nothing written means the capture was aborted.
        if std::fs::metadata(output.path())?.len() == 0 {
            return Ok(None);
        }

        Ok(Some(load(output.path())?))
    }
}

fn load(path: &Path) -> Result<CapturedImage, Box<dyn std::error::Error + Send + Sync>> {
    let image = image::ImageReader::open(path)?
        .with_guessed_format()?
        .decode()?;
    Ok(CapturedImage::new(image))
}

impl ImageSource for ImageSourceSystem {
    fn acquire(
        &self,
        mode: SourceMode,
    ) -> Result<Option<CapturedImage>, Box<dyn std::error::Error + Send + Sync>> {
        let acquired = match mode {
            SourceMode::Camera => self.capture_from_camera(),
            SourceMode::Library => self.pick_from_library(),
        };

        // Dialog and capture process are both finished here, whatever the outcome.
        match &acquired {
            Ok(Some(image)) => self.logger.info(&format!("Acquired {:?}", image))?,
            Ok(None) => self.logger.info("Selection cancelled")?,
            Err(e) => self.logger.error(&format!("Acquire failed: {}", e))?,
        }

        acquired
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::logger::impl_console::LoggerConsole;
    use image::{DynamicImage, ImageBuffer, Rgb};

    fn source(command: &[&str]) -> ImageSourceSystem {
        let logger = Arc::new(LoggerConsole::new(chrono::FixedOffset::east_opt(0).unwrap()));
        ImageSourceSystem::new(command.iter().map(|s| s.to_string()).collect(), logger)
    }

    #[test]
    fn test_camera_command_output_is_decoded() {
        let dir = tempfile::tempdir().unwrap();
        let photo = dir.path().join("photo.png");
        DynamicImage::ImageRgb8(ImageBuffer::from_pixel(8, 6, Rgb([10, 200, 10])))
            .save(&photo)
            .unwrap();

        let photo = photo.to_string_lossy().to_string();
        let image = source(&["cp", &photo])
            .acquire(SourceMode::Camera)
            .unwrap()
            .unwrap();

        assert_eq!(image.image().width(), 8);
        assert_eq!(image.image().height(), 6);
    }

    #[test]
    fn test_camera_without_output_is_cancelled() {
        let acquired = source(&["true"]).acquire(SourceMode::Camera).unwrap();
        assert!(acquired.is_none());
    }

    #[test]
    fn test_camera_command_failure_is_error() {
        assert!(source(&["false"]).acquire(SourceMode::Camera).is_err());
    }

    #[test]
    fn test_empty_camera_command_is_error() {
        assert!(source(&[]).acquire(SourceMode::Camera).is_err());
    }
}
