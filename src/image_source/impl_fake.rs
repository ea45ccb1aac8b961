use crate::image_source::interface::{CapturedImage, ImageSource, SourceMode};
use crate::library::logger::interface::Logger;
use image::{DynamicImage, ImageBuffer, Rgb};
use std::sync::Arc;

pub struct ImageSourceFake {
    logger: Arc<dyn Logger + Send + Sync>,
    cancel: bool,
    color: [u8; 3],
}

impl ImageSourceFake {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            logger: logger.with_namespace("image_source").with_namespace("fake"),
            cancel: false,
            color: [250, 220, 40],
        }
    }

    #[allow(dead_code)]
    pub fn cancelling(mut self) -> Self {
        self.cancel = true;
        self
    }
}

impl ImageSource for ImageSourceFake {
    fn acquire(
        &self,
        mode: SourceMode,
    ) -> Result<Option<CapturedImage>, Box<dyn std::error::Error + Send + Sync>> {
        self.logger.info(&format!("Acquiring image from {:?}...", mode))?;

        if self.cancel {
            self.logger.info("Selection cancelled")?;
            return Ok(None);
        }

        let buffer = ImageBuffer::from_pixel(224, 224, Rgb(self.color));
        self.logger.info("Image acquired")?;

        Ok(Some(CapturedImage::new(DynamicImage::ImageRgb8(buffer))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::logger::impl_console::LoggerConsole;

    fn logger() -> Arc<dyn Logger + Send + Sync> {
        Arc::new(LoggerConsole::new(chrono::FixedOffset::east_opt(0).unwrap()))
    }

    #[test]
    fn test_acquire_returns_image() {
        let source = ImageSourceFake::new(logger());
        let image = source.acquire(SourceMode::Library).unwrap().unwrap();
        assert_eq!(image.image().width(), 224);
        assert_eq!(format!("{:?}", image), "CapturedImage(224x224)");
    }

    #[test]
    fn test_cancelled_returns_none() {
        let source = ImageSourceFake::new(logger()).cancelling();
        assert!(source.acquire(SourceMode::Camera).unwrap().is_none());
    }
}
