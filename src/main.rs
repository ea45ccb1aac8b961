use clap::Parser;
use config::Config;
use device_display::{impl_console::DeviceDisplayConsole, impl_gui::DeviceDisplayGui};
use flower_lens::main::FlowerLens;
use image_classifier::{
    impl_fake::ImageClassifierFake, impl_tract_onnx::ImageClassifierTractOnnx,
    interface::ImageClassifier,
};
use image_source::{
    impl_fake::ImageSourceFake, impl_system::ImageSourceSystem, interface::ImageSource,
};
use info_fetcher::{
    impl_fake::InfoFetcherFake, impl_wikipedia::InfoFetcherWikipedia, interface::InfoFetcher,
};
use library::logger::{impl_console::LoggerConsole, interface::Logger};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use user_input::impl_console::UserInputConsole;

mod config;
mod device_display;
mod flower_lens;
mod image_classifier;
mod image_source;
mod info_fetcher;
mod library;
mod user_input;

/// Identify a flower from a photo and look it up.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Show a window instead of using the terminal
    #[arg(long)]
    gui: bool,

    /// Use fake camera, classifier and lookup
    #[arg(long)]
    demo: bool,

    /// ONNX classification model
    #[arg(long)]
    model: Option<PathBuf>,

    /// Label file, one label per model output
    #[arg(long)]
    labels: Option<PathBuf>,

    /// Encyclopedia query endpoint
    #[arg(long)]
    endpoint: Option<String>,

    /// Lookup timeout in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,
}

impl Args {
    fn apply(&self, mut config: Config) -> Config {
        if let Some(model) = &self.model {
            config.model.onnx_model_path = model.clone();
        }
        if let Some(labels) = &self.labels {
            config.model.labels_path = labels.clone();
        }
        if let Some(endpoint) = &self.endpoint {
            config.info_endpoint = endpoint.clone();
        }
        if let Some(secs) = self.timeout_secs {
            config.info_request_timeout = Duration::from_secs(secs);
        }
        config
    }
}

type Collaborators = (
    Arc<dyn ImageSource + Send + Sync>,
    Arc<dyn ImageClassifier + Send + Sync>,
    Arc<dyn InfoFetcher + Send + Sync>,
);

fn collaborators(
    args: &Args,
    config: &Config,
    logger: Arc<dyn Logger + Send + Sync>,
) -> Result<Collaborators, Box<dyn std::error::Error + Send + Sync>> {
    if args.demo {
        let image_source: Arc<dyn ImageSource + Send + Sync> =
            Arc::new(ImageSourceFake::new(logger.clone()));
        let image_classifier: Arc<dyn ImageClassifier + Send + Sync> =
            Arc::new(ImageClassifierFake::new(logger.clone()));
        let info_fetcher: Arc<dyn InfoFetcher + Send + Sync> =
            Arc::new(InfoFetcherFake::new(logger));
        return Ok((image_source, image_classifier, info_fetcher));
    }

    let image_source: Arc<dyn ImageSource + Send + Sync> = Arc::new(ImageSourceSystem::new(
        config.camera_command.clone(),
        logger.clone(),
    ));
    let image_classifier: Arc<dyn ImageClassifier + Send + Sync> = Arc::new(
        ImageClassifierTractOnnx::new(config.model.clone(), logger.clone()),
    );
    let info_fetcher: Arc<dyn InfoFetcher + Send + Sync> =
        Arc::new(InfoFetcherWikipedia::new(config, logger)?);

    Ok((image_source, image_classifier, info_fetcher))
}

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let args = Args::parse();
    let config = args.apply(Config::default());

    let logger: Arc<dyn Logger + Send + Sync> =
        Arc::new(LoggerConsole::new(config.logger_timezone));

    let (image_source, image_classifier, info_fetcher) =
        collaborators(&args, &config, logger.clone())?;

    if args.gui {
        let gui = DeviceDisplayGui::new(&config)?;

        let flower_lens = FlowerLens::new(
            logger,
            image_source,
            image_classifier,
            info_fetcher,
            Arc::new(gui.clone()),
            Arc::new(Mutex::new(gui.clone())),
        );

        let pipeline = std::thread::spawn(move || flower_lens.run());
        gui.run_window()?;
        pipeline
            .join()
            .map_err(|_| "Pipeline thread panicked")??;
    } else {
        let flower_lens = FlowerLens::new(
            logger.clone(),
            image_source,
            image_classifier,
            info_fetcher,
            Arc::new(UserInputConsole::new(logger)),
            Arc::new(Mutex::new(DeviceDisplayConsole::new(config.console_width))),
        );

        flower_lens.run()?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_override_config() {
        let args = Args::parse_from([
            "flower-lens",
            "--model",
            "m.onnx",
            "--labels",
            "l.txt",
            "--endpoint",
            "http://localhost/api.php",
            "--timeout-secs",
            "3",
        ]);

        let config = args.apply(Config::default());

        assert_eq!(config.model.onnx_model_path, PathBuf::from("m.onnx"));
        assert_eq!(config.model.labels_path, PathBuf::from("l.txt"));
        assert_eq!(config.info_endpoint, "http://localhost/api.php");
        assert_eq!(config.info_request_timeout, Duration::from_secs(3));
    }

    #[test]
    fn test_defaults_are_kept() {
        let args = Args::parse_from(["flower-lens", "--demo"]);
        let config = args.apply(Config::default());

        assert!(args.demo);
        assert!(!args.gui);
        assert_eq!(config.info_endpoint, "https://en.wikipedia.org/w/api.php");
        assert_eq!(config.info_fetch_max_attempts, 2);
    }
}
