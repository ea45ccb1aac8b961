use crate::image_classifier::models::model_config::ModelConfig;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub logger_timezone: chrono::FixedOffset,
    pub info_endpoint: String,
    pub info_user_agent: String,
    pub info_request_timeout: Duration,
    pub info_fetch_max_attempts: u32,
    pub info_fetch_retry_delay: Duration,
    /// Capture program and its arguments; the output file path is appended.
    pub camera_command: Vec<String>,
    pub console_width: usize,
    pub model: ModelConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            logger_timezone: *chrono::Local::now().offset(),
            info_endpoint: "https://en.wikipedia.org/w/api.php".to_string(),
            info_user_agent: concat!("flower-lens/", env!("CARGO_PKG_VERSION")).to_string(),
            info_request_timeout: Duration::from_secs(10),
            info_fetch_max_attempts: 2,
            info_fetch_retry_delay: Duration::from_millis(500),
            camera_command: vec![
                "libcamera-still".to_string(),
                "--nopreview".to_string(),
                "--immediate".to_string(),
                "-o".to_string(),
            ],
            console_width: 60,
            model: ModelConfig::default(),
        }
    }
}
