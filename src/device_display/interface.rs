use crate::image_source::interface::CapturedImage;
use std::error::Error;

/// Everything the single screen shows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Screen {
    pub title: String,
    pub status: String,
    pub description: String,
    pub thumbnail_url: String,
    pub photo: Option<CapturedImage>,
}

pub trait DeviceDisplay: Send + Sync {
    fn init(&mut self) -> Result<(), Box<dyn Error + Send + Sync>>;

    /// Replaces the whole screen with `screen`.
    fn show(&mut self, screen: &Screen) -> Result<(), Box<dyn Error + Send + Sync>>;
}
