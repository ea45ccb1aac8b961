use crate::device_display::interface::{DeviceDisplay, Screen};
use crate::flower_lens::core::{Phase, State};
use crate::image_source::interface::SourceMode;
use std::sync::{Arc, Mutex};

pub fn screen_for(state: &State) -> Screen {
    let status = match &state.phase {
        Phase::Idle => "Take or pick a photo of a flower".to_string(),
        Phase::AcquiringImage {
            mode: SourceMode::Camera,
        } => "Waiting for the camera...".to_string(),
        Phase::AcquiringImage {
            mode: SourceMode::Library,
        } => "Waiting for a photo...".to_string(),
        Phase::Classifying => "Identifying...".to_string(),
        Phase::FetchingInfo { .. } => "Looking it up...".to_string(),
        Phase::Rendered => String::new(),
        Phase::Failed(failure) => failure.to_string(),
    };

    Screen {
        title: state.display.title.clone(),
        status,
        description: state.display.description.clone(),
        thumbnail_url: state.display.thumbnail_url.clone(),
        photo: state.display.photo.clone(),
    }
}

#[derive(Clone)]
pub struct Render {
    device_display: Arc<Mutex<dyn DeviceDisplay + Send + Sync>>,
}

impl Render {
    pub fn new(device_display: Arc<Mutex<dyn DeviceDisplay + Send + Sync>>) -> Self {
        Self { device_display }
    }

    pub fn init(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.device_display
            .lock()
            .map_err(|_| "Display lock poisoned")?
            .init()
    }

    pub fn render(&self, state: &State) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.device_display
            .lock()
            .map_err(|_| "Display lock poisoned")?
            .show(&screen_for(state))
    }
}
