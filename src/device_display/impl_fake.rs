use crate::device_display::interface::{DeviceDisplay, Screen};
use std::error::Error;
use std::sync::{Arc, Mutex};

/// Records every screen it is asked to show.
pub struct DeviceDisplayFake {
    history: Arc<Mutex<Vec<Screen>>>,
}

impl DeviceDisplayFake {
    pub fn new() -> Self {
        Self {
            history: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn history(&self) -> Arc<Mutex<Vec<Screen>>> {
        self.history.clone()
    }
}

impl DeviceDisplay for DeviceDisplayFake {
    fn init(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        Ok(())
    }

    fn show(&mut self, screen: &Screen) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.history.lock().unwrap().push(screen.clone());
        Ok(())
    }
}
