use crate::info_fetcher::interface::{FetchError, FlowerInfo, InfoFetcher};
use crate::info_fetcher::wikipedia::parse_info;
use crate::library::logger::interface::Logger;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

pub struct InfoFetcherFake {
    logger: Arc<dyn Logger + Send + Sync>,
    bodies: HashMap<String, Result<String, FetchError>>,
    requested: Mutex<Vec<String>>,
}

impl InfoFetcherFake {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            logger: logger.with_namespace("info_fetcher").with_namespace("fake"),
            bodies: HashMap::new(),
            requested: Mutex::new(Vec::new()),
        }
    }

    /// Serves `body` as the raw JSON response for `label`.
    #[allow(dead_code)]
    pub fn with_response(mut self, label: &str, body: &str) -> Self {
        self.bodies.insert(label.to_string(), Ok(body.to_string()));
        self
    }

    #[allow(dead_code)]
    pub fn with_failure(mut self, label: &str, error: FetchError) -> Self {
        self.bodies.insert(label.to_string(), Err(error));
        self
    }

    #[allow(dead_code)]
    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

impl InfoFetcher for InfoFetcherFake {
    fn fetch_info(&self, label: &str) -> Result<FlowerInfo, FetchError> {
        let _ = self.logger.info(&format!("Looking up {:?}...", label));
        if let Ok(mut requested) = self.requested.lock() {
            requested.push(label.to_string());
        }

        match self.bodies.get(label) {
            Some(Ok(body)) => Ok(parse_info(body)),
            Some(Err(e)) => Err(e.clone()),
            None => Ok(FlowerInfo {
                description: format!("The {} is a flowering plant.", label),
                thumbnail_url: format!(
                    "https://upload.wikimedia.org/thumb/{}.jpg",
                    label.replace(' ', "_")
                ),
            }),
        }
    }
}
