use crate::config::Config;
use crate::info_fetcher::interface::{FetchError, FlowerInfo, InfoFetcher};
use crate::info_fetcher::wikipedia::{parse_info, query_params};
use crate::library::logger::interface::Logger;
use reqwest::blocking::{Client, Request};
use std::sync::Arc;
use std::time::Duration;

pub struct InfoFetcherWikipedia {
    client: Client,
    endpoint: String,
    max_attempts: u32,
    retry_delay: Duration,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl InfoFetcherWikipedia {
    pub fn new(
        config: &Config,
        logger: Arc<dyn Logger + Send + Sync>,
    ) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let client = Client::builder()
            .user_agent(config.info_user_agent.clone())
            .timeout(config.info_request_timeout)
            .build()?;

        Ok(Self::with_client(client, config, logger))
    }

    fn with_client(client: Client, config: &Config, logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            client,
            endpoint: config.info_endpoint.clone(),
            max_attempts: config.info_fetch_max_attempts.max(1),
            retry_delay: config.info_fetch_retry_delay,
            logger: logger.with_namespace("info_fetcher"),
        }
    }

    pub fn request(&self, label: &str) -> Result<Request, reqwest::Error> {
        self.client
            .get(&self.endpoint)
            .query(&query_params(label))
            .build()
    }

    fn fetch_once(&self, label: &str) -> Result<FlowerInfo, FetchError> {
        let request = self.request(label).map_err(transport)?;
        let response = self.client.execute(request).map_err(transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.text().map_err(transport)?;
        Ok(parse_info(&body))
    }
}

fn transport(e: reqwest::Error) -> FetchError {
    FetchError::Transport {
        transient: e.is_timeout() || e.is_connect(),
        message: e.to_string(),
    }
}

impl InfoFetcher for InfoFetcherWikipedia {
    fn fetch_info(&self, label: &str) -> Result<FlowerInfo, FetchError> {
        let mut attempt = 1;

        loop {
            let _ = self
                .logger
                .info(&format!("Looking up {:?} (attempt {})", label, attempt));

            match self.fetch_once(label) {
                Ok(info) => {
                    let _ = self.logger.info(&format!(
                        "Got {} description chars, thumbnail {:?}",
                        info.description.chars().count(),
                        info.thumbnail_url
                    ));
                    return Ok(info);
                }
                Err(e) if e.is_transient() && attempt < self.max_attempts => {
                    let _ = self.logger.error(&format!("{}; retrying", e));
                    std::thread::sleep(self.retry_delay);
                    attempt += 1;
                }
                Err(e) => {
                    let _ = self.logger.error(&e.to_string());
                    return Err(e);
                }
            }
        }
    }
}
