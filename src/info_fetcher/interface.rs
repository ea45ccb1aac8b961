use thiserror::Error;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlowerInfo {
    pub description: String,
    pub thumbnail_url: String,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("Network request failed: {message}")]
    Transport { message: String, transient: bool },

    #[error("Server responded with status {0}")]
    Status(u16),
}

impl FetchError {
    pub fn is_transient(&self) -> bool {
        matches!(self, FetchError::Transport { transient: true, .. })
    }
}

pub trait InfoFetcher {
    fn fetch_info(&self, label: &str) -> Result<FlowerInfo, FetchError>;
}
