use crate::image_source::interface::CapturedImage;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub label: String,
    pub confidence: f32,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClassifyError {
    #[error("Model unavailable: {0}")]
    ModelUnavailable(String),

    #[error("Image conversion failed: {0}")]
    ImageConversion(String),

    #[error("Inference failed: {0}")]
    Inference(String),
}

pub trait ImageClassifier {
    /// Candidates ordered by descending confidence. An empty result is not an error.
    fn classify(&self, image: &CapturedImage) -> Result<Vec<Classification>, ClassifyError>;
}
