use crate::image_classifier::interface::{Classification, ClassifyError, ImageClassifier};
use crate::image_source::interface::CapturedImage;
use crate::library::logger::interface::Logger;
use rand::distr::{Distribution, Uniform};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

const FLOWERS: &[&str] = &[
    "daisy",
    "rose",
    "tulip",
    "sunflower",
    "dandelion",
    "bird of paradise",
    "passion flower",
    "water lily",
];

pub struct ImageClassifierFake {
    logger: Arc<dyn Logger + Send + Sync>,
    scripted: Option<Result<Vec<Classification>, ClassifyError>>,
    calls: AtomicUsize,
}

impl ImageClassifierFake {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            logger: logger.with_namespace("image_classifier").with_namespace("fake"),
            scripted: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Always answers with `result` instead of a random flower.
    #[allow(dead_code)]
    pub fn with_result(mut self, result: Result<Vec<Classification>, ClassifyError>) -> Self {
        self.scripted = Some(result);
        self
    }

    #[allow(dead_code)]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn random(&self) -> Result<Vec<Classification>, ClassifyError> {
        let mut rng = rand::rng();

        let index_dist = Uniform::new(0, FLOWERS.len())
            .map_err(|e| ClassifyError::Inference(e.to_string()))?;
        let confidence_dist =
            Uniform::new(0.5, 1.0).map_err(|e| ClassifyError::Inference(e.to_string()))?;

        Ok(vec![Classification {
            label: FLOWERS[index_dist.sample(&mut rng)].to_string(),
            confidence: confidence_dist.sample(&mut rng),
        }])
    }
}

impl ImageClassifier for ImageClassifierFake {
    fn classify(&self, image: &CapturedImage) -> Result<Vec<Classification>, ClassifyError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let _ = self.logger.info(&format!("Classifying {:?}...", image));

        let result = match &self.scripted {
            Some(result) => result.clone(),
            None => self.random(),
        };

        let _ = self.logger.info(&format!("Result: {:?}", result));
        result
    }
}
