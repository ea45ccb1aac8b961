use crate::image_classifier::interface::{Classification, ClassifyError, ImageClassifier};
use crate::image_classifier::models::model_config::ModelConfig;
use crate::image_classifier::tract::image::resize_image_to_tensor;
use crate::image_classifier::tract::scores::rank;
use crate::image_source::interface::CapturedImage;
use crate::library::logger::interface::Logger;
use std::sync::{Arc, OnceLock};
use tract_onnx::prelude::*;

type Plan = SimplePlan<TypedFact, Box<dyn TypedOp>, TypedModel>;

struct LoadedModel {
    plan: Plan,
    labels: Vec<String>,
}

/// Loads the model on first use and keeps the outcome, so a missing model fails
/// each request instead of the whole program.
pub struct ImageClassifierTractOnnx {
    config: ModelConfig,
    loaded: OnceLock<Result<LoadedModel, String>>,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl ImageClassifierTractOnnx {
    pub fn new(config: ModelConfig, logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            config,
            loaded: OnceLock::new(),
            logger: logger.with_namespace("image_classifier"),
        }
    }

    fn load(config: &ModelConfig) -> Result<LoadedModel, Box<dyn std::error::Error + Send + Sync>> {
        let (height, width) = config.input_shape;

        let plan = tract_onnx::onnx()
            .model_for_path(&config.onnx_model_path)?
            .with_input_fact(0, f32::fact([1, 3, height as usize, width as usize]).into())?
            .into_optimized()?
            .into_runnable()?;

        let labels = parse_labels(&std::fs::read_to_string(&config.labels_path)?);

        Ok(LoadedModel { plan, labels })
    }

    fn model(&self) -> Result<&LoadedModel, ClassifyError> {
        self.loaded
            .get_or_init(|| {
                let _ = self.logger.info(&format!(
                    "Loading model {}",
                    self.config.onnx_model_path.display()
                ));
                let loaded = Self::load(&self.config).map_err(|e| e.to_string());
                if let Err(e) = &loaded {
                    let _ = self.logger.error(&format!("Model failed to load: {}", e));
                }
                loaded
            })
            .as_ref()
            .map_err(|e| ClassifyError::ModelUnavailable(e.clone()))
    }
}

pub fn parse_labels(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

impl ImageClassifier for ImageClassifierTractOnnx {
    fn classify(&self, image: &CapturedImage) -> Result<Vec<Classification>, ClassifyError> {
        let model = self.model()?;
        let (height, width) = self.config.input_shape;

        let input = resize_image_to_tensor(
            image.image(),
            width,
            height,
            self.config.mean,
            self.config.std,
        )?;

        let outputs = model
            .plan
            .run(tvec!(input.into_tvalue()))
            .map_err(|e| ClassifyError::Inference(e.to_string()))?;

        let output = outputs
            .first()
            .ok_or_else(|| ClassifyError::Inference("model produced no output".to_string()))?;

        let scores: Vec<f32> = output
            .to_array_view::<f32>()
            .map_err(|e| ClassifyError::Inference(e.to_string()))?
            .iter()
            .copied()
            .collect();

        let classifications = rank(
            &scores,
            &model.labels,
            self.config.min_confidence,
            self.config.top_k,
        )?;

        let _ = self
            .logger
            .info(&format!("Classifications: {:?}", classifications));

        Ok(classifications)
    }
}
