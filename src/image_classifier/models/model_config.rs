use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub struct ModelConfig {
    pub onnx_model_path: PathBuf,
    /// One label per line, in model output order.
    pub labels_path: PathBuf,
    /// (height, width)
    pub input_shape: (u32, u32),
    pub mean: [f32; 3],
    pub std: [f32; 3],
    pub min_confidence: f32,
    pub top_k: usize,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            onnx_model_path: PathBuf::from("./models/flower_classifier.onnx"),
            labels_path: PathBuf::from("./models/flower_labels.txt"),
            input_shape: (224, 224),
            mean: [0.485, 0.456, 0.406],
            std: [0.229, 0.224, 0.225],
            min_confidence: 0.0,
            top_k: 5,
        }
    }
}
