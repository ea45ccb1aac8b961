use crate::image_classifier::interface::{Classification, ClassifyError};

fn is_distribution(scores: &[f32]) -> bool {
    let sum: f32 = scores.iter().sum();
    scores.iter().all(|s| (0.0..=1.0).contains(s)) && (sum - 1.0).abs() < 1e-3
}

pub fn softmax(scores: &[f32]) -> Vec<f32> {
    let max = scores.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f32> = scores.iter().map(|s| (s - max).exp()).collect();
    let sum: f32 = exps.iter().sum();
    exps.iter().map(|e| e / sum).collect()
}

/// Turns raw model output into labelled candidates, best first. Equal scores keep
/// the model's output order.
pub fn rank(
    scores: &[f32],
    labels: &[String],
    min_confidence: f32,
    top_k: usize,
) -> Result<Vec<Classification>, ClassifyError> {
    if scores.len() != labels.len() {
        return Err(ClassifyError::ModelUnavailable(format!(
            "model produces {} scores but {} labels are configured",
            scores.len(),
            labels.len()
        )));
    }

    let probabilities = if is_distribution(scores) {
        scores.to_vec()
    } else {
        softmax(scores)
    };

    let mut indexed: Vec<(usize, f32)> = probabilities.into_iter().enumerate().collect();
    indexed.sort_by(|a, b| b.1.total_cmp(&a.1));

    Ok(indexed
        .into_iter()
        .filter(|(_, confidence)| *confidence >= min_confidence)
        .take(top_k)
        .map(|(idx, confidence)| Classification {
            label: labels[idx].clone(),
            confidence,
        })
        .collect())
}
