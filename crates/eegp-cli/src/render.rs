//! Terminal presentation of flow progress and results.

use eegp_client::ProgressObserver;
use eegp_models::{FlowStage, PredictionResult};

/// Prints stage changes as status lines on stderr.
pub struct TerminalProgress {
    demo: bool,
}

impl TerminalProgress {
    pub fn upload() -> Self {
        Self { demo: false }
    }

    pub fn demo() -> Self {
        Self { demo: true }
    }
}

impl ProgressObserver for TerminalProgress {
    fn on_stage(&self, stage: FlowStage) {
        if let Some(text) = status_text(stage, self.demo) {
            eprintln!("{}", text);
        }
    }
}

/// Status line for a stage; `None` for stages that print nothing.
pub fn status_text(stage: FlowStage, demo: bool) -> Option<&'static str> {
    match stage {
        FlowStage::RequestingUrl => Some("Requesting upload URL…"),
        FlowStage::Uploading => Some("Uploading to S3…"),
        FlowStage::Predicting if demo => Some("Running demo…"),
        FlowStage::Predicting => Some("Running prediction…"),
        FlowStage::Done => Some("Done ✔"),
        // errors are printed by the caller
        FlowStage::Idle | FlowStage::Failed => None,
    }
}

/// Human-readable summary followed by the raw JSON.
pub fn render_result(result: &PredictionResult) -> serde_json::Result<String> {
    let raw = serde_json::to_string_pretty(result)?;
    Ok(format!(
        "Predicted class: {}\nConfidence:      {}\nProbabilities:   {}\n\n{}",
        result.predicted_class,
        result.confidence_percent(),
        result.probs_percent(),
        raw
    ))
}
