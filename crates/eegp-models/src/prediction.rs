//! Prediction request/response types.

use serde::{Deserialize, Serialize};

use crate::ObjectKey;

/// Body of a `/predict` request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PredictRequest {
    /// Predict on an uploaded object
    ByKey { s3_key: String },
    /// Predict on the backend's sample recording
    Demo {
        demo: bool,
        /// Override of the backend's sample object
        #[serde(skip_serializing_if = "Option::is_none")]
        demo_key: Option<String>,
    },
}

impl PredictRequest {
    pub fn by_key(key: &ObjectKey) -> Self {
        Self::ByKey {
            s3_key: key.as_str().to_string(),
        }
    }

    pub fn demo(demo_key: Option<String>) -> Self {
        Self::Demo {
            demo: true,
            demo_key,
        }
    }

    pub fn is_demo(&self) -> bool {
        matches!(self, Self::Demo { .. })
    }
}

/// Result of a prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Label of the most likely class
    pub predicted_class: String,
    /// Probability of the predicted class (0-1)
    pub confidence: f64,
    /// Per-class probabilities, in model output order
    pub probs: Vec<f64>,
    /// Index of the predicted class in `probs`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_index: Option<usize>,
}

impl PredictionResult {
    /// Confidence formatted as a percentage, e.g. `87.00%`.
    pub fn confidence_percent(&self) -> String {
        format!("{:.2}%", self.confidence * 100.0)
    }

    /// Probabilities formatted as `[87.0%, 13.0%]`.
    pub fn probs_percent(&self) -> String {
        let parts: Vec<String> = self
            .probs
            .iter()
            .map(|p| format!("{:.1}%", p * 100.0))
            .collect();
        format!("[{}]", parts.join(", "))
    }
}

/// Error body returned by the backend on non-2xx responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub error: String,
}
