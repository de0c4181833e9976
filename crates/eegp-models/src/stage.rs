//! Stages of an upload or demo flow.

use serde::{Deserialize, Serialize};

/// Where a flow currently is.
///
/// Upload flows go `Idle -> RequestingUrl -> Uploading -> Predicting -> Done`;
/// demo flows go straight from `Idle` to `Predicting`. Any step can end in
/// `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FlowStage {
    #[default]
    Idle,
    RequestingUrl,
    Uploading,
    Predicting,
    Done,
    Failed,
}

impl FlowStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlowStage::Idle => "idle",
            FlowStage::RequestingUrl => "requesting_url",
            FlowStage::Uploading => "uploading",
            FlowStage::Predicting => "predicting",
            FlowStage::Done => "done",
            FlowStage::Failed => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, FlowStage::Done | FlowStage::Failed)
    }
}
