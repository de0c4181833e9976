//! Progress notifications.

use eegp_models::FlowStage;

/// Receives the stages a flow passes through.
pub trait ProgressObserver: Send + Sync {
    fn on_stage(&self, stage: FlowStage);
}

impl<F> ProgressObserver for F
where
    F: Fn(FlowStage) + Send + Sync,
{
    fn on_stage(&self, stage: FlowStage) {
        self(stage)
    }
}

/// Observer that ignores every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressObserver for NoProgress {
    fn on_stage(&self, _stage: FlowStage) {}
}
