//! Upload and demo flows.
//!
//! A flow runs its remote calls strictly in sequence. The first failure
//! aborts the remaining steps and is returned as-is; nothing is retried and
//! a failed flow must be started again from the beginning.

use tracing::{debug, info};

use eegp_models::{FlowStage, ObjectKey, PredictRequest, PredictionResult};

use crate::api::PredictApi;
use crate::error::ClientResult;
use crate::file::SetFile;
use crate::progress::ProgressObserver;

/// One user-triggered flow against a [`PredictApi`].
pub struct UploadFlow<'a, A: PredictApi + ?Sized> {
    api: &'a A,
    observer: &'a dyn ProgressObserver,
    key_prefix: &'a str,
}

impl<'a, A: PredictApi + ?Sized> UploadFlow<'a, A> {
    pub fn new(api: &'a A, observer: &'a dyn ProgressObserver, key_prefix: &'a str) -> Self {
        Self {
            api,
            observer,
            key_prefix,
        }
    }

    /// Validate `file`, then presign, upload and predict on the confirmed key.
    pub async fn run_upload(&self, file: &SetFile) -> ClientResult<PredictionResult> {
        let result = self.upload_steps(file).await;
        self.finish(&result);
        result
    }

    /// Predict on the backend's sample recording without uploading.
    pub async fn run_demo(&self, demo_key: Option<&str>) -> ClientResult<PredictionResult> {
        self.observer.on_stage(FlowStage::Predicting);
        let request = PredictRequest::demo(demo_key.map(str::to_string));
        let result = self.api.predict(&request).await;
        self.finish(&result);
        result
    }

    async fn upload_steps(&self, file: &SetFile) -> ClientResult<PredictionResult> {
        file.validate()?;

        self.observer.on_stage(FlowStage::RequestingUrl);
        let key = ObjectKey::generate(self.key_prefix, &file.name);
        debug!("Generated object key {} for {}", key, file.name);
        let upload = self.api.request_upload_url(&key).await?;

        self.observer.on_stage(FlowStage::Uploading);
        self.api
            .upload_file(&upload.upload_url, file.contents.clone())
            .await?;

        self.observer.on_stage(FlowStage::Predicting);
        self.api.predict(&PredictRequest::by_key(&upload.key)).await
    }

    fn finish(&self, result: &ClientResult<PredictionResult>) {
        match result {
            Ok(prediction) => {
                info!("Flow done: {}", prediction.predicted_class);
                self.observer.on_stage(FlowStage::Done);
            }
            Err(e) => {
                info!("Flow failed: {}", e);
                self.observer.on_stage(FlowStage::Failed);
            }
        }
    }
}
