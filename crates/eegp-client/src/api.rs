//! Backend seam used by [`crate::UploadFlow`].

use async_trait::async_trait;
use bytes::Bytes;
use eegp_models::{ObjectKey, PredictRequest, PredictionResult, PresignedUpload};

use crate::error::ClientResult;

/// The three remote calls an upload flow depends on.
#[async_trait]
pub trait PredictApi: Send + Sync {
    /// Ask the backend for a presigned upload URL for `key`.
    async fn request_upload_url(&self, key: &ObjectKey) -> ClientResult<PresignedUpload>;

    /// PUT the raw file content to a presigned URL.
    async fn upload_file(&self, upload_url: &str, contents: Bytes) -> ClientResult<()>;

    /// Request a prediction for an uploaded object or the demo sample.
    async fn predict(&self, request: &PredictRequest) -> ClientResult<PredictionResult>;
}
