//! Prediction API HTTP client.

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Response, StatusCode};
use tracing::{debug, info, warn};

use eegp_models::{
    ApiErrorBody, ObjectKey, PredictRequest, PredictionResult, PresignResponse, PresignedUpload,
};

use crate::api::PredictApi;
use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::file::SetFile;
use crate::flow::UploadFlow;
use crate::progress::ProgressObserver;

/// Client for the prediction API and the storage it presigns for.
pub struct PredictClient {
    http: Client,
    config: ClientConfig,
}

impl PredictClient {
    /// Create a new client.
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        config.validate()?;

        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| ClientError::config(format!("HTTP client: {}", e)))?;

        Ok(Self { http, config })
    }

    /// Create from environment variables.
    pub fn from_env() -> ClientResult<Self> {
        Self::new(ClientConfig::from_env())
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Generate a key for `filename` under the configured prefix.
    pub fn generate_object_key(&self, filename: &str) -> ObjectKey {
        ObjectKey::generate(&self.config.upload_prefix, filename)
    }

    /// Validate, presign, upload and predict `file`.
    pub async fn run_upload_flow(
        &self,
        file: &SetFile,
        observer: &dyn ProgressObserver,
    ) -> ClientResult<PredictionResult> {
        UploadFlow::new(self, observer, &self.config.upload_prefix)
            .run_upload(file)
            .await
    }

    /// Predict on the backend's sample recording.
    pub async fn run_demo_flow(
        &self,
        observer: &dyn ProgressObserver,
    ) -> ClientResult<PredictionResult> {
        UploadFlow::new(self, observer, &self.config.upload_prefix)
            .run_demo(self.config.demo_key.as_deref())
            .await
    }

    /// Probe `/health`, reporting why the API is unreachable.
    pub async fn health(&self) -> ClientResult<()> {
        let url = self.config.endpoint("health");

        match self.http.get(&url).send().await {
            Ok(response) if response.status().is_success() => Ok(()),
            Ok(response) => Err(ClientError::NetworkUnreachable(format!(
                "health check returned {}",
                response.status().as_u16()
            ))),
            Err(e) => Err(ClientError::NetworkUnreachable(e.to_string())),
        }
    }

    /// Best-effort health check; never fails.
    pub async fn check_health(&self) -> bool {
        match self.health().await {
            Ok(()) => true,
            Err(e) => {
                warn!("Prediction API health check failed: {}", e);
                false
            }
        }
    }

    fn presign_url(&self, key: &ObjectKey) -> String {
        let mut url = format!(
            "{}?key={}",
            self.config.endpoint("presign"),
            urlencoding::encode(key.as_str())
        );
        if let Some(content_type) = &self.config.content_type {
            url.push_str("&content_type=");
            url.push_str(&urlencoding::encode(content_type));
        }
        url
    }
}

#[async_trait]
impl PredictApi for PredictClient {
    async fn request_upload_url(&self, key: &ObjectKey) -> ClientResult<PresignedUpload> {
        let url = self.presign_url(key);
        debug!("Requesting presigned URL: {}", url);

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| ClientError::presign(None, format!("Presign request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let detail = error_detail(response).await;
            if let Some(detail) = &detail {
                warn!("Presign rejected with {}: {}", status.as_u16(), detail);
            }
            return Err(ClientError::presign_with_detail(
                Some(status.as_u16()),
                format!("Presign failed: {}", status.as_u16()),
                detail,
            ));
        }

        let body: PresignResponse = response.json().await.map_err(|e| {
            ClientError::presign(
                Some(status.as_u16()),
                format!("Invalid presign response: {}", e),
            )
        })?;

        let upload = body
            .into_upload()
            .map_err(|msg| ClientError::presign(Some(status.as_u16()), msg))?;

        debug!("Presigned upload for {}", upload.key);
        Ok(upload)
    }

    async fn upload_file(&self, upload_url: &str, contents: Bytes) -> ClientResult<()> {
        let size = contents.len();
        debug!("Uploading {} bytes to presigned URL", size);

        let mut request = self.http.put(upload_url).body(contents);
        if let Some(content_type) = &self.config.content_type {
            request = request.header(CONTENT_TYPE, content_type.as_str());
        }

        let response = request
            .send()
            .await
            .map_err(|e| ClientError::upload(None, format!("S3 upload failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::upload(
                Some(status.as_u16()),
                format!("S3 upload failed: {}", status.as_u16()),
            ));
        }

        info!("Uploaded {} bytes", size);
        Ok(())
    }

    async fn predict(&self, request: &PredictRequest) -> ClientResult<PredictionResult> {
        let url = self.config.endpoint("predict");
        debug!("Sending prediction request to {} (demo={})", url, request.is_demo());

        let response = self
            .http
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| ClientError::predict(None, format!("Predict request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let message = error_detail(response)
                .await
                .unwrap_or_else(|| predict_failed(status));
            return Err(ClientError::predict(Some(status.as_u16()), message));
        }

        let result: PredictionResult = response.json().await.map_err(|e| {
            ClientError::predict(
                Some(status.as_u16()),
                format!("Invalid prediction response: {}", e),
            )
        })?;

        info!(
            "Prediction: {} ({})",
            result.predicted_class,
            result.confidence_percent()
        );
        Ok(result)
    }
}

/// Backend-supplied `error` message of a failed response, if any.
async fn error_detail(response: Response) -> Option<String> {
    let body = response.text().await.unwrap_or_default();
    serde_json::from_str::<ApiErrorBody>(&body)
        .ok()
        .map(|b| b.error)
        .filter(|e| !e.is_empty())
}

fn predict_failed(status: StatusCode) -> String {
    format!("Predict failed: {}", status.as_u16())
}
