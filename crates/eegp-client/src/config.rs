//! Client configuration.

use std::time::Duration;

use eegp_models::DEFAULT_UPLOAD_PREFIX;
use tracing::warn;
use url::Url;

use crate::error::{ClientError, ClientResult};

const DEFAULT_API_BASE: &str = "http://localhost:8080";

/// Configuration for the prediction client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the prediction API, without trailing slash
    pub api_base: String,
    /// Prefix for generated object keys
    pub upload_prefix: String,
    /// Content type announced to presign and sent with the upload.
    /// `None` keeps the upload free of extra headers.
    pub content_type: Option<String>,
    /// Override of the backend's sample object for demo runs
    pub demo_key: Option<String>,
    /// Per-request timeout; `None` waits indefinitely
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            upload_prefix: DEFAULT_UPLOAD_PREFIX.to_string(),
            content_type: None,
            demo_key: None,
            timeout: None,
        }
    }
}

impl ClientConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            api_base: std::env::var("EEGP_API_BASE")
                .map(|s| normalize_base(&s))
                .unwrap_or_else(|_| DEFAULT_API_BASE.to_string()),
            upload_prefix: std::env::var("EEGP_UPLOAD_PREFIX")
                .unwrap_or_else(|_| DEFAULT_UPLOAD_PREFIX.to_string()),
            content_type: non_empty_var("EEGP_CONTENT_TYPE"),
            demo_key: non_empty_var("EEGP_DEMO_KEY"),
            timeout: parse_timeout(non_empty_var("EEGP_TIMEOUT_SECS").as_deref()),
        }
    }

    /// Replace the API base, e.g. from a command-line flag.
    pub fn with_api_base(mut self, api_base: impl AsRef<str>) -> Self {
        self.api_base = normalize_base(api_base.as_ref());
        self
    }

    pub fn with_content_type(mut self, content_type: Option<String>) -> Self {
        self.content_type = content_type.filter(|s| !s.is_empty());
        self
    }

    pub fn with_demo_key(mut self, demo_key: Option<String>) -> Self {
        self.demo_key = demo_key.filter(|s| !s.is_empty());
        self
    }

    /// Check that the API base is an absolute http(s) URL.
    pub fn validate(&self) -> ClientResult<()> {
        let url = Url::parse(&self.api_base)
            .map_err(|e| ClientError::config(format!("api base {:?}: {}", self.api_base, e)))?;

        match url.scheme() {
            "http" | "https" => Ok(()),
            other => Err(ClientError::config(format!(
                "api base must be http or https, got {}",
                other
            ))),
        }
    }

    /// Join an endpoint path onto the API base.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_base, path.trim_start_matches('/'))
    }
}

fn normalize_base(s: &str) -> String {
    s.trim().trim_end_matches('/').to_string()
}

/// Seconds from `EEGP_TIMEOUT_SECS`; an unparseable value is reported and ignored.
fn parse_timeout(value: Option<&str>) -> Option<Duration> {
    let value = value?;
    match value.trim().parse::<u64>() {
        Ok(secs) => Some(Duration::from_secs(secs)),
        Err(e) => {
            warn!("Ignoring EEGP_TIMEOUT_SECS={:?}: {}; no timeout applied", value, e);
            None
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.is_empty())
}
