//! Client error types.

use thiserror::Error;

pub type ClientResult<T> = Result<T, ClientError>;

/// Errors surfaced to the caller of a flow.
///
/// The `Display` output is the message shown to the user.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("{0}")]
    Validation(String),

    #[error("{message}")]
    Presign {
        status: Option<u16>,
        message: String,
        /// Backend-supplied `error` text, kept out of the display message
        detail: Option<String>,
    },

    #[error("{message}")]
    Upload { status: Option<u16>, message: String },

    #[error("{message}")]
    Predict { status: Option<u16>, message: String },

    #[error("API unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl ClientError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn presign(status: Option<u16>, msg: impl Into<String>) -> Self {
        Self::Presign {
            status,
            message: msg.into(),
            detail: None,
        }
    }

    pub fn presign_with_detail(
        status: Option<u16>,
        msg: impl Into<String>,
        detail: Option<String>,
    ) -> Self {
        Self::Presign {
            status,
            message: msg.into(),
            detail,
        }
    }

    pub fn upload(status: Option<u16>, msg: impl Into<String>) -> Self {
        Self::Upload {
            status,
            message: msg.into(),
        }
    }

    pub fn predict(status: Option<u16>, msg: impl Into<String>) -> Self {
        Self::Predict {
            status,
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// HTTP status of the failed call, when the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Presign { status, .. }
            | ClientError::Upload { status, .. }
            | ClientError::Predict { status, .. } => *status,
            _ => None,
        }
    }

    /// Error text the backend sent alongside a failed presign.
    pub fn detail(&self) -> Option<&str> {
        match self {
            ClientError::Presign { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    /// True when the flow failed before touching the network.
    pub fn is_validation(&self) -> bool {
        matches!(self, ClientError::Validation(_))
    }
}
