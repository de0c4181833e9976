//! Shared data models for the EEG prediction client.
//!
//! This crate provides Serde-serializable types for:
//! - Object keys for uploaded recordings
//! - Presign responses from the backend
//! - Prediction requests and results
//! - Flow stages reported to the presentation layer

pub mod object_key;
pub mod prediction;
pub mod presign;
pub mod stage;

// Re-export common types
pub use object_key::{file_extension, sanitize_filename, ObjectKey, DEFAULT_UPLOAD_PREFIX};
pub use prediction::{ApiErrorBody, PredictRequest, PredictionResult};
pub use presign::{PresignResponse, PresignedUpload};
pub use stage::FlowStage;
