//! Client for the EEG prediction API.
//!
//! This crate uploads `.set` recordings straight to object storage through a
//! presigned URL and asks the backend for a prediction on the stored object:
//! - [`PredictClient`]: the presign, upload, predict and health calls
//! - [`UploadFlow`]: sequencing of those calls for one user action
//! - [`ProgressObserver`]: stage notifications for a presentation layer

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod file;
pub mod flow;
pub mod progress;

pub use api::PredictApi;
pub use client::PredictClient;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use file::SetFile;
pub use flow::UploadFlow;
pub use progress::{NoProgress, ProgressObserver};

pub use eegp_models::{FlowStage, ObjectKey, PredictRequest, PredictionResult, PresignedUpload};
