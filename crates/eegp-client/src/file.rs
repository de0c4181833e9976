//! Local recordings to upload.

use std::path::Path;

use bytes::Bytes;
use eegp_models::file_extension;

use crate::error::{ClientError, ClientResult};

/// Extension accepted for uploads.
pub const SET_EXTENSION: &str = ".set";

/// A local file picked for upload.
#[derive(Debug, Clone)]
pub struct SetFile {
    /// Base name of the file
    pub name: String,
    /// Raw file content
    pub contents: Bytes,
}

impl SetFile {
    pub fn new(name: impl Into<String>, contents: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            contents: contents.into(),
        }
    }

    /// Read a file from disk.
    ///
    /// The name is checked before the file is read; a missing path is a
    /// validation failure too.
    pub async fn from_path(path: impl AsRef<Path>) -> ClientResult<Self> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        validate_name(&name)?;

        let contents = tokio::fs::read(path).await.map_err(|e| {
            ClientError::validation(format!("Cannot read {}: {}", path.display(), e))
        })?;

        Ok(Self::new(name, contents))
    }

    /// Check the file may be uploaded.
    pub fn validate(&self) -> ClientResult<()> {
        validate_name(&self.name)
    }
}

/// Check that `name` is a non-empty `.set` file name.
pub fn validate_name(name: &str) -> ClientResult<()> {
    if name.is_empty() {
        return Err(ClientError::validation("Please choose a .set file first."));
    }
    if file_extension(name) != SET_EXTENSION {
        return Err(ClientError::validation("Only .set files are allowed."));
    }
    Ok(())
}
