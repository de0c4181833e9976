//! Presign response types.

use serde::{Deserialize, Serialize};

use crate::ObjectKey;

/// Raw `/presign` response body.
///
/// Both fields are optional on the wire; use [`PresignResponse::into_upload`]
/// to get a validated [`PresignedUpload`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PresignResponse {
    #[serde(rename = "uploadUrl", default, skip_serializing_if = "Option::is_none")]
    pub upload_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

impl PresignResponse {
    /// Validate the response, returning the missing field's message on failure.
    pub fn into_upload(self) -> Result<PresignedUpload, &'static str> {
        let upload_url = self
            .upload_url
            .filter(|u| !u.is_empty())
            .ok_or("No uploadUrl in response")?;
        let key = self
            .key
            .filter(|k| !k.is_empty())
            .ok_or("No key in response")?;

        Ok(PresignedUpload {
            upload_url,
            key: ObjectKey::from_string(key),
        })
    }
}

/// A presigned upload target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresignedUpload {
    /// Time-limited URL accepting a direct PUT of the file
    pub upload_url: String,
    /// Key confirmed by the backend; used for the prediction request
    pub key: ObjectKey,
}
