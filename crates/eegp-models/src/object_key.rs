//! Object keys for uploaded recordings.

use std::fmt;

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Prefix used for uploads when none is configured.
pub const DEFAULT_UPLOAD_PREFIX: &str = "uploads";

const SUFFIX_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const SUFFIX_LEN: usize = 6;

/// Storage key of an uploaded file.
///
/// Generated keys have the form `<prefix>/<timestamp>-<random>-<filename>`.
/// Keys returned by the backend are taken as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectKey(String);

impl ObjectKey {
    /// Generate a fresh key for `filename` under `prefix`.
    pub fn generate(prefix: &str, filename: &str) -> Self {
        Self::generate_with(prefix, filename, Utc::now(), &mut rand::rng())
    }

    /// Generate a key from an explicit clock reading and random source.
    pub fn generate_with<R: Rng>(
        prefix: &str,
        filename: &str,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> Self {
        let stamp = now.format("%Y-%m-%dT%H-%M-%S-%3f");
        let suffix: String = (0..SUFFIX_LEN)
            .map(|_| SUFFIX_ALPHABET[rng.random_range(0..SUFFIX_ALPHABET.len())] as char)
            .collect();
        let safe = sanitize_filename(filename);

        let prefix = prefix.trim_matches('/');
        if prefix.is_empty() {
            Self(format!("{}-{}-{}", stamp, suffix, safe))
        } else {
            Self(format!("{}/{}-{}-{}", prefix, stamp, suffix, safe))
        }
    }

    /// Create from an existing string.
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Replace every character outside `[A-Za-z0-9._-]` with `_`.
///
/// An empty name becomes `_` so the key always ends in a file segment.
pub fn sanitize_filename(name: &str) -> String {
    if name.is_empty() {
        return "_".to_string();
    }
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Lowercased extension of `name` including the dot, or `""` when absent.
pub fn file_extension(name: &str) -> String {
    match name.rfind('.') {
        Some(i) => name[i..].to_lowercase(),
        None => String::new(),
    }
}
