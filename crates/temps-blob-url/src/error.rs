//! Error types for blob handles and reference URL registries

use thiserror::Error;

/// Errors that can occur while building blobs or materializing reference URLs
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BlobUrlError {
    #[error("Reference URL table is full ({capacity} live URLs)")]
    RegistryFull { capacity: usize },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The handle was disposed and has no content to reference
    #[error("Blob handle has been disposed")]
    Disposed,
}

impl From<serde_json::Error> for BlobUrlError {
    fn from(error: serde_json::Error) -> Self {
        BlobUrlError::InvalidConfig(error.to_string())
    }
}
