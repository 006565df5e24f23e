// SPDX-License-Identifier: MPL-2.0

//! Error types for the filter camera
//!
//! Filter transforms are infallible; everything here belongs to the
//! collaborators around them (storage, codec, configuration, capture flow).

use thiserror::Error;

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;

/// Main application error type
#[derive(Debug, Error)]
pub enum AppError {
    /// Durable storage errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
    /// Capture and download errors
    #[error("Capture error: {0}")]
    Capture(#[from] CaptureError),
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    /// Image decoding/encoding errors
    #[error("Codec error: {0}")]
    Codec(String),
    /// Raw pixel data does not match the declared dimensions
    #[error("pixel buffer holds {actual} bytes, expected {expected}")]
    BufferSize { expected: usize, actual: usize },
}

/// Key-value store failures
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed
    #[error("I/O failure for key '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },
    /// The stored value could not be encoded or decoded
    #[error("Serialization failure: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Capture flow failures
#[derive(Debug, Error)]
pub enum CaptureError {
    /// Capture requested while no frames are flowing
    #[error("Please start the camera first!")]
    NotStreaming,
    /// Download requested with an empty gallery
    #[error("No photos to download!")]
    EmptyStore,
    /// The still could not be encoded
    #[error("Encoding failed: {0}")]
    Encoding(String),
    /// The downloaded file could not be written
    #[error("Save failed: {0}")]
    SaveFailed(#[from] std::io::Error),
}

/// Configuration failures
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file: {0}")]
    Parse(#[from] serde_json::Error),
}

impl From<image::ImageError> for AppError {
    fn from(err: image::ImageError) -> Self {
        AppError::Codec(err.to_string())
    }
}
