//! # Error Types
//!
//! This module defines error types used throughout the qrsmith library.
//!
//! Most of the pipeline is total: empty content, oversized payloads and
//! unknown style names all degrade to "no preview" or a default appearance.
//! These errors surface only at the edges (CLI, HTTP service, PNG encoding).

use thiserror::Error;

use crate::preview::PreviewError;
use crate::symbol::MatrixError;

/// Main error type for qrsmith operations
#[derive(Debug, Error)]
pub enum QrsmithError {
    /// Payload could not be turned into a QR symbol
    #[error("Encode error: {0}")]
    Encode(String),

    /// Invalid render configuration or design
    #[error("Render error: {0}")]
    Render(String),

    /// Raster preview encoding error
    #[error("Image error: {0}")]
    Image(String),

    /// HTTP service errors (bind, serve)
    #[error("Server error: {0}")]
    Server(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error wrapper
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<MatrixError> for QrsmithError {
    fn from(e: MatrixError) -> Self {
        QrsmithError::Encode(e.to_string())
    }
}

impl From<PreviewError> for QrsmithError {
    fn from(e: PreviewError) -> Self {
        QrsmithError::Image(e.to_string())
    }
}
