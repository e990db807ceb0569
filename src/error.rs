//! Error types for the room generation pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for roomgen operations.
#[derive(Error, Debug)]
pub enum RoomgenError {
    /// Failure talking to the multimedia service (unreachable or malformed data).
    #[error("Retrieval error: {0}")]
    Retrieval(String),

    /// Invalid configuration or generation request.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error during SOM training or inference.
    #[error("SOM error: {0}")]
    Som(String),

    /// Image header could not be read.
    #[error("Image error: {0}")]
    Image(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// File not found.
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),
}

/// Result type alias for roomgen operations.
pub type Result<T> = std::result::Result<T, RoomgenError>;

impl From<serde_json::Error> for RoomgenError {
    fn from(err: serde_json::Error) -> Self {
        RoomgenError::Serialization(err.to_string())
    }
}

impl From<image::ImageError> for RoomgenError {
    fn from(err: image::ImageError) -> Self {
        RoomgenError::Image(err.to_string())
    }
}
