/// Core error types for Prism Player
use thiserror::Error;

/// Result type alias using `PrismError`
pub type Result<T> = std::result::Result<T, PrismError>;

/// Core error type for Prism Player
#[derive(Error, Debug)]
pub enum PrismError {
    /// Audio engine errors (decode failure, unsupported format)
    #[error("Engine error: {0}")]
    Engine(String),

    /// Track failed to load
    #[error("Track failed to load: {0}")]
    TrackLoadFailed(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    /// Other errors
    #[error("{0}")]
    Other(String),
}

impl PrismError {
    /// Create an engine error
    pub fn engine(msg: impl Into<String>) -> Self {
        Self::Engine(msg.into())
    }

    /// Create a track-load-failed error
    pub fn track_load_failed(msg: impl Into<String>) -> Self {
        Self::TrackLoadFailed(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}
