//! Error types for playback management

use thiserror::Error;

/// Playback errors
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// Playlist is empty
    #[error("Playlist is empty")]
    PlaylistEmpty,

    /// Index out of bounds
    #[error("Index out of bounds: {0}")]
    IndexOutOfBounds(usize),

    /// Audio engine error
    #[error("Engine error: {0}")]
    Engine(String),

    /// IO error (playlist persistence)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<prism_core::PrismError> for PlaybackError {
    fn from(err: prism_core::PrismError) -> Self {
        match err {
            prism_core::PrismError::Io(io) => Self::Io(io),
            other => Self::Engine(other.to_string()),
        }
    }
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
