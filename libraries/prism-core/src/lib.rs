//! Prism Player Core
//!
//! Platform-agnostic core types, traits, and error handling for Prism Player.
//!
//! The core crate defines:
//! - **Domain Types**: `TrackRef`, `PlaybackState`, `Rgb`/`Rgba`
//! - **Collaborator Traits**: `AudioEngine`, `RenderSink`
//! - **Error Handling**: Unified `PrismError` and `Result` types
//!
//! The audio engine (decoder + output device) and the UI layer are external
//! collaborators reached exclusively through the traits in this crate; the
//! core never touches a decoder, a widget toolkit, or a file dialog.
//!
//! # Example
//!
//! ```rust
//! use prism_core::{PlaybackState, Rgb, TrackRef};
//! use std::path::PathBuf;
//!
//! let track = TrackRef::new(PathBuf::from("/music/song.mp3"));
//! assert_eq!(track.label(), "song.mp3");
//!
//! let cold = Rgb::from_hex("#4facfe").unwrap();
//! let warm = Rgb::from_hex("#ff4e50").unwrap();
//! assert_eq!(cold.lerp(warm, 0.0), cold);
//! assert_eq!(PlaybackState::default(), PlaybackState::Stopped);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use error::{PrismError, Result};
pub use traits::{AudioEngine, RenderSink, VisualBar};
pub use types::{PlaybackState, Rgb, Rgba, TrackRef};
