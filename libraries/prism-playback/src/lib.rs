//! Prism Player - Playback Management
//!
//! Platform-agnostic playback session for Prism Player.
//!
//! This crate provides:
//! - Transport state machine (Stopped / Playing / Paused)
//! - Playlist with wrap-around navigation and plain-text persistence
//! - Volume control with lossless mute round-trips
//! - Drag-seek with live engine seeking and suppressed position updates
//! - Generation-guarded engine event handling (stale callbacks discarded)
//! - Spectrum frame routing into the visualizer and out to the render sink
//!
//! # Architecture
//!
//! `prism-playback` is completely platform-agnostic: the audio engine and
//! the UI are supplied through the `prism-core` traits, and engine
//! callbacks arrive as typed [`EngineEvent`] messages. The host is
//! responsible for serializing those messages onto a single logical
//! sequence before they reach the session.
//!
//! # Example
//!
//! ```rust,no_run
//! use prism_core::{AudioEngine, RenderSink, TrackRef, VisualBar};
//! use prism_playback::{PlaybackSession, PlaylistStore, SessionConfig};
//! use std::path::PathBuf;
//! use std::time::Duration;
//!
//! struct MyEngine; // wraps the platform decoder + output
//! # impl AudioEngine for MyEngine {
//! #     fn open(&mut self, _: &TrackRef) -> prism_core::Result<()> { Ok(()) }
//! #     fn play(&mut self) {}
//! #     fn pause(&mut self) {}
//! #     fn stop(&mut self) {}
//! #     fn seek(&mut self, _: Duration) {}
//! #     fn set_volume(&mut self, _: f32) {}
//! # }
//! struct MySink; // repaints the bar strip
//! # impl RenderSink for MySink {
//! #     fn render(&mut self, _: &[VisualBar], _: Duration, _: Duration, _: &str) {}
//! # }
//!
//! let mut session = PlaybackSession::new(MyEngine, MySink, SessionConfig::default());
//! session.attach_store(PlaylistStore::new("playlist.txt"));
//!
//! session.add_tracks(vec![TrackRef::new(PathBuf::from("/music/song.mp3"))])?;
//! session.toggle_play_pause()?;
//! # Ok::<(), prism_playback::PlaybackError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod events;
mod playlist;
mod session;
mod volume;

// Public exports
pub use error::{PlaybackError, Result};
pub use events::{EngineEvent, SessionEvent};
pub use playlist::{Playlist, PlaylistStore};
pub use session::{PlaybackSession, SessionConfig};
pub use volume::Volume;
