//! Playback events
//!
//! Typed messages on both sides of the session:
//! - [`EngineEvent`]: notifications coming in from the audio engine's
//!   decoding thread(s), serialized onto one logical sequence by the host.
//!   Every event carries the track generation it was produced for so the
//!   session can discard stragglers from a track that was switched away
//!   from mid-load.
//! - [`SessionEvent`]: notifications going out to the host UI, drained via
//!   [`PlaybackSession::drain_events`](crate::PlaybackSession::drain_events).

use prism_core::PlaybackState;
use prism_viz::SpectrumFrame;
use serde::{Deserialize, Serialize};

/// Notification from the audio engine, tagged with its track generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EngineEvent {
    /// The opened track is decoded far enough to play
    Ready {
        /// Generation of the `open` call this answers
        generation: u64,
        /// Total track duration in milliseconds
        total_duration_ms: u64,
    },

    /// Periodic playback position update
    TimeUpdate {
        /// Generation of the playing track
        generation: u64,
        /// Current position in milliseconds
        position_ms: u64,
    },

    /// One spectrum analysis frame (fixed interval while playing)
    Spectrum {
        /// Generation of the playing track
        generation: u64,
        /// The measured frame
        frame: SpectrumFrame,
    },

    /// The playing track reached its end
    TrackEnded {
        /// Generation of the track that finished
        generation: u64,
    },

    /// The track could not be loaded (decode error, unsupported format)
    LoadFailed {
        /// Generation of the `open` call that failed
        generation: u64,
        /// Engine-provided failure description
        message: String,
    },
}

impl EngineEvent {
    /// The generation this event was produced for
    pub fn generation(&self) -> u64 {
        match *self {
            Self::Ready { generation, .. }
            | Self::TimeUpdate { generation, .. }
            | Self::Spectrum { generation, .. }
            | Self::TrackEnded { generation }
            | Self::LoadFailed { generation, .. } => generation,
        }
    }
}

/// Notification emitted by the session for host UIs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SessionEvent {
    /// Transport state changed
    StateChanged {
        /// The new state
        state: PlaybackState,
    },

    /// A different track became current
    TrackChanged {
        /// Playlist index of the new track
        index: usize,
        /// Display label of the new track
        label: String,
    },

    /// Volume or mute changed
    VolumeChanged {
        /// Effective level forwarded to the engine (0 while muted)
        level: f32,
        /// Whether audio is muted
        muted: bool,
    },

    /// Playlist contents changed (tracks added/removed)
    PlaylistChanged {
        /// New playlist length
        length: usize,
    },

    /// A track failed to load
    Error {
        /// Failure description
        message: String,
    },
}

impl SessionEvent {
    /// Serialize for a host's IPC/WS boundary
    ///
    /// Hosts that forward session notifications to an out-of-process UI
    /// can ship them as JSON without defining their own wire types.
    pub fn to_json(&self) -> prism_core::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
