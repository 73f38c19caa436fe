//! Spectrum frame type delivered by the audio engine

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// One spectrum analysis frame
///
/// Produced by the engine at a fixed interval (~45ms) while a track plays.
/// Magnitudes are in dB, typically negative, floored by the engine at the
/// configured threshold — though values at or slightly below the threshold
/// are legitimate measurement noise and must be tolerated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpectrumFrame {
    /// Per-band magnitudes in dB (length = engine band count)
    pub magnitudes_db: Vec<f32>,

    /// Playback position this frame was measured at
    pub timestamp: Duration,

    /// Total duration of the playing track
    pub total_duration: Duration,
}

impl SpectrumFrame {
    /// Create a new spectrum frame
    pub fn new(magnitudes_db: Vec<f32>, timestamp: Duration, total_duration: Duration) -> Self {
        Self {
            magnitudes_db,
            timestamp,
            total_duration,
        }
    }

    /// Number of source bands in this frame
    pub fn band_count(&self) -> usize {
        self.magnitudes_db.len()
    }
}
