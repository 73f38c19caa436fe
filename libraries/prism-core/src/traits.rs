/// Collaborator traits for Prism Player
///
/// The playback session drives an `AudioEngine` and feeds a `RenderSink`;
/// both are supplied by the host platform. Engine completion signals
/// (ready, time updates, spectrum frames) travel back to the session as
/// typed events rather than through these traits, which keeps the core
/// independent of any UI toolkit's threading model.
use crate::error::Result;
use crate::types::{Rgba, TrackRef};
use std::time::Duration;

/// Audio engine trait
///
/// Implementers wrap the platform's decoder + output device. All calls are
/// fire-and-forget from the session's point of view: `open` starts loading
/// a track and the engine reports readiness (or failure) asynchronously
/// through its event channel.
pub trait AudioEngine: Send {
    /// Start loading a track for playback
    ///
    /// Completion is signalled by a ready event carrying the track's total
    /// duration, or by a load-failure event.
    ///
    /// # Errors
    /// Returns an error only for immediate failures (e.g. the engine has
    /// shut down); decode errors arrive asynchronously.
    fn open(&mut self, track: &TrackRef) -> Result<()>;

    /// Start or resume playback of the opened track
    fn play(&mut self);

    /// Pause playback, keeping position
    fn pause(&mut self);

    /// Stop playback and release the opened track
    fn stop(&mut self);

    /// Seek within the opened track
    fn seek(&mut self, position: Duration);

    /// Set output volume (linear, `0.0` = silent, `1.0` = full)
    fn set_volume(&mut self, volume: f32);
}

/// One rendered visualizer bar
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct VisualBar {
    /// Bar height in render units (never below the configured floor)
    pub height: f32,

    /// Bar fill color, opacity derived from the bar's own height
    pub color: Rgba,
}

/// Render sink trait
///
/// Receives one render vector per ingested spectrum frame, plus one call on
/// every transport-state change so the UI can repaint without waiting for
/// the next frame.
pub trait RenderSink: Send {
    /// Present a visualizer frame and the current playback position
    fn render(
        &mut self,
        bars: &[VisualBar],
        position: Duration,
        total_duration: Duration,
        track_label: &str,
    );
}
