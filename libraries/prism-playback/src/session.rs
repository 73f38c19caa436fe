//! Playback session - core orchestration
//!
//! Coordinates playlist, volume, transport state, and the spectrum
//! smoother against an injected audio engine and render sink. The session
//! is an explicitly owned object: the host constructs one at startup and
//! routes all UI commands and engine events through it. No singletons.
//!
//! Engine callbacks arrive as [`EngineEvent`]s already serialized onto one
//! logical sequence (the host's event loop or a single mutex); the session
//! itself never blocks and performs no I/O beyond explicit playlist
//! persistence.

use crate::error::{PlaybackError, Result};
use crate::events::{EngineEvent, SessionEvent};
use crate::playlist::{Playlist, PlaylistStore};
use crate::volume::Volume;
use prism_core::{AudioEngine, PlaybackState, RenderSink, TrackRef};
use prism_viz::{ColorRamp, SmootherConfig, SpectrumSmoother};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Session configuration
#[derive(Debug, Clone, Copy)]
pub struct SessionConfig {
    /// Spectrum smoother configuration
    pub smoother: SmootherConfig,

    /// Initial volume (0.0 - 1.0)
    pub volume: f32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            smoother: SmootherConfig::default(),
            volume: 1.0,
        }
    }
}

/// Playback session state machine
///
/// Transport states: `Stopped → Playing ⇄ Paused`, with `Stopped` also
/// entered on explicit stop, end-of-track, and load failure.
///
/// Every `open` issued to the engine is tagged with a monotonically
/// increasing track generation; engine events from an older generation are
/// discarded, so a track switched away from mid-load can never resurrect
/// itself through a late callback.
pub struct PlaybackSession<E: AudioEngine, S: RenderSink> {
    engine: E,
    sink: S,

    playlist: Playlist,
    store: Option<PlaylistStore>,

    /// Index of the current track; `None` until the first load
    current_index: Option<usize>,

    state: PlaybackState,
    volume: Volume,
    smoother: SpectrumSmoother,

    /// Track-generation counter, incremented on every load
    generation: u64,

    /// Whether the engine holds a ready, playable track
    track_loaded: bool,

    /// True while the user drags the seek control
    is_seeking: bool,

    position_ms: u64,
    total_duration_ms: u64,

    /// Event queue for UI synchronization
    pending_events: Vec<SessionEvent>,
}

impl<E: AudioEngine, S: RenderSink> PlaybackSession<E, S> {
    /// Create a new session with an empty playlist
    pub fn new(engine: E, sink: S, config: SessionConfig) -> Self {
        Self {
            engine,
            sink,
            playlist: Playlist::new(),
            store: None,
            current_index: None,
            state: PlaybackState::Stopped,
            volume: Volume::new(config.volume),
            smoother: SpectrumSmoother::new(config.smoother),
            generation: 0,
            track_loaded: false,
            is_seeking: false,
            position_ms: 0,
            total_duration_ms: 0,
            pending_events: Vec::new(),
        }
    }

    /// Attach a playlist store and load whatever it holds
    ///
    /// Missing or unreadable files read as an empty playlist; entries whose
    /// audio files have vanished are skipped.
    pub fn attach_store(&mut self, store: PlaylistStore) {
        self.playlist = store.load();
        self.store = Some(store);
        info!(tracks = self.playlist.len(), "playlist loaded");
        self.emit_playlist_changed();
    }

    // ===== Transport =====

    /// Load and start playing the track at `index`
    ///
    /// An out-of-range index wraps to 0, matching the wrap semantics of
    /// `next`/`previous`. Playback begins once the engine reports ready.
    pub fn load_track(&mut self, index: usize) -> Result<()> {
        let index = self
            .playlist
            .clamp_index(index)
            .ok_or(PlaybackError::PlaylistEmpty)?;
        // Clone keeps the borrow checker happy while we mutate below
        let track = self
            .playlist
            .track(index)
            .ok_or(PlaybackError::IndexOutOfBounds(index))?
            .clone();

        // Release whatever was playing and invalidate its callbacks
        self.engine.stop();
        self.generation += 1;
        self.track_loaded = false;
        self.current_index = Some(index);
        self.position_ms = 0;
        self.total_duration_ms = 0;

        // Mandatory: one track's energy profile never bleeds into the next
        self.smoother.reset();

        debug!(index, generation = self.generation, track = %track.label(), "loading track");
        self.pending_events.push(SessionEvent::TrackChanged {
            index,
            label: track.label(),
        });
        self.set_state(PlaybackState::Stopped);
        self.render_transport_frame();

        self.engine.open(&track)?;
        Ok(())
    }

    /// Flip between playing and paused
    ///
    /// With no track loaded this behaves as `load_track` on the current
    /// (or first) playlist entry.
    pub fn toggle_play_pause(&mut self) -> Result<()> {
        if !self.track_loaded {
            return self.load_track(self.current_index.unwrap_or(0));
        }

        match self.state {
            PlaybackState::Playing => {
                self.engine.pause();
                self.set_state(PlaybackState::Paused);
            }
            PlaybackState::Paused | PlaybackState::Stopped => {
                self.engine.play();
                self.set_state(PlaybackState::Playing);
            }
        }
        self.render_transport_frame();
        Ok(())
    }

    /// Skip to the next track, wrapping past the end
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Result<()> {
        if self.playlist.is_empty() {
            return Err(PlaybackError::PlaylistEmpty);
        }
        let index = match self.current_index {
            Some(current) => self.playlist.next_index(current).unwrap_or(0),
            None => 0,
        };
        self.load_track(index)
    }

    /// Go to the previous track, wrapping past the start
    pub fn previous(&mut self) -> Result<()> {
        if self.playlist.is_empty() {
            return Err(PlaybackError::PlaylistEmpty);
        }
        let index = match self.current_index {
            Some(current) => self.playlist.previous_index(current).unwrap_or(0),
            None => 0,
        };
        self.load_track(index)
    }

    /// Stop playback and release the opened track
    pub fn stop(&mut self) {
        self.engine.stop();
        self.generation += 1;
        self.track_loaded = false;
        self.position_ms = 0;
        self.set_state(PlaybackState::Stopped);
        self.render_transport_frame();
    }

    // ===== Volume =====

    /// Set volume, clamped to `[0, 1]`; clears mute
    pub fn set_volume(&mut self, level: f32) {
        self.volume.set_level(level);
        self.engine.set_volume(self.volume.gain());
        self.emit_volume_changed();
    }

    /// Toggle mute; unmuting restores the exact pre-mute level
    pub fn toggle_mute(&mut self) {
        self.volume.toggle_mute();
        self.engine.set_volume(self.volume.gain());
        self.emit_volume_changed();
    }

    // ===== Seeking =====

    /// Begin a seek drag: engine position notifications stop driving the
    /// displayed position until the drag ends
    pub fn begin_seek_drag(&mut self) {
        self.is_seeking = true;
    }

    /// Seek while dragging
    ///
    /// The engine is asked to seek on every move so the audible position
    /// tracks the drag live.
    pub fn seek_drag(&mut self, position_ms: u64) {
        if self.track_loaded {
            self.engine.seek(Duration::from_millis(position_ms));
        }
        self.position_ms = position_ms;
    }

    /// End a seek drag with a final authoritative seek
    pub fn end_seek_drag(&mut self, position_ms: u64) {
        if self.track_loaded {
            self.engine.seek(Duration::from_millis(position_ms));
        }
        self.position_ms = position_ms;
        self.is_seeking = false;
    }

    // ===== Playlist =====

    /// Append tracks, persist, and start playing the first one added
    pub fn add_tracks(&mut self, tracks: Vec<TrackRef>) -> Result<()> {
        if tracks.is_empty() {
            return Ok(());
        }

        let first_new = self.playlist.append(tracks);
        self.persist()?;
        self.emit_playlist_changed();
        self.load_track(first_new)
    }

    /// Remove the track at `index` and persist
    ///
    /// Removing the playing track does not interrupt the engine: playback
    /// continues on the already-open media.
    pub fn remove_track(&mut self, index: usize) -> Result<()> {
        self.playlist
            .remove(index)
            .ok_or(PlaybackError::IndexOutOfBounds(index))?;

        self.current_index = match self.current_index {
            Some(_) if self.playlist.is_empty() => None,
            Some(current) if index < current => Some(current - 1),
            Some(current) => Some(current.min(self.playlist.len() - 1)),
            None => None,
        };

        self.persist()?;
        self.emit_playlist_changed();
        Ok(())
    }

    // ===== Visuals =====

    /// Switch the visualizer color ramp; takes effect on the next frame
    pub fn set_ramp(&mut self, ramp: ColorRamp) {
        self.smoother.set_ramp(ramp);
    }

    // ===== Engine events =====

    /// Handle one engine notification
    ///
    /// Events tagged with a stale track generation are discarded: they
    /// belong to a track that has been switched away from.
    pub fn handle_event(&mut self, event: EngineEvent) {
        if event.generation() != self.generation {
            debug!(
                event_generation = event.generation(),
                current_generation = self.generation,
                "discarding stale engine event"
            );
            return;
        }

        match event {
            EngineEvent::Ready {
                total_duration_ms, ..
            } => {
                self.track_loaded = true;
                self.total_duration_ms = total_duration_ms;
                self.engine.set_volume(self.volume.gain());
                self.engine.play();
                self.set_state(PlaybackState::Playing);
                self.render_transport_frame();
            }
            EngineEvent::TimeUpdate { position_ms, .. } => {
                // Suppressed while the user drags the seek control
                if !self.is_seeking {
                    self.position_ms = position_ms;
                }
            }
            EngineEvent::Spectrum { frame, .. } => {
                if !self.is_seeking {
                    self.position_ms = frame.timestamp.as_millis() as u64;
                }
                let position = Duration::from_millis(self.position_ms);
                let total = Duration::from_millis(self.total_duration_ms);
                let label = self.current_label();

                let bars = self.smoother.ingest(&frame);
                self.sink.render(bars, position, total, &label);
            }
            EngineEvent::TrackEnded { .. } => {
                debug!("track ended");
                self.track_loaded = false;
                self.set_state(PlaybackState::Stopped);
                self.render_transport_frame();
            }
            EngineEvent::LoadFailed { message, .. } => {
                // Stay on the failed track, stopped; no auto-advance
                warn!(%message, "track failed to load");
                self.track_loaded = false;
                self.set_state(PlaybackState::Stopped);
                self.pending_events.push(SessionEvent::Error { message });
                self.render_transport_frame();
            }
        }
    }

    // ===== Accessors =====

    /// Current transport state
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Index of the current track, if any
    pub fn current_index(&self) -> Option<usize> {
        self.current_index
    }

    /// The playlist
    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    /// Current volume level (0.0 - 1.0)
    pub fn volume(&self) -> f32 {
        self.volume.level()
    }

    /// Whether audio is muted
    pub fn is_muted(&self) -> bool {
        self.volume.is_muted()
    }

    /// Whether a seek drag is in progress
    pub fn is_seeking(&self) -> bool {
        self.is_seeking
    }

    /// Displayed playback position in milliseconds
    pub fn position_ms(&self) -> u64 {
        self.position_ms
    }

    /// Total duration of the loaded track in milliseconds
    pub fn total_duration_ms(&self) -> u64 {
        self.total_duration_ms
    }

    /// Current track-generation counter
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Drain all pending session events
    ///
    /// Returns all events emitted since the last drain, oldest first.
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Check if there are pending session events
    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    // ===== Internals =====

    fn set_state(&mut self, state: PlaybackState) {
        if self.state != state {
            self.state = state;
            self.pending_events
                .push(SessionEvent::StateChanged { state });
        }
    }

    /// Repaint with the held bars on a transport change, without waiting
    /// for the next spectrum frame
    fn render_transport_frame(&mut self) {
        let position = Duration::from_millis(self.position_ms);
        let total = Duration::from_millis(self.total_duration_ms);
        let label = self.current_label();
        self.sink.render(self.smoother.bars(), position, total, &label);
    }

    fn current_label(&self) -> String {
        self.current_index
            .and_then(|index| self.playlist.track(index))
            .map_or_else(String::new, TrackRef::label)
    }

    fn persist(&mut self) -> Result<()> {
        if let Some(store) = &self.store {
            store.save(&self.playlist)?;
        }
        Ok(())
    }

    fn emit_playlist_changed(&mut self) {
        self.pending_events.push(SessionEvent::PlaylistChanged {
            length: self.playlist.len(),
        });
    }

    fn emit_volume_changed(&mut self) {
        self.pending_events.push(SessionEvent::VolumeChanged {
            level: self.volume.gain(),
            muted: self.volume.is_muted(),
        });
    }
}
