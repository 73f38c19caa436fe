//! Integration tests for the playback session
//!
//! These drive the session the way a host UI would: transport commands in,
//! engine events back, and assertions on the commands the engine receives
//! and the frames the render sink is asked to paint.

use prism_core::{AudioEngine, PlaybackState, RenderSink, TrackRef, VisualBar};
use prism_playback::{EngineEvent, PlaybackSession, PlaylistStore, SessionConfig, SessionEvent};
use prism_viz::SpectrumFrame;
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::TempDir;

// ===== Test Helpers =====

/// Command the session issued to the engine
#[derive(Debug, Clone, PartialEq)]
enum Command {
    Open(PathBuf),
    Play,
    Pause,
    Stop,
    Seek(u64),
    SetVolume(f32),
}

/// Shared command log, cloneable into the mock engine
#[derive(Clone, Default)]
struct CommandLog(Arc<Mutex<Vec<Command>>>);

impl CommandLog {
    fn push(&self, command: Command) {
        self.0.lock().unwrap().push(command);
    }

    fn take(&self) -> Vec<Command> {
        std::mem::take(&mut *self.0.lock().unwrap())
    }

    fn contains(&self, command: &Command) -> bool {
        self.0.lock().unwrap().contains(command)
    }
}

/// Mock audio engine that records every command
struct MockEngine {
    commands: CommandLog,
}

impl AudioEngine for MockEngine {
    fn open(&mut self, track: &TrackRef) -> prism_core::Result<()> {
        self.commands.push(Command::Open(track.path.clone()));
        Ok(())
    }

    fn play(&mut self) {
        self.commands.push(Command::Play);
    }

    fn pause(&mut self) {
        self.commands.push(Command::Pause);
    }

    fn stop(&mut self) {
        self.commands.push(Command::Stop);
    }

    fn seek(&mut self, position: Duration) {
        self.commands.push(Command::Seek(position.as_millis() as u64));
    }

    fn set_volume(&mut self, volume: f32) {
        self.commands.push(Command::SetVolume(volume));
    }
}

/// One captured render call
#[derive(Debug, Clone)]
struct Rendered {
    bars: Vec<VisualBar>,
    position_ms: u64,
    total_ms: u64,
    label: String,
}

/// Mock render sink that captures every frame
#[derive(Clone, Default)]
struct MockSink(Arc<Mutex<Vec<Rendered>>>);

impl MockSink {
    fn take(&self) -> Vec<Rendered> {
        std::mem::take(&mut *self.0.lock().unwrap())
    }
}

impl RenderSink for MockSink {
    fn render(
        &mut self,
        bars: &[VisualBar],
        position: Duration,
        total_duration: Duration,
        track_label: &str,
    ) {
        self.0.lock().unwrap().push(Rendered {
            bars: bars.to_vec(),
            position_ms: position.as_millis() as u64,
            total_ms: total_duration.as_millis() as u64,
            label: track_label.to_string(),
        });
    }
}

fn track(name: &str) -> TrackRef {
    TrackRef::new(PathBuf::from(format!("/music/{name}")))
}

/// Session preloaded with `names`, playing the first one (ready handled)
fn playing_session(
    names: &[&str],
) -> (
    PlaybackSession<MockEngine, MockSink>,
    CommandLog,
    MockSink,
) {
    let commands = CommandLog::default();
    let sink = MockSink::default();
    let engine = MockEngine {
        commands: commands.clone(),
    };

    let mut session = PlaybackSession::new(engine, sink.clone(), SessionConfig::default());
    session
        .add_tracks(names.iter().map(|n| track(n)).collect())
        .unwrap();
    let generation = session.generation();
    session.handle_event(EngineEvent::Ready {
        generation,
        total_duration_ms: 180_000,
    });

    commands.take();
    sink.take();
    session.drain_events();
    (session, commands, sink)
}

fn spectrum(generation: u64, level: f32, at_ms: u64) -> EngineEvent {
    EngineEvent::Spectrum {
        generation,
        frame: SpectrumFrame::new(
            vec![level; 68],
            Duration::from_millis(at_ms),
            Duration::from_secs(180),
        ),
    }
}

// ===== Transport =====

#[test]
fn add_tracks_opens_first_new_track() {
    let (mut session, commands, _sink) = playing_session(&["a.mp3", "b.mp3"]);

    session
        .add_tracks(vec![track("c.mp3"), track("d.mp3")])
        .unwrap();

    assert_eq!(session.current_index(), Some(2));
    assert!(commands.contains(&Command::Open(PathBuf::from("/music/c.mp3"))));
}

#[test]
fn next_wraps_from_last_to_first() {
    let (mut session, commands, _sink) = playing_session(&["a.mp3", "b.mp3", "c.mp3"]);
    session.load_track(2).unwrap();
    commands.take();

    session.next().unwrap();

    assert_eq!(session.current_index(), Some(0));
    assert!(commands.contains(&Command::Open(PathBuf::from("/music/a.mp3"))));
}

#[test]
fn previous_wraps_from_first_to_last() {
    let (mut session, commands, _sink) = playing_session(&["a.mp3", "b.mp3", "c.mp3"]);
    session.load_track(0).unwrap();
    commands.take();

    session.previous().unwrap();

    assert_eq!(session.current_index(), Some(2));
    assert!(commands.contains(&Command::Open(PathBuf::from("/music/c.mp3"))));
}

#[test]
fn out_of_range_load_wraps_to_zero() {
    let (mut session, commands, _sink) = playing_session(&["a.mp3", "b.mp3"]);

    session.load_track(17).unwrap();

    assert_eq!(session.current_index(), Some(0));
    assert!(commands.contains(&Command::Open(PathBuf::from("/music/a.mp3"))));
}

#[test]
fn empty_playlist_transport_is_rejected() {
    let commands = CommandLog::default();
    let engine = MockEngine {
        commands: commands.clone(),
    };
    let mut session =
        PlaybackSession::new(engine, MockSink::default(), SessionConfig::default());

    assert!(session.next().is_err());
    assert!(session.previous().is_err());
    assert!(session.load_track(0).is_err());
    assert!(commands.take().is_empty());
}

#[test]
fn ready_starts_playback_at_current_volume() {
    let commands = CommandLog::default();
    let sink = MockSink::default();
    let engine = MockEngine {
        commands: commands.clone(),
    };
    let mut session = PlaybackSession::new(engine, sink, SessionConfig::default());
    session.set_volume(0.5);
    session.add_tracks(vec![track("a.mp3")]).unwrap();
    commands.take();

    assert_eq!(session.state(), PlaybackState::Stopped);
    let generation = session.generation();
    session.handle_event(EngineEvent::Ready {
        generation,
        total_duration_ms: 200_000,
    });

    assert_eq!(session.state(), PlaybackState::Playing);
    assert_eq!(session.total_duration_ms(), 200_000);
    let issued = commands.take();
    assert!(issued.contains(&Command::SetVolume(0.5)));
    assert!(issued.contains(&Command::Play));
}

#[test]
fn toggle_flips_between_playing_and_paused() {
    let (mut session, commands, _sink) = playing_session(&["a.mp3"]);

    session.toggle_play_pause().unwrap();
    assert_eq!(session.state(), PlaybackState::Paused);
    assert!(commands.take().contains(&Command::Pause));

    session.toggle_play_pause().unwrap();
    assert_eq!(session.state(), PlaybackState::Playing);
    assert!(commands.take().contains(&Command::Play));
}

#[test]
fn toggle_with_no_track_loads_first() {
    let commands = CommandLog::default();
    let engine = MockEngine {
        commands: commands.clone(),
    };
    let mut session =
        PlaybackSession::new(engine, MockSink::default(), SessionConfig::default());
    session.add_tracks(vec![track("a.mp3"), track("b.mp3")]).unwrap();
    // Track never became ready; the toggle retries the load
    commands.take();

    session.toggle_play_pause().unwrap();

    assert_eq!(session.current_index(), Some(0));
    assert!(commands.contains(&Command::Open(PathBuf::from("/music/a.mp3"))));
}

#[test]
fn track_end_stops_without_advancing() {
    let (mut session, _commands, _sink) = playing_session(&["a.mp3", "b.mp3"]);

    let generation = session.generation();
    session.handle_event(EngineEvent::TrackEnded { generation });

    assert_eq!(session.state(), PlaybackState::Stopped);
    assert_eq!(session.current_index(), Some(0));
}

// ===== Volume =====

#[test]
fn mute_round_trip_restores_exact_volume() {
    let (mut session, commands, _sink) = playing_session(&["a.mp3"]);
    session.set_volume(0.37);
    commands.take();

    session.toggle_mute();
    assert!(session.is_muted());
    assert!(commands.take().contains(&Command::SetVolume(0.0)));

    session.toggle_mute();
    assert!(!session.is_muted());
    assert_eq!(session.volume(), 0.37);
    assert!(commands.take().contains(&Command::SetVolume(0.37)));
}

#[test]
fn set_volume_clamps_and_clears_mute() {
    let (mut session, commands, _sink) = playing_session(&["a.mp3"]);
    session.toggle_mute();
    commands.take();

    session.set_volume(1.7);

    assert!(!session.is_muted());
    assert_eq!(session.volume(), 1.0);
    assert!(commands.take().contains(&Command::SetVolume(1.0)));
}

// ===== Seeking =====

#[test]
fn drag_seeks_live_and_suppresses_time_updates() {
    let (mut session, commands, _sink) = playing_session(&["a.mp3"]);
    let generation = session.generation();

    session.begin_seek_drag();
    session.seek_drag(30_000);
    session.seek_drag(45_000);

    let issued = commands.take();
    assert!(issued.contains(&Command::Seek(30_000)));
    assert!(issued.contains(&Command::Seek(45_000)));

    // Engine position reports must not overwrite the dragged value
    session.handle_event(EngineEvent::TimeUpdate {
        generation,
        position_ms: 12_000,
    });
    assert_eq!(session.position_ms(), 45_000);

    session.end_seek_drag(60_000);
    assert!(commands.take().contains(&Command::Seek(60_000)));
    assert_eq!(session.position_ms(), 60_000);

    // Drag over: position reports drive the display again
    session.handle_event(EngineEvent::TimeUpdate {
        generation,
        position_ms: 61_000,
    });
    assert_eq!(session.position_ms(), 61_000);
}

// ===== Generation guarding =====

#[test]
fn stale_ready_is_discarded_after_track_switch() {
    let (mut session, commands, _sink) = playing_session(&["a.mp3", "b.mp3"]);
    session.load_track(0).unwrap();
    let stale = session.generation();

    // User switches before the first track finishes loading
    session.load_track(1).unwrap();
    commands.take();

    session.handle_event(EngineEvent::Ready {
        generation: stale,
        total_duration_ms: 99_000,
    });

    // The stale ready must not start playback
    assert_eq!(session.state(), PlaybackState::Stopped);
    assert!(!commands.contains(&Command::Play));

    let current = session.generation();
    session.handle_event(EngineEvent::Ready {
        generation: current,
        total_duration_ms: 150_000,
    });
    assert_eq!(session.state(), PlaybackState::Playing);
    assert_eq!(session.total_duration_ms(), 150_000);
}

#[test]
fn stale_spectrum_frames_do_not_render() {
    let (mut session, _commands, sink) = playing_session(&["a.mp3"]);
    let stale = session.generation().wrapping_sub(1);

    session.handle_event(spectrum(stale, -20.0, 1000));

    assert!(sink.take().is_empty());
}

// ===== Rendering =====

#[test]
fn spectrum_frames_render_through_the_smoother() {
    let (mut session, _commands, sink) = playing_session(&["a.mp3"]);
    let generation = session.generation();

    session.handle_event(spectrum(generation, -20.0, 4500));

    let frames = sink.take();
    assert_eq!(frames.len(), 1);
    let rendered = &frames[0];
    assert_eq!(rendered.bars.len(), 68);
    assert_eq!(rendered.position_ms, 4500);
    assert_eq!(rendered.total_ms, 180_000);
    assert_eq!(rendered.label, "a.mp3");
    assert!(rendered.bars.iter().all(|b| b.height >= 6.0));
}

#[test]
fn transport_changes_repaint_without_a_frame() {
    let (mut session, _commands, sink) = playing_session(&["a.mp3"]);

    // Pause: the sink must be repainted with the held frame data
    session.toggle_play_pause().unwrap();
    let frames = sink.take();
    assert!(!frames.is_empty());
    assert_eq!(frames[0].bars.len(), 68);
    assert_eq!(frames[0].label, "a.mp3");

    // Resume repaints too
    session.toggle_play_pause().unwrap();
    assert!(!sink.take().is_empty());
}

#[test]
fn track_switch_resets_bar_heights() {
    let (mut session, _commands, sink) = playing_session(&["a.mp3", "b.mp3"]);
    let generation = session.generation();

    // Drive the bars well above the floor
    for i in 0..50 {
        session.handle_event(spectrum(generation, 0.0, i * 45));
    }
    let frames = sink.take();
    assert!(frames.last().unwrap().bars[0].height > 100.0);

    session.next().unwrap();
    let generation = session.generation();
    session.handle_event(EngineEvent::Ready {
        generation,
        total_duration_ms: 120_000,
    });
    sink.take();

    // First silent frame of the new track sits exactly at the floor
    session.handle_event(spectrum(generation, -60.0, 45));
    let frames = sink.take();
    assert!(frames
        .last()
        .unwrap()
        .bars
        .iter()
        .all(|b| b.height == 6.0));
}

// ===== Failure handling =====

#[test]
fn load_failure_stops_without_advancing() {
    let (mut session, commands, _sink) = playing_session(&["a.mp3", "b.mp3"]);
    session.load_track(1).unwrap();
    session.drain_events();
    commands.take();

    let generation = session.generation();
    session.handle_event(EngineEvent::LoadFailed {
        generation,
        message: "unsupported format".to_string(),
    });

    assert_eq!(session.state(), PlaybackState::Stopped);
    assert_eq!(session.current_index(), Some(1));
    assert!(!commands.contains(&Command::Play));

    let events = session.drain_events();
    assert!(events
        .iter()
        .any(|e| matches!(e, SessionEvent::Error { message } if message == "unsupported format")));
}

// ===== Playlist mutation =====

#[test]
fn removing_before_current_shifts_index() {
    let (mut session, _commands, _sink) = playing_session(&["a.mp3", "b.mp3", "c.mp3"]);
    session.load_track(2).unwrap();

    session.remove_track(0).unwrap();

    assert_eq!(session.current_index(), Some(1));
    assert_eq!(session.playlist().len(), 2);
}

#[test]
fn removing_current_track_does_not_stop_playback() {
    let (mut session, commands, _sink) = playing_session(&["a.mp3", "b.mp3"]);
    commands.take();

    session.remove_track(0).unwrap();

    // The engine keeps playing the already-open media
    assert!(!commands.contains(&Command::Stop));
    assert_eq!(session.state(), PlaybackState::Playing);
    assert_eq!(session.playlist().len(), 1);
}

#[test]
fn attached_store_loads_and_persists_mutations() {
    let dir = TempDir::new().unwrap();
    let existing = dir.path().join("old.mp3");
    fs::write(&existing, b"not really audio").unwrap();

    let store_path = dir.path().join("playlist.txt");
    fs::write(&store_path, format!("{}\n", existing.display())).unwrap();

    let commands = CommandLog::default();
    let engine = MockEngine {
        commands: commands.clone(),
    };
    let mut session =
        PlaybackSession::new(engine, MockSink::default(), SessionConfig::default());
    session.attach_store(PlaylistStore::new(&store_path));
    assert_eq!(session.playlist().len(), 1);

    // Adding rewrites the file with the new entry appended
    session.add_tracks(vec![track("added.mp3")]).unwrap();
    let contents = fs::read_to_string(&store_path).unwrap();
    assert_eq!(contents.lines().count(), 2);
    assert!(contents.contains("added.mp3"));

    // Removing rewrites it again, dropping the old entry
    session.remove_track(0).unwrap();
    let contents = fs::read_to_string(&store_path).unwrap();
    assert_eq!(contents.lines().count(), 1);
    assert!(!contents.contains("old.mp3"));
    assert!(contents.contains("added.mp3"));
}

#[test]
fn removing_last_track_clears_index() {
    let (mut session, _commands, _sink) = playing_session(&["a.mp3"]);

    session.remove_track(0).unwrap();

    assert_eq!(session.current_index(), None);
    assert!(session.playlist().is_empty());
}

// ===== Session events =====

#[test]
fn load_emits_track_changed_then_state_events() {
    let (mut session, _commands, _sink) = playing_session(&["a.mp3", "b.mp3"]);

    session.next().unwrap();
    let generation = session.generation();
    session.handle_event(EngineEvent::Ready {
        generation,
        total_duration_ms: 1000,
    });

    let events = session.drain_events();
    assert!(events
        .iter()
        .any(|e| matches!(e, SessionEvent::TrackChanged { index: 1, label } if label == "b.mp3")));
    assert!(events.iter().any(|e| matches!(
        e,
        SessionEvent::StateChanged {
            state: PlaybackState::Playing
        }
    )));
    assert!(!session.has_pending_events());
}
