//! Playlist and its on-disk persistence
//!
//! The playlist is an ordered list of file paths. Duplicates are allowed
//! and identity is positional. Persistence is a newline-delimited plain
//! text file, one absolute path per line, no escaping, no header, fully
//! overwritten on every mutation.

use crate::error::Result;
use prism_core::TrackRef;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Ordered track list with wrap-aware navigation
#[derive(Debug, Clone, Default)]
pub struct Playlist {
    tracks: Vec<TrackRef>,
}

impl Playlist {
    /// Create an empty playlist
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a playlist from existing tracks
    pub fn from_tracks(tracks: Vec<TrackRef>) -> Self {
        Self { tracks }
    }

    /// Number of tracks
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Whether the playlist holds no tracks
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// All tracks, in order
    pub fn tracks(&self) -> &[TrackRef] {
        &self.tracks
    }

    /// Track at `index`, if in range
    pub fn track(&self, index: usize) -> Option<&TrackRef> {
        self.tracks.get(index)
    }

    /// Append tracks, returning the index of the first one added
    pub fn append(&mut self, tracks: impl IntoIterator<Item = TrackRef>) -> usize {
        let first_new = self.tracks.len();
        self.tracks.extend(tracks);
        first_new
    }

    /// Remove the track at `index`, returning it if the index was in range
    pub fn remove(&mut self, index: usize) -> Option<TrackRef> {
        if index < self.tracks.len() {
            Some(self.tracks.remove(index))
        } else {
            None
        }
    }

    /// Wrap any index into range; out-of-range indices land on 0
    ///
    /// Matches the load semantics of the transport: asking for a track
    /// beyond the end starts over rather than erroring.
    pub fn clamp_index(&self, index: usize) -> Option<usize> {
        if self.tracks.is_empty() {
            None
        } else if index < self.tracks.len() {
            Some(index)
        } else {
            Some(0)
        }
    }

    /// Index after `current`, wrapping past the end
    pub fn next_index(&self, current: usize) -> Option<usize> {
        if self.tracks.is_empty() {
            None
        } else {
            Some((current + 1) % self.tracks.len())
        }
    }

    /// Index before `current`, wrapping past the start
    pub fn previous_index(&self, current: usize) -> Option<usize> {
        if self.tracks.is_empty() {
            None
        } else {
            Some((current + self.tracks.len() - 1) % self.tracks.len())
        }
    }
}

/// Newline-delimited plain-text playlist persistence
///
/// A missing or unreadable file reads as an empty playlist; lines naming
/// files that no longer exist are skipped silently (logged at warn).
#[derive(Debug, Clone)]
pub struct PlaylistStore {
    path: PathBuf,
}

impl PlaylistStore {
    /// Create a store backed by the given file path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the playlist from disk
    ///
    /// Never fails: a missing or unreadable file yields an empty playlist,
    /// and entries whose files have vanished are filtered out.
    pub fn load(&self) -> Playlist {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) => {
                debug!(path = %self.path.display(), %err, "no playlist file, starting empty");
                return Playlist::new();
            }
        };

        let tracks = contents
            .lines()
            .filter(|line| !line.trim().is_empty())
            .filter_map(|line| {
                let track = TrackRef::new(PathBuf::from(line));
                if track.exists() {
                    Some(track)
                } else {
                    warn!(path = line, "skipping missing playlist entry");
                    None
                }
            })
            .collect();

        Playlist::from_tracks(tracks)
    }

    /// Write the playlist to disk, fully overwriting the file
    pub fn save(&self, playlist: &Playlist) -> Result<()> {
        let mut file = fs::File::create(&self.path)?;
        for track in playlist.tracks() {
            writeln!(file, "{}", track.path.display())?;
        }
        debug!(path = %self.path.display(), tracks = playlist.len(), "playlist saved");
        Ok(())
    }
}
