//! Core domain types shared across the Prism Player crates

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{PrismError, Result};

/// Reference to an audio file in the playlist
///
/// Intentionally minimal: the playlist is a list of file paths, not a media
/// library. Duplicates are allowed; identity is positional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackRef {
    /// Absolute file path on disk
    pub path: PathBuf,
}

impl TrackRef {
    /// Create a new track reference
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Display label for the track (file name, falling back to the full path)
    pub fn label(&self) -> String {
        self.path
            .file_name()
            .map_or_else(|| self.path.display().to_string(), |n| n.to_string_lossy().into_owned())
    }

    /// Whether the referenced file currently exists on disk
    pub fn exists(&self) -> bool {
        self.path.exists()
    }
}

impl From<&Path> for TrackRef {
    fn from(path: &Path) -> Self {
        Self::new(path.to_path_buf())
    }
}

/// Transport state of the playback session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackState {
    /// No track playing (initial state, explicit stop, or end of track)
    #[default]
    Stopped,

    /// Currently playing
    Playing,

    /// Paused mid-track
    Paused,
}

/// Opaque 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    /// Red channel (0-255)
    pub r: u8,
    /// Green channel (0-255)
    pub g: u8,
    /// Blue channel (0-255)
    pub b: u8,
}

impl Rgb {
    /// Create a color from channel values
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a `#rrggbb` hex string (leading `#` optional)
    pub fn from_hex(hex: &str) -> Result<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(PrismError::invalid_input(format!("bad hex color: {hex:?}")));
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16)
                .map_err(|e| PrismError::invalid_input(format!("bad hex color {hex:?}: {e}")))
        };

        Ok(Self {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        })
    }

    /// Component-wise linear interpolation toward `other`
    ///
    /// `t` is clamped to `[0, 1]` before use: `t == 0` yields `self`,
    /// `t == 1` yields `other`.
    pub fn lerp(self, other: Self, t: f32) -> Self {
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
        let mix = |a: u8, b: u8| (f32::from(a) + (f32::from(b) - f32::from(a)) * t).round() as u8;

        Self {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
        }
    }

    /// Attach an opacity channel
    pub const fn with_alpha(self, a: f32) -> Rgba {
        Rgba {
            r: self.r,
            g: self.g,
            b: self.b,
            a,
        }
    }
}

/// RGB color with a floating-point opacity channel
///
/// Opacity stays floating point because the visualizer derives it from bar
/// heights every frame; quantizing to u8 is the render layer's call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    /// Red channel (0-255)
    pub r: u8,
    /// Green channel (0-255)
    pub g: u8,
    /// Blue channel (0-255)
    pub b: u8,
    /// Opacity (0.0-1.0)
    pub a: f32,
}

impl Rgba {
    /// The RGB part of this color
    pub const fn rgb(self) -> Rgb {
        Rgb {
            r: self.r,
            g: self.g,
            b: self.b,
        }
    }
}
