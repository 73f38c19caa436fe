//! Volume control with mute memory
//!
//! Linear volume in `[0, 1]`, matching the engine contract. Muting saves
//! the current level and forwards zero; unmuting restores the exact saved
//! level, so a mute/unmute round-trip is lossless.

/// Volume controller
#[derive(Debug, Clone)]
pub struct Volume {
    /// Volume level (0.0 - 1.0)
    level: f32,

    /// Mute state
    muted: bool,

    /// Level to restore on unmute
    saved_level: f32,
}

impl Volume {
    /// Create new volume controller
    ///
    /// # Arguments
    /// * `level` - Initial volume (clamped to `[0, 1]`)
    pub fn new(level: f32) -> Self {
        let level = Self::clamp_level(level);
        Self {
            level,
            muted: false,
            saved_level: level,
        }
    }

    /// Set volume level, clamped to `[0, 1]`
    ///
    /// An explicit level change always clears mute: the user reaching for
    /// the slider means they want to hear something.
    pub fn set_level(&mut self, level: f32) {
        self.level = Self::clamp_level(level);
        self.saved_level = self.level;
        self.muted = false;
    }

    /// Get current volume level (0.0 - 1.0)
    pub fn level(&self) -> f32 {
        self.level
    }

    /// Toggle mute state
    ///
    /// On mute, the current level is saved; on unmute, it is restored.
    pub fn toggle_mute(&mut self) {
        if self.muted {
            self.muted = false;
            self.level = self.saved_level;
        } else {
            self.saved_level = self.level;
            self.muted = true;
            self.level = 0.0;
        }
    }

    /// Check if muted
    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Effective gain to forward to the engine (0 while muted)
    pub fn gain(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.level
        }
    }

    fn clamp_level(level: f32) -> f32 {
        if level.is_finite() {
            level.clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self::new(1.0)
    }
}
