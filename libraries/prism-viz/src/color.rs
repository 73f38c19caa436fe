//! Energy-to-color interpolation
//!
//! The visualizer's base color tracks overall frame loudness along a
//! two-stop linear ramp: quiet frames sit at the cold end, loud frames at
//! the warm end. Ramps come from a small fixed palette the user can switch
//! between at runtime.

use prism_core::Rgb;
use serde::{Deserialize, Serialize};

/// Two-stop linear color ramp
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorRamp {
    /// Color at zero energy
    pub low: Rgb,

    /// Color at full energy
    pub high: Rgb,
}

impl ColorRamp {
    /// Create a ramp from explicit endpoints
    pub const fn new(low: Rgb, high: Rgb) -> Self {
        Self { low, high }
    }

    /// Sample the ramp at `t` (clamped to `[0, 1]`)
    pub fn sample(&self, t: f32) -> Rgb {
        self.low.lerp(self.high, t)
    }
}

impl Default for ColorRamp {
    fn default() -> Self {
        Palette::Glacier.ramp()
    }
}

/// Fixed, user-selectable color palettes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Palette {
    /// Cold blue to warm red (the default)
    #[default]
    Glacier,

    /// Deep violet to hot pink
    Orchid,

    /// Teal to amber
    Lagoon,

    /// Monochrome slate to white
    Slate,
}

impl Palette {
    /// The ramp for this palette
    pub const fn ramp(self) -> ColorRamp {
        match self {
            // #4facfe -> #ff4e50
            Self::Glacier => ColorRamp::new(Rgb::new(0x4f, 0xac, 0xfe), Rgb::new(0xff, 0x4e, 0x50)),
            // #7f00ff -> #ff0080
            Self::Orchid => ColorRamp::new(Rgb::new(0x7f, 0x00, 0xff), Rgb::new(0xff, 0x00, 0x80)),
            // #11998e -> #f8b500
            Self::Lagoon => ColorRamp::new(Rgb::new(0x11, 0x99, 0x8e), Rgb::new(0xf8, 0xb5, 0x00)),
            // #556270 -> #ffffff
            Self::Slate => ColorRamp::new(Rgb::new(0x55, 0x62, 0x70), Rgb::new(0xff, 0xff, 0xff)),
        }
    }

    /// All selectable palettes, in display order
    pub const fn all() -> [Palette; 4] {
        [Self::Glacier, Self::Orchid, Self::Lagoon, Self::Slate]
    }
}
