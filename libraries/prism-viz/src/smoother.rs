//! Spectrum smoother - the visual core
//!
//! Turns one spectrum frame into one render vector of bar heights and
//! colors, visually stable frame-to-frame. Three ideas combine:
//!
//! 1. **Symmetric remap**: bars are laid out as a butterfly — bars near the
//!    center of the strip read low source bands, bars near the edges read
//!    high ones. A deliberate aesthetic, not a literal spectrum ordering.
//! 2. **One-pole smoothing**: each bar chases its raw target height with an
//!    exponential low-pass, ticked once per received frame (frame-rate
//!    dependent by design, not wall-clock corrected).
//! 3. **Energy-driven color**: a single loudness scalar for the whole frame
//!    picks the base color off a two-stop ramp; each bar then brightens
//!    with its own height.

use crate::color::ColorRamp;
use crate::frame::SpectrumFrame;
use prism_core::VisualBar;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Base opacity every bar gets regardless of height
const BRIGHTNESS_BASE: f32 = 0.4;

/// Height at which a bar gains full extra brightness (0.4 + 180/180 > 1)
const BRIGHTNESS_HEIGHT_SCALE: f32 = 180.0;

/// Smoother configuration, fixed at construction
///
/// Defaults reproduce the reference visualizer: 68 bars over 68 source
/// bands, -60 dB floor, alpha 0.18, gain 3.2, minimum bar height 6.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SmootherConfig {
    /// Number of rendered bars (N)
    pub bars: usize,

    /// Number of source magnitude bands the engine is configured for (M)
    pub source_bands: usize,

    /// Magnitude floor in dB; the engine floors every band at this value
    pub threshold_db: f32,

    /// Exponential-decay coefficient in `[0, 1]`; higher chases faster
    pub smoothing_alpha: f32,

    /// Multiplier from dB-above-threshold to render units
    pub height_gain: f32,

    /// Minimum rendered bar height; also the reset height
    pub height_floor: f32,

    /// Energy-to-color ramp
    pub ramp: ColorRamp,
}

impl Default for SmootherConfig {
    fn default() -> Self {
        Self {
            bars: 68,
            source_bands: 68,
            threshold_db: -60.0,
            smoothing_alpha: 0.18,
            height_gain: 3.2,
            height_floor: 6.0,
            ramp: ColorRamp::default(),
        }
    }
}

impl SmootherConfig {
    /// Clamp every field into its valid range
    ///
    /// Non-finite or out-of-range values fall back to the defaults, so a
    /// smoother built from any config upholds its height invariants.
    fn sanitized(mut self) -> Self {
        let defaults = Self::default();

        self.bars = self.bars.max(1);
        self.source_bands = self.source_bands.max(1);

        if !self.threshold_db.is_finite() || self.threshold_db == 0.0 {
            self.threshold_db = defaults.threshold_db;
        }
        if !self.smoothing_alpha.is_finite() {
            self.smoothing_alpha = defaults.smoothing_alpha;
        }
        self.smoothing_alpha = self.smoothing_alpha.clamp(0.0, 1.0);

        if !self.height_gain.is_finite() {
            self.height_gain = defaults.height_gain;
        }
        if !self.height_floor.is_finite() || self.height_floor < 0.0 {
            self.height_floor = defaults.height_floor;
        }

        self
    }
}

/// Stateful per-bar spectrum smoother
///
/// Owns the smoothed heights exclusively; they persist across frames and
/// are only ever reset on an explicit [`reset`](Self::reset) (mandatory on
/// every track change — carrying heights across tracks is a defect).
///
/// When no frames arrive (paused/stopped) the bars hold their last value;
/// whether to freeze or fade the display is the caller's call.
#[derive(Debug, Clone)]
pub struct SpectrumSmoother {
    config: SmootherConfig,

    /// Smoothed height per bar; invariant: finite, `>= height_floor`
    smoothed: Vec<f32>,

    /// Last produced render vector
    bars: Vec<VisualBar>,

    /// Precomputed source index per bar (symmetric center-distance remap)
    remap: Vec<usize>,
}

impl SpectrumSmoother {
    /// Create a smoother with all bars at the height floor
    pub fn new(config: SmootherConfig) -> Self {
        let config = config.sanitized();
        let remap = Self::build_remap(config.bars, config.source_bands);

        let mut smoother = Self {
            smoothed: vec![config.height_floor; config.bars],
            bars: Vec::new(),
            remap,
            config,
        };
        smoother.rebuild_idle_bars();
        smoother
    }

    /// The active configuration
    pub fn config(&self) -> &SmootherConfig {
        &self.config
    }

    /// Switch the energy-to-color ramp; takes effect on the next frame
    pub fn set_ramp(&mut self, ramp: ColorRamp) {
        self.config.ramp = ramp;
    }

    /// The last produced render vector
    ///
    /// Lets the host repaint on transport-state changes without waiting for
    /// the next spectrum frame.
    pub fn bars(&self) -> &[VisualBar] {
        &self.bars
    }

    /// Reset all bars to the height floor
    ///
    /// Must be called on every track change so one track's energy profile
    /// never bleeds into the next.
    pub fn reset(&mut self) {
        self.smoothed.fill(self.config.height_floor);
        self.rebuild_idle_bars();
    }

    /// Ingest one spectrum frame and return the updated render vector
    ///
    /// Never fails: non-finite magnitudes read as the threshold, frames of
    /// unexpected length are index-clamped, and an empty frame returns the
    /// held bars unchanged.
    pub fn ingest(&mut self, frame: &SpectrumFrame) -> &[VisualBar] {
        let mags = &frame.magnitudes_db;
        if mags.is_empty() {
            return &self.bars;
        }
        if mags.len() != self.config.source_bands {
            debug!(
                expected = self.config.source_bands,
                received = mags.len(),
                "spectrum frame band count mismatch"
            );
        }

        let threshold_abs = self.config.threshold_db.abs();
        let floor = self.config.height_floor;
        let alpha = self.config.smoothing_alpha;

        let base = self.config.ramp.sample(Self::energy_norm(mags, threshold_abs));

        for (i, bar) in self.bars.iter_mut().enumerate() {
            let src = self.remap[i].min(mags.len() - 1);
            let magnitude = Self::floored(mags[src], threshold_abs);

            let raw_target = (magnitude + threshold_abs) * self.config.height_gain;
            self.smoothed[i] += (raw_target - self.smoothed[i]) * alpha;
            if !self.smoothed[i].is_finite() || self.smoothed[i] < floor {
                self.smoothed[i] = floor;
            }

            let height = self.smoothed[i];
            let brightness =
                (BRIGHTNESS_BASE + height / BRIGHTNESS_HEIGHT_SCALE).clamp(0.0, 1.0);

            *bar = VisualBar {
                height,
                color: base.with_alpha(brightness),
            };
        }

        &self.bars
    }

    /// Single-frame loudness estimate in `[0, 1]`
    ///
    /// Sum of dB-above-threshold over all bands, normalized by the maximum
    /// possible sum. Independent of per-band detail.
    fn energy_norm(mags: &[f32], threshold_abs: f32) -> f32 {
        let sum: f32 = mags
            .iter()
            .map(|&m| Self::floored(m, threshold_abs) + threshold_abs)
            .sum();

        (sum / (mags.len() as f32 * threshold_abs)).clamp(0.0, 1.0)
    }

    /// Read a magnitude defensively: non-finite values become the threshold
    fn floored(magnitude: f32, threshold_abs: f32) -> f32 {
        if magnitude.is_finite() {
            magnitude.max(-threshold_abs)
        } else {
            -threshold_abs
        }
    }

    /// Rebuild the render vector for the idle (all-at-floor) state
    fn rebuild_idle_bars(&mut self) {
        let floor = self.config.height_floor;
        let brightness = (BRIGHTNESS_BASE + floor / BRIGHTNESS_HEIGHT_SCALE).clamp(0.0, 1.0);
        let color = self.config.ramp.sample(0.0).with_alpha(brightness);

        self.bars.clear();
        self.bars.resize(
            self.config.bars,
            VisualBar {
                height: floor,
                color,
            },
        );
    }

    /// Symmetric center-distance remap
    ///
    /// `center = (N-1)/2`; `dist = |i - center| / center` normalized to
    /// `[0, 1]`; `src = min(floor(dist * (N/2)), M-1)` with integer `N/2`.
    /// Bars near the center read low source bands, bars near the edges read
    /// high ones — mirror-symmetric around the center.
    fn build_remap(bars: usize, source_bands: usize) -> Vec<usize> {
        let center = (bars as f32 - 1.0) / 2.0;
        let half = (bars / 2) as f32;

        (0..bars)
            .map(|i| {
                let dist = if bars == 1 {
                    0.0
                } else {
                    (i as f32 - center).abs() / center
                };
                ((dist * half) as usize).min(source_bands - 1)
            })
            .collect()
    }
}

impl Default for SpectrumSmoother {
    fn default() -> Self {
        Self::new(SmootherConfig::default())
    }
}
