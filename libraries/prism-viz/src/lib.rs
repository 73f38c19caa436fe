//! Prism Player - Spectrum Visualizer Core
//!
//! Converts per-frame frequency-magnitude vectors into a stable sequence of
//! bar heights and colors.
//!
//! This crate provides:
//! - Per-bar exponential smoothing (one tick per received frame)
//! - Symmetric center-distance band remapping (the butterfly layout)
//! - Frame-energy driven base color from a selectable two-stop ramp
//! - Per-bar brightness derived from each bar's own height
//!
//! The smoother is a pure state machine: no I/O, no clocks, no allocation
//! after construction. The host feeds it [`SpectrumFrame`]s and renders
//! whatever [`VisualBar`](prism_core::VisualBar) slice comes back.
//!
//! # Example
//!
//! ```rust
//! use prism_viz::{SmootherConfig, SpectrumFrame, SpectrumSmoother};
//! use std::time::Duration;
//!
//! let mut smoother = SpectrumSmoother::new(SmootherConfig::default());
//!
//! let frame = SpectrumFrame::new(
//!     vec![-30.0; 68],
//!     Duration::from_millis(45),
//!     Duration::from_secs(180),
//! );
//!
//! let bars = smoother.ingest(&frame);
//! assert_eq!(bars.len(), 68);
//! assert!(bars.iter().all(|b| b.height >= 6.0));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod color;
mod frame;
mod smoother;

// Public exports
pub use color::{ColorRamp, Palette};
pub use frame::SpectrumFrame;
pub use smoother::{SmootherConfig, SpectrumSmoother};
