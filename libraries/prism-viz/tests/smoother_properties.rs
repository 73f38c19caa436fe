//! Property tests for the spectrum smoother
//!
//! These verify the invariants that must hold under any input the engine
//! could conceivably deliver, well-formed or not.

use prism_viz::{SmootherConfig, SpectrumFrame, SpectrumSmoother};
use proptest::prelude::*;
use std::time::Duration;

/// Arbitrary magnitude: anything a buggy engine could emit, NaN included
fn any_magnitude() -> impl Strategy<Value = f32> {
    prop_oneof![
        // Plausible floored-dB values, including slightly below threshold
        -70.0f32..=0.0,
        // Hostile values
        Just(f32::NAN),
        Just(f32::INFINITY),
        Just(f32::NEG_INFINITY),
        any::<f32>(),
    ]
}

fn any_frame() -> impl Strategy<Value = SpectrumFrame> {
    prop::collection::vec(any_magnitude(), 0..100).prop_map(|mags| {
        SpectrumFrame::new(mags, Duration::from_millis(45), Duration::from_secs(200))
    })
}

proptest! {
    /// Heights stay finite and at or above the floor under any frame
    /// sequence, and the render vector keeps its configured length.
    #[test]
    fn heights_stay_finite_and_floored(frames in prop::collection::vec(any_frame(), 1..40)) {
        let config = SmootherConfig::default();
        let mut smoother = SpectrumSmoother::new(config);

        for frame in &frames {
            let bars = smoother.ingest(frame);
            prop_assert_eq!(bars.len(), config.bars);
            for bar in bars {
                prop_assert!(bar.height.is_finite());
                prop_assert!(bar.height >= config.height_floor);
                prop_assert!(bar.color.a.is_finite());
                prop_assert!((0.0..=1.0).contains(&bar.color.a));
            }
        }
    }

    /// Reset always restores the floor, no matter what came before.
    #[test]
    fn reset_always_restores_floor(frames in prop::collection::vec(any_frame(), 0..20)) {
        let config = SmootherConfig::default();
        let mut smoother = SpectrumSmoother::new(config);

        for frame in &frames {
            smoother.ingest(frame);
        }
        smoother.reset();

        for bar in smoother.bars() {
            prop_assert_eq!(bar.height, config.height_floor);
        }
    }

    /// Repeating one well-formed frame converges monotonically toward its
    /// target without ever overshooting.
    #[test]
    fn repeated_frame_converges_monotonically(level in -60.0f32..=0.0) {
        let config = SmootherConfig::default();
        let mut smoother = SpectrumSmoother::new(config);
        let frame = SpectrumFrame::new(
            vec![level; config.source_bands],
            Duration::from_millis(45),
            Duration::from_secs(200),
        );

        let target = ((level + 60.0) * config.height_gain).max(config.height_floor);
        let mut previous = config.height_floor;

        for _ in 0..300 {
            let height = smoother.ingest(&frame)[0].height;
            prop_assert!(height + 1e-3 >= previous);
            prop_assert!(height <= target.max(previous) + 1e-3);
            previous = height;
        }
        prop_assert!((previous - target).abs() < 1.0);
    }

    /// The butterfly layout is mirror-symmetric: even with per-band
    /// magnitudes that differ, mirrored bars render identically because
    /// they read the same source band.
    #[test]
    fn mirrored_bars_render_identically(seed in -60.0f32..=-1.0, bars in 2usize..80) {
        let config = SmootherConfig {
            bars,
            ..SmootherConfig::default()
        };
        let mut smoother = SpectrumSmoother::new(config);

        // A sloped spectrum so different source bands carry different energy
        let mags: Vec<f32> = (0..config.source_bands)
            .map(|b| (seed + b as f32).min(0.0))
            .collect();
        let frame = SpectrumFrame::new(mags, Duration::from_millis(45), Duration::from_secs(200));

        let rendered = smoother.ingest(&frame).to_vec();
        for i in 0..bars {
            prop_assert_eq!(rendered[i], rendered[bars - 1 - i]);
        }
    }
}
