//! Normalized cross-correlation between adjacent frames.
//!
//! The previous frame is correlated against a center crop of the current
//! frame. Both are scaled to `[0, 1]` and centered on their own mean first.
//! The response map is laid out so its center is zero displacement: when
//! the scene moves by `(dy, dx)` between the frames, the peak lands at
//! `(center + dy, center + dx)`.
//!
//! ```text
//!  previous (160x160)            response (110x110)
//! ┌────────────────────┐        ┌──────────────────┐
//! │ kernel slides over │        │ 0  0  0  0  0  0 │
//! │ 51x51 positions    │  ───►  │ 0 ┌──────────┐ 0 │
//! │ fully inside frame │        │ 0 │  51x51   │ 0 │
//! └────────────────────┘        │ 0 │ computed │ 0 │
//!                               │ 0 └──────────┘ 0 │
//!                               └──────────────────┘
//! ```

use scanpath_common::config::AnalysisDefaults;
use scanpath_common::error::{ScanpathError, ScanpathResult};
use scanpath_frame_model::{Frame, Grid, ResponseMap, FRAME_SIDE};

/// Maximum sample value of 8-bit frames.
const MAX_SAMPLE: f64 = 255.0;

/// Added before truncation so float error cannot pull the maximum below 255.
const RESCALE_TOLERANCE: f64 = 1e-9;

/// Geometry of the correlation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CorrelatorConfig {
    /// Side length both frames must have.
    pub frame_side: usize,

    /// Samples cropped from every edge of the current frame to form the kernel.
    pub crop_margin: usize,
}

impl Default for CorrelatorConfig {
    fn default() -> Self {
        Self {
            frame_side: FRAME_SIDE,
            crop_margin: 25,
        }
    }
}

impl From<&AnalysisDefaults> for CorrelatorConfig {
    fn from(defaults: &AnalysisDefaults) -> Self {
        Self {
            frame_side: defaults.frame_side,
            crop_margin: defaults.crop_margin,
        }
    }
}

impl CorrelatorConfig {
    /// Side of the kernel, which is also the side of the response map.
    pub fn kernel_side(&self) -> usize {
        self.frame_side.saturating_sub(2 * self.crop_margin)
    }

    /// Number of kernel positions per axis that lie fully inside the frame.
    pub fn displacement_span(&self) -> usize {
        2 * self.crop_margin + 1
    }

    /// Response row/col of the kernel position whose top-left is `(0, 0)`.
    fn response_offset(&self) -> usize {
        self.kernel_side() / 2 - self.crop_margin
    }

    fn validate(&self) -> ScanpathResult<()> {
        if self.frame_side <= 2 * self.crop_margin {
            return Err(ScanpathError::shape(format!(
                "frame side {} leaves no kernel after cropping {} per edge",
                self.frame_side, self.crop_margin
            )));
        }
        let side = self.kernel_side();
        if side / 2 < self.crop_margin
            || side / 2 - self.crop_margin + self.displacement_span() > side
        {
            return Err(ScanpathError::shape(format!(
                "kernel side {side} cannot hold the {} displacement positions per axis",
                self.displacement_span()
            )));
        }
        Ok(())
    }
}

/// Computes displacement-response maps for frame pairs.
#[derive(Debug, Clone, Default)]
pub struct FrameCorrelator {
    config: CorrelatorConfig,
}

impl FrameCorrelator {
    /// Create a correlator, rejecting geometries that cannot produce a map.
    pub fn new(config: CorrelatorConfig) -> ScanpathResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Correlator for 160x160 frames with a 25-sample crop.
    pub fn with_defaults() -> Self {
        Self::default()
    }

    pub fn config(&self) -> &CorrelatorConfig {
        &self.config
    }

    /// Side length of the maps this correlator produces.
    pub fn response_side(&self) -> usize {
        self.config.kernel_side()
    }

    /// Correlate `previous` with the center crop of `current`.
    pub fn correlate(&self, previous: &Frame, current: &Frame) -> ScanpathResult<ResponseMap> {
        self.check_shape("previous", previous)?;
        self.check_shape("current", current)?;

        let previous = centered(previous);
        let current = centered(current);

        let margin = self.config.crop_margin;
        let side = self.config.kernel_side();
        let kernel = current
            .window(margin, margin, side, side)
            .map_err(|e| ScanpathError::shape(e.to_string()))?;

        let raw = self.cross_correlate(&previous, &kernel);
        let cells = rescale_to_u8(&raw)?;
        Ok(ResponseMap::from(cells))
    }

    fn check_shape(&self, which: &str, frame: &Frame) -> ScanpathResult<()> {
        let side = self.config.frame_side;
        if frame.shape() != (side, side) {
            return Err(ScanpathError::shape(format!(
                "{which} frame is {}x{}, expected {side}x{side}",
                frame.rows(),
                frame.cols()
            )));
        }
        Ok(())
    }

    /// Raw correlation laid out on the response grid.
    ///
    /// Positions that would need samples outside `previous` stay zero.
    fn cross_correlate(&self, previous: &Grid<f64>, kernel: &Grid<f64>) -> Grid<f64> {
        let side = kernel.rows();
        let span = self.config.displacement_span();
        let offset = self.config.response_offset();

        let mut raw = vec![0.0; side * side];
        for top in 0..span {
            for left in 0..span {
                let mut acc = 0.0;
                for u in 0..side {
                    let prev_row = &previous.row(top + u)[left..left + side];
                    acc += prev_row
                        .iter()
                        .zip(kernel.row(u))
                        .map(|(a, b)| a * b)
                        .sum::<f64>();
                }
                raw[(top + offset) * side + (left + offset)] = acc;
            }
        }

        Grid::from_fn(side, side, |r, c| raw[r * side + c])
    }
}

/// Correlate two 160x160 frames with the default geometry.
pub fn correlate(previous: &Frame, current: &Frame) -> ScanpathResult<ResponseMap> {
    FrameCorrelator::with_defaults().correlate(previous, current)
}

/// Scale samples to `[0, 1]` and subtract the frame's own mean.
///
/// The mean is taken over the integer samples so a flat frame centers to
/// exactly zero.
fn centered(frame: &Frame) -> Grid<f64> {
    let count = frame.pixels().len().max(1) as f64;
    let total: u64 = frame.pixels().iter().map(|&v| u64::from(v)).sum();
    let mean = total as f64 / count / MAX_SAMPLE;
    frame.grid().map(|v| f64::from(v) / MAX_SAMPLE - mean)
}

/// Affine map of `[min, max]` onto `[0, 255]`, truncated to `u8`.
fn rescale_to_u8(raw: &Grid<f64>) -> ScanpathResult<Grid<u8>> {
    let (min, max) = raw
        .as_slice()
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });

    if max <= min {
        return Err(ScanpathError::DegenerateCorrelation { value: max });
    }

    let slope = MAX_SAMPLE / (max - min);
    let intercept = MAX_SAMPLE - slope * max;
    Ok(raw.map(|v| (slope * v + intercept + RESCALE_TOLERANCE).clamp(0.0, MAX_SAMPLE) as u8))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use scanpath_frame_model::{PeakLocation, RESPONSE_SIDE};

    /// Deterministic textured scene (xorshift noise).
    fn noise_scene(side: usize, seed: u64) -> Frame {
        let mut state = seed.wrapping_mul(0x9E37_79B9_7F4A_7C15) | 1;
        Frame::from_fn(side, side, |_, _| {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            (state >> 56) as u8
        })
    }

    fn crop(scene: &Frame, top: usize, left: usize) -> Frame {
        Frame::from(scene.grid().window(top, left, FRAME_SIDE, FRAME_SIDE).unwrap())
    }

    #[test]
    fn test_default_geometry() {
        let config = CorrelatorConfig::default();
        assert_eq!(config.kernel_side(), RESPONSE_SIDE);
        assert_eq!(config.displacement_span(), 51);
        assert_eq!(config.response_offset(), 30);
    }

    #[test]
    fn test_self_correlation_peaks_at_center() {
        let frame = noise_scene(FRAME_SIDE, 7);
        let map = correlate(&frame, &frame).unwrap();

        assert_eq!(map.shape(), (RESPONSE_SIDE, RESPONSE_SIDE));
        assert_eq!(map.peak(), Some(PeakLocation::new(55, 55)));
        assert_eq!(map.peak(), Some(map.center()));
    }

    #[test]
    fn test_peak_tracks_scene_displacement() {
        let scene = noise_scene(220, 11);
        let previous = crop(&scene, 30, 30);
        let current = crop(&scene, 33, 28);

        let map = correlate(&previous, &current).unwrap();
        assert_eq!(map.peak(), Some(PeakLocation::new(58, 53)));
    }

    #[test]
    fn test_rescaled_output_spans_full_range() {
        let scene = noise_scene(220, 3);
        let map = correlate(&crop(&scene, 10, 10), &crop(&scene, 14, 19)).unwrap();

        assert_eq!(map.values().iter().copied().min(), Some(0));
        assert_eq!(map.values().iter().copied().max(), Some(255));
    }

    #[test]
    fn test_positions_outside_frame_share_the_zero_level() {
        let frame = noise_scene(FRAME_SIDE, 5);
        let map = correlate(&frame, &frame).unwrap();
        let border = map.value(0, 0).unwrap();

        for r in 0..RESPONSE_SIDE {
            for c in 0..RESPONSE_SIDE {
                let inside = (30..81).contains(&r) && (30..81).contains(&c);
                if !inside {
                    assert_eq!(map.value(r, c), Some(border), "cell ({r}, {c})");
                }
            }
        }
    }

    #[test]
    fn test_flat_frames_are_degenerate() {
        let flat = Frame::filled(FRAME_SIDE, FRAME_SIDE, 128);
        let err = correlate(&flat, &flat).unwrap_err();
        assert!(err.is_degenerate());
    }

    #[test]
    fn test_anticorrelated_pair_peaks_on_filler() {
        // Every computed position is negative, so the zero filler is the maximum.
        let ramp = Frame::from_fn(FRAME_SIDE, FRAME_SIDE, |_, c| c as u8);
        let inverted = Frame::from_fn(FRAME_SIDE, FRAME_SIDE, |_, c| 255 - c as u8);

        let map = correlate(&ramp, &inverted).unwrap();
        assert_eq!(map.peak(), Some(PeakLocation::new(0, 0)));
        assert_eq!(map.value(0, 0), Some(255));
        assert_eq!(map.value(55, 55), Some(0));
    }

    #[test]
    fn test_wrong_frame_size_is_shape_error() {
        let small = Frame::filled(120, FRAME_SIDE, 0);
        let full = noise_scene(FRAME_SIDE, 1);

        assert!(matches!(
            correlate(&small, &full),
            Err(ScanpathError::Shape { .. })
        ));
        assert!(matches!(
            correlate(&full, &small),
            Err(ScanpathError::Shape { .. })
        ));
    }

    #[test]
    fn test_invalid_geometry_is_rejected() {
        let too_much_crop = CorrelatorConfig {
            frame_side: 40,
            crop_margin: 20,
        };
        assert!(FrameCorrelator::new(too_much_crop).is_err());

        let narrow_kernel = CorrelatorConfig {
            frame_side: 100,
            crop_margin: 30,
        };
        assert!(FrameCorrelator::new(narrow_kernel).is_err());

        assert!(FrameCorrelator::new(CorrelatorConfig::default()).is_ok());
    }

    #[test]
    fn test_small_geometry_peaks_at_its_center() {
        let correlator = FrameCorrelator::new(CorrelatorConfig {
            frame_side: 40,
            crop_margin: 5,
        })
        .unwrap();
        let frame = Frame::from(noise_scene(FRAME_SIDE, 9).grid().window(0, 0, 40, 40).unwrap());

        let map = correlator.correlate(&frame, &frame).unwrap();
        assert_eq!(map.shape(), (30, 30));
        assert_eq!(map.peak(), Some(PeakLocation::new(15, 15)));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(8))]

        #[test]
        fn prop_response_is_full_size_and_in_range(
            seed_a in 1u64..u64::MAX,
            seed_b in 1u64..u64::MAX,
        ) {
            let map = correlate(&noise_scene(FRAME_SIDE, seed_a), &noise_scene(FRAME_SIDE, seed_b))
                .unwrap();
            prop_assert_eq!(map.shape(), (RESPONSE_SIDE, RESPONSE_SIDE));
            prop_assert_eq!(map.values().len(), RESPONSE_SIDE * RESPONSE_SIDE);
            prop_assert_eq!(map.values().iter().copied().max(), Some(255));
            prop_assert_eq!(map.values().iter().copied().min(), Some(0));
        }
    }
}
