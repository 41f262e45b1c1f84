//! Synthetic sweep generation.
//!
//! Renders a camera window travelling a closed square or triangular path
//! over a generated scene: overlapping canopy-like blobs with fine grain
//! on top, so every window has enough texture to correlate.

use image::{GrayImage, Luma};
use imageproc::drawing::draw_filled_circle_mut;

use scanpath_common::error::{ScanpathError, ScanpathResult};
use scanpath_frame_model::{Frame, Grid, SweepShape, DEFAULT_FIXTURES, FRAME_SIDE};

/// Parameters of one synthetic sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SweepPlan {
    /// Path traced by the camera window.
    pub shape: SweepShape,

    /// Pixels moved between consecutive frames.
    pub step: usize,

    /// Frames per edge of the path.
    pub steps_per_edge: usize,

    /// Scene seed.
    pub seed: u64,

    /// Side of the rendered frames.
    pub frame_side: usize,
}

impl Default for SweepPlan {
    fn default() -> Self {
        Self {
            shape: SweepShape::Rectangular,
            step: 5,
            steps_per_edge: 3,
            seed: 1,
            frame_side: FRAME_SIDE,
        }
    }
}

impl SweepPlan {
    pub fn new(shape: SweepShape, seed: u64) -> Self {
        Self {
            shape,
            seed,
            ..Default::default()
        }
    }

    /// Per-frame motion `(d_row, d_col)` along each edge of the path.
    pub fn edge_velocities(&self) -> ScanpathResult<Vec<(i64, i64)>> {
        let s = self.step as i64;
        match self.shape {
            SweepShape::Rectangular => Ok(vec![(0, s), (s, 0), (0, -s), (-s, 0)]),
            SweepShape::Triangular => Ok(vec![(0, 2 * s), (2 * s, -s), (-2 * s, -s)]),
            SweepShape::Indeterminate => Err(ScanpathError::config(
                "synthetic sweeps must be rectangular or triangular",
            )),
        }
    }

    /// Window offsets relative to the start, returning to `(0, 0)`.
    pub fn offsets(&self) -> ScanpathResult<Vec<(i64, i64)>> {
        let mut position = (0, 0);
        let mut offsets = vec![position];
        for (dy, dx) in self.edge_velocities()? {
            for _ in 0..self.steps_per_edge {
                position = (position.0 + dy, position.1 + dx);
                offsets.push(position);
            }
        }
        Ok(offsets)
    }
}

/// The four regression sweeps, named after the default fixture table.
pub fn regression_plans() -> Vec<(&'static str, SweepPlan)> {
    let variants = [(5, 3, 11), (4, 4, 23), (3, 3, 37), (2, 4, 41)];
    DEFAULT_FIXTURES
        .iter()
        .zip(variants)
        .map(|((name, shape), (step, steps_per_edge, seed))| {
            (
                *name,
                SweepPlan {
                    shape: *shape,
                    step,
                    steps_per_edge,
                    seed,
                    frame_side: FRAME_SIDE,
                },
            )
        })
        .collect()
}

/// Render every frame of a sweep.
pub fn render_sweep(plan: &SweepPlan) -> ScanpathResult<Vec<Frame>> {
    if plan.step == 0 || plan.steps_per_edge == 0 {
        return Err(ScanpathError::config("sweep step and edge length must be non-zero"));
    }
    let offsets = plan.offsets()?;

    let min_row = offsets.iter().map(|o| o.0).min().unwrap_or(0);
    let max_row = offsets.iter().map(|o| o.0).max().unwrap_or(0);
    let min_col = offsets.iter().map(|o| o.1).min().unwrap_or(0);
    let max_col = offsets.iter().map(|o| o.1).max().unwrap_or(0);

    let height = plan.frame_side + (max_row - min_row) as usize;
    let width = plan.frame_side + (max_col - min_col) as usize;
    let scene = render_scene(width as u32, height as u32, plan.seed);
    let scene = Grid::from_vec(height, width, scene.into_raw())
        .map_err(|e| ScanpathError::shape(e.to_string()))?;

    let frames = offsets
        .iter()
        .map(|&(row, col)| {
            scene
                .window(
                    (row - min_row) as usize,
                    (col - min_col) as usize,
                    plan.frame_side,
                    plan.frame_side,
                )
                .map(Frame::from)
                .map_err(|e| ScanpathError::shape(e.to_string()))
        })
        .collect::<ScanpathResult<Vec<_>>>()?;

    tracing::debug!(
        shape = %plan.shape,
        frames = frames.len(),
        scene_width = width,
        scene_height = height,
        "rendered synthetic sweep"
    );
    Ok(frames)
}

/// Render a textured grayscale scene.
pub fn render_scene(width: u32, height: u32, seed: u64) -> GrayImage {
    let mut rng = SplitMix64::new(seed);
    let mut img = GrayImage::from_pixel(width, height, Luma([96]));

    // Canopy blobs
    let blob_count = (width as u64 * height as u64 / 600).max(8);
    for _ in 0..blob_count {
        let x = rng.below(width as u64) as i32;
        let y = rng.below(height as u64) as i32;
        let radius = 3 + rng.below(14) as i32;
        let shade = 30 + rng.below(190) as u8;
        draw_filled_circle_mut(&mut img, (x, y), radius, Luma([shade]));
    }

    // Grain
    for pixel in img.pixels_mut() {
        let grain = rng.below(81) as i16 - 40;
        pixel.0[0] = (pixel.0[0] as i16 + grain).clamp(0, 255) as u8;
    }

    img
}

/// Small deterministic generator for scene layout.
struct SplitMix64 {
    state: u64,
}

impl SplitMix64 {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    fn next(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    fn below(&mut self, bound: u64) -> u64 {
        self.next() % bound.max(1)
    }
}
