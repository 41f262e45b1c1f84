//! Correlation response maps and peak locations.

use serde::{Deserialize, Serialize};

use crate::grid::{Grid, GridError};

/// Side length of the response maps produced from 160x160 frames.
pub const RESPONSE_SIDE: usize = 110;

/// Rescaled cross-correlation magnitude between two adjacent frames.
///
/// The sample at the map center corresponds to zero displacement; the
/// brightest sample marks the estimated frame-to-frame motion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseMap {
    cells: Grid<u8>,
}

impl ResponseMap {
    /// Wrap row-major response samples.
    pub fn new(rows: usize, cols: usize, data: Vec<u8>) -> Result<Self, GridError> {
        Ok(Self {
            cells: Grid::from_vec(rows, cols, data)?,
        })
    }

    /// All-zero map, the substitute for a degenerate (flat) correlation.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            cells: Grid::filled(rows, cols, 0),
        }
    }

    /// A map that is zero except for a single bright sample.
    ///
    /// Handy for building synthetic correlation sequences.
    pub fn with_peak(rows: usize, cols: usize, peak: PeakLocation) -> Self {
        Self {
            cells: Grid::from_fn(rows, cols, |r, c| {
                if r == peak.row && c == peak.col {
                    255
                } else {
                    0
                }
            }),
        }
    }

    pub fn rows(&self) -> usize {
        self.cells.rows()
    }

    pub fn cols(&self) -> usize {
        self.cells.cols()
    }

    /// `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        self.cells.shape()
    }

    /// Response at `(row, col)`, or `None` outside the map.
    pub fn value(&self, row: usize, col: usize) -> Option<u8> {
        self.cells.get(row, col)
    }

    /// Samples in row-major order.
    pub fn values(&self) -> &[u8] {
        self.cells.as_slice()
    }

    pub fn grid(&self) -> &Grid<u8> {
        &self.cells
    }

    /// Location of the strongest response (first maximum in row-major order).
    pub fn peak(&self) -> Option<PeakLocation> {
        self.cells
            .argmax()
            .map(|(row, col)| PeakLocation::new(row, col))
    }

    /// Location of the zero-displacement sample.
    pub fn center(&self) -> PeakLocation {
        PeakLocation::new(self.rows() / 2, self.cols() / 2)
    }
}

impl From<Grid<u8>> for ResponseMap {
    fn from(cells: Grid<u8>) -> Self {
        Self { cells }
    }
}

impl AsRef<Grid<u8>> for ResponseMap {
    fn as_ref(&self) -> &Grid<u8> {
        &self.cells
    }
}

/// Integer `(row, col)` position within a response map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PeakLocation {
    pub row: usize,
    pub col: usize,
}

impl PeakLocation {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// L1 distance to another location.
    pub fn manhattan_distance(&self, other: &PeakLocation) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    /// Signed `(d_row, d_col)` offset of this peak relative to `origin`.
    pub fn offset_from(&self, origin: &PeakLocation) -> (i64, i64) {
        (
            self.row as i64 - origin.row as i64,
            self.col as i64 - origin.col as i64,
        )
    }
}

impl std::fmt::Display for PeakLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
