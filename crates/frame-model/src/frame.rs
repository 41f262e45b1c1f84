//! Single-channel intensity frames.

use crate::grid::{Grid, GridError};

/// Side length of the square frames the sweep pipeline expects.
pub const FRAME_SIDE: usize = 160;

/// One 8-bit intensity image of an animated sweep.
///
/// Frames are immutable once decoded; stages borrow them and never
/// modify samples in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pixels: Grid<u8>,
}

impl Frame {
    /// Wrap row-major samples.
    pub fn new(rows: usize, cols: usize, data: Vec<u8>) -> Result<Self, GridError> {
        Ok(Self {
            pixels: Grid::from_vec(rows, cols, data)?,
        })
    }

    /// A frame where every sample has the same intensity.
    pub fn filled(rows: usize, cols: usize, value: u8) -> Self {
        Self {
            pixels: Grid::filled(rows, cols, value),
        }
    }

    /// Build a frame by evaluating `f(row, col)`.
    pub fn from_fn(rows: usize, cols: usize, f: impl FnMut(usize, usize) -> u8) -> Self {
        Self {
            pixels: Grid::from_fn(rows, cols, f),
        }
    }

    pub fn rows(&self) -> usize {
        self.pixels.rows()
    }

    pub fn cols(&self) -> usize {
        self.pixels.cols()
    }

    /// `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        self.pixels.shape()
    }

    /// Intensity at `(row, col)`, or `None` outside the frame.
    pub fn pixel(&self, row: usize, col: usize) -> Option<u8> {
        self.pixels.get(row, col)
    }

    /// Samples in row-major order.
    pub fn pixels(&self) -> &[u8] {
        self.pixels.as_slice()
    }

    pub fn grid(&self) -> &Grid<u8> {
        &self.pixels
    }
}

impl From<Grid<u8>> for Frame {
    fn from(pixels: Grid<u8>) -> Self {
        Self { pixels }
    }
}

impl AsRef<Grid<u8>> for Frame {
    fn as_ref(&self) -> &Grid<u8> {
        &self.pixels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_creation() {
        let frame = Frame::new(2, 2, vec![0, 64, 128, 255]).unwrap();
        assert_eq!(frame.shape(), (2, 2));
        assert_eq!(frame.pixel(1, 1), Some(255));
        assert_eq!(frame.pixel(2, 0), None);
    }

    #[test]
    fn test_frame_rejects_short_buffer() {
        assert!(Frame::new(FRAME_SIDE, FRAME_SIDE, vec![0; 100]).is_err());
    }

    #[test]
    fn test_frame_from_fn() {
        let frame = Frame::from_fn(3, 3, |r, c| (r + c) as u8);
        assert_eq!(frame.pixels(), &[0, 1, 2, 1, 2, 3, 2, 3, 4]);
    }
}
