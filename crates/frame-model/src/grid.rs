//! Row-major 2D sample storage.

use std::ops::Index;

/// A dense two-dimensional grid of samples stored row by row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid<T> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

impl<T: Copy> Grid<T> {
    /// Create a grid with every sample set to `value`.
    pub fn filled(rows: usize, cols: usize, value: T) -> Self {
        Self {
            rows,
            cols,
            data: vec![value; rows * cols],
        }
    }

    /// Wrap a row-major sample vector.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<T>) -> Result<Self, GridError> {
        if data.len() != rows * cols {
            return Err(GridError::DataLength {
                rows,
                cols,
                actual: data.len(),
            });
        }
        Ok(Self { rows, cols, data })
    }

    /// Build a grid by evaluating `f(row, col)` for every position.
    pub fn from_fn(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let mut data = Vec::with_capacity(rows * cols);
        for r in 0..rows {
            for c in 0..cols {
                data.push(f(r, c));
            }
        }
        Self { rows, cols, data }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Sample at `(row, col)`, or `None` outside the grid.
    pub fn get(&self, row: usize, col: usize) -> Option<T> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        Some(self.data[row * self.cols + col])
    }

    /// One row of samples.
    pub fn row(&self, row: usize) -> &[T] {
        let start = row * self.cols;
        &self.data[start..start + self.cols]
    }

    /// All samples in row-major order.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Apply `f` to every sample, keeping the shape.
    pub fn map<U: Copy>(&self, f: impl FnMut(T) -> U) -> Grid<U> {
        Grid {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().copied().map(f).collect(),
        }
    }

    /// Copy the `rows x cols` window whose top-left corner is `(top, left)`.
    pub fn window(
        &self,
        top: usize,
        left: usize,
        rows: usize,
        cols: usize,
    ) -> Result<Grid<T>, GridError> {
        if top + rows > self.rows || left + cols > self.cols {
            return Err(GridError::WindowOutOfBounds {
                top,
                left,
                rows,
                cols,
                grid_rows: self.rows,
                grid_cols: self.cols,
            });
        }
        let mut data = Vec::with_capacity(rows * cols);
        for r in top..top + rows {
            data.extend_from_slice(&self.row(r)[left..left + cols]);
        }
        Ok(Grid { rows, cols, data })
    }
}

impl<T: Copy + PartialOrd> Grid<T> {
    /// Position of the largest sample.
    ///
    /// Ties resolve to the first maximum in row-major order, so the result
    /// never depends on how equal samples were produced.
    pub fn argmax(&self) -> Option<(usize, usize)> {
        let mut best: Option<(usize, T)> = None;
        for (idx, &value) in self.data.iter().enumerate() {
            match best {
                Some((_, current)) if value <= current => {}
                _ => best = Some((idx, value)),
            }
        }
        best.map(|(idx, _)| (idx / self.cols, idx % self.cols))
    }
}

impl<T> Index<(usize, usize)> for Grid<T> {
    type Output = T;

    fn index(&self, (row, col): (usize, usize)) -> &T {
        assert!(row < self.rows && col < self.cols, "grid index out of range");
        &self.data[row * self.cols + col]
    }
}

/// Errors raised when building or slicing grids.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    #[error("expected {rows}x{cols} = {} samples, got {actual}", .rows * .cols)]
    DataLength {
        rows: usize,
        cols: usize,
        actual: usize,
    },

    #[error(
        "window {rows}x{cols} at ({top}, {left}) exceeds grid {grid_rows}x{grid_cols}"
    )]
    WindowOutOfBounds {
        top: usize,
        left: usize,
        rows: usize,
        cols: usize,
        grid_rows: usize,
        grid_cols: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_from_vec_rejects_wrong_length() {
        let err = Grid::from_vec(2, 3, vec![0u8; 5]).unwrap_err();
        assert_eq!(
            err,
            GridError::DataLength {
                rows: 2,
                cols: 3,
                actual: 5
            }
        );
        assert_eq!(err.to_string(), "expected 2x3 = 6 samples, got 5");
    }

    #[test]
    fn test_indexing_is_row_major() {
        let grid = Grid::from_fn(3, 4, |r, c| (r * 10 + c) as u8);
        assert_eq!(grid[(2, 1)], 21);
        assert_eq!(grid.row(1), &[10, 11, 12, 13]);
        assert_eq!(grid.get(3, 0), None);
        assert_eq!(grid.shape(), (3, 4));
    }

    #[test]
    fn test_argmax_prefers_first_in_row_major_order() {
        let mut data = vec![0u8; 12];
        data[5] = 9; // (1, 1)
        data[7] = 9; // (1, 3)
        data[9] = 9; // (2, 1)
        let grid = Grid::from_vec(3, 4, data).unwrap();
        assert_eq!(grid.argmax(), Some((1, 1)));
    }

    #[test]
    fn test_argmax_of_constant_grid_is_origin() {
        let grid = Grid::filled(4, 4, 7u8);
        assert_eq!(grid.argmax(), Some((0, 0)));
        assert_eq!(Grid::<u8>::filled(0, 0, 0).argmax(), None);
    }

    #[test]
    fn test_window_copies_subgrid() {
        let grid = Grid::from_fn(5, 5, |r, c| (r * 5 + c) as u8);
        let win = grid.window(1, 2, 2, 3).unwrap();
        assert_eq!(win.as_slice(), &[7, 8, 9, 12, 13, 14]);
        assert!(grid.window(4, 0, 2, 1).is_err());
    }

    proptest! {
        #[test]
        fn prop_argmax_is_first_maximum(data in prop::collection::vec(0u8..=255, 1..64)) {
            let cols = 8;
            let rows = data.len().div_ceil(cols);
            let mut padded = data.clone();
            padded.resize(rows * cols, 0);
            let grid = Grid::from_vec(rows, cols, padded.clone()).unwrap();

            let (r, c) = grid.argmax().unwrap();
            let idx = r * cols + c;
            let max = *padded.iter().max().unwrap();
            prop_assert_eq!(padded[idx], max);
            prop_assert!(padded[..idx].iter().all(|&v| v < max));
        }
    }
}
