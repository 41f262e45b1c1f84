//! Scanpath Frame Model
//!
//! Defines the core data contracts for sweep analysis:
//! - **Grid:** Row-major 2D sample storage shared by frames and maps
//! - **Frame:** One 8-bit intensity image of an animated sweep
//! - **Response:** Rescaled correlation maps and their peak locations
//! - **Sequence:** The ordered "correlation video" of response maps
//! - **Fixture:** Tables of sweeps with their expected shape
//!
//! Coordinates are `(row, col)` with `(0, 0)` at the top-left sample.

pub mod fixture;
pub mod frame;
pub mod grid;
pub mod response;
pub mod sequence;
pub mod shape;

pub use fixture::*;
pub use frame::*;
pub use grid::*;
pub use response::*;
pub use sequence::*;
pub use shape::*;
