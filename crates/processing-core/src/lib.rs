//! Scanpath Processing Core: sweep motion estimation
//!
//! Turns an animated sweep into a shape decision:
//! - **Correlator:** Normalized cross-correlation of adjacent frames
//! - **Sequence:** Pairwise assembly of the correlation video
//! - **Classifier:** Corner counting over response peaks
//!
//! This crate is pure computation with no I/O. Inputs and outputs are data.

pub mod classifier;
pub mod correlator;
pub mod sequence;

pub use classifier::{ClassifierConfig, CornerTrace, PathClassifier};
pub use correlator::{CorrelatorConfig, FrameCorrelator};
pub use sequence::{CorrelationSequenceBuilder, SequenceSink};
