//! Scanpath Media
//!
//! The file boundary of the pipeline:
//!
//! ```text
//! sweep.gif ──► decode ──► Vec<Frame> ──► (processing-core) ──► CorrelationSequence
//!                                                                      │
//!                                             correlation.gif ◄── encode
//! ```
//!
//! `synthetic` renders camera sweeps over a generated scene so fixtures
//! can be produced without recorded footage.

pub mod decode;
pub mod encode;
pub mod synthetic;

pub use decode::{decode_gif, read_gif};
pub use encode::{encode_gif, write_gif, EncodeOptions, GifSink};
