//! Pairwise assembly of the correlation video.

use scanpath_common::error::{ScanpathError, ScanpathResult};
use scanpath_frame_model::{CorrelationSequence, Frame, ResponseMap};

use crate::correlator::FrameCorrelator;

/// Destination for a finished correlation sequence (e.g. a GIF encoder).
pub trait SequenceSink {
    fn write_sequence(&mut self, sequence: &CorrelationSequence) -> ScanpathResult<()>;
}

/// Correlates every adjacent frame pair of a sweep.
#[derive(Debug, Clone, Default)]
pub struct CorrelationSequenceBuilder {
    correlator: FrameCorrelator,
    substitute_flat: bool,
}

impl CorrelationSequenceBuilder {
    pub fn new(correlator: FrameCorrelator) -> Self {
        Self {
            correlator,
            substitute_flat: false,
        }
    }

    /// Replace degenerate (perfectly flat) pairs with an all-zero map
    /// instead of failing the whole build.
    pub fn substitute_flat(mut self, enabled: bool) -> Self {
        self.substitute_flat = enabled;
        self
    }

    pub fn correlator(&self) -> &FrameCorrelator {
        &self.correlator
    }

    /// Correlate `frames[i - 1]` with `frames[i]` for every `i >= 1`.
    ///
    /// Fewer than two frames yield an empty sequence.
    pub fn build(&self, frames: &[Frame]) -> ScanpathResult<CorrelationSequence> {
        if frames.len() < 2 {
            tracing::debug!(frames = frames.len(), "no adjacent pairs to correlate");
            return Ok(CorrelationSequence::new());
        }

        let mut sequence = CorrelationSequence::with_capacity(frames.len() - 1);
        for index in 1..frames.len() {
            let map = self.correlate_pair(frames, index)?;
            tracing::trace!(pair = index, peak = ?map.peak(), "correlated frame pair");
            sequence.push(map);
        }

        tracing::debug!(
            frames = frames.len(),
            maps = sequence.len(),
            "built correlation sequence"
        );
        Ok(sequence)
    }

    /// Build the sequence and hand it to `sink`.
    pub fn build_into(
        &self,
        frames: &[Frame],
        sink: &mut dyn SequenceSink,
    ) -> ScanpathResult<CorrelationSequence> {
        let sequence = self.build(frames)?;
        sink.write_sequence(&sequence)?;
        Ok(sequence)
    }

    fn correlate_pair(&self, frames: &[Frame], index: usize) -> ScanpathResult<ResponseMap> {
        match self.correlator.correlate(&frames[index - 1], &frames[index]) {
            Ok(map) => Ok(map),
            Err(e) if self.substitute_flat && e.is_degenerate() => {
                tracing::warn!(pair = index, "flat correlation, substituting zero map");
                let side = self.correlator.response_side();
                Ok(ResponseMap::zeros(side, side))
            }
            Err(ScanpathError::Shape { message }) => Err(ScanpathError::shape(format!(
                "frames {} and {index}: {message}",
                index - 1
            ))),
            Err(e) => Err(e),
        }
    }
}
