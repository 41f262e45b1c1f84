//! CLI command implementations.

pub mod classify;
pub mod correlate;
pub mod synth;

use scanpath_common::config::AppConfig;
use scanpath_processing_core::{CorrelationSequenceBuilder, CorrelatorConfig, FrameCorrelator};

/// Sequence builder configured from the analysis defaults.
pub(crate) fn sequence_builder(config: &AppConfig) -> anyhow::Result<CorrelationSequenceBuilder> {
    let correlator = FrameCorrelator::new(CorrelatorConfig::from(&config.analysis))?;
    Ok(CorrelationSequenceBuilder::new(correlator))
}
