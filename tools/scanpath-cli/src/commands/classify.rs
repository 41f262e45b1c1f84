//! Classify a sweep as triangular or rectangular.

use std::path::PathBuf;

use anyhow::Context;

use scanpath_common::config::AppConfig;
use scanpath_media::read_gif;
use scanpath_processing_core::{ClassifierConfig, PathClassifier};

pub fn run(
    config: &AppConfig,
    input: PathBuf,
    json: bool,
    radius: Option<usize>,
) -> anyhow::Result<()> {
    let frames =
        read_gif(&input).with_context(|| format!("Failed to read sweep {}", input.display()))?;
    let sequence = super::sequence_builder(config)?
        .build(&frames)
        .with_context(|| format!("Failed to correlate {}", input.display()))?;

    let mut classifier_config = ClassifierConfig::from(&config.analysis);
    if let Some(radius) = radius {
        classifier_config.radius = radius;
    }
    let trace = PathClassifier::new(classifier_config)
        .trace(&sequence)
        .with_context(|| format!("Failed to classify {}", input.display()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&trace)?);
        return Ok(());
    }

    println!("{}: {}", input.display(), trace.shape);
    println!("  Frames: {}", frames.len());
    println!("  Corners: {}", trace.corner_count());
    for corner in &trace.corners {
        println!("    {corner}");
    }
    if trace.closed {
        println!("  Path returned to its first corner");
    }
    Ok(())
}
