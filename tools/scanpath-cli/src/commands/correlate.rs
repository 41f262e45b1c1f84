//! Write the correlation video of a sweep.

use std::path::PathBuf;

use anyhow::Context;

use scanpath_common::config::AppConfig;
use scanpath_media::{read_gif, EncodeOptions, GifSink};

pub fn run(
    config: &AppConfig,
    input: PathBuf,
    output: PathBuf,
    allow_flat: bool,
) -> anyhow::Result<()> {
    let frames =
        read_gif(&input).with_context(|| format!("Failed to read sweep {}", input.display()))?;
    println!("Read {} frames from {}", frames.len(), input.display());

    let builder = super::sequence_builder(config)?.substitute_flat(allow_flat);
    let mut sink = GifSink::new(&output, EncodeOptions::from(&config.media));
    let sequence = builder
        .build_into(&frames, &mut sink)
        .with_context(|| format!("Failed to correlate {}", input.display()))?;

    println!(
        "Wrote {} correlation frames to {}",
        sequence.len(),
        output.display()
    );
    Ok(())
}
