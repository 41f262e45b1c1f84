//! Render synthetic sweeps.

use std::path::{Path, PathBuf};

use anyhow::Context;

use scanpath_common::config::AppConfig;
use scanpath_frame_model::{SweepShape, FRAME_SIDE};
use scanpath_media::synthetic::{regression_plans, render_sweep, SweepPlan};
use scanpath_media::{write_gif, EncodeOptions};

pub fn run(
    config: &AppConfig,
    shape: SweepShape,
    output: PathBuf,
    seed: u64,
    step: usize,
    steps: usize,
) -> anyhow::Result<()> {
    let plan = SweepPlan {
        shape,
        step,
        steps_per_edge: steps,
        seed,
        frame_side: FRAME_SIDE,
    };
    write_plan(config, &plan, &output)?;
    println!("Wrote {shape} sweep to {}", output.display());
    Ok(())
}

/// Write the regression sweeps named by the default fixture table.
pub fn run_fixtures(config: &AppConfig, assets_dir: Option<PathBuf>) -> anyhow::Result<()> {
    let dir = assets_dir.unwrap_or_else(|| config.assets_dir.clone());
    for (name, plan) in regression_plans() {
        let path = dir.join(name);
        write_plan(config, &plan, &path)?;
        println!("  {} ({})", path.display(), plan.shape);
    }
    println!("Fixtures written to {}", dir.display());
    Ok(())
}

fn write_plan(config: &AppConfig, plan: &SweepPlan, output: &Path) -> anyhow::Result<()> {
    let frames = render_sweep(plan).context("Failed to render sweep")?;
    tracing::info!(frames = frames.len(), shape = %plan.shape, "rendered sweep");
    write_gif(output, &frames, &EncodeOptions::from(&config.media))
        .with_context(|| format!("Failed to write {}", output.display()))
}
