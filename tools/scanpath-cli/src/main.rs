//! Scanpath CLI: correlate and classify animated camera sweeps.
//!
//! Usage:
//!   scanpath correlate <INPUT> <OUTPUT>   Write the correlation video of a sweep
//!   scanpath classify <INPUT>             Print the sweep shape
//!   scanpath test [INDEX]                 Run the regression fixtures
//!   scanpath synth <SHAPE> <OUTPUT>       Render a synthetic sweep
//!   scanpath synth-fixtures               Render the regression fixtures

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use scanpath_common::config::AppConfig;
use scanpath_frame_model::SweepShape;

mod commands;

#[derive(Parser)]
#[command(
    name = "scanpath",
    about = "Classify camera sweeps as triangular or rectangular",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Correlate adjacent frames and write the correlation video
    Correlate {
        /// Input animated GIF
        input: PathBuf,

        /// Output animated GIF
        output: PathBuf,

        /// Replace flat correlation responses with empty frames
        #[arg(long)]
        allow_flat: bool,
    },

    /// Classify a sweep as triangular or rectangular
    Classify {
        /// Input animated GIF
        input: PathBuf,

        /// Print the full corner trace as JSON
        #[arg(long)]
        json: bool,

        /// Corner radius (Manhattan distance)
        #[arg(long)]
        radius: Option<usize>,
    },

    /// Run the fixture table, or a single entry of it
    Test {
        /// Zero-based fixture index
        index: Option<usize>,

        /// JSON fixture table (defaults to the bundled regression sweeps)
        #[arg(long)]
        fixtures: Option<PathBuf>,

        /// Directory holding the regression sweeps
        #[arg(long, conflicts_with = "fixtures")]
        assets_dir: Option<PathBuf>,
    },

    /// Render a synthetic sweep over a generated scene
    Synth {
        /// Path shape: square or triangle
        shape: SweepShape,

        /// Output animated GIF
        output: PathBuf,

        /// Scene seed
        #[arg(long, default_value = "1")]
        seed: u64,

        /// Pixels moved per frame
        #[arg(long, default_value = "5")]
        step: usize,

        /// Frames per edge
        #[arg(long, default_value = "3")]
        steps: usize,
    },

    /// Render the four regression sweeps
    SynthFixtures {
        /// Output directory (defaults to the configured assets directory)
        #[arg(long)]
        assets_dir: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            return ExitCode::from(code);
        }
    };

    let config = AppConfig::load();

    // Initialize logging
    let mut logging = config.logging.clone();
    if cli.verbose {
        logging.level = "debug".to_string();
    }
    scanpath_common::logging::init_logging(&logging);

    let result = match cli.command {
        Commands::Correlate {
            input,
            output,
            allow_flat,
        } => commands::correlate::run(&config, input, output, allow_flat).map(|_| true),
        Commands::Classify {
            input,
            json,
            radius,
        } => commands::classify::run(&config, input, json, radius).map(|_| true),
        Commands::Test {
            index,
            fixtures,
            assets_dir,
        } => commands::test::run(&config, index, fixtures, assets_dir),
        Commands::Synth {
            shape,
            output,
            seed,
            step,
            steps,
        } => commands::synth::run(&config, shape, output, seed, step, steps).map(|_| true),
        Commands::SynthFixtures { assets_dir } => {
            commands::synth::run_fixtures(&config, assets_dir).map(|_| true)
        }
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
