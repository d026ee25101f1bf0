//! `generate-metadata` - regenerate `metadata.yaml` from every scenario file
//! under the current directory.
//!
//! Intended to be run by automation only (see
//! `.github/workflows/update-metadata.yml`). Takes no arguments.

use anyhow::{Context, Result};
use clap::Parser;
use scenario_metadata::{init_tracing, GeneratorConfig, SystemClock};
use tracing::Level;

#[derive(Parser, Debug)]
#[command(name = "generate-metadata")]
#[command(author = "Stevedores Org")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(
    about = "Regenerate metadata.yaml from the scenario files in the current directory",
    long_about = None
)]
struct Cli {}

fn main() -> Result<()> {
    let _cli = Cli::parse();
    init_tracing(Level::INFO);

    let root = std::env::current_dir().context("Failed to resolve repository root")?;
    let config = GeneratorConfig::new(root);

    let report = scenario_metadata::run(&config, &SystemClock)
        .with_context(|| format!("Failed to generate {}", config.output_path().display()))?;

    println!("{report}");
    Ok(())
}
