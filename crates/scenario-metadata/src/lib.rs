//! Scenario Metadata Generator
//!
//! Discovers scenario YAML files across a repository and writes one
//! deterministically ordered `metadata.yaml` manifest at its root.
//!
//! ## Pipeline
//!
//! - [`collector`]: find candidate files, prune excluded directories, sort by path
//! - [`extractor`]: derive one entry per file, tolerating undecodable content
//! - [`manifest`]: wrap entries with schema version and timestamp
//! - [`writer`]: render with sorted keys behind the generated-file banner

pub mod clock;
pub mod collector;
pub mod config;
pub mod error;
pub mod extractor;
pub mod manifest;
pub mod telemetry;
pub mod writer;

use tracing::info;

pub use clock::{Clock, FixedClock, SystemClock};
pub use collector::{collect_scenario_files, ScenarioFile};
pub use config::{GeneratorConfig, EXCLUDED_DIRS, OUTPUT_FILE_NAME, SCENARIO_EXTENSIONS};
pub use error::{ContentError, MetadataError, ParseFailure, Result};
pub use extractor::{extract_entry, Extraction, ScenarioEntry};
pub use manifest::{format_timestamp, Generation, Manifest, SCHEMA_VERSION};
pub use telemetry::init_tracing;
pub use writer::{render_manifest, write_manifest, WriteReport, BANNER};

/// Collect and extract every scenario under `config.root` into a manifest.
///
/// Per-file decode failures are returned in [`Generation::failures`]; only an
/// unreadable root is an error.
pub fn generate_metadata(config: &GeneratorConfig, clock: &dyn Clock) -> Result<Generation> {
    let files = collect_scenario_files(config)?;

    let mut scenarios = Vec::with_capacity(files.len());
    let mut failures = Vec::new();
    for file in &files {
        let Extraction { entry, failure } = extract_entry(file);
        scenarios.push(entry);
        failures.extend(failure);
    }

    info!(
        scenarios = scenarios.len(),
        unparsed = failures.len(),
        "collected scenario metadata"
    );

    Ok(Generation {
        manifest: Manifest::assemble(scenarios, clock),
        failures,
    })
}

/// Generate the manifest and overwrite `config.output_path()` with it.
pub fn run(config: &GeneratorConfig, clock: &dyn Clock) -> Result<WriteReport> {
    let generation = generate_metadata(config, clock)?;
    write_manifest(&config.output_path(), &generation.manifest)
}
