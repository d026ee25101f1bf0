//! Manifest assembly.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clock::Clock;
use crate::error::ParseFailure;
use crate::extractor::ScenarioEntry;

/// Manifest schema version. Bump on incompatible changes to the entry shape.
pub const SCHEMA_VERSION: u32 = 1;

/// `generated_at` format: second precision, always `Z`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// The generated `metadata.yaml` document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    pub schema_version: u32,
    pub generated_at: String,
    pub scenarios: Vec<ScenarioEntry>,
}

impl Manifest {
    /// Wrap already-ordered entries with the schema version and a timestamp from `clock`.
    pub fn assemble(scenarios: Vec<ScenarioEntry>, clock: &dyn Clock) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            generated_at: format_timestamp(clock.now()),
            scenarios,
        }
    }

    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }
}

/// Format a UTC instant as `YYYY-MM-DDTHH:MM:SSZ`.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// Output of one generation pass: the manifest plus files that degraded to
/// path-only entries.
#[derive(Debug)]
pub struct Generation {
    pub manifest: Manifest,
    pub failures: Vec<ParseFailure>,
}
