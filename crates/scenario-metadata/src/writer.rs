//! Deterministic manifest rendering.
//!
//! `serde_yaml` mappings keep insertion order, so the manifest is converted to
//! a value tree and every mapping is re-sorted by key before encoding. The
//! encoder emits block style and literal Unicode, which together with the key
//! sort makes repeated runs byte-identical.

use std::cmp::Ordering;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde_yaml::{Mapping, Value};
use tracing::info;

use crate::error::{MetadataError, Result};
use crate::manifest::Manifest;

/// Banner written ahead of the YAML document.
pub const BANNER: &str = "\
# This file is generated and maintained exclusively by automation.
# Do NOT edit it manually — your changes will be overwritten on the next push to master.
# See .github/workflows/update-metadata.yml for the generation trigger.

";

/// Summary of a completed write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteReport {
    pub path: PathBuf,
    pub scenario_count: usize,
}

impl fmt::Display for WriteReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Wrote {} ({} scenarios)",
            self.path.display(),
            self.scenario_count
        )
    }
}

/// Render the banner followed by the key-sorted YAML document.
pub fn render_manifest(manifest: &Manifest) -> Result<String> {
    let value = canonicalize(serde_yaml::to_value(manifest)?);
    let body = serde_yaml::to_string(&value)?;

    let mut out = String::with_capacity(BANNER.len() + body.len());
    out.push_str(BANNER);
    out.push_str(&body);
    Ok(out)
}

/// Overwrite `path` with the rendered manifest.
pub fn write_manifest(path: &Path, manifest: &Manifest) -> Result<WriteReport> {
    let content = render_manifest(manifest)?;
    fs::write(path, content).map_err(|source| MetadataError::Write {
        path: path.to_path_buf(),
        source,
    })?;

    info!(path = %path.display(), scenarios = manifest.len(), "manifest written");
    Ok(WriteReport {
        path: path.to_path_buf(),
        scenario_count: manifest.len(),
    })
}

/// Recursively sort every mapping in `value` by key.
pub fn canonicalize(value: Value) -> Value {
    match value {
        Value::Mapping(mapping) => {
            let mut pairs: Vec<(Value, Value)> = mapping.into_iter().collect();
            pairs.sort_by(|(a, _), (b, _)| compare_keys(a, b));
            Value::Mapping(
                pairs
                    .into_iter()
                    .map(|(k, v)| (k, canonicalize(v)))
                    .collect::<Mapping>(),
            )
        }
        Value::Sequence(items) => Value::Sequence(items.into_iter().map(canonicalize).collect()),
        Value::Tagged(mut tagged) => {
            tagged.value = canonicalize(std::mem::take(&mut tagged.value));
            Value::Tagged(tagged)
        }
        scalar => scalar,
    }
}

// String keys sort by code point and ahead of any other key type; the rest
// sort by their rendered YAML text.
fn compare_keys(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::String(a), Value::String(b)) => a.cmp(b),
        (Value::String(_), _) => Ordering::Less,
        (_, Value::String(_)) => Ordering::Greater,
        _ => key_text(a).cmp(&key_text(b)),
    }
}

fn key_text(key: &Value) -> String {
    serde_yaml::to_string(key).unwrap_or_default()
}
