//! Per-file entry extraction.
//!
//! Path-derived fields come from the relative path; the only content-derived
//! field is `description`. Undecodable content degrades to an entry with the
//! path-derived fields and a [`ParseFailure`] for the caller to report.

use std::fs;

use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};
use tracing::{debug, warn};

use crate::collector::ScenarioFile;
use crate::error::{ContentError, ParseFailure};

/// Content key copied into the entry.
pub const DESCRIPTION_KEY: &str = "description";

/// One scenario's record in the manifest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioEntry {
    pub path: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<Value>,
}

impl ScenarioEntry {
    /// Entry carrying only the fields derived from the file's location.
    pub fn from_path(file: &ScenarioFile) -> Self {
        let segments = file.segments();
        Self {
            path: file.relative_path(),
            name: file.stem(),
            provider: segments.first().cloned(),
            category: if segments.len() >= 3 {
                segments.get(1).cloned()
            } else {
                None
            },
            description: None,
        }
    }
}

/// Result of extracting one file.
#[derive(Debug)]
pub struct Extraction {
    pub entry: ScenarioEntry,
    /// Set when the content could not be decoded; the entry is still usable.
    pub failure: Option<ParseFailure>,
}

/// Extract the manifest entry for `file`. Never fails.
pub fn extract_entry(file: &ScenarioFile) -> Extraction {
    let mut entry = ScenarioEntry::from_path(file);

    let (content, failure) = match read_content(file) {
        Ok(content) => (content, None),
        Err(error) => {
            let failure = ParseFailure {
                path: entry.path.clone(),
                error,
            };
            warn!("{failure}");
            (Mapping::new(), Some(failure))
        }
    };

    entry.description = content
        .get(DESCRIPTION_KEY)
        .filter(|value| !value.is_null())
        .cloned();

    debug!(path = %entry.path, has_description = entry.description.is_some(), "extracted entry");
    Extraction { entry, failure }
}

/// Read and decode a scenario file into its top-level mapping.
///
/// Empty documents decode to an empty mapping. Non-mapping documents are
/// valid YAML but carry no fields, so they also yield an empty mapping.
/// Application-specific tags (`!custom`) anywhere in the document are
/// rejected, as is any mapping with a duplicated key.
pub fn read_content(file: &ScenarioFile) -> Result<Mapping, ContentError> {
    let text = fs::read_to_string(file.absolute_path())?;
    if text.trim().is_empty() {
        return Ok(Mapping::new());
    }
    let value: Value = serde_yaml::from_str(&text)?;
    if let Some(tag) = first_tag(&value) {
        return Err(ContentError::UnsupportedTag(tag));
    }

    match value {
        Value::Mapping(mapping) => Ok(mapping),
        Value::Null => Ok(Mapping::new()),
        other => {
            debug!(
                path = %file.relative_path(),
                kind = value_kind(&other),
                "scenario content is not a mapping"
            );
            Ok(Mapping::new())
        }
    }
}

// Core schema tags (`!!str`, `!!binary`) are plain YAML; anything else needs
// an application-specific constructor.
fn first_tag(value: &Value) -> Option<String> {
    match value {
        Value::Tagged(tagged) => {
            let tag = tagged.tag.to_string();
            let bare = tag.trim_start_matches('!');
            if tag.starts_with("!!") || bare.starts_with("tag:yaml.org,2002:") {
                first_tag(&tagged.value)
            } else {
                Some(tag)
            }
        }
        Value::Sequence(items) => items.iter().find_map(first_tag),
        Value::Mapping(mapping) => mapping
            .iter()
            .find_map(|(k, v)| first_tag(k).or_else(|| first_tag(v))),
        _ => None,
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged",
    }
}
