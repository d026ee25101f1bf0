//! Generator configuration.

use std::path::{Path, PathBuf};

/// File name of the generated manifest, written directly under the root.
pub const OUTPUT_FILE_NAME: &str = "metadata.yaml";

/// Directory names reserved for automation, tooling scripts and git internals.
pub const EXCLUDED_DIRS: &[&str] = &[".github", "scripts", ".git"];

/// Recognised scenario file extensions.
pub const SCENARIO_EXTENSIONS: &[&str] = &["yaml", "yml"];

/// Settings for one generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Repository root that is scanned and receives the manifest
    pub root: PathBuf,
    /// Manifest file name; also never collected as input
    pub output_file_name: String,
    /// Path segments that exclude a file when any of them matches
    pub excluded_dirs: Vec<String>,
    /// Extensions (without the dot) that mark a scenario file
    pub extensions: Vec<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            root: PathBuf::from("."),
            output_file_name: OUTPUT_FILE_NAME.to_string(),
            excluded_dirs: EXCLUDED_DIRS.iter().map(|d| d.to_string()).collect(),
            extensions: SCENARIO_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
        }
    }
}

impl GeneratorConfig {
    /// Create a config for the given repository root with default rules.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        GeneratorConfig {
            root: root.into(),
            ..Self::default()
        }
    }

    /// Override the manifest file name.
    pub fn with_output_file_name(mut self, name: &str) -> Self {
        self.output_file_name = name.to_string();
        self
    }

    /// Add a directory name to the exclusion set.
    pub fn with_excluded_dir(mut self, name: &str) -> Self {
        if !self.is_excluded_dir(name) {
            self.excluded_dirs.push(name.to_string());
        }
        self
    }

    /// Full path of the manifest.
    pub fn output_path(&self) -> PathBuf {
        self.root.join(&self.output_file_name)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn is_excluded_dir(&self, segment: &str) -> bool {
        self.excluded_dirs.iter().any(|d| d == segment)
    }

    /// Whether a file name carries one of the scenario extensions.
    ///
    /// Matches on the name suffix, so a bare `.yaml` file counts as well.
    pub fn has_scenario_extension(&self, file_name: &str) -> bool {
        self.extensions.iter().any(|ext| {
            file_name.len() > ext.len()
                && file_name.ends_with(ext.as_str())
                && file_name.as_bytes()[file_name.len() - ext.len() - 1] == b'.'
        })
    }
}
