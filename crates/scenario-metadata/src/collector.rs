//! Scenario file discovery.
//!
//! Walks the repository root, keeps files with a scenario extension, prunes
//! excluded directories and the manifest itself, and returns the result sorted
//! by relative path so the order never depends on the filesystem.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

use crate::config::GeneratorConfig;
use crate::error::{MetadataError, Result};

/// A candidate scenario file, addressed relative to the repository root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioFile {
    absolute: PathBuf,
    segments: Vec<String>,
}

impl ScenarioFile {
    /// Build from an absolute path and its root-relative segments.
    pub fn new(absolute: impl Into<PathBuf>, segments: Vec<String>) -> Self {
        Self {
            absolute: absolute.into(),
            segments,
        }
    }

    /// Build from a root and a forward-slash relative path.
    pub fn from_relative(root: &Path, relative: &str) -> Self {
        let segments: Vec<String> = relative.split('/').map(str::to_string).collect();
        let absolute = segments.iter().fold(root.to_path_buf(), |p, s| p.join(s));
        Self { absolute, segments }
    }

    pub fn absolute_path(&self) -> &Path {
        &self.absolute
    }

    /// Root-relative path segments, file name last.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Platform-independent relative path (`provider/category/file.yaml`).
    pub fn relative_path(&self) -> String {
        self.segments.join("/")
    }

    pub fn file_name(&self) -> &str {
        self.segments.last().map(String::as_str).unwrap_or_default()
    }

    /// File name without its final extension.
    pub fn stem(&self) -> String {
        Path::new(self.file_name())
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.file_name().to_string())
    }
}

/// Collect every scenario file under `config.root`, sorted by relative path.
///
/// Only a failure to read the root itself is an error; unreadable entries
/// deeper in the tree are logged and skipped.
pub fn collect_scenario_files(config: &GeneratorConfig) -> Result<Vec<ScenarioFile>> {
    let root = config.root();
    let mut files = Vec::new();

    let walker = WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|entry| !is_pruned(entry, config));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) if err.depth() == 0 => {
                return Err(MetadataError::RootUnreadable {
                    root: root.to_path_buf(),
                    source: err.into(),
                });
            }
            Err(err) => {
                warn!("skipping unreadable path under {}: {}", root.display(), err);
                continue;
            }
        };

        if entry.depth() == 0 {
            if !entry.file_type().is_dir() {
                return Err(MetadataError::RootUnreadable {
                    root: root.to_path_buf(),
                    source: std::io::Error::other("not a directory"),
                });
            }
            continue;
        }

        if !is_regular_file(&entry) {
            continue;
        }

        let file_name = entry.file_name().to_string_lossy();
        if file_name == config.output_file_name.as_str()
            || !config.has_scenario_extension(&file_name)
        {
            continue;
        }

        let Ok(relative) = entry.path().strip_prefix(root) else {
            continue;
        };
        let segments: Vec<String> = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();

        debug!(path = %segments.join("/"), "collected scenario file");
        files.push(ScenarioFile::new(entry.path(), segments));
    }

    files.sort_by_cached_key(ScenarioFile::relative_path);
    Ok(files)
}

fn is_pruned(entry: &DirEntry, config: &GeneratorConfig) -> bool {
    entry.depth() > 0 && config.is_excluded_dir(&entry.file_name().to_string_lossy())
}

fn is_regular_file(entry: &DirEntry) -> bool {
    if entry.file_type().is_file() {
        return true;
    }
    entry.path_is_symlink() && entry.path().is_file()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "description: test\n").unwrap();
    }

    fn relative_paths(files: &[ScenarioFile]) -> Vec<String> {
        files.iter().map(ScenarioFile::relative_path).collect()
    }

    #[test]
    fn collects_both_extensions_sorted_by_path() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "zeta/last.yml");
        touch(dir.path(), "acme/billing/invoice.yaml");
        touch(dir.path(), "acme/readme.yml");
        touch(dir.path(), "Acme/upper.yaml");
        touch(dir.path(), "top.yaml");
        touch(dir.path(), "acme/notes.txt");

        let files = collect_scenario_files(&GeneratorConfig::new(dir.path())).unwrap();
        assert_eq!(
            relative_paths(&files),
            vec![
                "Acme/upper.yaml",
                "acme/billing/invoice.yaml",
                "acme/readme.yml",
                "top.yaml",
                "zeta/last.yml",
            ]
        );
    }

    #[test]
    fn excluded_directories_are_skipped_at_any_depth() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), ".github/workflows/update-metadata.yml");
        touch(dir.path(), "scripts/config.yaml");
        touch(dir.path(), "acme/scripts/helper.yaml");
        touch(dir.path(), "acme/billing/.git/objects.yaml");
        touch(dir.path(), "acme/billing/kept.yaml");

        let files = collect_scenario_files(&GeneratorConfig::new(dir.path())).unwrap();
        assert_eq!(relative_paths(&files), vec!["acme/billing/kept.yaml"]);
    }

    #[test]
    fn manifest_file_is_never_collected() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "metadata.yaml");
        touch(dir.path(), "acme/metadata.yaml");
        touch(dir.path(), "acme/metadata.yml");

        let files = collect_scenario_files(&GeneratorConfig::new(dir.path())).unwrap();
        assert_eq!(relative_paths(&files), vec!["acme/metadata.yml"]);
    }

    #[test]
    fn custom_exclusions_apply() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "vendor/dep.yaml");
        touch(dir.path(), "acme/a.yaml");

        let config = GeneratorConfig::new(dir.path()).with_excluded_dir("vendor");
        let files = collect_scenario_files(&config).unwrap();
        assert_eq!(relative_paths(&files), vec!["acme/a.yaml"]);
    }

    #[test]
    fn empty_subdirectory_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("acme/empty")).unwrap();

        let files = collect_scenario_files(&GeneratorConfig::new(dir.path())).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn directory_with_scenario_extension_is_not_a_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("acme/odd.yaml")).unwrap();
        touch(dir.path(), "acme/odd.yaml/inner.yaml");

        let files = collect_scenario_files(&GeneratorConfig::new(dir.path())).unwrap();
        assert_eq!(relative_paths(&files), vec!["acme/odd.yaml/inner.yaml"]);
    }

    #[test]
    fn missing_root_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let config = GeneratorConfig::new(dir.path().join("does-not-exist"));
        match collect_scenario_files(&config) {
            Err(MetadataError::RootUnreadable { root, .. }) => {
                assert_eq!(root, dir.path().join("does-not-exist"));
            }
            other => panic!("expected RootUnreadable, got {other:?}"),
        }
    }

    #[test]
    fn root_that_is_a_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "plain.yaml");
        let config = GeneratorConfig::new(dir.path().join("plain.yaml"));
        assert!(matches!(
            collect_scenario_files(&config),
            Err(MetadataError::RootUnreadable { .. })
        ));
    }

    #[test]
    fn scenario_file_path_parts() {
        let file = ScenarioFile::from_relative(Path::new("/repo"), "acme/billing/invoice.v2.yaml");
        assert_eq!(file.relative_path(), "acme/billing/invoice.v2.yaml");
        assert_eq!(file.file_name(), "invoice.v2.yaml");
        assert_eq!(file.stem(), "invoice.v2");
        assert_eq!(
            file.absolute_path(),
            Path::new("/repo/acme/billing/invoice.v2.yaml")
        );
    }

    #[test]
    fn dotfile_stem_keeps_full_name() {
        let file = ScenarioFile::from_relative(Path::new("/repo"), "acme/.yaml");
        assert_eq!(file.stem(), ".yaml");
    }

    #[test]
    fn custom_output_file_name_is_excluded_and_used_for_output() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "scenarios.yaml");
        touch(dir.path(), "acme/scenarios.yaml");
        touch(dir.path(), "metadata.yaml");

        let config = GeneratorConfig::new(dir.path()).with_output_file_name("scenarios.yaml");
        assert_eq!(config.output_path(), dir.path().join("scenarios.yaml"));

        let files = collect_scenario_files(&config).unwrap();
        assert_eq!(relative_paths(&files), vec!["metadata.yaml"]);
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_subdirectory_is_skipped() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "acme/open.yaml");
        touch(dir.path(), "acme/locked/hidden.yaml");
        let locked = dir.path().join("acme/locked");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();
        // Permission bits are not enforced for root.
        let enforced = fs::read_dir(&locked).is_err();

        let result = collect_scenario_files(&GeneratorConfig::new(dir.path()));
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        let paths = relative_paths(&result.unwrap());
        assert!(paths.contains(&"acme/open.yaml".to_string()));
        if enforced {
            assert_eq!(paths, vec!["acme/open.yaml"]);
        }
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_file_is_collected_but_symlinked_directory_is_not_followed() {
        use std::os::unix::fs::symlink;

        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "acme/real/a.yaml");
        symlink(dir.path().join("acme/real"), dir.path().join("acme/linkdir")).unwrap();
        symlink(
            dir.path().join("acme/real/a.yaml"),
            dir.path().join("acme/link.yaml"),
        )
        .unwrap();
        symlink(dir.path().join("missing.yaml"), dir.path().join("acme/dangling.yaml")).unwrap();

        let files = collect_scenario_files(&GeneratorConfig::new(dir.path())).unwrap();
        assert_eq!(
            relative_paths(&files),
            vec!["acme/link.yaml", "acme/real/a.yaml"]
        );
    }
}
