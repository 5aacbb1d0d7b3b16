use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod classifier;
pub mod planner;
pub mod subtitles;

pub use classifier::{Classification, EntryKind, classify_entries, classify_path};
pub use planner::{plan_season, plan_series};
pub use subtitles::{SubtitleGroup, group_subtitles, ordered_groups};

// Extensions are compared case-insensitively.
pub const VIDEO_EXTENSIONS: [&str; 3] = ["mp4", "mkv", "avi"];
pub const SUBTITLE_EXTENSIONS: [&str; 3] = ["srt", "sub", "idx"];

pub const SUBS_FOLDER: &str = "subs";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameOperation {
    pub old_path: PathBuf,
    pub new_path: PathBuf,
}

impl RenameOperation {
    pub fn new(old_path: impl Into<PathBuf>, new_path: impl Into<PathBuf>) -> Self {
        Self {
            old_path: old_path.into(),
            new_path: new_path.into(),
        }
    }

    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.old_path == self.new_path
    }

    pub fn original_name(&self) -> String {
        file_name_lossy(&self.old_path)
    }

    pub fn new_name(&self) -> String {
        file_name_lossy(&self.new_path)
    }
}

fn file_name_lossy(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

#[derive(Debug, Error)]
pub enum PlanError {
    #[error("Unexpected file extension '{extension}' for file: {}", path.display())]
    UnexpectedFileExtension { path: PathBuf, extension: String },

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Not a directory: {}", path.display())]
    NotADirectory { path: PathBuf },

    #[error("Could not derive a series name from {}", path.display())]
    MissingSeriesName { path: PathBuf },
}

impl PlanError {
    pub(crate) fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesConfig {
    pub root: PathBuf,
    pub series_name: String,
}

#[derive(Debug, Default)]
pub struct ConfigBuilder {
    root: Option<PathBuf>,
    series_name: Option<String>,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn root<P: AsRef<Path>>(mut self, root: P) -> Self {
        self.root = Some(root.as_ref().to_path_buf());
        self
    }

    // Blank or unset falls back to the root folder name.
    pub fn series_name(mut self, name: Option<String>) -> Self {
        self.series_name = name.filter(|name| !name.trim().is_empty());
        self
    }

    pub fn build(self) -> Result<SeriesConfig, PlanError> {
        let root = self.root.unwrap_or_else(|| PathBuf::from("."));
        if !root.is_dir() {
            return Err(PlanError::NotADirectory { path: root });
        }

        let series_name = match self.series_name {
            Some(name) => name,
            None => derive_series_name(&root)?,
        };

        Ok(SeriesConfig { root, series_name })
    }
}

pub fn derive_series_name(root: &Path) -> Result<String, PlanError> {
    let name: Option<OsString> = match root.file_name() {
        Some(name) => Some(name.to_os_string()),
        None => root
            .canonicalize()
            .map_err(|source| PlanError::io(root, source))?
            .file_name()
            .map(std::ffi::OsStr::to_os_string),
    };

    name.map(|name| name.to_string_lossy().into_owned())
        .filter(|name| !name.is_empty())
        .ok_or_else(|| PlanError::MissingSeriesName {
            path: root.to_path_buf(),
        })
}

#[derive(Debug, Clone)]
pub struct RenameEngine {
    config: SeriesConfig,
}

impl RenameEngine {
    pub const fn new(config: SeriesConfig) -> Self {
        Self { config }
    }

    pub const fn config(&self) -> &SeriesConfig {
        &self.config
    }

    pub fn plan(&self) -> Result<Vec<RenameOperation>, PlanError> {
        plan_series(&self.config.root, &self.config.series_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noop_detection() {
        let op = RenameOperation::new("/a/b.mkv", "/a/b.mkv");
        assert!(op.is_noop());

        let op = RenameOperation::new("/a/b.mkv", "/a/Foo_S01_E01.mkv");
        assert!(!op.is_noop());
        assert_eq!(op.original_name(), "b.mkv");
        assert_eq!(op.new_name(), "Foo_S01_E01.mkv");
    }

    #[test]
    fn test_derive_series_name_strips_trailing_separator() {
        assert_eq!(derive_series_name(Path::new("/media/Foo/")).unwrap(), "Foo");
        assert_eq!(derive_series_name(Path::new("Some Show")).unwrap(), "Some Show");
    }

    #[test]
    fn test_config_builder_rejects_missing_root() {
        let result = ConfigBuilder::new()
            .root("/definitely/not/a/real/series/root")
            .build();
        assert!(matches!(result, Err(PlanError::NotADirectory { .. })));
    }

    #[test]
    fn test_config_builder_blank_name_falls_back_to_folder() {
        let dir = tempfile::tempdir().unwrap();
        let config = ConfigBuilder::new()
            .root(dir.path())
            .series_name(Some("   ".to_string()))
            .build()
            .unwrap();

        let expected = dir.path().file_name().unwrap().to_string_lossy().into_owned();
        assert_eq!(config.series_name, expected);
    }

    #[test]
    fn test_unexpected_extension_message() {
        let error = PlanError::UnexpectedFileExtension {
            path: PathBuf::from("/show/Season 1/notes.txt"),
            extension: ".txt".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Unexpected file extension '.txt' for file: /show/Season 1/notes.txt"
        );
    }
}
