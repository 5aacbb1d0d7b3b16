use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::info;
use thiserror::Error;

use crate::rename_engine::RenameOperation;

#[derive(Debug, Error)]
pub enum ExecuteError {
    #[error("Target already exists: {} -> {}", old_path.display(), new_path.display())]
    AlreadyExists { old_path: PathBuf, new_path: PathBuf },

    #[error("Failed to rename {} -> {}: {source}", old_path.display(), new_path.display())]
    Rename {
        old_path: PathBuf,
        new_path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Execution stopped at a failing operation. Earlier renames stay applied.
#[derive(Debug, Error)]
#[error("{error} ({applied} of {total} operations applied)")]
pub struct ExecutionHalted {
    pub applied: usize,
    pub total: usize,
    #[source]
    pub error: ExecuteError,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenameOutcome {
    Renamed,
    /// Old and new path are identical.
    Skipped,
    /// Dry run: nothing was touched.
    WouldRename,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExecutionReport {
    pub renamed: usize,
    pub skipped: usize,
    pub dry_run: bool,
}

/// Applies a plan one operation at a time, in order, with no rollback.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChangeExecutor {
    dry_run: bool,
}

impl ChangeExecutor {
    pub const fn new(dry_run: bool) -> Self {
        Self { dry_run }
    }

    pub const fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    pub fn apply(&self, operation: &RenameOperation) -> Result<RenameOutcome, ExecuteError> {
        if operation.is_noop() {
            return Ok(RenameOutcome::Skipped);
        }

        let RenameOperation { old_path, new_path } = operation;
        if self.dry_run {
            info!("[dry run] {} -> {}", old_path.display(), new_path.display());
            return Ok(RenameOutcome::WouldRename);
        }

        if target_taken(old_path, new_path) {
            return Err(ExecuteError::AlreadyExists {
                old_path: old_path.clone(),
                new_path: new_path.clone(),
            });
        }

        fs::rename(old_path, new_path).map_err(|source| ExecuteError::Rename {
            old_path: old_path.clone(),
            new_path: new_path.clone(),
            source,
        })?;

        info!("Renamed {} -> {}", old_path.display(), new_path.display());
        Ok(RenameOutcome::Renamed)
    }

    pub fn execute(&self, operations: &[RenameOperation]) -> Result<ExecutionReport, ExecutionHalted> {
        let mut report = ExecutionReport {
            dry_run: self.dry_run,
            ..ExecutionReport::default()
        };

        for (index, operation) in operations.iter().enumerate() {
            match self.apply(operation) {
                Ok(RenameOutcome::Skipped) => report.skipped += 1,
                Ok(RenameOutcome::Renamed | RenameOutcome::WouldRename) => report.renamed += 1,
                Err(error) => {
                    return Err(ExecutionHalted {
                        applied: index,
                        total: operations.len(),
                        error,
                    });
                }
            }
        }

        Ok(report)
    }
}

/// True when `new_path` exists and is not the same entry as `old_path`.
/// A case-only rename on a case-insensitive filesystem resolves both paths
/// to the same entry and is allowed through.
fn target_taken(old_path: &Path, new_path: &Path) -> bool {
    if fs::symlink_metadata(new_path).is_err() {
        return false;
    }

    match (old_path.canonicalize(), new_path.canonicalize()) {
        (Ok(old), Ok(new)) => old != new,
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noop_is_skipped_without_touching_disk() {
        let executor = ChangeExecutor::new(false);
        let op = RenameOperation::new("/does/not/exist.mkv", "/does/not/exist.mkv");
        assert_eq!(executor.apply(&op).unwrap(), RenameOutcome::Skipped);
    }

    #[test]
    fn test_dry_run_leaves_files_in_place() {
        let dir = tempfile::tempdir().unwrap();
        let old_path = dir.path().join("a.mkv");
        fs::write(&old_path, b"").unwrap();
        let new_path = dir.path().join("Foo_S01_E01.mkv");

        let report = ChangeExecutor::new(true)
            .execute(&[RenameOperation::new(&old_path, &new_path)])
            .unwrap();

        assert!(report.dry_run);
        assert_eq!(report.renamed, 1);
        assert!(old_path.exists());
        assert!(!new_path.exists());
    }

    #[test]
    fn test_existing_target_is_not_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let old_path = dir.path().join("a.mkv");
        let new_path = dir.path().join("b.mkv");
        fs::write(&old_path, b"a").unwrap();
        fs::write(&new_path, b"b").unwrap();

        let result = ChangeExecutor::new(false).apply(&RenameOperation::new(&old_path, &new_path));

        assert!(matches!(result, Err(ExecuteError::AlreadyExists { .. })));
        assert_eq!(fs::read(&new_path).unwrap(), b"b");
    }

    #[test]
    fn test_halt_reports_applied_count() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("a.mkv");
        fs::write(&first, b"").unwrap();

        let operations = vec![
            RenameOperation::new(&first, dir.path().join("x.mkv")),
            RenameOperation::new(dir.path().join("missing.mkv"), dir.path().join("y.mkv")),
            RenameOperation::new(dir.path().join("z.mkv"), dir.path().join("w.mkv")),
        ];
        let halted = ChangeExecutor::new(false).execute(&operations).unwrap_err();

        assert_eq!(halted.applied, 1);
        assert_eq!(halted.total, 3);
        assert!(matches!(halted.error, ExecuteError::Rename { .. }));
        assert!(dir.path().join("x.mkv").exists());
    }
}
