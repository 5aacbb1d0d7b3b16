use std::time::Instant;

use log::error;

use super::app::App;
use super::models::ProcessingStatus;
use crate::executor::{ChangeExecutor, RenameOutcome};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    Cancelled,
    Completed { renamed: usize, skipped: usize },
    Halted { applied: usize, total: usize, message: String },
}

impl App {
    pub fn confirm(&mut self) {
        if self.confirmed || self.finished {
            return;
        }
        self.confirmed = true;
        self.start_time = Some(Instant::now());
    }

    pub fn is_executing(&self) -> bool {
        self.confirmed && !self.finished
    }

    // Each operation takes two ticks: the first marks it as processing so a
    // frame shows it, the second applies it. The first failure halts the run.
    pub fn process_next(&mut self, executor: &ChangeExecutor) -> bool {
        if !self.is_executing() {
            return false;
        }

        let total = self.items.len();
        let index = self.next_index;
        let Some(item) = self.items.get_mut(index) else {
            self.finish();
            return false;
        };

        if self.current_processing != Some(index) {
            self.current_processing = Some(index);
            item.status = ProcessingStatus::Processing;
            return true;
        }

        match executor.apply(&item.operation) {
            Ok(RenameOutcome::Skipped) => {
                item.status = ProcessingStatus::Skipped;
                self.stats.skipped += 1;
            }
            Ok(RenameOutcome::Renamed | RenameOutcome::WouldRename) => {
                item.status = ProcessingStatus::Success;
                self.stats.successful += 1;
            }
            Err(err) => {
                error!("{err}");
                item.status = ProcessingStatus::Error;
                item.error_message = Some(err.to_string());
                self.stats.failed += 1;
                self.stats.processed += 1;
                self.halted = true;
                self.finish();
                return false;
            }
        }

        self.stats.processed += 1;
        self.next_index += 1;
        self.processing_progress = self.next_index as f64 / total.max(1) as f64;

        if self.next_index >= total {
            self.finish();
            return false;
        }
        true
    }

    fn finish(&mut self) {
        self.current_processing = None;
        self.finished = true;
        if !self.halted {
            self.processing_progress = 1.0;
        }
        let message = if self.halted {
            format!("Stopped after {} of {} renames", self.next_index, self.items.len())
        } else {
            format!("Complete! {} renamed, {} skipped", self.stats.successful, self.stats.skipped)
        };
        self.set_status_message(message);
    }

    pub fn outcome(&self) -> SessionOutcome {
        if !self.confirmed {
            return SessionOutcome::Cancelled;
        }
        if self.halted {
            let message = self
                .items
                .get(self.next_index)
                .and_then(|item| item.error_message.clone())
                .unwrap_or_default();
            return SessionOutcome::Halted {
                applied: self.next_index,
                total: self.items.len(),
                message,
            };
        }
        SessionOutcome::Completed {
            renamed: self.stats.successful,
            skipped: self.stats.skipped,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use super::*;
    use crate::rename_engine::RenameOperation;

    fn app_for(root: &Path, operations: Vec<RenameOperation>) -> App {
        App::new(root.to_path_buf(), "Foo".to_string(), operations, false)
    }

    #[test]
    fn test_nothing_runs_before_confirmation() {
        let dir = tempfile::tempdir().unwrap();
        let old_path = dir.path().join("a.mkv");
        fs::write(&old_path, b"").unwrap();
        let mut app = app_for(
            dir.path(),
            vec![RenameOperation::new(&old_path, dir.path().join("Foo_S01_E01.mkv"))],
        );

        assert!(!app.process_next(&ChangeExecutor::new(false)));
        assert!(old_path.exists());
        assert_eq!(app.outcome(), SessionOutcome::Cancelled);
    }

    #[test]
    fn test_confirmed_run_applies_all() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.mkv");
        let b = dir.path().join("b.mkv");
        fs::write(&a, b"").unwrap();
        fs::write(&b, b"").unwrap();
        let mut app = app_for(
            dir.path(),
            vec![
                RenameOperation::new(&a, dir.path().join("Foo_S01_E01.mkv")),
                RenameOperation::new(&b, dir.path().join("Foo_S01_E02.mkv")),
            ],
        );

        app.confirm();
        let executor = ChangeExecutor::new(false);
        while app.process_next(&executor) {}

        assert!(app.finished);
        assert!(dir.path().join("Foo_S01_E02.mkv").exists());
        assert_eq!(app.outcome(), SessionOutcome::Completed { renamed: 2, skipped: 0 });
    }

    #[test]
    fn test_operation_is_marked_before_it_is_applied() {
        let dir = tempfile::tempdir().unwrap();
        let old_path = dir.path().join("a.mkv");
        let new_path = dir.path().join("Foo_S01_E01.mkv");
        fs::write(&old_path, b"").unwrap();
        let mut app = app_for(dir.path(), vec![RenameOperation::new(&old_path, &new_path)]);

        app.confirm();
        let executor = ChangeExecutor::new(false);

        assert!(app.process_next(&executor));
        assert_eq!(app.items[0].status, ProcessingStatus::Processing);
        assert_eq!(app.current_processing, Some(0));
        assert!(old_path.exists());

        assert!(!app.process_next(&executor));
        assert_eq!(app.items[0].status, ProcessingStatus::Success);
        assert!(new_path.exists());
        assert!(app.finished);
    }

    #[test]
    fn test_failure_halts_and_leaves_rest_pending() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.mkv");
        fs::write(&a, b"").unwrap();
        let mut app = app_for(
            dir.path(),
            vec![
                RenameOperation::new(&a, dir.path().join("x.mkv")),
                RenameOperation::new(dir.path().join("gone.mkv"), dir.path().join("y.mkv")),
                RenameOperation::new(dir.path().join("c.mkv"), dir.path().join("z.mkv")),
            ],
        );

        app.confirm();
        let executor = ChangeExecutor::new(false);
        while app.process_next(&executor) {}

        assert!(app.halted);
        assert_eq!(app.items[0].status, ProcessingStatus::Success);
        assert_eq!(app.items[1].status, ProcessingStatus::Error);
        assert_eq!(app.items[2].status, ProcessingStatus::Pending);
        assert!(matches!(
            app.outcome(),
            SessionOutcome::Halted { applied: 1, total: 3, .. }
        ));
    }
}
