//! Rename the folders and files of a TV series into `Series_S##_E##.ext` form.
//!
//! Planning and execution are separate steps: [`rename_engine`] produces an
//! ordered list of [`RenameOperation`]s which can be previewed with [`preview`]
//! and applied with [`executor::ChangeExecutor`].

pub mod executor;
pub mod flat_rename;
pub mod naming;
pub mod preview;
pub mod rename_engine;
pub mod tui;

pub use executor::{ChangeExecutor, ExecuteError, ExecutionHalted, ExecutionReport};
pub use rename_engine::{ConfigBuilder, PlanError, RenameEngine, RenameOperation, SeriesConfig};
