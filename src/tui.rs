//! Terminal preview and confirmation of a rename plan.

mod app;
mod events;
mod models;
mod processing;
mod rendering;

pub use app::App;
pub use events::run_tui;
pub use models::{OperationItem, ProcessingStats, ProcessingStatus, ViewMode};
pub use processing::SessionOutcome;
