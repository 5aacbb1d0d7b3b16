use crate::naming::CanonicalName;
use crate::rename_engine::RenameOperation;

#[derive(Debug, Clone)]
pub struct OperationItem {
    pub operation: RenameOperation,
    pub original_name: String,
    pub new_name: String,
    pub status: ProcessingStatus,
    pub error_message: Option<String>,
    pub target: Option<CanonicalName>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessingStatus {
    Pending,
    Processing,
    Success,
    Error,
    Skipped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    Flat,
    Tree,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ProcessingStats {
    pub total: usize,
    pub processed: usize,
    pub successful: usize,
    pub failed: usize,
    pub skipped: usize,
}
