// src/output/types.rs
//! Type definitions for output operations.
//!
//! A snapshot is persisted by first building an [`OutputPlan`] (pure) and
//! then handing it to [`super::deliver`], which does the I/O.

use std::path::PathBuf;

/// Every filesystem operation one run will perform, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputPlan {
    pub operations: Vec<DeliveryTarget>,
}

impl OutputPlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_operation(mut self, operation: DeliveryTarget) -> Self {
        self.operations.push(operation);
        self
    }

    /// Paths of the files this plan writes.
    pub fn file_paths(&self) -> Vec<&PathBuf> {
        self.operations
            .iter()
            .filter_map(|operation| match operation {
                DeliveryTarget::WriteFile { path, .. } => Some(path),
                DeliveryTarget::CreateDirectory { .. } => None,
            })
            .collect()
    }
}

/// A single output operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryTarget {
    /// Create a directory and any missing parents.
    CreateDirectory { path: PathBuf },
    /// Write (or overwrite) a file.
    WriteFile { path: PathBuf, content: String },
}

impl DeliveryTarget {
    pub fn path(&self) -> &PathBuf {
        match self {
            Self::CreateDirectory { path } | Self::WriteFile { path, .. } => path,
        }
    }
}

/// Result of executing an output plan.
#[derive(Debug, Clone, Default)]
pub struct OutputReport {
    pub completed: Vec<CompletedOperation>,
    pub failed: Vec<FailedOperation>,
    pub stats: ExecutionStats,
}

impl OutputReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_completed(mut self, operation: CompletedOperation) -> Self {
        self.stats.operations_completed += 1;
        self.stats.bytes_written += operation.bytes_written;
        self.completed.push(operation);
        self
    }

    pub fn with_failed(mut self, operation: FailedOperation) -> Self {
        self.stats.operations_failed += 1;
        self.failed.push(operation);
        self
    }

    /// Checks if all operations succeeded.
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct CompletedOperation {
    pub operation: DeliveryTarget,
    pub bytes_written: usize,
    pub duration_ms: u64,
}

#[derive(Debug, Clone)]
pub struct FailedOperation {
    pub operation: DeliveryTarget,
    pub error: String,
}

#[derive(Debug, Clone, Default)]
pub struct ExecutionStats {
    pub operations_completed: usize,
    pub operations_failed: usize,
    pub bytes_written: usize,
    pub total_duration_ms: u64,
}
