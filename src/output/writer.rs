// src/output/writer.rs
//! Executes output operations by performing actual I/O.
//!
//! This is the only place the snapshot touches the filesystem. Files are
//! overwritten in place.

use super::types::*;
use crate::error::AppError;
use std::fs;
use std::path::Path;
use std::time::Instant;

/// Delivers the output plan, performing all I/O operations.
///
/// A failed operation is recorded and the rest still run.
pub fn deliver(plan: OutputPlan) -> Result<OutputReport, AppError> {
    let mut report = OutputReport::new();
    let start_time = Instant::now();

    log::info!(
        "Executing output plan with {} operations",
        plan.operations.len()
    );

    for operation in plan.operations {
        let op_start = Instant::now();
        match execute_operation(&operation) {
            Ok(bytes_written) => {
                let duration_ms = op_start.elapsed().as_millis() as u64;
                report = report.with_completed(CompletedOperation {
                    operation,
                    bytes_written,
                    duration_ms,
                });
            }
            Err(e) => {
                log::error!("Could not write {}: {}", operation.path().display(), e);
                report = report.with_failed(FailedOperation {
                    operation,
                    error: e.to_string(),
                });
            }
        }
    }

    report.stats.total_duration_ms = start_time.elapsed().as_millis() as u64;

    log::info!(
        "Output plan execution complete: {} succeeded, {} failed in {}ms",
        report.stats.operations_completed,
        report.stats.operations_failed,
        report.stats.total_duration_ms
    );

    Ok(report)
}

fn execute_operation(operation: &DeliveryTarget) -> Result<usize, AppError> {
    match operation {
        DeliveryTarget::WriteFile { path, content } => write_file(path, content),
        DeliveryTarget::CreateDirectory { path } => {
            create_directory(path)?;
            Ok(0)
        }
    }
}

fn write_file(path: &Path, content: &str) -> Result<usize, AppError> {
    log::debug!("Writing {} bytes to {}", content.len(), path.display());

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    fs::write(path, content)?;

    log::info!("Wrote file: {}", path.display());
    Ok(content.len())
}

fn create_directory(path: &Path) -> Result<(), AppError> {
    log::debug!("Creating directory: {}", path.display());

    if path.exists() {
        if path.is_dir() {
            log::debug!("Directory already exists: {}", path.display());
            return Ok(());
        }
        return Err(AppError::Io(std::io::Error::new(
            std::io::ErrorKind::AlreadyExists,
            format!("Path exists but is not a directory: {}", path.display()),
        )));
    }

    fs::create_dir_all(path)?;
    log::info!("Created directory: {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn writes_and_overwrites_files() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("pages.json");

        let plan = OutputPlan::new().with_operation(DeliveryTarget::WriteFile {
            path: path.clone(),
            content: "[1]".to_string(),
        });
        let report = deliver(plan).unwrap();
        assert!(report.is_success());
        assert_eq!(report.stats.bytes_written, 3);

        let plan = OutputPlan::new().with_operation(DeliveryTarget::WriteFile {
            path: path.clone(),
            content: "[]".to_string(),
        });
        deliver(plan).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "[]");
    }

    #[test]
    fn failures_are_collected_not_fatal() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, "x").unwrap();

        let plan = OutputPlan::new()
            .with_operation(DeliveryTarget::CreateDirectory {
                path: blocker.clone(),
            })
            .with_operation(DeliveryTarget::WriteFile {
                path: dir.path().join("posts.json"),
                content: "[]".to_string(),
            });

        let report = deliver(plan).unwrap();
        assert_eq!(report.stats.operations_failed, 1);
        assert_eq!(report.stats.operations_completed, 1);
        assert_eq!(report.failed[0].operation.path(), &blocker);
    }
}
