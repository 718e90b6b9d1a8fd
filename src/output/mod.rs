// src/output/mod.rs
//! Persisting a snapshot, with planning kept apart from execution.
//!
//! [`plan_snapshot`] is pure and decides what goes where; [`deliver`]
//! performs the writes. Media files are stored one by one as they arrive.

mod media;
mod paths;
mod types;
mod writer;

pub use media::{media_file_path, store_media_file, MediaDownloadReport, MediaFailure};
pub use paths::{display_path, output_path};
pub use types::{
    CompletedOperation, DeliveryTarget, ExecutionStats, FailedOperation, OutputPlan, OutputReport,
};
pub use writer::deliver;

use crate::error::AppError;
use crate::model::ContentSnapshot;
use crate::types::ContentKind;
use serde::Serialize;
use std::path::Path;

/// One JSON file per content type, plus the directory holding them.
///
/// `media.json` is only planned when the media stage ran.
pub fn plan_snapshot(output_dir: &Path, snapshot: &ContentSnapshot) -> Result<OutputPlan, AppError> {
    let mut plan = OutputPlan::new().with_operation(DeliveryTarget::CreateDirectory {
        path: output_dir.to_path_buf(),
    });

    plan = plan
        .with_operation(json_file(output_dir, ContentKind::Pages, &snapshot.pages)?)
        .with_operation(json_file(output_dir, ContentKind::Posts, &snapshot.posts)?)
        .with_operation(json_file(output_dir, ContentKind::Categories, &snapshot.categories)?)
        .with_operation(json_file(output_dir, ContentKind::Locations, &snapshot.locations)?);

    if let Some(media) = &snapshot.media {
        plan = plan.with_operation(json_file(output_dir, ContentKind::Media, media)?);
    }

    Ok(plan)
}

fn json_file<T: Serialize>(
    output_dir: &Path,
    kind: ContentKind,
    records: &[T],
) -> Result<DeliveryTarget, AppError> {
    let content =
        serde_json::to_string_pretty(records).map_err(|source| AppError::Serialization {
            what: kind.file_name().to_string(),
            source,
        })?;
    Ok(DeliveryTarget::WriteFile {
        path: output_path(output_dir, kind),
        content,
    })
}
