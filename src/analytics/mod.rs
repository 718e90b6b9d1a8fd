// src/analytics/mod.rs
//! Measurement of a finished snapshot for the end-of-run summary.

use crate::model::ContentSnapshot;
use crate::types::ContentKind;
use chrono::{DateTime, Utc};
use std::time::Duration;

/// Per-type record counts of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotStats {
    pub categories: usize,
    pub posts: usize,
    pub pages: usize,
    pub locations: usize,
    /// `None` when the media stage did not run.
    pub media: Option<usize>,
    pub started_at: DateTime<Utc>,
    pub duration: Duration,
}

impl SnapshotStats {
    /// Records across all collected types.
    pub fn total(&self) -> usize {
        self.categories + self.posts + self.pages + self.locations + self.media.unwrap_or(0)
    }

    pub fn count(&self, kind: ContentKind) -> Option<usize> {
        match kind {
            ContentKind::Categories => Some(self.categories),
            ContentKind::Posts => Some(self.posts),
            ContentKind::Pages => Some(self.pages),
            ContentKind::Locations => Some(self.locations),
            ContentKind::Media => self.media,
        }
    }

    /// Required types that came back empty; the build breaks without them.
    pub fn empty_required_kinds(&self) -> Vec<ContentKind> {
        ContentKind::FETCH_ORDER
            .into_iter()
            .filter(|kind| kind.is_required() && self.count(*kind) == Some(0))
            .collect()
    }
}

/// Measures `snapshot`, timing the run from `started_at` until now.
pub fn measure_snapshot(snapshot: &ContentSnapshot, started_at: DateTime<Utc>) -> SnapshotStats {
    let duration = (Utc::now() - started_at).to_std().unwrap_or_default();

    SnapshotStats {
        categories: snapshot.categories.len(),
        posts: snapshot.posts.len(),
        pages: snapshot.pages.len(),
        locations: snapshot.locations.len(),
        media: snapshot.media.as_ref().map(Vec::len),
        started_at,
        duration,
    }
}
