// src/pipeline.rs
//! The snapshot pipeline: collect, compose, deliver.
//!
//! Each capability is a trait so stages can be exercised in isolation.
//! [`SnapshotPipeline`] implements all three over any
//! [`ContentRepository`].

use crate::analytics::{measure_snapshot, SnapshotStats};
use crate::api::responses::{RawLocation, WpCategory, WpMedia, WpPage, WpPost};
use crate::api::ContentRepository;
use crate::config::PipelineConfig;
use crate::error::AppError;
use crate::model::{ContentSnapshot, MediaItem};
use crate::output::{
    deliver, media_file_path, plan_snapshot, store_media_file, MediaDownloadReport, OutputReport,
};
use crate::transform;
use crate::types::ContentKind;
use chrono::Utc;
use std::fmt;
use std::future::Future;
use std::time::Duration;

/// Where a run currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Idle,
    FetchingCategories,
    FetchingPosts,
    FetchingPages,
    FetchingLocations,
    FetchingMedia,
    DownloadingMedia,
    Persisting,
    Done,
}

impl Stage {
    pub fn fetching(kind: ContentKind) -> Self {
        match kind {
            ContentKind::Categories => Self::FetchingCategories,
            ContentKind::Posts => Self::FetchingPosts,
            ContentKind::Pages => Self::FetchingPages,
            ContentKind::Locations => Self::FetchingLocations,
            ContentKind::Media => Self::FetchingMedia,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::FetchingCategories => "fetching-categories",
            Self::FetchingPosts => "fetching-posts",
            Self::FetchingPages => "fetching-pages",
            Self::FetchingLocations => "fetching-locations",
            Self::FetchingMedia => "fetching-media",
            Self::DownloadingMedia => "downloading-media",
            Self::Persisting => "persisting",
            Self::Done => "done",
        };
        f.write_str(name)
    }
}

/// How one fetch stage ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageOutcome {
    Completed { kind: ContentKind, count: usize },
    /// The stage contributed an empty list.
    Failed { kind: ContentKind, error: String },
}

impl StageOutcome {
    pub fn kind(&self) -> ContentKind {
        match self {
            Self::Completed { kind, .. } | Self::Failed { kind, .. } => *kind,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// Everything the fetch stages returned, before transformation.
#[derive(Debug, Clone, Default)]
pub struct RawContent {
    pub categories: Vec<WpCategory>,
    pub posts: Vec<WpPost>,
    pub pages: Vec<WpPage>,
    pub locations: Vec<RawLocation>,
    pub media: Option<Vec<WpMedia>>,
    pub outcomes: Vec<StageOutcome>,
}

/// Summary of a complete run.
#[derive(Debug, Clone)]
pub struct PipelineReport {
    pub outcomes: Vec<StageOutcome>,
    pub stats: SnapshotStats,
    pub output: OutputReport,
    /// `None` when the media stage was not requested.
    pub media_files: Option<MediaDownloadReport>,
}

impl PipelineReport {
    pub fn failed_stages(&self) -> Vec<ContentKind> {
        self.outcomes
            .iter()
            .filter(|outcome| outcome.is_failed())
            .map(StageOutcome::kind)
            .collect()
    }
}

/// Retrieves raw content for every stage.
#[async_trait::async_trait]
pub trait ContentSource {
    async fn collect(&mut self) -> RawContent;
}

/// Turns raw content into snapshot records.
pub trait SnapshotComposer {
    fn compose(&self, raw: RawContent) -> ContentSnapshot;
}

/// Persists a snapshot.
pub trait SnapshotDelivery {
    fn deliver(&mut self, snapshot: &ContentSnapshot) -> Result<OutputReport, AppError>;
}

/// Runs the stages of one snapshot strictly in sequence.
pub struct SnapshotPipeline<R> {
    repository: R,
    config: PipelineConfig,
    stage: Stage,
}

impl<R: ContentRepository> SnapshotPipeline<R> {
    pub fn new(repository: R, config: PipelineConfig) -> Self {
        Self {
            repository,
            config,
            stage: Stage::Idle,
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Collects, composes and delivers. Fails only if persisting fails.
    pub async fn run(&mut self) -> Result<PipelineReport, AppError> {
        let started_at = Utc::now();

        let mut raw = self.collect().await;
        let outcomes = std::mem::take(&mut raw.outcomes);
        let snapshot = self.compose(raw);
        let media_files = match &snapshot.media {
            Some(media) => Some(self.download_media(media).await),
            None => None,
        };
        let output = self.deliver(&snapshot)?;

        Ok(PipelineReport {
            outcomes,
            stats: measure_snapshot(&snapshot, started_at),
            output,
            media_files,
        })
    }

    /// Copies each media file into the images directory, skipping files
    /// already there. A failed download is recorded and the rest continue.
    pub async fn download_media(&mut self, media: &[MediaItem]) -> MediaDownloadReport {
        self.advance(Stage::DownloadingMedia);
        let images_dir = &self.config.images_dir;
        let mut report = MediaDownloadReport::default();
        log::info!(
            "Downloading {} media files to {}...",
            media.len(),
            images_dir.display()
        );

        for item in media {
            let Some(path) = media_file_path(images_dir, &item.filename) else {
                log::warn!("  Refusing to store media file named '{}'", item.filename);
                report = report.with_failure(&item.filename, "file name escapes the images directory");
                continue;
            };
            if path.exists() {
                report.skipped += 1;
                continue;
            }

            let stored = match self.repository.fetch_media_file(&item.original_url).await {
                Ok(bytes) => store_media_file(&path, &bytes),
                Err(e) => Err(e),
            };
            match stored {
                Ok(_) => {
                    report.downloaded += 1;
                    if report.downloaded % 20 == 0 {
                        log::info!("  Downloaded {}/{}", report.downloaded, media.len());
                    }
                }
                Err(e) => {
                    log::warn!("  Could not download {}: {}", item.filename, e);
                    report = report.with_failure(&item.filename, e);
                }
            }
        }

        log::info!(
            "Media files: {} downloaded, {} already present, {} failed",
            report.downloaded,
            report.skipped,
            report.failed.len()
        );
        report
    }

    fn advance(&mut self, next: Stage) {
        log::debug!("Stage {} -> {}", self.stage, next);
        self.stage = next;
    }

    async fn pause(&self, delay: Duration) {
        if !delay.is_zero() {
            log::debug!("Pausing {} ms before the next stage", delay.as_millis());
            tokio::time::sleep(delay).await;
        }
    }
}

/// Awaits one stage, degrading a failure to an empty list.
async fn best_effort<T, F>(kind: ContentKind, fetch: F, outcomes: &mut Vec<StageOutcome>) -> Vec<T>
where
    F: Future<Output = Result<Vec<T>, AppError>>,
{
    log::info!("Fetching {}...", kind);
    match fetch.await {
        Ok(items) => {
            log::info!("Fetched {} {}", items.len(), kind);
            outcomes.push(StageOutcome::Completed {
                kind,
                count: items.len(),
            });
            items
        }
        Err(e) => {
            log::error!("Failed to fetch {}: {}", kind, e);
            outcomes.push(StageOutcome::Failed {
                kind,
                error: e.to_string(),
            });
            Vec::new()
        }
    }
}

#[async_trait::async_trait]
impl<R: ContentRepository> ContentSource for SnapshotPipeline<R> {
    async fn collect(&mut self) -> RawContent {
        let throttle = self.config.policy.throttle;
        let mut outcomes = Vec::new();

        self.advance(Stage::FetchingCategories);
        let categories = best_effort(
            ContentKind::Categories,
            self.repository.fetch_categories(),
            &mut outcomes,
        )
        .await;
        self.pause(throttle.after_categories).await;

        self.advance(Stage::FetchingPosts);
        let posts = best_effort(ContentKind::Posts, self.repository.fetch_posts(), &mut outcomes).await;
        self.pause(throttle.after_posts).await;

        self.advance(Stage::FetchingPages);
        let pages = best_effort(ContentKind::Pages, self.repository.fetch_pages(), &mut outcomes).await;
        self.pause(throttle.after_pages).await;

        self.advance(Stage::FetchingLocations);
        let locations = best_effort(
            ContentKind::Locations,
            self.repository.fetch_locations(),
            &mut outcomes,
        )
        .await;

        let media = if self.config.include_media {
            self.advance(Stage::FetchingMedia);
            Some(best_effort(ContentKind::Media, self.repository.fetch_media(), &mut outcomes).await)
        } else {
            None
        };

        RawContent {
            categories,
            posts,
            pages,
            locations,
            media,
            outcomes,
        }
    }
}

impl<R: ContentRepository> SnapshotComposer for SnapshotPipeline<R> {
    fn compose(&self, raw: RawContent) -> ContentSnapshot {
        let origin = &self.config.origin;
        ContentSnapshot {
            categories: transform::transform_categories(raw.categories),
            posts: transform::transform_posts(raw.posts, origin),
            pages: transform::transform_pages(raw.pages, origin),
            locations: transform::transform_locations(raw.locations, &self.config.location, origin),
            media: raw.media.map(transform::transform_media),
        }
    }
}

impl<R: ContentRepository> SnapshotDelivery for SnapshotPipeline<R> {
    fn deliver(&mut self, snapshot: &ContentSnapshot) -> Result<OutputReport, AppError> {
        self.advance(Stage::Persisting);

        let plan = plan_snapshot(&self.config.output_dir, snapshot)?;
        let report = deliver(plan)?;

        if !report.is_success() {
            return Err(AppError::DeliveryFailed {
                failures: report.failed.iter().map(|f| f.error.clone()).collect(),
            });
        }

        self.advance(Stage::Done);
        Ok(report)
    }
}
