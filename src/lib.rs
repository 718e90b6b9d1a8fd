// src/lib.rs
//! wp-prefetch library — snapshots WordPress content into flat JSON files
//! for a static site build.
//!
//! # Public API
//!
//! The library exposes types organized by concern:
//! - **Error handling** — `AppError`, `ValidationError`, `HttpErrorClass`
//! - **Configuration** — `PipelineConfig`, `FetchPolicy`, `Throttle`
//! - **Domain model** — `Page`, `Post`, `Category`, `Location`, `MediaItem`
//! - **API client** — `WordPressClient`, `Fetcher`, REST and GraphQL paginators
//! - **Transformation** — `transform_*`, URL and entity helpers
//! - **Pipeline** — `SnapshotPipeline` and its capability traits

pub mod analytics;
pub mod api;
pub mod config;
pub mod constants;
pub mod error;
pub mod error_recovery;
pub mod i18n;
pub mod model;
pub mod output;
pub mod pipeline;
pub mod transform;
pub mod types;

// --- Error Handling ---
pub use crate::error::{AppError, HttpErrorClass};
pub use crate::types::ValidationError;

// --- Configuration ---
pub use crate::config::{
    CommandLineInput, FetchPolicy, LocationSettings, PipelineConfig, Throttle,
};
pub use crate::error_recovery::{retry_with_backoff, RetryPolicy};

// --- Domain Model ---
pub use crate::model::{
    Author, Category, CategoryRef, ContentSnapshot, FeaturedImage, Location, MediaItem, Page,
    Post, TagRef,
};

// --- Domain Types ---
pub use crate::types::{ContentKind, Locale, PostType, SiteOrigin, ValidatedUrl};

// --- API Client ---
pub use crate::api::{ContentRepository, Fetcher, WordPressClient, WpHttpClient};

// --- Localization ---
pub use crate::i18n::MessageCatalog;

// --- Pipeline Traits ---
pub use crate::pipeline::{
    ContentSource, PipelineReport, SnapshotComposer, SnapshotDelivery, SnapshotPipeline, Stage,
    StageOutcome,
};
