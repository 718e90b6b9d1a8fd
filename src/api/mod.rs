// src/api/mod.rs
//! WordPress API interaction: the ability to retrieve content from a site.
//!
//! I/O (`client`, `fetcher`), pagination (`rest`, `graphql`) and wire
//! shapes (`responses`) are kept apart; the pipeline only sees
//! [`ContentRepository`].

pub mod client;
pub mod fetcher;
pub mod graphql;
pub mod parser;
pub mod queries;
pub mod responses;
pub mod rest;
mod wordpress;

use crate::error::AppError;
use responses::{RawLocation, WpCategory, WpMedia, WpPage, WpPost};

/// The ability to retrieve every item of each content type.
///
/// Business logic depends on this trait, never on HTTP details.
#[async_trait::async_trait]
pub trait ContentRepository: Send + Sync {
    async fn fetch_categories(&self) -> Result<Vec<WpCategory>, AppError>;
    async fn fetch_posts(&self) -> Result<Vec<WpPost>, AppError>;
    async fn fetch_pages(&self) -> Result<Vec<WpPage>, AppError>;
    async fn fetch_locations(&self) -> Result<Vec<RawLocation>, AppError>;
    async fn fetch_media(&self) -> Result<Vec<WpMedia>, AppError>;
    /// Downloads one media file by its absolute URL.
    async fn fetch_media_file(&self, url: &str) -> Result<Vec<u8>, AppError>;
}

pub use client::WpHttpClient;
pub use fetcher::Fetcher;
pub use wordpress::WordPressClient;
