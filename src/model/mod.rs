// src/model/mod.rs
//! Flat records written to the snapshot files.
//!
//! These are the shapes the static build reads. Optional scalars are
//! empty strings or zero rather than `null`; `featuredImage` is left out
//! entirely when there is none.

pub mod common;

pub use common::{Author, CategoryRef, FeaturedImage, TagRef};

use crate::types::ContentKind;
use serde::{Deserialize, Serialize};

/// A regular WordPress page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub id: String,
    pub database_id: u64,
    pub slug: String,
    pub uri: String,
    pub title: String,
    pub content: String,
    pub excerpt: String,
    pub date: String,
    pub modified: String,
    /// Database id of the parent page, 0 at the top level.
    pub parent_id: u64,
}

/// A blog post.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub database_id: u64,
    pub slug: String,
    pub uri: String,
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub date: String,
    pub modified: String,
    pub author: Author,
    pub categories: Vec<CategoryRef>,
    pub tags: Vec<TagRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured_image: Option<FeaturedImage>,
}

/// A post category archive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub database_id: u64,
    pub name: String,
    pub slug: String,
    pub uri: String,
    pub description: String,
    pub count: u64,
    pub parent_id: u64,
}

/// A geography-specific service page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    /// GraphQL global id.
    pub id: String,
    pub database_id: u64,
    pub slug: String,
    pub uri: String,
    pub title: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured_image: Option<FeaturedImage>,
}

/// An entry in the media library index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaItem {
    pub id: u64,
    pub slug: String,
    pub filename: String,
    pub original_url: String,
    pub local_path: String,
    pub alt: String,
    pub title: String,
}

/// Everything one run produced, ready to persist.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentSnapshot {
    pub categories: Vec<Category>,
    pub posts: Vec<Post>,
    pub pages: Vec<Page>,
    pub locations: Vec<Location>,
    /// `None` when the media stage was not requested.
    pub media: Option<Vec<MediaItem>>,
}

impl ContentSnapshot {
    /// Number of records of `kind`, `None` if that kind was not collected.
    pub fn count(&self, kind: ContentKind) -> Option<usize> {
        match kind {
            ContentKind::Categories => Some(self.categories.len()),
            ContentKind::Posts => Some(self.posts.len()),
            ContentKind::Pages => Some(self.pages.len()),
            ContentKind::Locations => Some(self.locations.len()),
            ContentKind::Media => self.media.as_ref().map(Vec::len),
        }
    }
}

/// Records that have a slug unique within their type.
pub trait Slugged {
    fn slug(&self) -> &str;
}

macro_rules! impl_slugged {
    ($($ty:ty),*) => {
        $(impl Slugged for $ty {
            fn slug(&self) -> &str {
                &self.slug
            }
        })*
    };
}

impl_slugged!(Page, Post, Category, Location, MediaItem);
