// src/api/responses.rs
//! Wire shapes of the WordPress REST and WPGraphQL responses.
//!
//! Every field is defaulted: WordPress omits keys freely depending on
//! `_fields`, `_embed` and installed plugins, and a missing key must never
//! fail a whole page of results.

use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

/// `{ "rendered": "..." }` wrapper used for titles, content and excerpts.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Rendered {
    pub rendered: String,
}

/// `GET /wp/v2/pages` item.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct WpPage {
    pub id: u64,
    pub slug: String,
    pub link: String,
    pub title: Rendered,
    pub content: Rendered,
    pub excerpt: Rendered,
    pub date: String,
    pub modified: String,
    pub featured_media: u64,
    pub parent: u64,
}

/// `GET /wp/v2/posts?_embed` item.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct WpPost {
    pub id: u64,
    pub slug: String,
    pub link: String,
    pub title: Rendered,
    pub content: Rendered,
    pub excerpt: Rendered,
    pub date: String,
    pub modified: String,
    pub featured_media: u64,
    pub categories: Vec<u64>,
    pub tags: Vec<u64>,
    #[serde(rename = "_embedded")]
    pub embedded: Option<Embedded>,
}

/// Related objects inlined by `_embed`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Embedded {
    pub author: Vec<EmbeddedAuthor>,
    /// Term groups in taxonomy order: categories first, then tags.
    #[serde(rename = "wp:term")]
    pub terms: Vec<Vec<EmbeddedTerm>>,
    #[serde(rename = "wp:featuredmedia")]
    pub featured_media: Vec<EmbeddedMedia>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct EmbeddedAuthor {
    pub name: String,
    pub description: String,
    pub avatar_urls: HashMap<String, String>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct EmbeddedTerm {
    pub id: u64,
    pub name: String,
    pub slug: String,
    pub link: String,
    pub taxonomy: String,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct EmbeddedMedia {
    pub source_url: String,
    pub alt_text: String,
    /// Object with `width`/`height` for images, but `[]` or absent for
    /// other attachments, so it is read loosely.
    pub media_details: Value,
}

impl EmbeddedMedia {
    pub fn dimensions(&self) -> (u64, u64) {
        let read = |key: &str| self.media_details.get(key).and_then(Value::as_u64);
        (read("width").unwrap_or(0), read("height").unwrap_or(0))
    }
}

/// `GET /wp/v2/categories` item.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct WpCategory {
    pub id: u64,
    pub name: String,
    pub slug: String,
    pub link: String,
    pub description: String,
    pub count: u64,
    pub parent: u64,
}

/// `GET /wp/v2/media` item.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct WpMedia {
    pub id: u64,
    pub slug: String,
    pub source_url: String,
    pub alt_text: String,
    pub title: Rendered,
}

/// `GET /wp/v2/{post-type}/{id}?_fields=content`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct ContentOnly {
    pub content: Rendered,
}

// --- GraphQL ---

/// Standard GraphQL response envelope.
#[derive(Debug, Deserialize)]
pub struct GraphQlEnvelope<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Option<Vec<GraphQlErrorItem>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlErrorItem {
    #[serde(default)]
    pub message: String,
}

/// Relay `pageInfo` block.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct PageInfo {
    pub has_next_page: bool,
    pub end_cursor: Option<String>,
}

/// Relay connection: one page of nodes plus its cursor.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Connection<N> {
    #[serde(default)]
    pub page_info: PageInfo,
    #[serde(default = "Vec::new")]
    pub nodes: Vec<N>,
}

/// `data` of the location listing query.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContentNodesData {
    pub content_nodes: Option<Connection<LocationNode>>,
}

/// A location as listed by GraphQL. Nodes of other content types match
/// none of the fragment fields and come back as `{}`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct LocationNode {
    pub id: String,
    pub database_id: u64,
    pub slug: String,
    pub title: String,
    pub featured_image: Option<ImageEdge>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct ImageEdge {
    pub node: Option<GraphQlImage>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct GraphQlImage {
    pub source_url: String,
    pub alt_text: String,
    pub media_details: Option<GraphQlMediaDetails>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct GraphQlMediaDetails {
    pub width: u64,
    pub height: u64,
}

/// A location listed over GraphQL plus the body fetched over REST.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawLocation {
    pub node: LocationNode,
    pub content: String,
}
