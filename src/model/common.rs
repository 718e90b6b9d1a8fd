// src/model/common.rs
//! Pieces shared by several record types.

use serde::{Deserialize, Serialize};

/// An image attached to a post or location.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeaturedImage {
    pub source_url: String,
    pub alt_text: String,
    pub width: u64,
    pub height: u64,
}

/// Post author as embedded by the REST API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub name: String,
    pub description: String,
    pub avatar_url: String,
}

/// A category a post is filed under.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRef {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub uri: String,
}

/// A tag attached to a post.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagRef {
    pub name: String,
    pub slug: String,
}
