// src/types/content_kind.rs
use serde::Serialize;
use std::fmt;

/// The content types captured in a snapshot, one output file each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Categories,
    Posts,
    Pages,
    Locations,
    Media,
}

impl ContentKind {
    /// Stage order; stages run strictly one after another.
    pub const FETCH_ORDER: [ContentKind; 5] = [
        ContentKind::Categories,
        ContentKind::Posts,
        ContentKind::Pages,
        ContentKind::Locations,
        ContentKind::Media,
    ];

    pub fn file_name(&self) -> &'static str {
        match self {
            Self::Categories => "categories.json",
            Self::Posts => "posts.json",
            Self::Pages => "pages.json",
            Self::Locations => "locations.json",
            Self::Media => "media.json",
        }
    }

    /// The static build treats these as broken when empty.
    pub fn is_required(&self) -> bool {
        matches!(self, Self::Pages | Self::Posts | Self::Locations)
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Categories => "categories",
            Self::Posts => "posts",
            Self::Pages => "pages",
            Self::Locations => "locations",
            Self::Media => "media",
        };
        f.write_str(name)
    }
}
