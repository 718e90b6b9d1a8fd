// src/transform/mod.rs
//! Flattens API responses into the records the static build reads.
//!
//! Every function here is pure: raw wire shapes in, snapshot records out.
//! Links become root-relative paths, plain-text fields are entity-decoded
//! and HTML bodies only have their same-origin image sources rewritten.

pub mod text;
pub mod urls;

use crate::api::responses::{
    EmbeddedTerm, GraphQlImage, RawLocation, WpCategory, WpMedia, WpPage, WpPost,
};
use crate::config::LocationSettings;
use crate::constants::{AUTHOR_AVATAR_SIZE, MEDIA_PUBLIC_PREFIX};
use crate::model::{
    Author, Category, CategoryRef, FeaturedImage, Location, MediaItem, Page, Post, Slugged,
    TagRef,
};
use crate::types::{ContentKind, SiteOrigin};
use std::collections::HashSet;
use text::decode_html_entities;
use urls::{normalize_wp_url, rewrite_content_origin, uri_from_link};

pub fn transform_pages(raw: Vec<WpPage>, origin: &SiteOrigin) -> Vec<Page> {
    let pages = raw
        .into_iter()
        .map(|page| Page {
            id: page.id.to_string(),
            database_id: page.id,
            uri: uri_from_link(&page.link),
            title: decode_html_entities(&page.title.rendered),
            content: rewrite_content_origin(&page.content.rendered, origin).into_owned(),
            excerpt: page.excerpt.rendered,
            date: page.date,
            modified: page.modified,
            parent_id: page.parent,
            slug: page.slug,
        })
        .collect();
    dedupe_by_slug(pages, ContentKind::Pages)
}

pub fn transform_posts(raw: Vec<WpPost>, origin: &SiteOrigin) -> Vec<Post> {
    let posts = raw
        .into_iter()
        .map(|post| transform_post(post, origin))
        .collect();
    dedupe_by_slug(posts, ContentKind::Posts)
}

fn transform_post(post: WpPost, origin: &SiteOrigin) -> Post {
    let embedded = post.embedded.unwrap_or_default();

    let author = embedded
        .author
        .into_iter()
        .next()
        .map(|author| Author {
            avatar_url: author
                .avatar_urls
                .get(AUTHOR_AVATAR_SIZE)
                .cloned()
                .unwrap_or_default(),
            name: author.name,
            description: author.description,
        })
        .unwrap_or_default();

    let (category_terms, tag_terms) = split_terms(embedded.terms);

    let featured_image = embedded
        .featured_media
        .into_iter()
        .find(|media| !media.source_url.is_empty())
        .map(|media| {
            let (width, height) = media.dimensions();
            FeaturedImage {
                source_url: normalize_wp_url(&media.source_url, origin),
                alt_text: media.alt_text,
                width,
                height,
            }
        });

    Post {
        id: post.id.to_string(),
        database_id: post.id,
        uri: uri_from_link(&post.link),
        title: decode_html_entities(&post.title.rendered),
        excerpt: post.excerpt.rendered,
        content: rewrite_content_origin(&post.content.rendered, origin).into_owned(),
        date: post.date,
        modified: post.modified,
        author,
        categories: category_terms
            .into_iter()
            .map(|term| CategoryRef {
                id: term.id.to_string(),
                name: decode_html_entities(&term.name),
                uri: uri_from_link(&term.link),
                slug: term.slug,
            })
            .collect(),
        tags: tag_terms
            .into_iter()
            .map(|term| TagRef {
                name: decode_html_entities(&term.name),
                slug: term.slug,
            })
            .collect(),
        featured_image,
        slug: post.slug,
    }
}

/// Splits `wp:term` groups into categories and tags.
///
/// The taxonomy field decides when present; otherwise group 0 holds
/// categories and group 1 tags. Other taxonomies are ignored.
fn split_terms(groups: Vec<Vec<EmbeddedTerm>>) -> (Vec<EmbeddedTerm>, Vec<EmbeddedTerm>) {
    let mut categories = Vec::new();
    let mut tags = Vec::new();

    for (index, group) in groups.into_iter().enumerate() {
        for term in group {
            match (term.taxonomy.as_str(), index) {
                ("category", _) | ("", 0) => categories.push(term),
                ("post_tag", _) | ("", 1) => tags.push(term),
                _ => {}
            }
        }
    }

    (categories, tags)
}

pub fn transform_categories(raw: Vec<WpCategory>) -> Vec<Category> {
    let categories = raw
        .into_iter()
        .map(|category| Category {
            id: category.id.to_string(),
            database_id: category.id,
            name: decode_html_entities(&category.name),
            uri: uri_from_link(&category.link),
            description: decode_html_entities(&category.description),
            count: category.count,
            parent_id: category.parent,
            slug: category.slug,
        })
        .collect();
    dedupe_by_slug(categories, ContentKind::Categories)
}

/// Nodes without a slug are other content types the union query matched
/// and are skipped.
pub fn transform_locations(
    raw: Vec<RawLocation>,
    settings: &LocationSettings,
    origin: &SiteOrigin,
) -> Vec<Location> {
    let locations = raw
        .into_iter()
        .filter(|location| !location.node.slug.is_empty())
        .map(|RawLocation { node, content }| Location {
            uri: format!("{}{}/", settings.uri_prefix, node.slug),
            title: decode_html_entities(&node.title),
            content: rewrite_content_origin(&content, origin).into_owned(),
            featured_image: node
                .featured_image
                .and_then(|edge| edge.node)
                .and_then(|image| featured_image_from_graphql(image, origin)),
            id: node.id,
            database_id: node.database_id,
            slug: node.slug,
        })
        .collect();
    dedupe_by_slug(locations, ContentKind::Locations)
}

fn featured_image_from_graphql(image: GraphQlImage, origin: &SiteOrigin) -> Option<FeaturedImage> {
    if image.source_url.is_empty() {
        return None;
    }
    let (width, height) = image
        .media_details
        .map(|details| (details.width, details.height))
        .unwrap_or((0, 0));
    Some(FeaturedImage {
        source_url: normalize_wp_url(&image.source_url, origin),
        alt_text: image.alt_text,
        width,
        height,
    })
}

/// Index of the media library. Items without a file are skipped.
pub fn transform_media(raw: Vec<WpMedia>) -> Vec<MediaItem> {
    let items = raw
        .into_iter()
        .filter_map(|media| {
            let filename = media_filename(&media.source_url)?;
            Some(MediaItem {
                id: media.id,
                local_path: format!("{}{}", MEDIA_PUBLIC_PREFIX, filename),
                filename,
                original_url: media.source_url,
                alt: media.alt_text,
                title: decode_html_entities(&media.title.rendered),
                slug: media.slug,
            })
        })
        .collect();
    dedupe_by_slug(items, ContentKind::Media)
}

fn media_filename(source_url: &str) -> Option<String> {
    let path = uri_from_link(source_url);
    path.rsplit('/')
        .find(|segment| !segment.is_empty())
        .map(str::to_string)
}

/// Keeps the first record for each slug. Records without a slug are kept.
pub fn dedupe_by_slug<T: Slugged>(items: Vec<T>, kind: ContentKind) -> Vec<T> {
    let mut seen = HashSet::with_capacity(items.len());
    let mut kept = Vec::with_capacity(items.len());

    for item in items {
        let slug = item.slug();
        if !slug.is_empty() && !seen.insert(slug.to_string()) {
            log::warn!("Dropping duplicate {} slug '{}'", kind, slug);
            continue;
        }
        kept.push(item);
    }

    kept
}
