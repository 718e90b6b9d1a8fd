// src/transform/urls.rs
//! Site-relative URL handling.
//!
//! The CMS hands back absolute links on its own origin; the static site
//! wants root-relative paths. Everything here is pure and idempotent:
//! feeding a result back in returns it unchanged.

use crate::constants::{LOCATION_SECTION_EN, LOCATION_SECTION_ES};
use crate::types::{Locale, SiteOrigin};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::borrow::Cow;
use url::Url;

/// `src`, `srcset` and their lazy-loading `data-` variants, with either
/// quote style. Group 1 is everything up to the opening quote.
static IMAGE_ATTRIBUTE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)(\b(?:src|srcset)\s*=\s*)(?:"([^"]*)"|'([^']*)')"#)
        .expect("image attribute pattern is valid")
});

/// Path component of a permalink, `/` if it has none.
///
/// Relative input is returned without its query or fragment.
pub fn uri_from_link(link: &str) -> String {
    let link = link.trim();
    match Url::parse(link) {
        Ok(url) => {
            let path = url.path();
            if path.is_empty() {
                "/".to_string()
            } else {
                path.to_string()
            }
        }
        Err(_) if link.starts_with('/') => link
            .split(['?', '#'])
            .next()
            .filter(|path| !path.is_empty())
            .unwrap_or("/")
            .to_string(),
        Err(_) => "/".to_string(),
    }
}

/// Rewrites an absolute URL on the site origin to a root-relative one.
///
/// Foreign URLs and already-relative ones pass through untouched. The
/// bare origin becomes `/`.
pub fn normalize_wp_url(url: &str, origin: &SiteOrigin) -> String {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    match origin.strip(trimmed) {
        Some("") => "/".to_string(),
        Some(rest) if rest.starts_with('/') => rest.to_string(),
        Some(rest) => format!("/{}", rest),
        None => trimmed.to_string(),
    }
}

/// Rewrites same-origin image sources inside rendered HTML.
///
/// Only `src`/`srcset` attribute values are touched; link targets and
/// text are left as the editor wrote them.
pub fn rewrite_content_origin<'a>(html: &'a str, origin: &SiteOrigin) -> Cow<'a, str> {
    if !html.contains(origin.host()) {
        return Cow::Borrowed(html);
    }

    IMAGE_ATTRIBUTE.replace_all(html, |caps: &Captures<'_>| {
        let prefix = &caps[1];
        let is_srcset = prefix.to_ascii_lowercase().contains("srcset");
        let (quote, value) = match (caps.get(2), caps.get(3)) {
            (Some(value), _) => ('"', value.as_str()),
            (None, Some(value)) => ('\'', value.as_str()),
            (None, None) => ('"', ""),
        };

        let rewritten = if is_srcset {
            value
                .split(',')
                .map(|candidate| rewrite_candidate(candidate, origin))
                .collect::<Vec<_>>()
                .join(",")
        } else {
            rewrite_candidate(value, origin)
        };

        format!("{}{}{}{}", prefix, quote, rewritten, quote)
    })
}

/// One `url [descriptor]` entry, keeping its surrounding whitespace.
fn rewrite_candidate(candidate: &str, origin: &SiteOrigin) -> String {
    let leading = &candidate[..candidate.len() - candidate.trim_start().len()];
    let body = candidate.trim_start();
    let (url, rest) = match body.find(char::is_whitespace) {
        Some(split) => body.split_at(split),
        None => (body, ""),
    };
    if origin.strip(url).is_none() {
        return candidate.to_string();
    }
    format!("{}{}{}", leading, normalize_wp_url(url, origin), rest)
}

/// Whether `url` leaves the site. Relative URLs and fragments stay.
pub fn is_external_url(url: &str, origin: &SiteOrigin) -> bool {
    let url = url.trim();
    if url.starts_with("//") {
        return url
            .trim_start_matches('/')
            .split(['/', '?', '#'])
            .next()
            .map_or(true, |host| host != origin.host());
    }
    if url.starts_with("http://") || url.starts_with("https://") {
        return origin.strip(url).is_none();
    }
    url.starts_with("mailto:") || url.starts_with("tel:")
}

/// Last non-empty segment of a root-relative path.
pub fn slug_from_uri(uri: &str) -> &str {
    uri.split(['?', '#'])
        .next()
        .unwrap_or_default()
        .rsplit('/')
        .find(|segment| !segment.is_empty())
        .unwrap_or_default()
}

/// Locale a root-relative path belongs to.
pub fn locale_from_path(path: &str) -> Locale {
    let first = path.trim_start_matches('/').split('/').next().unwrap_or_default();
    if first.eq_ignore_ascii_case(Locale::Es.code()) {
        Locale::Es
    } else {
        Locale::En
    }
}

/// Public path of a page. An empty slug is the home page.
pub fn page_url(slug: &str, locale: Locale) -> String {
    let slug = slug.trim_matches('/');
    if slug.is_empty() {
        return format!("{}/", locale.path_prefix());
    }
    format!("{}/{}/", locale.path_prefix(), slug)
}

/// Public path of a blog post.
pub fn post_url(slug: &str, locale: Locale) -> String {
    format!("{}/blog/{}/", locale.path_prefix(), slug.trim_matches('/'))
}

/// Public path of a category archive.
pub fn category_url(slug: &str, locale: Locale) -> String {
    format!("{}/category/{}/", locale.path_prefix(), slug.trim_matches('/'))
}

/// Public path of a location page; the section name is translated.
pub fn location_url(slug: &str, locale: Locale) -> String {
    let section = match locale {
        Locale::En => LOCATION_SECTION_EN,
        Locale::Es => LOCATION_SECTION_ES,
    };
    format!("{}{}{}/", locale.path_prefix(), section, slug.trim_matches('/'))
}

/// Absolute URL of a root-relative path on the public site.
pub fn canonical_url(path: &str, origin: &SiteOrigin) -> String {
    let path = normalize_wp_url(path, origin);
    if path.starts_with("http://") || path.starts_with("https://") {
        return path;
    }
    if path.starts_with('/') {
        format!("{}{}", origin.as_str(), path)
    } else {
        format!("{}/{}", origin.as_str(), path)
    }
}

/// The same page in `target`, swapping the locale prefix of `path`.
///
/// Translated location sections are swapped too.
pub fn alternate_url(path: &str, target: Locale) -> String {
    let current = locale_from_path(path);
    let unprefixed = match current {
        Locale::En => path,
        Locale::Es => {
            let stripped = &path[Locale::Es.path_prefix().len().min(path.len())..];
            if stripped.is_empty() {
                "/"
            } else {
                stripped
            }
        }
    };

    let (from, to) = match (current, target) {
        (Locale::En, Locale::Es) => (LOCATION_SECTION_EN, LOCATION_SECTION_ES),
        (Locale::Es, Locale::En) => (LOCATION_SECTION_ES, LOCATION_SECTION_EN),
        _ => ("", ""),
    };
    let body = match unprefixed.strip_prefix(from) {
        Some(rest) if !from.is_empty() => format!("{}{}", to, rest),
        _ => unprefixed.to_string(),
    };

    format!("{}{}", target.path_prefix(), body)
}
