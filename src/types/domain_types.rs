// src/types/domain_types.rs
//! Domain-specific newtypes for type safety and validation.

use super::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

/// Validated absolute HTTP(S) URL, used for API endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedUrl(Url);

impl ValidatedUrl {
    /// Create a new validated URL
    pub fn parse(url: &str) -> Result<Self, ValidationError> {
        match Url::parse(url) {
            Ok(parsed_url) => {
                if parsed_url.scheme() != "http" && parsed_url.scheme() != "https" {
                    return Err(ValidationError::InvalidUrl {
                        url: url.to_string(),
                        reason: "Only HTTP and HTTPS URLs are supported".to_string(),
                    });
                }
                Ok(Self(parsed_url))
            }
            Err(e) => Err(ValidationError::InvalidUrl {
                url: url.to_string(),
                reason: e.to_string(),
            }),
        }
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn as_url(&self) -> &Url {
        &self.0
    }

    /// Appends a path below this URL without a doubled or missing slash.
    pub fn join_path(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.0.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

impl fmt::Display for ValidatedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The public origin of the WordPress site, e.g. `https://example.com`.
///
/// Links returned by the CMS carry this origin; the snapshot stores paths
/// relative to it. Only scheme, host and port are kept; the scheme is
/// ignored when stripping so `http://` and `https://` links both match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteOrigin {
    host: String,
    https: String,
    http: String,
}

impl SiteOrigin {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let url = ValidatedUrl::parse(input.trim())?;
        let parsed = url.as_url();
        let host = match (parsed.host_str(), parsed.port()) {
            (Some(host), Some(port)) => format!("{}:{}", host, port),
            (Some(host), None) => host.to_string(),
            (None, _) => return Err(ValidationError::EmptyField("site host")),
        };

        Ok(Self {
            https: format!("https://{}", host),
            http: format!("http://{}", host),
            host,
        })
    }

    /// Host (and port, when explicit) of the site.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Canonical `https://host` form.
    pub fn as_str(&self) -> &str {
        &self.https
    }

    /// Removes a leading `http(s)://host` from `url`, once.
    ///
    /// Returns `None` when `url` does not start with this origin. A match
    /// must end at a path, query or fragment boundary so that
    /// `https://example.com.evil` is not treated as local.
    pub fn strip<'a>(&self, url: &'a str) -> Option<&'a str> {
        let rest = url
            .strip_prefix(self.https.as_str())
            .or_else(|| url.strip_prefix(self.http.as_str()))?;
        match rest.chars().next() {
            None | Some('/') | Some('?') | Some('#') => Some(rest),
            Some(_) => None,
        }
    }
}

impl fmt::Display for SiteOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.https)
    }
}

/// A WordPress custom post type slug as used in REST routes (`aba-therapy`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostType(String);

impl PostType {
    pub fn new(name: impl Into<String>) -> Result<Self, ValidationError> {
        let name = name.into();

        if name.is_empty() {
            return Err(ValidationError::InvalidPostType {
                name,
                reason: "Post type cannot be empty".to_string(),
            });
        }

        if !name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_')
        {
            return Err(ValidationError::InvalidPostType {
                name,
                reason: "Post type can only contain lowercase letters, digits, hyphens and underscores"
                    .to_string(),
            });
        }

        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The WPGraphQL `ContentTypeEnum` value for this post type
    /// (`aba-therapy` → `ABA_THERAPY`).
    pub fn graphql_enum(&self) -> String {
        self.0.replace('-', "_").to_ascii_uppercase()
    }
}

impl fmt::Display for PostType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
