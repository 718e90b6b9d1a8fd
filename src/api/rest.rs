// src/api/rest.rs
//! Page-number pagination over the WordPress REST API.

use super::fetcher::Fetcher;
use super::parser::parse_json;
use crate::constants::WP_API_PAGE_SIZE;
use crate::error::{AppError, HttpErrorClass};
use crate::error_recovery::RetryPolicy;
use crate::types::ValidatedUrl;
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

/// How a REST listing is walked.
#[derive(Debug, Clone, Copy)]
pub struct RestPagination {
    pub retry: RetryPolicy,
    /// Pause between consecutive page requests.
    pub delay: Duration,
    /// Safety cap on the number of pages requested.
    pub max_pages: Option<u32>,
}

/// A REST collection route plus its fixed query parameters.
#[derive(Debug, Clone)]
pub struct RestQuery {
    route: String,
    params: Vec<(String, String)>,
}

impl RestQuery {
    pub fn new(route: impl Into<String>) -> Self {
        Self {
            route: route.into(),
            params: Vec::new(),
        }
    }

    pub fn param(mut self, key: &str, value: &str) -> Self {
        self.params.push((key.to_string(), value.to_string()));
        self
    }

    /// Flag-style parameter such as `_embed`.
    pub fn flag(self, key: &str) -> Self {
        self.param(key, "")
    }

    pub fn route(&self) -> &str {
        &self.route
    }

    /// Absolute URL of this route with the fixed parameters.
    pub fn url(&self, base: &ValidatedUrl) -> Result<Url, AppError> {
        let joined = base.join_path(&self.route);
        let mut url = Url::parse(&joined).map_err(|e| AppError::MissingConfiguration(format!(
            "cannot build REST URL {}: {}",
            joined, e
        )))?;
        if !self.params.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in &self.params {
                if value.is_empty() {
                    pairs.append_key_only(key);
                } else {
                    pairs.append_pair(key, value);
                }
            }
        }
        Ok(url)
    }

    /// Absolute URL of the given 1-based page.
    pub fn page_url(&self, base: &ValidatedUrl, page: u32) -> Result<String, AppError> {
        let mut url = self.url(base)?;
        url.query_pairs_mut()
            .append_pair("page", &page.to_string())
            .append_pair("per_page", &WP_API_PAGE_SIZE.to_string());
        Ok(url.to_string())
    }
}

/// Fetches every page of a REST collection.
///
/// Stops on an empty page, when the page number reaches
/// `X-WP-TotalPages` (1 when the header is missing), or when a page after
/// the first answers 400. Any other non-success status is an error.
pub async fn fetch_all_pages<T>(
    fetcher: &Fetcher,
    base: &ValidatedUrl,
    query: &RestQuery,
    pagination: &RestPagination,
) -> Result<Vec<T>, AppError>
where
    T: DeserializeOwned,
{
    let mut all_items = Vec::new();
    let mut page = 1u32;

    loop {
        if let Some(max) = pagination.max_pages {
            if page > max {
                log::debug!("Reached maximum page limit: {}", max);
                break;
            }
        }
        if page > 1 && !pagination.delay.is_zero() {
            tokio::time::sleep(pagination.delay).await;
        }

        let url = query.page_url(base, page)?;
        let response = fetcher.get(&url, &pagination.retry).await?;

        if !response.status.is_success() {
            match HttpErrorClass::classify(response.status, Some(page)) {
                HttpErrorClass::EndOfRange => {
                    log::debug!(
                        "{} answered {} for page {}, treating as end of results",
                        query.route(),
                        response.status,
                        page
                    );
                    break;
                }
                _ => {
                    return Err(AppError::ClientStatus {
                        status: response.status,
                        url: response.url,
                    })
                }
            }
        }

        let items: Vec<T> = parse_json(&response)?;
        if items.is_empty() {
            break;
        }

        let count = items.len();
        all_items.extend(items);
        log::info!(
            "  {} page {}: {} items (total: {})",
            query.route(),
            page,
            count,
            all_items.len()
        );

        let total_pages = response.total_pages.unwrap_or(1);
        if page >= total_pages {
            break;
        }
        page += 1;
    }

    Ok(all_items)
}

/// Fetches a single REST resource. A 4xx means the resource is absent and
/// yields `Ok(None)`.
pub async fn fetch_one<T>(
    fetcher: &Fetcher,
    url: &str,
    retry: &RetryPolicy,
) -> Result<Option<T>, AppError>
where
    T: DeserializeOwned,
{
    let response = fetcher.get(url, retry).await?;
    if !response.status.is_success() {
        log::debug!("{} answered {}, treating as absent", url, response.status);
        return Ok(None);
    }
    parse_json(&response).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_url_carries_fixed_params_then_paging() {
        let base = ValidatedUrl::parse("https://example.com/wp-json/wp/v2").unwrap();
        let query = RestQuery::new("posts").flag("_embed");
        assert_eq!(
            query.page_url(&base, 2).unwrap(),
            "https://example.com/wp-json/wp/v2/posts?_embed&page=2&per_page=100"
        );
    }

    #[test]
    fn url_encodes_param_values() {
        let base = ValidatedUrl::parse("https://example.com/wp-json/wp/v2").unwrap();
        let query = RestQuery::new("pages").param("_fields", "id,slug");
        assert_eq!(
            query.url(&base).unwrap().as_str(),
            "https://example.com/wp-json/wp/v2/pages?_fields=id%2Cslug"
        );
    }
}
