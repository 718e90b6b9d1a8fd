// src/api/wordpress.rs
//! [`ContentRepository`] backed by a live WordPress site.

use super::client::WpHttpClient;
use super::fetcher::Fetcher;
use super::graphql::{fetch_all_cursor_pages, CursorPagination};
use super::queries::locations_query;
use super::responses::{
    ContentNodesData, ContentOnly, LocationNode, RawLocation, WpCategory, WpMedia, WpPage,
    WpPost,
};
use super::rest::{fetch_all_pages, fetch_one, RestPagination, RestQuery};
use super::ContentRepository;
use crate::config::{FetchPolicy, LocationSettings, PipelineConfig};
use crate::error::AppError;
use crate::types::ValidatedUrl;
use serde_json::Map;

const PAGE_FIELDS: &str = "id,slug,link,title,content,excerpt,date,modified,featured_media,parent";

/// Talks to the REST and GraphQL endpoints of one site.
#[derive(Clone)]
pub struct WordPressClient {
    fetcher: Fetcher,
    rest_base: ValidatedUrl,
    graphql_url: ValidatedUrl,
    location: LocationSettings,
    policy: FetchPolicy,
    max_pages: Option<u32>,
    fallback_page_ids: Vec<u64>,
}

impl WordPressClient {
    pub fn new(config: &PipelineConfig) -> Result<Self, AppError> {
        let http = WpHttpClient::new(config.request_timeout)?;
        Ok(Self {
            fetcher: Fetcher::new(http),
            rest_base: config.rest_base.clone(),
            graphql_url: config.graphql_url.clone(),
            location: config.location.clone(),
            policy: config.policy,
            max_pages: config.max_pages,
            fallback_page_ids: config.fallback_page_ids.clone(),
        })
    }

    fn listing(&self) -> RestPagination {
        RestPagination {
            retry: self.policy.rest_list,
            delay: self.policy.throttle.rest_page,
            max_pages: self.max_pages,
        }
    }

    async fn pause_between_items(&self) {
        if !self.policy.throttle.item.is_zero() {
            tokio::time::sleep(self.policy.throttle.item).await;
        }
    }

    /// Fetches the configured page ids one at a time, skipping failures.
    async fn fetch_pages_individually(&self) -> Vec<WpPage> {
        let mut pages = Vec::new();

        for (index, id) in self.fallback_page_ids.iter().enumerate() {
            if index > 0 {
                self.pause_between_items().await;
            }
            let url = RestQuery::new(format!("pages/{}", id))
                .param("_fields", PAGE_FIELDS)
                .url(&self.rest_base);
            let result = match url {
                Ok(url) => {
                    fetch_one::<WpPage>(&self.fetcher, url.as_str(), &self.policy.rest_single)
                        .await
                }
                Err(e) => Err(e),
            };
            match result {
                Ok(Some(page)) => {
                    log::info!("  Fetched page {}: {}", id, page.slug);
                    pages.push(page);
                }
                Ok(None) => log::warn!("  Page {} not found", id),
                Err(e) => log::warn!("  Could not fetch page {}: {}", id, e),
            }
        }

        pages
    }

    /// Fills in each location's rendered body from REST. A failure leaves
    /// that body empty.
    ///
    /// Bodies are the bulk of a location record, so they get the listing
    /// retry budget rather than the single-resource one.
    async fn attach_location_content(&self, nodes: Vec<LocationNode>) -> Vec<RawLocation> {
        let total = nodes.len();
        let mut locations = Vec::with_capacity(total);

        for (index, node) in nodes.into_iter().enumerate() {
            let mut content = String::new();

            if node.database_id > 0 {
                if index > 0 {
                    self.pause_between_items().await;
                }
                let url = RestQuery::new(format!(
                    "{}/{}",
                    self.location.post_type, node.database_id
                ))
                .param("_fields", "content")
                .url(&self.rest_base);
                let result = match url {
                    Ok(url) => {
                        fetch_one::<ContentOnly>(
                            &self.fetcher,
                            url.as_str(),
                            &self.policy.rest_list,
                        )
                        .await
                    }
                    Err(e) => Err(e),
                };
                match result {
                    Ok(Some(body)) => content = body.content.rendered,
                    Ok(None) => log::warn!("  No content for location {}", node.slug),
                    Err(e) => log::warn!(
                        "  Could not fetch content for location {}: {}",
                        node.slug,
                        e
                    ),
                }
            }

            locations.push(RawLocation { node, content });
            if (index + 1) % 10 == 0 {
                log::info!("  Content fetched for {}/{} locations", index + 1, total);
            }
        }

        locations
    }
}

#[async_trait::async_trait]
impl ContentRepository for WordPressClient {
    async fn fetch_categories(&self) -> Result<Vec<WpCategory>, AppError> {
        let query = RestQuery::new("categories").param("hide_empty", "true");
        fetch_all_pages(&self.fetcher, &self.rest_base, &query, &self.listing()).await
    }

    async fn fetch_posts(&self) -> Result<Vec<WpPost>, AppError> {
        let query = RestQuery::new("posts").flag("_embed");
        fetch_all_pages(&self.fetcher, &self.rest_base, &query, &self.listing()).await
    }

    async fn fetch_pages(&self) -> Result<Vec<WpPage>, AppError> {
        let query = RestQuery::new("pages").param("_fields", PAGE_FIELDS);
        match fetch_all_pages(&self.fetcher, &self.rest_base, &query, &self.listing()).await {
            Ok(pages) => Ok(pages),
            Err(e) if !self.fallback_page_ids.is_empty() => {
                log::warn!(
                    "Bulk page listing failed ({}), fetching {} pages individually",
                    e,
                    self.fallback_page_ids.len()
                );
                Ok(self.fetch_pages_individually().await)
            }
            Err(e) => Err(e),
        }
    }

    async fn fetch_locations(&self) -> Result<Vec<RawLocation>, AppError> {
        let pagination = CursorPagination {
            retry: self.policy.graphql,
            delay: self.policy.throttle.graphql_page,
        };
        let nodes = fetch_all_cursor_pages(
            &self.fetcher,
            &self.graphql_url,
            &locations_query(&self.location),
            Map::new(),
            |data: ContentNodesData| data.content_nodes,
            &pagination,
        )
        .await?;

        log::info!("  Fetching content for {} locations...", nodes.len());
        Ok(self.attach_location_content(nodes).await)
    }

    async fn fetch_media(&self) -> Result<Vec<WpMedia>, AppError> {
        let query = RestQuery::new("media");
        fetch_all_pages(&self.fetcher, &self.rest_base, &query, &self.listing()).await
    }

    async fn fetch_media_file(&self, url: &str) -> Result<Vec<u8>, AppError> {
        self.fetcher.get_bytes(url, &self.policy.rest_single).await
    }
}
