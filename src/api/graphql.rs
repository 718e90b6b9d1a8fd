// src/api/graphql.rs
//! Cursor pagination over WPGraphQL connections.

use super::fetcher::Fetcher;
use super::responses::Connection;
use crate::error::AppError;
use crate::error_recovery::RetryPolicy;
use crate::types::ValidatedUrl;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::time::Duration;

/// How a GraphQL connection is walked.
#[derive(Debug, Clone, Copy)]
pub struct CursorPagination {
    pub retry: RetryPolicy,
    /// Pause between consecutive cursor pages.
    pub delay: Duration,
}

/// Fetches every page of a connection.
///
/// `variables` are sent with every request; `after` is added, `null` on
/// the first request and the previous `endCursor` afterwards. `select`
/// picks the connection out of the response `data`; a missing connection
/// counts as an empty final page. A page claiming more results without a
/// new cursor ends the walk.
pub async fn fetch_all_cursor_pages<D, N, F>(
    fetcher: &Fetcher,
    endpoint: &ValidatedUrl,
    query: &str,
    variables: Map<String, Value>,
    select: F,
    pagination: &CursorPagination,
) -> Result<Vec<N>, AppError>
where
    D: DeserializeOwned,
    F: Fn(D) -> Option<Connection<N>>,
{
    let mut all_nodes = Vec::new();
    let mut after: Option<String> = None;
    let mut pages_fetched = 0u32;

    loop {
        if pages_fetched > 0 && !pagination.delay.is_zero() {
            tokio::time::sleep(pagination.delay).await;
        }

        let mut request_vars = variables.clone();
        request_vars.insert(
            "after".to_string(),
            after.clone().map(Value::String).unwrap_or(Value::Null),
        );
        let request_vars = Value::Object(request_vars);

        let data: D = fetcher
            .graphql(endpoint.as_str(), query, &request_vars, &pagination.retry)
            .await?;
        pages_fetched += 1;

        let Some(connection) = select(data) else {
            log::warn!("GraphQL response had no connection on page {}", pages_fetched);
            break;
        };

        let count = connection.nodes.len();
        all_nodes.extend(connection.nodes);
        log::info!(
            "  Batch {}: {} nodes (total: {})",
            pages_fetched,
            count,
            all_nodes.len()
        );

        if !connection.page_info.has_next_page {
            break;
        }
        match connection.page_info.end_cursor {
            Some(cursor) if after.as_deref() == Some(cursor.as_str()) => {
                log::warn!(
                    "endCursor {} repeated the previous cursor; stopping pagination",
                    cursor
                );
                break;
            }
            Some(cursor) => after = Some(cursor),
            None => {
                log::warn!("hasNextPage was true without an endCursor; stopping pagination");
                break;
            }
        }
    }

    Ok(all_nodes)
}
