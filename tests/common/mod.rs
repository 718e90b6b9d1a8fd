//! Fixtures and mock-server helpers shared by the integration tests.

#![allow(dead_code)]

use mockito::{Matcher, Mock, ServerGuard};
use serde_json::{json, Value};
use std::time::Duration;
use wp_prefetch::{Fetcher, PipelineConfig, WpHttpClient};

/// Origin the fixtures' links point at.
pub const ORIGIN: &str = "https://example.com";

pub const REST_PREFIX: &str = "/wp-json/wp/v2";

pub fn fetcher() -> Fetcher {
    Fetcher::new(WpHttpClient::new(Duration::from_secs(5)).expect("client should build"))
}

/// Configuration aimed at `server`, with every delay disabled.
pub fn config_for(server: &ServerGuard) -> PipelineConfig {
    PipelineConfig::for_endpoint(&server.url(), ORIGIN).expect("mock config should be valid")
}

pub fn rest_path(route: &str) -> String {
    format!("{}/{}", REST_PREFIX, route)
}

/// Mocks page `page` of a REST listing.
pub async fn mock_rest_page(
    server: &mut ServerGuard,
    route: &str,
    page: u32,
    total_pages: Option<u32>,
    body: Value,
) -> Mock {
    let mut mock = server
        .mock("GET", rest_path(route).as_str())
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("page".into(), page.to_string()),
            Matcher::UrlEncoded("per_page".into(), "100".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json");
    if let Some(total) = total_pages {
        mock = mock.with_header("X-WP-TotalPages", &total.to_string());
    }
    mock.with_body(body.to_string()).expect(1).create_async().await
}

/// Mocks a non-success answer for page `page` of a REST listing.
pub async fn mock_rest_status(
    server: &mut ServerGuard,
    route: &str,
    page: u32,
    status: usize,
    hits: usize,
) -> Mock {
    server
        .mock("GET", rest_path(route).as_str())
        .match_query(Matcher::UrlEncoded("page".into(), page.to_string()))
        .with_status(status)
        .with_header("content-type", "application/json")
        .with_body(r#"{"code":"rest_error","message":"nope","data":{"status":0}}"#)
        .expect(hits)
        .create_async()
        .await
}

/// `count` minimal category records with ids starting at `first_id`.
pub fn categories(first_id: u64, count: u64) -> Value {
    Value::Array(
        (first_id..first_id + count)
            .map(|id| {
                json!({
                    "id": id,
                    "name": format!("Category {}", id),
                    "slug": format!("category-{}", id),
                    "link": format!("{}/category/category-{}/", ORIGIN, id),
                    "description": "",
                    "count": 1,
                    "parent": 0
                })
            })
            .collect(),
    )
}

pub fn post(id: u64, slug: &str, title: &str) -> Value {
    json!({
        "id": id,
        "slug": slug,
        "link": format!("{}/{}/", ORIGIN, slug),
        "title": {"rendered": title},
        "content": {"rendered": format!(r#"<p>Body</p><img src="{}/wp-content/uploads/{}.jpg">"#, ORIGIN, slug)},
        "excerpt": {"rendered": "<p>Short</p>"},
        "date": "2024-12-24T23:22:13",
        "modified": "2024-12-25T10:00:00",
        "categories": [8],
        "tags": [],
        "_embedded": {
            "author": [{
                "name": "Ana Pérez",
                "description": "BCBA",
                "avatar_urls": {"24": "https://secure.gravatar.com/a?s=24", "96": "https://secure.gravatar.com/a?s=96"}
            }],
            "wp:term": [
                [{"id": 8, "name": "Health &amp; Care", "slug": "health-and-care", "link": format!("{}/category/health-and-care/", ORIGIN), "taxonomy": "category"}],
                []
            ],
            "wp:featuredmedia": [{
                "source_url": format!("{}/wp-content/uploads/{}-hero.jpg", ORIGIN, slug),
                "alt_text": "Hero",
                "media_details": {"width": 1200, "height": 800}
            }]
        }
    })
}

pub fn page(id: u64, slug: &str, parent: u64) -> Value {
    json!({
        "id": id,
        "slug": slug,
        "link": format!("{}/{}/", ORIGIN, slug),
        "title": {"rendered": format!("Page {}", slug)},
        "content": {"rendered": "<p>Page</p>"},
        "excerpt": {"rendered": ""},
        "date": "2024-01-01T00:00:00",
        "modified": "2024-01-02T00:00:00",
        "featured_media": 0,
        "parent": parent
    })
}

pub fn location_node(database_id: u64, slug: &str) -> Value {
    json!({
        "id": format!("cG9zdDo{}", database_id),
        "databaseId": database_id,
        "slug": slug,
        "title": format!("ABA Therapy in {}", slug),
        "featuredImage": null
    })
}

/// A `contentNodes` GraphQL page.
pub fn content_nodes(nodes: Vec<Value>, has_next_page: bool, end_cursor: Option<&str>) -> Value {
    json!({
        "data": {
            "contentNodes": {
                "pageInfo": {"hasNextPage": has_next_page, "endCursor": end_cursor},
                "nodes": nodes
            }
        }
    })
}

/// Mocks the GraphQL answer to the request whose `after` variable is `after`.
pub async fn mock_graphql_page(server: &mut ServerGuard, after: Option<&str>, body: Value) -> Mock {
    server
        .mock("POST", "/graphql")
        .match_body(Matcher::PartialJson(json!({"variables": {"after": after}})))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
        .expect(1)
        .create_async()
        .await
}

/// Mocks `/{post-type}/{id}?_fields=content`.
pub async fn mock_location_content(
    server: &mut ServerGuard,
    database_id: u64,
    status: usize,
    html: &str,
) -> Mock {
    server
        .mock("GET", rest_path(&format!("aba-therapy/{}", database_id)).as_str())
        .match_query(Matcher::UrlEncoded("_fields".into(), "content".into()))
        .with_status(status)
        .with_header("content-type", "application/json")
        .with_body(json!({"content": {"rendered": html}}).to_string())
        .expect(1)
        .create_async()
        .await
}
