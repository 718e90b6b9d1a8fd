//! Cursor pagination against a mock WPGraphQL endpoint.

mod common;

use common::*;
use mockito::{Matcher, Server};
use pretty_assertions::assert_eq;
use serde_json::{json, Map};
use std::time::{Duration, Instant};
use wp_prefetch::api::graphql::{fetch_all_cursor_pages, CursorPagination};
use wp_prefetch::api::queries::locations_query;
use wp_prefetch::api::responses::{ContentNodesData, LocationNode};
use wp_prefetch::{AppError, LocationSettings, RetryPolicy, ValidatedUrl};

fn endpoint(server: &mockito::ServerGuard) -> ValidatedUrl {
    ValidatedUrl::parse(&format!("{}/graphql", server.url())).unwrap()
}

fn pagination() -> CursorPagination {
    CursorPagination {
        retry: RetryPolicy::immediate(5),
        delay: Duration::ZERO,
    }
}

async fn fetch_locations(server: &mockito::ServerGuard) -> Result<Vec<LocationNode>, AppError> {
    fetch_all_cursor_pages(
        &fetcher(),
        &endpoint(server),
        &locations_query(&LocationSettings::default()),
        Map::new(),
        |data: ContentNodesData| data.content_nodes,
        &pagination(),
    )
    .await
}

#[tokio::test]
async fn follows_end_cursor_until_last_page() {
    let mut server = Server::new_async().await;
    let first = mock_graphql_page(
        &mut server,
        None,
        content_nodes(
            vec![location_node(1, "austin"), location_node(2, "dallas")],
            true,
            Some("abc"),
        ),
    )
    .await;
    let second = mock_graphql_page(
        &mut server,
        Some("abc"),
        content_nodes(vec![location_node(3, "houston")], false, None),
    )
    .await;

    let nodes = fetch_locations(&server).await.unwrap();

    let slugs: Vec<&str> = nodes.iter().map(|n| n.slug.as_str()).collect();
    assert_eq!(slugs, vec!["austin", "dallas", "houston"]);
    first.assert_async().await;
    second.assert_async().await;
}

#[tokio::test]
async fn request_carries_query_and_variables() {
    let mut server = Server::new_async().await;
    let only = server
        .mock("POST", "/graphql")
        .match_header("content-type", "application/json")
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex("GetAllLocations".to_string()),
            Matcher::PartialJson(json!({"variables": {"after": null}})),
        ]))
        .with_status(200)
        .with_body(content_nodes(vec![], false, None).to_string())
        .expect(1)
        .create_async()
        .await;

    let nodes = fetch_locations(&server).await.unwrap();

    assert!(nodes.is_empty());
    only.assert_async().await;
}

#[tokio::test]
async fn missing_cursor_stops_instead_of_looping() {
    let mut server = Server::new_async().await;
    let first = mock_graphql_page(
        &mut server,
        None,
        content_nodes(vec![location_node(1, "austin")], true, None),
    )
    .await;

    let nodes = fetch_locations(&server).await.unwrap();

    assert_eq!(nodes.len(), 1);
    first.assert_async().await;
}

#[tokio::test]
async fn graphql_errors_reject_the_fetch() {
    let mut server = Server::new_async().await;
    let failing = server
        .mock("POST", "/graphql")
        .with_status(200)
        .with_body(
            json!({
                "data": null,
                "errors": [{"message": "Cannot query field \"databaseId\" on type \"ABATherapy\""}]
            })
            .to_string(),
        )
        .expect(1)
        .create_async()
        .await;

    match fetch_locations(&server).await {
        Err(AppError::GraphQl { messages }) => {
            assert_eq!(messages.len(), 1);
            assert!(messages[0].0.contains("databaseId"));
        }
        other => panic!("expected GraphQl error, got {:?}", other),
    }
    failing.assert_async().await;
}

#[tokio::test]
async fn server_errors_are_retried_up_to_the_budget() {
    let mut server = Server::new_async().await;
    let failing = server
        .mock("POST", "/graphql")
        .with_status(502)
        .with_body("Bad Gateway")
        .expect(5)
        .create_async()
        .await;

    match fetch_locations(&server).await {
        Err(AppError::RetriesExhausted { attempts, .. }) => assert_eq!(attempts, 5),
        other => panic!("expected RetriesExhausted, got {:?}", other),
    }
    failing.assert_async().await;
}

#[tokio::test]
async fn client_rejection_is_terminal() {
    let mut server = Server::new_async().await;
    let rejected = server
        .mock("POST", "/graphql")
        .with_status(403)
        .with_body("Forbidden")
        .expect(1)
        .create_async()
        .await;

    assert!(matches!(
        fetch_locations(&server).await,
        Err(AppError::ClientStatus { .. })
    ));
    rejected.assert_async().await;
}

#[tokio::test]
async fn repeated_cursor_stops_instead_of_looping() {
    let mut server = Server::new_async().await;
    let first = mock_graphql_page(
        &mut server,
        None,
        content_nodes(vec![location_node(1, "austin")], true, Some("abc")),
    )
    .await;
    let stuck = mock_graphql_page(
        &mut server,
        Some("abc"),
        content_nodes(vec![location_node(2, "dallas")], true, Some("abc")),
    )
    .await;

    let nodes = fetch_locations(&server).await.unwrap();

    assert_eq!(nodes.len(), 2);
    first.assert_async().await;
    stuck.assert_async().await;
}

async fn fetch_locations_with_delay(
    server: &mockito::ServerGuard,
    delay: Duration,
) -> Result<Vec<LocationNode>, AppError> {
    fetch_all_cursor_pages(
        &fetcher(),
        &endpoint(server),
        &locations_query(&LocationSettings::default()),
        Map::new(),
        |data: ContentNodesData| data.content_nodes,
        &CursorPagination {
            delay,
            ..pagination()
        },
    )
    .await
}

#[tokio::test]
async fn pauses_between_cursor_pages() {
    let mut server = Server::new_async().await;
    let _first = mock_graphql_page(
        &mut server,
        None,
        content_nodes(vec![location_node(1, "austin")], true, Some("a")),
    )
    .await;
    let _second = mock_graphql_page(
        &mut server,
        Some("a"),
        content_nodes(vec![location_node(2, "dallas")], true, Some("b")),
    )
    .await;
    let _third = mock_graphql_page(
        &mut server,
        Some("b"),
        content_nodes(vec![location_node(3, "houston")], false, None),
    )
    .await;
    let delay = Duration::from_millis(150);

    let started = Instant::now();
    let nodes = fetch_locations_with_delay(&server, delay).await.unwrap();

    assert_eq!(nodes.len(), 3);
    assert!(
        started.elapsed() >= delay * 2,
        "three cursor pages took only {:?}",
        started.elapsed()
    );
}

#[tokio::test]
async fn single_cursor_page_never_pauses() {
    let mut server = Server::new_async().await;
    let _only = mock_graphql_page(
        &mut server,
        None,
        content_nodes(vec![location_node(1, "austin")], false, None),
    )
    .await;

    let nodes = tokio::time::timeout(
        Duration::from_secs(10),
        fetch_locations_with_delay(&server, Duration::from_secs(60)),
    )
    .await
    .expect("a single cursor page should not wait for the page delay")
    .unwrap();

    assert_eq!(nodes.len(), 1);
}
