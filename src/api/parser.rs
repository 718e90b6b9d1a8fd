// src/api/parser.rs
//! Turns raw response text into typed values or classified errors.

use super::client::ApiResponse;
use super::responses::GraphQlEnvelope;
use crate::constants::ERROR_BODY_PREVIEW_LENGTH;
use crate::error::{AppError, GraphQlMessage};
use serde::de::DeserializeOwned;

/// Parses a successful JSON body.
pub fn parse_json<T>(result: &ApiResponse<String>) -> Result<T, AppError>
where
    T: DeserializeOwned,
{
    serde_json::from_str(&result.data).map_err(|e| {
        log::error!("Failed to parse response from {}: {}", result.url, e);
        AppError::MalformedResponse {
            url: result.url.clone(),
            reason: format!("{} (body: {})", e, preview(&result.data)),
        }
    })
}

/// Unwraps a GraphQL envelope.
///
/// An `errors` array fails the request even when partial `data` came
/// back; a missing `data` without errors is a malformed response.
pub fn parse_graphql<T>(result: &ApiResponse<String>) -> Result<T, AppError>
where
    T: DeserializeOwned,
{
    let envelope: GraphQlEnvelope<T> = parse_json(result)?;

    if let Some(errors) = envelope.errors.filter(|e| !e.is_empty()) {
        let messages: Vec<GraphQlMessage> = errors
            .into_iter()
            .map(|e| GraphQlMessage(e.message))
            .collect();
        log::error!(
            "GraphQL errors from {}: {}",
            result.url,
            messages
                .iter()
                .map(|m| m.0.as_str())
                .collect::<Vec<_>>()
                .join("; ")
        );
        return Err(AppError::GraphQl { messages });
    }

    envelope.data.ok_or_else(|| AppError::MalformedResponse {
        url: result.url.clone(),
        reason: "GraphQL response carried neither data nor errors".to_string(),
    })
}

fn preview(body: &str) -> String {
    if body.chars().count() > ERROR_BODY_PREVIEW_LENGTH {
        let head: String = body.chars().take(ERROR_BODY_PREVIEW_LENGTH).collect();
        format!("{}...", head)
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;
    use serde::Deserialize;

    fn response(body: &str) -> ApiResponse<String> {
        ApiResponse {
            data: body.to_string(),
            status: StatusCode::OK,
            url: "https://example.com/graphql".to_string(),
            total_pages: None,
        }
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct Data {
        value: u32,
    }

    #[test]
    fn graphql_data_is_unwrapped() {
        let data: Data = parse_graphql(&response(r#"{"data": {"value": 7}}"#)).unwrap();
        assert_eq!(data, Data { value: 7 });
    }

    #[test]
    fn graphql_errors_fail_the_request() {
        let result: Result<Data, _> = parse_graphql(&response(
            r#"{"data": null, "errors": [{"message": "Cannot query field \"foo\""}]}"#,
        ));
        match result {
            Err(AppError::GraphQl { messages }) => {
                assert_eq!(messages[0].0, "Cannot query field \"foo\"");
            }
            other => panic!("expected GraphQl error, got {:?}", other),
        }
    }

    #[test]
    fn malformed_body_previews_content() {
        let body = format!("<html>{}</html>", "x".repeat(500));
        let result: Result<Data, _> = parse_json(&response(&body));
        match result {
            Err(AppError::MalformedResponse { reason, .. }) => {
                assert!(reason.contains("<html>"));
                assert!(reason.len() < body.len());
            }
            other => panic!("expected MalformedResponse, got {:?}", other),
        }
    }

    #[test]
    fn missing_data_is_malformed() {
        let result: Result<Data, _> = parse_graphql(&response("{}"));
        assert!(matches!(result, Err(AppError::MalformedResponse { .. })));
    }
}
