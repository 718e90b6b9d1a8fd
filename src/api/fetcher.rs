// src/api/fetcher.rs
//! Requests with retry: the only place that decides whether a response is
//! worth asking for again.

use super::client::{
    extract_response_bytes, extract_response_text, shorten, ApiResponse, WpHttpClient,
};
use super::parser::parse_graphql;
use crate::error::AppError;
use crate::error_recovery::{retry_with_backoff, RetryPolicy};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// Issues REST and GraphQL requests under a [`RetryPolicy`].
///
/// 5xx responses and transport errors are retried. Anything else,
/// including 4xx, is handed back on the first attempt.
#[derive(Clone)]
pub struct Fetcher {
    http: WpHttpClient,
}

#[derive(Serialize)]
struct GraphQlRequest<'a> {
    query: &'a str,
    variables: &'a Value,
}

impl Fetcher {
    pub fn new(http: WpHttpClient) -> Self {
        Self { http }
    }

    /// GETs `url`. Returns the final response whatever its status, unless
    /// every attempt hit a 5xx or a network error.
    pub async fn get(
        &self,
        url: &str,
        policy: &RetryPolicy,
    ) -> Result<ApiResponse<String>, AppError> {
        let http = &self.http;
        retry_with_backoff(policy, AppError::is_retryable, move |attempt| async move {
            log::debug!(
                "Fetching (attempt {}/{}): {}",
                attempt,
                policy.max_attempts,
                shorten(url)
            );
            let response = extract_response_text(http.get(url).await?).await?;
            if response.status.is_server_error() {
                return Err(AppError::ServerStatus {
                    status: response.status,
                    url: response.url,
                });
            }
            Ok(response)
        })
        .await
    }

    /// Downloads `url` as bytes. Redirects are followed; a final status
    /// other than 2xx is an error.
    pub async fn get_bytes(&self, url: &str, policy: &RetryPolicy) -> Result<Vec<u8>, AppError> {
        let http = &self.http;
        let response = retry_with_backoff(policy, AppError::is_retryable, move |attempt| async move {
            log::debug!(
                "Downloading (attempt {}/{}): {}",
                attempt,
                policy.max_attempts,
                shorten(url)
            );
            let response = extract_response_bytes(http.get_file(url).await?).await?;
            if response.status.is_server_error() {
                return Err(AppError::ServerStatus {
                    status: response.status,
                    url: response.url,
                });
            }
            Ok(response)
        })
        .await?;

        if !response.status.is_success() {
            return Err(AppError::ClientStatus {
                status: response.status,
                url: response.url,
            });
        }

        Ok(response.data)
    }

    /// POSTs a GraphQL query and returns its `data`.
    ///
    /// Non-5xx HTTP failures and GraphQL `errors` are terminal.
    pub async fn graphql<T>(
        &self,
        endpoint: &str,
        query: &str,
        variables: &Value,
        policy: &RetryPolicy,
    ) -> Result<T, AppError>
    where
        T: DeserializeOwned,
    {
        let http = &self.http;
        let body = GraphQlRequest { query, variables };
        let body = &body;

        let response = retry_with_backoff(policy, AppError::is_retryable, move |attempt| async move {
            log::debug!(
                "GraphQL request (attempt {}/{}) to {}",
                attempt,
                policy.max_attempts,
                endpoint
            );
            let response = extract_response_text(http.post_json(endpoint, body).await?).await?;
            if response.status.is_server_error() {
                return Err(AppError::ServerStatus {
                    status: response.status,
                    url: response.url,
                });
            }
            Ok(response)
        })
        .await?;

        if !response.status.is_success() {
            return Err(AppError::ClientStatus {
                status: response.status,
                url: response.url,
            });
        }

        parse_graphql(&response)
    }
}
