// src/api/client.rs
//! Thin HTTP client wrapper for the WordPress APIs.
//!
//! Handles default headers, timeouts and response extraction. Retrying,
//! pagination and parsing live elsewhere.

use crate::constants::{LOGGED_URL_LENGTH, TOTAL_PAGES_HEADER};
use crate::error::AppError;
use reqwest::{header, Client, Response, StatusCode};
use serde::Serialize;
use std::time::Duration;

/// A thin wrapper around reqwest Client for WordPress requests.
#[derive(Clone)]
pub struct WpHttpClient {
    client: Client,
}

impl WpHttpClient {
    pub fn new(timeout: Duration) -> Result<Self, AppError> {
        let client = Client::builder()
            .default_headers(Self::create_headers())
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }

    fn create_headers() -> header::HeaderMap {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );
        headers
    }

    /// Makes a GET request to an absolute URL.
    pub async fn get(&self, url: &str) -> Result<Response, AppError> {
        log::debug!("GET {}", shorten(url));
        Ok(self.client.get(url).send().await?)
    }

    /// GETs a binary file such as an upload, accepting any content type.
    pub async fn get_file(&self, url: &str) -> Result<Response, AppError> {
        log::debug!("GET {}", shorten(url));
        Ok(self
            .client
            .get(url)
            .header(header::ACCEPT, "*/*")
            .send()
            .await?)
    }

    /// Makes a POST request with a JSON body to an absolute URL.
    pub async fn post_json<T: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &T,
    ) -> Result<Response, AppError> {
        log::debug!("POST {}", shorten(url));
        Ok(self.client.post(url).json(body).send().await?)
    }
}

/// Response body with the metadata the pagination layer needs.
#[derive(Debug, Clone)]
pub struct ApiResponse<T> {
    pub data: T,
    pub status: StatusCode,
    pub url: String,
    /// Value of `X-WP-TotalPages`, when present and numeric.
    pub total_pages: Option<u32>,
}

/// Reads the body of `response` as text, keeping status, URL and page count.
pub async fn extract_response_text(response: Response) -> Result<ApiResponse<String>, AppError> {
    let status = response.status();
    let url = response.url().to_string();
    let total_pages = response
        .headers()
        .get(TOTAL_PAGES_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u32>().ok());
    let text = response.text().await?;

    Ok(ApiResponse {
        data: text,
        status,
        url,
        total_pages,
    })
}

/// Reads the raw body of `response`, keeping status and final URL.
pub async fn extract_response_bytes(response: Response) -> Result<ApiResponse<Vec<u8>>, AppError> {
    let status = response.status();
    let url = response.url().to_string();
    let bytes = response.bytes().await?;

    Ok(ApiResponse {
        data: bytes.to_vec(),
        status,
        url,
        total_pages: None,
    })
}

/// Truncates a URL for log lines.
pub(crate) fn shorten(url: &str) -> String {
    if url.chars().count() <= LOGGED_URL_LENGTH {
        url.to_string()
    } else {
        let head: String = url.chars().take(LOGGED_URL_LENGTH).collect();
        format!("{}...", head)
    }
}
