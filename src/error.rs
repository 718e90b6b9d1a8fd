// src/error.rs
//! Application error types with structured error handling.
//!
//! Each variant names the failure mode and where it happened, so the
//! retry layer and the stage runner can decide what to do with it
//! without inspecting message strings.

use reqwest::StatusCode;
use std::fmt;
use thiserror::Error;

/// How the fetch layer treats an HTTP status it did not expect.
///
/// The upstream WordPress origin answers with a small vocabulary of
/// failure statuses; this enum maps each one onto the action the
/// pipeline takes, instead of scattering `status >= 500` checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpErrorClass {
    /// 5xx — the origin is overloaded or restarting; back off and retry.
    Transient,
    /// 400 on a later page of a REST listing — the range is exhausted.
    EndOfRange,
    /// Any other 4xx — the resource is absent or the request was refused.
    ClientRejected,
}

impl HttpErrorClass {
    /// Classifies a non-success status. `page` is the 1-based REST page the
    /// status was returned for, or `None` for non-paginated requests.
    pub fn classify(status: StatusCode, page: Option<u32>) -> Self {
        if status.is_server_error() {
            return Self::Transient;
        }
        match page {
            Some(page) if status == StatusCode::BAD_REQUEST && page > 1 => Self::EndOfRange,
            _ => Self::ClientRejected,
        }
    }
}

impl fmt::Display for HttpErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transient => write!(f, "transient"),
            Self::EndOfRange => write!(f, "end_of_range"),
            Self::ClientRejected => write!(f, "client_rejected"),
        }
    }
}

/// A single message from a GraphQL `errors` array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphQlMessage(pub String);

impl fmt::Display for GraphQlMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Main application error type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Missing configuration: {0}")]
    MissingConfiguration(String),

    #[error("Network failure: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Server error {status} from {url}")]
    ServerStatus { status: StatusCode, url: String },

    #[error("Request rejected with {status} by {url}")]
    ClientStatus { status: StatusCode, url: String },

    #[error("Giving up after {attempts} attempts: {last}")]
    RetriesExhausted {
        attempts: u32,
        #[source]
        last: Box<AppError>,
    },

    #[error("GraphQL errors: {}", messages.iter().map(|m| m.0.as_str()).collect::<Vec<_>>().join(", "))]
    GraphQl { messages: Vec<GraphQlMessage> },

    #[error("Malformed response from {url}: {reason}")]
    MalformedResponse { url: String, reason: String },

    #[error("Filesystem IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize {what}: {source}")]
    Serialization {
        what: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Output delivery failed: {}", failures.join(", "))]
    DeliveryFailed { failures: Vec<String> },

    #[error(transparent)]
    Validation(#[from] crate::types::ValidationError),
}

impl AppError {
    /// Whether the retry layer should try the same request again.
    ///
    /// Only server-side statuses and transport failures qualify; client
    /// errors, GraphQL application errors and parse failures are terminal.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::ServerStatus { .. } | Self::Network(_))
    }

    /// The HTTP status behind this error, if there is one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::ServerStatus { status, .. } | Self::ClientStatus { status, .. } => Some(*status),
            Self::RetriesExhausted { last, .. } => last.status(),
            Self::Network(e) => e.status(),
            _ => None,
        }
    }
}

/// Result type alias for convenience
pub type Result<T, E = AppError> = std::result::Result<T, E>;
