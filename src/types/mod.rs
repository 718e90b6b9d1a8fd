use thiserror::Error;

mod content_kind;
mod domain_types;
mod locale;

pub use content_kind::*;
pub use domain_types::*;
pub use locale::*;

#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid URL: {url} - {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Empty required field: {0}")]
    EmptyField(&'static str),

    #[error("Unsupported locale: {0}")]
    UnsupportedLocale(String),

    #[error("Invalid post type: {name} - {reason}")]
    InvalidPostType { name: String, reason: String },

    #[error("Invalid message catalog: {0}")]
    InvalidCatalog(String),
}
