//! error types
//!
//! [`ValidationError`] is raised by the builder when a name fails the
//! identifier pattern. [`Error`] covers everything else: config, http, json,
//! and graphql responses.

use crate::graphql::GraphQlError;
use std::fmt;

/// library result type
pub type Result<T> = std::result::Result<T, Error>;

/// a name rejected by the identifier pattern
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("invalid operation name {value:?}, must match {pattern}")]
    OperationName {
        /// rejected input
        value: String,
        /// pattern the input must match
        pattern: &'static str,
    },

    #[error("invalid field name {value:?}, must match {pattern}")]
    FieldName {
        /// rejected input
        value: String,
        /// pattern the input must match
        pattern: &'static str,
    },

    #[error("invalid alias {value:?}, must match {pattern}")]
    Alias {
        /// rejected input
        value: String,
        /// pattern the input must match
        pattern: &'static str,
    },
}

impl ValidationError {
    /// the string that failed validation
    pub fn value(&self) -> &str {
        match self {
            ValidationError::OperationName { value, .. }
            | ValidationError::FieldName { value, .. }
            | ValidationError::Alias { value, .. } => value,
        }
    }
}

/// error type for the builder and client
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("config error: {0}")]
    Config(String),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("url error: {0}")]
    Url(#[from] url::ParseError),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("graphql error: {message}")]
    GraphQl {
        /// http status if available
        status: Option<u16>,
        /// graphql error list
        errors: Vec<GraphQlError>,
        /// raw response body
        body: String,
        /// top-level message
        message: String,
    },
}

impl Error {
    /// true if the error looks like an auth failure
    pub fn is_auth_error(&self) -> bool {
        matches!(self, Error::GraphQl { status: Some(401 | 403), .. })
            || matches!(self, Error::Http(err) if err.status() == Some(reqwest::StatusCode::UNAUTHORIZED))
    }
}

impl fmt::Display for GraphQlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}
