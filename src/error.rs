//! Some common error types.

use poem::{error::ResponseError, http::StatusCode};
use thiserror::Error;

/// A possible error value when looking up a document in the
/// [`Registry`](crate::Registry).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReadDocError {
    /// Nothing has been registered yet.
    #[error("no document has been registered")]
    NoneRegistered,

    /// No document was registered under this name.
    #[error("no document named `{0}` was registered")]
    NotFound(String),
}

impl ResponseError for ReadDocError {
    fn status(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

/// A possible error value when registering a document.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegisterError {
    /// A document with the same name already exists.
    #[error("a document named `{0}` is already registered")]
    AlreadyRegistered(String),
}

/// A possible error value when rendering the index page.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The UI settings could not be serialized.
    #[error("serialize settings: {0}")]
    Settings(#[from] serde_json::Error),

    /// Template error.
    #[error("render template: {0}")]
    Template(#[from] tera::Error),
}

impl ResponseError for RenderError {
    fn status(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}
