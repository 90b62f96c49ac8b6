//! Board error types.
//!
//! Every failure a repository reports is one [`BoardError`]. Storage
//! failures the classifier does not recognize travel as
//! [`BoardError::Store`] and render as an opaque 500.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

/// Stable, copyable discriminant of a [`BoardError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    MalformedIdentifier,
    MalformedComment,
    WrongFieldType,
    InvalidSortColumn,
    InvalidSortOrder,
    MalformedQuery,
    MalformedVotePatch,
    InvalidVoteDelta,
    ArticleNotFound,
    ArticleDoesNotExist,
    UserDoesNotExist,
    UnknownTopic,
    Store,
}

impl ErrorKind {
    /// HTTP status the request layer answers with for this kind.
    pub fn status(self) -> StatusCode {
        match self {
            ErrorKind::MalformedIdentifier
            | ErrorKind::MalformedComment
            | ErrorKind::WrongFieldType
            | ErrorKind::InvalidSortColumn
            | ErrorKind::InvalidSortOrder
            | ErrorKind::MalformedQuery
            | ErrorKind::MalformedVotePatch
            | ErrorKind::InvalidVoteDelta => StatusCode::BAD_REQUEST,
            ErrorKind::ArticleNotFound
            | ErrorKind::ArticleDoesNotExist
            | ErrorKind::UserDoesNotExist
            | ErrorKind::UnknownTopic => StatusCode::NOT_FOUND,
            ErrorKind::Store => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Domain errors.
#[derive(Debug, Error)]
pub enum BoardError {
    #[error("Bad request: {0}")]
    MalformedIdentifier(String),

    #[error("Bad request: {0}")]
    MalformedComment(String),

    #[error("Bad request: comment field `{field}` must be a string")]
    WrongFieldType { field: &'static str },

    #[error("Bad request: cannot sort by `{0}`")]
    InvalidSortColumn(String),

    #[error("Bad request: sort order must be asc or desc, got `{0}`")]
    InvalidSortOrder(String),

    #[error("Bad request: {0}")]
    MalformedQuery(String),

    #[error("patch request body incorrectly formatted")]
    MalformedVotePatch,

    #[error("value for the vote increment must be an integer")]
    InvalidVoteDelta,

    #[error("Article not found")]
    ArticleNotFound,

    #[error("Article does not exist")]
    ArticleDoesNotExist,

    #[error("User does not exist")]
    UserDoesNotExist,

    #[error("Topic `{0}` not found")]
    UnknownTopic(String),

    #[error("database error")]
    Store(#[from] sqlx::Error),
}

impl BoardError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            BoardError::MalformedIdentifier(_) => ErrorKind::MalformedIdentifier,
            BoardError::MalformedComment(_) => ErrorKind::MalformedComment,
            BoardError::WrongFieldType { .. } => ErrorKind::WrongFieldType,
            BoardError::InvalidSortColumn(_) => ErrorKind::InvalidSortColumn,
            BoardError::InvalidSortOrder(_) => ErrorKind::InvalidSortOrder,
            BoardError::MalformedQuery(_) => ErrorKind::MalformedQuery,
            BoardError::MalformedVotePatch => ErrorKind::MalformedVotePatch,
            BoardError::InvalidVoteDelta => ErrorKind::InvalidVoteDelta,
            BoardError::ArticleNotFound => ErrorKind::ArticleNotFound,
            BoardError::ArticleDoesNotExist => ErrorKind::ArticleDoesNotExist,
            BoardError::UserDoesNotExist => ErrorKind::UserDoesNotExist,
            BoardError::UnknownTopic(_) => ErrorKind::UnknownTopic,
            BoardError::Store(_) => ErrorKind::Store,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.kind().status()
    }
}

/// JSON error body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub msg: String,
}

impl IntoResponse for BoardError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Storage detail never reaches the client.
        let msg = match &self {
            BoardError::Store(e) => {
                tracing::error!(error = %e, "unclassified store failure");
                "Internal server error".to_string()
            }
            _ => self.to_string(),
        };

        (status, Json(ErrorBody { msg })).into_response()
    }
}

/// Result type alias using BoardError.
pub type BoardResult<T> = Result<T, BoardError>;
