//! Comment model and new-comment payload parsing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{BoardError, BoardResult};

/// Comment record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Comment {
    pub comment_id: i32,

    /// Parent article ID.
    pub article_id: i32,

    /// Author username.
    pub author: String,
    pub body: String,

    /// Starts at 0.
    pub votes: i32,

    /// Set by the store at insert time.
    pub created_at: DateTime<Utc>,
}

/// Input for creating a comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    pub author: String,
    pub body: String,
}

impl NewComment {
    /// Validate an untyped request body.
    ///
    /// Presence of both fields is checked before their types, so
    /// `{"author": 1}` reports the missing `body` rather than the bad
    /// `author`.
    pub fn from_payload(payload: &Value) -> BoardResult<Self> {
        let author = payload.get("author");
        let body = payload.get("body");

        let (author, body) = match (author, body) {
            (Some(author), Some(body)) => (author, body),
            (None, None) => {
                return Err(BoardError::MalformedComment(
                    "comment must include author and body".to_string(),
                ));
            }
            (None, Some(_)) => {
                return Err(BoardError::MalformedComment(
                    "comment must include author".to_string(),
                ));
            }
            (Some(_), None) => {
                return Err(BoardError::MalformedComment(
                    "comment must include body".to_string(),
                ));
            }
        };

        Ok(Self {
            author: string_field(author, "author")?,
            body: string_field(body, "body")?,
        })
    }
}

fn string_field(value: &Value, field: &'static str) -> BoardResult<String> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or(BoardError::WrongFieldType { field })
}
