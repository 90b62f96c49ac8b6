//! Article model and vote patch parsing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{BoardError, BoardResult};

/// Article row as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Article {
    pub article_id: i32,
    pub title: String,

    /// Topic slug.
    pub topic: String,

    /// Author username.
    pub author: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub votes: i32,
}

/// Article row plus the number of comments attached to it.
///
/// `comment_count` is aggregated by the read query every time; it is not a
/// stored column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ArticleWithCount {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub article: Article,
    pub comment_count: i32,
}

/// Extract `inc_votes` from a PATCH body.
///
/// Missing key and non-integer value are distinct errors; neither touches
/// the store.
pub fn parse_vote_patch(body: &Value) -> BoardResult<i32> {
    let delta = body.get("inc_votes").ok_or(BoardError::MalformedVotePatch)?;

    whole_number(delta)
        .and_then(|d| i32::try_from(d).ok())
        .ok_or(BoardError::InvalidVoteDelta)
}

/// Integral JSON numbers, including ones written with a zero fraction (`5.0`).
fn whole_number(value: &Value) -> Option<i64> {
    if let Some(n) = value.as_i64() {
        return Some(n);
    }
    let f = value.as_f64()?;
    if f.fract() == 0.0 && f >= f64::from(i32::MIN) && f <= f64::from(i32::MAX) {
        Some(f as i64)
    } else {
        None
    }
}
