//! Repositories over the record store.
//!
//! Each repository owns the statements for one resource. Store failures
//! are passed through [`crate::classify::classify`] at the call site, so
//! callers only ever see [`crate::error::BoardError`].

pub mod article;
pub mod comment;
pub mod topic;
pub mod user;

pub use article::ArticleRepository;
pub use comment::{CommentListing, CommentRepository, DeleteOutcome};
pub use topic::TopicRepository;
pub use user::UserRepository;

use sqlx::Postgres;
use sqlx::postgres::PgArguments;
use sqlx::query::QueryAs;

use crate::query::BindParam;

/// Bind rendered parameters in placeholder order.
fn bind_all<'q, O>(
    mut query: QueryAs<'q, Postgres, O, PgArguments>,
    params: &'q [BindParam],
) -> QueryAs<'q, Postgres, O, PgArguments> {
    for param in params {
        query = match param {
            BindParam::Text(value) => query.bind(value.as_str()),
            BindParam::Int(value) => query.bind(*value),
        };
    }
    query
}
