//! Topic model.

use serde::{Deserialize, Serialize};

/// Topic record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Topic {
    /// Unique identifier, referenced by `articles.topic`.
    pub slug: String,
    pub description: String,
}
