//! Topic listing.

use std::collections::BTreeSet;

use crate::classify::classify;
use crate::db::RecordStore;
use crate::error::BoardResult;
use crate::models::Topic;

#[derive(Debug, Clone)]
pub struct TopicRepository {
    store: RecordStore,
}

impl TopicRepository {
    pub fn new(store: RecordStore) -> Self {
        Self { store }
    }

    /// All topics, by slug.
    pub async fn list(&self) -> BoardResult<Vec<Topic>> {
        sqlx::query_as::<_, Topic>("SELECT slug, description FROM topics ORDER BY slug")
            .fetch_all(self.store.pool())
            .await
            .map_err(classify)
    }

    /// Slugs of every known topic, for validating topic filters.
    pub async fn slugs(&self) -> BoardResult<BTreeSet<String>> {
        let slugs: Vec<String> = sqlx::query_scalar("SELECT slug FROM topics")
            .fetch_all(self.store.pool())
            .await
            .map_err(classify)?;

        Ok(slugs.into_iter().collect())
    }
}
