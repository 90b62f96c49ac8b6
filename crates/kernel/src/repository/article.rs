//! Article reads and vote increments.

use std::collections::BTreeSet;

use tracing::debug;

use super::bind_all;
use super::topic::TopicRepository;
use crate::classify::classify;
use crate::db::RecordStore;
use crate::error::{BoardError, BoardResult};
use crate::models::{Article, ArticleWithCount};
use crate::query::{ArticleListParams, ArticleListSpec, builder};

#[derive(Debug, Clone)]
pub struct ArticleRepository {
    store: RecordStore,
    topics: TopicRepository,
}

impl ArticleRepository {
    pub fn new(store: RecordStore) -> Self {
        let topics = TopicRepository::new(store.clone());
        Self { store, topics }
    }

    /// One article with its comment count.
    pub async fn get_by_id(&self, article_id: i32) -> BoardResult<ArticleWithCount> {
        let built = builder::article_by_id(article_id)?;
        debug!(article_id, "fetching article");

        let article = bind_all(sqlx::query_as::<_, ArticleWithCount>(&built.sql), &built.params)
            .fetch_optional(self.store.pool())
            .await
            .map_err(classify)?;

        article.ok_or(BoardError::ArticleNotFound)
    }

    /// Every article matching `params`, each with its comment count.
    ///
    /// Known topics are only read from the store when a topic filter is
    /// present, and only after the sort parameters have been accepted.
    pub async fn get_all(&self, params: &ArticleListParams) -> BoardResult<Vec<ArticleWithCount>> {
        let known_topics = if params.topic.is_some() {
            let sort_only = ArticleListParams {
                topic: None,
                ..params.clone()
            };
            ArticleListSpec::validate(&sort_only, &BTreeSet::new())?;
            self.topics.slugs().await?
        } else {
            BTreeSet::new()
        };

        let spec = ArticleListSpec::validate(params, &known_topics)?;
        self.list(&spec).await
    }

    /// Run the listing query for an already validated spec.
    pub async fn list(&self, spec: &ArticleListSpec) -> BoardResult<Vec<ArticleWithCount>> {
        let built = builder::article_list(spec)?;
        debug!(
            sort_by = %spec.column(),
            order = spec.direction().as_str(),
            topic = ?spec.topic(),
            "listing articles"
        );

        bind_all(sqlx::query_as::<_, ArticleWithCount>(&built.sql), &built.params)
            .fetch_all(self.store.pool())
            .await
            .map_err(classify)
    }

    /// Add `inc_votes` (may be negative) to an article's votes.
    ///
    /// Returns the bare updated row without `comment_count`.
    pub async fn apply_vote_delta(&self, article_id: i32, inc_votes: i32) -> BoardResult<Article> {
        debug!(article_id, inc_votes, "applying vote delta");

        let article = sqlx::query_as::<_, Article>(
            r#"
            UPDATE articles
            SET votes = votes + $1
            WHERE article_id = $2
            RETURNING article_id, title, topic, author, body, created_at, votes
            "#,
        )
        .bind(inc_votes)
        .bind(article_id)
        .fetch_optional(self.store.pool())
        .await
        .map_err(classify)?;

        article.ok_or(BoardError::ArticleNotFound)
    }

    /// Apply a vote delta, then re-read the article with its comment count.
    ///
    /// The read is only issued once the update has completed, so it always
    /// observes the incremented votes.
    pub async fn apply_vote_delta_and_reload(
        &self,
        article_id: i32,
        inc_votes: i32,
    ) -> BoardResult<ArticleWithCount> {
        let updated = self.apply_vote_delta(article_id, inc_votes).await?;
        self.get_by_id(updated.article_id).await
    }

    pub async fn exists(&self, article_id: i32) -> BoardResult<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM articles WHERE article_id = $1)",
        )
        .bind(article_id)
        .fetch_one(self.store.pool())
        .await
        .map_err(classify)
    }
}
