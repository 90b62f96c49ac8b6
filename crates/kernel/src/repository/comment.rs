//! Comment listing, creation and deletion.

use serde_json::Value;
use tracing::{debug, info};

use super::article::ArticleRepository;
use crate::classify::classify;
use crate::db::RecordStore;
use crate::error::{BoardError, BoardResult};
use crate::models::{Comment, NewComment};

/// Result of listing an article's comments.
///
/// An article that exists but has no comments is `NoComments`, never an
/// empty `Comments`. A missing article is an error, not a listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommentListing {
    Comments(Vec<Comment>),
    NoComments,
}

impl CommentListing {
    pub fn comments(&self) -> &[Comment] {
        match self {
            CommentListing::Comments(comments) => comments,
            CommentListing::NoComments => &[],
        }
    }

    pub fn len(&self) -> usize {
        self.comments().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Whether a delete actually removed a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    NotPresent,
}

#[derive(Debug, Clone)]
pub struct CommentRepository {
    store: RecordStore,
    articles: ArticleRepository,
}

impl CommentRepository {
    pub fn new(store: RecordStore) -> Self {
        let articles = ArticleRepository::new(store.clone());
        Self { store, articles }
    }

    /// All comments for an article, newest first.
    ///
    /// An empty result triggers a second lookup to tell "no comments" apart
    /// from "no such article".
    pub async fn list_by_article(&self, article_id: i32) -> BoardResult<CommentListing> {
        let comments = sqlx::query_as::<_, Comment>(
            r#"
            SELECT comment_id, article_id, author, body, votes, created_at
            FROM comments
            WHERE article_id = $1
            ORDER BY created_at DESC, comment_id DESC
            "#,
        )
        .bind(article_id)
        .fetch_all(self.store.pool())
        .await
        .map_err(classify)?;

        if !comments.is_empty() {
            return Ok(CommentListing::Comments(comments));
        }

        if self.articles.exists(article_id).await? {
            debug!(article_id, "article has no comments");
            Ok(CommentListing::NoComments)
        } else {
            Err(BoardError::ArticleNotFound)
        }
    }

    /// Validate an untyped payload and create the comment.
    pub async fn insert(&self, article_id: i32, payload: &Value) -> BoardResult<Comment> {
        let input = NewComment::from_payload(payload)?;
        self.create(article_id, &input).await
    }

    /// Create a comment with zero votes, stamped with the current time.
    ///
    /// A missing article or author surfaces as
    /// [`BoardError::ArticleDoesNotExist`] / [`BoardError::UserDoesNotExist`].
    pub async fn create(&self, article_id: i32, input: &NewComment) -> BoardResult<Comment> {
        let comment = sqlx::query_as::<_, Comment>(
            r#"
            INSERT INTO comments (article_id, author, body, votes, created_at)
            VALUES ($1, $2, $3, 0, NOW())
            RETURNING comment_id, article_id, author, body, votes, created_at
            "#,
        )
        .bind(article_id)
        .bind(&input.author)
        .bind(&input.body)
        .fetch_one(self.store.pool())
        .await
        .map_err(classify)?;

        info!(
            comment_id = comment.comment_id,
            article_id, "comment created"
        );
        Ok(comment)
    }

    /// Delete a comment by ID.
    pub async fn delete(&self, comment_id: i32) -> BoardResult<DeleteOutcome> {
        let result = sqlx::query("DELETE FROM comments WHERE comment_id = $1")
            .bind(comment_id)
            .execute(self.store.pool())
            .await
            .map_err(classify)?;

        let outcome = if result.rows_affected() > 0 {
            DeleteOutcome::Deleted
        } else {
            DeleteOutcome::NotPresent
        };
        debug!(comment_id, ?outcome, "comment delete issued");

        Ok(outcome)
    }
}
