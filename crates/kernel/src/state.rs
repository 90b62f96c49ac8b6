//! Application state shared across all handlers.

use std::sync::Arc;

use anyhow::{Context, Result};
use sqlx::PgPool;
use tracing::info;

use crate::config::Config;
use crate::db::{self, RecordStore};
use crate::repository::{ArticleRepository, CommentRepository, TopicRepository, UserRepository};

/// Shared application state.
///
/// Wrapped in Arc internally so Clone is cheap.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    store: RecordStore,
    topics: TopicRepository,
    users: UserRepository,
    articles: ArticleRepository,
    comments: CommentRepository,
}

impl AppState {
    /// Connect to the database and build every repository.
    pub async fn new(config: &Config) -> Result<Self> {
        let pool = db::create_pool(config)
            .await
            .context("failed to create database pool")?;

        if config.run_migrations {
            db::run_migrations(&pool)
                .await
                .context("failed to run migrations")?;
            info!("migrations applied");
        }

        Ok(Self::from_pool(pool))
    }

    /// Build state around an existing pool.
    ///
    /// Used by tests, which manage their own pool and schema.
    pub fn from_pool(pool: PgPool) -> Self {
        let store = RecordStore::new(pool);

        Self {
            inner: Arc::new(AppStateInner {
                topics: TopicRepository::new(store.clone()),
                users: UserRepository::new(store.clone()),
                articles: ArticleRepository::new(store.clone()),
                comments: CommentRepository::new(store.clone()),
                store,
            }),
        }
    }

    pub fn store(&self) -> &RecordStore {
        &self.inner.store
    }

    pub fn topics(&self) -> &TopicRepository {
        &self.inner.topics
    }

    pub fn users(&self) -> &UserRepository {
        &self.inner.users
    }

    pub fn articles(&self) -> &ArticleRepository {
        &self.inner.articles
    }

    pub fn comments(&self) -> &CommentRepository {
        &self.inner.comments
    }
}
