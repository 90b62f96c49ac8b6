//! User listing.

use crate::classify::classify;
use crate::db::RecordStore;
use crate::error::BoardResult;
use crate::models::User;

#[derive(Debug, Clone)]
pub struct UserRepository {
    store: RecordStore,
}

impl UserRepository {
    pub fn new(store: RecordStore) -> Self {
        Self { store }
    }

    /// All users, by username.
    pub async fn list(&self) -> BoardResult<Vec<User>> {
        sqlx::query_as::<_, User>(
            "SELECT username, name, avatar_url FROM users ORDER BY username",
        )
        .fetch_all(self.store.pool())
        .await
        .map_err(classify)
    }
}
