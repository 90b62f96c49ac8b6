//! User listing endpoint.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::error::BoardResult;
use crate::models::User;
use crate::state::AppState;

#[derive(Serialize)]
struct UsersResponse {
    users: Vec<User>,
}

async fn list_users(State(state): State<AppState>) -> BoardResult<Json<UsersResponse>> {
    let users = state.users().list().await?;
    Ok(Json(UsersResponse { users }))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/api/users", get(list_users))
}
