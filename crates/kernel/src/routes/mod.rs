//! HTTP route handlers.

pub mod article;
pub mod comment;
pub mod health;
pub mod topic;
pub mod user;

use axum::http::StatusCode;
use axum::{Json, Router};

use crate::error::ErrorBody;
use crate::state::AppState;

/// Assemble every route under one router, with a JSON 404 for the rest.
pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(topic::router())
        .merge(user::router())
        .merge(article::router())
        .merge(comment::router())
        .merge(health::router())
        .fallback(path_not_found)
        .with_state(state)
}

async fn path_not_found() -> (StatusCode, Json<ErrorBody>) {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorBody {
            msg: "path not found".to_string(),
        }),
    )
}

/// Decode a request body as untyped JSON.
///
/// Anything that does not parse becomes `Null`, so the payload validators
/// report it as a missing field rather than a transport error.
fn json_payload(body: &[u8]) -> serde_json::Value {
    serde_json::from_slice(body).unwrap_or(serde_json::Value::Null)
}
