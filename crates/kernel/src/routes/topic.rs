//! Topic listing endpoint.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::error::BoardResult;
use crate::models::Topic;
use crate::state::AppState;

#[derive(Serialize)]
struct TopicsResponse {
    topics: Vec<Topic>,
}

async fn list_topics(State(state): State<AppState>) -> BoardResult<Json<TopicsResponse>> {
    let topics = state.topics().list().await?;
    Ok(Json(TopicsResponse { topics }))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/api/topics", get(list_topics))
}
