//! Comment endpoints.

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get};
use axum::{Json, Router};
use serde::Serialize;
use serde_json::json;

use super::json_payload;
use crate::error::BoardResult;
use crate::models::{Comment, parse_id};
use crate::repository::{CommentListing, DeleteOutcome};
use crate::state::AppState;

#[derive(Serialize)]
struct CommentsResponse {
    comments: Vec<Comment>,
}

#[derive(Serialize)]
struct CommentResponse {
    comment: Comment,
}

async fn list_article_comments(
    State(state): State<AppState>,
    Path(article_id): Path<String>,
) -> BoardResult<Response> {
    let article_id = parse_id(&article_id)?;

    let response = match state.comments().list_by_article(article_id).await? {
        CommentListing::Comments(comments) => Json(CommentsResponse { comments }).into_response(),
        CommentListing::NoComments => {
            Json(json!({ "msg": "This article has no comments" })).into_response()
        }
    };

    Ok(response)
}

async fn create_comment(
    State(state): State<AppState>,
    Path(article_id): Path<String>,
    body: Bytes,
) -> BoardResult<(StatusCode, Json<CommentResponse>)> {
    let article_id = parse_id(&article_id)?;
    let comment = state
        .comments()
        .insert(article_id, &json_payload(&body))
        .await?;
    Ok((StatusCode::CREATED, Json(CommentResponse { comment })))
}

/// Delete a comment. Deleting an absent comment is still a 204.
async fn delete_comment(
    State(state): State<AppState>,
    Path(comment_id): Path<String>,
) -> BoardResult<StatusCode> {
    let comment_id = parse_id(&comment_id)?;
    match state.comments().delete(comment_id).await? {
        DeleteOutcome::Deleted | DeleteOutcome::NotPresent => Ok(StatusCode::NO_CONTENT),
    }
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/api/articles/{article_id}/comments",
            get(list_article_comments).post(create_comment),
        )
        .route("/api/comments/{comment_id}", delete(delete_comment))
}
