//! Article endpoints.
//!
//! Path identifiers arrive as strings and are parsed here so a malformed id
//! produces the board's own 400 body instead of an extractor rejection.
//! Query string rejections are mapped the same way.

use axum::body::Bytes;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use super::json_payload;
use crate::error::{BoardError, BoardResult};
use crate::models::{Article, ArticleWithCount, parse_id, parse_vote_patch};
use crate::query::ArticleListParams;
use crate::state::AppState;

#[derive(Serialize)]
struct ArticlesResponse {
    articles: Vec<ArticleWithCount>,
}

#[derive(Serialize)]
struct ArticleResponse<T> {
    article: T,
}

async fn list_articles(
    State(state): State<AppState>,
    query: Result<Query<ArticleListParams>, QueryRejection>,
) -> BoardResult<Json<ArticlesResponse>> {
    let Query(params) =
        query.map_err(|rejection| BoardError::MalformedQuery(rejection.body_text()))?;
    let articles = state.articles().get_all(&params).await?;
    Ok(Json(ArticlesResponse { articles }))
}

async fn get_article(
    State(state): State<AppState>,
    Path(article_id): Path<String>,
) -> BoardResult<Json<ArticleResponse<ArticleWithCount>>> {
    let article_id = parse_id(&article_id)?;
    let article = state.articles().get_by_id(article_id).await?;
    Ok(Json(ArticleResponse { article }))
}

async fn patch_article_votes(
    State(state): State<AppState>,
    Path(article_id): Path<String>,
    body: Bytes,
) -> BoardResult<Json<ArticleResponse<Article>>> {
    let article_id = parse_id(&article_id)?;
    let inc_votes = parse_vote_patch(&json_payload(&body))?;
    let article = state
        .articles()
        .apply_vote_delta(article_id, inc_votes)
        .await?;
    Ok(Json(ArticleResponse { article }))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/articles", get(list_articles))
        .route(
            "/api/articles/{article_id}",
            get(get_article).patch(patch_article_votes),
        )
}
