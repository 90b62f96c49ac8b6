#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Router tests that never reach the database.
//!
//! The pool is lazy and points at nothing; every request here is rejected
//! by validation before a connection would be acquired.

use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use sqlx::postgres::PgPoolOptions;
use tower::ServiceExt;

use newsboard_kernel::routes;
use newsboard_kernel::state::AppState;

fn offline_router() -> Router {
    let pool = PgPoolOptions::new()
        .acquire_timeout(Duration::from_millis(100))
        .connect_lazy("postgres://nobody@127.0.0.1:1/unreachable")
        .expect("lazy pool");
    routes::router(AppState::from_pool(pool))
}

async fn send(request: Request<Body>) -> (StatusCode, Value) {
    let response = offline_router().oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&body).unwrap_or(Value::Null))
}

async fn get(uri: &str) -> (StatusCode, Value) {
    send(Request::get(uri).body(Body::empty()).unwrap()).await
}

async fn send_json(method: &str, uri: &str, body: &str) -> (StatusCode, Value) {
    send(
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

#[tokio::test]
async fn unknown_paths_get_json_404() {
    for uri in ["/api/nope", "/api", "/", "/api/articles/1/comments/extra"] {
        let (status, body) = get(uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        assert_eq!(body, json!({ "msg": "path not found" }), "{uri}");
    }
}

#[tokio::test]
async fn malformed_article_id_is_bad_request() {
    let (status, body) = get("/api/articles/not-an-id").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["msg"].as_str().unwrap().starts_with("Bad request"));

    let (status, _) = get("/api/articles/banana/comments").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn malformed_comment_id_is_bad_request() {
    let response = offline_router()
        .oneshot(
            Request::delete("/api/comments/forty-two")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unsupported_sort_column_is_rejected() {
    let (status, body) = get("/api/articles?sort_by=password").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["msg"].as_str().unwrap().contains("password"));
}

#[tokio::test]
async fn unsupported_sort_order_is_rejected() {
    let (status, _) = get("/api/articles?order=sideways").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn undecodable_query_string_gets_json_400() {
    let (status, body) = get("/api/articles?sort_by=votes&sort_by=title").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let msg = body["msg"].as_str().expect("json error body");
    assert!(msg.starts_with("Bad request"), "{msg}");
    assert!(msg.contains("sort_by"), "{msg}");
}

#[tokio::test]
async fn sort_is_validated_before_topics_are_loaded() {
    // A topic filter would need the store; the bad column must win first.
    let (status, _) = get("/api/articles?sort_by=nope&topic=cats").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn vote_patch_without_inc_votes_is_rejected() {
    for body in ["{}", r#"{"votes": 1}"#, "", "not json"] {
        let (status, reply) = send_json("PATCH", "/api/articles/1", body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
        assert!(reply["msg"].is_string(), "{body}");
    }
}

#[tokio::test]
async fn vote_patch_with_non_integer_delta_is_rejected() {
    for body in [
        r#"{"inc_votes": "ten"}"#,
        r#"{"inc_votes": 1.5}"#,
        r#"{"inc_votes": null}"#,
        r#"{"inc_votes": 99999999999}"#,
    ] {
        let (status, _) = send_json("PATCH", "/api/articles/1", body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
    }
}

#[tokio::test]
async fn comment_payload_is_validated_before_insert() {
    let cases = [
        r#"{"author": "butter_bridge"}"#,
        r#"{"body": "hello"}"#,
        r#"{"author": 7, "body": "hello"}"#,
        r#"{"author": "butter_bridge", "body": ["hello"]}"#,
        "",
    ];
    for body in cases {
        let (status, reply) = send_json("POST", "/api/articles/1/comments", body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
        assert!(reply["msg"].is_string(), "{body}");
    }
}
