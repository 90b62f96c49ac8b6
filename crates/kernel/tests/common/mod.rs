#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Shared harness for the database-backed integration tests.
//!
//! Every test runs on one long-lived runtime ([`SHARED_RT`]) so pooled
//! connections never outlive the runtime that opened them. Tests reseed the
//! same tables, so [`seeded_app`] hands out a guard that serializes them.

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::PgPool;
use tokio::sync::{Mutex, MutexGuard};
use tower::ServiceExt;

use newsboard_kernel::config::Config;
use newsboard_kernel::db;
use newsboard_kernel::routes;
use newsboard_kernel::state::AppState;

/// Shared Tokio runtime that outlives all individual tests.
pub static SHARED_RT: std::sync::LazyLock<tokio::runtime::Runtime> =
    std::sync::LazyLock::new(|| {
        tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .expect("Failed to build shared test runtime")
    });

static SHARED_APP: tokio::sync::OnceCell<TestApp> = tokio::sync::OnceCell::const_new();

/// Held for the duration of a test that reads or writes seeded rows.
static SEED_LOCK: Mutex<()> = Mutex::const_new(());

/// Run an async test body on [`SHARED_RT`].
pub fn run_test<F: std::future::Future<Output = ()> + Send>(f: F) {
    SHARED_RT.block_on(f);
}

/// The real router and state over a migrated database.
pub struct TestApp {
    router: Router,
    pub db: PgPool,
    pub state: AppState,
}

impl TestApp {
    async fn new() -> Self {
        dotenvy::dotenv().ok();

        let config = Config::from_env().expect("DATABASE_URL must be set for db-tests");
        let db = db::create_pool(&config)
            .await
            .expect("Failed to connect to test database");
        db::run_migrations(&db)
            .await
            .expect("Failed to run migrations");

        let state = AppState::from_pool(db.clone());
        let router = routes::router(state.clone());

        Self { router, db, state }
    }

    /// Send a request through the full router.
    pub async fn request(&self, request: Request<Body>) -> Response {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request")
    }

    pub async fn get(&self, uri: &str) -> Response {
        self.request(Request::get(uri).body(Body::empty()).unwrap())
            .await
    }

    pub async fn send_json(&self, method: &str, uri: &str, body: Value) -> Response {
        self.request(
            Request::builder()
                .method(method)
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }
}

/// Reseed the tables and return the app along with the guard that keeps
/// other tests from reseeding underneath this one.
pub async fn seeded_app() -> (&'static TestApp, MutexGuard<'static, ()>) {
    let guard = SEED_LOCK.lock().await;
    let app = SHARED_APP.get_or_init(TestApp::new).await;
    newsboard_test_utils::seed(&app.db)
        .await
        .expect("Failed to seed test data");
    (app, guard)
}

pub async fn response_json(response: Response) -> Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}
