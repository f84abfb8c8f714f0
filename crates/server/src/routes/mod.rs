//! HTTP route handlers for the storefront API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                  - Liveness check
//! GET  /health/ready            - Readiness check (storage probe)
//!
//! # Catalog
//! GET    /api/products          - Product listing (newest first)
//! GET    /api/products/:slug    - Product detail
//! POST   /api/products          - Create product (admin)
//! PUT    /api/products/:id      - Update product (admin)
//! DELETE /api/products/:id      - Delete product (admin)
//!
//! # Orders
//! POST /api/orders              - Place an order
//! GET  /api/orders              - Order listing, newest first (admin)
//! GET  /api/orders/:id          - Order tracking with reached milestones
//! PUT  /api/orders/:id/status   - Update order status (admin)
//!
//! # Messages
//! POST /api/messages            - Submit contact / bulk / newsletter message
//! GET  /api/messages            - Message listing, newest first (admin)
//!
//! # Content
//! GET  /api/content/:key        - Stored JSON value, `{}` when absent
//! POST /api/content/:key        - Upsert value (admin)
//!
//! # Blog
//! GET    /api/posts             - Post listing (newest first)
//! GET    /api/posts/:slug       - Post detail
//! POST   /api/posts             - Create post (admin)
//! PUT    /api/posts/:id         - Update post (admin)
//! DELETE /api/posts/:id         - Delete post (admin)
//!
//! # Auth & Uploads
//! POST /api/admin/login         - Exchange credentials for a bearer token
//! POST /api/upload              - Store a multipart image (admin)
//! GET  /uploads/*               - Static serving of stored uploads
//! ```

pub mod auth;
pub mod content;
pub mod messages;
pub mod orders;
pub mod posts;
pub mod products;
pub mod uploads;

use axum::extract::State;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderValue, Method, StatusCode};
use axum::routing::{get, post, put};
use axum::Router;
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::state::AppState;

/// Body for mutations that return nothing beyond acknowledgment.
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    /// Acknowledge a completed mutation.
    #[must_use]
    pub const fn ok() -> Self {
        Self { success: true }
    }
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index).post(products::create))
        .route(
            "/{slug}",
            get(products::show)
                .put(products::update)
                .delete(products::remove),
        )
}

/// Create the order routes router.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(orders::place).get(orders::index))
        .route("/{id}", get(orders::track))
        .route("/{id}/status", put(orders::update_status))
}

/// Create the message routes router.
pub fn message_routes() -> Router<AppState> {
    Router::new().route("/", post(messages::create).get(messages::index))
}

/// Create the content routes router.
pub fn content_routes() -> Router<AppState> {
    Router::new().route("/{key}", get(content::show).post(content::upsert))
}

/// Create the blog post routes router.
pub fn post_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(posts::index).post(posts::create))
        .route(
            "/{slug}",
            get(posts::show).put(posts::update).delete(posts::remove),
        )
}

/// Create the `/api` router.
pub fn api_router() -> Router<AppState> {
    Router::new()
        .nest("/products", product_routes())
        .nest("/orders", order_routes())
        .nest("/messages", message_routes())
        .nest("/content", content_routes())
        .nest("/posts", post_routes())
        .route("/admin/login", post(auth::login))
        .route("/upload", post(uploads::store))
}

/// Build the complete application router.
///
/// Mounts the API under `/api`, serves stored uploads under `/uploads`
/// and wires the tracing and CORS layers.
pub fn app(state: AppState) -> Router {
    let uploads = ServeDir::new(state.config().upload_dir.clone());
    let cors = cors_layer(state.config());

    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .nest("/api", api_router())
        .nest_service("/uploads", uploads)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Build the CORS layer.
///
/// With a configured frontend origin the layer allows credentialed
/// requests from that origin only; otherwise it stays permissive, which
/// suits same-host deployments where the API serves its own client.
fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let origin = config
        .frontend_url
        .as_deref()
        .and_then(|url| url.parse::<HeaderValue>().ok());

    match origin {
        Some(origin) => CorsLayer::new()
            .allow_origin(origin)
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
            .allow_headers([CONTENT_TYPE, AUTHORIZATION])
            .allow_credentials(true),
        None => CorsLayer::permissive(),
    }
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Verifies database connectivity before returning OK.
/// Returns 503 Service Unavailable if the database is not reachable.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    match sqlx::query("SELECT 1").fetch_one(state.pool()).await {
        Ok(_) => StatusCode::OK,
        Err(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}
