//! HTTP route handlers for the shop backend.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health           - Database probe + pool stats
//! GET  /ping             - Liveness
//!
//! # Auth
//! POST /auth/register    - Create account, establish session
//! POST /auth/login       - Establish session
//! POST /auth/logout      - Destroy session (requires auth)
//! GET  /me               - Session identity (requires auth)
//!
//! # Cart (requires auth)
//! GET  /cart             - Current cart, or null
//! POST /cart             - Replace the cart wholesale
//! ```

pub mod auth;
pub mod cart;
pub mod health;

use axum::{
    Json, Router,
    routing::{get, post},
};
use serde_json::json;

use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new().route("/", get(cart::get_cart).post(cart::set_cart))
}

/// Create all routes for the backend.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/ping", get(ping))
        .route("/me", get(auth::me))
        .nest("/auth", auth_routes())
        .nest("/cart", cart_routes())
}

/// Liveness check; no dependencies touched.
async fn ping() -> Json<serde_json::Value> {
    Json(json!({ "message": "pong" }))
}
