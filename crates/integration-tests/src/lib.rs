//! Integration tests for Clementine.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the database and the server
//! docker compose up -d postgres
//! cargo run -p clementine-server
//!
//! # Run integration tests (they are #[ignore]d by default)
//! cargo test -p clementine-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `auth_flow` - Registration, login, logout, session behavior
//! - `cart_flow` - Whole-cart replacement semantics
//!
//! The tests talk to a running server over HTTP with a cookie jar per
//! simulated client; they create fresh accounts with random emails so runs
//! do not interfere with each other.

use reqwest::Client;

/// Base URL for the backend (configurable via environment).
#[must_use]
pub fn base_url() -> String {
    std::env::var("CLEMENTINE_BASE_URL").unwrap_or_else(|_| "http://localhost:8080".to_string())
}

/// A client with its own cookie jar, i.e. its own session.
///
/// # Panics
///
/// Panics if the client cannot be constructed.
#[must_use]
pub fn session_client() -> Client {
    Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client")
}

/// A random email address so test runs never collide.
#[must_use]
pub fn random_email() -> String {
    format!("it-{}@example.com", uuid::Uuid::new_v4().simple())
}
