//! Health route handler.

use std::time::Duration;

use axum::{Json, extract::State, response::IntoResponse};
use serde::Serialize;

use crate::state::AppState;

/// Probe timeout; a wedged pool must not wedge the health endpoint.
const PROBE_TIMEOUT: Duration = Duration::from_secs(1);

/// Health report: probe outcome plus pool statistics.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthBody {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub open_connections: u32,
    pub idle_connections: usize,
}

/// Ping the database and report connection statistics.
///
/// Always responds 200; the `status` field carries the verdict.
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let pool = state.pool();
    let probe = tokio::time::timeout(
        PROBE_TIMEOUT,
        sqlx::query("SELECT 1").fetch_one(pool),
    )
    .await;

    let error = match probe {
        Ok(Ok(_)) => None,
        Ok(Err(e)) => Some(format!("db down: {e}")),
        Err(_) => Some("db down: probe timed out".to_string()),
    };

    let body = HealthBody {
        status: if error.is_none() { "up" } else { "down" },
        error,
        open_connections: pool.size(),
        idle_connections: pool.num_idle(),
    };

    Json(body)
}
