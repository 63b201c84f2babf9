//! Authentication route handlers.
//!
//! Registration and login establish the session; logout destroys it.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::json;
use tower_sessions::Session;

use crate::error::{AppError, Result};
use crate::middleware::{RequireAuth, clear_current_user, set_current_user};
use crate::models::{CurrentUser, PublicUser};
use crate::services::auth::AuthService;
use crate::state::AppState;

/// Registration request body.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: String,
}

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Handle registration.
///
/// Creates the account and logs the new user in by establishing a session.
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    payload: std::result::Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let Json(req) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;

    let user = AuthService::new(state.pool())
        .register(&req.email, &req.password, &req.name)
        .await?;

    set_current_user(&session, &CurrentUser::from(&user))
        .await
        .map_err(|e| AppError::Internal(format!("failed to establish session: {e}")))?;

    tracing::info!(user_id = %user.id, "user registered");

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Registration successful",
            "user": PublicUser::from(&user),
        })),
    ))
}

/// Handle login.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    payload: std::result::Result<Json<LoginRequest>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let Json(req) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;

    let user = AuthService::new(state.pool())
        .login(&req.email, &req.password)
        .await?;

    set_current_user(&session, &CurrentUser::from(&user))
        .await
        .map_err(|e| AppError::Internal(format!("failed to establish session: {e}")))?;

    tracing::info!(user_id = %user.id, "user logged in");

    Ok(Json(json!({
        "message": "Login successful",
        "user": PublicUser::from(&user),
    })))
}

/// Handle logout.
///
/// Clears the session identity and destroys the session; the cookie is
/// expired by the session layer.
pub async fn logout(
    RequireAuth(user): RequireAuth,
    session: Session,
) -> Result<impl IntoResponse> {
    clear_current_user(&session)
        .await
        .map_err(|e| AppError::Internal(format!("failed to clear session: {e}")))?;

    tracing::info!(user_id = %user.id, "user logged out");

    Ok(Json(json!({ "message": "Logged out" })))
}

/// Return the identity carried by the current session.
pub async fn me(RequireAuth(user): RequireAuth) -> Json<serde_json::Value> {
    Json(json!({ "user": user }))
}
