//! Cart route handlers.
//!
//! `GET /cart` returns the session user's cart (or null). `POST /cart`
//! replaces it wholesale with the submitted item list.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::json;

use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::services::cart::{CartItemInput, CartService};
use crate::state::AppState;

/// One submitted line item.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItemPayload {
    pub product_id: i64,
    pub quantity: i64,
}

/// Whole-cart replacement request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetCartRequest {
    pub cart_items: Vec<CartItemPayload>,
}

/// Return the current user's cart, or null when none exists yet.
pub async fn get_cart(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse> {
    let cart = CartService::new(state.pool()).get(user.id).await?;

    Ok(Json(json!({ "cart": cart })))
}

/// Replace the current user's cart with the submitted item list.
pub async fn set_cart(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    payload: std::result::Result<Json<SetCartRequest>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let Json(req) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;

    let inputs: Vec<CartItemInput> = req
        .cart_items
        .iter()
        .map(|item| CartItemInput {
            product_id: item.product_id,
            quantity: item.quantity,
        })
        .collect();

    let cart = CartService::new(state.pool()).replace(user.id, &inputs).await?;

    tracing::debug!(
        user_id = %user.id,
        items = cart.cart_items.len(),
        "cart replaced"
    );

    Ok(Json(json!({ "cart": cart })))
}
