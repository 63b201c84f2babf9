//! Product domain type.

use serde::Serialize;

use clementine_core::{Price, ProductId};

/// A catalog product.
///
/// Read-only from this service's perspective: rows are written once by the
/// startup feed import and referenced by cart line items afterwards.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub price: Price,
    pub description: String,
    pub category: String,
    pub image: String,
}
