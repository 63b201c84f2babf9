//! Catalog feed import.
//!
//! At startup the product table is populated from an external JSON feed.
//! Identities already present are left untouched, so re-running the server
//! against a seeded database is a no-op. A failed import is logged by the
//! caller and does not prevent the server from starting.

use serde::Deserialize;
use sqlx::PgPool;
use thiserror::Error;

use clementine_core::{Price, ProductId};

use crate::db::RepositoryError;
use crate::db::products::{NewProduct, ProductRepository};

/// Errors that can occur during the feed import.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Fetching or decoding the feed failed.
    #[error("feed request failed: {0}")]
    Feed(#[from] reqwest::Error),

    /// Writing a product row failed.
    #[error("storage error: {0}")]
    Storage(#[from] RepositoryError),
}

/// One product as delivered by the feed.
///
/// Unknown fields (e.g. the feed's rating object) are ignored.
#[derive(Debug, Deserialize)]
struct FeedProduct {
    id: i64,
    title: String,
    price: f64,
    #[serde(default)]
    description: String,
    #[serde(default)]
    category: String,
    #[serde(default)]
    image: String,
}

impl FeedProduct {
    /// Convert to a persistable product, or `None` when the feed row is
    /// unusable (out-of-range identity, non-finite price).
    fn into_new_product(self) -> Option<NewProduct> {
        let id = ProductId::new(self.id);
        if !id.is_valid() {
            return None;
        }
        let price = Price::from_feed_f64(self.price)?;

        Some(NewProduct {
            id,
            title: self.title,
            price,
            description: self.description,
            category: self.category,
            image: self.image,
        })
    }
}

/// Import the feed into the product table, skipping existing identities.
///
/// Returns the number of newly written rows.
///
/// # Errors
///
/// Returns `CatalogError::Feed` if the feed cannot be fetched or decoded,
/// `CatalogError::Storage` if a row cannot be written.
pub async fn import(pool: &PgPool, feed_url: &str) -> Result<usize, CatalogError> {
    let products: Vec<FeedProduct> = reqwest::get(feed_url)
        .await?
        .error_for_status()?
        .json()
        .await?;

    let repo = ProductRepository::new(pool);
    let total = products.len();
    let mut inserted = 0;

    for feed_product in products {
        let feed_id = feed_product.id;
        let Some(product) = feed_product.into_new_product() else {
            tracing::warn!(feed_id, "skipping unusable feed product");
            continue;
        };

        if repo.insert_if_absent(&product).await? {
            inserted += 1;
        }
    }

    tracing::info!(total, inserted, "catalog feed imported");
    Ok(inserted)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_feed_deserialization_ignores_rating() {
        let body = r#"[
            {
                "id": 1,
                "title": "Fjallraven Backpack",
                "price": 109.95,
                "description": "Fits 15 inch laptops",
                "category": "men's clothing",
                "image": "https://example.com/backpack.jpg",
                "rating": { "rate": 3.9, "count": 120 }
            },
            { "id": 2, "title": "Casual T-Shirt", "price": 22.3 }
        ]"#;

        let products: Vec<FeedProduct> = serde_json::from_str(body).unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].id, 1);
        assert_eq!(products[1].description, "");
    }

    #[test]
    fn test_into_new_product_converts_price_to_decimal() {
        let feed = FeedProduct {
            id: 1,
            title: "Backpack".to_string(),
            price: 109.95,
            description: String::new(),
            category: String::new(),
            image: String::new(),
        };

        let product = feed.into_new_product().unwrap();
        assert_eq!(product.price, Price::from_cents(10995));
    }

    #[test]
    fn test_into_new_product_rejects_bad_rows() {
        let bad_id = FeedProduct {
            id: 0,
            title: String::new(),
            price: 1.0,
            description: String::new(),
            category: String::new(),
            image: String::new(),
        };
        assert!(bad_id.into_new_product().is_none());

        let bad_price = FeedProduct {
            id: 5,
            title: String::new(),
            price: f64::NAN,
            description: String::new(),
            category: String::new(),
            image: String::new(),
        };
        assert!(bad_price.into_new_product().is_none());
    }
}
