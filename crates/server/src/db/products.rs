//! Product repository for database operations.
//!
//! Products are written once by the startup feed import; everything else
//! only reads them through the cart join.

use sqlx::PgPool;

use clementine_core::{Price, ProductId};

use super::RepositoryError;

/// A catalog row as delivered by the feed, before it has been persisted.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub id: ProductId,
    pub title: String,
    pub price: Price,
    pub description: String,
    pub category: String,
    pub image: String,
}

/// Repository for product database operations.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a product unless its feed identity is already present.
    ///
    /// Returns `true` if a row was written, `false` if the identity existed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn insert_if_absent(&self, product: &NewProduct) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            r"
            INSERT INTO product (id, title, price, description, category, image)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (id) DO NOTHING
            ",
        )
        .bind(product.id)
        .bind(&product.title)
        .bind(product.price)
        .bind(&product.description)
        .bind(&product.category)
        .bind(&product.image)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Number of catalog rows currently stored.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self) -> Result<i64, RepositoryError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM product")
            .fetch_one(self.pool)
            .await?;

        Ok(count)
    }
}
