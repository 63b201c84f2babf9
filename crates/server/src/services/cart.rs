//! Cart service.
//!
//! Maintains a single authoritative line-item list per user with
//! whole-list replacement semantics. Validation happens up front; nothing
//! is written when any item is rejected.

use core::fmt;

use sqlx::PgPool;
use thiserror::Error;

use clementine_core::{ProductId, UserId};

use crate::db::carts::CartRepository;
use crate::db::RepositoryError;
use crate::models::{Cart, NewCartItem};

/// Which field of a line item failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemField {
    ProductId,
    Quantity,
}

impl fmt::Display for ItemField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ProductId => write!(f, "productId"),
            Self::Quantity => write!(f, "quantity"),
        }
    }
}

/// Errors that can occur during cart operations.
#[derive(Debug, Error)]
pub enum CartError {
    /// A line item failed validation; names the offending index and field.
    #[error("invalid {field} at item {index}: must be >= 1")]
    InvalidItem { index: usize, field: ItemField },

    /// Storage failure; the stored cart is unchanged.
    #[error("storage error: {0}")]
    Storage(#[from] RepositoryError),
}

/// A line item as received from the client, before validation.
#[derive(Debug, Clone, Copy)]
pub struct CartItemInput {
    pub product_id: i64,
    pub quantity: i64,
}

/// Cart service.
pub struct CartService<'a> {
    carts: CartRepository<'a>,
}

impl<'a> CartService<'a> {
    /// Create a new cart service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            carts: CartRepository::new(pool),
        }
    }

    /// Get the user's cart with items and products eager-loaded.
    ///
    /// `Ok(None)` means the user has not written a cart yet.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Storage` if the lookup fails.
    pub async fn get(&self, user_id: UserId) -> Result<Option<Cart>, CartError> {
        Ok(self.carts.get_for_user(user_id).await?)
    }

    /// Replace the user's entire cart with the given items.
    ///
    /// An empty list is valid and empties the cart without deleting the cart
    /// row. On success the stored line items equal the input exactly, in
    /// input order, with fresh identities.
    ///
    /// No locking is taken across concurrent replaces for the same user;
    /// the last transaction to commit wins.
    ///
    /// # Errors
    ///
    /// Returns `CartError::InvalidItem` before any storage mutation when an
    /// item is out of range. Returns `CartError::Storage` when the
    /// transactional replacement fails (and rolls back).
    pub async fn replace(
        &self,
        user_id: UserId,
        inputs: &[CartItemInput],
    ) -> Result<Cart, CartError> {
        let items = validate_items(inputs)?;
        Ok(self.carts.replace_items(user_id, &items).await?)
    }
}

/// Validate every input item, reporting the first offending index and field.
fn validate_items(inputs: &[CartItemInput]) -> Result<Vec<NewCartItem>, CartError> {
    inputs
        .iter()
        .enumerate()
        .map(|(index, item)| {
            if item.product_id < ProductId::MIN {
                return Err(CartError::InvalidItem {
                    index,
                    field: ItemField::ProductId,
                });
            }

            let quantity = i32::try_from(item.quantity).map_err(|_| CartError::InvalidItem {
                index,
                field: ItemField::Quantity,
            })?;
            if quantity < 1 {
                return Err(CartError::InvalidItem {
                    index,
                    field: ItemField::Quantity,
                });
            }

            Ok(NewCartItem {
                product_id: ProductId::new(item.product_id),
                quantity,
            })
        })
        .collect()
}
