//! Cart repository: lookup with eager-loaded products, and the wholesale
//! replacement of line items inside a single transaction.

use sqlx::PgPool;

use clementine_core::{CartId, CartItemId, Price, ProductId, UserId};

use super::RepositoryError;
use crate::models::{Cart, CartItem, NewCartItem, Product};

/// Line items joined to their products, in client order.
const ITEMS_FOR_CART: &str = r"
    SELECT ci.id, ci.cart_id, ci.product_id, ci.quantity,
           p.title, p.price, p.description, p.category, p.image
    FROM cart_item ci
    JOIN product p ON p.id = ci.product_id
    WHERE ci.cart_id = $1
    ORDER BY ci.position
";

#[derive(sqlx::FromRow)]
struct CartRow {
    id: CartId,
    user_id: UserId,
}

#[derive(sqlx::FromRow)]
struct ItemRow {
    id: CartItemId,
    cart_id: CartId,
    product_id: ProductId,
    quantity: i32,
    title: String,
    price: Price,
    description: String,
    category: String,
    image: String,
}

impl ItemRow {
    fn into_item(self) -> CartItem {
        CartItem {
            id: self.id,
            cart_id: self.cart_id,
            product_id: self.product_id,
            quantity: self.quantity,
            product: Product {
                id: self.product_id,
                title: self.title,
                price: self.price,
                description: self.description,
                category: self.category,
                image: self.image,
            },
        }
    }
}

/// Repository for cart database operations.
pub struct CartRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CartRepository<'a> {
    /// Create a new cart repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get a user's cart with its line items and their products.
    ///
    /// Returns `None` when the user has no cart yet; that is a normal state,
    /// not an error.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn get_for_user(&self, user_id: UserId) -> Result<Option<Cart>, RepositoryError> {
        let cart: Option<CartRow> =
            sqlx::query_as("SELECT id, user_id FROM cart WHERE user_id = $1")
                .bind(user_id)
                .fetch_optional(self.pool)
                .await?;

        let Some(cart) = cart else {
            return Ok(None);
        };

        let items: Vec<ItemRow> = sqlx::query_as(ITEMS_FOR_CART)
            .bind(cart.id)
            .fetch_all(self.pool)
            .await?;

        Ok(Some(Cart {
            id: cart.id,
            user_id: cart.user_id,
            cart_items: items.into_iter().map(ItemRow::into_item).collect(),
        }))
    }

    /// Replace the user's entire line-item list.
    ///
    /// Runs in one transaction: the cart row is created on first write, the
    /// old items are deleted, the new ones inserted with fresh identities,
    /// and the result read back — so a concurrent reader sees either the old
    /// list or the new one, never a mix. The cart row itself survives an
    /// empty replacement.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any statement fails; the
    /// transaction rolls back and the stored cart is unchanged.
    pub async fn replace_items(
        &self,
        user_id: UserId,
        items: &[NewCartItem],
    ) -> Result<Cart, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let existing: Option<CartRow> =
            sqlx::query_as("SELECT id, user_id FROM cart WHERE user_id = $1")
                .bind(user_id)
                .fetch_optional(&mut *tx)
                .await?;

        let cart_id = match existing {
            Some(cart) => {
                sqlx::query("DELETE FROM cart_item WHERE cart_id = $1")
                    .bind(cart.id)
                    .execute(&mut *tx)
                    .await?;
                sqlx::query("UPDATE cart SET updated_at = now() WHERE id = $1")
                    .bind(cart.id)
                    .execute(&mut *tx)
                    .await?;
                cart.id
            }
            None => {
                let cart_id = CartId::new_random();
                sqlx::query("INSERT INTO cart (id, user_id) VALUES ($1, $2)")
                    .bind(cart_id)
                    .bind(user_id)
                    .execute(&mut *tx)
                    .await?;
                cart_id
            }
        };

        insert_items(&mut tx, cart_id, items).await?;

        // Read back inside the transaction so the caller observes exactly
        // the committed state.
        let rows: Vec<ItemRow> = sqlx::query_as(ITEMS_FOR_CART)
            .bind(cart_id)
            .fetch_all(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(Cart {
            id: cart_id,
            user_id,
            cart_items: rows.into_iter().map(ItemRow::into_item).collect(),
        })
    }
}

/// Insert the new line items with fresh identities and client positions.
async fn insert_items(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    cart_id: CartId,
    items: &[NewCartItem],
) -> Result<(), RepositoryError> {
    for (index, item) in items.iter().enumerate() {
        let position = i32::try_from(index)
            .map_err(|_| RepositoryError::Conflict("cart has too many line items".to_owned()))?;

        sqlx::query(
            r"
            INSERT INTO cart_item (id, cart_id, product_id, quantity, position)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(CartItemId::new_random())
        .bind(cart_id)
        .bind(item.product_id)
        .bind(item.quantity)
        .bind(position)
        .execute(&mut **tx)
        .await?;
    }

    Ok(())
}
