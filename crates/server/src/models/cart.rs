//! Cart domain types.

use serde::Serialize;

use clementine_core::{CartId, CartItemId, ProductId, UserId};

use super::product::Product;

/// A user's cart with its line items, products eager-loaded.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    pub id: CartId,
    pub user_id: UserId,
    pub cart_items: Vec<CartItem>,
}

/// One (product, quantity) line within a cart.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: CartItemId,
    pub cart_id: CartId,
    pub product_id: ProductId,
    pub quantity: i32,
    pub product: Product,
}

/// A validated line item about to be written.
///
/// Produced by the cart service after input validation; identities are
/// minted at insert time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewCartItem {
    pub product_id: ProductId,
    pub quantity: i32,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use clementine_core::Price;

    #[test]
    fn test_cart_json_shape() {
        let cart_id = CartId::new_random();
        let cart = Cart {
            id: cart_id,
            user_id: UserId::new_random(),
            cart_items: vec![CartItem {
                id: CartItemId::new_random(),
                cart_id,
                product_id: ProductId::new(7),
                quantity: 2,
                product: Product {
                    id: ProductId::new(7),
                    title: "White Gold Ring".to_string(),
                    price: Price::from_cents(999),
                    description: String::new(),
                    category: "jewelery".to_string(),
                    image: String::new(),
                },
            }],
        };

        let json = serde_json::to_value(&cart).unwrap();
        assert_eq!(json["id"], cart_id.to_string());
        let items = json["cartItems"].as_array().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["productId"], 7);
        assert_eq!(items[0]["quantity"], 2);
        assert_eq!(items[0]["product"]["title"], "White Gold Ring");
    }
}
