//! Cart aggregator.
//!
//! A session-scoped list of (product, quantity) lines. Every operation is a
//! total function over the in-memory list - there are no failure paths and
//! no stock checks here. The cart is never persisted to the storage
//! backend; it lives and dies with the session.

use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use vietlong_core::{Price, ProductId};
use vietlong_storage::{CartItem, Product};

use crate::models::session_keys;

/// The shopping cart.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// The cart lines, in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items
            .iter()
            .fold(0_u32, |acc, item| acc.saturating_add(item.quantity))
    }

    /// Sum of line totals, `None` on overflow.
    #[must_use]
    pub fn subtotal(&self) -> Option<Price> {
        self.items
            .iter()
            .try_fold(Price::ZERO, |acc, item| acc.checked_add(item.line_total()?))
    }

    /// Add one unit of `product`.
    ///
    /// An existing line for the same product ID is incremented; otherwise a
    /// new line with quantity 1 is appended.
    pub fn add(&mut self, product: Product) {
        if let Some(item) = self.items.iter_mut().find(|i| i.product.id == product.id) {
            item.quantity = item.quantity.saturating_add(1);
        } else {
            self.items.push(CartItem::new(product, 1));
        }
    }

    /// Apply a quantity delta to the matching line.
    ///
    /// The resulting quantity is clamped to a minimum of 1 - a delta can
    /// never remove a line; use [`Cart::remove`] for that. Unknown IDs are
    /// ignored.
    pub fn update_quantity(&mut self, id: &ProductId, delta: i64) {
        if let Some(item) = self.items.iter_mut().find(|i| &i.product.id == id) {
            let quantity = i64::from(item.quantity).saturating_add(delta).max(1);
            item.quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        }
    }

    /// Drop the matching line unconditionally.
    pub fn remove(&mut self, id: &ProductId) {
        self.items.retain(|i| &i.product.id != id);
    }

    /// Merge past order lines into the cart ("buy again").
    ///
    /// Quantities add up for products already in the cart; unknown lines
    /// are appended as copies.
    pub fn merge(&mut self, items: &[CartItem]) {
        for incoming in items {
            if let Some(existing) = self
                .items
                .iter_mut()
                .find(|i| i.product.id == incoming.product.id)
            {
                existing.quantity = existing.quantity.saturating_add(incoming.quantity);
            } else {
                self.items.push(incoming.clone());
            }
        }
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }
}

/// Load the cart from the session, empty if absent.
pub async fn load(session: &Session) -> Cart {
    session
        .get::<Cart>(session_keys::CART)
        .await
        .ok()
        .flatten()
        .unwrap_or_default()
}

/// Write the cart back to the session.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn store(
    session: &Session,
    cart: &Cart,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::CART, cart).await
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use vietlong_core::ProductId;
    use vietlong_storage::local::seed_products;

    use super::*;

    fn product(idx: usize) -> Product {
        seed_products().into_iter().nth(idx).unwrap()
    }

    #[test]
    fn test_adding_same_product_twice_merges_lines() {
        let mut cart = Cart::new();
        cart.add(product(0));
        cart.add(product(0));

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].quantity, 2);
    }

    #[test]
    fn test_adding_different_products_appends() {
        let mut cart = Cart::new();
        cart.add(product(0));
        cart.add(product(1));

        assert_eq!(cart.items().len(), 2);
        assert_eq!(cart.item_count(), 2);
    }

    #[test]
    fn test_quantity_delta_clamps_at_one() {
        let mut cart = Cart::new();
        cart.add(product(0));
        let id = cart.items()[0].product.id.clone();

        cart.update_quantity(&id, -100);
        assert_eq!(cart.items()[0].quantity, 1);

        cart.update_quantity(&id, 5);
        assert_eq!(cart.items()[0].quantity, 6);
    }

    #[test]
    fn test_update_unknown_id_is_ignored() {
        let mut cart = Cart::new();
        cart.add(product(0));
        cart.update_quantity(&ProductId::new("P-MISSING"), 3);
        assert_eq!(cart.items()[0].quantity, 1);
    }

    #[test]
    fn test_remove_drops_line() {
        let mut cart = Cart::new();
        cart.add(product(0));
        cart.add(product(1));
        let id = cart.items()[0].product.id.clone();

        cart.remove(&id);
        assert_eq!(cart.items().len(), 1);
        assert_ne!(cart.items()[0].product.id, id);
    }

    #[test]
    fn test_merge_adds_quantities_and_appends() {
        let mut cart = Cart::new();
        cart.add(product(0));

        let past_order_items = vec![
            CartItem::new(product(0), 2),
            CartItem::new(product(2), 1),
        ];
        cart.merge(&past_order_items);

        assert_eq!(cart.items().len(), 2);
        assert_eq!(cart.items()[0].quantity, 3);
        assert_eq!(cart.items()[1].quantity, 1);
    }

    #[test]
    fn test_subtotal_sums_line_totals() {
        let mut cart = Cart::new();
        cart.add(product(0)); // 29_900_000
        cart.add(product(0));
        cart.add(product(2)); // 5_900_000

        assert_eq!(cart.subtotal(), Some(Price::new(65_700_000)));
    }

    #[test]
    fn test_clear_empties_cart() {
        let mut cart = Cart::new();
        cart.add(product(0));
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.subtotal(), Some(Price::ZERO));
    }
}
