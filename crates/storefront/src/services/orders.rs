//! Order lifecycle: checkout and order history.
//!
//! `place_order` converts a cart snapshot into an immutable order record.
//! Missing user or empty cart is a silent no-op - the storefront treats an
//! impossible checkout as "nothing happened", not as an error.

use chrono::Utc;
use thiserror::Error;

use vietlong_core::{OrderId, OrderStatus, UserId};
use vietlong_storage::{Order, StorageBackend, StorageError, User};

use crate::services::cart::Cart;

/// Errors that can occur while placing or reading orders.
#[derive(Debug, Error)]
pub enum OrderError {
    /// Storage backend failure.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// The cart total overflowed - cannot happen with realistic prices.
    #[error("order total overflow")]
    TotalOverflow,
}

/// Order lifecycle service.
pub struct OrderService<'a> {
    store: &'a dyn StorageBackend,
}

impl<'a> OrderService<'a> {
    /// Create a new order service.
    #[must_use]
    pub const fn new(store: &'a dyn StorageBackend) -> Self {
        Self { store }
    }

    /// Convert the cart into a persisted order.
    ///
    /// Preconditions: a logged-in user and a non-empty cart. When either is
    /// missing the operation silently returns `None` and the order list is
    /// left untouched.
    ///
    /// On success the cart is cleared and the freshly generated order is
    /// returned; the backend has already re-read the full order collection
    /// as part of the mutation.
    ///
    /// # Errors
    ///
    /// Returns an error if the total overflows or persisting fails. The
    /// cart is only cleared after the order is safely persisted.
    pub async fn place_order(
        &self,
        cart: &mut Cart,
        user: Option<&User>,
        address: &str,
        phone: &str,
    ) -> Result<Option<Order>, OrderError> {
        let Some(user) = user else {
            return Ok(None);
        };
        if cart.is_empty() {
            return Ok(None);
        }

        let total = cart.subtotal().ok_or(OrderError::TotalOverflow)?;
        let order = Order {
            id: OrderId::generate(),
            user_id: user.id.clone(),
            user_name: user.name.clone(),
            user_email: user.email.to_string(),
            items: cart.items().to_vec(),
            total,
            status: OrderStatus::Pending,
            created_at: Utc::now(),
            address: address.to_owned(),
            phone: phone.to_owned(),
        };

        let orders = self.store.save_order(order.clone()).await?;
        tracing::info!(
            order_id = %order.id,
            total = %order.total,
            order_count = orders.len(),
            "order placed"
        );

        cart.clear();
        Ok(Some(order))
    }

    /// Orders belonging to `user_id`, newest last (insertion order).
    ///
    /// # Errors
    ///
    /// Returns an error if the backend read fails.
    pub async fn orders_for_user(&self, user_id: &UserId) -> Result<Vec<Order>, OrderError> {
        let orders = self.store.get_orders().await?;
        Ok(orders
            .into_iter()
            .filter(|o| &o.user_id == user_id)
            .collect())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use vietlong_core::{Email, Price, Role};
    use vietlong_storage::{LocalBackend, ProductPatch, StorageBackend};

    use super::*;

    fn sample_user() -> User {
        User {
            id: UserId::new("customer-1"),
            email: Email::parse("a@example.com").unwrap(),
            name: "Nguyễn Văn A".to_owned(),
            phone: None,
            role: Role::Customer,
            created_at: Utc::now(),
        }
    }

    async fn cart_with_first_product(store: &LocalBackend) -> Cart {
        let products = store.get_products().await.unwrap();
        let mut cart = Cart::new();
        cart.add(products.into_iter().next().unwrap());
        cart
    }

    #[tokio::test]
    async fn test_place_order_without_user_is_a_no_op() {
        let store = LocalBackend::in_memory();
        let mut cart = cart_with_first_product(&store).await;

        let service = OrderService::new(&store);
        let placed = service
            .place_order(&mut cart, None, "Hanoi", "0900000000")
            .await
            .unwrap();

        assert!(placed.is_none());
        assert!(!cart.is_empty());
        assert!(store.get_orders().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_place_order_with_empty_cart_is_a_no_op() {
        let store = LocalBackend::in_memory();
        let mut cart = Cart::new();
        let user = sample_user();

        let service = OrderService::new(&store);
        let placed = service
            .place_order(&mut cart, Some(&user), "Hanoi", "0900000000")
            .await
            .unwrap();

        assert!(placed.is_none());
        assert!(store.get_orders().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_checkout_scenario() {
        // Cart: one iPhone 15 Pro Max at 29 900 000 đồng.
        let store = LocalBackend::in_memory();
        let mut cart = cart_with_first_product(&store).await;
        let user = sample_user();

        let service = OrderService::new(&store);
        let order = service
            .place_order(&mut cart, Some(&user), "Hanoi", "0900000000")
            .await
            .unwrap()
            .expect("order should be placed");

        assert_eq!(order.total, Price::new(29_900_000));
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.items.len(), 1);
        assert_eq!(order.address, "Hanoi");
        assert_eq!(order.phone, "0900000000");
        assert!(order.id.as_str().starts_with("ORD-"));
        assert!(cart.is_empty());

        let orders = store.get_orders().await.unwrap();
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].id, order.id);
    }

    #[tokio::test]
    async fn test_total_is_frozen_against_later_price_changes() {
        let store = LocalBackend::in_memory();
        let mut cart = cart_with_first_product(&store).await;
        let product_id = cart.items()[0].product.id.clone();
        let user = sample_user();

        let service = OrderService::new(&store);
        let order = service
            .place_order(&mut cart, Some(&user), "Hanoi", "0900000000")
            .await
            .unwrap()
            .unwrap();

        // Reprice the catalog entry after checkout.
        store
            .update_product(
                &product_id,
                ProductPatch {
                    price: Some(Price::new(1)),
                    ..ProductPatch::default()
                },
            )
            .await
            .unwrap();

        let stored = store.get_orders().await.unwrap();
        assert_eq!(stored[0].total, Price::new(29_900_000));
        assert_eq!(stored[0].computed_total(), Some(order.total));
        assert_eq!(stored[0].items[0].product.price, Price::new(29_900_000));
    }

    #[tokio::test]
    async fn test_orders_for_user_filters_by_owner() {
        let store = LocalBackend::in_memory();
        let service = OrderService::new(&store);
        let user = sample_user();

        let mut cart = cart_with_first_product(&store).await;
        service
            .place_order(&mut cart, Some(&user), "Hanoi", "0900000000")
            .await
            .unwrap();

        let mine = service.orders_for_user(&user.id).await.unwrap();
        assert_eq!(mine.len(), 1);

        let theirs = service
            .orders_for_user(&UserId::new("customer-2"))
            .await
            .unwrap();
        assert!(theirs.is_empty());
    }
}
