//! Admin-side order lifecycle operations.
//!
//! Status updates overwrite unconditionally - that is the historical
//! contract, and the admin UI exposes the full status enum as free
//! choices. Because unrestricted transitions are likely unintentional,
//! every move outside the forward lifecycle is logged, and strict mode
//! turns it into a rejection.

use thiserror::Error;

use vietlong_core::{OrderId, OrderStatus};
use vietlong_storage::{Order, StorageBackend, StorageError};

/// Errors that can occur when updating an order.
#[derive(Debug, Error)]
pub enum OrderUpdateError {
    /// Storage backend failure.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Rejected by strict transition checking.
    #[error("invalid status transition: {from} -> {to}")]
    InvalidTransition {
        /// Current status.
        from: OrderStatus,
        /// Requested status.
        to: OrderStatus,
    },
}

/// Admin order service.
pub struct OrderAdminService<'a> {
    store: &'a dyn StorageBackend,
    strict_transitions: bool,
}

impl<'a> OrderAdminService<'a> {
    /// Create a new admin order service.
    #[must_use]
    pub const fn new(store: &'a dyn StorageBackend, strict_transitions: bool) -> Self {
        Self {
            store,
            strict_transitions,
        }
    }

    /// Overwrite the status of an order and return the refreshed list.
    ///
    /// An unknown order ID is a silent no-op. A non-forward transition
    /// (backward move, re-opening a completed order, un-cancelling) is
    /// logged as a warning; in strict mode it is rejected instead.
    ///
    /// # Errors
    ///
    /// Returns `OrderUpdateError::InvalidTransition` in strict mode for a
    /// non-forward transition, or a storage error.
    pub async fn update_status(
        &self,
        id: &OrderId,
        new_status: OrderStatus,
    ) -> Result<Vec<Order>, OrderUpdateError> {
        let orders = self.store.get_orders().await?;
        let current = orders.iter().find(|o| &o.id == id).map(|o| o.status);

        if let Some(current) = current
            && !current.can_transition_to(new_status)
        {
            if self.strict_transitions {
                return Err(OrderUpdateError::InvalidTransition {
                    from: current,
                    to: new_status,
                });
            }
            tracing::warn!(
                order_id = %id,
                from = %current,
                to = %new_status,
                "order status moved outside the forward lifecycle"
            );
        }

        Ok(self.store.update_order_status(id, new_status).await?)
    }
}
