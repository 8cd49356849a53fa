//! The storage backend contract.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use vietlong_core::{OrderId, OrderStatus, ProductId, UserId};

use crate::models::{Order, Product, ProductPatch, UserRecord};

/// Errors that can occur in a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// HTTP request to the spreadsheet web API failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Database operation failed.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// (De)serialization of a persisted record failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Reading or writing the local data file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A stored value could not be interpreted.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Unique-constraint style conflict (e.g. duplicate email).
    #[error("conflict: {0}")]
    Conflict(String),

    /// The backend could not be reached after exhausting retries.
    #[error("backend unavailable: {0}")]
    Unavailable(String),
}

/// Result type alias for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// A shared, dynamically-dispatched backend handle.
pub type DynBackend = Arc<dyn StorageBackend>;

/// Persistence contract shared by all backends.
///
/// Mutations return the full refreshed collection - callers replace their
/// local view wholesale instead of patching it. Updates and deletes
/// targeting an unknown identifier are silent no-ops (the collection comes
/// back unchanged); there is no last-writer-wins protection beyond whatever
/// the underlying store provides.
#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// Fetch the product catalog, in insertion order.
    async fn get_products(&self) -> Result<Vec<Product>>;

    /// Append a product and return the refreshed catalog.
    async fn save_product(&self, product: Product) -> Result<Vec<Product>>;

    /// Merge a partial update into the matching product and return the
    /// refreshed catalog.
    async fn update_product(&self, id: &ProductId, patch: ProductPatch) -> Result<Vec<Product>>;

    /// Remove a product and return the refreshed catalog.
    async fn delete_product(&self, id: &ProductId) -> Result<Vec<Product>>;

    /// Fetch all orders, in insertion order.
    async fn get_orders(&self) -> Result<Vec<Order>>;

    /// Append an order and return the refreshed order list.
    async fn save_order(&self, order: Order) -> Result<Vec<Order>>;

    /// Overwrite the status of the matching order and return the refreshed
    /// order list.
    async fn update_order_status(&self, id: &OrderId, status: OrderStatus) -> Result<Vec<Order>>;

    /// Fetch all user records (including password hashes).
    async fn get_users(&self) -> Result<Vec<UserRecord>>;

    /// Append a user record.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Conflict`] if the email is already taken and
    /// the backend enforces uniqueness.
    async fn save_user(&self, user: UserRecord) -> Result<()>;

    /// Remove a user and return the refreshed user list.
    async fn delete_user(&self, id: &UserId) -> Result<Vec<UserRecord>>;

    /// Probe whether the backend is reachable. Never retries.
    async fn check_connection(&self) -> bool;
}
