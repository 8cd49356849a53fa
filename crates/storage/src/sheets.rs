//! Spreadsheet backend: HTTP client for an Apps-Script-style web API.
//!
//! The API is a single endpoint: reads are `GET ?action=...`, mutations are
//! `POST` with a JSON body. Calls are retried a fixed number of times with
//! exponential backoff. Note that the same policy is applied to mutations,
//! so an ambiguous network failure on `saveOrder` can duplicate an order -
//! a known property of this backend, not a guarantee.
//!
//! Reads keep a last-known-good copy: if the sheet is unreachable after all
//! retries, the most recent successful response is served instead.

use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache;
use reqwest::Method;
use serde_json::json;

use vietlong_core::{OrderId, OrderStatus, ProductId, UserId};

use crate::backend::{Result, StorageBackend, StorageError};
use crate::models::{Order, Product, ProductPatch, UserRecord};

/// Attempts per call, including the first.
const MAX_RETRIES: u32 = 3;

/// Per-request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Cache key for last-known-good collections.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
enum CacheKey {
    Products,
    Orders,
}

/// Cached collection values.
#[derive(Debug, Clone)]
enum CacheValue {
    Products(Vec<Product>),
    Orders(Vec<Order>),
}

/// Spreadsheet web API backend.
pub struct SheetsBackend {
    client: reqwest::Client,
    base_url: String,
    last_good: Cache<CacheKey, CacheValue>,
}

impl SheetsBackend {
    /// Create a backend for the given web-app URL.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be constructed.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: base_url.into(),
            last_good: Cache::new(4),
        }
    }

    /// Issue a request, retrying transient failures with exponential
    /// backoff (1s, 2s, ... between attempts).
    async fn request_with_retry(
        &self,
        method: Method,
        query: &[(&str, &str)],
        body: Option<&serde_json::Value>,
    ) -> Result<reqwest::Response> {
        let mut last_err = StorageError::Unavailable("no attempts made".to_owned());

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                let delay = backoff_delay(attempt);
                tracing::warn!(
                    attempt,
                    delay_secs = delay.as_secs(),
                    "retrying sheet API call"
                );
                tokio::time::sleep(delay).await;
            }

            let mut request = self
                .client
                .request(method.clone(), &self.base_url)
                .query(query);
            if let Some(body) = body {
                request = request.json(body);
            }

            match request.send().await {
                Ok(response) if response.status().is_success() => return Ok(response),
                Ok(response) => {
                    last_err = StorageError::Unavailable(format!(
                        "sheet API returned HTTP {}",
                        response.status()
                    ));
                }
                Err(e) => {
                    last_err = StorageError::Http(e);
                }
            }
        }

        Err(last_err)
    }

    /// GET an action and decode the JSON payload.
    async fn fetch<T: serde::de::DeserializeOwned>(&self, action: &str) -> Result<T> {
        let response = self
            .request_with_retry(Method::GET, &[("action", action)], None)
            .await?;
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// POST a mutation body; the response body is ignored beyond status.
    async fn post(&self, body: &serde_json::Value) -> Result<()> {
        self.request_with_retry(Method::POST, &[], Some(body))
            .await?;
        Ok(())
    }
}

/// Delay before retry `attempt` (1-based): 2^(attempt-1) seconds.
fn backoff_delay(attempt: u32) -> Duration {
    Duration::from_secs(1_u64 << (attempt.saturating_sub(1)))
}

#[async_trait]
impl StorageBackend for SheetsBackend {
    async fn get_products(&self) -> Result<Vec<Product>> {
        match self.fetch::<Vec<Product>>("getProducts").await {
            Ok(products) => {
                self.last_good
                    .insert(CacheKey::Products, CacheValue::Products(products.clone()))
                    .await;
                Ok(products)
            }
            Err(e) => {
                if let Some(CacheValue::Products(cached)) =
                    self.last_good.get(&CacheKey::Products).await
                {
                    tracing::warn!(error = %e, "sheet unreachable, serving cached products");
                    return Ok(cached);
                }
                Err(e)
            }
        }
    }

    async fn save_product(&self, product: Product) -> Result<Vec<Product>> {
        self.post(&json!({ "action": "saveProduct", "product": product }))
            .await?;
        self.get_products().await
    }

    async fn update_product(&self, id: &ProductId, patch: ProductPatch) -> Result<Vec<Product>> {
        self.post(&json!({ "action": "updateProduct", "id": id, "updates": patch }))
            .await?;
        self.get_products().await
    }

    async fn delete_product(&self, id: &ProductId) -> Result<Vec<Product>> {
        self.post(&json!({ "action": "deleteProduct", "id": id }))
            .await?;
        self.get_products().await
    }

    async fn get_orders(&self) -> Result<Vec<Order>> {
        match self.fetch::<Vec<Order>>("getOrders").await {
            Ok(orders) => {
                self.last_good
                    .insert(CacheKey::Orders, CacheValue::Orders(orders.clone()))
                    .await;
                Ok(orders)
            }
            Err(e) => {
                if let Some(CacheValue::Orders(cached)) =
                    self.last_good.get(&CacheKey::Orders).await
                {
                    tracing::warn!(error = %e, "sheet unreachable, serving cached orders");
                    return Ok(cached);
                }
                Err(e)
            }
        }
    }

    async fn save_order(&self, order: Order) -> Result<Vec<Order>> {
        // The order itself is the body; the script appends a row per order.
        self.post(&serde_json::to_value(&order)?).await?;
        tracing::info!(order_id = %order.id, "order saved to sheet");
        self.get_orders().await
    }

    async fn update_order_status(&self, id: &OrderId, status: OrderStatus) -> Result<Vec<Order>> {
        self.post(&json!({
            "action": "updateOrder",
            "orderId": id,
            "status": status,
        }))
        .await?;
        self.get_orders().await
    }

    async fn get_users(&self) -> Result<Vec<UserRecord>> {
        self.fetch("getUsers").await
    }

    async fn save_user(&self, user: UserRecord) -> Result<()> {
        self.post(&json!({ "action": "saveUser", "user": user }))
            .await
    }

    async fn delete_user(&self, id: &UserId) -> Result<Vec<UserRecord>> {
        self.post(&json!({ "action": "deleteUser", "id": id }))
            .await?;
        self.get_users().await
    }

    async fn check_connection(&self) -> bool {
        // Single probe, no retry: this feeds readiness checks which have
        // their own cadence.
        let request = self
            .client
            .get(&self.base_url)
            .query(&[("action", "getProducts")]);
        matches!(request.send().await, Ok(resp) if resp.status().is_success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backoff_curve() {
        assert_eq!(backoff_delay(1), Duration::from_secs(1));
        assert_eq!(backoff_delay(2), Duration::from_secs(2));
        assert_eq!(backoff_delay(3), Duration::from_secs(4));
    }

    #[test]
    fn test_mutation_bodies_are_tagged_with_actions() {
        let id = ProductId::new("P-1");
        let body = json!({ "action": "deleteProduct", "id": id });
        assert_eq!(body["action"], "deleteProduct");
        assert_eq!(body["id"], "P-1");

        let body = json!({
            "action": "updateOrder",
            "orderId": OrderId::new("ORD-AAAAAA"),
            "status": OrderStatus::Shipped,
        });
        assert_eq!(body["status"], "SHIPPED");
    }
}
