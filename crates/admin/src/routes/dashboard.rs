//! Dashboard summary handler.

use axum::{Json, extract::State};
use serde::Serialize;
use tracing::instrument;

use vietlong_core::{OrderStatus, Price};

use vietlong_storage::StorageBackend;

use crate::error::Result;
use crate::middleware::RequireAdminAuth;
use crate::state::AppState;

/// Shop-wide counters for the admin landing view.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub product_count: usize,
    pub order_count: usize,
    pub pending_orders: usize,
    /// Sum of order totals, cancelled orders excluded.
    pub revenue: Price,
}

/// Compute the summary.
#[instrument(skip(state, _admin))]
pub async fn summary(
    State(state): State<AppState>,
    _admin: RequireAdminAuth,
) -> Result<Json<DashboardSummary>> {
    let products = state.store().get_products().await?;
    let orders = state.store().get_orders().await?;

    let pending_orders = orders
        .iter()
        .filter(|o| o.status == OrderStatus::Pending)
        .count();

    let revenue = orders
        .iter()
        .filter(|o| o.status != OrderStatus::Cancelled)
        .fold(Price::ZERO, |acc, o| {
            acc.checked_add(o.total).unwrap_or(Price::new(u64::MAX))
        });

    Ok(Json(DashboardSummary {
        product_count: products.len(),
        order_count: orders.len(),
        pending_orders,
        revenue,
    }))
}
