//! Order management handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use vietlong_core::{OrderId, OrderStatus};
use vietlong_storage::{Order, StorageBackend};

use crate::error::Result;
use crate::middleware::RequireAdminAuth;
use crate::services::orders::OrderAdminService;
use crate::state::AppState;

/// An order plus display metadata for the admin list.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminOrderView {
    #[serde(flatten)]
    pub order: Order,
    /// 0..=3 for the linear statuses, absent for a cancelled order.
    pub progress: Option<usize>,
    /// Vietnamese status label.
    pub status_label: &'static str,
}

impl From<Order> for AdminOrderView {
    fn from(order: Order) -> Self {
        let progress = order.status.progress_index();
        let status_label = order.status.label_vi();
        Self {
            order,
            progress,
            status_label,
        }
    }
}

/// Status-update input.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusInput {
    pub status: OrderStatus,
}

/// All orders, oldest first.
#[instrument(skip(state, _admin))]
pub async fn index(
    State(state): State<AppState>,
    _admin: RequireAdminAuth,
) -> Result<Json<Vec<AdminOrderView>>> {
    let orders = state.store().get_orders().await?;
    Ok(Json(orders.into_iter().map(AdminOrderView::from).collect()))
}

/// Overwrite the status of an order.
#[instrument(skip(state, _admin, input))]
pub async fn update_status(
    State(state): State<AppState>,
    _admin: RequireAdminAuth,
    Path(id): Path<String>,
    Json(input): Json<UpdateStatusInput>,
) -> Result<Json<Vec<AdminOrderView>>> {
    let id = OrderId::new(id);
    let orders =
        OrderAdminService::new(state.store().as_ref(), state.config().strict_transitions)
            .update_status(&id, input.status)
            .await?;

    Ok(Json(orders.into_iter().map(AdminOrderView::from).collect()))
}
