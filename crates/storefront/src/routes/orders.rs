//! Checkout and order history handlers.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use vietlong_storage::Order;

use crate::error::{AppError, Result};
use crate::middleware::{OptionalAuth, RequireAuth};
use crate::services::cart;
use crate::services::orders::OrderService;
use crate::state::AppState;

/// Checkout input.
#[derive(Debug, Deserialize)]
pub struct CheckoutInput {
    pub address: String,
    pub phone: String,
}

/// Checkout result.
///
/// `order` is `None` when the preconditions were not met (no user, empty
/// cart) - a silent no-op, mirrored in the payload rather than an error.
#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    pub order: Option<Order>,
}

/// An order plus its position in the linear progress display.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderView {
    #[serde(flatten)]
    pub order: Order,
    /// 0..=3 for the linear statuses, absent for a cancelled order.
    pub progress: Option<usize>,
}

impl From<Order> for OrderView {
    fn from(order: Order) -> Self {
        let progress = order.status.progress_index();
        Self { order, progress }
    }
}

/// Place an order from the session cart.
#[instrument(skip(state, session, user))]
pub async fn checkout(
    State(state): State<AppState>,
    session: Session,
    OptionalAuth(user): OptionalAuth,
    Json(input): Json<CheckoutInput>,
) -> Result<Json<CheckoutResponse>> {
    let mut cart = cart::load(&session).await;

    let order = OrderService::new(state.store().as_ref())
        .place_order(&mut cart, user.as_ref(), &input.address, &input.phone)
        .await?;

    // The cart was cleared on success; write the (possibly unchanged)
    // cart back either way.
    cart::store(&session, &cart)
        .await
        .map_err(|e| AppError::Internal(format!("failed to store cart: {e}")))?;

    Ok(Json(CheckoutResponse { order }))
}

/// Order history for the logged-in user.
#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn my_orders(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<Vec<OrderView>>> {
    let orders = OrderService::new(state.store().as_ref())
        .orders_for_user(&user.id)
        .await?;

    Ok(Json(orders.into_iter().map(OrderView::from).collect()))
}
