//! Cart route handlers.
//!
//! The cart lives in the session; every handler loads it, applies one
//! operation, writes it back, and returns the resulting view.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use vietlong_core::{OrderId, Price, ProductId};
use vietlong_storage::{CartItem, StorageBackend};

use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::services::cart::{self, Cart};
use crate::services::orders::OrderService;
use crate::state::AppState;

/// Cart response payload.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub items: Vec<CartItem>,
    pub subtotal: Price,
    pub item_count: u32,
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            items: cart.items().to_vec(),
            // Saturate rather than fail: a display subtotal is not worth a 500.
            subtotal: cart.subtotal().unwrap_or(Price::new(u64::MAX)),
            item_count: cart.item_count(),
        }
    }
}

/// Add-to-cart input.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartInput {
    pub product_id: ProductId,
}

/// Quantity-delta input.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCartInput {
    pub product_id: ProductId,
    pub delta: i64,
}

/// Remove-line input.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveFromCartInput {
    pub product_id: ProductId,
}

/// "Buy again" input.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderInput {
    pub order_id: OrderId,
}

/// Cart count payload.
#[derive(Debug, Serialize)]
pub struct CartCount {
    pub count: u32,
}

/// Current cart.
#[instrument(skip(session))]
pub async fn show(session: Session) -> Json<CartView> {
    let cart = cart::load(&session).await;
    Json(CartView::from(&cart))
}

/// Add one unit of a product to the cart.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Json(input): Json<AddToCartInput>,
) -> Result<Json<CartView>> {
    let products = state.store().get_products().await?;
    let product = products
        .into_iter()
        .find(|p| p.id == input.product_id)
        .ok_or_else(|| AppError::NotFound(format!("product {}", input.product_id)))?;

    let mut cart = cart::load(&session).await;
    cart.add(product);
    cart::store(&session, &cart)
        .await
        .map_err(|e| AppError::Internal(format!("failed to store cart: {e}")))?;

    Ok(Json(CartView::from(&cart)))
}

/// Apply a quantity delta to a cart line.
#[instrument(skip(session))]
pub async fn update(
    session: Session,
    Json(input): Json<UpdateCartInput>,
) -> Result<Json<CartView>> {
    let mut cart = cart::load(&session).await;
    cart.update_quantity(&input.product_id, input.delta);
    cart::store(&session, &cart)
        .await
        .map_err(|e| AppError::Internal(format!("failed to store cart: {e}")))?;

    Ok(Json(CartView::from(&cart)))
}

/// Drop a cart line.
#[instrument(skip(session))]
pub async fn remove(
    session: Session,
    Json(input): Json<RemoveFromCartInput>,
) -> Result<Json<CartView>> {
    let mut cart = cart::load(&session).await;
    cart.remove(&input.product_id);
    cart::store(&session, &cart)
        .await
        .map_err(|e| AppError::Internal(format!("failed to store cart: {e}")))?;

    Ok(Json(CartView::from(&cart)))
}

/// Merge a past order back into the cart ("buy again").
#[instrument(skip(state, session, user), fields(user_id = %user.id))]
pub async fn reorder(
    State(state): State<AppState>,
    session: Session,
    RequireAuth(user): RequireAuth,
    Json(input): Json<ReorderInput>,
) -> Result<Json<CartView>> {
    let orders = OrderService::new(state.store().as_ref())
        .orders_for_user(&user.id)
        .await?;

    let order = orders
        .into_iter()
        .find(|o| o.id == input.order_id)
        .ok_or_else(|| AppError::NotFound(format!("order {}", input.order_id)))?;

    let mut cart = cart::load(&session).await;
    cart.merge(&order.items);
    cart::store(&session, &cart)
        .await
        .map_err(|e| AppError::Internal(format!("failed to store cart: {e}")))?;

    Ok(Json(CartView::from(&cart)))
}

/// Unit count for the cart badge.
#[instrument(skip(session))]
pub async fn count(session: Session) -> Json<CartCount> {
    let cart = cart::load(&session).await;
    Json(CartCount {
        count: cart.item_count(),
    })
}
