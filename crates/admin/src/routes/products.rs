//! Product management handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use tracing::instrument;

use vietlong_core::{Price, ProductId};
use vietlong_storage::{Product, ProductPatch, StorageBackend};

use crate::error::Result;
use crate::middleware::RequireAdminAuth;
use crate::state::AppState;

/// New-product input; the identifier is generated server-side.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductInput {
    pub name: String,
    pub price: Price,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub stock: u32,
}

/// Full catalog.
#[instrument(skip(state, _admin))]
pub async fn index(
    State(state): State<AppState>,
    _admin: RequireAdminAuth,
) -> Result<Json<Vec<Product>>> {
    Ok(Json(state.store().get_products().await?))
}

/// Create a product with a freshly generated identifier.
#[instrument(skip(state, _admin, input))]
pub async fn create(
    State(state): State<AppState>,
    _admin: RequireAdminAuth,
    Json(input): Json<CreateProductInput>,
) -> Result<Json<Vec<Product>>> {
    let product = Product {
        id: ProductId::generate(),
        name: input.name,
        price: input.price,
        description: input.description,
        image: input.image,
        category: input.category,
        stock: input.stock,
    };

    tracing::info!(product_id = %product.id, "product created");
    Ok(Json(state.store().save_product(product).await?))
}

/// Merge a partial update into the matching product.
#[instrument(skip(state, _admin, patch))]
pub async fn update(
    State(state): State<AppState>,
    _admin: RequireAdminAuth,
    Path(id): Path<String>,
    Json(patch): Json<ProductPatch>,
) -> Result<Json<Vec<Product>>> {
    let id = ProductId::new(id);
    Ok(Json(state.store().update_product(&id, patch).await?))
}

/// Delete a product.
#[instrument(skip(state, _admin))]
pub async fn remove(
    State(state): State<AppState>,
    _admin: RequireAdminAuth,
    Path(id): Path<String>,
) -> Result<Json<Vec<Product>>> {
    let id = ProductId::new(id);
    tracing::info!(product_id = %id, "product deleted");
    Ok(Json(state.store().delete_product(&id).await?))
}
