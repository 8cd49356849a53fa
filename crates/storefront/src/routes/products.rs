//! Product browsing and search handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use tracing::instrument;

use vietlong_core::ProductId;
use vietlong_storage::{Product, StorageBackend};

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Catalog listing filters.
#[derive(Debug, Deserialize)]
pub struct CatalogQuery {
    /// Case-insensitive substring over name, description, and category.
    pub q: Option<String>,
    /// Exact category label.
    pub category: Option<String>,
}

/// List the catalog, optionally filtered.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<CatalogQuery>,
) -> Result<Json<Vec<Product>>> {
    let mut products = state.store().get_products().await?;

    if let Some(category) = &query.category {
        products.retain(|p| &p.category == category);
    }

    if let Some(q) = &query.q {
        let needle = q.to_lowercase();
        products.retain(|p| {
            p.name.to_lowercase().contains(&needle)
                || p.description.to_lowercase().contains(&needle)
                || p.category.to_lowercase().contains(&needle)
        });
    }

    Ok(Json(products))
}

/// Fetch a single product by ID.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Product>> {
    let id = ProductId::new(id);
    let products = state.store().get_products().await?;

    products
        .into_iter()
        .find(|p| p.id == id)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))
}
