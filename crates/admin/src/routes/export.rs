//! Spreadsheet download handlers.

use axum::{
    extract::State,
    http::{HeaderMap, HeaderValue, header},
};
use chrono::Utc;
use tracing::instrument;

use vietlong_storage::StorageBackend;

use crate::error::{AppError, Result};
use crate::middleware::RequireAdminAuth;
use crate::services::export::{export_filename, orders_workbook, products_workbook};
use crate::state::AppState;

const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Download all orders as `don_hang_<date>.xlsx`.
#[instrument(skip(state, _admin))]
pub async fn orders(
    State(state): State<AppState>,
    _admin: RequireAdminAuth,
) -> Result<(HeaderMap, Vec<u8>)> {
    let orders = state.store().get_orders().await?;
    let bytes = orders_workbook(&orders)?;
    let filename = export_filename("don_hang", Utc::now());

    Ok((attachment_headers(&filename)?, bytes))
}

/// Download the catalog as `san_pham_<date>.xlsx`.
#[instrument(skip(state, _admin))]
pub async fn products(
    State(state): State<AppState>,
    _admin: RequireAdminAuth,
) -> Result<(HeaderMap, Vec<u8>)> {
    let products = state.store().get_products().await?;
    let bytes = products_workbook(&products)?;
    let filename = export_filename("san_pham", Utc::now());

    Ok((attachment_headers(&filename)?, bytes))
}

fn attachment_headers(filename: &str) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static(XLSX_CONTENT_TYPE),
    );
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_str(&format!("attachment; filename=\"{filename}\""))
            .map_err(|e| AppError::Internal(format!("invalid export filename: {e}")))?,
    );
    Ok(headers)
}
