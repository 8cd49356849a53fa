//! Spreadsheet export.
//!
//! Builds .xlsx workbooks in memory: one row per order (or product), fixed
//! Vietnamese column headers, fixed column widths, and a timestamped
//! filename. The caller serves the buffer as an attachment.

use chrono::{DateTime, Utc};
use rust_xlsxwriter::{Workbook, XlsxError};
use thiserror::Error;

use vietlong_storage::{Order, Product};

/// Errors that can occur while building a workbook.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Workbook construction failed.
    #[error("workbook error: {0}")]
    Workbook(#[from] XlsxError),
}

/// Order sheet column headers.
const ORDER_HEADERS: [&str; 9] = [
    "Mã đơn",
    "Khách hàng",
    "Email",
    "Số điện thoại",
    "Địa chỉ",
    "Sản phẩm",
    "Tổng tiền",
    "Trạng thái",
    "Ngày đặt",
];

/// Order sheet column widths, by column.
const ORDER_WIDTHS: [f64; 9] = [15.0, 25.0, 30.0, 15.0, 40.0, 50.0, 15.0, 15.0, 20.0];

/// Product sheet column headers.
const PRODUCT_HEADERS: [&str; 7] = [
    "Mã SP",
    "Tên sản phẩm",
    "Giá",
    "Mô tả",
    "Danh mục",
    "Số lượng",
    "Hình ảnh",
];

/// Product sheet column widths, by column.
const PRODUCT_WIDTHS: [f64; 7] = [15.0, 30.0, 15.0, 40.0, 15.0, 10.0, 40.0];

/// Build the orders workbook.
///
/// # Errors
///
/// Returns an error if the workbook cannot be built.
pub fn orders_workbook(orders: &[Order]) -> Result<Vec<u8>, ExportError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name("Orders")?;

    for (col, header) in ORDER_HEADERS.iter().enumerate() {
        sheet.write(0, col_index(col), *header)?;
    }
    for (col, width) in ORDER_WIDTHS.iter().enumerate() {
        sheet.set_column_width(col_index(col), *width)?;
    }

    for (row, order) in orders.iter().enumerate() {
        let row = u32::try_from(row + 1).unwrap_or(u32::MAX);
        sheet.write(row, 0, order.id.as_str())?;
        sheet.write(row, 1, &order.user_name)?;
        sheet.write(row, 2, email_cell(&order.user_email))?;
        sheet.write(row, 3, &order.phone)?;
        sheet.write(row, 4, &order.address)?;
        sheet.write(row, 5, item_summary(order))?;
        sheet.write(row, 6, order.total.amount())?;
        sheet.write(row, 7, order.status.label_vi())?;
        sheet.write(row, 8, format_date_vi(order.created_at))?;
    }

    tracing::info!(orders = orders.len(), "orders exported to workbook");
    Ok(workbook.save_to_buffer()?)
}

/// Build the products workbook.
///
/// # Errors
///
/// Returns an error if the workbook cannot be built.
pub fn products_workbook(products: &[Product]) -> Result<Vec<u8>, ExportError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name("Products")?;

    for (col, header) in PRODUCT_HEADERS.iter().enumerate() {
        sheet.write(0, col_index(col), *header)?;
    }
    for (col, width) in PRODUCT_WIDTHS.iter().enumerate() {
        sheet.set_column_width(col_index(col), *width)?;
    }

    for (row, product) in products.iter().enumerate() {
        let row = u32::try_from(row + 1).unwrap_or(u32::MAX);
        sheet.write(row, 0, product.id.as_str())?;
        sheet.write(row, 1, &product.name)?;
        sheet.write(row, 2, product.price.amount())?;
        sheet.write(row, 3, &product.description)?;
        sheet.write(row, 4, &product.category)?;
        sheet.write(row, 5, u64::from(product.stock))?;
        sheet.write(row, 6, &product.image)?;
    }

    tracing::info!(products = products.len(), "products exported to workbook");
    Ok(workbook.save_to_buffer()?)
}

/// Timestamped filename: `<base>_<ISO date>.xlsx`.
#[must_use]
pub fn export_filename(base: &str, date: DateTime<Utc>) -> String {
    format!("{base}_{}.xlsx", date.format("%Y-%m-%d"))
}

/// `name (xQty)` per item, comma-joined.
fn item_summary(order: &Order) -> String {
    order
        .items
        .iter()
        .map(|item| format!("{} (x{})", item.product.name, item.quantity))
        .collect::<Vec<_>>()
        .join(", ")
}

/// vi-VN style timestamp, e.g. `14:30:05 8/8/2026`.
fn format_date_vi(date: DateTime<Utc>) -> String {
    // %-d/%-m drops leading zeros, matching the locale rendering.
    date.format("%H:%M:%S %-d/%-m/%Y").to_string()
}

fn email_cell(email: &str) -> &str {
    if email.is_empty() { "N/A" } else { email }
}

fn col_index(col: usize) -> u16 {
    u16::try_from(col).unwrap_or(u16::MAX)
}
