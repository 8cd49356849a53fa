//! Assistant bridge: product questions answered by a generation API.
//!
//! Stateless per call - every request carries the full flattened catalog
//! context again; there is no conversation memory on the server.

mod client;
mod error;
mod types;

pub use client::AssistantClient;
pub use error::AssistantError;

use vietlong_storage::Product;

/// Flatten the catalog into the `name: price VNĐ` listing the model sees.
#[must_use]
pub fn catalog_context(products: &[Product]) -> String {
    products
        .iter()
        .map(|p| format!("{}: {} VNĐ", p.name, p.price))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use vietlong_storage::local::seed_products;

    use super::*;

    #[test]
    fn test_catalog_context_flattening() {
        let products = seed_products();
        let context = catalog_context(&products[..2]);
        assert_eq!(
            context,
            "iPhone 15 Pro Max: 29900000 VNĐ, MacBook Pro M3: 39900000 VNĐ"
        );
    }

    #[test]
    fn test_empty_catalog_context() {
        assert_eq!(catalog_context(&[]), "");
    }
}
