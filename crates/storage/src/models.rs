//! Persisted domain records.
//!
//! Wire format is camelCase JSON, matching what the spreadsheet backend has
//! historically stored - switching backends must not re-shape the data.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use vietlong_core::{Email, HashedPassword, OrderId, OrderStatus, Price, ProductId, Role, UserId};

/// Fixed email of the single bootstrap administrator account.
///
/// The account itself is an ordinary user row created by seeding; only the
/// email is a convention.
pub const BOOTSTRAP_ADMIN_EMAIL: &str = "admin@vietlong.com";

/// Identifier of the bootstrap administrator.
pub const BOOTSTRAP_ADMIN_ID: &str = "admin-001";

/// Display name of the bootstrap administrator.
pub const BOOTSTRAP_ADMIN_NAME: &str = "Admin Việt Long";

/// A sellable item in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Price in đồng (minor units).
    pub price: Price,
    pub description: String,
    /// Image reference (URL).
    pub image: String,
    /// Free-text category label.
    pub category: String,
    pub stock: u32,
}

/// Partial update for a product.
///
/// Absent fields are left untouched; the catalog store merges the patch into
/// the matching entry and rewrites the whole collection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Price>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<u32>,
}

impl ProductPatch {
    /// Merge the present fields into `product`.
    pub fn apply_to(&self, product: &mut Product) {
        if let Some(name) = &self.name {
            product.name = name.clone();
        }
        if let Some(price) = self.price {
            product.price = price;
        }
        if let Some(description) = &self.description {
            product.description = description.clone();
        }
        if let Some(image) = &self.image {
            product.image = image.clone();
        }
        if let Some(category) = &self.category {
            product.category = category.clone();
        }
        if let Some(stock) = self.stock {
            product.stock = stock;
        }
    }
}

/// A product plus quantity.
///
/// Lives in the cart while shopping; once an order is placed the same shape
/// becomes a frozen snapshot - later catalog edits never touch it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    #[serde(flatten)]
    pub product: Product,
    pub quantity: u32,
}

impl CartItem {
    /// Create a line for `quantity` units of `product`.
    #[must_use]
    pub const fn new(product: Product, quantity: u32) -> Self {
        Self { product, quantity }
    }

    /// Price × quantity for this line, `None` on overflow.
    #[must_use]
    pub fn line_total(&self) -> Option<Price> {
        self.product.price.checked_mul(self.quantity)
    }
}

/// An immutable order record.
///
/// Customer fields and items are denormalized snapshots taken at checkout;
/// only `status` changes after creation. `total` is computed once and never
/// recomputed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    pub user_name: String,
    pub user_email: String,
    pub items: Vec<CartItem>,
    pub total: Price,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub address: String,
    pub phone: String,
}

impl Order {
    /// Recompute the total from the item snapshots.
    ///
    /// Used to assert the `total == Σ price×quantity` invariant; the stored
    /// `total` is authoritative.
    #[must_use]
    pub fn computed_total(&self) -> Option<Price> {
        self.items
            .iter()
            .try_fold(Price::ZERO, |acc, item| acc.checked_add(item.line_total()?))
    }
}

/// A shop account as exposed to the application (no credential).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub email: Email,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

/// A user as persisted, including the optional password hash.
///
/// Routes must serialize the inner [`User`], never the record - the hash
/// stays inside the service layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(flatten)]
    pub user: User,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<HashedPassword>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample_product() -> Product {
        Product {
            id: ProductId::new("P-1"),
            name: "iPhone 15 Pro Max".to_owned(),
            price: Price::new(29_900_000),
            description: "Thiết kế Titan, chip A17 Pro.".to_owned(),
            image: "https://example.com/iphone.jpg".to_owned(),
            category: "Điện thoại".to_owned(),
            stock: 10,
        }
    }

    #[test]
    fn test_product_wire_format_is_camel_case() {
        let json = serde_json::to_value(sample_product()).unwrap();
        assert_eq!(json["id"], "P-1");
        assert_eq!(json["price"], 29_900_000_u64);
        assert_eq!(json["category"], "Điện thoại");
    }

    #[test]
    fn test_cart_item_flattens_product() {
        let item = CartItem::new(sample_product(), 2);
        let json = serde_json::to_value(&item).unwrap();
        // Flattened: product fields sit beside quantity
        assert_eq!(json["name"], "iPhone 15 Pro Max");
        assert_eq!(json["quantity"], 2);
        let back: CartItem = serde_json::from_value(json).unwrap();
        assert_eq!(back, item);
    }

    #[test]
    fn test_line_total() {
        let item = CartItem::new(sample_product(), 3);
        assert_eq!(item.line_total(), Some(Price::new(89_700_000)));
    }

    #[test]
    fn test_patch_merges_only_present_fields() {
        let mut product = sample_product();
        let patch = ProductPatch {
            price: Some(Price::new(27_000_000)),
            stock: Some(3),
            ..ProductPatch::default()
        };
        patch.apply_to(&mut product);
        assert_eq!(product.price, Price::new(27_000_000));
        assert_eq!(product.stock, 3);
        assert_eq!(product.name, "iPhone 15 Pro Max");
    }

    #[test]
    fn test_order_computed_total_matches_items() {
        let order = Order {
            id: OrderId::new("ORD-TEST01"),
            user_id: UserId::new("customer-1"),
            user_name: "Nguyễn Văn A".to_owned(),
            user_email: "a@example.com".to_owned(),
            items: vec![
                CartItem::new(sample_product(), 1),
                CartItem::new(
                    Product {
                        id: ProductId::new("P-2"),
                        price: Price::new(5_900_000),
                        ..sample_product()
                    },
                    2,
                ),
            ],
            total: Price::new(41_700_000),
            status: OrderStatus::Pending,
            created_at: Utc::now(),
            address: "Hanoi".to_owned(),
            phone: "0900000000".to_owned(),
        };
        assert_eq!(order.computed_total(), Some(order.total));
    }

    #[test]
    fn test_order_wire_format_uses_camel_case_keys() {
        let order = Order {
            id: OrderId::new("ORD-TEST01"),
            user_id: UserId::new("customer-1"),
            user_name: "Nguyễn Văn A".to_owned(),
            user_email: "a@example.com".to_owned(),
            items: vec![],
            total: Price::ZERO,
            status: OrderStatus::Pending,
            created_at: Utc::now(),
            address: "Hanoi".to_owned(),
            phone: "0900000000".to_owned(),
        };
        let json = serde_json::to_value(&order).unwrap();
        assert!(json.get("userId").is_some());
        assert!(json.get("userName").is_some());
        assert!(json.get("createdAt").is_some());
        assert_eq!(json["status"], "PENDING");
    }

    #[test]
    fn test_user_record_hides_password_from_inner_user() {
        let record = UserRecord {
            user: User {
                id: UserId::new("customer-1"),
                email: Email::parse("a@example.com").unwrap(),
                name: "Nguyễn Văn A".to_owned(),
                phone: None,
                role: Role::Customer,
                created_at: Utc::now(),
            },
            password: Some(HashedPassword::hash("mat-khau-dai").unwrap()),
        };
        // Serializing the inner user must not carry the credential.
        let json = serde_json::to_value(&record.user).unwrap();
        assert!(json.get("password").is_none());
        // The record itself round-trips with it.
        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("password").is_some());
        let back: UserRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }
}
