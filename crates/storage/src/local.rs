//! Local backend: in-process collections with optional JSON-file
//! persistence.
//!
//! The analog of the original deployment's browser-local storage. State
//! lives in memory behind an async `RwLock`; when opened with a path, every
//! mutation is written through to a single JSON file. A fresh store is
//! seeded with the initial catalog so the shop is browsable out of the box.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::RwLock;

use vietlong_core::{OrderId, OrderStatus, Price, ProductId, UserId};

use crate::backend::{Result, StorageBackend};
use crate::models::{Order, Product, ProductPatch, UserRecord};

/// All persisted collections, as serialized to the data file.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct Collections {
    products: Vec<Product>,
    orders: Vec<Order>,
    users: Vec<UserRecord>,
}

/// In-process storage backend.
pub struct LocalBackend {
    state: RwLock<Collections>,
    path: Option<PathBuf>,
}

impl LocalBackend {
    /// Create a memory-only store seeded with the initial catalog.
    ///
    /// Nothing is persisted; state is gone when the process exits. This is
    /// also the backend used by the service-layer tests.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            state: RwLock::new(Collections {
                products: seed_products(),
                ..Collections::default()
            }),
            path: None,
        }
    }

    /// Open a file-backed store.
    ///
    /// Loads the collections from `path` if the file exists; otherwise
    /// starts from the seeded catalog and writes the initial file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed, or
    /// if the initial file cannot be written.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let collections = if tokio::fs::try_exists(&path).await? {
            let raw = tokio::fs::read_to_string(&path).await?;
            serde_json::from_str(&raw)?
        } else {
            let seeded = Collections {
                products: seed_products(),
                ..Collections::default()
            };
            write_file(&path, &seeded).await?;
            seeded
        };

        Ok(Self {
            state: RwLock::new(collections),
            path: Some(path),
        })
    }

    /// Write the current collections through to the data file, if any.
    async fn persist(&self, data: &Collections) -> Result<()> {
        if let Some(path) = &self.path {
            write_file(path, data).await?;
        }
        Ok(())
    }
}

async fn write_file(path: &Path, data: &Collections) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        tokio::fs::create_dir_all(parent).await?;
    }
    let raw = serde_json::to_string_pretty(data)?;
    tokio::fs::write(path, raw).await?;
    Ok(())
}

#[async_trait]
impl StorageBackend for LocalBackend {
    async fn get_products(&self) -> Result<Vec<Product>> {
        Ok(self.state.read().await.products.clone())
    }

    async fn save_product(&self, product: Product) -> Result<Vec<Product>> {
        let mut state = self.state.write().await;
        state.products.push(product);
        self.persist(&state).await?;
        Ok(state.products.clone())
    }

    async fn update_product(&self, id: &ProductId, patch: ProductPatch) -> Result<Vec<Product>> {
        let mut state = self.state.write().await;
        if let Some(product) = state.products.iter_mut().find(|p| &p.id == id) {
            patch.apply_to(product);
        }
        self.persist(&state).await?;
        Ok(state.products.clone())
    }

    async fn delete_product(&self, id: &ProductId) -> Result<Vec<Product>> {
        let mut state = self.state.write().await;
        state.products.retain(|p| &p.id != id);
        self.persist(&state).await?;
        Ok(state.products.clone())
    }

    async fn get_orders(&self) -> Result<Vec<Order>> {
        Ok(self.state.read().await.orders.clone())
    }

    async fn save_order(&self, order: Order) -> Result<Vec<Order>> {
        let mut state = self.state.write().await;
        state.orders.push(order);
        self.persist(&state).await?;
        Ok(state.orders.clone())
    }

    async fn update_order_status(&self, id: &OrderId, status: OrderStatus) -> Result<Vec<Order>> {
        let mut state = self.state.write().await;
        if let Some(order) = state.orders.iter_mut().find(|o| &o.id == id) {
            order.status = status;
        }
        self.persist(&state).await?;
        Ok(state.orders.clone())
    }

    async fn get_users(&self) -> Result<Vec<UserRecord>> {
        Ok(self.state.read().await.users.clone())
    }

    async fn save_user(&self, user: UserRecord) -> Result<()> {
        let mut state = self.state.write().await;
        if state
            .users
            .iter()
            .any(|u| u.user.email == user.user.email)
        {
            return Err(crate::backend::StorageError::Conflict(format!(
                "email already registered: {}",
                user.user.email
            )));
        }
        state.users.push(user);
        self.persist(&state).await?;
        Ok(())
    }

    async fn delete_user(&self, id: &UserId) -> Result<Vec<UserRecord>> {
        let mut state = self.state.write().await;
        state.users.retain(|u| &u.user.id != id);
        self.persist(&state).await?;
        Ok(state.users.clone())
    }

    async fn check_connection(&self) -> bool {
        true
    }
}

/// The initial catalog installed into a fresh store.
#[must_use]
pub fn seed_products() -> Vec<Product> {
    let entry = |id: &str, name: &str, price: u64, description: &str, image: &str, category: &str, stock: u32| Product {
        id: ProductId::new(id),
        name: name.to_owned(),
        price: Price::new(price),
        description: description.to_owned(),
        image: image.to_owned(),
        category: category.to_owned(),
        stock,
    };

    vec![
        entry(
            "1",
            "iPhone 15 Pro Max",
            29_900_000,
            "Thiết kế Titan, chip A17 Pro siêu mạnh mẽ.",
            "https://images.unsplash.com/photo-1695048133142-1a20484d2569?auto=format&fit=crop&q=80&w=800",
            "Điện thoại",
            10,
        ),
        entry(
            "2",
            "MacBook Pro M3",
            39_900_000,
            "Hiệu năng đỉnh cao, màn hình Liquid Retina XDR.",
            "https://images.unsplash.com/photo-1517336714731-489689fd1ca4?auto=format&fit=crop&q=80&w=800",
            "Laptop",
            5,
        ),
        entry(
            "3",
            "AirPods Pro 2",
            5_900_000,
            "Chống ồn chủ động gấp 2 lần.",
            "https://images.unsplash.com/photo-1628202926206-c63a34b1618f?auto=format&fit=crop&q=80&w=800",
            "Phụ kiện",
            20,
        ),
        entry(
            "4",
            "Apple Watch Series 9",
            9_900_000,
            "Cảm biến sức khỏe tiên tiến nhất.",
            "https://images.unsplash.com/photo-1546868871-7041f2a55e12?auto=format&fit=crop&q=80&w=800",
            "Phụ kiện",
            15,
        ),
        entry(
            "5",
            "iPad Air M2",
            16_900_000,
            "Mỏng nhẹ, mạnh mẽ với chip M2.",
            "https://images.unsplash.com/photo-1544244015-0df4b3ffc6b0?auto=format&fit=crop&q=80&w=800",
            "Máy tính bảng",
            8,
        ),
        entry(
            "6",
            "Samsung Galaxy S24 Ultra",
            27_900_000,
            "Bút S-Pen tích hợp, camera 200MP.",
            "https://images.unsplash.com/photo-1610945415295-d9bbf067e59c?auto=format&fit=crop&q=80&w=800",
            "Điện thoại",
            12,
        ),
        entry(
            "7",
            "Dell XPS 15",
            35_900_000,
            "Laptop cao cấp cho dân chuyên nghiệp.",
            "https://images.unsplash.com/photo-1593642632823-8f78536788c6?auto=format&fit=crop&q=80&w=800",
            "Laptop",
            7,
        ),
        entry(
            "8",
            "Sony WH-1000XM5",
            7_900_000,
            "Tai nghe chống ồn hàng đầu thế giới.",
            "https://images.unsplash.com/photo-1618366712010-f4ae9c647dcb?auto=format&fit=crop&q=80&w=800",
            "Phụ kiện",
            25,
        ),
    ]
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;
    use vietlong_core::{Email, HashedPassword, Role};

    use super::*;
    use crate::models::{CartItem, User};

    fn temp_data_path() -> PathBuf {
        std::env::temp_dir().join(format!("vietlong-store-{}.json", uuid::Uuid::new_v4()))
    }

    fn sample_order(id: &str) -> Order {
        let product = seed_products().into_iter().next().unwrap();
        let items = vec![CartItem::new(product, 1)];
        let total = items[0].line_total().unwrap();
        Order {
            id: OrderId::new(id),
            user_id: UserId::new("customer-1"),
            user_name: "Nguyễn Văn A".to_owned(),
            user_email: "a@example.com".to_owned(),
            items,
            total,
            status: OrderStatus::Pending,
            created_at: Utc::now(),
            address: "Hanoi".to_owned(),
            phone: "0900000000".to_owned(),
        }
    }

    #[tokio::test]
    async fn test_fresh_store_is_seeded() {
        let store = LocalBackend::in_memory();
        let products = store.get_products().await.unwrap();
        assert_eq!(products.len(), 8);
        assert_eq!(products[0].name, "iPhone 15 Pro Max");
    }

    #[tokio::test]
    async fn test_product_crud_returns_refreshed_collection() {
        let store = LocalBackend::in_memory();

        let product = Product {
            id: ProductId::new("P-NEW"),
            name: "Pixel 9".to_owned(),
            price: Price::new(19_900_000),
            description: "Điện thoại Google.".to_owned(),
            image: String::new(),
            category: "Điện thoại".to_owned(),
            stock: 4,
        };
        let products = store.save_product(product).await.unwrap();
        assert_eq!(products.len(), 9);
        assert_eq!(products[8].id, ProductId::new("P-NEW"));

        let patch = ProductPatch {
            price: Some(Price::new(17_900_000)),
            ..ProductPatch::default()
        };
        let products = store
            .update_product(&ProductId::new("P-NEW"), patch)
            .await
            .unwrap();
        assert_eq!(products[8].price, Price::new(17_900_000));
        assert_eq!(products[8].name, "Pixel 9");

        let products = store.delete_product(&ProductId::new("P-NEW")).await.unwrap();
        assert_eq!(products.len(), 8);
    }

    #[tokio::test]
    async fn test_update_unknown_product_is_a_no_op() {
        let store = LocalBackend::in_memory();
        let before = store.get_products().await.unwrap();
        let after = store
            .update_product(
                &ProductId::new("P-MISSING"),
                ProductPatch {
                    stock: Some(0),
                    ..ProductPatch::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(before, after);
    }

    #[tokio::test]
    async fn test_order_status_overwrite() {
        let store = LocalBackend::in_memory();
        store.save_order(sample_order("ORD-AAAAAA")).await.unwrap();

        let orders = store
            .update_order_status(&OrderId::new("ORD-AAAAAA"), OrderStatus::Shipped)
            .await
            .unwrap();
        assert_eq!(orders[0].status, OrderStatus::Shipped);
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts() {
        let store = LocalBackend::in_memory();
        let record = UserRecord {
            user: User {
                id: UserId::new("customer-1"),
                email: Email::parse("a@example.com").unwrap(),
                name: "A".to_owned(),
                phone: None,
                role: Role::Customer,
                created_at: Utc::now(),
            },
            password: Some(HashedPassword::hash("mat-khau-dai").unwrap()),
        };
        store.save_user(record.clone()).await.unwrap();

        let mut dup = record;
        dup.user.id = UserId::new("customer-2");
        assert!(matches!(
            store.save_user(dup).await,
            Err(crate::backend::StorageError::Conflict(_))
        ));
    }

    #[tokio::test]
    async fn test_file_roundtrip_preserves_collections_and_order() {
        let path = temp_data_path();

        {
            let store = LocalBackend::open(&path).await.unwrap();
            store.save_order(sample_order("ORD-AAAAAA")).await.unwrap();
            store.save_order(sample_order("ORD-BBBBBB")).await.unwrap();
        }

        // Reopen from disk: same collections, same insertion order.
        let reopened = LocalBackend::open(&path).await.unwrap();
        let products = reopened.get_products().await.unwrap();
        assert_eq!(products, seed_products());

        let orders = reopened.get_orders().await.unwrap();
        assert_eq!(orders.len(), 2);
        assert_eq!(orders[0].id, OrderId::new("ORD-AAAAAA"));
        assert_eq!(orders[1].id, OrderId::new("ORD-BBBBBB"));

        tokio::fs::remove_file(&path).await.unwrap();
    }
}
