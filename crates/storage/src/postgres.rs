//! `PostgreSQL` backend.
//!
//! The document-database analog: products and users map to flat rows, order
//! item snapshots are stored as a JSONB document per order. A `seq` column
//! preserves insertion order across the round trip.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, SecretString};
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};

use vietlong_core::{
    Email, HashedPassword, OrderId, OrderStatus, Price, ProductId, Role, UserId,
};

use crate::backend::{Result, StorageBackend, StorageError};
use crate::models::{Order, Product, ProductPatch, User, UserRecord};

/// `PostgreSQL`-backed storage.
#[derive(Clone)]
pub struct PostgresBackend {
    pool: PgPool,
}

impl PostgresBackend {
    /// Connect with sensible pool defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be established.
    pub async fn connect(database_url: &SecretString) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .min_connections(2)
            .acquire_timeout(Duration::from_secs(10))
            .connect(database_url.expose_secret())
            .await?;
        Ok(Self { pool })
    }

    /// Wrap an existing pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get a reference to the underlying connection pool.
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Run the embedded database migrations.
    ///
    /// Not run automatically on startup; invoke explicitly via
    /// `vietlong-cli migrate`.
    ///
    /// # Errors
    ///
    /// Returns an error if a migration fails to apply.
    pub async fn run_migrations(&self) -> std::result::Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./migrations").run(&self.pool).await
    }
}

fn row_to_product(row: &PgRow) -> Result<Product> {
    let price: i64 = row.try_get("price")?;
    let stock: i64 = row.try_get("stock")?;

    Ok(Product {
        id: ProductId::new(row.try_get::<String, _>("id")?),
        name: row.try_get("name")?,
        price: Price::new(u64::try_from(price).map_err(|_| {
            StorageError::DataCorruption(format!("negative price in database: {price}"))
        })?),
        description: row.try_get("description")?,
        image: row.try_get("image")?,
        category: row.try_get("category")?,
        stock: u32::try_from(stock).map_err(|_| {
            StorageError::DataCorruption(format!("stock out of range in database: {stock}"))
        })?,
    })
}

fn row_to_order(row: &PgRow) -> Result<Order> {
    let items: serde_json::Value = row.try_get("items")?;
    let total: i64 = row.try_get("total")?;
    let status: String = row.try_get("status")?;

    Ok(Order {
        id: OrderId::new(row.try_get::<String, _>("id")?),
        user_id: UserId::new(row.try_get::<String, _>("user_id")?),
        user_name: row.try_get("user_name")?,
        user_email: row.try_get("user_email")?,
        items: serde_json::from_value(items)?,
        total: Price::new(u64::try_from(total).map_err(|_| {
            StorageError::DataCorruption(format!("negative total in database: {total}"))
        })?),
        status: status
            .parse()
            .map_err(StorageError::DataCorruption)?,
        created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
        address: row.try_get("address")?,
        phone: row.try_get("phone")?,
    })
}

fn row_to_user(row: &PgRow) -> Result<UserRecord> {
    let email: String = row.try_get("email")?;
    let role: String = row.try_get("role")?;
    let password: Option<String> = row.try_get("password")?;

    Ok(UserRecord {
        user: User {
            id: UserId::new(row.try_get::<String, _>("id")?),
            email: Email::parse(&email).map_err(|e| {
                StorageError::DataCorruption(format!("invalid email in database: {e}"))
            })?,
            name: row.try_get("name")?,
            phone: row.try_get("phone")?,
            role: role.parse().map_err(StorageError::DataCorruption)?,
            created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
        },
        password: password.map(HashedPassword::from_phc),
    })
}

fn encode_amount(value: u64, what: &str) -> Result<i64> {
    i64::try_from(value)
        .map_err(|_| StorageError::DataCorruption(format!("{what} exceeds storable range: {value}")))
}

#[async_trait]
impl StorageBackend for PostgresBackend {
    async fn get_products(&self) -> Result<Vec<Product>> {
        let rows = sqlx::query(
            "SELECT id, name, price, description, image, category, stock
             FROM products ORDER BY seq",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_product).collect()
    }

    async fn save_product(&self, product: Product) -> Result<Vec<Product>> {
        sqlx::query(
            "INSERT INTO products (id, name, price, description, image, category, stock)
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(product.id.as_str())
        .bind(&product.name)
        .bind(encode_amount(product.price.amount(), "price")?)
        .bind(&product.description)
        .bind(&product.image)
        .bind(&product.category)
        .bind(i64::from(product.stock))
        .execute(&self.pool)
        .await?;

        self.get_products().await
    }

    async fn update_product(&self, id: &ProductId, patch: ProductPatch) -> Result<Vec<Product>> {
        // Read-modify-write of the whole row; a missing id is a no-op.
        let row = sqlx::query(
            "SELECT id, name, price, description, image, category, stock
             FROM products WHERE id = $1",
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await?;

        if let Some(row) = row {
            let mut product = row_to_product(&row)?;
            patch.apply_to(&mut product);

            sqlx::query(
                "UPDATE products
                 SET name = $2, price = $3, description = $4, image = $5,
                     category = $6, stock = $7
                 WHERE id = $1",
            )
            .bind(product.id.as_str())
            .bind(&product.name)
            .bind(encode_amount(product.price.amount(), "price")?)
            .bind(&product.description)
            .bind(&product.image)
            .bind(&product.category)
            .bind(i64::from(product.stock))
            .execute(&self.pool)
            .await?;
        }

        self.get_products().await
    }

    async fn delete_product(&self, id: &ProductId) -> Result<Vec<Product>> {
        sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id.as_str())
            .execute(&self.pool)
            .await?;

        self.get_products().await
    }

    async fn get_orders(&self) -> Result<Vec<Order>> {
        let rows = sqlx::query(
            "SELECT id, user_id, user_name, user_email, items, total, status,
                    created_at, address, phone
             FROM orders ORDER BY seq",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_order).collect()
    }

    async fn save_order(&self, order: Order) -> Result<Vec<Order>> {
        sqlx::query(
            "INSERT INTO orders (id, user_id, user_name, user_email, items, total,
                                 status, created_at, address, phone)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)",
        )
        .bind(order.id.as_str())
        .bind(order.user_id.as_str())
        .bind(&order.user_name)
        .bind(&order.user_email)
        .bind(serde_json::to_value(&order.items)?)
        .bind(encode_amount(order.total.amount(), "total")?)
        .bind(order.status.to_string())
        .bind(order.created_at)
        .bind(&order.address)
        .bind(&order.phone)
        .execute(&self.pool)
        .await?;

        self.get_orders().await
    }

    async fn update_order_status(&self, id: &OrderId, status: OrderStatus) -> Result<Vec<Order>> {
        sqlx::query("UPDATE orders SET status = $2 WHERE id = $1")
            .bind(id.as_str())
            .bind(status.to_string())
            .execute(&self.pool)
            .await?;

        self.get_orders().await
    }

    async fn get_users(&self) -> Result<Vec<UserRecord>> {
        let rows = sqlx::query(
            "SELECT id, email, name, phone, role, password, created_at
             FROM users ORDER BY seq",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_user).collect()
    }

    async fn save_user(&self, user: UserRecord) -> Result<()> {
        sqlx::query(
            "INSERT INTO users (id, email, name, phone, role, password, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(user.user.id.as_str())
        .bind(user.user.email.as_str())
        .bind(&user.user.name)
        .bind(&user.user.phone)
        .bind(user.user.role.to_string())
        .bind(user.password.as_ref().map(HashedPassword::as_str))
        .bind(user.user.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return StorageError::Conflict("email already registered".to_owned());
            }
            StorageError::Database(e)
        })?;

        Ok(())
    }

    async fn delete_user(&self, id: &UserId) -> Result<Vec<UserRecord>> {
        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id.as_str())
            .execute(&self.pool)
            .await?;

        self.get_users().await
    }

    async fn check_connection(&self) -> bool {
        sqlx::query("SELECT 1").fetch_one(&self.pool).await.is_ok()
    }
}
