//! HTTP route handlers for the admin API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check (probes the backend)
//!
//! # Auth
//! POST   /auth/login           - Admin login
//! POST   /auth/logout          - Logout
//!
//! # Dashboard
//! GET    /dashboard            - Counts and revenue summary
//!
//! # Products
//! GET    /products             - Full catalog
//! POST   /products             - Create (identifier generated server-side)
//! PUT    /products/{id}        - Partial update
//! DELETE /products/{id}        - Delete
//! GET    /products/export      - Products .xlsx download
//!
//! # Orders
//! GET    /orders               - All orders with progress indices
//! POST   /orders/{id}/status   - Overwrite status
//! GET    /orders/export        - Orders .xlsx download
//!
//! # Users
//! GET    /users                - All users (credentials stripped)
//! DELETE /users/{id}           - Delete
//! ```
//!
//! Everything below `/auth` requires an admin session.

pub mod auth;
pub mod dashboard;
pub mod export;
pub mod orders;
pub mod products;
pub mod users;

use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index).post(products::create))
        .route("/export", get(export::products))
        .route("/{id}", put(products::update).delete(products::remove))
}

/// Create the order routes router.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(orders::index))
        .route("/export", get(export::orders))
        .route("/{id}/status", post(orders::update_status))
}

/// Create the user routes router.
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(users::index))
        .route("/{id}", delete(users::remove))
}

/// Create all routes for the admin API.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth_routes())
        .route("/dashboard", get(dashboard::summary))
        .nest("/products", product_routes())
        .nest("/orders", order_routes())
        .nest("/users", user_routes())
}
