//! HTTP route handlers for the storefront API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check (probes the backend)
//!
//! # Products
//! GET  /products               - Catalog listing (?q=, ?category=)
//! GET  /products/{id}          - Product detail
//!
//! # Cart (session-scoped)
//! GET  /cart                   - Current cart
//! POST /cart/add               - Add one unit of a product
//! POST /cart/update            - Apply a quantity delta (clamped at 1)
//! POST /cart/remove            - Drop a line
//! POST /cart/reorder           - Merge a past order back in ("buy again")
//! GET  /cart/count             - Unit count badge
//!
//! # Checkout
//! POST /checkout               - Place an order from the cart
//!
//! # Account (requires auth)
//! GET  /account/orders         - Order history with progress indices
//!
//! # Auth
//! POST /auth/login             - Login
//! POST /auth/register          - Register a customer account
//! POST /auth/logout            - Logout
//! GET  /auth/me                - Current session user
//!
//! # Assistant
//! POST /chat                   - Product question to the assistant
//! ```

pub mod auth;
pub mod cart;
pub mod chat;
pub mod orders;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{id}", get(products::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/reorder", post(cart::reorder))
        .route("/count", get(cart::count))
}

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/register", post(auth::register))
        .route("/logout", post(auth::logout))
        .route("/me", get(auth::me))
}

/// Create the account routes router.
pub fn account_routes() -> Router<AppState> {
    Router::new().route("/orders", get(orders::my_orders))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/products", product_routes())
        .nest("/cart", cart_routes())
        .route("/checkout", post(orders::checkout))
        .nest("/account", account_routes())
        .nest("/auth", auth_routes())
        .route("/chat", post(chat::ask))
}
