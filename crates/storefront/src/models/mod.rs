//! Storefront-local models.

pub mod session;

pub use session::{SESSION_DURATION_MS, SessionUser, keys as session_keys};
