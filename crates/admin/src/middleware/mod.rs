//! HTTP middleware stack for the admin API.

pub mod auth;
pub mod session;

pub use auth::{RequireAdminAuth, clear_current_user, set_current_user};
pub use session::create_session_layer;
