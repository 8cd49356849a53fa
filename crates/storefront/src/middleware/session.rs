//! Session middleware configuration.
//!
//! Sets up in-memory sessions using tower-sessions. The store is
//! deliberately not tied to any storage backend - the session layer must
//! work the same whether the shop persists to a file, a spreadsheet, or
//! `PostgreSQL`.

use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "vl_session";

/// Cookie-level session expiry in seconds (24 hours).
///
/// The stored record carries its own absolute expiry as well; see
/// `models::session`.
const SESSION_EXPIRY_SECONDS: i64 = 24 * 60 * 60;

/// Create the session layer with an in-memory store.
#[must_use]
pub fn create_session_layer() -> SessionManagerLayer<MemoryStore> {
    let store = MemoryStore::default();

    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}
