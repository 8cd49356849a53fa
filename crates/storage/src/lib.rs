//! Viet Long Storage - pluggable persistence layer.
//!
//! The shop persists three collections (products, orders, users) through the
//! [`StorageBackend`] trait. Which implementation backs the trait is decided
//! once, at startup, from configuration - callers never inspect the concrete
//! type.
//!
//! # Backends
//!
//! - [`LocalBackend`] - in-process collections with optional JSON-file
//!   persistence and a seeded initial catalog. Zero external dependencies;
//!   also the test double for the service layer.
//! - [`SheetsBackend`] - HTTP client for an Apps-Script-style spreadsheet
//!   web API, with bounded exponential-backoff retry and a last-known-good
//!   cache for reads.
//! - [`PostgresBackend`] - `PostgreSQL` via sqlx; order item snapshots are
//!   stored as JSONB documents.
//!
//! # Contract
//!
//! Every mutation returns the full refreshed collection rather than a delta.
//! The extra round trip buys simplicity: callers replace their view of the
//! collection wholesale after each write.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod backend;
pub mod config;
pub mod local;
pub mod models;
pub mod postgres;
pub mod sheets;

pub use backend::{DynBackend, Result, StorageBackend, StorageError};
pub use config::{StorageConfig, StorageConfigError, connect};
pub use local::LocalBackend;
pub use models::{CartItem, Order, Product, ProductPatch, User, UserRecord};
pub use postgres::PostgresBackend;
pub use sheets::SheetsBackend;
