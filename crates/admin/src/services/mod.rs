//! Business services for the admin API.

pub mod auth;
pub mod export;
pub mod orders;
