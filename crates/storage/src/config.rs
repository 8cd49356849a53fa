//! Backend selection from environment configuration.
//!
//! # Environment Variables
//!
//! - `VIETLONG_STORAGE` - `local` (default), `sheets`, or `postgres`
//! - `VIETLONG_DATA_PATH` - data file for the local backend
//!   (default: `data/vietlong.json`)
//! - `VIETLONG_SHEETS_URL` - web-app URL for the sheets backend
//! - `VIETLONG_DATABASE_URL` - connection string for the postgres backend
//!   (falls back to `DATABASE_URL`)

use std::path::PathBuf;
use std::sync::Arc;

use secrecy::SecretString;
use thiserror::Error;

use crate::backend::{DynBackend, Result};
use crate::local::LocalBackend;
use crate::postgres::PostgresBackend;
use crate::sheets::SheetsBackend;

/// Default data file for the local backend.
const DEFAULT_DATA_PATH: &str = "data/vietlong.json";

/// Errors that can occur when loading the storage configuration.
#[derive(Debug, Error)]
pub enum StorageConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Which backend to use, decided once at startup.
#[derive(Debug, Clone)]
pub enum StorageConfig {
    /// JSON-file-backed local store.
    Local { path: PathBuf },
    /// Spreadsheet web API.
    Sheets { url: String },
    /// `PostgreSQL`.
    Postgres { database_url: SecretString },
}

impl StorageConfig {
    /// Load the backend selection from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `VIETLONG_STORAGE` names an unknown backend or a
    /// required variable for the selected backend is missing.
    pub fn from_env() -> std::result::Result<Self, StorageConfigError> {
        let kind =
            std::env::var("VIETLONG_STORAGE").unwrap_or_else(|_| "local".to_owned());

        match kind.as_str() {
            "local" => {
                let path = std::env::var("VIETLONG_DATA_PATH")
                    .unwrap_or_else(|_| DEFAULT_DATA_PATH.to_owned());
                Ok(Self::Local {
                    path: PathBuf::from(path),
                })
            }
            "sheets" => {
                let url = std::env::var("VIETLONG_SHEETS_URL").map_err(|_| {
                    StorageConfigError::MissingEnvVar("VIETLONG_SHEETS_URL".to_owned())
                })?;
                Ok(Self::Sheets { url })
            }
            "postgres" => {
                // VIETLONG_DATABASE_URL first, generic DATABASE_URL as
                // fallback (set by managed postgres attach).
                let url = std::env::var("VIETLONG_DATABASE_URL")
                    .or_else(|_| std::env::var("DATABASE_URL"))
                    .map_err(|_| {
                        StorageConfigError::MissingEnvVar("VIETLONG_DATABASE_URL".to_owned())
                    })?;
                Ok(Self::Postgres {
                    database_url: SecretString::from(url),
                })
            }
            other => Err(StorageConfigError::InvalidEnvVar(
                "VIETLONG_STORAGE".to_owned(),
                format!("unknown backend '{other}' (expected local, sheets, or postgres)"),
            )),
        }
    }

    /// Short backend name for logging.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Local { .. } => "local",
            Self::Sheets { .. } => "sheets",
            Self::Postgres { .. } => "postgres",
        }
    }
}

/// Construct the backend selected by `config`.
///
/// # Errors
///
/// Returns an error if the backend cannot be initialized (unreadable data
/// file, unreachable database).
pub async fn connect(config: &StorageConfig) -> Result<DynBackend> {
    let backend: DynBackend = match config {
        StorageConfig::Local { path } => Arc::new(LocalBackend::open(path).await?),
        StorageConfig::Sheets { url } => Arc::new(SheetsBackend::new(url.clone())),
        StorageConfig::Postgres { database_url } => {
            Arc::new(PostgresBackend::connect(database_url).await?)
        }
    };
    tracing::info!(backend = config.kind(), "storage backend ready");
    Ok(backend)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names() {
        let local = StorageConfig::Local {
            path: PathBuf::from("data/vietlong.json"),
        };
        assert_eq!(local.kind(), "local");

        let sheets = StorageConfig::Sheets {
            url: "https://script.google.com/macros/s/x/exec".to_owned(),
        };
        assert_eq!(sheets.kind(), "sheets");
    }
}
