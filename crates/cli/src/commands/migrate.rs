//! Apply `PostgreSQL` migrations.

use secrecy::SecretString;
use tracing::info;

use vietlong_storage::PostgresBackend;

/// Apply the embedded migrations to the configured database.
///
/// Reads `VIETLONG_DATABASE_URL` (falling back to `DATABASE_URL`). Only
/// meaningful for the postgres backend; the local and sheets backends have
/// no schema.
///
/// # Errors
///
/// Returns an error if the connection or a migration fails.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("VIETLONG_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .map_err(|_| "VIETLONG_DATABASE_URL not set")?;

    let backend = PostgresBackend::connect(&database_url).await?;
    info!("Connected to database");

    backend.run_migrations().await?;
    info!("Migrations applied");

    Ok(())
}
