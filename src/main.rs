//! Bootstrap binary: provisions the fee database.
//!
//! Initializes logging, loads the reference configuration, connects to the
//! database, creates the schema, and seeds the configured categories and
//! class levels. Run it once before pointing the payment desk at the
//! database; re-running is harmless since seeding is idempotent.

use bursar::{config, core, errors::Result};
use dotenvy::dotenv;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // .env is optional; env vars can be set externally
    dotenv().ok();

    let reference_config = config::reference::load_default_config()
        .inspect_err(|e| error!("Failed to load config.toml: {e}"))?;

    let db = config::database::create_connection()
        .await
        .inspect(|_| info!("Database connection established."))
        .inspect_err(|e| error!("Failed to connect to database: {e}"))?;

    config::database::create_tables(&db)
        .await
        .inspect(|_| info!("Database schema created."))
        .inspect_err(|e| error!("Failed to create database schema: {e}"))?;

    core::reference::seed_reference_data(&db, &reference_config)
        .await
        .inspect_err(|e| error!("Failed to seed reference data: {e}"))?;

    let categories = core::reference::get_all_categories(&db).await?;
    let classes = core::reference::get_all_classes(&db).await?;
    info!(
        categories = categories.len(),
        classes = classes.len(),
        "Fee database ready."
    );

    Ok(())
}
