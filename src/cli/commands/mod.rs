//! Subcommand implementations.

pub mod init;
pub mod read;
pub mod serve;

use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;

use crate::adapters::http::AppState;
use crate::adapters::remote::build_product_source;
use crate::adapters::sqlite::{initialize_database, PoolConfig, SqliteBookRepository};
use crate::domain::models::Config;
use crate::infrastructure::config::ConfigLoader;

/// Load the project configuration, or the given file when one is passed.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => ConfigLoader::load_from_file(path),
        None => ConfigLoader::load(),
    }
}

/// Open the book store and the product source and wire the handlers.
pub async fn build_app_state(config: &Config) -> Result<AppState> {
    let pool_config = PoolConfig::default().with_max_connections(config.database.max_connections);
    let pool = initialize_database(&config.database.url(), pool_config)
        .await
        .with_context(|| format!("Failed to open database at {}", config.database.path))?;

    let products = build_product_source(&config.remote).context("Failed to build product source")?;
    let books = Arc::new(SqliteBookRepository::new(pool));

    Ok(AppState::new(products, books))
}
