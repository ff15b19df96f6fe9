use std::sync::Arc;

use karat_core::catalog::ReferenceCatalog;

use crate::config::ServerConfig;
use crate::error::{AppError, AppResult};

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone; the catalog is loaded once at start-up and never mutated.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub catalog: Arc<ReferenceCatalog>,
}

impl AppState {
    /// Build state for `config`, loading the reference catalog it points at.
    pub fn from_config(config: ServerConfig) -> AppResult<Self> {
        let catalog = load_catalog(&config)?;
        Ok(Self {
            config: Arc::new(config),
            catalog: Arc::new(catalog),
        })
    }
}

/// Load the catalog from `CATALOG_PATH`, or the embedded one when unset.
pub fn load_catalog(config: &ServerConfig) -> AppResult<ReferenceCatalog> {
    let Some(path) = &config.catalog_path else {
        tracing::info!("Using embedded reference catalog");
        return Ok(ReferenceCatalog::builtin()?);
    };

    let raw = std::fs::read_to_string(path).map_err(|e| {
        AppError::InternalError(format!("Failed to read catalog {}: {e}", path.display()))
    })?;
    let catalog = ReferenceCatalog::from_json(&raw)?;
    tracing::info!(
        path = %path.display(),
        metals = catalog.metals.len(),
        "Loaded reference catalog"
    );
    Ok(catalog)
}
