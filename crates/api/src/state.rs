use std::sync::Arc;

use zfarming_core::catalog::CatalogProvider;
use zfarming_core::identification::IdentificationProvider;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: zfarming_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Read-only view of the active catalog used by the finder, scanner and care hub.
    pub catalog: Arc<dyn CatalogProvider>,
    /// Live plant identification provider.
    pub identifier: Arc<dyn IdentificationProvider>,
}
