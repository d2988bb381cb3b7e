//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use impactqr_core::config::AppConfig;
use impactqr_core::error::AppError;
use impactqr_service::UploadService;
use impactqr_store::{BlobRegistry, SecretHasher};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Ephemeral link store
    pub registry: Arc<BlobRegistry>,
    /// Upload validation and bundling
    pub upload_service: Arc<UploadService>,
}

impl AppState {
    /// Build the state from configuration with a fresh, empty registry.
    pub fn new(config: AppConfig) -> Result<Self, AppError> {
        let hasher = SecretHasher::new(&config.links.secret)?;
        let registry = Arc::new(BlobRegistry::new(hasher));
        Ok(Self::with_registry(config, registry))
    }

    /// Build the state around an existing registry.
    pub fn with_registry(config: AppConfig, registry: Arc<BlobRegistry>) -> Self {
        let upload_service = Arc::new(UploadService::new(
            Arc::clone(&registry),
            config.uploads.clone(),
            config.links.ttl(),
        ));

        Self {
            config: Arc::new(config),
            registry,
            upload_service,
        }
    }
}
