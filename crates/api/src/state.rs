use std::sync::Arc;

use facerate_core::gate::UploadGate;

use crate::config::ServerConfig;
use crate::identity::IdentityProvider;
use crate::storage::ObjectStore;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: facerate_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Object store holding uploaded face images.
    pub store: Arc<dyn ObjectStore>,
    /// OAuth2 identity provider used by the sign-in flow.
    pub identity: Arc<dyn IdentityProvider>,
}

impl AppState {
    /// Upload gate built from the configured threshold.
    pub fn upload_gate(&self) -> UploadGate {
        UploadGate::new(self.config.upload_rating_threshold)
    }
}
