//! Object storage for uploaded face images.
//!
//! Handlers only see the [`ObjectStore`] trait. Production deployments use
//! [`s3::S3ObjectStore`]; local development (and the integration tests) use
//! [`local::LocalObjectStore`], whose directory is served under `/uploads`.

pub mod local;
pub mod s3;

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use facerate_core::upload::public_url_for;

/// `Cache-Control` header stored with every uploaded image.
pub const CACHE_CONTROL: &str = "max-age=3600";

/// Errors raised by an object-store backend.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The key is empty or would escape the bucket.
    #[error("Invalid object key '{0}'")]
    InvalidKey(String),

    /// An object already exists under the key; uploads never overwrite.
    #[error("Object '{0}' already exists")]
    AlreadyExists(String),

    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error reported by a remote backend, with its message.
    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// A bucket of publicly readable image objects.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Store `bytes` under `key`. Fails if the key is already taken.
    async fn put(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> Result<(), StorageError>;

    /// Remove the object under `key`. Removing a missing object succeeds.
    async fn remove(&self, key: &str) -> Result<(), StorageError>;

    /// Base URL under which stored objects are publicly reachable.
    fn public_base_url(&self) -> &str;

    /// Public URL of the object stored under `key`.
    fn public_url(&self, key: &str) -> String {
        public_url_for(self.public_base_url(), key)
    }
}

/// Reject keys that are empty or could address something outside the bucket.
pub(crate) fn check_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && !key.starts_with('/')
        && !key.contains('\\')
        && key.split('/').all(|seg| !seg.is_empty() && seg != "." && seg != "..");
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Which backend stores the images.
#[derive(Debug, Clone)]
pub enum StorageBackend {
    /// Files in a local directory, served by this process under `/uploads`.
    Local { dir: PathBuf },
    /// An S3 bucket; credentials and region come from the standard AWS
    /// environment.
    S3 { bucket: String },
}

/// Object-store configuration.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    /// Base URL clients use to fetch stored images.
    pub public_base_url: String,
}

impl StorageConfig {
    /// Load storage configuration from environment variables.
    ///
    /// | Env Var                   | Default                          |
    /// |---------------------------|----------------------------------|
    /// | `STORAGE_BACKEND`         | `local` (or `s3`)                |
    /// | `STORAGE_LOCAL_DIR`       | `./uploads`                      |
    /// | `STORAGE_PUBLIC_BASE_URL` | `http://localhost:3000/uploads`  |
    /// | `S3_BUCKET`               | required when backend is `s3`    |
    ///
    /// # Panics
    ///
    /// Panics on an unknown backend or a missing `S3_BUCKET`.
    pub fn from_env() -> Self {
        let backend = match std::env::var("STORAGE_BACKEND")
            .unwrap_or_else(|_| "local".into())
            .as_str()
        {
            "local" => StorageBackend::Local {
                dir: std::env::var("STORAGE_LOCAL_DIR")
                    .unwrap_or_else(|_| "./uploads".into())
                    .into(),
            },
            "s3" => StorageBackend::S3 {
                bucket: std::env::var("S3_BUCKET")
                    .expect("S3_BUCKET must be set when STORAGE_BACKEND=s3"),
            },
            other => panic!("Unknown STORAGE_BACKEND '{other}'. Must be one of: local, s3"),
        };

        let public_base_url = std::env::var("STORAGE_PUBLIC_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:3000/uploads".into())
            .trim_end_matches('/')
            .to_string();

        Self {
            backend,
            public_base_url,
        }
    }
}

/// Build the configured object store.
pub async fn build_object_store(config: &StorageConfig) -> Result<Arc<dyn ObjectStore>, StorageError> {
    match &config.backend {
        StorageBackend::Local { dir } => {
            let store = local::LocalObjectStore::create(dir.clone(), &config.public_base_url).await?;
            Ok(Arc::new(store))
        }
        StorageBackend::S3 { bucket } => {
            let aws = aws_config::load_from_env().await;
            let client = aws_sdk_s3::Client::new(&aws);
            Ok(Arc::new(s3::S3ObjectStore::new(
                client,
                bucket.clone(),
                &config.public_base_url,
            )))
        }
    }
}
