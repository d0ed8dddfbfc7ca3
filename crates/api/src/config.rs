use crate::auth::jwt::JwtConfig;
use crate::identity::OAuthConfig;
use crate::storage::StorageConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Grace period for in-flight requests after a shutdown signal (default: `30`).
    pub shutdown_timeout_secs: u64,
    /// Public origin of the web app; sign-in redirects land here.
    pub app_origin: String,
    /// Ratings a user must submit before uploads unlock (default: `50`).
    pub upload_rating_threshold: i64,
    /// JWT token configuration (secret, expiry).
    pub jwt: JwtConfig,
    /// Object store for uploaded images.
    pub storage: StorageConfig,
    /// OAuth2 identity provider endpoints and client credentials.
    pub oauth: OAuthConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                   | Default                 |
    /// |---------------------------|-------------------------|
    /// | `HOST`                    | `0.0.0.0`               |
    /// | `PORT`                    | `3000`                  |
    /// | `CORS_ORIGINS`            | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`    | `30`                    |
    /// | `SHUTDOWN_TIMEOUT_SECS`   | `30`                    |
    /// | `APP_ORIGIN`              | `http://localhost:5173` |
    /// | `UPLOAD_RATING_THRESHOLD` | `50`                    |
    ///
    /// JWT, storage and OAuth settings are documented on their own config
    /// types.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let shutdown_timeout_secs: u64 = std::env::var("SHUTDOWN_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("SHUTDOWN_TIMEOUT_SECS must be a valid u64");

        let app_origin = std::env::var("APP_ORIGIN")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .trim_end_matches('/')
            .to_string();

        let upload_rating_threshold: i64 = std::env::var("UPLOAD_RATING_THRESHOLD")
            .unwrap_or_else(|_| facerate_core::gate::REQUIRED_RATINGS.to_string())
            .parse()
            .expect("UPLOAD_RATING_THRESHOLD must be a valid i64");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            app_origin,
            upload_rating_threshold,
            jwt: JwtConfig::from_env(),
            storage: StorageConfig::from_env(),
            oauth: OAuthConfig::from_env(),
        }
    }

    /// Whether cookies must carry the `Secure` attribute.
    pub fn secure_cookies(&self) -> bool {
        self.app_origin.starts_with("https://")
    }
}
