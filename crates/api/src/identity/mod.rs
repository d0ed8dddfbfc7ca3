//! Sign-in through an external OAuth2 identity provider.
//!
//! The service never sees passwords. `/auth/login` sends the browser to the
//! provider's authorization page; `/auth/callback` trades the returned code
//! for the caller's identity via [`IdentityProvider::exchange_code`].

pub mod oauth;

use async_trait::async_trait;

pub use oauth::{OAuthConfig, OAuthIdentityProvider};

/// Identity asserted by the provider for a signed-in user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Provider-unique, stable subject identifier.
    pub subject: String,
    pub email: Option<String>,
}

/// Errors raised while talking to the identity provider.
#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    #[error("Invalid identity provider configuration: {0}")]
    Config(String),

    /// The provider rejected the authorization code.
    #[error("Code exchange rejected: {0}")]
    Rejected(String),

    /// The provider answered with something we could not use.
    #[error("Invalid provider response: {0}")]
    InvalidResponse(String),

    #[error("Identity provider request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// An OAuth2 authorization-code identity provider.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// URL of the provider's consent page for a new sign-in.
    ///
    /// `next` is the sanitized path to land on afterwards; it rides along on
    /// the callback URL.
    fn authorize_url(&self, state: &str, next: Option<&str>) -> String;

    /// Exchange an authorization code for the user's identity. `next` must be
    /// the value passed to [`IdentityProvider::authorize_url`], since the
    /// provider checks the callback URL again.
    async fn exchange_code(&self, code: &str, next: Option<&str>) -> Result<Identity, IdentityError>;
}
