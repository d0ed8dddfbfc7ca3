//! Generic OAuth2 authorization-code provider (token + userinfo endpoints).

use async_trait::async_trait;
use reqwest::Url;
use serde::Deserialize;
use serde_json::Value;

use super::{Identity, IdentityError, IdentityProvider};

/// OAuth2 client configuration.
#[derive(Debug, Clone)]
pub struct OAuthConfig {
    pub client_id: String,
    pub client_secret: String,
    pub authorize_url: String,
    pub token_url: String,
    pub userinfo_url: String,
    /// Callback URL registered with the provider (this service's `/auth/callback`).
    pub redirect_url: String,
    pub scopes: Vec<String>,
}

impl OAuthConfig {
    /// Load OAuth configuration from environment variables.
    ///
    /// | Env Var               | Required | Default                                              |
    /// |-----------------------|----------|------------------------------------------------------|
    /// | `OAUTH_CLIENT_ID`     | **yes**  | --                                                   |
    /// | `OAUTH_CLIENT_SECRET` | **yes**  | --                                                   |
    /// | `OAUTH_AUTHORIZE_URL` | no       | `https://accounts.google.com/o/oauth2/v2/auth`       |
    /// | `OAUTH_TOKEN_URL`     | no       | `https://oauth2.googleapis.com/token`                |
    /// | `OAUTH_USERINFO_URL`  | no       | `https://openidconnect.googleapis.com/v1/userinfo`   |
    /// | `OAUTH_REDIRECT_URL`  | no       | `http://localhost:3000/auth/callback`                |
    /// | `OAUTH_SCOPES`        | no       | `openid email`                                       |
    ///
    /// # Panics
    ///
    /// Panics if the client id or secret is missing.
    pub fn from_env() -> Self {
        let client_id =
            std::env::var("OAUTH_CLIENT_ID").expect("OAUTH_CLIENT_ID must be set in the environment");
        let client_secret = std::env::var("OAUTH_CLIENT_SECRET")
            .expect("OAUTH_CLIENT_SECRET must be set in the environment");

        let var_or = |name: &str, default: &str| std::env::var(name).unwrap_or_else(|_| default.into());

        Self {
            client_id,
            client_secret,
            authorize_url: var_or("OAUTH_AUTHORIZE_URL", "https://accounts.google.com/o/oauth2/v2/auth"),
            token_url: var_or("OAUTH_TOKEN_URL", "https://oauth2.googleapis.com/token"),
            userinfo_url: var_or(
                "OAUTH_USERINFO_URL",
                "https://openidconnect.googleapis.com/v1/userinfo",
            ),
            redirect_url: var_or("OAUTH_REDIRECT_URL", "http://localhost:3000/auth/callback"),
            scopes: var_or("OAUTH_SCOPES", "openid email")
                .split_whitespace()
                .map(str::to_string)
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// [`IdentityProvider`] talking to a standard OAuth2 provider over HTTPS.
#[derive(Debug, Clone)]
pub struct OAuthIdentityProvider {
    http: reqwest::Client,
    config: OAuthConfig,
    authorize_endpoint: Url,
    redirect_endpoint: Url,
}

impl OAuthIdentityProvider {
    /// Build a provider client. Fails if the configured URLs do not parse.
    pub fn new(config: OAuthConfig) -> Result<Self, IdentityError> {
        let parse = |name: &str, raw: &str| {
            Url::parse(raw).map_err(|e| IdentityError::Config(format!("{name} '{raw}': {e}")))
        };
        let authorize_endpoint = parse("authorize_url", &config.authorize_url)?;
        let redirect_endpoint = parse("redirect_url", &config.redirect_url)?;
        parse("token_url", &config.token_url)?;
        parse("userinfo_url", &config.userinfo_url)?;

        Ok(Self {
            http: reqwest::Client::new(),
            config,
            authorize_endpoint,
            redirect_endpoint,
        })
    }

    /// Callback URL for this sign-in, carrying `next` when it is not the root.
    pub fn redirect_uri(&self, next: Option<&str>) -> String {
        let mut url = self.redirect_endpoint.clone();
        if let Some(next) = next.filter(|n| *n != "/") {
            url.query_pairs_mut().append_pair("next", next);
        }
        url.to_string()
    }
}

#[async_trait]
impl IdentityProvider for OAuthIdentityProvider {
    fn authorize_url(&self, state: &str, next: Option<&str>) -> String {
        let mut url = self.authorize_endpoint.clone();
        url.query_pairs_mut()
            .append_pair("client_id", &self.config.client_id)
            .append_pair("redirect_uri", &self.redirect_uri(next))
            .append_pair("response_type", "code")
            .append_pair("scope", &self.config.scopes.join(" "))
            .append_pair("state", state);
        url.to_string()
    }

    async fn exchange_code(&self, code: &str, next: Option<&str>) -> Result<Identity, IdentityError> {
        // Step 1: exchange the code for an access token.
        let redirect_uri = self.redirect_uri(next);
        let token_resp = self
            .http
            .post(&self.config.token_url)
            .form(&[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("client_id", self.config.client_id.as_str()),
                ("client_secret", self.config.client_secret.as_str()),
                ("redirect_uri", redirect_uri.as_str()),
            ])
            .send()
            .await?;

        if !token_resp.status().is_success() {
            let status = token_resp.status();
            let body = token_resp.text().await.unwrap_or_default();
            return Err(IdentityError::Rejected(format!("{status}: {body}")));
        }

        let token: TokenResponse = token_resp
            .json()
            .await
            .map_err(|e| IdentityError::InvalidResponse(format!("token response: {e}")))?;

        // Step 2: fetch the user profile.
        let info: Value = self
            .http
            .get(&self.config.userinfo_url)
            .bearer_auth(&token.access_token)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
            .map_err(|e| IdentityError::InvalidResponse(format!("userinfo response: {e}")))?;

        identity_from_userinfo(&info)
    }
}

/// Pull the subject and email out of a userinfo document.
///
/// OpenID providers use `sub`; some plain OAuth2 providers only send a
/// numeric or string `id`.
fn identity_from_userinfo(info: &Value) -> Result<Identity, IdentityError> {
    let subject = match info.get("sub").or_else(|| info.get("id")) {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => {
            return Err(IdentityError::InvalidResponse(
                "userinfo has no subject".into(),
            ))
        }
    };

    let email = info
        .get("email")
        .and_then(Value::as_str)
        .filter(|e| !e.is_empty())
        .map(str::to_string);

    Ok(Identity { subject, email })
}
