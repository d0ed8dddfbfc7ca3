//! Cookie helpers for the session token and the OAuth `state` nonce.
//!
//! Browsers signed in through `/auth/callback` carry the session JWT in an
//! `HttpOnly` cookie; API clients may send the same token as a Bearer header.

use axum::http::header::COOKIE;
use axum::http::HeaderMap;

/// Cookie holding the session JWT.
pub const SESSION_COOKIE: &str = "facerate_session";

/// Cookie holding the OAuth `state` nonce between `/auth/login` and
/// `/auth/callback`.
pub const OAUTH_STATE_COOKIE: &str = "facerate_oauth_state";

/// Lifetime of the OAuth state cookie in seconds.
pub const OAUTH_STATE_MAX_AGE_SECS: i64 = 600;

/// Build a `Set-Cookie` value for an `HttpOnly`, `SameSite=Lax` cookie
/// scoped to the whole site.
pub fn build_cookie(name: &str, value: &str, max_age_secs: i64, secure: bool) -> String {
    let mut cookie =
        format!("{name}={value}; Path=/; Max-Age={max_age_secs}; HttpOnly; SameSite=Lax");
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// Build a `Set-Cookie` value that expires `name` immediately.
pub fn clear_cookie(name: &str, secure: bool) -> String {
    build_cookie(name, "", 0, secure)
}

/// Read the value of cookie `name` from the request's `Cookie` headers.
///
/// Empty values are treated as absent.
pub fn read_cookie<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|header| header.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim())
        .filter(|value| !value.is_empty())
}
