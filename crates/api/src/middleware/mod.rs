//! Request extractors shared across handlers.
//!
//! - [`auth::AuthUser`] -- Extracts the signed-in user from the session token;
//!   `Option<AuthUser>` for routes that also accept anonymous callers.

pub mod auth;
