//! Authentication primitives.
//!
//! - [`jwt`] -- session-token generation and validation.
//! - [`session`] -- cookie helpers for the session and OAuth state cookies.

pub mod jwt;
pub mod session;
