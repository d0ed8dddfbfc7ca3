//! User entity model and DTOs.

use facerate_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Full user row from the `users` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    /// Stable subject identifier issued by the identity provider.
    pub provider_subject: String,
    pub email: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating (or refreshing) a user after sign-in.
#[derive(Debug, Clone)]
pub struct UpsertUser {
    pub provider_subject: String,
    pub email: Option<String>,
}
