//! Rating entity model and DTOs.

use facerate_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `ratings` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Rating {
    pub id: DbId,
    pub face_id: DbId,
    pub score: i16,
    pub user_id: Option<DbId>,
    pub created_at: Timestamp,
}

/// DTO for inserting a rating. `score` must already be validated.
#[derive(Debug, Clone)]
pub struct CreateRating {
    pub face_id: DbId,
    pub score: i16,
    /// Rater, when the request carried a valid session.
    pub user_id: Option<DbId>,
}
