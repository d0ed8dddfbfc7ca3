//! Repository for the `ratings` table.

use facerate_core::types::DbId;
use sqlx::PgPool;

use crate::models::rating::{CreateRating, Rating};

const COLUMNS: &str = "id, face_id, score, user_id, created_at";

/// Ratings are insert-only; rows disappear only through cascades.
pub struct RatingRepo;

impl RatingRepo {
    /// Insert a rating, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateRating) -> Result<Rating, sqlx::Error> {
        let query = format!(
            "INSERT INTO ratings (face_id, score, user_id)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Rating>(&query)
            .bind(input.face_id)
            .bind(input.score)
            .bind(input.user_id)
            .fetch_one(pool)
            .await
    }

    /// Number of ratings a user has submitted.
    pub async fn count_by_user(pool: &PgPool, user_id: DbId) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM ratings WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(pool)
            .await?;
        Ok(row.0)
    }
}
