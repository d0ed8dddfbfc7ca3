//! Repository for the `faces` table and the face stored functions.

use facerate_core::types::DbId;
use sqlx::PgPool;

use crate::models::face::{CreateFace, Face, FaceStats, PublicFace};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, image_url, user_id, created_at";

/// Provides CRUD operations for faces plus the random-pick and statistics
/// procedures.
pub struct FaceRepo;

impl FaceRepo {
    /// Insert a new face, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateFace) -> Result<Face, sqlx::Error> {
        let query = format!(
            "INSERT INTO faces (image_url, user_id)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Face>(&query)
            .bind(&input.image_url)
            .bind(input.user_id)
            .fetch_one(pool)
            .await
    }

    /// Find a face by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Face>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM faces WHERE id = $1");
        sqlx::query_as::<_, Face>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Whether a face with the given ID exists.
    pub async fn exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let row: (bool,) = sqlx::query_as("SELECT EXISTS (SELECT 1 FROM faces WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await?;
        Ok(row.0)
    }

    /// Find the face owned by a user, if they uploaded one.
    pub async fn find_by_user(pool: &PgPool, user_id: DbId) -> Result<Option<Face>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM faces WHERE user_id = $1");
        sqlx::query_as::<_, Face>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Replace the user's face with a new one in a single transaction.
    ///
    /// Any face the user already owns is deleted first (its ratings cascade).
    /// Returns the new row and the replaced row, if there was one, so the
    /// caller can clean up the old image.
    pub async fn replace_for_user(
        pool: &PgPool,
        user_id: DbId,
        image_url: &str,
    ) -> Result<(Face, Option<Face>), sqlx::Error> {
        let mut tx = pool.begin().await?;

        let delete_query = format!("DELETE FROM faces WHERE user_id = $1 RETURNING {COLUMNS}");
        let replaced = sqlx::query_as::<_, Face>(&delete_query)
            .bind(user_id)
            .fetch_optional(&mut *tx)
            .await?;

        let insert_query = format!(
            "INSERT INTO faces (image_url, user_id)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        let face = sqlx::query_as::<_, Face>(&insert_query)
            .bind(image_url)
            .bind(user_id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok((face, replaced))
    }

    /// Delete a face by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM faces WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Pick a random face via `get_random_face`, skipping `exclude`.
    ///
    /// Returns `None` once every face has been excluded.
    pub async fn random(pool: &PgPool, exclude: &[DbId]) -> Result<Option<PublicFace>, sqlx::Error> {
        sqlx::query_as::<_, PublicFace>(
            "SELECT id, image_url, created_at FROM get_random_face($1)",
        )
        .bind(exclude)
        .fetch_optional(pool)
        .await
    }

    /// Aggregate ratings for a face via `get_face_stats`.
    ///
    /// Falls back to empty stats if the procedure yields no row.
    pub async fn stats(pool: &PgPool, face_id: DbId) -> Result<FaceStats, sqlx::Error> {
        let stats = sqlx::query_as::<_, FaceStats>(
            "SELECT average_rating, total_ratings, distribution FROM get_face_stats($1)",
        )
        .bind(face_id)
        .fetch_optional(pool)
        .await?;
        Ok(stats.unwrap_or_default())
    }
}
