//! Repository for the `users` table.

use facerate_core::types::DbId;
use sqlx::PgPool;

use crate::models::user::{UpsertUser, User};

const COLUMNS: &str = "id, provider_subject, email, created_at, updated_at";

pub struct UserRepo;

impl UserRepo {
    /// Create the user for an identity-provider subject, or refresh the stored
    /// email of an existing one. Returns the resulting row either way.
    pub async fn upsert_by_subject(pool: &PgPool, input: &UpsertUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (provider_subject, email)
             VALUES ($1, $2)
             ON CONFLICT (provider_subject) DO UPDATE SET
                email = COALESCE(EXCLUDED.email, users.email),
                updated_at = NOW()
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.provider_subject)
            .bind(&input.email)
            .fetch_one(pool)
            .await
    }

    /// Find a user by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a user. Their face cascades; ratings they gave keep their score
    /// but lose the rater reference. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
