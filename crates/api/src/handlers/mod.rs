//! Request handlers, grouped by resource.
//!
//! Helpers used by more than one resource live here.

pub mod auth;
pub mod faces;
pub mod uploads;
pub mod user;

use facerate_core::error::CoreError;
use facerate_core::types::DbId;
use facerate_core::upload::object_key_from_url;
use facerate_db::models::user::User;
use facerate_db::repositories::{RatingRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Load the signed-in user's row.
///
/// A valid token can outlive its account (deleted in another tab); such
/// callers are treated as signed out.
pub(crate) async fn require_existing_user(state: &AppState, user_id: DbId) -> AppResult<User> {
    UserRepo::find_by_id(&state.pool, user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("Account no longer exists".into())))
}

/// Reject the request with 403 until the user has rated enough faces.
pub(crate) async fn ensure_upload_unlocked(state: &AppState, user_id: DbId) -> AppResult<()> {
    let gate = state.upload_gate();
    let count = RatingRepo::count_by_user(&state.pool, user_id).await?;

    if !gate.is_unlocked(count) {
        let remaining = gate.remaining(count);
        let noun = if remaining == 1 { "face" } else { "faces" };
        return Err(AppError::Core(CoreError::Forbidden(format!(
            "Rate {remaining} more {noun} to unlock uploads"
        ))));
    }

    Ok(())
}

/// Best-effort removal of the stored image behind `image_url`.
///
/// Images outside the store (seeded URLs) are skipped; storage failures are
/// logged and swallowed so the database change they accompany still goes
/// through.
pub(crate) async fn remove_stored_image(state: &AppState, image_url: &str) {
    let Some(key) = object_key_from_url(image_url, state.store.public_base_url()) else {
        tracing::warn!(image_url, "Image URL is not in the object store, skipping removal");
        return;
    };

    if let Err(e) = state.store.remove(&key).await {
        tracing::warn!(error = %e, key = %key, "Failed to remove stored image");
    }
}
