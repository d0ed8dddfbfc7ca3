//! Handlers for the signed-in user's own resources (`/api/user`).

use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::response::{AppendHeaders, IntoResponse};
use axum::Json;
use facerate_db::models::face::PublicFace;
use facerate_db::repositories::{FaceRepo, RatingRepo, UserRepo};

use crate::auth::session::{clear_cookie, SESSION_COOKIE};
use crate::error::AppResult;
use crate::handlers::remove_stored_image;
use crate::middleware::auth::AuthUser;
use crate::response::{SuccessResponse, UserFaceResponse};
use crate::state::AppState;

/// GET /api/user/face
///
/// The caller's own face and its stats, or both `null` if they have not
/// uploaded one.
pub async fn get_own_face(
    user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let Some(face) = FaceRepo::find_by_user(&state.pool, user.user_id).await? else {
        return Ok(Json(UserFaceResponse {
            face: None,
            stats: None,
        }));
    };

    let stats = FaceRepo::stats(&state.pool, face.id).await?;

    Ok(Json(UserFaceResponse {
        face: Some(PublicFace::from(face)),
        stats: Some(stats),
    }))
}

/// GET /api/user/rating-count
///
/// How many ratings the caller has submitted, with the upload-gate progress.
pub async fn get_rating_count(
    user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let count = RatingRepo::count_by_user(&state.pool, user.user_id).await?;

    Ok(Json(state.upload_gate().status(count)))
}

/// DELETE /api/user
///
/// Delete the caller's account: their face (ratings on it cascade), its
/// stored image and the user row. Ratings they gave stay, detached from the
/// account. The session cookie is cleared.
///
/// The face row goes first; the image is removed only once nothing points
/// at it any more.
pub async fn delete_account(
    user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    if let Some(face) = FaceRepo::find_by_user(&state.pool, user.user_id).await? {
        FaceRepo::delete(&state.pool, face.id).await?;
        remove_stored_image(&state, &face.image_url).await;
        tracing::info!(face_id = %face.id, user_id = %user.user_id, "Face deleted with account");
    }

    let removed = UserRepo::delete(&state.pool, user.user_id).await?;
    tracing::info!(user_id = %user.user_id, removed, "Account deleted");

    let secure = state.config.secure_cookies();
    Ok((
        AppendHeaders([(SET_COOKIE, clear_cookie(SESSION_COOKIE, secure))]),
        Json(SuccessResponse::ok()),
    ))
}
