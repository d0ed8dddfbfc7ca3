//! Handlers for the `/api/faces` resource (random pick, upload, rating).

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use facerate_core::error::CoreError;
use facerate_core::exclusion::parse_exclude_list;
use facerate_core::rating::validate_score;
use facerate_core::types::DbId;
use facerate_core::upload::validate_image_url;
use facerate_db::models::rating::CreateRating;
use facerate_db::repositories::{FaceRepo, RatingRepo, UserRepo};
use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::handlers::{ensure_upload_unlocked, remove_stored_image, require_existing_user};
use crate::middleware::auth::AuthUser;
use crate::query::{CreateFaceRequest, ExcludeParams, RateRequest};
use crate::response::{CreateFaceResponse, RandomFaceResponse, RateResponse};
use crate::state::AppState;

/// GET /api/faces?exclude=id1,id2
///
/// Return one random face the caller has not seen yet, or `{ "face": null }`
/// when every face is excluded.
pub async fn random_face(
    State(state): State<AppState>,
    Query(params): Query<ExcludeParams>,
) -> AppResult<impl IntoResponse> {
    let exclude = parse_exclude_list(params.exclude.as_deref())?;
    let face = FaceRepo::random(&state.pool, &exclude).await?;

    Ok(Json(RandomFaceResponse { face }))
}

/// POST /api/faces
///
/// Register an uploaded image as the caller's face. Requires sign-in and an
/// unlocked upload gate. A previous face of the same user is replaced, and
/// its stored image removed.
pub async fn create_face(
    user: AuthUser,
    State(state): State<AppState>,
    AppJson(body): AppJson<Value>,
) -> AppResult<impl IntoResponse> {
    let input = CreateFaceRequest::from(body);
    let image_url = validate_image_url(&input.image_url, state.store.public_base_url())?;

    require_existing_user(&state, user.user_id).await?;
    ensure_upload_unlocked(&state, user.user_id).await?;

    let (face, replaced) = FaceRepo::replace_for_user(&state.pool, user.user_id, &image_url).await?;

    if let Some(old) = replaced {
        tracing::info!(face_id = %old.id, user_id = %user.user_id, "Replaced previous face");
        if old.image_url != face.image_url {
            remove_stored_image(&state, &old.image_url).await;
        }
    }

    tracing::info!(face_id = %face.id, user_id = %user.user_id, "Face created");

    Ok((
        StatusCode::CREATED,
        Json(CreateFaceResponse {
            success: true,
            face,
        }),
    ))
}

/// POST /api/faces/{id}/rate
///
/// Record a 1-10 rating and return the face's updated stats. Anonymous
/// ratings are accepted; signed-in raters are recorded so their ratings count
/// toward the upload gate.
pub async fn rate_face(
    user: Option<AuthUser>,
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    AppJson(body): AppJson<Value>,
) -> AppResult<impl IntoResponse> {
    let input = RateRequest::from(body);
    let score = validate_score(&input.score)?;

    let face_id = DbId::parse_str(&raw_id)
        .map_err(|_| AppError::Core(CoreError::Validation(format!("Invalid face id '{raw_id}'"))))?;

    if !FaceRepo::exists(&state.pool, face_id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Face",
            id: face_id,
        }));
    }

    // A token that outlived its account rates anonymously.
    let rater = match user {
        Some(u) => UserRepo::find_by_id(&state.pool, u.user_id)
            .await?
            .map(|found| found.id),
        None => None,
    };

    let rating = RatingRepo::create(
        &state.pool,
        &CreateRating {
            face_id,
            score,
            user_id: rater,
        },
    )
    .await?;

    tracing::info!(
        face_id = %face_id,
        rating_id = %rating.id,
        score,
        authenticated = rating.user_id.is_some(),
        "Rating recorded",
    );

    let stats = FaceRepo::stats(&state.pool, face_id).await?;

    Ok(Json(RateResponse {
        success: true,
        stats,
    }))
}
