//! Handler for image uploads into the object store.

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use facerate_core::error::CoreError;
use facerate_core::upload::{content_type_for, validate_upload};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::handlers::{ensure_upload_unlocked, require_existing_user};
use crate::middleware::auth::AuthUser;
use crate::response::UploadResponse;
use crate::state::AppState;
use crate::storage::StorageError;

/// Multipart field carrying the image.
const FILE_FIELD: &str = "file";

/// POST /api/uploads
///
/// Store an image (multipart field `file`) under a fresh random key and
/// return its public URL. The URL is then registered with `POST /api/faces`.
pub async fn upload_image(
    user: AuthUser,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    require_existing_user(&state, user.user_id).await?;
    ensure_upload_unlocked(&state, user.user_id).await?;

    let mut upload = None;
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await.map_err(multipart_error)?;
        upload = Some((content_type, bytes));
        break;
    }

    let (content_type, bytes) = upload.ok_or_else(|| {
        AppError::Core(CoreError::Validation(format!(
            "Multipart field '{FILE_FIELD}' is required"
        )))
    })?;

    let ext = validate_upload(content_type.as_deref(), &bytes)?;
    let key = format!("{}.{ext}", Uuid::new_v4());

    state
        .store
        .put(&key, bytes.to_vec(), content_type_for(ext))
        .await
        .map_err(|e| match e {
            StorageError::AlreadyExists(key) => AppError::Core(CoreError::Conflict(format!(
                "An upload already exists at '{key}'"
            ))),
            other => other.into(),
        })?;

    let image_url = state.store.public_url(&key);
    tracing::info!(user_id = %user.user_id, key = %key, size = bytes.len(), "Image uploaded");

    Ok((
        StatusCode::CREATED,
        Json(UploadResponse {
            image_url,
            path: key,
        }),
    ))
}

/// Map a multipart parsing failure to a 400, reporting oversized bodies with
/// the same message as the size check.
fn multipart_error(err: axum::extract::multipart::MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::Core(CoreError::Validation("Image must be under 5MB".into()))
    } else {
        AppError::BadRequest(err.body_text())
    }
}
