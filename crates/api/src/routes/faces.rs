//! Route definitions for the `/faces` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::faces;
use crate::state::AppState;

/// Routes mounted at `/faces`.
///
/// ```text
/// GET  /            -> random_face
/// POST /            -> create_face
/// POST /{id}/rate   -> rate_face
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(faces::random_face).post(faces::create_face))
        .route("/{id}/rate", post(faces::rate_face))
}
