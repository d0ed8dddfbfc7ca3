//! Route definitions for the signed-in user's own resources.

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::user;
use crate::state::AppState;

/// Routes mounted at `/user`.
///
/// ```text
/// DELETE /               -> delete_account
/// GET    /face           -> get_own_face
/// GET    /rating-count   -> get_rating_count
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", delete(user::delete_account))
        .route("/face", get(user::get_own_face))
        .route("/rating-count", get(user::get_rating_count))
}
