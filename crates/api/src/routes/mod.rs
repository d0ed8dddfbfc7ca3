pub mod auth;
pub mod faces;
pub mod health;
pub mod uploads;
pub mod user;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /faces                  random face (GET), register face (POST, auth + gate)
/// /faces/{id}/rate        rate a face (POST, optional auth)
///
/// /uploads                upload an image (POST multipart, auth + gate)
///
/// /user                   delete account (DELETE, auth)
/// /user/face              own face and stats (GET, auth)
/// /user/rating-count      ratings given and gate progress (GET, auth)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/faces", faces::router())
        .nest("/uploads", uploads::router())
        .nest("/user", user::router())
}
