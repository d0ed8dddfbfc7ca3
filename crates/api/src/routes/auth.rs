//! Route definitions for the `/auth` sign-in flow.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Routes mounted at `/auth` (outside `/api`, since browsers navigate here).
///
/// ```text
/// GET  /login     -> login
/// GET  /callback  -> callback
/// POST /logout    -> logout
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", get(auth::login))
        .route("/callback", get(auth::callback))
        .route("/logout", post(auth::logout))
}
