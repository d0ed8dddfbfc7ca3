//! Handlers for the browser sign-in flow (`/auth`).
//!
//! `/auth/login` starts an OAuth2 authorization-code flow, `/auth/callback`
//! finishes it and sets the session cookie, `/auth/logout` clears it.

use axum::extract::{Query, State};
use axum::http::header::SET_COOKIE;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{AppendHeaders, IntoResponse, Redirect, Response};
use facerate_core::redirect::{sanitize_next, DEFAULT_NEXT};
use facerate_db::models::user::UpsertUser;
use facerate_db::repositories::UserRepo;
use uuid::Uuid;

use crate::auth::jwt::generate_access_token;
use crate::auth::session::{
    build_cookie, clear_cookie, read_cookie, OAUTH_STATE_COOKIE, OAUTH_STATE_MAX_AGE_SECS,
    SESSION_COOKIE,
};
use crate::error::{AppError, AppResult};
use crate::query::{CallbackParams, LoginParams};
use crate::state::AppState;

/// GET /auth/login?next=/path
///
/// Redirect the browser to the identity provider. A random `state` nonce is
/// stored in a short-lived cookie and checked again on the callback.
pub async fn login(State(state): State<AppState>, Query(params): Query<LoginParams>) -> Response {
    let next = sanitize_next(params.next.as_deref());
    let nonce = Uuid::new_v4().to_string();

    let location = state.identity.authorize_url(&nonce, Some(next.as_str()));
    let cookie = build_cookie(
        OAUTH_STATE_COOKIE,
        &nonce,
        OAUTH_STATE_MAX_AGE_SECS,
        state.config.secure_cookies(),
    );

    (
        AppendHeaders([(SET_COOKIE, cookie)]),
        Redirect::temporary(&location),
    )
        .into_response()
}

/// GET /auth/callback?code=..&state=..&next=..
///
/// Finish sign-in: exchange the code, upsert the user, issue a session token
/// and land on `next`. Every failure lands on `/?auth_error=true` instead of
/// an error body, since the caller is a browser mid-redirect.
pub async fn callback(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<CallbackParams>,
) -> Response {
    let secure = state.config.secure_cookies();
    let origin = &state.config.app_origin;
    let next = sanitize_next(params.next.as_deref());

    match complete_sign_in(&state, &headers, &params, &next).await {
        Ok(token) => {
            let session = build_cookie(
                SESSION_COOKIE,
                &token,
                state.config.jwt.expiry_secs(),
                secure,
            );
            (
                AppendHeaders([
                    (SET_COOKIE, session),
                    (SET_COOKIE, clear_cookie(OAUTH_STATE_COOKIE, secure)),
                ]),
                Redirect::to(&format!("{origin}{next}")),
            )
                .into_response()
        }
        Err(e) => {
            tracing::warn!(error = %e, "Sign-in failed");
            (
                AppendHeaders([(SET_COOKIE, clear_cookie(OAUTH_STATE_COOKIE, secure))]),
                Redirect::to(&format!("{origin}{DEFAULT_NEXT}?auth_error=true")),
            )
                .into_response()
        }
    }
}

/// POST /auth/logout
///
/// Clear the session cookie. Tokens are stateless, so nothing is revoked
/// server-side.
pub async fn logout(State(state): State<AppState>) -> impl IntoResponse {
    let secure = state.config.secure_cookies();
    (
        StatusCode::NO_CONTENT,
        AppendHeaders([(SET_COOKIE, clear_cookie(SESSION_COOKIE, secure))]),
    )
}

/// Run the fallible part of the callback and return the session token.
async fn complete_sign_in(
    state: &AppState,
    headers: &HeaderMap,
    params: &CallbackParams,
    next: &str,
) -> AppResult<String> {
    let code = params
        .code
        .as_deref()
        .filter(|c| !c.is_empty())
        .ok_or_else(|| AppError::BadRequest("Missing authorization code".into()))?;

    // Once login has issued a state cookie, the callback must echo it back.
    if let Some(expected) = read_cookie(headers, OAUTH_STATE_COOKIE) {
        if params.state.as_deref() != Some(expected) {
            return Err(AppError::BadRequest("OAuth state mismatch".into()));
        }
    }

    let identity = state.identity.exchange_code(code, Some(next)).await?;

    let user = UserRepo::upsert_by_subject(
        &state.pool,
        &UpsertUser {
            provider_subject: identity.subject,
            email: identity.email,
        },
    )
    .await?;

    let token = generate_access_token(user.id, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation failed: {e}")))?;

    tracing::info!(user_id = %user.id, "User signed in");

    Ok(token)
}
