//! HTTP-level integration tests for `/api/user`.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, create_face, create_user, delete, delete_auth, get, get_auth, get_with_cookie,
    give_ratings, set_cookies,
};
use facerate_db::models::rating::CreateRating;
use facerate_db::repositories::{FaceRepo, RatingRepo, UserRepo};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Authentication
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn user_endpoints_require_auth(pool: PgPool) {
    let app = common::build_test_app(pool).await;

    assert_eq!(get(app.router(), "/api/user/face").await.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        get(app.router(), "/api/user/rating-count").await.status(),
        StatusCode::UNAUTHORIZED
    );
    assert_eq!(delete(app.router(), "/api/user").await.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn session_cookie_authenticates(pool: PgPool) {
    let user = create_user(&pool, "cookie").await;
    let app = common::build_test_app(pool).await;
    let token = app.token_for(user.id);

    let response = get_with_cookie(
        app.router(),
        "/api/user/rating-count",
        &format!("theme=dark; facerate_session={token}"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
}

// ---------------------------------------------------------------------------
// GET /api/user/rating-count
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn rating_count_reports_gate_progress(pool: PgPool) {
    let user = create_user(&pool, "counter").await;
    give_ratings(&pool, user.id, 3).await;
    let app = common::build_test_app(pool.clone()).await;
    let token = app.token_for(user.id);

    let response = get_auth(app.router(), "/api/user/rating-count", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({ "count": 3, "required": 50, "unlocked": false })
    );

    give_ratings(&pool, user.id, 47).await;
    let response = get_auth(app.router(), "/api/user/rating-count", &token).await;
    assert_eq!(
        body_json(response).await,
        json!({ "count": 50, "required": 50, "unlocked": true })
    );
}

// ---------------------------------------------------------------------------
// GET /api/user/face
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn own_face_is_null_without_upload(pool: PgPool) {
    let user = create_user(&pool, "faceless").await;
    let app = common::build_test_app(pool).await;
    let token = app.token_for(user.id);

    let response = get_auth(app.router(), "/api/user/face", &token).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "face": null, "stats": null }));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn own_face_includes_stats(pool: PgPool) {
    let user = create_user(&pool, "owner").await;
    let face = create_face(&pool, "owner.png", Some(user.id)).await;
    for score in [10, 9] {
        RatingRepo::create(
            &pool,
            &CreateRating {
                face_id: face.id,
                score,
                user_id: None,
            },
        )
        .await
        .unwrap();
    }
    let app = common::build_test_app(pool).await;
    let token = app.token_for(user.id);

    let response = get_auth(app.router(), "/api/user/face", &token).await;

    let json = body_json(response).await;
    assert_eq!(json["face"]["id"], face.id.to_string());
    assert_eq!(json["stats"]["average_rating"], 9.5);
    assert_eq!(json["stats"]["total_ratings"], 2);
    assert_eq!(json["stats"]["distribution"], json!({ "9": 1, "10": 1 }));
}

// ---------------------------------------------------------------------------
// DELETE /api/user
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_account_removes_face_and_stored_image(pool: PgPool) {
    let user = create_user(&pool, "leaver").await;
    let face = create_face(&pool, "leaver.png", Some(user.id)).await;
    let app = common::build_test_app(pool.clone()).await;
    app.store_object("leaver.png").await;
    let token = app.token_for(user.id);

    let response = delete_auth(app.router(), "/api/user", &token).await;

    assert_eq!(response.status(), StatusCode::OK);
    let cookies = set_cookies(&response);
    assert!(cookies
        .iter()
        .any(|c| c.starts_with("facerate_session=;") && c.contains("Max-Age=0")));
    assert_eq!(body_json(response).await, json!({ "success": true }));

    assert!(UserRepo::find_by_id(&pool, user.id).await.unwrap().is_none());
    assert!(!FaceRepo::exists(&pool, face.id).await.unwrap());
    assert!(!app.has_object("leaver.png"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn failed_face_delete_keeps_stored_image(pool: PgPool) {
    let user = create_user(&pool, "stuck").await;
    let face = create_face(&pool, "stuck.png", Some(user.id)).await;
    let app = common::build_test_app(pool.clone()).await;
    app.store_object("stuck.png").await;
    let token = app.token_for(user.id);

    sqlx::query(
        "CREATE FUNCTION refuse_face_delete() RETURNS trigger AS $$ \
         BEGIN RAISE EXCEPTION 'faces are read-only'; END; $$ LANGUAGE plpgsql",
    )
    .execute(&pool)
    .await
    .unwrap();
    sqlx::query(
        "CREATE TRIGGER trg_refuse_face_delete BEFORE DELETE ON faces \
         FOR EACH ROW EXECUTE FUNCTION refuse_face_delete()",
    )
    .execute(&pool)
    .await
    .unwrap();

    let response = delete_auth(app.router(), "/api/user", &token).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(response).await["code"], "BACKEND_ERROR");
    assert!(FaceRepo::exists(&pool, face.id).await.unwrap());
    assert!(app.has_object("stuck.png"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_account_keeps_ratings_given(pool: PgPool) {
    let user = create_user(&pool, "generous").await;
    let other = create_face(&pool, "other.png", None).await;
    RatingRepo::create(
        &pool,
        &CreateRating {
            face_id: other.id,
            score: 6,
            user_id: Some(user.id),
        },
    )
    .await
    .unwrap();
    let app = common::build_test_app(pool.clone()).await;
    let token = app.token_for(user.id);

    let response = delete_auth(app.router(), "/api/user", &token).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(FaceRepo::stats(&pool, other.id).await.unwrap().total_ratings, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_account_without_face_succeeds(pool: PgPool) {
    let user = create_user(&pool, "plain").await;
    let app = common::build_test_app(pool.clone()).await;
    let token = app.token_for(user.id);

    let response = delete_auth(app.router(), "/api/user", &token).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(UserRepo::find_by_id(&pool, user.id).await.unwrap().is_none());
}
