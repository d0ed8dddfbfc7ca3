#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE, COOKIE};
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tempfile::TempDir;
use tower::ServiceExt;

use facerate_api::auth::jwt::{generate_access_token, JwtConfig};
use facerate_api::config::ServerConfig;
use facerate_api::identity::{Identity, IdentityError, IdentityProvider, OAuthConfig};
use facerate_api::router::build_app_router;
use facerate_api::state::AppState;
use facerate_api::storage::local::LocalObjectStore;
use facerate_api::storage::{ObjectStore, StorageBackend, StorageConfig};
use facerate_core::types::DbId;
use facerate_db::models::face::{CreateFace, Face};
use facerate_db::models::rating::CreateRating;
use facerate_db::models::user::{UpsertUser, User};
use facerate_db::repositories::{FaceRepo, RatingRepo, UserRepo};

pub const PUBLIC_BASE_URL: &str = "http://localhost:3000/uploads";
pub const APP_ORIGIN: &str = "http://localhost:5173";

/// Smallest byte sequence the image sniffer recognises as PNG.
pub const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR\0\0\0\x01\0\0\0\x01\x08\x06\0\0\0";

/// Build a test `ServerConfig` with safe defaults.
///
/// Images go to a local store under `upload_dir`; the upload gate keeps its
/// production threshold of 50.
pub fn test_config(upload_dir: &std::path::Path) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec![APP_ORIGIN.to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        app_origin: APP_ORIGIN.to_string(),
        upload_rating_threshold: facerate_core::gate::REQUIRED_RATINGS,
        jwt: JwtConfig {
            secret: "test-secret-for-integration-tests".to_string(),
            expiry_mins: 60,
        },
        storage: StorageConfig {
            backend: StorageBackend::Local {
                dir: upload_dir.to_path_buf(),
            },
            public_base_url: PUBLIC_BASE_URL.to_string(),
        },
        oauth: OAuthConfig {
            client_id: "test-client".to_string(),
            client_secret: "test-secret".to_string(),
            authorize_url: "https://id.test/authorize".to_string(),
            token_url: "https://id.test/token".to_string(),
            userinfo_url: "https://id.test/userinfo".to_string(),
            redirect_url: "http://localhost:3000/auth/callback".to_string(),
            scopes: vec!["openid".to_string(), "email".to_string()],
        },
    }
}

// ---------------------------------------------------------------------------
// Identity provider double
// ---------------------------------------------------------------------------

/// Identity provider that accepts codes of the form `ok:<subject>` and
/// rejects everything else.
pub struct FakeIdentityProvider;

#[async_trait]
impl IdentityProvider for FakeIdentityProvider {
    fn authorize_url(&self, state: &str, next: Option<&str>) -> String {
        format!(
            "https://id.test/authorize?state={state}&next={}",
            next.unwrap_or("/")
        )
    }

    async fn exchange_code(&self, code: &str, _next: Option<&str>) -> Result<Identity, IdentityError> {
        match code.strip_prefix("ok:") {
            Some(subject) => Ok(Identity {
                subject: subject.to_string(),
                email: Some(format!("{subject}@test.com")),
            }),
            None => Err(IdentityError::Rejected(format!("unknown code '{code}'"))),
        }
    }
}

// ---------------------------------------------------------------------------
// App construction
// ---------------------------------------------------------------------------

/// A router wired to a throwaway upload directory.
pub struct TestApp {
    pub router: Router,
    pub config: ServerConfig,
    pub store: Arc<LocalObjectStore>,
    _upload_dir: TempDir,
}

impl TestApp {
    /// A fresh handle for `oneshot`, which consumes the router.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Session token for `user_id`, signed with the test secret.
    pub fn token_for(&self, user_id: DbId) -> String {
        generate_access_token(user_id, &self.config.jwt).expect("token generation should succeed")
    }

    /// Put a small PNG into the store under `key`.
    pub async fn store_object(&self, key: &str) {
        self.store
            .put(key, PNG_BYTES.to_vec(), "image/png")
            .await
            .expect("object put should succeed");
    }

    /// Whether the store holds an object under `key`.
    pub fn has_object(&self, key: &str) -> bool {
        self.store.root().join(key).exists()
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
///
/// Goes through [`build_app_router`], so integration tests exercise the same
/// middleware stack (CORS, request ID, timeout, tracing, panic recovery) that
/// production uses.
pub async fn build_test_app(pool: PgPool) -> TestApp {
    let upload_dir = TempDir::new().expect("temp dir");
    let config = test_config(upload_dir.path());

    let store = Arc::new(
        LocalObjectStore::create(upload_dir.path().to_path_buf(), PUBLIC_BASE_URL)
            .await
            .expect("local store"),
    );

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        store: Arc::clone(&store) as Arc<dyn ObjectStore>,
        identity: Arc::new(FakeIdentityProvider),
    };

    TestApp {
        router: build_app_router(state, &config),
        config,
        store,
        _upload_dir: upload_dir,
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub async fn create_user(pool: &PgPool, subject: &str) -> User {
    UserRepo::upsert_by_subject(
        pool,
        &UpsertUser {
            provider_subject: subject.to_string(),
            email: Some(format!("{subject}@test.com")),
        },
    )
    .await
    .expect("user upsert should succeed")
}

pub async fn create_face(pool: &PgPool, key: &str, user_id: Option<DbId>) -> Face {
    FaceRepo::create(
        pool,
        &CreateFace {
            image_url: format!("{PUBLIC_BASE_URL}/{key}"),
            user_id,
        },
    )
    .await
    .expect("face creation should succeed")
}

/// Record `count` ratings by `user_id` against an anonymous face.
pub async fn give_ratings(pool: &PgPool, user_id: DbId, count: usize) {
    let face = create_face(pool, &format!("seed-{}.png", uuid::Uuid::new_v4()), None).await;
    for _ in 0..count {
        RatingRepo::create(
            pool,
            &CreateRating {
                face_id: face.id,
                score: 5,
                user_id: Some(user_id),
            },
        )
        .await
        .expect("rating creation should succeed");
    }
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.expect("router is infallible")
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

/// GET with a raw `Cookie` header.
pub async fn get_with_cookie(app: Router, uri: &str, cookie: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(uri)
        .header(COOKIE, cookie)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

/// POST a raw body, with a `Content-Type` header only when one is given.
pub async fn post_raw(
    app: Router,
    uri: &str,
    content_type: Option<&str>,
    body: &str,
) -> Response<Body> {
    let mut builder = Request::builder().method(Method::POST).uri(uri);
    if let Some(content_type) = content_type {
        builder = builder.header(CONTENT_TYPE, content_type);
    }
    let request = builder.body(Body::from(body.to_string())).unwrap();
    send(app, request).await
}

pub async fn post_empty(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

const BOUNDARY: &str = "facerate-test-boundary";

/// POST a single-part multipart body.
pub async fn post_multipart_auth(
    app: Router,
    uri: &str,
    field: &str,
    content_type: &str,
    bytes: &[u8],
    token: &str,
) -> Response<Body> {
    let mut body = format!(
        "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"face\"\r\nContent-Type: {content_type}\r\n\r\n"
    )
    .into_bytes();
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, format!("multipart/form-data; boundary={BOUNDARY}"))
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(body))
        .unwrap();
    send(app, request).await
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be JSON")
}

/// All `Set-Cookie` header values of a response.
pub fn set_cookies(response: &Response<Body>) -> Vec<String> {
    response
        .headers()
        .get_all(axum::http::header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok().map(str::to_string))
        .collect()
}

pub fn location(response: &Response<Body>) -> String {
    response
        .headers()
        .get(axum::http::header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}
