//! Response payload types for API handlers.
//!
//! Each endpoint returns a small named-field object (`{ face }`,
//! `{ success, stats }`, ...). Typed structs keep those shapes fixed at
//! compile time instead of ad-hoc `serde_json::json!` bodies.

use facerate_db::models::face::{Face, FaceStats, PublicFace};
use serde::Serialize;

/// `GET /api/faces` -- `face` is `null` once every face has been excluded.
#[derive(Debug, Serialize)]
pub struct RandomFaceResponse {
    pub face: Option<PublicFace>,
}

/// `POST /api/faces`
#[derive(Debug, Serialize)]
pub struct CreateFaceResponse {
    pub success: bool,
    pub face: Face,
}

/// `POST /api/faces/{id}/rate`
#[derive(Debug, Serialize)]
pub struct RateResponse {
    pub success: bool,
    pub stats: FaceStats,
}

/// `GET /api/user/face` -- both fields are `null` when the user has no face.
#[derive(Debug, Serialize)]
pub struct UserFaceResponse {
    pub face: Option<PublicFace>,
    pub stats: Option<FaceStats>,
}

/// `POST /api/uploads`
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    /// Public URL to pass to `POST /api/faces`.
    pub image_url: String,
    /// Object-store key.
    pub path: String,
}

/// Plain `{ "success": true }` acknowledgement.
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}
