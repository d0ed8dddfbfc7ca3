//! Face entity model, DTOs and the aggregate rating statistics.

use std::collections::BTreeMap;

use facerate_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `faces` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Face {
    pub id: DbId,
    pub image_url: String,
    pub user_id: Option<DbId>,
    pub created_at: Timestamp,
}

/// Face as shown to raters and to its owner: the owning user is never exposed.
#[derive(Debug, Clone, FromRow, Serialize, PartialEq)]
pub struct PublicFace {
    pub id: DbId,
    pub image_url: String,
    pub created_at: Timestamp,
}

impl From<Face> for PublicFace {
    fn from(face: Face) -> Self {
        Self {
            id: face.id,
            image_url: face.image_url,
            created_at: face.created_at,
        }
    }
}

/// DTO for creating a new face.
#[derive(Debug, Clone)]
pub struct CreateFace {
    pub image_url: String,
    pub user_id: Option<DbId>,
}

/// Aggregate ratings for one face, as returned by `get_face_stats`.
///
/// `distribution` maps a score (`"1"`..`"10"`) to the number of ratings with
/// that score; scores nobody gave are absent.
#[derive(Debug, Clone, Default, FromRow, Serialize, PartialEq)]
pub struct FaceStats {
    pub average_rating: f64,
    pub total_ratings: i64,
    #[sqlx(json)]
    pub distribution: BTreeMap<String, i64>,
}
