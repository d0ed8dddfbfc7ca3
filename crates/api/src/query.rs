//! Query parameter and request body types shared by handler modules.

use serde::Deserialize;
use serde_json::Value;

/// `GET /api/faces?exclude=id1,id2`
#[derive(Debug, Deserialize)]
pub struct ExcludeParams {
    pub exclude: Option<String>,
}

/// `GET /auth/login?next=/profile`
#[derive(Debug, Deserialize)]
pub struct LoginParams {
    pub next: Option<String>,
}

/// `GET /auth/callback?code=..&state=..&next=..`
#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub state: Option<String>,
    pub next: Option<String>,
}

/// Body of `POST /api/faces`.
///
/// Built from the raw JSON value so a missing or non-string `image_url` is
/// reported as a validation error rather than a deserialization rejection.
/// A body that is not a JSON object carries no fields.
#[derive(Debug)]
pub struct CreateFaceRequest {
    pub image_url: Value,
}

impl From<Value> for CreateFaceRequest {
    fn from(body: Value) -> Self {
        Self {
            image_url: take_field(body, "image_url"),
        }
    }
}

/// Body of `POST /api/faces/{id}/rate`. Raw for the same reason as above.
#[derive(Debug)]
pub struct RateRequest {
    pub score: Value,
}

impl From<Value> for RateRequest {
    fn from(body: Value) -> Self {
        Self {
            score: take_field(body, "score"),
        }
    }
}

/// Field `name` of an object body, or `null` when absent or not an object.
fn take_field(mut body: Value, name: &str) -> Value {
    body.get_mut(name).map(Value::take).unwrap_or(Value::Null)
}
