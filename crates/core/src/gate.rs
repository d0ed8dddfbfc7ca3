//! Rating-count gate that unlocks photo uploads.
//!
//! A user must rate other people's faces before they can put their own up
//! for rating. The threshold is configurable; [`REQUIRED_RATINGS`] is the
//! production default.

use serde::Serialize;

/// Default number of ratings a user must submit before uploading.
pub const REQUIRED_RATINGS: i64 = 50;

/// Upload unlock rule for a given threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadGate {
    pub required: i64,
}

impl Default for UploadGate {
    fn default() -> Self {
        Self {
            required: REQUIRED_RATINGS,
        }
    }
}

/// Snapshot of a user's progress toward the gate, serialized as-is by the
/// rating-count endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GateStatus {
    pub count: i64,
    pub required: i64,
    pub unlocked: bool,
}

impl UploadGate {
    pub fn new(required: i64) -> Self {
        Self {
            required: required.max(0),
        }
    }

    /// Uploads are allowed once `count` reaches the threshold.
    pub fn is_unlocked(&self, count: i64) -> bool {
        count >= self.required
    }

    /// Ratings still needed before uploads unlock (0 once unlocked).
    pub fn remaining(&self, count: i64) -> i64 {
        (self.required - count).max(0)
    }

    pub fn status(&self, count: i64) -> GateStatus {
        GateStatus {
            count,
            required: self.required,
            unlocked: self.is_unlocked(count),
        }
    }
}
