//! Parsing of the `?exclude=` list sent with random-face requests.
//!
//! Clients keep the ids of faces they have already seen in the current
//! session and send them back so the database never hands out the same face
//! twice.

use std::collections::HashSet;

use crate::error::CoreError;
use crate::types::DbId;

/// Upper bound on the number of ids accepted in one exclusion list.
pub const MAX_EXCLUDED_IDS: usize = 500;

/// Parse a comma-separated list of face ids.
///
/// Whitespace around ids is trimmed, empty segments are skipped and
/// duplicates are dropped (first occurrence wins). A missing or blank
/// parameter yields an empty list.
pub fn parse_exclude_list(raw: Option<&str>) -> Result<Vec<DbId>, CoreError> {
    let Some(raw) = raw else {
        return Ok(Vec::new());
    };

    let mut ids: Vec<DbId> = Vec::new();
    let mut seen: HashSet<DbId> = HashSet::new();
    for segment in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let id = DbId::parse_str(segment)
            .map_err(|_| CoreError::Validation(format!("Invalid face id in exclude: '{segment}'")))?;
        if !seen.insert(id) {
            continue;
        }
        if ids.len() == MAX_EXCLUDED_IDS {
            return Err(CoreError::Validation(format!(
                "exclude may list at most {MAX_EXCLUDED_IDS} ids"
            )));
        }
        ids.push(id);
    }

    Ok(ids)
}
