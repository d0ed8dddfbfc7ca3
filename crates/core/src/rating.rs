//! Score bounds and validation for face ratings.

use serde_json::Value;

use crate::error::CoreError;

/// Lowest score a rater may submit.
pub const MIN_SCORE: i16 = 1;

/// Highest score a rater may submit.
pub const MAX_SCORE: i16 = 10;

const SCORE_ERROR: &str = "Score must be an integer between 1 and 10";

/// Validate a raw JSON `score` value from a rating request.
///
/// Accepts JSON numbers with no fractional part (`7` and `7.0` are both
/// fine) in `MIN_SCORE..=MAX_SCORE`. Strings, booleans, `null`, fractions and
/// out-of-range numbers are rejected.
pub fn validate_score(raw: &Value) -> Result<i16, CoreError> {
    let Value::Number(number) = raw else {
        return Err(CoreError::Validation(SCORE_ERROR.into()));
    };

    let integral = if let Some(i) = number.as_i64() {
        Some(i)
    } else {
        number
            .as_f64()
            .filter(|f| f.is_finite() && f.fract() == 0.0)
            .map(|f| f as i64)
    };

    match integral {
        Some(score) if (i64::from(MIN_SCORE)..=i64::from(MAX_SCORE)).contains(&score) => {
            Ok(score as i16)
        }
        _ => Err(CoreError::Validation(SCORE_ERROR.into())),
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;

    use super::*;

    #[test]
    fn accepts_bounds_and_middle() {
        assert_eq!(validate_score(&json!(1)).unwrap(), 1);
        assert_eq!(validate_score(&json!(5)).unwrap(), 5);
        assert_eq!(validate_score(&json!(10)).unwrap(), 10);
    }

    #[test]
    fn accepts_integral_float() {
        assert_eq!(validate_score(&json!(7.0)).unwrap(), 7);
    }

    #[test]
    fn rejects_out_of_range() {
        for raw in [json!(0), json!(11), json!(-3), json!(1_000_000)] {
            assert_matches!(validate_score(&raw), Err(CoreError::Validation(_)));
        }
    }

    #[test]
    fn rejects_fractions() {
        assert_matches!(validate_score(&json!(5.5)), Err(CoreError::Validation(_)));
        assert_matches!(validate_score(&json!(9.99)), Err(CoreError::Validation(_)));
    }

    #[test]
    fn rejects_non_numbers() {
        for raw in [json!("5"), json!(null), json!(true), json!([5]), json!({"score": 5})] {
            assert_matches!(validate_score(&raw), Err(CoreError::Validation(msg)) => {
                assert_eq!(msg, "Score must be an integer between 1 and 10");
            });
        }
    }
}
