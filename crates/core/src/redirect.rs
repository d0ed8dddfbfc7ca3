//! Post sign-in redirect target handling.

/// Where users land after sign-in when no usable `next` was given.
pub const DEFAULT_NEXT: &str = "/";

/// Reduce a client-supplied `next` parameter to a same-origin path.
///
/// Only paths starting with a single `/` are kept. Protocol-relative URLs
/// (`//host`), absolute URLs, backslashes and control characters all fall
/// back to [`DEFAULT_NEXT`].
pub fn sanitize_next(next: Option<&str>) -> String {
    match next {
        Some(path)
            if path.starts_with('/')
                && !path.starts_with("//")
                && !path.contains('\\')
                && !path.chars().any(char::is_control) =>
        {
            path.to_string()
        }
        _ => DEFAULT_NEXT.to_string(),
    }
}
