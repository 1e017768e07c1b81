//! Requested result count clamping.

/// Number of results shown when the user asks for none or an invalid count.
pub const DEFAULT_LIMIT: usize = 20;

/// Upper bound on the number of results shown.
pub const MAX_LIMIT: usize = 100;

/// Resolves a requested result count.
///
/// Absent, zero or negative requests fall back to `default`; anything
/// else is capped at `max`.
#[must_use]
pub fn resolve_limit(requested: Option<i64>, default: usize, max: usize) -> usize {
    requested
        .filter(|&n| n > 0)
        .and_then(|n| usize::try_from(n).ok())
        .map_or(default, |n| n.min(max))
}

/// Parses raw user input into a requested count.
///
/// Returns `None` when the input is not an integer.
#[must_use]
pub fn parse_limit(input: &str) -> Option<i64> {
    input.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_limit_non_positive_uses_default() {
        assert_eq!(resolve_limit(Some(0), 20, 100), 20);
        assert_eq!(resolve_limit(Some(-5), 20, 100), 20);
        assert_eq!(resolve_limit(None, 20, 100), 20);
    }

    #[test]
    fn test_resolve_limit_caps_at_max() {
        assert_eq!(resolve_limit(Some(150), 20, 100), 100);
        assert_eq!(resolve_limit(Some(i64::MAX), 20, 100), 100);
    }

    #[test]
    fn test_resolve_limit_within_range() {
        assert_eq!(resolve_limit(Some(50), 20, 100), 50);
        assert_eq!(resolve_limit(Some(1), 20, 100), 1);
        assert_eq!(resolve_limit(Some(100), 20, 100), 100);
    }

    #[test]
    fn test_parse_limit() {
        assert_eq!(parse_limit(" 42 "), Some(42));
        assert_eq!(parse_limit("-5"), Some(-5));
        assert_eq!(parse_limit("ten"), None);
        assert_eq!(parse_limit(""), None);
        assert_eq!(parse_limit("2.5"), None);
    }
}
