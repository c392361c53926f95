//! Conditional request evaluation
//!
//! Plain string comparisons over validator tokens, kept apart from axum
//! request types. Comparison is byte-for-byte: no weak matching and no
//! `If-None-Match` lists.

/// Outcome of evaluating `If-Range` against the current representation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IfRangeOutcome {
    /// No `If-Range` was sent
    Absent,
    /// The client's validator is still current
    Fresh,
    /// The representation changed since the client cached its ranges
    Stale,
}

/// `true` when the client already holds the current representation
pub fn not_modified(if_none_match: Option<&str>, etag: &str) -> bool {
    if_none_match.is_some_and(|token| token == etag)
}

/// Compare an `If-Range` validator with the current ETag
pub fn evaluate_if_range(if_range: Option<&str>, etag: &str) -> IfRangeOutcome {
    match if_range {
        None => IfRangeOutcome::Absent,
        Some(token) if token == etag => IfRangeOutcome::Fresh,
        Some(_) => IfRangeOutcome::Stale,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ETAG: &str = "\"0123456789abcdef\"";

    #[test]
    fn test_not_modified_exact_match() {
        assert!(not_modified(Some(ETAG), ETAG));
    }

    #[test]
    fn test_not_modified_requires_exact_bytes() {
        assert!(!not_modified(None, ETAG));
        assert!(!not_modified(Some("0123456789abcdef"), ETAG));
        assert!(!not_modified(Some("W/\"0123456789abcdef\""), ETAG));
        assert!(!not_modified(Some("\"other\", \"0123456789abcdef\""), ETAG));
        assert!(!not_modified(Some("*"), ETAG));
    }

    #[test]
    fn test_if_range() {
        assert_eq!(evaluate_if_range(None, ETAG), IfRangeOutcome::Absent);
        assert_eq!(evaluate_if_range(Some(ETAG), ETAG), IfRangeOutcome::Fresh);
        assert_eq!(
            evaluate_if_range(Some("\"deadbeef\""), ETAG),
            IfRangeOutcome::Stale
        );
        // HTTP-date validators never match an ETag
        assert_eq!(
            evaluate_if_range(Some("Wed, 21 Oct 2015 07:28:00 GMT"), ETAG),
            IfRangeOutcome::Stale
        );
    }
}
