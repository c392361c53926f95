//! HTTP `Range` header arithmetic
//!
//! Only the `bytes` unit and a single range per header are supported.
//! Three forms are recognised:
//!
//! ```text
//! bytes=-500      suffix      last 500 bytes
//! bytes=1000-     open-ended  offset 1000 to the end
//! bytes=0-1023    closed      explicit inclusive interval
//! ```
//!
//! Parsing never checks the interval against the total length beyond what
//! the suffix and open-ended forms need to compute their end. The handler
//! performs that bounds check so it can answer 416 with the current size.

const BYTES_UNIT: &str = "bytes=";

/// A closed byte interval `[start, end]` within a representation of
/// `total` bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    pub start: u64,
    pub end: u64,
    pub total: u64,
}

impl ByteRange {
    /// Number of bytes covered by the interval (always at least 1)
    pub fn len(&self) -> u64 {
        self.end - self.start + 1
    }

    /// Whether both ends fall inside the representation
    pub fn is_satisfiable(&self) -> bool {
        self.start < self.total && self.end < self.total
    }

    /// `Content-Range` value for a 206 response
    pub fn content_range(&self) -> String {
        format!("bytes {}-{}/{}", self.start, self.end, self.total)
    }
}

/// `Content-Range` value for a 416 response
pub fn unsatisfied_content_range(total: u64) -> String {
    format!("bytes */{}", total)
}

/// Parse a `Range` header value against a representation of `total` bytes.
///
/// Returns `None` for anything that is not a single, well-formed `bytes`
/// range.
pub fn parse_range(header: &str, total: u64) -> Option<ByteRange> {
    let spec = header.strip_prefix(BYTES_UNIT)?;

    if spec.contains(',') {
        return None;
    }

    let (start_str, end_str) = spec.split_once('-')?;

    match (start_str.is_empty(), end_str.is_empty()) {
        // bytes=-
        (true, true) => None,
        // bytes=-500
        (true, false) => {
            let suffix = parse_offset(end_str)?;
            if suffix == 0 || total == 0 {
                return None;
            }
            Some(ByteRange {
                start: total.saturating_sub(suffix),
                end: total - 1,
                total,
            })
        }
        // bytes=1000-
        (false, true) => {
            let start = parse_offset(start_str)?;
            // No last byte exists in an empty representation
            let end = total.checked_sub(1)?;
            Some(ByteRange { start, end, total })
        }
        // bytes=0-1023
        (false, false) => {
            let start = parse_offset(start_str)?;
            let end = parse_offset(end_str)?;
            if end < start {
                return None;
            }
            Some(ByteRange { start, end, total })
        }
    }
}

/// Decimal offset without sign, whitespace or any other decoration
fn parse_offset(s: &str) -> Option<u64> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(start: u64, end: u64, total: u64) -> Option<ByteRange> {
        Some(ByteRange { start, end, total })
    }

    #[test]
    fn test_suffix_range() {
        assert_eq!(parse_range("bytes=-500", 1870), range(1370, 1869, 1870));
        assert_eq!(parse_range("bytes=-1870", 1870), range(0, 1869, 1870));
        assert_eq!(parse_range("bytes=-1", 10), range(9, 9, 10));
    }

    #[test]
    fn test_suffix_longer_than_file_clamps_to_start() {
        assert_eq!(parse_range("bytes=-5000", 1870), range(0, 1869, 1870));
    }

    #[test]
    fn test_suffix_rejects_zero_and_garbage() {
        assert_eq!(parse_range("bytes=-0", 1870), None);
        assert_eq!(parse_range("bytes=-abc", 1870), None);
        assert_eq!(parse_range("bytes=--5", 1870), None);
        assert_eq!(parse_range("bytes=-10", 0), None);
    }

    #[test]
    fn test_open_ended_range() {
        assert_eq!(parse_range("bytes=1000-", 1870), range(1000, 1869, 1870));
        assert_eq!(parse_range("bytes=0-", 1870), range(0, 1869, 1870));
    }

    #[test]
    fn test_open_ended_start_past_end_is_left_to_caller() {
        let parsed = parse_range("bytes=5000-", 1870).unwrap();
        assert_eq!(parsed.start, 5000);
        assert!(!parsed.is_satisfiable());
    }

    #[test]
    fn test_closed_range() {
        let parsed = parse_range("bytes=0-1023", 1870).unwrap();
        assert_eq!(parsed, ByteRange { start: 0, end: 1023, total: 1870 });
        assert_eq!(parsed.len(), 1024);
        assert_eq!(parsed.content_range(), "bytes 0-1023/1870");

        assert_eq!(parse_range("bytes=7-7", 10), range(7, 7, 10));
    }

    #[test]
    fn test_closed_range_inverted() {
        assert_eq!(parse_range("bytes=500-100", 1870), None);
    }

    #[test]
    fn test_closed_range_beyond_total_is_not_rejected_here() {
        let parsed = parse_range("bytes=5000-6000", 1870).unwrap();
        assert!(!parsed.is_satisfiable());

        let straddling = parse_range("bytes=1000-2000", 1870).unwrap();
        assert!(!straddling.is_satisfiable());
    }

    #[test]
    fn test_wrong_unit_or_prefix() {
        assert_eq!(parse_range("invalid-range", 1870), None);
        assert_eq!(parse_range("items=0-10", 1870), None);
        assert_eq!(parse_range("Bytes=0-10", 1870), None);
        assert_eq!(parse_range(" bytes=0-10", 1870), None);
        assert_eq!(parse_range("", 1870), None);
    }

    #[test]
    fn test_multi_range_rejected() {
        assert_eq!(parse_range("bytes=0-10,20-30", 1870), None);
        assert_eq!(parse_range("bytes=-5,0-1", 1870), None);
    }

    #[test]
    fn test_malformed_specs() {
        assert_eq!(parse_range("bytes=", 1870), None);
        assert_eq!(parse_range("bytes=-", 1870), None);
        assert_eq!(parse_range("bytes=100", 1870), None);
        assert_eq!(parse_range("bytes=a-b", 1870), None);
        assert_eq!(parse_range("bytes=+1-2", 1870), None);
        assert_eq!(parse_range("bytes=1-2-3", 1870), None);
        assert_eq!(parse_range("bytes= 1-2", 1870), None);
    }

    #[test]
    fn test_unsatisfied_content_range() {
        assert_eq!(unsatisfied_content_range(1870), "bytes */1870");
    }
}
