//! HTTP semantics independent of the web framework
//!
//! - `range`: `Range` header parsing and `Content-Range` formatting
//! - `conditional`: `If-None-Match` / `If-Range` evaluation

pub mod conditional;
pub mod range;

pub use conditional::{evaluate_if_range, not_modified, IfRangeOutcome};
pub use range::{parse_range, unsatisfied_content_range, ByteRange};

/// `Cache-Control` sent with every successful document response
pub const CACHE_CONTROL_PUBLIC_HOUR: &str = "public, max-age=3600";
