//! PDF page counting
//!
//! - `page_count`: trailer heuristic with full-parse fallback
//! - `parser`: the full-document parser seam and its lopdf implementation

mod page_count;
mod parser;

pub use page_count::{
    find_page_count, scan_trailer, ExtractionFailed, PageCountConfig, PageCountResolver,
    TrailerScan, DEFAULT_FULL_PARSE_TIMEOUT_SECS, DEFAULT_LARGE_FILE_THRESHOLD,
    DEFAULT_MAX_PAGE_COUNT, DEFAULT_TRAILER_READ_SIZE,
};
pub use parser::{fixtures, FullDocumentParser, LopdfParser};
