//! Two-tier page counting
//!
//! Small files are always fully parsed. For large files the resolver first
//! reads only the last few kilobytes and looks for the page-tree root
//! (`/Type /Pages`) with its `/Count`. Well-formed writers usually emit that
//! object near the end of the file, so this avoids loading tens of
//! megabytes for a single integer. Anything other than a plausible count
//! falls through to the full parse, which is the only path allowed to fail.

use std::io::SeekFrom;
use std::path::Path;
use std::sync::{Arc, LazyLock};
use std::time::Duration;

use regex::bytes::Regex;
use thiserror::Error;
use tokio::io::{AsyncReadExt, AsyncSeekExt};

use crate::document::{DocumentError, Result};

use super::parser::{FullDocumentParser, LopdfParser};

/// Files above this size try the trailer heuristic first (5 MiB)
pub const DEFAULT_LARGE_FILE_THRESHOLD: u64 = 5 * 1024 * 1024;
/// Bytes read from the end of the file for the heuristic (8 KiB)
pub const DEFAULT_TRAILER_READ_SIZE: u64 = 8 * 1024;
/// Exclusive upper bound on a believable heuristic count
pub const DEFAULT_MAX_PAGE_COUNT: u32 = 100_000;
/// Upper bound on the full parse
pub const DEFAULT_FULL_PARSE_TIMEOUT_SECS: u64 = 30;

static PAGES_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/Type\s*/Pages").expect("valid page-tree regex"));
static COUNT_FIELD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/Count\s+(\d+)").expect("valid count regex"));

/// Page-count resolver settings
#[derive(Debug, Clone)]
pub struct PageCountConfig {
    pub large_file_threshold: u64,
    pub trailer_read_size: u64,
    pub max_page_count: u32,
    pub full_parse_timeout: Duration,
}

impl Default for PageCountConfig {
    fn default() -> Self {
        Self {
            large_file_threshold: DEFAULT_LARGE_FILE_THRESHOLD,
            trailer_read_size: DEFAULT_TRAILER_READ_SIZE,
            max_page_count: DEFAULT_MAX_PAGE_COUNT,
            full_parse_timeout: Duration::from_secs(DEFAULT_FULL_PARSE_TIMEOUT_SECS),
        }
    }
}

/// Result of the trailer heuristic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrailerScan {
    Found(u32),
    Inconclusive,
}

/// No page count could be obtained, even from the full parse
#[derive(Debug, Error)]
#[error("Unable to extract page count from PDF: {filename}")]
pub struct ExtractionFailed {
    pub filename: String,
    #[source]
    pub source: DocumentError,
}

/// Chooses between the trailer heuristic and a full parse per document
#[derive(Clone)]
pub struct PageCountResolver {
    config: PageCountConfig,
    parser: Arc<dyn FullDocumentParser>,
}

impl PageCountResolver {
    pub fn new(config: PageCountConfig, parser: Arc<dyn FullDocumentParser>) -> Self {
        Self { config, parser }
    }

    /// Resolver using the lopdf-backed full parser
    pub fn with_default_parser(config: PageCountConfig) -> Self {
        Self::new(config, Arc::new(LopdfParser))
    }

    /// Page count of the document at `path`, whose size is `size` bytes
    pub async fn page_count(&self, path: &Path, size: u64) -> std::result::Result<u32, ExtractionFailed> {
        if size > self.config.large_file_threshold {
            match scan_trailer(path, size, &self.config).await {
                TrailerScan::Found(count) => {
                    tracing::debug!("Trailer heuristic found {} pages in {}", count, path.display());
                    return Ok(count);
                }
                TrailerScan::Inconclusive => {
                    tracing::debug!(
                        "Trailer heuristic inconclusive for {}, falling back to full parse",
                        path.display()
                    );
                }
            }
        }

        self.parse_full(path).await.map_err(|source| {
            let filename = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            tracing::error!("PDF parsing failed for {}: {}", filename, source);
            ExtractionFailed { filename, source }
        })
    }

    async fn parse_full(&self, path: &Path) -> Result<u32> {
        let data = tokio::fs::read(path).await?;
        let parser = Arc::clone(&self.parser);
        let timeout = self.config.full_parse_timeout;

        let task = tokio::task::spawn_blocking(move || parser.page_count(&data));

        match tokio::time::timeout(timeout, task).await {
            Ok(Ok(result)) => result,
            Ok(Err(join_error)) => Err(DocumentError::Task(join_error.to_string())),
            Err(_) => Err(DocumentError::Timeout(timeout)),
        }
    }
}

/// Read the tail of the file and look for the page-tree count.
///
/// Every failure (I/O, missing marker, implausible value) is inconclusive.
pub async fn scan_trailer(path: &Path, size: u64, config: &PageCountConfig) -> TrailerScan {
    match read_tail(path, size, config.trailer_read_size).await {
        Ok(tail) => match find_page_count(&tail, config.max_page_count) {
            Some(count) => TrailerScan::Found(count),
            None => TrailerScan::Inconclusive,
        },
        Err(e) => {
            tracing::debug!("Trailer read failed for {}: {}", path.display(), e);
            TrailerScan::Inconclusive
        }
    }
}

async fn read_tail(path: &Path, size: u64, read_size: u64) -> std::io::Result<Vec<u8>> {
    let len = read_size.min(size);
    let mut file = tokio::fs::File::open(path).await?;
    file.seek(SeekFrom::Start(size - len)).await?;

    let mut buffer = vec![0u8; len as usize];
    file.read_exact(&mut buffer).await?;
    Ok(buffer)
}

/// First `/Count` following the first `/Type /Pages` marker, if it lies in
/// `(0, max_page_count)`.
pub fn find_page_count(tail: &[u8], max_page_count: u32) -> Option<u32> {
    let marker = PAGES_MARKER.find(tail)?;
    let captures = COUNT_FIELD.captures(&tail[marker.start()..])?;
    let digits = std::str::from_utf8(captures.get(1)?.as_bytes()).ok()?;
    let count: u64 = digits.parse().ok()?;

    if count > 0 && count < u64::from(max_page_count) {
        u32::try_from(count).ok()
    } else {
        None
    }
}
