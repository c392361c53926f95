//! Document identity
//!
//! A [`DocumentStat`] is a snapshot of a file's size and modification time,
//! captured fresh on every request. The ETag is derived from those two
//! values only, so revalidation costs a `stat` rather than a content hash.

use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};
use sha2::{Digest, Sha256};

use super::error::{DocumentError, Result};

/// Number of digest bytes kept in the ETag
const ETAG_DIGEST_BYTES: usize = 16;

/// Size and last-modified instant of a document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentStat {
    pub size: u64,
    pub modified: DateTime<Utc>,
}

impl DocumentStat {
    /// `Last-Modified` header value (IMF-fixdate)
    pub fn last_modified_http(&self) -> String {
        self.modified
            .format("%a, %d %b %Y %H:%M:%S GMT")
            .to_string()
    }

    /// ISO-8601 timestamp with millisecond precision, as used in JSON bodies
    pub fn last_modified_iso(&self) -> String {
        self.modified.to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

/// Capture size and modification time of a regular file.
///
/// Missing paths and anything that is not a regular file (directories
/// included) fail as [`DocumentError::NotFound`].
pub async fn stat_document(path: &Path) -> Result<DocumentStat> {
    let metadata = match tokio::fs::metadata(path).await {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(DocumentError::NotFound(path.display().to_string()));
        }
        Err(e) => return Err(e.into()),
    };

    if !metadata.is_file() {
        return Err(DocumentError::NotFound(path.display().to_string()));
    }

    let modified: DateTime<Utc> = metadata.modified()?.into();

    Ok(DocumentStat {
        size: metadata.len(),
        modified,
    })
}

/// Derive the quoted ETag for a stat snapshot.
///
/// The digest input is `"<size>-<mtime millis>"`; two byte-identical files
/// with different modification times get different ETags.
pub fn compute_etag(stat: &DocumentStat) -> String {
    let input = format!("{}-{}", stat.size, stat.modified.timestamp_millis());
    let digest = Sha256::digest(input.as_bytes());
    format!("\"{}\"", hex::encode(&digest[..ETAG_DIGEST_BYTES]))
}
