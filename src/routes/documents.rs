//! Document API endpoints
//!
//! - `GET /api/documents/:id/metadata`: page count, size and validators
//! - `GET|HEAD /api/documents/:id/range`: whole file or a single byte range
//!
//! Both endpoints re-read file metadata on every request and derive the
//! ETag from size and modification time. A request without `Range` gets the
//! full body with `Accept-Ranges: bytes` so viewers learn they may switch to
//! ranged fetches. A `Range` that is present but unusable is answered with
//! 416 rather than silently serving the whole file.

use std::io::SeekFrom;
use std::path::Path as FsPath;

use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, HeaderMap, HeaderName, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tokio::io::{AsyncReadExt, AsyncSeekExt};

use crate::document::{DocumentError, ResolvedDocument};
use crate::error::{AppError, Operation, Result};
use crate::http::{
    evaluate_if_range, not_modified, parse_range, ByteRange, IfRangeOutcome,
    CACHE_CONTROL_PUBLIC_HOUR,
};
use crate::state::AppState;

const PDF_CONTENT_TYPE: &str = "application/pdf";

/// Document metadata response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentMetadataResponse {
    pub id: String,
    pub filename: String,
    pub page_count: u32,
    pub file_size: u64,
    /// ISO-8601 with millisecond precision
    pub last_modified: String,
    pub etag: String,
}

/// Create the documents router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/:id/metadata", get(get_metadata))
        .route("/:id/range", get(get_range))
}

/// Get page count and revalidation data for a document
async fn get_metadata(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Response> {
    let doc = state
        .store()
        .open(&id)
        .await
        .map_err(|e| AppError::from_document(e, Operation::Metadata))?;

    let page_count = state
        .page_counter()
        .page_count(&doc.path, doc.stat.size)
        .await?;

    let if_none_match = header_str(&headers, &header::IF_NONE_MATCH);
    if not_modified(if_none_match, &doc.etag) {
        tracing::debug!("Metadata for '{}' not modified", id);
        return Ok((
            StatusCode::NOT_MODIFIED,
            [
                (header::ETAG, doc.etag.clone()),
                (header::CACHE_CONTROL, CACHE_CONTROL_PUBLIC_HOUR.to_string()),
            ],
        )
            .into_response());
    }

    tracing::debug!(
        "Metadata for '{}': {} pages, {} bytes",
        id,
        page_count,
        doc.stat.size
    );

    let body = DocumentMetadataResponse {
        id: doc.id.clone(),
        filename: doc.filename().to_string(),
        page_count,
        file_size: doc.stat.size,
        last_modified: doc.stat.last_modified_iso(),
        etag: doc.etag.clone(),
    };

    Ok((
        StatusCode::OK,
        [
            (header::ETAG, doc.etag),
            (header::CACHE_CONTROL, CACHE_CONTROL_PUBLIC_HOUR.to_string()),
        ],
        Json(body),
    )
        .into_response())
}

/// Serve the whole document or a single byte range of it
///
/// HEAD answers with the same headers but never reads file contents.
async fn get_range(
    State(state): State<AppState>,
    Path(id): Path<String>,
    method: Method,
    headers: HeaderMap,
) -> Result<Response> {
    let doc = state
        .store()
        .open(&id)
        .await
        .map_err(|e| AppError::from_document(e, Operation::Range))?;
    let total = doc.stat.size;

    let head_only = method == Method::HEAD;

    let Some(range_header) = headers.get(header::RANGE) else {
        if head_only {
            return build_response(&doc, StatusCode::OK, None, total, Body::empty());
        }
        let data = tokio::fs::read(&doc.path)
            .await
            .map_err(|e| AppError::from_document(e.into(), Operation::Range))?;
        tracing::debug!("Serving full document '{}' ({} bytes)", id, data.len());
        let len = data.len() as u64;
        return build_response(&doc, StatusCode::OK, None, len, Body::from(data));
    };

    let range = range_header
        .to_str()
        .ok()
        .and_then(|value| parse_range(value, total))
        .filter(ByteRange::is_satisfiable)
        .ok_or(AppError::RangeUnsatisfiable { total })?;

    let if_range = header_str(&headers, &header::IF_RANGE);
    if evaluate_if_range(if_range, &doc.etag) == IfRangeOutcome::Stale {
        tracing::debug!("If-Range validator for '{}' is stale", id);
        return Err(AppError::RangeUnsatisfiable { total });
    }

    if head_only {
        return build_response(
            &doc,
            StatusCode::PARTIAL_CONTENT,
            Some(&range),
            range.len(),
            Body::empty(),
        );
    }

    let data = read_range(&doc.path, &range)
        .await
        .map_err(|e| AppError::from_document(e, Operation::Range))?;
    tracing::debug!("Serving '{}' {}", id, range.content_range());

    build_response(
        &doc,
        StatusCode::PARTIAL_CONTENT,
        Some(&range),
        range.len(),
        Body::from(data),
    )
}

fn build_response(
    doc: &ResolvedDocument,
    status: StatusCode,
    range: Option<&ByteRange>,
    content_length: u64,
    body: Body,
) -> Result<Response> {
    let mut builder = Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, PDF_CONTENT_TYPE)
        .header(header::CONTENT_LENGTH, content_length)
        .header(header::ACCEPT_RANGES, "bytes")
        .header(header::ETAG, doc.etag.as_str())
        .header(header::LAST_MODIFIED, doc.stat.last_modified_http())
        .header(header::CACHE_CONTROL, CACHE_CONTROL_PUBLIC_HOUR);

    if let Some(range) = range {
        builder = builder.header(header::CONTENT_RANGE, range.content_range());
    }

    builder.body(body).map_err(|e| AppError::Internal {
        operation: Operation::Range,
        message: e.to_string(),
    })
}

/// Read exactly `range.len()` bytes starting at `range.start`
async fn read_range(path: &FsPath, range: &ByteRange) -> std::result::Result<Vec<u8>, DocumentError> {
    let mut file = tokio::fs::File::open(path).await?;
    file.seek(SeekFrom::Start(range.start)).await?;

    let mut buffer = vec![0u8; range.len() as usize];
    file.read_exact(&mut buffer).await?;
    Ok(buffer)
}

fn header_str<'a>(headers: &'a HeaderMap, name: &HeaderName) -> Option<&'a str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_read_range_exact_bytes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("doc.pdf");
        let data: Vec<u8> = (0..=255u8).cycle().take(1870).collect();
        std::fs::write(&path, &data).unwrap();

        let range = ByteRange { start: 1000, end: 1869, total: 1870 };
        let read = read_range(&path, &range).await.unwrap();
        assert_eq!(read.len(), 870);
        assert_eq!(read, &data[1000..]);
    }

    #[tokio::test]
    async fn test_read_range_past_eof_is_io_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("doc.pdf");
        std::fs::write(&path, b"short").unwrap();

        // File shrank after the range was validated
        let range = ByteRange { start: 0, end: 99, total: 100 };
        let result = read_range(&path, &range).await;
        assert!(matches!(result, Err(DocumentError::Io(_))));
    }
}
