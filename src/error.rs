//! Error types for the Folio server
//!
//! Lower layers report generic [`DocumentError`]s; handlers classify them
//! into [`AppError`], which owns the status code and the JSON body.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::document::DocumentError;
use crate::http::unsatisfied_content_range;
use crate::pdf::ExtractionFailed;

/// Application-wide result type
pub type Result<T> = std::result::Result<T, AppError>;

/// Which endpoint produced an internal failure; selects the public message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Metadata,
    Range,
}

/// Application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Document not found: {0}")]
    NotFound(String),

    #[error("Range not satisfiable for representation of {total} bytes")]
    RangeUnsatisfiable { total: u64 },

    #[error(transparent)]
    ExtractionFailed(#[from] ExtractionFailed),

    #[error("Internal error: {message}")]
    Internal {
        operation: Operation,
        message: String,
    },
}

impl AppError {
    /// Classify a low-level document failure for the given endpoint
    pub fn from_document(err: DocumentError, operation: Operation) -> Self {
        match err {
            DocumentError::NotFound(id) => AppError::NotFound(id),
            other => AppError::Internal {
                operation,
                message: other.to_string(),
            },
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::RangeUnsatisfiable { .. } => StatusCode::RANGE_NOT_SATISFIABLE,
            AppError::ExtractionFailed(_) | AppError::Internal { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn public_message(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => "Document not found",
            AppError::RangeUnsatisfiable { .. } => "Range not satisfiable",
            AppError::ExtractionFailed(_) => "PDF processing failed",
            AppError::Internal {
                operation: Operation::Metadata,
                ..
            } => "PDF processing failed",
            AppError::Internal {
                operation: Operation::Range,
                ..
            } => "Server error",
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub error: String,
    pub status_code: u16,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        match &self {
            AppError::NotFound(id) => tracing::debug!("Document not found: {}", id),
            AppError::RangeUnsatisfiable { total } => {
                tracing::debug!("Unsatisfiable range against {} bytes", total)
            }
            AppError::ExtractionFailed(e) => tracing::error!("Page count failed: {}", e),
            AppError::Internal { operation, message } => {
                tracing::error!("Internal error during {:?}: {}", operation, message)
            }
        }

        let body = Json(ErrorResponse {
            error: self.public_message().to_string(),
            status_code: status.as_u16(),
        });

        match self {
            AppError::RangeUnsatisfiable { total } => (
                status,
                [(header::CONTENT_RANGE, unsatisfied_content_range(total))],
                body,
            )
                .into_response(),
            _ => (status, body).into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_error_classification() {
        let not_found = AppError::from_document(
            DocumentError::NotFound("x.pdf".into()),
            Operation::Range,
        );
        assert_eq!(not_found.status_code(), StatusCode::NOT_FOUND);

        let io = AppError::from_document(
            DocumentError::Io(std::io::Error::other("disk on fire")),
            Operation::Range,
        );
        assert_eq!(io.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(io.public_message(), "Server error");

        let metadata_io = AppError::from_document(
            DocumentError::Io(std::io::Error::other("permission denied")),
            Operation::Metadata,
        );
        assert_eq!(metadata_io.public_message(), "PDF processing failed");
    }

    #[test]
    fn test_unsatisfiable_response_headers() {
        let response = AppError::RangeUnsatisfiable { total: 1870 }.into_response();
        assert_eq!(response.status(), StatusCode::RANGE_NOT_SATISFIABLE);
        assert_eq!(
            response.headers().get(header::CONTENT_RANGE).unwrap(),
            "bytes */1870"
        );
    }

    #[test]
    fn test_error_body_shape() {
        let body = serde_json::to_value(ErrorResponse {
            error: "Document not found".to_string(),
            status_code: 404,
        })
        .unwrap();
        assert_eq!(
            body,
            serde_json::json!({"error": "Document not found", "statusCode": 404})
        );
    }
}
