//! Folio Server Library
//!
//! Serves PDF documents from a directory with HTTP range support and
//! conditional revalidation, and reports page counts using a trailer scan
//! for large files with a full-parse fallback.
//! The server binary is in main.rs.
//!
//! # Modules
//!
//! - `document`: id resolution, file stat and ETag derivation
//! - `http`: `Range` arithmetic and conditional request checks
//! - `pdf`: two-tier page counting
//! - `routes`: axum handlers and router assembly

pub mod config;
pub mod document;
pub mod error;
pub mod http;
pub mod pdf;
pub mod routes;
pub mod state;

pub use config::Config;
pub use routes::app;
pub use state::AppState;
