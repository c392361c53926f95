//! Document access
//!
//! Everything here is request-scoped: each call re-resolves the id, re-stats
//! the file and re-derives the ETag. Nothing is cached between requests.
//!
//! ```rust,ignore
//! use folio_server::document::DocumentStore;
//!
//! let store = DocumentStore::new("./documents");
//! let doc = store.open("report.pdf").await?;
//! println!("{} bytes, etag {}", doc.stat.size, doc.etag);
//! ```

mod error;
mod identity;
mod store;

pub use error::{DocumentError, Result};
pub use identity::{compute_etag, stat_document, DocumentStat};
pub use store::{DocumentStore, ResolvedDocument};
