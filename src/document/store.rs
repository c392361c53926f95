//! Document store
//!
//! Maps opaque document ids onto files directly under a single root
//! directory. An id must name one path component; anything that could walk
//! out of the root is reported as not found, the same as a missing file.

use std::path::{Component, Path, PathBuf};

use super::error::{DocumentError, Result};
use super::identity::{compute_etag, stat_document, DocumentStat};

/// A document id resolved to a regular file under the root
#[derive(Debug, Clone)]
pub struct ResolvedDocument {
    pub id: String,
    pub path: PathBuf,
    pub stat: DocumentStat,
    pub etag: String,
}

impl ResolvedDocument {
    /// Final path component, used as the display filename
    pub fn filename(&self) -> &str {
        self.path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(&self.id)
    }
}

/// Read-only view over the configured documents directory
#[derive(Debug, Clone)]
pub struct DocumentStore {
    root: PathBuf,
}

impl DocumentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolve an id to a path under the root without touching the disk
    pub fn resolve_path(&self, id: &str) -> Result<PathBuf> {
        if !is_single_component(id) {
            tracing::debug!("Rejecting document id '{}'", id);
            return Err(DocumentError::NotFound(id.to_string()));
        }
        Ok(self.root.join(id))
    }

    /// Resolve an id, verify it is a regular file inside the root, and
    /// capture its stat and ETag.
    pub async fn open(&self, id: &str) -> Result<ResolvedDocument> {
        let path = self.resolve_path(id)?;
        let stat = stat_document(&path).await?;

        // Symlinks may point anywhere; the target must still live under the root
        let canonical_root = canonicalize(&self.root, id).await?;
        let canonical_path = canonicalize(&path, id).await?;
        if !canonical_path.starts_with(&canonical_root) {
            tracing::warn!("Document '{}' resolves outside the documents root", id);
            return Err(DocumentError::NotFound(id.to_string()));
        }

        let etag = compute_etag(&stat);

        Ok(ResolvedDocument {
            id: id.to_string(),
            path,
            stat,
            etag,
        })
    }
}

fn is_single_component(id: &str) -> bool {
    if id.is_empty() || id.contains('\0') || id.contains('\\') {
        return false;
    }
    let mut components = Path::new(id).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    ) && !id.contains('/')
}

async fn canonicalize(path: &Path, id: &str) -> Result<PathBuf> {
    match tokio::fs::canonicalize(path).await {
        Ok(p) => Ok(p),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(DocumentError::NotFound(id.to_string()))
        }
        Err(e) => Err(e.into()),
    }
}
