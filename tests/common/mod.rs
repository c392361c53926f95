//! Common test utilities and fixtures.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum_test::TestServer;
use folio_server::document::{DocumentError, Result as DocumentResult};
use folio_server::pdf::{fixtures, FullDocumentParser};
use folio_server::{app, AppState, Config};
use tempfile::TempDir;

/// Size of the byte fixture used for range tests
pub const TINY_SIZE: usize = 1870;

/// Minimal valid PDF with `pages` empty pages
pub fn build_pdf(pages: usize) -> Vec<u8> {
    fixtures::build_pdf(pages).unwrap()
}

/// Deterministic, non-repeating-looking bytes
pub fn patterned_bytes(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i * 31 % 251) as u8).collect()
}

/// Bytes of `len` padding whose tail declares a page tree with `count` pages
pub fn trailer_only_pdf(len: usize, count: u32) -> Vec<u8> {
    let tail = format!(
        "\n12 0 obj\n<< /Type /Pages /Kids [13 0 R] /Count {} >>\nendobj\ntrailer\n<< /Root 1 0 R >>\n%%EOF\n",
        count
    );
    let mut data = b"%PDF-1.7\n".to_vec();
    data.resize(len - tail.len(), b' ');
    data.extend_from_slice(tail.as_bytes());
    data
}

/// Parser double that records invocations and always fails
#[derive(Default)]
pub struct RecordingParser {
    calls: AtomicUsize,
}

impl RecordingParser {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl FullDocumentParser for RecordingParser {
    fn page_count(&self, _data: &[u8]) -> DocumentResult<u32> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(DocumentError::Parse("full parse not expected".to_string()))
    }
}

/// A temporary documents directory
pub struct TestDocuments {
    dir: TempDir,
}

impl TestDocuments {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    /// Documents directory with the standard fixtures
    pub fn with_fixtures() -> Self {
        let docs = Self::new();
        docs.write("tiny-1p.pdf", &patterned_bytes(TINY_SIZE));
        docs.write("one-page.pdf", &build_pdf(1));
        docs.write("small-2p.pdf", &build_pdf(2));
        docs.write("text-and-images.pdf", &build_pdf(9));
        docs.write("broken.pdf", b"%PDF-1.4\nthis is not really a pdf\n");
        std::fs::create_dir(docs.path().join("folder.pdf")).unwrap();
        docs
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn write(&self, name: &str, data: &[u8]) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, data).unwrap();
        path
    }

    pub fn config(&self) -> Config {
        Config::with_documents_root(self.path())
    }

    pub fn server(&self) -> TestServer {
        TestServer::new(app(AppState::new(self.config()))).unwrap()
    }

    pub fn server_with(&self, config: Config, parser: Arc<dyn FullDocumentParser>) -> TestServer {
        TestServer::new(app(AppState::with_parser(config, parser))).unwrap()
    }
}
