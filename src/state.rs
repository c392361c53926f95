//! Application state management

use std::sync::Arc;

use crate::config::Config;
use crate::document::DocumentStore;
use crate::pdf::{FullDocumentParser, LopdfParser, PageCountResolver};

/// Shared application state
///
/// Read-only after startup; handlers only ever borrow from it.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: Config,
    store: DocumentStore,
    page_counter: PageCountResolver,
}

impl AppState {
    /// Create application state with the lopdf full parser
    pub fn new(config: Config) -> Self {
        Self::with_parser(config, Arc::new(LopdfParser))
    }

    /// Create application state with a specific full-document parser
    pub fn with_parser(config: Config, parser: Arc<dyn FullDocumentParser>) -> Self {
        let store = DocumentStore::new(config.documents.root.clone());
        let page_counter =
            PageCountResolver::new(config.page_count.to_resolver_config(), parser);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                store,
                page_counter,
            }),
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Get the document store
    pub fn store(&self) -> &DocumentStore {
        &self.inner.store
    }

    /// Get the page-count resolver
    pub fn page_counter(&self) -> &PageCountResolver {
        &self.inner.page_counter
    }
}
