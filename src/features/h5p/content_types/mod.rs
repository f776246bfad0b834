//! Content-type handlers and the registry that maps a `ContentKind` to its handler.

mod h5p;

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

use crate::core::error::Result;
use crate::features::h5p::models::{ContentItem, ContentKind, Scope};
use crate::modules::storage::StagedBlob;

pub use h5p::H5pContentType;

/// Turns a staged blob into a permanent content item of one kind
#[async_trait]
pub trait ContentTypeHandler: Send + Sync {
    fn kind(&self) -> ContentKind;

    /// Ingest `blob` into `scope` on behalf of `owner`.
    ///
    /// `Ok(None)` means the handler declined the blob without raising.
    async fn ingest(
        &self,
        blob: &StagedBlob,
        scope: &Scope,
        owner: &str,
    ) -> Result<Option<ContentItem>>;
}

/// Handlers keyed by content kind; lookup is exact
#[derive(Default)]
pub struct ContentTypeRegistry {
    handlers: HashMap<ContentKind, Arc<dyn ContentTypeHandler>>,
}

impl ContentTypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler, replacing any previous handler for the same kind
    pub fn register(&mut self, handler: Arc<dyn ContentTypeHandler>) {
        self.handlers.insert(handler.kind(), handler);
    }

    pub fn get(&self, kind: ContentKind) -> Option<Arc<dyn ContentTypeHandler>> {
        self.handlers.get(&kind).cloned()
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}
