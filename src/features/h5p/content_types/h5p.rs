use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::core::error::Result;
use crate::features::h5p::models::{ContentItem, ContentKind, NewContentItem, Scope};
use crate::modules::contentbank::ContentRepository;
use crate::modules::storage::{BlobStore, StagedBlob};
use crate::shared::validation::filename_stem;

use super::ContentTypeHandler;

/// Ingests H5P packages: creates the item, then publishes its file.
///
/// The package is stored as-is; its internal structure is not inspected.
pub struct H5pContentType {
    repository: Arc<dyn ContentRepository>,
    blobs: Arc<dyn BlobStore>,
}

impl H5pContentType {
    pub fn new(repository: Arc<dyn ContentRepository>, blobs: Arc<dyn BlobStore>) -> Self {
        Self { repository, blobs }
    }

    /// Publish the package and attach it to `item`; removes the published file if attaching fails
    async fn store_file(
        &self,
        item: &ContentItem,
        filename: &str,
        data: Vec<u8>,
    ) -> Result<ContentItem> {
        let file_key = self
            .blobs
            .publish(item.scope_id, item.id, filename, data)
            .await?;
        debug!("Published content file: item={}, key={}", item.id, file_key);

        match self.repository.attach_file(item.id, filename, &file_key).await {
            Ok(item) => Ok(item),
            Err(e) => {
                if let Err(cleanup) = self.blobs.remove(&file_key).await {
                    warn!("Failed to remove orphaned file '{}': {}", file_key, cleanup);
                }
                Err(e)
            }
        }
    }
}

#[async_trait]
impl ContentTypeHandler for H5pContentType {
    fn kind(&self) -> ContentKind {
        ContentKind::H5p
    }

    async fn ingest(
        &self,
        blob: &StagedBlob,
        scope: &Scope,
        owner: &str,
    ) -> Result<Option<ContentItem>> {
        let data = self.blobs.read(blob).await?;
        if data.is_empty() {
            debug!("Staged blob '{}' is empty, nothing to ingest", blob.key);
            return Ok(None);
        }

        let item = self
            .repository
            .create_item(NewContentItem {
                name: filename_stem(&blob.filename).to_string(),
                scope_id: scope.id,
                content_kind: ContentKind::H5p,
                created_by: owner.to_string(),
            })
            .await?;

        match self.store_file(&item, &blob.filename, data).await {
            Ok(item) => {
                info!(
                    "H5P content ingested: id={}, scope={}, file={}",
                    item.id,
                    item.scope_id,
                    item.filename_or_empty()
                );
                Ok(Some(item))
            }
            Err(e) => {
                // Do not leave an item without its file behind
                if let Err(cleanup) = self.repository.delete_item(item.id).await {
                    warn!("Failed to delete partial content item {}: {}", item.id, cleanup);
                }
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{InMemoryBlobStore, InMemoryContentRepository};

    async fn setup() -> (
        Arc<InMemoryContentRepository>,
        Arc<InMemoryBlobStore>,
        H5pContentType,
        Scope,
    ) {
        let repository = Arc::new(InMemoryContentRepository::new());
        let blobs = Arc::new(InMemoryBlobStore::new());
        let handler = H5pContentType::new(repository.clone(), blobs.clone());
        let scope = repository.default_scope().await.unwrap();
        (repository, blobs, handler, scope)
    }

    #[tokio::test]
    async fn test_ingest_creates_item_with_published_file() {
        let (repository, blobs, handler, scope) = setup().await;
        let staged = blobs
            .stage(b"Hello".to_vec(), "user-1", "demo.h5p")
            .await
            .unwrap();

        let item = handler
            .ingest(&staged, &scope, "user-1")
            .await
            .unwrap()
            .expect("item created");

        assert_eq!(item.name, "demo");
        assert_eq!(item.scope_id, scope.id);
        assert_eq!(item.created_by, "user-1");
        assert_eq!(item.filename.as_deref(), Some("demo.h5p"));

        let key = item.file_key.clone().unwrap();
        assert_eq!(blobs.get(&key), Some(b"Hello".to_vec()));
        assert_eq!(repository.item_count(), 1);
    }

    #[tokio::test]
    async fn test_ingest_declines_empty_blob() {
        let (repository, blobs, handler, scope) = setup().await;
        let staged = blobs.stage(Vec::new(), "user-1", "empty.h5p").await.unwrap();

        let result = handler.ingest(&staged, &scope, "user-1").await.unwrap();

        assert!(result.is_none());
        assert_eq!(repository.item_count(), 0);
    }

    #[tokio::test]
    async fn test_ingest_rolls_back_item_when_publish_fails() {
        let (repository, blobs, handler, scope) = setup().await;
        let staged = blobs
            .stage(b"Hello".to_vec(), "user-1", "demo.h5p")
            .await
            .unwrap();
        blobs.fail_publish(true);

        let err = handler.ingest(&staged, &scope, "user-1").await.unwrap_err();

        assert!(err.to_string().contains("publish"));
        assert_eq!(repository.item_count(), 0);
    }
}
