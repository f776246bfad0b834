use async_trait::async_trait;

use crate::core::error::Result;
use crate::features::h5p::models::{ContentItem, ContentKind, NewContentItem, Scope};

/// Persistence for content items and the scopes that own them
#[async_trait]
pub trait ContentRepository: Send + Sync {
    async fn get_item(&self, id: i64) -> Result<Option<ContentItem>>;

    /// All items of `kind` in a scope, in storage order
    async fn find_items(&self, scope_id: i64, kind: ContentKind) -> Result<Vec<ContentItem>>;

    async fn create_item(&self, item: NewContentItem) -> Result<ContentItem>;

    async fn rename_item(&self, id: i64, name: &str) -> Result<ContentItem>;

    /// Record the stored file of an item
    async fn attach_file(&self, id: i64, filename: &str, file_key: &str) -> Result<ContentItem>;

    async fn delete_item(&self, id: i64) -> Result<()>;

    async fn get_scope(&self, id: i64) -> Result<Option<Scope>>;

    /// Scope owned by a collection
    async fn scope_for_collection(&self, collection_id: i64) -> Result<Option<Scope>>;

    /// The process-wide default scope
    async fn default_scope(&self) -> Result<Scope>;

    /// Whether `kind` may be used in a scope. Scopes without an explicit setting allow it.
    async fn is_content_type_enabled(&self, scope_id: i64, kind: ContentKind) -> Result<bool>;
}
