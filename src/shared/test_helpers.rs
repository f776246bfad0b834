//! In-memory collaborators and request helpers for tests.

use async_trait::async_trait;
use axum::{extract::Request, middleware::Next, Router};
use chrono::Utc;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use crate::core::config::H5pConfig;
use crate::core::error::{AppError, Result};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::auth::AuthorizationGate;
use crate::features::h5p::content_types::{ContentTypeHandler, ContentTypeRegistry, H5pContentType};
use crate::features::h5p::models::{
    Capability, ContentItem, ContentKind, NewContentItem, Scope, ScopeKind,
};
use crate::features::h5p::services::H5pService;
use crate::modules::contentbank::ContentRepository;
use crate::modules::storage::blob_store::{content_path, content_url_path, staging_path};
use crate::modules::storage::{BlobStore, StagedBlob};

pub const TEST_EMBED_BASE_URL: &str = "https://lms.test/h5p";
pub const TEST_FILES_BASE_URL: &str = "https://files.test";

pub fn create_uploader_user() -> AuthenticatedUser {
    AuthenticatedUser {
        sub: "test-sub".to_string(),
        roles: vec!["instructor".to_string()],
        permissions: vec![
            "contentbank:access".to_string(),
            "contentbank:upload".to_string(),
        ],
    }
}

pub fn create_reader_user() -> AuthenticatedUser {
    AuthenticatedUser {
        sub: "reader-sub".to_string(),
        roles: vec![],
        permissions: vec!["contentbank:access".to_string()],
    }
}

pub fn test_h5p_config() -> H5pConfig {
    H5pConfig {
        embed_base_url: TEST_EMBED_BASE_URL.to_string(),
        max_payload_size: 1024 * 1024,
        enabled_content_types: vec![ContentKind::H5p],
    }
}

pub fn with_auth(router: Router, user: AuthenticatedUser) -> Router {
    router.layer(axum::middleware::from_fn(
        move |mut request: Request, next: Next| {
            let user = user.clone();
            async move {
                request.extensions_mut().insert(user);
                next.run(request).await
            }
        },
    ))
}

// =============================================================================
// REPOSITORY
// =============================================================================

struct RepoState {
    next_id: i64,
    items: BTreeMap<i64, ContentItem>,
    scopes: Vec<Scope>,
    disabled: HashSet<(i64, ContentKind)>,
    fail_rename: bool,
}

pub struct InMemoryContentRepository {
    state: Mutex<RepoState>,
}

impl InMemoryContentRepository {
    /// Repository holding only the system scope (id 1)
    pub fn new() -> Self {
        Self {
            state: Mutex::new(RepoState {
                next_id: 1,
                items: BTreeMap::new(),
                scopes: vec![Scope {
                    id: 1,
                    kind: ScopeKind::System,
                    collection_id: None,
                    name: "System".to_string(),
                }],
                disabled: HashSet::new(),
                fail_rename: false,
            }),
        }
    }

    pub fn add_collection_scope(&self, scope_id: i64, collection_id: i64) -> Scope {
        let scope = Scope {
            id: scope_id,
            kind: ScopeKind::Collection,
            collection_id: Some(collection_id),
            name: format!("Collection {}", collection_id),
        };
        self.state.lock().unwrap().scopes.push(scope.clone());
        scope
    }

    pub fn disable(&self, scope_id: i64, kind: ContentKind) {
        self.state.lock().unwrap().disabled.insert((scope_id, kind));
    }

    pub fn fail_rename(&self, fail: bool) {
        self.state.lock().unwrap().fail_rename = fail;
    }

    pub fn item_count(&self) -> usize {
        self.state.lock().unwrap().items.len()
    }

    /// Insert an item directly, bypassing ingestion
    pub fn insert_item(&self, scope_id: i64, name: &str, filename: Option<&str>) -> ContentItem {
        let mut state = self.state.lock().unwrap();
        let id = state.next_id;
        state.next_id += 1;
        let now = Utc::now();
        let item = ContentItem {
            id,
            name: name.to_string(),
            scope_id,
            content_kind: ContentKind::H5p,
            filename: filename.map(str::to_string),
            file_key: filename.map(|f| content_path(scope_id, id, f)),
            created_by: "seed".to_string(),
            created_at: now,
            updated_at: now,
        };
        state.items.insert(id, item.clone());
        item
    }

    fn update_item<F>(&self, id: i64, f: F) -> Result<ContentItem>
    where
        F: FnOnce(&mut ContentItem),
    {
        let mut state = self.state.lock().unwrap();
        let item = state
            .items
            .get_mut(&id)
            .ok_or_else(|| AppError::ContentNotFound(id.to_string()))?;
        f(item);
        item.updated_at = Utc::now();
        Ok(item.clone())
    }
}

#[async_trait]
impl ContentRepository for InMemoryContentRepository {
    async fn get_item(&self, id: i64) -> Result<Option<ContentItem>> {
        Ok(self.state.lock().unwrap().items.get(&id).cloned())
    }

    async fn find_items(&self, scope_id: i64, kind: ContentKind) -> Result<Vec<ContentItem>> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .items
            .values()
            .filter(|item| item.scope_id == scope_id && item.content_kind == kind)
            .cloned()
            .collect())
    }

    async fn create_item(&self, item: NewContentItem) -> Result<ContentItem> {
        let mut state = self.state.lock().unwrap();
        let id = state.next_id;
        state.next_id += 1;
        let now = Utc::now();
        let created = ContentItem {
            id,
            name: item.name,
            scope_id: item.scope_id,
            content_kind: item.content_kind,
            filename: None,
            file_key: None,
            created_by: item.created_by,
            created_at: now,
            updated_at: now,
        };
        state.items.insert(id, created.clone());
        Ok(created)
    }

    async fn rename_item(&self, id: i64, name: &str) -> Result<ContentItem> {
        if self.state.lock().unwrap().fail_rename {
            return Err(AppError::Internal("rename rejected".to_string()));
        }
        self.update_item(id, |item| item.name = name.to_string())
    }

    async fn attach_file(&self, id: i64, filename: &str, file_key: &str) -> Result<ContentItem> {
        self.update_item(id, |item| {
            item.filename = Some(filename.to_string());
            item.file_key = Some(file_key.to_string());
        })
    }

    async fn delete_item(&self, id: i64) -> Result<()> {
        self.state.lock().unwrap().items.remove(&id);
        Ok(())
    }

    async fn get_scope(&self, id: i64) -> Result<Option<Scope>> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .scopes
            .iter()
            .find(|s| s.id == id)
            .cloned())
    }

    async fn scope_for_collection(&self, collection_id: i64) -> Result<Option<Scope>> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .scopes
            .iter()
            .find(|s| s.collection_id == Some(collection_id))
            .cloned())
    }

    async fn default_scope(&self) -> Result<Scope> {
        self.state
            .lock()
            .unwrap()
            .scopes
            .iter()
            .find(|s| s.kind == ScopeKind::System)
            .cloned()
            .ok_or_else(|| AppError::Internal("System scope is missing".to_string()))
    }

    async fn is_content_type_enabled(&self, scope_id: i64, kind: ContentKind) -> Result<bool> {
        Ok(!self
            .state
            .lock()
            .unwrap()
            .disabled
            .contains(&(scope_id, kind)))
    }
}

// =============================================================================
// BLOB STORE
// =============================================================================

#[derive(Default)]
struct BlobState {
    objects: HashMap<String, Vec<u8>>,
    fail_publish: bool,
    fail_release: bool,
}

pub struct InMemoryBlobStore {
    state: Mutex<BlobState>,
}

impl InMemoryBlobStore {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(BlobState::default()),
        }
    }

    pub fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.state.lock().unwrap().objects.get(key).cloned()
    }

    /// Keys of staging blobs still present
    pub fn staged_keys(&self) -> Vec<String> {
        self.state
            .lock()
            .unwrap()
            .objects
            .keys()
            .filter(|k| k.starts_with("private/staging/"))
            .cloned()
            .collect()
    }

    pub fn fail_publish(&self, fail: bool) {
        self.state.lock().unwrap().fail_publish = fail;
    }

    pub fn fail_release(&self, fail: bool) {
        self.state.lock().unwrap().fail_release = fail;
    }
}

#[async_trait]
impl BlobStore for InMemoryBlobStore {
    async fn stage(
        &self,
        data: Vec<u8>,
        owner: &str,
        filename: &str,
    ) -> Result<StagedBlob> {
        let token = Uuid::new_v4().to_string();
        let key = format!("private/{}", staging_path(owner, &token, filename));
        self.state
            .lock()
            .unwrap()
            .objects
            .insert(key.clone(), data);
        Ok(StagedBlob {
            key,
            owner: owner.to_string(),
            filename: filename.to_string(),
        })
    }

    async fn read(&self, blob: &StagedBlob) -> Result<Vec<u8>> {
        self.get(&blob.key)
            .ok_or_else(|| AppError::Internal(format!("Staged blob '{}' missing", blob.key)))
    }

    async fn release(&self, blob: &StagedBlob) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if state.fail_release {
            return Err(AppError::Internal("release rejected".to_string()));
        }
        state.objects.remove(&blob.key);
        Ok(())
    }

    async fn publish(
        &self,
        scope_id: i64,
        item_id: i64,
        filename: &str,
        data: Vec<u8>,
    ) -> Result<String> {
        let mut state = self.state.lock().unwrap();
        if state.fail_publish {
            return Err(AppError::Internal("publish rejected".to_string()));
        }
        let key = format!("public/{}", content_path(scope_id, item_id, filename));
        state.objects.insert(key.clone(), data);
        Ok(key)
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.state.lock().unwrap().objects.remove(key);
        Ok(())
    }

    fn public_url(&self, scope_id: i64, item_id: i64, filename: &str) -> String {
        format!(
            "{}/public/{}",
            TEST_FILES_BASE_URL,
            content_url_path(scope_id, item_id, filename)
        )
    }
}

// =============================================================================
// GATE AND HANDLERS
// =============================================================================

/// Gate that answers the same way for every request
pub struct StaticGate {
    pub allow: bool,
}

#[async_trait]
impl AuthorizationGate for StaticGate {
    async fn require(
        &self,
        _user: &AuthenticatedUser,
        capability: Capability,
        scope: &Scope,
    ) -> Result<()> {
        if self.allow {
            Ok(())
        } else {
            Err(AppError::Forbidden(format!(
                "Missing capability {} in scope {}",
                capability.permission(),
                scope.id
            )))
        }
    }
}

/// H5P handler that never produces an item
pub struct BrokenHandler {
    /// `Some(message)` raises, `None` declines silently
    pub error: Option<String>,
}

#[async_trait]
impl ContentTypeHandler for BrokenHandler {
    fn kind(&self) -> ContentKind {
        ContentKind::H5p
    }

    async fn ingest(
        &self,
        _blob: &StagedBlob,
        _scope: &Scope,
        _owner: &str,
    ) -> Result<Option<ContentItem>> {
        match &self.error {
            Some(message) => Err(AppError::Internal(message.clone())),
            None => Ok(None),
        }
    }
}

// =============================================================================
// SERVICE FIXTURE
// =============================================================================

pub struct TestContext {
    pub repository: Arc<InMemoryContentRepository>,
    pub blobs: Arc<InMemoryBlobStore>,
    pub service: Arc<H5pService>,
}

impl TestContext {
    /// Service wired with the real H5P handler and an allow-all gate
    pub fn new() -> Self {
        Self::with_gate(true)
    }

    pub fn with_gate(allow: bool) -> Self {
        Self::build(allow, |repository, blobs| {
            let mut registry = ContentTypeRegistry::new();
            registry.register(Arc::new(H5pContentType::new(repository, blobs)));
            registry
        })
    }

    pub fn with_registry(registry: ContentTypeRegistry) -> Self {
        Self::build(true, move |_, _| registry)
    }

    fn build<F>(allow: bool, make_registry: F) -> Self
    where
        F: FnOnce(Arc<dyn ContentRepository>, Arc<dyn BlobStore>) -> ContentTypeRegistry,
    {
        let repository = Arc::new(InMemoryContentRepository::new());
        let blobs = Arc::new(InMemoryBlobStore::new());
        let registry = make_registry(repository.clone(), blobs.clone());
        let service = Arc::new(H5pService::new(
            repository.clone(),
            blobs.clone(),
            Arc::new(registry),
            Arc::new(StaticGate { allow }),
            test_h5p_config(),
        ));

        Self {
            repository,
            blobs,
            service,
        }
    }
}
