use base64::{prelude::BASE64_STANDARD, Engine};
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};
use validator::Validate;

use crate::core::config::H5pConfig;
use crate::core::error::{AppError, Result};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::auth::AuthorizationGate;
use crate::features::h5p::content_types::{ContentTypeHandler, ContentTypeRegistry};
use crate::features::h5p::dtos::{
    DispatchRequestDto, EmbedResponseDto, GetEmbedParams, H5pItemDto, ListH5pQuery,
    ListH5pResponseDto, UploadH5pDto, UploadH5pResponseDto,
};
use crate::features::h5p::models::{Capability, ContentItem, ContentKind, Scope};
use crate::features::h5p::registry::H5pFunction;
use crate::modules::contentbank::ContentRepository;
use crate::modules::storage::{BlobStore, StagedBlob};
use crate::shared::validation::{filename_stem, sanitize_filename};

use super::{resolve_scope, EmbedDescriptor};

/// Upload, list and embed operations over the content bank
pub struct H5pService {
    repository: Arc<dyn ContentRepository>,
    blobs: Arc<dyn BlobStore>,
    registry: Arc<ContentTypeRegistry>,
    gate: Arc<dyn AuthorizationGate>,
    config: H5pConfig,
}

impl H5pService {
    pub fn new(
        repository: Arc<dyn ContentRepository>,
        blobs: Arc<dyn BlobStore>,
        registry: Arc<ContentTypeRegistry>,
        gate: Arc<dyn AuthorizationGate>,
        config: H5pConfig,
    ) -> Self {
        Self {
            repository,
            blobs,
            registry,
            gate,
            config,
        }
    }

    // ==================== Upload ====================

    /// Store a base64 encoded H5P package as a new content item and describe its embed.
    pub async fn upload(
        &self,
        user: &AuthenticatedUser,
        dto: UploadH5pDto,
    ) -> Result<UploadH5pResponseDto> {
        dto.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let data = self.decode_payload(&dto.payload_base64)?;
        let filename = sanitize_filename(&dto.filename).map_err(AppError::InvalidPayload)?;
        let title = match dto.title.trim() {
            "" => filename_stem(&filename).to_string(),
            title => title.to_string(),
        };

        let scope = resolve_scope(self.repository.as_ref(), dto.scope_id, dto.collection_id).await?;
        self.gate.require(user, Capability::Upload, &scope).await?;

        let handler = self.handler_for(ContentKind::H5p, &scope).await?;

        let staged = self.blobs.stage(data, &user.sub, &filename).await?;
        debug!(
            "Staged upload: key={}, owner={}, scope={}",
            staged.key, staged.owner, scope.id
        );

        let item = match handler.ingest(&staged, &scope, &user.sub).await {
            Ok(Some(item)) => item,
            Ok(None) => {
                self.release_staged(&staged).await;
                return Err(AppError::IngestionFailed(
                    "content type handler did not create an item".to_string(),
                ));
            }
            Err(e) => {
                self.release_staged(&staged).await;
                return Err(AppError::IngestionFailed(e.to_string()));
            }
        };

        let item = self.apply_title(item, &title).await;
        self.release_staged(&staged).await;

        let embed = self.describe(&item);
        info!(
            "H5P content uploaded: id={}, scope={}, by={}",
            item.id, item.scope_id, user.sub
        );

        Ok(UploadH5pResponseDto {
            success: true,
            content_id: item.id,
            name: item.name,
            scope_id: item.scope_id,
            embed_url: embed.embed_url,
            iframe_html: embed.iframe_html,
        })
    }

    /// Decode a base64 payload; whitespace (line breaks included) is ignored
    fn decode_payload(&self, encoded: &str) -> Result<Vec<u8>> {
        let compact: String = encoded
            .chars()
            .filter(|c| !c.is_ascii_whitespace())
            .collect();
        if compact.is_empty() {
            return Err(AppError::InvalidPayload(
                "Invalid base64 encoded data".to_string(),
            ));
        }

        let data = BASE64_STANDARD
            .decode(compact.as_bytes())
            .map_err(|_| AppError::InvalidPayload("Invalid base64 encoded data".to_string()))?;

        if data.is_empty() {
            return Err(AppError::InvalidPayload(
                "Invalid base64 encoded data".to_string(),
            ));
        }
        if data.len() > self.config.max_payload_size {
            return Err(AppError::InvalidPayload(format!(
                "Payload is {} bytes, the maximum is {}",
                data.len(),
                self.config.max_payload_size
            )));
        }

        Ok(data)
    }

    /// Registered handler for `kind`, provided the scope has not disabled it
    async fn handler_for(
        &self,
        kind: ContentKind,
        scope: &Scope,
    ) -> Result<Arc<dyn ContentTypeHandler>> {
        let handler = self.registry.get(kind).ok_or_else(|| {
            AppError::ContentTypeUnavailable(format!("no handler registered for '{}'", kind))
        })?;

        if !self.repository.is_content_type_enabled(scope.id, kind).await? {
            return Err(AppError::ContentTypeUnavailable(format!(
                "'{}' is disabled in scope {}",
                kind, scope.id
            )));
        }

        Ok(handler)
    }

    /// Rename the item when the title differs; failures keep the current name
    async fn apply_title(&self, item: ContentItem, title: &str) -> ContentItem {
        if item.name == title {
            return item;
        }

        match self.repository.rename_item(item.id, title).await {
            Ok(renamed) => renamed,
            Err(e) => {
                warn!(
                    "Failed to rename content item {} to '{}': {}",
                    item.id, title, e
                );
                item
            }
        }
    }

    async fn release_staged(&self, staged: &StagedBlob) {
        if let Err(e) = self.blobs.release(staged).await {
            warn!("Failed to release staged blob '{}': {}", staged.key, e);
        }
    }

    fn describe(&self, item: &ContentItem) -> EmbedDescriptor {
        let file_url = self
            .blobs
            .public_url(item.scope_id, item.id, item.filename_or_empty());
        EmbedDescriptor::build(
            &self.config.embed_base_url,
            &file_url,
            item.content_kind,
            item.id,
        )
    }

    // ==================== Read ====================

    /// List H5P content in the resolved scope, in storage order
    pub async fn list(
        &self,
        user: &AuthenticatedUser,
        query: ListH5pQuery,
    ) -> Result<ListH5pResponseDto> {
        let scope =
            resolve_scope(self.repository.as_ref(), query.scope_id, query.collection_id).await?;
        self.gate.require(user, Capability::Access, &scope).await?;

        let items: Vec<H5pItemDto> = self
            .repository
            .find_items(scope.id, ContentKind::H5p)
            .await?
            .into_iter()
            .map(|item| {
                let embed = self.describe(&item);
                H5pItemDto {
                    content_id: item.id,
                    filename: item.filename_or_empty().to_string(),
                    name: item.name,
                    scope_id: item.scope_id,
                    created_at: item.created_at,
                    modified_at: item.updated_at,
                    embed_url: embed.embed_url,
                }
            })
            .collect();

        debug!("Listed {} H5P items in scope {}", items.len(), scope.id);

        Ok(ListH5pResponseDto {
            success: true,
            count: items.len(),
            items,
        })
    }

    /// Embed URL, iframe markup and short code for one content item
    pub async fn get_embed(
        &self,
        user: &AuthenticatedUser,
        content_id: i64,
    ) -> Result<EmbedResponseDto> {
        if content_id <= 0 {
            return Err(AppError::ContentNotFound(content_id.to_string()));
        }

        let item = self
            .repository
            .get_item(content_id)
            .await?
            .ok_or_else(|| AppError::ContentNotFound(content_id.to_string()))?;

        let scope = self
            .repository
            .get_scope(item.scope_id)
            .await?
            .ok_or_else(|| AppError::ScopeNotFound(format!("scope {}", item.scope_id)))?;
        self.gate.require(user, Capability::Access, &scope).await?;

        let embed = self.describe(&item);

        Ok(EmbedResponseDto {
            success: true,
            content_id: item.id,
            name: item.name,
            embed_url: embed.embed_url,
            iframe_html: embed.iframe_html,
            short_code: embed.short_code,
        })
    }

    // ==================== Dispatch ====================

    /// Call a catalog function by name with loosely typed params
    pub async fn dispatch(
        &self,
        user: &AuthenticatedUser,
        request: DispatchRequestDto,
    ) -> Result<serde_json::Value> {
        let function = H5pFunction::from_name(&request.wsfunction).ok_or_else(|| {
            AppError::BadRequest(format!("Unknown function: {}", request.wsfunction))
        })?;
        debug!(
            "Dispatching {} (requires {})",
            request.wsfunction,
            function.capability().permission()
        );

        let params = match request.params {
            serde_json::Value::Null => serde_json::json!({}),
            params => params,
        };

        match function {
            H5pFunction::Upload => to_json(self.upload(user, parse_params(params)?).await?),
            H5pFunction::List => to_json(self.list(user, parse_params(params)?).await?),
            H5pFunction::GetEmbed => {
                let params: GetEmbedParams = parse_params(params)?;
                to_json(self.get_embed(user, params.content_id).await?)
            }
        }
    }
}

fn parse_params<T: DeserializeOwned>(params: serde_json::Value) -> Result<T> {
    serde_json::from_value(params).map_err(|e| AppError::BadRequest(format!("Invalid params: {}", e)))
}

fn to_json<T: Serialize>(value: T) -> Result<serde_json::Value> {
    serde_json::to_value(value).map_err(|e| AppError::Internal(e.to_string()))
}
