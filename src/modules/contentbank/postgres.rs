use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::debug;

use crate::core::error::{AppError, Result};
use crate::features::h5p::models::{ContentItem, ContentKind, NewContentItem, Scope, ScopeKind};

use super::ContentRepository;

const ITEM_COLUMNS: &str = "id, name, scope_id, content_kind, filename, file_key, created_by, created_at, updated_at";
const SCOPE_COLUMNS: &str = "id, kind, collection_id, name";

/// Database row for content_items
#[derive(Debug, FromRow)]
struct ContentItemRow {
    id: i64,
    name: String,
    scope_id: i64,
    content_kind: String,
    filename: Option<String>,
    file_key: Option<String>,
    created_by: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ContentItemRow> for ContentItem {
    type Error = AppError;

    fn try_from(row: ContentItemRow) -> Result<Self> {
        let content_kind = ContentKind::from_tag(&row.content_kind).ok_or_else(|| {
            AppError::Internal(format!(
                "Content item {} has unknown content kind '{}'",
                row.id, row.content_kind
            ))
        })?;

        Ok(ContentItem {
            id: row.id,
            name: row.name,
            scope_id: row.scope_id,
            content_kind,
            filename: row.filename,
            file_key: row.file_key,
            created_by: row.created_by,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Database row for scopes
#[derive(Debug, FromRow)]
struct ScopeRow {
    id: i64,
    kind: String,
    collection_id: Option<i64>,
    name: String,
}

impl TryFrom<ScopeRow> for Scope {
    type Error = AppError;

    fn try_from(row: ScopeRow) -> Result<Self> {
        let kind = ScopeKind::from_db(&row.kind).ok_or_else(|| {
            AppError::Internal(format!("Scope {} has unknown kind '{}'", row.id, row.kind))
        })?;

        Ok(Scope {
            id: row.id,
            kind,
            collection_id: row.collection_id,
            name: row.name,
        })
    }
}

/// Postgres-backed content repository
pub struct PgContentRepository {
    pool: PgPool,
}

impl PgContentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContentRepository for PgContentRepository {
    async fn get_item(&self, id: i64) -> Result<Option<ContentItem>> {
        let row = sqlx::query_as::<_, ContentItemRow>(&format!(
            "SELECT {} FROM content_items WHERE id = $1",
            ITEM_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(ContentItem::try_from).transpose()
    }

    async fn find_items(&self, scope_id: i64, kind: ContentKind) -> Result<Vec<ContentItem>> {
        let rows = sqlx::query_as::<_, ContentItemRow>(&format!(
            "SELECT {} FROM content_items WHERE scope_id = $1 AND content_kind = $2 ORDER BY id",
            ITEM_COLUMNS
        ))
        .bind(scope_id)
        .bind(kind.as_str())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(ContentItem::try_from).collect()
    }

    async fn create_item(&self, item: NewContentItem) -> Result<ContentItem> {
        let row = sqlx::query_as::<_, ContentItemRow>(&format!(
            r#"
            INSERT INTO content_items (name, scope_id, content_kind, created_by)
            VALUES ($1, $2, $3, $4)
            RETURNING {}
            "#,
            ITEM_COLUMNS
        ))
        .bind(&item.name)
        .bind(item.scope_id)
        .bind(item.content_kind.as_str())
        .bind(&item.created_by)
        .fetch_one(&self.pool)
        .await?;

        debug!("Content item row inserted: id={}", row.id);
        ContentItem::try_from(row)
    }

    async fn rename_item(&self, id: i64, name: &str) -> Result<ContentItem> {
        let row = sqlx::query_as::<_, ContentItemRow>(&format!(
            r#"
            UPDATE content_items
            SET name = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            ITEM_COLUMNS
        ))
        .bind(id)
        .bind(name)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::ContentNotFound(id.to_string()))?;

        ContentItem::try_from(row)
    }

    async fn attach_file(&self, id: i64, filename: &str, file_key: &str) -> Result<ContentItem> {
        let row = sqlx::query_as::<_, ContentItemRow>(&format!(
            r#"
            UPDATE content_items
            SET filename = $2, file_key = $3, updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            ITEM_COLUMNS
        ))
        .bind(id)
        .bind(filename)
        .bind(file_key)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::ContentNotFound(id.to_string()))?;

        ContentItem::try_from(row)
    }

    async fn delete_item(&self, id: i64) -> Result<()> {
        sqlx::query("DELETE FROM content_items WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn get_scope(&self, id: i64) -> Result<Option<Scope>> {
        let row = sqlx::query_as::<_, ScopeRow>(&format!(
            "SELECT {} FROM scopes WHERE id = $1",
            SCOPE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Scope::try_from).transpose()
    }

    async fn scope_for_collection(&self, collection_id: i64) -> Result<Option<Scope>> {
        let row = sqlx::query_as::<_, ScopeRow>(&format!(
            "SELECT {} FROM scopes WHERE kind = $1 AND collection_id = $2",
            SCOPE_COLUMNS
        ))
        .bind(ScopeKind::Collection.as_str())
        .bind(collection_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Scope::try_from).transpose()
    }

    async fn default_scope(&self) -> Result<Scope> {
        let row = sqlx::query_as::<_, ScopeRow>(&format!(
            "SELECT {} FROM scopes WHERE kind = $1 ORDER BY id LIMIT 1",
            SCOPE_COLUMNS
        ))
        .bind(ScopeKind::System.as_str())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::Internal("System scope is missing".to_string()))?;

        Scope::try_from(row)
    }

    async fn is_content_type_enabled(&self, scope_id: i64, kind: ContentKind) -> Result<bool> {
        let enabled = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT enabled FROM scope_content_types
            WHERE scope_id = $1 AND content_kind = $2
            "#,
        )
        .bind(scope_id)
        .bind(kind.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(enabled.unwrap_or(true))
    }
}
