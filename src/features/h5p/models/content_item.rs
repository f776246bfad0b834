use chrono::{DateTime, Utc};

use super::ContentKind;

/// A content bank entry as the repository stores it
#[derive(Debug, Clone, PartialEq)]
pub struct ContentItem {
    pub id: i64,
    pub name: String,
    pub scope_id: i64,
    pub content_kind: ContentKind,
    /// Name of the attached file; `None` until a blob has been attached
    pub filename: Option<String>,
    /// Storage key of the attached file
    pub file_key: Option<String>,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ContentItem {
    /// Attached filename, or an empty string when no blob is attached
    pub fn filename_or_empty(&self) -> &str {
        self.filename.as_deref().unwrap_or("")
    }
}

/// Values needed to insert a new content item
#[derive(Debug, Clone)]
pub struct NewContentItem {
    pub name: String,
    pub scope_id: i64,
    pub content_kind: ContentKind,
    pub created_by: String,
}
