use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ScopeKind {
    /// The process-wide default scope
    System,
    /// Scope owned by a collection (course)
    Collection,
}

impl ScopeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScopeKind::System => "system",
            ScopeKind::Collection => "collection",
        }
    }

    pub fn from_db(value: &str) -> Option<Self> {
        match value {
            "system" => Some(ScopeKind::System),
            "collection" => Some(ScopeKind::Collection),
            _ => None,
        }
    }
}

/// Authorization and storage boundary that owns content items
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scope {
    pub id: i64,
    pub kind: ScopeKind,
    pub collection_id: Option<i64>,
    pub name: String,
}
