use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// Content kinds the content bank can hold.
///
/// Handlers are registered against these keys; lookup is by exact key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    H5p,
}

impl ContentKind {
    /// Tag persisted in the `content_kind` column
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentKind::H5p => "h5p",
        }
    }

    /// Tag used inside embed short codes, e.g. `{h5p:42}`
    pub fn short_code_tag(&self) -> &'static str {
        match self {
            ContentKind::H5p => "h5p",
        }
    }

    /// Parse a configured or stored tag (case-insensitive)
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "h5p" => Some(ContentKind::H5p),
            _ => None,
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Capability levels checked by the authorization gate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Read content in a scope
    Access,
    /// Create content in a scope
    Upload,
}

impl Capability {
    /// Permission name as carried in access token claims
    pub fn permission(&self) -> &'static str {
        match self {
            Capability::Access => "contentbank:access",
            Capability::Upload => "contentbank:upload",
        }
    }
}
