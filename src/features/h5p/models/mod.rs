mod content_item;
mod content_kind;
mod scope;

pub use content_item::{ContentItem, NewContentItem};
pub use content_kind::{Capability, ContentKind};
pub use scope::{Scope, ScopeKind};
