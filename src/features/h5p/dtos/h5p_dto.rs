use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::features::h5p::registry::FunctionDefinition;

/// Default filename when the caller does not send one
pub const DEFAULT_FILENAME: &str = "content.h5p";

fn default_filename() -> String {
    DEFAULT_FILENAME.to_string()
}

/// Upload request. Field aliases accept the content-bank web service parameter names.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UploadH5pDto {
    /// Base64 encoded H5P package
    #[serde(alias = "base64data")]
    pub payload_base64: String,
    /// Filename for the stored package
    #[serde(default = "default_filename")]
    #[schema(example = "demo.h5p", max_length = 255)]
    pub filename: String,
    /// Display title; derived from the filename when empty
    #[serde(default)]
    #[validate(length(max = 255, message = "title must be at most 255 characters"))]
    pub title: String,
    /// Explicit scope id (0 = not given)
    #[serde(default, alias = "contextid")]
    pub scope_id: i64,
    /// Collection whose scope to use (0 = not given)
    #[serde(default, alias = "courseid")]
    pub collection_id: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UploadH5pResponseDto {
    pub success: bool,
    pub content_id: i64,
    pub name: String,
    /// Scope the content was stored in
    pub scope_id: i64,
    pub embed_url: String,
    /// Ready-to-use iframe markup
    pub iframe_html: String,
}

/// Scope descriptor for listing
#[derive(Debug, Clone, Default, Serialize, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct ListH5pQuery {
    /// Explicit scope id (0 = not given)
    #[serde(default, alias = "contextid")]
    pub scope_id: i64,
    /// Collection whose scope to list (0 = not given)
    #[serde(default, alias = "courseid")]
    pub collection_id: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct H5pItemDto {
    pub content_id: i64,
    pub name: String,
    pub scope_id: i64,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
    /// Stored filename, empty when no file is attached
    pub filename: String,
    pub embed_url: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ListH5pResponseDto {
    pub success: bool,
    /// Always equal to `items.len()`
    pub count: usize,
    pub items: Vec<H5pItemDto>,
}

/// Parameters of `get_embed` when called through the dispatcher
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GetEmbedParams {
    #[serde(alias = "contentid")]
    pub content_id: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct EmbedResponseDto {
    pub success: bool,
    pub content_id: i64,
    pub name: String,
    pub embed_url: String,
    pub iframe_html: String,
    /// Filter short code, e.g. `{h5p:42}`
    pub short_code: String,
}

/// Call one of the catalog functions by name
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DispatchRequestDto {
    /// Function name, e.g. "local_h5p_api_list"
    pub wsfunction: String,
    /// Function parameters; omitted means none
    #[serde(default)]
    #[schema(value_type = Object)]
    pub params: serde_json::Value,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FunctionCatalogDto {
    /// Service short name
    pub service: String,
    pub functions: Vec<FunctionDefinition>,
}
