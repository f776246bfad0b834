use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Envelope for error responses and for endpoints without a dedicated response shape
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
    /// Machine-stable error kind (e.g. "invalid_payload"); absent on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    pub errors: Option<Vec<String>>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: Option<T>, message: Option<String>) -> Self {
        Self {
            success: true,
            data,
            message,
            code: None,
            errors: None,
        }
    }

    pub fn error(
        message: Option<String>,
        code: Option<&str>,
        errors: Option<Vec<String>>,
    ) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            message,
            code: code.map(str::to_string),
            errors,
        }
    }
}
