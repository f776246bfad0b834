use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::core::error::Result;
use crate::core::extractor::{AppJson, AppQuery};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::h5p::dtos::{
    DispatchRequestDto, EmbedResponseDto, FunctionCatalogDto, ListH5pQuery, ListH5pResponseDto,
    UploadH5pDto, UploadH5pResponseDto,
};
use crate::features::h5p::registry::{all_functions, SERVICE_SHORT_NAME};
use crate::features::h5p::services::H5pService;
use crate::shared::types::ApiResponse;

/// Upload an H5P package
#[utoipa::path(
    post,
    path = "/api/h5p/upload",
    request_body = UploadH5pDto,
    responses(
        (status = 201, description = "Content created", body = UploadH5pResponseDto),
        (status = 400, description = "Invalid payload or filename"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Missing upload capability in the scope"),
        (status = 404, description = "Scope not found"),
        (status = 422, description = "Ingestion failed"),
        (status = 503, description = "H5P content type unavailable")
    ),
    tag = "h5p",
    security(("bearer_auth" = []))
)]
pub async fn upload_h5p(
    user: AuthenticatedUser,
    State(service): State<Arc<H5pService>>,
    AppJson(dto): AppJson<UploadH5pDto>,
) -> Result<(StatusCode, Json<UploadH5pResponseDto>)> {
    let response = service.upload(&user, dto).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// List H5P content in a scope
#[utoipa::path(
    get,
    path = "/api/h5p",
    params(ListH5pQuery),
    responses(
        (status = 200, description = "H5P content in the scope", body = ListH5pResponseDto),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Missing access capability in the scope"),
        (status = 404, description = "Scope not found")
    ),
    tag = "h5p",
    security(("bearer_auth" = []))
)]
pub async fn list_h5p(
    user: AuthenticatedUser,
    State(service): State<Arc<H5pService>>,
    AppQuery(query): AppQuery<ListH5pQuery>,
) -> Result<Json<ListH5pResponseDto>> {
    let response = service.list(&user, query).await?;
    Ok(Json(response))
}

/// Get embed information for H5P content
#[utoipa::path(
    get,
    path = "/api/h5p/{content_id}/embed",
    params(
        ("content_id" = i64, Path, description = "Content item ID")
    ),
    responses(
        (status = 200, description = "Embed URL, iframe markup and short code", body = EmbedResponseDto),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Missing access capability in the scope"),
        (status = 404, description = "Content not found")
    ),
    tag = "h5p",
    security(("bearer_auth" = []))
)]
pub async fn get_embed(
    user: AuthenticatedUser,
    State(service): State<Arc<H5pService>>,
    Path(content_id): Path<i64>,
) -> Result<Json<EmbedResponseDto>> {
    let response = service.get_embed(&user, content_id).await?;
    Ok(Json(response))
}

/// List the callable service functions
#[utoipa::path(
    get,
    path = "/api/h5p/functions",
    responses(
        (status = 200, description = "Function catalog", body = ApiResponse<FunctionCatalogDto>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "h5p",
    security(("bearer_auth" = []))
)]
pub async fn list_functions(_user: AuthenticatedUser) -> Json<ApiResponse<FunctionCatalogDto>> {
    Json(ApiResponse::success(
        Some(FunctionCatalogDto {
            service: SERVICE_SHORT_NAME.to_string(),
            functions: all_functions(),
        }),
        None,
    ))
}

/// Call a service function by name
#[utoipa::path(
    post,
    path = "/api/h5p/dispatch",
    request_body = DispatchRequestDto,
    responses(
        (status = 200, description = "Result of the called function"),
        (status = 400, description = "Unknown function or malformed params"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "h5p",
    security(("bearer_auth" = []))
)]
pub async fn dispatch(
    user: AuthenticatedUser,
    State(service): State<Arc<H5pService>>,
    AppJson(request): AppJson<DispatchRequestDto>,
) -> Result<Json<serde_json::Value>> {
    let response = service.dispatch(&user, request).await?;
    Ok(Json(response))
}
