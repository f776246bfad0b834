use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::auth;
use crate::features::h5p::{
    dtos as h5p_dtos, handlers as h5p_handlers, models as h5p_models, registry as h5p_registry,
};
use crate::shared::types::ApiResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        // H5P
        h5p_handlers::upload_h5p,
        h5p_handlers::list_h5p,
        h5p_handlers::get_embed,
        h5p_handlers::list_functions,
        h5p_handlers::dispatch,
    ),
    components(
        schemas(
            // Auth
            auth::model::AuthenticatedUser,
            // H5P
            h5p_models::ContentKind,
            h5p_models::ScopeKind,
            h5p_dtos::UploadH5pDto,
            h5p_dtos::UploadH5pResponseDto,
            h5p_dtos::ListH5pQuery,
            h5p_dtos::ListH5pResponseDto,
            h5p_dtos::H5pItemDto,
            h5p_dtos::GetEmbedParams,
            h5p_dtos::EmbedResponseDto,
            h5p_dtos::DispatchRequestDto,
            h5p_dtos::FunctionCatalogDto,
            h5p_registry::FunctionDefinition,
            h5p_registry::FunctionType,
            ApiResponse<h5p_dtos::FunctionCatalogDto>,
        )
    ),
    tags(
        (name = "h5p", description = "H5P content bank: upload, list and embed"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "H5P API",
        version = "0.1.0",
        description = "API documentation for the H5P content bank service",
    )
)]
pub struct ApiDoc;

/// Adds Bearer JWT security scheme to the OpenAPI document
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
