use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::features::h5p::handlers::{dispatch, get_embed, list_functions, list_h5p, upload_h5p};
use crate::features::h5p::services::H5pService;

/// Create routes for the H5P feature.
///
/// `body_limit` caps upload and dispatch bodies, which carry base64 packages.
pub fn routes(service: Arc<H5pService>, body_limit: usize) -> Router {
    Router::new()
        .route("/api/h5p", get(list_h5p))
        .route(
            "/api/h5p/upload",
            post(upload_h5p).layer(DefaultBodyLimit::max(body_limit)),
        )
        // Static segments must come before {content_id}
        .route("/api/h5p/functions", get(list_functions))
        .route(
            "/api/h5p/dispatch",
            post(dispatch).layer(DefaultBodyLimit::max(body_limit)),
        )
        .route("/api/h5p/{content_id}/embed", get(get_embed))
        .with_state(service)
}
