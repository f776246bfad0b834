//! H5P content bank feature.
//!
//! Accepts H5P packages as base64 payloads, stores them as content items in a scope,
//! and describes how to embed them.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | POST | `/api/h5p/upload` | Upload a package |
//! | GET | `/api/h5p` | List content in a scope |
//! | GET | `/api/h5p/{content_id}/embed` | Embed URL, iframe and short code |
//! | GET | `/api/h5p/functions` | Function catalog |
//! | POST | `/api/h5p/dispatch` | Call a catalog function by name |

pub mod content_types;
pub mod dtos;
pub mod handlers;
pub mod models;
pub mod registry;
pub mod routes;
pub mod services;

pub use content_types::{ContentTypeRegistry, H5pContentType};
pub use services::H5pService;
