//! Content repository
//!
//! The `ContentRepository` seam over items, scopes and per-scope content-type
//! settings, with a Postgres implementation.

mod postgres;
mod repository;

pub use postgres::PgContentRepository;
pub use repository::ContentRepository;
