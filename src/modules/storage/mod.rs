//! Storage module for content files
//!
//! Defines the `BlobStore` seam used by the content bank and its
//! MinIO/S3-compatible implementation.

pub(crate) mod blob_store;
mod minio_client;

pub use blob_store::{BlobStore, StagedBlob};
pub use minio_client::MinIOClient;
