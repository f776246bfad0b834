//! Modules layer - Infrastructure components for external integrations
//!
//! Contains the content repository and blob storage backends the content bank runs on.

pub mod contentbank;
pub mod storage;
