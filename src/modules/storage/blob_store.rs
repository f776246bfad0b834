use async_trait::async_trait;

use crate::core::error::AppError;

/// Handle to a transient, principal-scoped staging blob
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedBlob {
    /// Full storage key of the staged object
    pub key: String,
    /// Principal that staged the blob
    pub owner: String,
    /// Filename the caller supplied
    pub filename: String,
}

/// Binary storage used while ingesting and serving content files
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store `data` in the owner's staging area under a fresh random token
    async fn stage(&self, data: Vec<u8>, owner: &str, filename: &str)
        -> Result<StagedBlob, AppError>;

    /// Read back the bytes of a staged blob
    async fn read(&self, blob: &StagedBlob) -> Result<Vec<u8>, AppError>;

    /// Delete a staged blob
    async fn release(&self, blob: &StagedBlob) -> Result<(), AppError>;

    /// Store the permanent file of a content item, returning its storage key
    async fn publish(
        &self,
        scope_id: i64,
        item_id: i64,
        filename: &str,
        data: Vec<u8>,
    ) -> Result<String, AppError>;

    /// Delete a permanent file by storage key
    async fn remove(&self, key: &str) -> Result<(), AppError>;

    /// Public URL of a content item's file. Pure; the file need not exist.
    fn public_url(&self, scope_id: i64, item_id: i64, filename: &str) -> String;
}

/// Relative staging path: `staging/{owner}/{token}/{filename}`
pub fn staging_path(owner: &str, token: &str, filename: &str) -> String {
    format!("staging/{}/{}/{}", owner, token, filename)
}

/// Relative path of a published content file: `contentbank/{scope}/{item}/{filename}`
pub fn content_path(scope_id: i64, item_id: i64, filename: &str) -> String {
    format!("contentbank/{}/{}/{}", scope_id, item_id, filename)
}

/// Same as [`content_path`] with the filename percent-encoded, for use in URLs
pub fn content_url_path(scope_id: i64, item_id: i64, filename: &str) -> String {
    content_path(scope_id, item_id, &urlencoding::encode(filename))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_staging_path_is_owner_scoped() {
        assert_eq!(
            staging_path("user-1", "tok", "demo.h5p"),
            "staging/user-1/tok/demo.h5p"
        );
        assert_ne!(
            staging_path("user-1", "tok", "demo.h5p"),
            staging_path("user-2", "tok", "demo.h5p")
        );
    }

    #[test]
    fn test_content_url_path_encodes_filename() {
        assert_eq!(content_path(3, 7, "my quiz.h5p"), "contentbank/3/7/my quiz.h5p");
        assert_eq!(
            content_url_path(3, 7, "my quiz.h5p"),
            "contentbank/3/7/my%20quiz.h5p"
        );
        assert_eq!(content_url_path(1, 5, ""), "contentbank/1/5/");
    }
}
