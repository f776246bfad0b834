use tracing::debug;

use crate::core::error::{AppError, Result};
use crate::features::h5p::models::Scope;
use crate::modules::contentbank::ContentRepository;

/// Map a scope descriptor to a concrete scope.
///
/// First match wins:
/// 1. `scope_id > 0`: that scope, or `ScopeNotFound`
/// 2. `collection_id > 0`: the collection's scope, or `ScopeNotFound`
/// 3. otherwise the default (system) scope
pub async fn resolve_scope(
    repository: &dyn ContentRepository,
    scope_id: i64,
    collection_id: i64,
) -> Result<Scope> {
    if scope_id > 0 {
        return repository
            .get_scope(scope_id)
            .await?
            .ok_or_else(|| AppError::ScopeNotFound(format!("scope {}", scope_id)));
    }

    if collection_id > 0 {
        return repository
            .scope_for_collection(collection_id)
            .await?
            .ok_or_else(|| AppError::ScopeNotFound(format!("collection {}", collection_id)));
    }

    debug!("No scope descriptor given, using default scope");
    repository.default_scope().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::h5p::models::ScopeKind;
    use crate::shared::test_helpers::InMemoryContentRepository;

    #[tokio::test]
    async fn test_explicit_scope_wins() {
        let repository = InMemoryContentRepository::new();
        repository.add_collection_scope(7, 70);
        repository.add_collection_scope(8, 80);

        let scope = resolve_scope(&repository, 7, 80).await.unwrap();
        assert_eq!(scope.id, 7);
    }

    #[tokio::test]
    async fn test_missing_explicit_scope_fails() {
        let repository = InMemoryContentRepository::new();
        repository.add_collection_scope(8, 80);

        // Does not fall through to the collection
        let err = resolve_scope(&repository, 99, 80).await.unwrap_err();
        assert_eq!(err.code(), "scope_not_found");
    }

    #[tokio::test]
    async fn test_collection_scope() {
        let repository = InMemoryContentRepository::new();
        repository.add_collection_scope(8, 80);

        let scope = resolve_scope(&repository, 0, 80).await.unwrap();
        assert_eq!(scope.id, 8);
        assert_eq!(scope.kind, ScopeKind::Collection);

        let err = resolve_scope(&repository, 0, 81).await.unwrap_err();
        assert_eq!(err.code(), "scope_not_found");
    }

    #[tokio::test]
    async fn test_default_scope_for_empty_and_negative_descriptors() {
        let repository = InMemoryContentRepository::new();

        for (scope_id, collection_id) in [(0, 0), (-1, 0), (0, -5)] {
            let scope = resolve_scope(&repository, scope_id, collection_id)
                .await
                .unwrap();
            assert_eq!(scope.kind, ScopeKind::System);
            assert_eq!(scope.id, 1);
        }
    }
}
