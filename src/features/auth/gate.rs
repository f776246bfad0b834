//! Capability checks against a scope.
//!
//! A principal holds a capability in a scope when any of these is true:
//! - it has the `super_admin` role
//! - it holds the bare permission (e.g. `contentbank:upload`), valid in every scope
//! - it holds the scope-qualified permission (e.g. `contentbank:upload:7`)

use async_trait::async_trait;
use tracing::debug;

use crate::core::error::{AppError, Result};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::h5p::models::{Capability, Scope};

#[async_trait]
pub trait AuthorizationGate: Send + Sync {
    /// Fails with `AppError::Forbidden` when `user` lacks `capability` in `scope`
    async fn require(
        &self,
        user: &AuthenticatedUser,
        capability: Capability,
        scope: &Scope,
    ) -> Result<()>;
}

/// Gate backed by the roles and permissions carried in the access token
#[derive(Debug, Default, Clone, Copy)]
pub struct PermissionGate;

impl PermissionGate {
    pub fn allows(user: &AuthenticatedUser, capability: Capability, scope: &Scope) -> bool {
        let permission = capability.permission();
        user.is_super_admin()
            || user.has_permission(permission)
            || user.has_permission(&format!("{}:{}", permission, scope.id))
    }
}

#[async_trait]
impl AuthorizationGate for PermissionGate {
    async fn require(
        &self,
        user: &AuthenticatedUser,
        capability: Capability,
        scope: &Scope,
    ) -> Result<()> {
        if Self::allows(user, capability, scope) {
            return Ok(());
        }

        debug!(
            "Denied {} in scope {} for {}",
            capability.permission(),
            scope.id,
            user.sub
        );
        Err(AppError::Forbidden(format!(
            "Missing capability {} in scope {}",
            capability.permission(),
            scope.id
        )))
    }
}
