//! Driving port resolving the caller to a local user.

use async_trait::async_trait;

use crate::domain::{Error, ExternalIdentity, User};

/// Get-or-create binding between an external identity and a local user.
///
/// Implementations must be idempotent: concurrent first binds for the same
/// identity yield the same user.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityBinding: Send + Sync {
    /// Return the local user for `identity`, creating it on first sight.
    async fn bind(&self, identity: &ExternalIdentity) -> Result<User, Error>;
}
