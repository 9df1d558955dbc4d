//! Get-or-create binding of external identities to local users.
//!
//! Lookup then insert is not atomic. The store's unique index on the
//! external id is the real guard: when an insert loses that race the binder
//! re-reads and returns the winner's row instead of failing.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::domain::ports::{IdentityBinding, UserPersistenceError, UserRepository};
use crate::domain::{Error, ExternalIdentity, User, UserId};

/// Repository-backed [`IdentityBinding`].
#[derive(Clone)]
pub struct IdentityBinder<R> {
    users: Arc<R>,
}

impl<R> IdentityBinder<R> {
    /// Create a binder over a user repository.
    pub const fn new(users: Arc<R>) -> Self {
        Self { users }
    }
}

pub(crate) fn map_user_persistence_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => Error::service_unavailable(message),
        UserPersistenceError::Query { message } => Error::internal(message),
        UserPersistenceError::Duplicate { constraint } => {
            Error::conflict(format!("user profile collides with an existing user ({constraint})"))
        }
    }
}

impl<R> IdentityBinder<R>
where
    R: UserRepository,
{
    async fn find(&self, identity: &ExternalIdentity) -> Result<Option<User>, Error> {
        self.users
            .find_by_external_id(identity.external_id())
            .await
            .map_err(map_user_persistence_error)
    }

    async fn recover_lost_race(
        &self,
        identity: &ExternalIdentity,
        constraint: String,
    ) -> Result<User, Error> {
        match self.find(identity).await? {
            Some(winner) => {
                warn!(
                    external_id = %identity.external_id(),
                    user_id = %winner.id(),
                    "concurrent first bind detected; reusing stored user"
                );
                Ok(winner)
            }
            None => Err(map_user_persistence_error(
                UserPersistenceError::duplicate(constraint),
            )),
        }
    }
}

#[async_trait]
impl<R> IdentityBinding for IdentityBinder<R>
where
    R: UserRepository,
{
    async fn bind(&self, identity: &ExternalIdentity) -> Result<User, Error> {
        if let Some(user) = self.find(identity).await? {
            return Ok(user);
        }

        let user = User::new(
            UserId::random(),
            identity.external_id().clone(),
            identity.profile(),
        );
        match self.users.insert(&user).await {
            Ok(()) => {
                info!(
                    external_id = %identity.external_id(),
                    user_id = %user.id(),
                    "bound new local user"
                );
                Ok(user)
            }
            Err(UserPersistenceError::Duplicate { constraint }) => {
                self.recover_lost_race(identity, constraint).await
            }
            Err(other) => Err(map_user_persistence_error(other)),
        }
    }
}
