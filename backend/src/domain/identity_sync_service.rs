//! Applies identity provider lifecycle notifications to local users.
//!
//! Creation reuses the binder, so a notification racing a first
//! authenticated request for the same account still yields one user.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::identity_binder::map_user_persistence_error;
use crate::domain::ports::{
    IdentityBinding, IdentitySyncCommand, IdentitySyncEvent, IdentitySyncOutcome, UserRepository,
};
use crate::domain::{Error, ExternalIdentity};

/// Repository-backed [`IdentitySyncCommand`].
#[derive(Clone)]
pub struct IdentitySyncService<R> {
    users: Arc<R>,
    binder: Arc<dyn IdentityBinding>,
}

impl<R> IdentitySyncService<R> {
    /// Create the service.
    pub fn new(users: Arc<R>, binder: Arc<dyn IdentityBinding>) -> Self {
        Self { users, binder }
    }
}

impl<R> IdentitySyncService<R>
where
    R: UserRepository,
{
    async fn refresh(&self, identity: &ExternalIdentity) -> Result<IdentitySyncOutcome, Error> {
        let bound = self.binder.bind(identity).await?;
        let refreshed = bound.with_profile(identity.profile());
        if refreshed == bound {
            return Ok(IdentitySyncOutcome::Refreshed(bound.id()));
        }
        let updated = self
            .users
            .update_profile(&refreshed)
            .await
            .map_err(map_user_persistence_error)?;
        if !updated {
            return Err(Error::not_found("user disappeared during profile refresh"));
        }
        info!(user_id = %refreshed.id(), "refreshed local user profile");
        Ok(IdentitySyncOutcome::Refreshed(refreshed.id()))
    }
}

#[async_trait]
impl<R> IdentitySyncCommand for IdentitySyncService<R>
where
    R: UserRepository,
{
    async fn apply(&self, event: IdentitySyncEvent) -> Result<IdentitySyncOutcome, Error> {
        match event {
            IdentitySyncEvent::Created(identity) => {
                let user = self.binder.bind(&identity).await?;
                Ok(IdentitySyncOutcome::Bound(user.id()))
            }
            IdentitySyncEvent::Updated(identity) => self.refresh(&identity).await,
            IdentitySyncEvent::Deleted(external_id) => {
                let removed = self
                    .users
                    .delete_by_external_id(&external_id)
                    .await
                    .map_err(map_user_persistence_error)?;
                info!(%external_id, removed, "processed account deletion");
                Ok(IdentitySyncOutcome::Deleted { removed })
            }
            IdentitySyncEvent::Ignored { event_type } => {
                debug!(%event_type, "ignoring identity notification");
                Ok(IdentitySyncOutcome::Ignored)
            }
        }
    }
}
