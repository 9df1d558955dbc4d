//! Port for reading the identity provider's list of live accounts.
//!
//! Used by the reconciliation job to find local users whose provider
//! account was deleted while the webhook was not delivering.

use async_trait::async_trait;

use crate::domain::ExternalUserId;

use super::define_port_error;

define_port_error! {
    /// Errors raised while reading the account directory.
    pub enum IdentityDirectoryError {
        /// The directory could not be reached or refused the request.
        Unavailable { message: String } => "identity directory unavailable: {message}",
        /// The directory answered with content that is not an id list.
        Decode { message: String } => "identity directory returned malformed data: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityDirectory: Send + Sync {
    /// Identifiers of every account the provider still knows about.
    async fn live_external_ids(&self) -> Result<Vec<ExternalUserId>, IdentityDirectoryError>;
}
