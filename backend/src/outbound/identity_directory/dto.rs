//! Wire shapes returned by the provider's user listing.

use serde::Deserialize;

use crate::domain::ExternalUserId;

/// One account in a listing page. Fields beyond the id are ignored.
#[derive(Debug, Deserialize)]
pub(super) struct DirectoryUserDto {
    id: String,
}

impl DirectoryUserDto {
    pub(super) fn into_external_id(self) -> Result<ExternalUserId, String> {
        ExternalUserId::new(&self.id).map_err(|err| format!("account id '{}': {err}", self.id))
    }
}
