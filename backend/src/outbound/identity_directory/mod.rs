//! Identity directory adapters.
//!
//! - [`HttpIdentityDirectory`] pages through the provider's user listing.
//! - [`ListedIdentityDirectory`] serves a list loaded ahead of time, such as
//!   an exported id file.

mod dto;
mod http_source;

use async_trait::async_trait;

use crate::domain::ExternalUserId;
use crate::domain::ports::{IdentityDirectory, IdentityDirectoryError};

pub use http_source::{DIRECTORY_PAGE_SIZE, HttpIdentityDirectory};

/// Directory backed by a fixed id list.
#[derive(Debug, Clone, Default)]
pub struct ListedIdentityDirectory {
    ids: Vec<ExternalUserId>,
}

impl ListedIdentityDirectory {
    /// Serve exactly these ids.
    pub fn new(ids: Vec<ExternalUserId>) -> Self {
        Self { ids }
    }
}

#[async_trait]
impl IdentityDirectory for ListedIdentityDirectory {
    async fn live_external_ids(&self) -> Result<Vec<ExternalUserId>, IdentityDirectoryError> {
        Ok(self.ids.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn listed_directories_return_their_ids() {
        let ids = crate::domain::parse_live_ids("user_a\nuser_b\n").expect("ids parse");
        let directory = ListedIdentityDirectory::new(ids.clone());
        assert_eq!(directory.live_external_ids().await, Ok(ids));
    }
}
