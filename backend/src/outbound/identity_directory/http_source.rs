//! Reqwest-backed identity directory.
//!
//! Issues `GET <endpoint>?limit=<n>&offset=<m>` with a bearer token and
//! expects a JSON array of `{ "id": ... }` objects per page. A page shorter
//! than the limit ends the walk.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use tracing::debug;

use super::dto::DirectoryUserDto;
use crate::domain::ExternalUserId;
use crate::domain::ports::{IdentityDirectory, IdentityDirectoryError};

/// Accounts requested per page.
pub const DIRECTORY_PAGE_SIZE: usize = 500;
const USER_AGENT: &str = "city-guide-reconcile-users/0.1";

/// Directory adapter reading one provider endpoint.
pub struct HttpIdentityDirectory {
    client: Client,
    endpoint: Url,
    token: String,
    page_size: usize,
}

impl HttpIdentityDirectory {
    /// Build an adapter with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(endpoint: Url, token: String, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint,
            token,
            page_size: DIRECTORY_PAGE_SIZE,
        })
    }

    fn page_url(&self, offset: usize) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("limit", &self.page_size.to_string())
            .append_pair("offset", &offset.to_string());
        url
    }

    async fn fetch_page(&self, offset: usize) -> Result<Vec<ExternalUserId>, IdentityDirectoryError> {
        let response = self
            .client
            .get(self.page_url(offset))
            .bearer_auth(&self.token)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|error| IdentityDirectoryError::unavailable(error.to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|error| IdentityDirectoryError::unavailable(error.to_string()))?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        parse_page(body.as_ref())
    }
}

#[async_trait]
impl IdentityDirectory for HttpIdentityDirectory {
    async fn live_external_ids(&self) -> Result<Vec<ExternalUserId>, IdentityDirectoryError> {
        let mut ids = Vec::new();
        loop {
            let page = self.fetch_page(ids.len()).await?;
            let fetched = page.len();
            ids.extend(page);
            debug!(fetched, total = ids.len(), "read identity directory page");
            if fetched < self.page_size {
                return Ok(ids);
            }
        }
    }
}

fn parse_page(body: &[u8]) -> Result<Vec<ExternalUserId>, IdentityDirectoryError> {
    let users: Vec<DirectoryUserDto> = serde_json::from_slice(body).map_err(|error| {
        IdentityDirectoryError::decode(format!("invalid user listing JSON: {error}"))
    })?;
    users
        .into_iter()
        .map(DirectoryUserDto::into_external_id)
        .collect::<Result<_, _>>()
        .map_err(IdentityDirectoryError::decode)
}

fn map_status_error(status: StatusCode, body: &[u8]) -> IdentityDirectoryError {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let preview: String = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .chars()
        .take(PREVIEW_CHAR_LIMIT)
        .collect();
    if preview.is_empty() {
        IdentityDirectoryError::unavailable(format!("status {}", status.as_u16()))
    } else {
        IdentityDirectoryError::unavailable(format!("status {}: {preview}", status.as_u16()))
    }
}
