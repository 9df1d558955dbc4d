//! The caller as described by the authentication provider.

use super::user::{ExternalUserId, UserProfile, UserValidationError, Username};

/// Display name used when the provider has neither a first nor a last name.
pub const ANONYMOUS_DISPLAY_NAME: &str = "Anonymous";

/// Verified external identity plus the optional profile fields that came
/// with it. Blank optional fields are stored as `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalIdentity {
    external_id: ExternalUserId,
    username: Option<String>,
    first_name: Option<String>,
    last_name: Option<String>,
    email: Option<String>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_owned())
        .filter(|text| !text.is_empty())
}

impl ExternalIdentity {
    /// Identity with no profile fields.
    ///
    /// # Errors
    /// Rejects a blank external identifier.
    pub fn new(external_id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        Ok(Self {
            external_id: ExternalUserId::new(external_id)?,
            username: None,
            first_name: None,
            last_name: None,
            email: None,
        })
    }

    /// Attach a provider username.
    #[must_use]
    pub fn with_username(mut self, username: Option<String>) -> Self {
        self.username = non_blank(username);
        self
    }

    /// Attach first and last names.
    #[must_use]
    pub fn with_names(mut self, first: Option<String>, last: Option<String>) -> Self {
        self.first_name = non_blank(first);
        self.last_name = non_blank(last);
        self
    }

    /// Attach an email address.
    #[must_use]
    pub fn with_email(mut self, email: Option<String>) -> Self {
        self.email = non_blank(email);
        self
    }

    /// Provider identifier.
    #[must_use]
    pub const fn external_id(&self) -> &ExternalUserId {
        &self.external_id
    }

    /// Profile for a local user, applying defaults for absent fields:
    /// fallback username, `"first last"` trimmed or `Anonymous`, and an
    /// empty email.
    #[must_use]
    pub fn profile(&self) -> UserProfile {
        let username = self
            .username
            .as_deref()
            .and_then(|raw| Username::new(raw).ok())
            .unwrap_or_else(|| self.external_id.fallback_username());
        let full_name = format!(
            "{} {}",
            self.first_name.as_deref().unwrap_or_default(),
            self.last_name.as_deref().unwrap_or_default()
        );
        let display_name = match full_name.trim() {
            "" => ANONYMOUS_DISPLAY_NAME.to_owned(),
            name => name.to_owned(),
        };
        UserProfile {
            username,
            display_name,
            email: self.email.clone().unwrap_or_default(),
        }
    }
}
