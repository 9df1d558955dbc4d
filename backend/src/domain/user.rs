//! Local user records bound one-to-one to an external identity.

use std::fmt;

use super::ids::UserId;

/// Longest accepted external identifier or username.
pub const IDENTIFIER_MAX: usize = 255;

/// Validation errors for user fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    /// The provider id was blank after trimming.
    EmptyExternalId,
    /// The provider id exceeded `max` characters.
    ExternalIdTooLong { max: usize },
    /// The username was blank after trimming.
    EmptyUsername,
    /// The username exceeded `max` characters.
    UsernameTooLong { max: usize },
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyExternalId => write!(f, "external user id must not be empty"),
            Self::ExternalIdTooLong { max } => {
                write!(f, "external user id must be at most {max} characters")
            }
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::UsernameTooLong { max } => {
                write!(f, "username must be at most {max} characters")
            }
        }
    }
}

impl std::error::Error for UserValidationError {}

fn bounded(
    raw: &str,
    empty: UserValidationError,
    too_long: UserValidationError,
) -> Result<String, UserValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(empty);
    }
    if trimmed.chars().count() > IDENTIFIER_MAX {
        return Err(too_long);
    }
    Ok(trimmed.to_owned())
}

/// Opaque account identifier issued by the authentication provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExternalUserId(String);

impl ExternalUserId {
    /// Validate and wrap a provider identifier.
    ///
    /// # Errors
    /// Rejects blank or oversized identifiers.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, UserValidationError> {
        bounded(
            raw.as_ref(),
            UserValidationError::EmptyExternalId,
            UserValidationError::ExternalIdTooLong {
                max: IDENTIFIER_MAX,
            },
        )
        .map(Self)
    }

    /// Borrow the identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Deterministic username used when the provider supplies none:
    /// `user_` followed by the first eight characters of the identifier.
    #[must_use]
    pub fn fallback_username(&self) -> Username {
        let prefix: String = self.0.chars().take(8).collect();
        Username(format!("user_{prefix}"))
    }
}

impl fmt::Display for ExternalUserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Unique public handle.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    /// Validate and wrap a username.
    ///
    /// # Errors
    /// Rejects blank or oversized usernames.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, UserValidationError> {
        bounded(
            raw.as_ref(),
            UserValidationError::EmptyUsername,
            UserValidationError::UsernameTooLong {
                max: IDENTIFIER_MAX,
            },
        )
        .map(Self)
    }

    /// Borrow the username.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Profile fields copied from the provider onto the local record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub username: Username,
    pub display_name: String,
    /// Empty when the provider has no address on file.
    pub email: String,
}

/// Application user.
///
/// ## Invariants
/// - `external_id` is unique across users.
/// - `username` is unique across users.
/// - `email` is unique across users when non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    external_id: ExternalUserId,
    profile: UserProfile,
}

impl User {
    /// Assemble a user from its parts.
    #[must_use]
    pub const fn new(id: UserId, external_id: ExternalUserId, profile: UserProfile) -> Self {
        Self {
            id,
            external_id,
            profile,
        }
    }

    /// Local identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Provider identifier.
    #[must_use]
    pub const fn external_id(&self) -> &ExternalUserId {
        &self.external_id
    }

    /// Current profile fields.
    #[must_use]
    pub const fn profile(&self) -> &UserProfile {
        &self.profile
    }

    /// Username.
    #[must_use]
    pub fn username(&self) -> &str {
        self.profile.username.as_str()
    }

    /// Display name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.profile.display_name
    }

    /// Email address, possibly empty.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.profile.email
    }

    /// Copy of this user carrying a refreshed profile.
    #[must_use]
    pub fn with_profile(&self, profile: UserProfile) -> Self {
        Self {
            id: self.id,
            external_id: self.external_id.clone(),
            profile,
        }
    }
}
