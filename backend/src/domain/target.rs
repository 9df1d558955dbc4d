//! References from reviews and wishlist entries to catalogue entries.
//!
//! A target is addressed by the `(type, id)` pair everywhere. The id is kept
//! opaque: it is not checked against the catalogue.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::category::UnknownLabel;

/// Longest accepted target identifier.
pub const TARGET_ID_MAX: usize = 128;

/// Kind of catalogue entry a target points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetType {
    Event,
    Location,
}

impl TargetType {
    /// Stored label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Event => "event",
            Self::Location => "location",
        }
    }
}

impl fmt::Display for TargetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TargetType {
    type Err = UnknownLabel;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "event" => Ok(Self::Event),
            "location" => Ok(Self::Location),
            _ => Err(UnknownLabel {
                kind: "target type",
                value: raw.to_owned(),
            }),
        }
    }
}

/// Why a target id was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TargetIdError {
    #[error("target id must not be empty")]
    Empty,
    #[error("target id must be at most {max} characters")]
    TooLong { max: usize },
}

/// Identifier of the referenced event or location.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TargetId(String);

impl TargetId {
    /// Validate and wrap an identifier.
    ///
    /// # Errors
    /// Rejects blank or oversized identifiers.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, TargetIdError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TargetIdError::Empty);
        }
        if trimmed.chars().count() > TARGET_ID_MAX {
            return Err(TargetIdError::TooLong { max: TARGET_ID_MAX });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Composite target key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Target {
    pub target_type: TargetType,
    pub target_id: TargetId,
}

impl Target {
    /// Pair a type with an id.
    #[must_use]
    pub const fn new(target_type: TargetType, target_id: TargetId) -> Self {
        Self {
            target_type,
            target_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Event", TargetType::Event)]
    #[case(" location", TargetType::Location)]
    fn target_types_parse_loosely(#[case] raw: &str, #[case] expected: TargetType) {
        assert_eq!(raw.parse::<TargetType>(), Ok(expected));
    }

    #[test]
    fn unknown_target_type_is_rejected() {
        assert!("itinerary".parse::<TargetType>().is_err());
    }

    #[test]
    fn target_ids_are_trimmed_and_opaque() {
        let id = TargetId::new(" event-123 ").expect("valid id");
        assert_eq!(id.as_str(), "event-123");
        assert_eq!(TargetId::new("\t"), Err(TargetIdError::Empty));
    }
}
