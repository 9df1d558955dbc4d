//! Strongly typed UUID identifiers for stored entities.

macro_rules! define_uuid_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord,
            serde::Serialize, serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(uuid::Uuid);

        impl $name {
            /// Fresh random identifier.
            #[must_use]
            pub fn random() -> Self {
                Self(uuid::Uuid::new_v4())
            }

            /// Wrap an existing UUID.
            #[must_use]
            pub const fn from_uuid(uuid: uuid::Uuid) -> Self {
                Self(uuid)
            }

            /// Inner UUID.
            #[must_use]
            pub const fn as_uuid(&self) -> &uuid::Uuid {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                self.0.fmt(f)
            }
        }

        impl std::str::FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                uuid::Uuid::parse_str(s.trim()).map(Self)
            }
        }
    };
}

define_uuid_id!(
    /// Local user identifier.
    UserId
);
define_uuid_id!(
    /// Location identifier.
    LocationId
);
define_uuid_id!(
    /// Event identifier.
    EventId
);
define_uuid_id!(
    /// Review identifier.
    ReviewId
);
define_uuid_id!(
    /// Wishlist entry identifier.
    WishlistEntryId
);
define_uuid_id!(
    /// Ticket reservation identifier.
    ReservationId
);
define_uuid_id!(
    /// FAQ question identifier.
    QuestionId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_with_surrounding_whitespace() {
        let id: EventId = " 7c9e6679-7425-40de-944b-e07fc1f90ae7 "
            .parse()
            .expect("valid id");
        assert_eq!(id.to_string(), "7c9e6679-7425-40de-944b-e07fc1f90ae7");
    }

    #[test]
    fn serialises_as_bare_uuid_string() {
        let id = LocationId::from_uuid(uuid::Uuid::nil());
        let json = serde_json::to_string(&id).expect("serialise id");
        assert_eq!(json, "\"00000000-0000-0000-0000-000000000000\"");
    }
}
