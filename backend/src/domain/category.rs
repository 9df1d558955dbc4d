//! Closed label sets used to classify locations and events.
//!
//! Every enumeration round-trips through its stored label (`as_str` /
//! `FromStr`), and parsing is case-insensitive. The `food&drink` label keeps
//! its ampersand on the wire and in the store.

use serde::{Deserialize, Serialize};

/// Raised when a label does not belong to the expected enumeration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} '{value}'")]
pub struct UnknownLabel {
    /// Name of the enumeration, e.g. `location category`.
    pub kind: &'static str,
    /// Rejected input.
    pub value: String,
}

macro_rules! label_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $( $(#[$variant_meta:meta])* $variant:ident => $label:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl $name {
            /// Every member, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Stored label of every member, in declaration order.
            pub const LABELS: &'static [&'static str] = &[$($label),+];

            /// Stored label.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $label,)+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = UnknownLabel;

            fn from_str(raw: &str) -> Result<Self, Self::Err> {
                let trimmed = raw.trim();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|member| member.as_str().eq_ignore_ascii_case(trimmed))
                    .ok_or_else(|| UnknownLabel {
                        kind: $kind,
                        value: raw.to_owned(),
                    })
            }
        }
    };
}

label_enum! {
    /// Category stored on a location.
    LocationCategory, "location category" {
        /// Museums, monuments, galleries.
        Cultural => "cultural",
        /// Restaurants, cafes, bars serving food.
        FoodAndDrink => "food&drink",
        /// Parks, sports, outdoor things to do.
        Activities => "activities",
        /// Clubs and late venues.
        Nightlife => "nightlife",
    }
}

label_enum! {
    /// Main category stored on an event.
    EventCategory, "event category" {
        /// Festivals, concerts, shows.
        Events => "events",
        /// Workshops, tours, sport.
        Activities => "activities",
        /// Tastings and food markets.
        FoodAndDrink => "food&drink",
        /// Parties and club nights.
        Nightlife => "nightlife",
        /// Exhibitions, theatre, heritage.
        Culture => "culture",
    }
}

label_enum! {
    /// Finer-grained event classification.
    EventSubCategory, "event sub-category" {
        Festival => "festival",
        Concert => "concert",
        Exhibition => "exhibition",
        Standup => "standup",
        Theater => "theater",
        Film => "film",
        Dance => "dance",
        Meetup => "meetup",
        Museum => "museum",
        Monument => "monument",
        Gallery => "gallery",
        Activity => "activity",
    }
}

label_enum! {
    /// Filter key selected by a client; `all` disables category matching.
    #[derive(Default)]
    CategoryFilter, "category" {
        #[default]
        All => "all",
        Events => "events",
        Activities => "activities",
        FoodAndDrink => "food&drink",
        Nightlife => "nightlife",
        Culture => "culture",
    }
}
