//! Unified category and free-text filtering over locations and events.
//!
//! Locations and events carry different category enumerations under
//! different field names. [`TAXONOMY`] records, per entity kind, which field
//! holds the label and how labels that differ from the filter keys translate
//! (a location's `cultural` is the `culture` bucket). Labels without an alias
//! match a filter key literally, ignoring case. Adding an entity kind or a
//! renamed label is a table edit; the predicates below never branch on kind.

use serde::Serialize;

use super::catalogue::{Event, Location};
use super::category::{CategoryFilter, EventCategory, EventSubCategory, LocationCategory};
use super::ids::{EventId, LocationId};

/// Maximum number of quick suggestions returned while a user types.
pub const SUGGESTION_LIMIT: usize = 3;

/// Entity kinds that participate in the shared taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    /// A dated happening.
    Event,
    /// A place.
    Location,
}

/// How one entity kind maps its category label onto filter keys.
#[derive(Debug)]
pub struct TaxonomyRule {
    /// Entity kind this rule describes.
    pub kind: EntityKind,
    /// Name of the field holding the category label.
    pub category_field: &'static str,
    /// Labels that do not equal their filter key.
    pub aliases: &'static [(&'static str, CategoryFilter)],
}

/// Translation table for every classified entity kind.
pub static TAXONOMY: [TaxonomyRule; 2] = [
    TaxonomyRule {
        kind: EntityKind::Event,
        category_field: "mainCategory",
        aliases: &[],
    },
    TaxonomyRule {
        kind: EntityKind::Location,
        category_field: "category",
        aliases: &[("cultural", CategoryFilter::Culture)],
    },
];

impl TaxonomyRule {
    /// Filter bucket a stored label belongs to, if any.
    ///
    /// `all` is never a bucket: it selects everything instead.
    #[must_use]
    pub fn bucket_for(&self, label: &str) -> Option<CategoryFilter> {
        let label = label.trim();
        self.aliases
            .iter()
            .find(|(alias, _)| alias.eq_ignore_ascii_case(label))
            .map(|(_, bucket)| *bucket)
            .or_else(|| label.parse::<CategoryFilter>().ok())
            .filter(|bucket| *bucket != CategoryFilter::All)
    }
}

/// Rule registered for `kind`.
#[must_use]
pub fn rule_for(kind: EntityKind) -> Option<&'static TaxonomyRule> {
    TAXONOMY.iter().find(|rule| rule.kind == kind)
}

/// Field extraction for anything that can be filtered.
pub trait Classified {
    /// Taxonomy entry for this type.
    const KIND: EntityKind;

    /// Every label the category field can hold.
    const LABELS: &'static [&'static str];

    /// Stored category label.
    fn category_label(&self) -> &str;

    /// Name shown to users and matched by free text.
    fn display_name(&self) -> &str;
}

impl Classified for Location {
    const KIND: EntityKind = EntityKind::Location;
    const LABELS: &'static [&'static str] = LocationCategory::LABELS;

    fn category_label(&self) -> &str {
        self.category.as_str()
    }

    fn display_name(&self) -> &str {
        &self.name
    }
}

impl Classified for Event {
    const KIND: EntityKind = EntityKind::Event;
    const LABELS: &'static [&'static str] = EventCategory::LABELS;

    fn category_label(&self) -> &str {
        self.main_category.as_str()
    }

    fn display_name(&self) -> &str {
        &self.title
    }
}

/// Category half of the predicate.
#[must_use]
pub fn matches_category<T: Classified>(filter: CategoryFilter, item: &T) -> bool {
    match filter {
        CategoryFilter::All => true,
        key => {
            rule_for(T::KIND).and_then(|rule| rule.bucket_for(item.category_label())) == Some(key)
        }
    }
}

/// Stored labels of `T` that fall in `filter`, or `None` when `filter` is
/// `all`. Adapters that filter in their query language use this instead of
/// re-deriving the table.
#[must_use]
pub fn labels_in<T: Classified>(filter: CategoryFilter) -> Option<Vec<&'static str>> {
    if filter == CategoryFilter::All {
        return None;
    }
    let rule = rule_for(T::KIND);
    Some(
        T::LABELS
            .iter()
            .copied()
            .filter(|label| rule.and_then(|rule| rule.bucket_for(label)) == Some(filter))
            .collect(),
    )
}

/// Free-text half of the predicate: case-insensitive substring of the name.
#[must_use]
pub fn matches_text<T: Classified>(term: &str, item: &T) -> bool {
    let term = term.trim();
    term.is_empty()
        || item
            .display_name()
            .to_lowercase()
            .contains(&term.to_lowercase())
}

/// Explicit category plus text parameters for one search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    /// Bucket to match, or `all`.
    pub category: CategoryFilter,
    /// Name or title substring; blank matches everything.
    pub text: String,
}

impl SearchQuery {
    /// Build a query from its parts.
    pub fn new(category: CategoryFilter, text: impl Into<String>) -> Self {
        Self {
            category,
            text: text.into(),
        }
    }

    /// Whether `item` passes this query's category and text.
    #[must_use]
    pub fn admits<T: Classified>(&self, item: &T) -> bool {
        matches_category(self.category, item) && matches_text(&self.text, item)
    }

    /// The same text under the category that applies to locations in a
    /// full search: the `events` view does not narrow places.
    #[must_use]
    pub fn for_locations_view(&self) -> Self {
        let category = match self.category {
            CategoryFilter::Events => CategoryFilter::All,
            other => other,
        };
        Self::new(category, self.text.clone())
    }

    /// Stored labels of `T` admitted by the category half.
    #[must_use]
    pub fn category_labels<T: Classified>(&self) -> Option<Vec<&'static str>> {
        labels_in::<T>(self.category)
    }

    /// Trimmed text, or `None` when blank.
    #[must_use]
    pub fn text_term(&self) -> Option<&str> {
        Some(self.text.trim()).filter(|term| !term.is_empty())
    }
}

/// Event listing restriction: a [`SearchQuery`] plus an optional
/// sub-category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventFilter {
    /// Main-category bucket and title text.
    pub query: SearchQuery,
    /// Exact sub-category, when narrowed.
    pub sub_category: Option<EventSubCategory>,
}

impl EventFilter {
    /// Narrow to one sub-category.
    #[must_use]
    pub fn with_sub_category(mut self, sub_category: Option<EventSubCategory>) -> Self {
        self.sub_category = sub_category;
        self
    }

    /// Whether `event` passes every restriction.
    #[must_use]
    pub fn admits(&self, event: &Event) -> bool {
        self.query.admits(event)
            && self
                .sub_category
                .is_none_or(|wanted| event.sub_category == wanted)
    }
}

impl From<SearchQuery> for EventFilter {
    fn from(query: SearchQuery) -> Self {
        Self {
            query,
            sub_category: None,
        }
    }
}

/// Output of a full search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchResults {
    /// Matching places.
    pub locations: Vec<Location>,
    /// Matching events.
    pub events: Vec<Event>,
}

/// Full, uncapped search.
///
/// The `events` view lists every location matching the text, ignoring the
/// category, next to the events in that category.
#[must_use]
pub fn search(query: &SearchQuery, locations: Vec<Location>, events: Vec<Event>) -> SearchResults {
    let places = query.for_locations_view();
    SearchResults {
        locations: locations
            .into_iter()
            .filter(|location| places.admits(location))
            .collect(),
        events: events
            .into_iter()
            .filter(|event| query.admits(event))
            .collect(),
    }
}

/// One row of the live-typing dropdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Suggestion {
    /// A place, labelled by its name.
    Location { id: LocationId, name: String },
    /// An event, labelled by its title.
    Event { id: EventId, title: String },
}

impl Suggestion {
    /// Entity kind behind the suggestion.
    #[must_use]
    pub const fn kind(&self) -> EntityKind {
        match self {
            Self::Location { .. } => EntityKind::Location,
            Self::Event { .. } => EntityKind::Event,
        }
    }

    /// Text shown in the dropdown.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Location { name, .. } => name,
            Self::Event { title, .. } => title,
        }
    }
}

/// Capped quick suggestions: locations first, then events, at most
/// [`SUGGESTION_LIMIT`] in total. Both kinds honour the category.
#[must_use]
pub fn suggest(query: &SearchQuery, locations: &[Location], events: &[Event]) -> Vec<Suggestion> {
    let locations = locations
        .iter()
        .filter(|location| query.admits(*location))
        .take(SUGGESTION_LIMIT)
        .map(|location| Suggestion::Location {
            id: location.id,
            name: location.name.clone(),
        });
    let events = events
        .iter()
        .filter(|event| query.admits(*event))
        .take(SUGGESTION_LIMIT)
        .map(|event| Suggestion::Event {
            id: event.id,
            title: event.title.clone(),
        });
    locations.chain(events).take(SUGGESTION_LIMIT).collect()
}

#[cfg(test)]
mod tests;
