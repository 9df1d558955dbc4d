//! Behavioural coverage for the taxonomy table and the filter engine.

use rstest::{fixture, rstest};
use rstest_bdd_macros::{given, then, when};

use super::*;
use crate::domain::category::{EventCategory, LocationCategory};
use crate::domain::test_support::{event, location};

#[derive(Debug, Clone)]
struct Catalogue {
    locations: Vec<Location>,
    events: Vec<Event>,
}

#[fixture]
fn catalogue() -> Catalogue {
    let athenaeum = location("Romanian Athenaeum", LocationCategory::Cultural);
    let caru = location("Caru' cu Bere", LocationCategory::FoodAndDrink);
    let park = location("Herastrau Park", LocationCategory::Activities);
    let club = location("Control Club", LocationCategory::Nightlife);
    let events = vec![
        event("Jazz in the Park", EventCategory::Events, &park),
        event("Design Week", EventCategory::Culture, &athenaeum),
        event("Craft Beer Tasting", EventCategory::FoodAndDrink, &caru),
        event("Techno Night", EventCategory::Nightlife, &club),
        event("Park Run", EventCategory::Activities, &park),
    ];
    Catalogue {
        locations: vec![athenaeum, caru, park, club],
        events,
    }
}

fn names(locations: &[Location]) -> Vec<&str> {
    locations.iter().map(|l| l.name.as_str()).collect()
}

fn titles(events: &[Event]) -> Vec<&str> {
    events.iter().map(|e| e.title.as_str()).collect()
}

#[rstest]
#[case(EntityKind::Location, "cultural", Some(CategoryFilter::Culture))]
#[case(EntityKind::Location, "CULTURAL", Some(CategoryFilter::Culture))]
#[case(EntityKind::Location, "food&drink", Some(CategoryFilter::FoodAndDrink))]
#[case(EntityKind::Location, "all", None)]
#[case(EntityKind::Event, "culture", Some(CategoryFilter::Culture))]
#[case(EntityKind::Event, "Nightlife", Some(CategoryFilter::Nightlife))]
#[case(EntityKind::Event, "cultural", None)]
fn table_translates_labels_to_buckets(
    #[case] kind: EntityKind,
    #[case] label: &str,
    #[case] expected: Option<CategoryFilter>,
) {
    let rule = rule_for(kind).expect("every kind has a rule");
    assert_eq!(rule.bucket_for(label), expected);
}

#[test]
fn table_names_the_category_field_per_kind() {
    let fields: Vec<_> = TAXONOMY
        .iter()
        .map(|rule| (rule.kind, rule.category_field))
        .collect();
    assert_eq!(
        fields,
        vec![
            (EntityKind::Event, "mainCategory"),
            (EntityKind::Location, "category"),
        ]
    );
}

#[rstest]
fn culture_selects_exactly_cultural_locations(catalogue: Catalogue) {
    let results = search(
        &SearchQuery::new(CategoryFilter::Culture, ""),
        catalogue.locations,
        catalogue.events,
    );
    assert!(
        results
            .locations
            .iter()
            .all(|l| l.category == LocationCategory::Cultural)
    );
    assert_eq!(names(&results.locations), vec!["Romanian Athenaeum"]);
    assert_eq!(titles(&results.events), vec!["Design Week"]);
}

#[rstest]
#[case(CategoryFilter::Activities, vec!["Park Run"])]
#[case(CategoryFilter::FoodAndDrink, vec!["Craft Beer Tasting"])]
#[case(CategoryFilter::Nightlife, vec!["Techno Night"])]
#[case(CategoryFilter::Events, vec!["Jazz in the Park"])]
fn events_match_their_main_category(
    catalogue: Catalogue,
    #[case] filter: CategoryFilter,
    #[case] expected: Vec<&str>,
) {
    let results = search(
        &SearchQuery::new(filter, "  "),
        catalogue.locations,
        catalogue.events,
    );
    assert_eq!(titles(&results.events), expected);
}

#[rstest]
fn food_and_drink_selects_only_matching_locations(catalogue: Catalogue) {
    let results = search(
        &SearchQuery::new(CategoryFilter::FoodAndDrink, ""),
        catalogue.locations,
        Vec::new(),
    );
    assert_eq!(names(&results.locations), vec!["Caru' cu Bere"]);
}

#[rstest]
fn all_with_blank_text_returns_everything(catalogue: Catalogue) {
    let expected_locations = catalogue.locations.len();
    let expected_events = catalogue.events.len();
    let results = search(&SearchQuery::default(), catalogue.locations, catalogue.events);
    assert_eq!(results.locations.len(), expected_locations);
    assert_eq!(results.events.len(), expected_events);
}

#[rstest]
fn text_matching_ignores_case(catalogue: Catalogue) {
    let results = search(
        &SearchQuery::new(CategoryFilter::All, "PARK"),
        catalogue.locations,
        catalogue.events,
    );
    assert_eq!(names(&results.locations), vec!["Herastrau Park"]);
    assert_eq!(titles(&results.events), vec!["Jazz in the Park", "Park Run"]);
}

#[rstest]
fn events_view_leaves_locations_unfiltered_by_category(catalogue: Catalogue) {
    let results = search(
        &SearchQuery::new(CategoryFilter::Events, ""),
        catalogue.locations,
        catalogue.events,
    );
    assert_eq!(results.locations.len(), 4);
    assert_eq!(titles(&results.events), vec!["Jazz in the Park"]);
}

#[rstest]
fn events_view_still_applies_text_to_locations(catalogue: Catalogue) {
    let results = search(
        &SearchQuery::new(CategoryFilter::Events, "club"),
        catalogue.locations,
        catalogue.events,
    );
    assert_eq!(names(&results.locations), vec!["Control Club"]);
    assert!(results.events.is_empty());
}

#[given("a catalogue with four locations and five events")]
fn a_catalogue_with_four_locations_and_five_events() -> Catalogue {
    catalogue()
}

#[when("the user types nothing into the search box")]
fn the_user_types_nothing(catalogue: Catalogue) -> Vec<Suggestion> {
    suggest(
        &SearchQuery::default(),
        &catalogue.locations,
        &catalogue.events,
    )
}

#[then("three location suggestions are shown")]
fn three_location_suggestions_are_shown(suggestions: Vec<Suggestion>) {
    assert_eq!(suggestions.len(), SUGGESTION_LIMIT);
    assert!(
        suggestions
            .iter()
            .all(|s| s.kind() == EntityKind::Location)
    );
}

#[test]
fn suggestions_are_capped_and_prefer_locations() {
    let catalogue = a_catalogue_with_four_locations_and_five_events();
    let suggestions = the_user_types_nothing(catalogue);
    three_location_suggestions_are_shown(suggestions);
}

#[rstest]
fn suggestions_fill_with_events_after_locations(catalogue: Catalogue) {
    let suggestions = suggest(
        &SearchQuery::new(CategoryFilter::All, "park"),
        &catalogue.locations,
        &catalogue.events,
    );
    let labels: Vec<_> = suggestions.iter().map(Suggestion::label).collect();
    assert_eq!(labels, vec!["Herastrau Park", "Jazz in the Park", "Park Run"]);
}

#[rstest]
fn suggestions_apply_category_to_locations_in_events_view(catalogue: Catalogue) {
    let suggestions = suggest(
        &SearchQuery::new(CategoryFilter::Events, ""),
        &catalogue.locations,
        &catalogue.events,
    );
    let labels: Vec<_> = suggestions.iter().map(Suggestion::label).collect();
    assert_eq!(labels, vec!["Jazz in the Park"]);
}

#[rstest]
#[case(CategoryFilter::Culture, Some(vec!["cultural"]))]
#[case(CategoryFilter::FoodAndDrink, Some(vec!["food&drink"]))]
#[case(CategoryFilter::Events, Some(Vec::new()))]
#[case(CategoryFilter::All, None)]
fn location_labels_follow_the_table(
    #[case] filter: CategoryFilter,
    #[case] expected: Option<Vec<&'static str>>,
) {
    assert_eq!(labels_in::<Location>(filter), expected);
}

#[test]
fn event_labels_match_their_own_bucket() {
    assert_eq!(labels_in::<Event>(CategoryFilter::Culture), Some(vec!["culture"]));
}

#[rstest]
fn labels_agree_with_the_predicate(catalogue: Catalogue) {
    for filter in CategoryFilter::ALL.iter().copied() {
        let query = SearchQuery::new(filter, "");
        let labels = query.category_labels::<Location>();
        for place in &catalogue.locations {
            let listed = labels
                .as_ref()
                .is_none_or(|labels| labels.contains(&place.category.as_str()));
            assert_eq!(listed, query.admits(place), "{filter} vs {}", place.name);
        }
    }
}

#[rstest]
fn event_filter_narrows_by_sub_category(catalogue: Catalogue) {
    let mut tasting = catalogue.events[2].clone();
    tasting.sub_category = EventSubCategory::Meetup;
    let filter = EventFilter::from(SearchQuery::new(CategoryFilter::FoodAndDrink, ""))
        .with_sub_category(Some(EventSubCategory::Meetup));

    assert!(filter.admits(&tasting));
    assert!(!filter.admits(&catalogue.events[2]));
    assert!(!filter.admits(&catalogue.events[0]));
}

#[test]
fn blank_text_has_no_term() {
    assert_eq!(SearchQuery::new(CategoryFilter::All, "   ").text_term(), None);
    assert_eq!(
        SearchQuery::new(CategoryFilter::All, " Park ").text_term(),
        Some("Park")
    );
}
