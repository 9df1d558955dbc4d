//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `migrations/` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Local users bound to identity provider accounts.
    users (id) {
        id -> Uuid,
        /// Provider subject; unique.
        external_id -> Varchar,
        /// Unique handle.
        username -> Varchar,
        display_name -> Text,
        /// Empty when unknown; unique among non-empty values.
        email -> Text,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Points of interest.
    locations (id) {
        id -> Uuid,
        name -> Text,
        description -> Nullable<Text>,
        address -> Text,
        latitude -> Numeric,
        longitude -> Numeric,
        image_url -> Nullable<Text>,
        category -> Varchar,
    }
}

diesel::table! {
    /// Scheduled events hosted at a location.
    events (id) {
        id -> Uuid,
        /// Unique.
        title -> Text,
        description -> Nullable<Text>,
        starts_at -> Timestamptz,
        ends_at -> Timestamptz,
        location_id -> Uuid,
        main_category -> Varchar,
        sub_category -> Varchar,
        image_url -> Nullable<Text>,
        price -> Numeric,
        capacity -> Nullable<Int4>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Ticket purchases.
    event_reservations (id) {
        id -> Uuid,
        user_id -> Uuid,
        event_id -> Uuid,
        quantity -> Int4,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    reviews (id) {
        id -> Uuid,
        user_id -> Uuid,
        target_type -> Varchar,
        target_id -> Varchar,
        rating -> Int2,
        comment -> Nullable<Text>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    wishlist (id) {
        id -> Uuid,
        user_id -> Uuid,
        target_type -> Varchar,
        target_id -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// FAQ submissions.
    questions (id) {
        id -> Uuid,
        name -> Text,
        email -> Nullable<Text>,
        question -> Text,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(events -> locations (location_id));
diesel::joinable!(event_reservations -> events (event_id));
diesel::joinable!(event_reservations -> users (user_id));
diesel::joinable!(reviews -> users (user_id));
diesel::joinable!(wishlist -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(
    users,
    locations,
    events,
    event_reservations,
    reviews,
    wishlist,
    questions,
);
