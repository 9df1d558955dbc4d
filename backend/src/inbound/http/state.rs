//! Shared HTTP adapter state.
//!
//! Handlers receive this bundle through `web::Data` and only ever talk to
//! the driving ports, so they can be exercised without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    CatalogueQuery, IdentitySyncCommand, QuestionCommand, QuestionQuery, ReservationCommand,
    ReservationQuery, ReviewCommand, ReviewQuery, WishlistCommand, WishlistQuery,
};

/// Parameter object bundling the port implementations.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub catalogue: Arc<dyn CatalogueQuery>,
    pub reservations: Arc<dyn ReservationCommand>,
    pub reservations_query: Arc<dyn ReservationQuery>,
    pub reviews: Arc<dyn ReviewCommand>,
    pub reviews_query: Arc<dyn ReviewQuery>,
    pub wishlist: Arc<dyn WishlistCommand>,
    pub wishlist_query: Arc<dyn WishlistQuery>,
    pub questions: Arc<dyn QuestionCommand>,
    pub questions_query: Arc<dyn QuestionQuery>,
    pub identity_sync: Arc<dyn IdentitySyncCommand>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub catalogue: Arc<dyn CatalogueQuery>,
    pub reservations: Arc<dyn ReservationCommand>,
    pub reservations_query: Arc<dyn ReservationQuery>,
    pub reviews: Arc<dyn ReviewCommand>,
    pub reviews_query: Arc<dyn ReviewQuery>,
    pub wishlist: Arc<dyn WishlistCommand>,
    pub wishlist_query: Arc<dyn WishlistQuery>,
    pub questions: Arc<dyn QuestionCommand>,
    pub questions_query: Arc<dyn QuestionQuery>,
    pub identity_sync: Arc<dyn IdentitySyncCommand>,
    identity_sync_secret: Option<String>,
}

impl HttpState {
    /// Build state from a ports bundle. Identity sync stays closed until a
    /// secret is configured with [`Self::with_identity_sync_secret`].
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            catalogue,
            reservations,
            reservations_query,
            reviews,
            reviews_query,
            wishlist,
            wishlist_query,
            questions,
            questions_query,
            identity_sync,
        } = ports;
        Self {
            catalogue,
            reservations,
            reservations_query,
            reviews,
            reviews_query,
            wishlist,
            wishlist_query,
            questions,
            questions_query,
            identity_sync,
            identity_sync_secret: None,
        }
    }

    /// Set the shared secret required by the identity sync webhook. Blank
    /// secrets are treated as unset.
    #[must_use]
    pub fn with_identity_sync_secret(mut self, secret: Option<String>) -> Self {
        self.identity_sync_secret = secret.filter(|value| !value.trim().is_empty());
        self
    }

    pub(crate) fn identity_sync_secret(&self) -> Option<&str> {
        self.identity_sync_secret.as_deref()
    }
}
