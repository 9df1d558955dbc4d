//! Removes local users whose provider account no longer exists.
//!
//! The webhook normally deletes users as the provider reports them. When
//! deliveries are lost the stores drift apart; this job compares stored
//! external ids against the provider's live list and deletes the rest
//! through [`UserRepository::delete_by_external_id`], which also drops the
//! reviews, wishlist entries, and reservations they own.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::identity_binder::map_user_persistence_error;
use crate::domain::ports::{IdentityDirectory, IdentityDirectoryError, UserRepository};
use crate::domain::{Error, ExternalUserId};

/// Outcome of one reconciliation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    /// Accounts the provider still knows about.
    pub live: usize,
    /// Users held locally before the pass.
    pub stored: usize,
    /// Local users with no live account, sorted.
    pub stale: Vec<ExternalUserId>,
    /// Users actually deleted; zero on a dry run.
    pub removed: usize,
}

fn map_directory_error(error: IdentityDirectoryError) -> Error {
    match error {
        IdentityDirectoryError::Unavailable { message } => Error::service_unavailable(message),
        IdentityDirectoryError::Decode { message } => Error::internal(message),
    }
}

/// Parse a newline separated id list.
///
/// Blank lines and lines starting with `#` are skipped.
///
/// # Errors
/// Returns [`Error::invalid_request`] naming the first line that is not a
/// valid external id.
pub fn parse_live_ids(raw: &str) -> Result<Vec<ExternalUserId>, Error> {
    raw.lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
        .map(|(number, line)| {
            ExternalUserId::new(line)
                .map_err(|err| Error::invalid_request(format!("line {number}: {err}")))
        })
        .collect()
}

/// Deletes users missing from the provider's directory.
pub struct UserReconciler<U, D> {
    users: Arc<U>,
    directory: Arc<D>,
}

impl<U, D> UserReconciler<U, D>
where
    U: UserRepository,
    D: IdentityDirectory,
{
    /// Create a reconciler over the local users and the provider directory.
    pub const fn new(users: Arc<U>, directory: Arc<D>) -> Self {
        Self { users, directory }
    }

    /// Run one pass. With `dry_run` set nothing is deleted.
    ///
    /// # Errors
    /// An empty live list is refused with [`Error::invalid_request`] since it
    /// would wipe every user. Store and directory failures map to server
    /// errors.
    pub async fn reconcile(&self, dry_run: bool) -> Result<ReconcileReport, Error> {
        let live: HashSet<ExternalUserId> = self
            .directory
            .live_external_ids()
            .await
            .map_err(map_directory_error)?
            .into_iter()
            .collect();
        if live.is_empty() {
            return Err(Error::invalid_request(
                "identity directory listed no accounts; refusing to delete every user",
            ));
        }

        let stored = self
            .users
            .list_external_ids()
            .await
            .map_err(map_user_persistence_error)?;
        let mut stale: Vec<ExternalUserId> = stored
            .iter()
            .filter(|id| !live.contains(*id))
            .cloned()
            .collect();
        stale.sort_by(|a, b| a.as_str().cmp(b.as_str()));

        let mut removed = 0;
        if !dry_run {
            for external_id in &stale {
                if self
                    .users
                    .delete_by_external_id(external_id)
                    .await
                    .map_err(map_user_persistence_error)?
                {
                    removed += 1;
                } else {
                    debug!(%external_id, "stale user already gone");
                }
            }
        }

        info!(
            live = live.len(),
            stored = stored.len(),
            stale = stale.len(),
            removed,
            dry_run,
            "user reconciliation finished"
        );
        Ok(ReconcileReport {
            live: live.len(),
            stored: stored.len(),
            stale,
            removed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::{
        MockIdentityDirectory, MockUserRepository, UserPersistenceError, WishlistRepository,
    };
    use crate::domain::test_support::{identity, reference_time};
    use crate::domain::{Target, TargetId, TargetType, User, UserId, WishlistEntry, WishlistEntryId};
    use crate::outbound::memory::InMemoryStore;
    use rstest::rstest;

    fn ids(raw: &[&str]) -> Vec<ExternalUserId> {
        raw.iter()
            .map(|id| ExternalUserId::new(id).expect("valid id"))
            .collect()
    }

    fn directory_of(raw: &'static [&'static str]) -> MockIdentityDirectory {
        let mut directory = MockIdentityDirectory::new();
        directory
            .expect_live_external_ids()
            .returning(move || Ok(ids(raw)));
        directory
    }

    async fn store_with(raw: &[&str]) -> InMemoryStore {
        let store = InMemoryStore::new();
        for external_id in raw {
            let identity = identity(external_id);
            let user = User::new(
                UserId::random(),
                identity.external_id().clone(),
                identity.profile(),
            );
            UserRepository::insert(&store, &user).await.expect("insert");
        }
        store
    }

    #[rstest]
    fn id_lists_skip_blanks_and_comments() {
        let parsed = parse_live_ids("# exported\nuser_a\n\n  user_b  \n").expect("parses");
        assert_eq!(parsed, ids(&["user_a", "user_b"]));
    }

    #[rstest]
    fn oversized_ids_name_their_line() {
        let raw = format!("user_a\n{}\n", "x".repeat(300));
        let err = parse_live_ids(&raw).expect_err("rejected");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert!(err.message().starts_with("line 2:"), "{}", err.message());
    }

    #[rstest]
    #[tokio::test]
    async fn users_missing_upstream_are_removed_with_what_they_own() {
        let store = Arc::new(store_with(&["user_a", "user_b", "user_c"]).await);
        let gone_id = ExternalUserId::new("user_b").expect("id");
        let gone = UserRepository::find_by_external_id(&*store, &gone_id)
            .await
            .expect("lookup")
            .expect("stored");
        let entry = WishlistEntry {
            id: WishlistEntryId::random(),
            user_id: gone.id(),
            target: Target::new(TargetType::Event, TargetId::new("e1").expect("target id")),
            created_at: reference_time(),
        };
        WishlistRepository::insert(&*store, &entry)
            .await
            .expect("wishlist add");

        let reconciler = UserReconciler::new(
            Arc::clone(&store),
            Arc::new(directory_of(&["user_a", "user_c", "user_z"])),
        );
        let report = reconciler.reconcile(false).await.expect("reconciles");

        assert_eq!(report.live, 3);
        assert_eq!(report.stored, 3);
        assert_eq!(report.stale, ids(&["user_b"]));
        assert_eq!(report.removed, 1);
        let mut left = UserRepository::list_external_ids(&*store).await.expect("list");
        left.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        assert_eq!(left, ids(&["user_a", "user_c"]));
        let saved = WishlistRepository::list_for_user(&*store, &gone.id(), None)
            .await
            .expect("wishlist list");
        assert!(saved.is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn dry_runs_report_without_deleting() {
        let store = Arc::new(store_with(&["user_b", "user_a"]).await);
        let reconciler = UserReconciler::new(Arc::clone(&store), Arc::new(directory_of(&["user_x"])));

        let report = reconciler.reconcile(true).await.expect("reconciles");

        assert_eq!(report.stale, ids(&["user_a", "user_b"]));
        assert_eq!(report.removed, 0);
        let kept = UserRepository::list_external_ids(&*store).await.expect("list");
        assert_eq!(kept.len(), 2);
    }

    #[rstest]
    #[tokio::test]
    async fn an_empty_directory_deletes_nothing() {
        let mut users = MockUserRepository::new();
        users.expect_list_external_ids().never();
        users.expect_delete_by_external_id().never();
        let reconciler = UserReconciler::new(Arc::new(users), Arc::new(directory_of(&[])));

        let err = reconciler.reconcile(false).await.expect_err("refused");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
    }

    #[rstest]
    #[case(IdentityDirectoryError::unavailable("timeout"), ErrorCode::ServiceUnavailable)]
    #[case(IdentityDirectoryError::decode("not json"), ErrorCode::InternalError)]
    #[tokio::test]
    async fn directory_failures_stop_the_pass(
        #[case] failure: IdentityDirectoryError,
        #[case] expected: ErrorCode,
    ) {
        let mut directory = MockIdentityDirectory::new();
        directory
            .expect_live_external_ids()
            .return_once(move || Err(failure));
        let mut users = MockUserRepository::new();
        users.expect_delete_by_external_id().never();
        let reconciler = UserReconciler::new(Arc::new(users), Arc::new(directory));

        let err = reconciler.reconcile(false).await.expect_err("fails");
        assert_eq!(err.code(), expected);
    }

    #[rstest]
    #[tokio::test]
    async fn store_failures_surface_mid_pass() {
        let mut users = MockUserRepository::new();
        users
            .expect_list_external_ids()
            .return_once(|| Ok(ids(&["user_a"])));
        users
            .expect_delete_by_external_id()
            .times(1)
            .return_once(|_| Err(UserPersistenceError::connection("reset")));
        let reconciler = UserReconciler::new(Arc::new(users), Arc::new(directory_of(&["user_b"])));

        let err = reconciler.reconcile(false).await.expect_err("fails");
        assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
    }
}
