//! User directory reconciliation service.
//!
//! Adds and edits are checked against the shared [`UserStore`] before the
//! configured [`WriteStrategy`] confirms them. Every refusal or failure is
//! reported through the [`NotificationSink`] and leaves the cache as it was.

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::error::ReconcileError;
use super::ports::{ConfirmationPrompt, Notice, NotificationSink, RemoteSourceError, UserSource};
use super::search::{SearchOptions, filter_users};
use super::user::{User, UserId};
use super::user_store::{UserConflict, UserStore};
use super::write_strategy::WriteStrategy;

const DELETE_PROMPT_TITLE: &str = "Confirm Deletion";
const DELETE_PROMPT_MESSAGE: &str = "Are you sure you want to delete this user?";

/// Result of a [`UserDirectoryService::delete_user`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The user declined the prompt; nothing changed.
    Declined,
    /// The user confirmed; `removed` records were dropped.
    Deleted {
        /// Number of cached records that carried the id.
        removed: usize,
    },
}

/// Add, edit, delete and refresh operations over the shared user cache.
#[derive(Clone)]
pub struct UserDirectoryService<S, N> {
    store: Arc<UserStore>,
    source: Arc<S>,
    notifier: Arc<N>,
    writes: Arc<dyn WriteStrategy>,
}

impl<S, N> UserDirectoryService<S, N> {
    /// Create a service over `store`.
    pub fn new(
        store: Arc<UserStore>,
        source: Arc<S>,
        notifier: Arc<N>,
        writes: Arc<dyn WriteStrategy>,
    ) -> Self {
        Self {
            store,
            source,
            notifier,
            writes,
        }
    }

    /// Shared cache this service reconciles.
    pub fn store(&self) -> &Arc<UserStore> {
        &self.store
    }
}

impl<S, N> UserDirectoryService<S, N>
where
    S: UserSource,
    N: NotificationSink,
{
    fn refuse(&self, conflict: UserConflict) -> ReconcileError {
        warn!(field = conflict.field(), "user write refused: {conflict}");
        self.notifier.notify(Notice::warning(conflict.to_string()));
        ReconcileError::Conflict(conflict)
    }

    fn remote_failure(&self, error: RemoteSourceError, notice: &str) -> ReconcileError {
        warn!(%error, mode = %self.writes.mode(), "remote source call failed");
        self.notifier.notify(Notice::error(notice));
        ReconcileError::Remote(error)
    }

    /// Append `candidate` unless its id, email or username is already taken.
    ///
    /// # Errors
    ///
    /// Returns [`ReconcileError::Conflict`] for a duplicate (checked again
    /// against the record the write strategy confirms) and
    /// [`ReconcileError::Remote`] when the confirming call fails.
    pub async fn add_user(&self, candidate: User) -> Result<User, ReconcileError> {
        let mut cache = self.store.lock().await;
        if let Some(conflict) = cache.conflict_for_insert(&candidate) {
            return Err(self.refuse(conflict));
        }

        let confirmed = match self.writes.confirm_create(&candidate).await {
            Ok(user) => user,
            Err(error) => return Err(self.remote_failure(error, "Failed to add user.")),
        };
        if let Some(conflict) = cache.conflict_for_insert(&confirmed) {
            return Err(self.refuse(conflict));
        }

        cache.push(confirmed.clone());
        info!(user_id = %confirmed.id(), count = cache.len(), "user added");
        self.notifier.notify(Notice::success(format!(
            "User \"{}\" added successfully.",
            confirmed.name()
        )));
        Ok(confirmed)
    }

    /// Replace the cached record that shares `updated`'s id.
    ///
    /// # Errors
    ///
    /// Returns [`ReconcileError::NotFound`] when the id is not cached,
    /// [`ReconcileError::NoChanges`] when nothing differs,
    /// [`ReconcileError::Conflict`] when another record holds the email or
    /// username, and [`ReconcileError::Remote`] when confirmation fails.
    pub async fn edit_user(&self, updated: User) -> Result<User, ReconcileError> {
        let id = updated.id();
        let mut cache = self.store.lock().await;
        let Some(index) = cache.position(id) else {
            debug!(user_id = %id, "edit target missing");
            self.notifier.notify(Notice::warning("User not found."));
            return Err(ReconcileError::NotFound { id });
        };

        if cache
            .get(id)
            .is_some_and(|existing| existing.has_same_values(&updated))
        {
            debug!(user_id = %id, "edit carried no changes");
            self.notifier.notify(Notice::info("No changes were made."));
            return Err(ReconcileError::NoChanges { id });
        }

        if let Some(conflict) = cache.conflict_for_update(&updated) {
            return Err(self.refuse(conflict));
        }

        let confirmed = match self.writes.confirm_update(&updated).await {
            Ok(user) => user,
            Err(error) => return Err(self.remote_failure(error, "Failed to update user.")),
        };
        if confirmed.id() != id {
            return Err(self.remote_failure(
                RemoteSourceError::decode(format!(
                    "update of user {id} was confirmed for user {}",
                    confirmed.id()
                )),
                "Failed to update user.",
            ));
        }
        if let Some(conflict) = cache.conflict_for_update(&confirmed) {
            return Err(self.refuse(conflict));
        }

        cache.replace_at(index, confirmed.clone());
        info!(user_id = %id, "user updated");
        self.notifier.notify(Notice::success(format!(
            "User \"{}\" updated successfully.",
            confirmed.name()
        )));
        Ok(confirmed)
    }

    /// Remove every cached record with `id` after the user confirms.
    ///
    /// Deletion is local only; the remote source is never called.
    pub async fn delete_user(&self, id: UserId) -> DeleteOutcome {
        let prompt = ConfirmationPrompt::new(DELETE_PROMPT_TITLE, DELETE_PROMPT_MESSAGE);
        if !self.notifier.confirm(prompt).await {
            debug!(user_id = %id, "deletion declined");
            return DeleteOutcome::Declined;
        }

        let removed = self.store.lock().await.remove(id);
        info!(user_id = %id, removed, "user deleted");
        self.notifier
            .notify(Notice::success(format!("User ID {id} deleted.")));
        DeleteOutcome::Deleted { removed }
    }

    /// Replace the whole cache with the remote user list.
    ///
    /// # Errors
    ///
    /// Returns [`ReconcileError::Remote`] when the fetch fails; the cache is
    /// left unchanged.
    pub async fn refresh(&self) -> Result<usize, ReconcileError> {
        let mut cache = self.store.lock().await;
        match self.source.fetch_all_users().await {
            Ok(users) => {
                cache.replace_all(users);
                debug!(count = cache.len(), "users refreshed");
                Ok(cache.len())
            }
            Err(error) => Err(self.remote_failure(error, "Failed to refresh users.")),
        }
    }

    /// Initial load: like [`Self::refresh`] but announces success as well and
    /// records the failure message on the store.
    ///
    /// # Errors
    ///
    /// Returns [`ReconcileError::Remote`] when the fetch fails.
    pub async fn load(&self) -> Result<usize, ReconcileError> {
        let mut cache = self.store.lock().await;
        match self.source.fetch_all_users().await {
            Ok(users) => {
                cache.replace_all(users);
                info!(count = cache.len(), "users loaded");
                self.notifier
                    .notify(Notice::success("User data loaded successfully!"));
                Ok(cache.len())
            }
            Err(error) => {
                cache.record_load_error("Failed to load users.");
                Err(self.remote_failure(error, "Error loading user data."))
            }
        }
    }

    /// Cached record with `id`.
    ///
    /// # Errors
    ///
    /// Returns [`ReconcileError::NotFound`] when the id is not cached.
    pub async fn find_user(&self, id: UserId) -> Result<User, ReconcileError> {
        match self.store.find(id).await {
            Some(user) => Ok(user),
            None => {
                debug!(user_id = %id, "lookup target missing");
                self.notifier.notify(Notice::warning("User not found."));
                Err(ReconcileError::NotFound { id })
            }
        }
    }

    /// Cached users matching `query`, in display order.
    pub async fn search(&self, query: &str, options: SearchOptions) -> Vec<User> {
        let cache = self.store.lock().await;
        filter_users(cache.users(), query, options)
            .into_iter()
            .cloned()
            .collect()
    }
}

#[cfg(test)]
#[path = "user_directory_service_tests.rs"]
mod tests;
