//! Reconciliation outcomes that abort an operation.
//!
//! Every variant leaves the local cache untouched. Front ends surface them
//! through the notification sink; callers can also branch on [`ErrorKind`].

use thiserror::Error;

use super::ports::RemoteSourceError;
use super::user::UserId;
use super::user_store::UserConflict;

/// Coarse category of a [`ReconcileError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Duplicate id, email or username. The user corrects the input.
    ValidationConflict,
    /// The edit target is not cached.
    NotFound,
    /// The edit carried no changes.
    NoOpEdit,
    /// The remote source failed; nothing is retried.
    NetworkError,
}

/// Reasons an add, edit or refresh stopped without touching the cache.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReconcileError {
    /// The record collides with a cached record.
    #[error("{0}")]
    Conflict(UserConflict),
    /// No cached record has the id.
    #[error("user {id} not found")]
    NotFound {
        /// Requested id.
        id: UserId,
    },
    /// The submitted values equal the cached record.
    #[error("user {id} has no changes")]
    NoChanges {
        /// Id of the unchanged user.
        id: UserId,
    },
    /// The remote source call failed.
    #[error(transparent)]
    Remote(#[from] RemoteSourceError),
}

impl ReconcileError {
    /// Category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Conflict(_) => ErrorKind::ValidationConflict,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::NoChanges { .. } => ErrorKind::NoOpEdit,
            Self::Remote(_) => ErrorKind::NetworkError,
        }
    }
}

impl From<UserConflict> for ReconcileError {
    fn from(value: UserConflict) -> Self {
        Self::Conflict(value)
    }
}
