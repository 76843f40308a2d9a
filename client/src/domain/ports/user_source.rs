//! Driven port for reading and writing users on the remote source.

use async_trait::async_trait;

use super::RemoteSourceError;
use crate::domain::User;

/// Remote user resource keyed by integer id.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserSource: Send + Sync {
    /// Fetch every user.
    async fn fetch_all_users(&self) -> Result<Vec<User>, RemoteSourceError>;

    /// Create a user and return the server-confirmed record.
    ///
    /// The server may assign or override the id.
    async fn create_user(&self, candidate: &User) -> Result<User, RemoteSourceError>;

    /// Replace the user with `updated.id()` and return the confirmed record.
    async fn update_user(&self, updated: &User) -> Result<User, RemoteSourceError>;
}
