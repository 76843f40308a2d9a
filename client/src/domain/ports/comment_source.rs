//! Driven port for comment records on the remote source.

use async_trait::async_trait;

use super::RemoteSourceError;
use crate::domain::{Comment, NewComment};

/// Remote comment resource.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentSource: Send + Sync {
    /// Fetch every comment as a flat list.
    async fn fetch_all_comments(&self) -> Result<Vec<Comment>, RemoteSourceError>;

    /// Create a comment and return the server-confirmed record.
    async fn create_comment(&self, candidate: &NewComment) -> Result<Comment, RemoteSourceError>;
}
