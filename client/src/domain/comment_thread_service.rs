//! Comment thread use cases: fetch-and-nest and submit.

use std::sync::Arc;

use tracing::{info, warn};

use super::comment::{Comment, NestedComment, NewComment};
use super::comment_tree::{ParentDraw, build_comment_tree};
use super::ports::{CommentSource, Notice, NotificationSink, RemoteSourceError};

/// Loads comment forests and submits new comments.
#[derive(Clone)]
pub struct CommentThreadService<C, N> {
    source: Arc<C>,
    notifier: Arc<N>,
}

impl<C, N> CommentThreadService<C, N> {
    /// Create a service over the comment source.
    pub fn new(source: Arc<C>, notifier: Arc<N>) -> Self {
        Self { source, notifier }
    }
}

impl<C, N> CommentThreadService<C, N>
where
    C: CommentSource,
    N: NotificationSink,
{
    /// Fetch every comment, keep those on `post_id` when given, and nest them.
    ///
    /// # Errors
    ///
    /// Returns the source error when the fetch fails.
    pub async fn load_thread<D>(
        &self,
        post_id: Option<i64>,
        draw: &mut D,
    ) -> Result<Vec<NestedComment>, RemoteSourceError>
    where
        D: ParentDraw + ?Sized,
    {
        let comments = match self.source.fetch_all_comments().await {
            Ok(comments) => comments,
            Err(error) => {
                warn!(%error, "comment fetch failed");
                self.notifier.notify(Notice::error("Failed to load comments."));
                return Err(error);
            }
        };

        let flat: Vec<Comment> = match post_id {
            Some(post) => comments
                .into_iter()
                .filter(|comment| comment.post_id == post)
                .collect(),
            None => comments,
        };
        let fetched = flat.len();
        let forest = build_comment_tree(flat, draw);
        info!(fetched, roots = forest.len(), "comment thread built");
        Ok(forest)
    }

    /// Send `candidate` to the remote source and return the stored comment.
    ///
    /// # Errors
    ///
    /// Returns the source error when creation fails.
    pub async fn submit(&self, candidate: NewComment) -> Result<Comment, RemoteSourceError> {
        match self.source.create_comment(&candidate).await {
            Ok(created) => {
                info!(comment_id = created.id, post_id = created.post_id, "comment added");
                self.notifier
                    .notify(Notice::success("Comment added successfully."));
                Ok(created)
            }
            Err(error) => {
                warn!(%error, post_id = candidate.post_id, "comment submission failed");
                self.notifier.notify(Notice::error("Failed to add comment."));
                Err(error)
            }
        }
    }
}
