//! Comment records and their nested representation.

use serde::{Deserialize, Serialize};

/// Flat comment as served by the remote source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    /// Comment identifier.
    pub id: i64,
    /// Post the comment belongs to.
    pub post_id: i64,
    /// Comment title.
    pub name: String,
    /// Author email.
    pub email: String,
    /// Comment text.
    pub body: String,
    /// Parent comment, when the comment is a reply.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<i64>,
}

/// Comment payload submitted for creation; the remote source assigns `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewComment {
    /// Post the comment belongs to.
    pub post_id: i64,
    /// Comment title.
    pub name: String,
    /// Author email.
    pub email: String,
    /// Comment text.
    pub body: String,
    /// Parent comment, when replying.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<i64>,
}

/// Comment with its direct replies.
///
/// Trees produced by [`crate::domain::build_comment_tree`] never nest deeper
/// than one level, so every entry in `replies` has an empty `replies` list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NestedComment {
    /// The wrapped comment.
    #[serde(flatten)]
    pub comment: Comment,
    /// Direct replies in flat-list order.
    #[serde(default)]
    pub replies: Vec<NestedComment>,
}

impl NestedComment {
    /// Wrap a comment with no replies.
    pub fn leaf(comment: Comment) -> Self {
        Self {
            comment,
            replies: Vec::new(),
        }
    }

    /// Count this node and every reply beneath it.
    pub fn node_count(&self) -> usize {
        1 + self
            .replies
            .iter()
            .map(Self::node_count)
            .sum::<usize>()
    }

    /// Nesting depth below this node; a leaf has depth zero.
    pub fn depth(&self) -> usize {
        self.replies
            .iter()
            .map(|reply| reply.depth() + 1)
            .max()
            .unwrap_or(0)
    }
}
