//! Domain types and services for the user directory.
//!
//! Purpose: keep the reconciliation rules, comment nesting and search free of
//! transport concerns. Adapters reach the domain only through [`ports`].
//!
//! Public surface:
//! - [`User`] and [`UserId`] with [`normalize`], the comparison rule for
//!   email and username.
//! - [`UserStore`], the single shared cache, and [`UserDirectoryService`],
//!   which applies adds, edits, deletes and refreshes to it.
//! - [`build_comment_tree`] and [`CommentThreadService`] for comment forests.
//! - [`filter_users`] for name/username search.

pub mod comment;
pub mod comment_thread_service;
pub mod comment_tree;
pub mod error;
pub mod ports;
pub mod search;
pub mod user;
pub mod user_directory_service;
pub mod user_form;
pub mod user_store;
pub mod write_strategy;

pub use self::comment::{Comment, NestedComment, NewComment};
pub use self::comment_thread_service::CommentThreadService;
pub use self::comment_tree::{
    PARENT_ASSIGNMENT_PROBABILITY, ParentDraw, RandomParentDraw, build_comment_tree,
};
pub use self::error::{ErrorKind, ReconcileError};
pub use self::search::{SearchOptions, filter_users};
pub use self::user::{User, UserId, UserValidationError, normalize};
pub use self::user_directory_service::{DeleteOutcome, UserDirectoryService};
pub use self::user_form::{UserForm, to_title_case};
pub use self::user_store::{UserCache, UserConflict, UserStore};
pub use self::write_strategy::{
    OptimisticWrites, ServerAuthoritativeWrites, UnknownWriteMode, WriteMode, WriteStrategy,
    write_strategy_for,
};
