//! Command-line front end over the directory and comment services.
//!
//! User commands load the user list first; comment commands talk to the comment
//! source only. Each command returns its result as JSON.

use clap::{Args, Parser, Subcommand};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::domain::ports::{CommentSource, NotificationSink, RemoteSourceError, UserSource};
use crate::domain::{
    CommentThreadService, DeleteOutcome, NewComment, RandomParentDraw, ReconcileError,
    SearchOptions, User, UserDirectoryService, UserForm, UserId, UserValidationError,
};

/// `user-directory` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "user-directory",
    about = "Browse and edit a duplicate-safe user directory",
    version
)]
pub struct Cli {
    /// Action to perform.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported actions.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Print users, optionally filtered by name or username.
    List {
        /// Case-insensitive search text.
        #[arg(long)]
        query: Option<String>,
        /// Match the query against email addresses as well.
        #[arg(long)]
        include_email: bool,
    },
    /// Print the user with the id.
    Show {
        /// Id of the user to print.
        #[arg(long)]
        id: i64,
    },
    /// Add a user.
    Add(UserArgs),
    /// Replace the values of an existing user.
    Edit(UserArgs),
    /// Delete every user with the id.
    Delete {
        /// Id of the user to delete.
        #[arg(long)]
        id: i64,
        /// Confirm without prompting.
        #[arg(long)]
        yes: bool,
    },
    /// Print the nested comment forest.
    Comments {
        /// Only include comments on this post.
        #[arg(long = "post-id", value_name = "id")]
        post_id: Option<i64>,
        /// Seed for parent assignment, for repeatable output.
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Post a comment.
    Comment(CommentArgs),
}

/// Form fields for add and edit.
#[derive(Debug, Clone, Args)]
pub struct UserArgs {
    /// User id.
    #[arg(long)]
    pub id: i64,
    /// Display name; title-cased before saving.
    #[arg(long)]
    pub name: String,
    /// Username.
    #[arg(long)]
    pub username: String,
    /// Email address.
    #[arg(long)]
    pub email: String,
}

impl From<UserArgs> for UserForm {
    fn from(args: UserArgs) -> Self {
        Self {
            id: args.id,
            name: args.name,
            username: args.username,
            email: args.email,
        }
    }
}

/// Fields of a new comment.
#[derive(Debug, Clone, Args)]
pub struct CommentArgs {
    /// Post to comment on.
    #[arg(long = "post-id", value_name = "id")]
    pub post_id: i64,
    /// Comment title.
    #[arg(long)]
    pub name: String,
    /// Author email.
    #[arg(long)]
    pub email: String,
    /// Comment text.
    #[arg(long)]
    pub body: String,
    /// Comment being replied to.
    #[arg(long = "parent-id", value_name = "id")]
    pub parent_id: Option<i64>,
}

impl Cli {
    /// Whether the invocation pre-confirms destructive prompts.
    pub fn assume_yes(&self) -> bool {
        matches!(self.command, Command::Delete { yes: true, .. })
    }
}

/// Errors returned by [`run`].
#[derive(Debug, Error)]
pub enum CliError {
    /// The submitted form is invalid.
    #[error(transparent)]
    Validation(#[from] UserValidationError),
    /// The directory refused or failed the operation.
    #[error(transparent)]
    Reconcile(#[from] ReconcileError),
    /// A comment call failed.
    #[error(transparent)]
    Remote(#[from] RemoteSourceError),
    /// The result could not be encoded.
    #[error("encode output: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Services a command runs against.
pub struct CliContext<S, C, N> {
    /// User reconciliation service.
    pub users: UserDirectoryService<S, N>,
    /// Comment thread service.
    pub comments: CommentThreadService<C, N>,
    /// Default search options from configuration.
    pub search: SearchOptions,
}

/// Execute `command` and return its JSON output.
///
/// # Errors
///
/// Returns [`CliError`] when loading, validation or the action fails. A
/// declined deletion is not an error.
pub async fn run<S, C, N>(context: &CliContext<S, C, N>, command: Command) -> Result<Value, CliError>
where
    S: UserSource,
    C: CommentSource,
    N: NotificationSink,
{
    match command {
        Command::List {
            query,
            include_email,
        } => {
            load_users(context).await?;
            let options = SearchOptions {
                include_email: include_email || context.search.include_email,
            };
            let hits = context
                .users
                .search(query.as_deref().unwrap_or_default(), options)
                .await;
            Ok(serde_json::to_value(hits)?)
        }
        Command::Show { id } => {
            let id = UserId::new(id)?;
            load_users(context).await?;
            let user = context.users.find_user(id).await?;
            Ok(serde_json::to_value(user)?)
        }
        Command::Add(args) => {
            load_users(context).await?;
            let candidate = User::try_from(UserForm::from(args).formatted())?;
            context.users.add_user(candidate).await?;
            users_json(context).await
        }
        Command::Edit(args) => {
            load_users(context).await?;
            let updated = User::try_from(UserForm::from(args).formatted())?;
            context.users.edit_user(updated).await?;
            users_json(context).await
        }
        Command::Delete { id, .. } => {
            let id = UserId::new(id)?;
            load_users(context).await?;
            if context.users.delete_user(id).await == DeleteOutcome::Declined {
                debug!(user_id = %id, "delete declined, list unchanged");
            }
            users_json(context).await
        }
        Command::Comments { post_id, seed } => {
            let rng = match seed {
                Some(seed) => ChaCha8Rng::seed_from_u64(seed),
                None => ChaCha8Rng::from_rng(&mut rand::rng()),
            };
            let mut draw = RandomParentDraw::new(rng);
            let forest = context.comments.load_thread(post_id, &mut draw).await?;
            Ok(serde_json::to_value(forest)?)
        }
        Command::Comment(args) => {
            let candidate = NewComment {
                post_id: args.post_id,
                name: args.name,
                email: args.email,
                body: args.body,
                parent_id: args.parent_id,
            };
            let created = context.comments.submit(candidate).await?;
            Ok(serde_json::to_value(created)?)
        }
    }
}

async fn load_users<S, C, N>(context: &CliContext<S, C, N>) -> Result<(), CliError>
where
    S: UserSource,
    N: NotificationSink,
{
    let loaded = context.users.load().await?;
    debug!(loaded, "user list ready");
    Ok(())
}

async fn users_json<S, C, N>(context: &CliContext<S, C, N>) -> Result<Value, CliError> {
    Ok(serde_json::to_value(context.users.store().snapshot().await)?)
}
