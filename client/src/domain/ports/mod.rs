//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod comment_source;
mod notification_sink;
mod remote_source_error;
mod user_source;

#[cfg(test)]
pub use comment_source::MockCommentSource;
pub use comment_source::CommentSource;
#[cfg(test)]
pub use notification_sink::MockNotificationSink;
pub use notification_sink::{ConfirmationPrompt, Notice, NoticeKind, NotificationSink};
pub use remote_source_error::RemoteSourceError;
#[cfg(test)]
pub use user_source::MockUserSource;
pub use user_source::UserSource;
