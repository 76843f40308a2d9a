//! Driven port for user-facing notices and confirmation prompts.

use std::fmt;

use async_trait::async_trait;

/// Severity of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoticeKind {
    /// The operation completed.
    Success,
    /// The operation was refused; the user can correct the input.
    Warning,
    /// The operation failed.
    Error,
    /// Informational outcome, such as an edit with nothing to change.
    Info,
}

impl fmt::Display for NoticeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Info => "info",
        };
        f.write_str(label)
    }
}

/// Message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Severity.
    pub kind: NoticeKind,
    /// Human-readable text.
    pub message: String,
}

impl Notice {
    /// Build a [`NoticeKind::Success`] notice.
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Success, message)
    }

    /// Build a [`NoticeKind::Warning`] notice.
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Warning, message)
    }

    /// Build a [`NoticeKind::Error`] notice.
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Error, message)
    }

    /// Build a [`NoticeKind::Info`] notice.
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Info, message)
    }

    fn new(kind: NoticeKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Yes/no question put to the user before a destructive action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationPrompt {
    /// Dialog title.
    pub title: String,
    /// Question text.
    pub message: String,
    /// Label of the accepting button.
    pub confirm_label: String,
    /// Label of the declining button.
    pub cancel_label: String,
}

impl ConfirmationPrompt {
    /// Prompt with `Yes`/`No` buttons.
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            confirm_label: "Yes".to_owned(),
            cancel_label: "No".to_owned(),
        }
    }
}

/// Sink for notices and confirmations.
///
/// A new notice supersedes any notice still on screen.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// Show a notice.
    fn notify(&self, notice: Notice);

    /// Ask the user to confirm; `true` means proceed.
    async fn confirm(&self, prompt: ConfirmationPrompt) -> bool;
}
