//! Notification sink that reports notices as tracing events.
//!
//! Confirmation prompts are answered by a fixed policy so the sink works in
//! non-interactive runs.

use async_trait::async_trait;
use tracing::{error, info, warn};

use crate::domain::ports::{ConfirmationPrompt, Notice, NoticeKind, NotificationSink};

/// Emits every notice on the `user_directory::notice` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotificationSink {
    assume_yes: bool,
}

impl TracingNotificationSink {
    /// Sink that answers prompts with `assume_yes`.
    pub fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }
}

#[async_trait]
impl NotificationSink for TracingNotificationSink {
    fn notify(&self, notice: Notice) {
        let Notice { kind, message } = notice;
        match kind {
            NoticeKind::Success | NoticeKind::Info => {
                info!(target: "user_directory::notice", %kind, "{message}");
            }
            NoticeKind::Warning => warn!(target: "user_directory::notice", %kind, "{message}"),
            NoticeKind::Error => error!(target: "user_directory::notice", %kind, "{message}"),
        }
    }

    async fn confirm(&self, prompt: ConfirmationPrompt) -> bool {
        let answer = if self.assume_yes {
            &prompt.confirm_label
        } else {
            &prompt.cancel_label
        };
        info!(
            target: "user_directory::notice",
            title = %prompt.title,
            answer = %answer,
            "{}",
            prompt.message
        );
        self.assume_yes
    }
}
