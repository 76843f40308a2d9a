//! In-memory test doubles shared by the directory integration tests.
//!
//! Integration tests compile as separate crates, so the doubles live here and
//! are pulled in with `mod directory_support;`.

#![allow(dead_code)]

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use user_directory::domain::ports::{
    CommentSource, ConfirmationPrompt, Notice, NoticeKind, NotificationSink, RemoteSourceError,
    UserSource,
};
use user_directory::domain::{Comment, NewComment, User};

/// Build a valid user or fail the test.
pub fn user(id: i64, name: &str, username: &str, email: &str) -> User {
    User::try_new(id, name, username, email).expect("valid user")
}

/// Build a parentless comment on `post_id`.
pub fn comment(id: i64, post_id: i64) -> Comment {
    Comment {
        id,
        post_id,
        name: format!("comment {id}"),
        email: format!("author{id}@example.com"),
        body: "quia et suscipit".to_owned(),
        parent_id: None,
    }
}

/// Remote user list held in memory.
///
/// Creates append to the list; when `assigned_id` is set the stored record
/// takes that id instead of the submitted one, as JSONPlaceholder does.
#[derive(Default)]
pub struct InMemoryUserSource {
    users: Mutex<Vec<User>>,
    offline: AtomicBool,
    assigned_id: Option<i64>,
    write_delay: Option<Duration>,
}

impl InMemoryUserSource {
    /// Source serving `users`.
    pub fn with_users(users: Vec<User>) -> Self {
        Self {
            users: Mutex::new(users),
            ..Self::default()
        }
    }

    /// Assign `id` to every created record.
    #[must_use]
    pub fn assigning_id(mut self, id: i64) -> Self {
        self.assigned_id = Some(id);
        self
    }

    /// Sleep for `delay` before answering writes.
    #[must_use]
    pub fn with_write_delay(mut self, delay: Duration) -> Self {
        self.write_delay = Some(delay);
        self
    }

    /// Make every call fail with a transport error.
    pub fn go_offline(&self) {
        self.offline.store(true, Ordering::SeqCst);
    }

    /// Current remote records.
    pub fn remote_users(&self) -> Vec<User> {
        self.users.lock().expect("source lock").clone()
    }

    fn check_online(&self) -> Result<(), RemoteSourceError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(RemoteSourceError::transport("connection refused"));
        }
        Ok(())
    }

    async fn pause(&self) {
        if let Some(delay) = self.write_delay {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl UserSource for InMemoryUserSource {
    async fn fetch_all_users(&self) -> Result<Vec<User>, RemoteSourceError> {
        self.check_online()?;
        Ok(self.remote_users())
    }

    async fn create_user(&self, candidate: &User) -> Result<User, RemoteSourceError> {
        self.check_online()?;
        self.pause().await;
        let id = self.assigned_id.unwrap_or(candidate.id().get());
        let stored = User::try_new(id, candidate.name(), candidate.username(), candidate.email())
            .map_err(|error| RemoteSourceError::decode(error.to_string()))?;
        self.users.lock().expect("source lock").push(stored.clone());
        Ok(stored)
    }

    async fn update_user(&self, updated: &User) -> Result<User, RemoteSourceError> {
        self.check_online()?;
        self.pause().await;
        let mut users = self.users.lock().expect("source lock");
        match users.iter_mut().find(|user| user.id() == updated.id()) {
            Some(slot) => {
                *slot = updated.clone();
                Ok(updated.clone())
            }
            None => Err(RemoteSourceError::status(404_u16, "Not Found")),
        }
    }
}

/// Remote comment list held in memory.
#[derive(Default)]
pub struct InMemoryCommentSource {
    comments: Mutex<Vec<Comment>>,
    offline: AtomicBool,
}

impl InMemoryCommentSource {
    /// Source serving `comments`.
    pub fn with_comments(comments: Vec<Comment>) -> Self {
        Self {
            comments: Mutex::new(comments),
            offline: AtomicBool::new(false),
        }
    }

    /// Make every call fail with a timeout.
    pub fn go_offline(&self) {
        self.offline.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl CommentSource for InMemoryCommentSource {
    async fn fetch_all_comments(&self) -> Result<Vec<Comment>, RemoteSourceError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(RemoteSourceError::timeout("deadline elapsed"));
        }
        Ok(self.comments.lock().expect("source lock").clone())
    }

    async fn create_comment(&self, candidate: &NewComment) -> Result<Comment, RemoteSourceError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(RemoteSourceError::timeout("deadline elapsed"));
        }
        let mut comments = self.comments.lock().expect("source lock");
        let id = comments.iter().map(|comment| comment.id).max().unwrap_or(0) + 1;
        let created = Comment {
            id,
            post_id: candidate.post_id,
            name: candidate.name.clone(),
            email: candidate.email.clone(),
            body: candidate.body.clone(),
            parent_id: candidate.parent_id,
        };
        comments.push(created.clone());
        Ok(created)
    }
}

/// Notification sink that records notices and answers prompts with a fixed
/// reply.
pub struct RecordingNotificationSink {
    notices: Mutex<Vec<Notice>>,
    prompts: Mutex<Vec<ConfirmationPrompt>>,
    answer: AtomicBool,
}

impl RecordingNotificationSink {
    /// Sink that answers every prompt with `answer`.
    pub fn answering(answer: bool) -> Self {
        Self {
            notices: Mutex::new(Vec::new()),
            prompts: Mutex::new(Vec::new()),
            answer: AtomicBool::new(answer),
        }
    }

    /// Change the reply given to later prompts.
    pub fn set_answer(&self, answer: bool) {
        self.answer.store(answer, Ordering::SeqCst);
    }

    /// Every notice so far, oldest first.
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().expect("notice lock").clone()
    }

    /// Most recent notice.
    pub fn last(&self) -> Option<Notice> {
        self.notices().pop()
    }

    /// Whether a notice with `kind` and `message` was recorded.
    pub fn saw(&self, kind: NoticeKind, message: &str) -> bool {
        self.notices()
            .iter()
            .any(|notice| notice.kind == kind && notice.message == message)
    }

    /// Prompts shown so far.
    pub fn prompts(&self) -> Vec<ConfirmationPrompt> {
        self.prompts.lock().expect("prompt lock").clone()
    }
}

#[async_trait]
impl NotificationSink for RecordingNotificationSink {
    fn notify(&self, notice: Notice) {
        self.notices.lock().expect("notice lock").push(notice);
    }

    async fn confirm(&self, prompt: ConfirmationPrompt) -> bool {
        self.prompts.lock().expect("prompt lock").push(prompt);
        self.answer.load(Ordering::SeqCst)
    }
}
