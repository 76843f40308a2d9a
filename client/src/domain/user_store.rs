//! Local user cache shared by every front-end call site.
//!
//! One [`UserStore`] is built at startup and handed out behind an `Arc`.
//! Operations that read, await the remote source, then write hold the store's
//! lock for the whole sequence, so two operations never interleave.

use std::fmt;

use tokio::sync::{Mutex, MutexGuard};

use super::user::{User, UserId};

/// Which uniqueness rule a candidate record broke.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserConflict {
    /// Another record already uses the id.
    Id {
        /// Colliding id.
        id: UserId,
    },
    /// Another record already uses the normalised email.
    Email {
        /// Email as submitted.
        email: String,
    },
    /// Another record already uses the normalised username.
    Username {
        /// Username as submitted.
        username: String,
    },
}

impl UserConflict {
    /// Field name that collided.
    pub fn field(&self) -> &'static str {
        match self {
            Self::Id { .. } => "id",
            Self::Email { .. } => "email",
            Self::Username { .. } => "username",
        }
    }
}

impl fmt::Display for UserConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id { id } => write!(f, "User with ID {id} already exists."),
            Self::Email { email } => write!(f, "Email \"{email}\" is already taken."),
            Self::Username { username } => write!(f, "Username \"{username}\" is already taken."),
        }
    }
}

/// Ordered user records plus the outcome of the last load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserCache {
    users: Vec<User>,
    last_load_error: Option<String>,
}

impl UserCache {
    /// Cache seeded with `users` in display order.
    pub fn new(users: Vec<User>) -> Self {
        Self {
            users,
            last_load_error: None,
        }
    }

    /// Records in display order.
    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// Whether the cache holds no records.
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Look up a record by id.
    pub fn get(&self, id: UserId) -> Option<&User> {
        self.users.iter().find(|user| user.id() == id)
    }

    /// Position of the record with `id`.
    pub fn position(&self, id: UserId) -> Option<usize> {
        self.users.iter().position(|user| user.id() == id)
    }

    /// Message of the last failed load, cleared by the next successful one.
    pub fn last_load_error(&self) -> Option<&str> {
        self.last_load_error.as_deref()
    }

    /// Check `candidate` against every record for a new insertion.
    ///
    /// Id collisions win over email, email over username, regardless of which
    /// record collides first.
    pub fn conflict_for_insert(&self, candidate: &User) -> Option<UserConflict> {
        if self.get(candidate.id()).is_some() {
            return Some(UserConflict::Id { id: candidate.id() });
        }
        self.field_conflict(candidate, |_| true)
    }

    /// Check `candidate` against every record except the one sharing its id.
    pub fn conflict_for_update(&self, candidate: &User) -> Option<UserConflict> {
        let id = candidate.id();
        self.field_conflict(candidate, |user| user.id() != id)
    }

    fn field_conflict<F>(&self, candidate: &User, mut include: F) -> Option<UserConflict>
    where
        F: FnMut(&User) -> bool,
    {
        let email = candidate.normalized_email();
        let username = candidate.normalized_username();
        let mut username_hit = false;
        for user in &self.users {
            if !include(user) {
                continue;
            }
            if user.normalized_email() == email {
                return Some(UserConflict::Email {
                    email: candidate.email().to_owned(),
                });
            }
            username_hit |= user.normalized_username() == username;
        }
        username_hit.then(|| UserConflict::Username {
            username: candidate.username().to_owned(),
        })
    }

    pub(crate) fn push(&mut self, user: User) {
        self.users.push(user);
    }

    pub(crate) fn replace_at(&mut self, index: usize, user: User) -> bool {
        match self.users.get_mut(index) {
            Some(slot) => {
                *slot = user;
                true
            }
            None => false,
        }
    }

    pub(crate) fn remove(&mut self, id: UserId) -> usize {
        let before = self.users.len();
        self.users.retain(|user| user.id() != id);
        before - self.users.len()
    }

    pub(crate) fn replace_all(&mut self, users: Vec<User>) {
        self.users = users;
        self.last_load_error = None;
    }

    pub(crate) fn record_load_error(&mut self, message: impl Into<String>) {
        self.last_load_error = Some(message.into());
    }
}

/// Single shared owner of the [`UserCache`].
#[derive(Debug, Default)]
pub struct UserStore {
    cache: Mutex<UserCache>,
}

impl UserStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with `users`.
    pub fn with_users(users: Vec<User>) -> Self {
        Self {
            cache: Mutex::new(UserCache::new(users)),
        }
    }

    /// Acquire exclusive access until the guard is dropped.
    pub async fn lock(&self) -> MutexGuard<'_, UserCache> {
        self.cache.lock().await
    }

    /// Clone the current records.
    pub async fn snapshot(&self) -> Vec<User> {
        self.lock().await.users().to_vec()
    }

    /// Clone the record with `id`, if cached.
    pub async fn find(&self, id: UserId) -> Option<User> {
        self.lock().await.get(id).cloned()
    }
}
