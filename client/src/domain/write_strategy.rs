//! How accepted writes are confirmed before they reach the cache.
//!
//! [`OptimisticWrites`] trusts the submitted record. [`ServerAuthoritativeWrites`]
//! sends it to the remote source and caches whatever the server returns.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;

use super::ports::{RemoteSourceError, UserSource};
use super::user::User;

/// Confirms creates and updates that passed the local conflict checks.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WriteStrategy: Send + Sync {
    /// Return the record to append for an accepted create.
    async fn confirm_create(&self, candidate: &User) -> Result<User, RemoteSourceError>;

    /// Return the record to store for an accepted update.
    async fn confirm_update(&self, updated: &User) -> Result<User, RemoteSourceError>;

    /// Mode this strategy implements.
    fn mode(&self) -> WriteMode;
}

/// Selectable write strategies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum WriteMode {
    /// Mutate the cache immediately with the submitted record.
    #[default]
    Optimistic,
    /// Mutate the cache with the record confirmed by the remote source.
    Server,
}

impl fmt::Display for WriteMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Optimistic => f.write_str("optimistic"),
            Self::Server => f.write_str("server"),
        }
    }
}

/// Error returned when a write mode name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown write mode '{0}', expected 'optimistic' or 'server'")]
pub struct UnknownWriteMode(pub String);

impl FromStr for WriteMode {
    type Err = UnknownWriteMode;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "optimistic" | "local" => Ok(Self::Optimistic),
            "server" | "server-authoritative" => Ok(Self::Server),
            _ => Err(UnknownWriteMode(value.to_owned())),
        }
    }
}

/// Local-only writes; the submitted record is final.
#[derive(Debug, Default, Clone, Copy)]
pub struct OptimisticWrites;

#[async_trait]
impl WriteStrategy for OptimisticWrites {
    async fn confirm_create(&self, candidate: &User) -> Result<User, RemoteSourceError> {
        Ok(candidate.clone())
    }

    async fn confirm_update(&self, updated: &User) -> Result<User, RemoteSourceError> {
        Ok(updated.clone())
    }

    fn mode(&self) -> WriteMode {
        WriteMode::Optimistic
    }
}

/// Writes confirmed by the remote source before they are cached.
pub struct ServerAuthoritativeWrites<S> {
    source: Arc<S>,
}

impl<S> ServerAuthoritativeWrites<S> {
    /// Confirm writes through `source`.
    pub fn new(source: Arc<S>) -> Self {
        Self { source }
    }
}

#[async_trait]
impl<S> WriteStrategy for ServerAuthoritativeWrites<S>
where
    S: UserSource,
{
    async fn confirm_create(&self, candidate: &User) -> Result<User, RemoteSourceError> {
        self.source.create_user(candidate).await
    }

    async fn confirm_update(&self, updated: &User) -> Result<User, RemoteSourceError> {
        self.source.update_user(updated).await
    }

    fn mode(&self) -> WriteMode {
        WriteMode::Server
    }
}

/// Build the strategy for `mode`, using `source` when the server confirms.
pub fn write_strategy_for<S>(mode: WriteMode, source: Arc<S>) -> Arc<dyn WriteStrategy>
where
    S: UserSource + 'static,
{
    match mode {
        WriteMode::Optimistic => Arc::new(OptimisticWrites),
        WriteMode::Server => Arc::new(ServerAuthoritativeWrites::new(source)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::MockUserSource;
    use rstest::rstest;

    fn user() -> User {
        User::try_new(3, "Clementine Bauch", "Samantha", "Nathan@yesenia.net").expect("valid user")
    }

    #[rstest]
    #[case("optimistic", WriteMode::Optimistic)]
    #[case(" Server ", WriteMode::Server)]
    #[case("local", WriteMode::Optimistic)]
    #[case("server-authoritative", WriteMode::Server)]
    fn parses_write_modes(#[case] raw: &str, #[case] expected: WriteMode) {
        assert_eq!(raw.parse::<WriteMode>(), Ok(expected));
    }

    #[rstest]
    fn rejects_unknown_write_mode() {
        let error = "eventual".parse::<WriteMode>().expect_err("unknown mode");
        assert_eq!(
            error.to_string(),
            "unknown write mode 'eventual', expected 'optimistic' or 'server'"
        );
    }

    #[rstest]
    #[tokio::test]
    async fn optimistic_writes_echo_the_candidate() {
        let candidate = user();
        let confirmed = OptimisticWrites
            .confirm_create(&candidate)
            .await
            .expect("optimistic create");
        assert_eq!(confirmed, candidate);
    }

    #[rstest]
    #[tokio::test]
    async fn server_writes_return_the_confirmed_record() {
        let server_copy =
            User::try_new(11, "Clementine Bauch", "Samantha", "Nathan@yesenia.net")
                .expect("valid user");
        let returned = server_copy.clone();
        let mut source = MockUserSource::new();
        source
            .expect_create_user()
            .times(1)
            .return_once(move |_| Ok(returned));

        let strategy = ServerAuthoritativeWrites::new(Arc::new(source));
        let confirmed = strategy
            .confirm_create(&user())
            .await
            .expect("server create");
        assert_eq!(confirmed, server_copy);
        assert_eq!(strategy.mode(), WriteMode::Server);
    }

    #[rstest]
    #[tokio::test]
    async fn server_writes_propagate_failures() {
        let mut source = MockUserSource::new();
        source
            .expect_update_user()
            .times(1)
            .return_once(|_| Err(RemoteSourceError::transport("connection reset")));

        let strategy = ServerAuthoritativeWrites::new(Arc::new(source));
        let error = strategy
            .confirm_update(&user())
            .await
            .expect_err("update fails");
        assert!(error.is_network());
    }

    #[rstest]
    fn factory_selects_strategy_by_mode() {
        let source = Arc::new(MockUserSource::new());
        assert_eq!(
            write_strategy_for(WriteMode::Optimistic, Arc::clone(&source)).mode(),
            WriteMode::Optimistic
        );
        assert_eq!(
            write_strategy_for(WriteMode::Server, source).mode(),
            WriteMode::Server
        );
    }
}
