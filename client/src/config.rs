//! Directory client configuration loaded via OrthoConfig.

use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

use crate::domain::{SearchOptions, UnknownWriteMode, WriteMode};

const DEFAULT_BASE_URL: &str = "https://jsonplaceholder.typicode.com";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Errors raised while interpreting loaded settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The configured base URL does not parse.
    #[error("invalid base URL '{url}': {source}")]
    InvalidBaseUrl {
        /// Raw configured value.
        url: String,
        /// Parser failure.
        #[source]
        source: url::ParseError,
    },
    /// The configured write mode is not recognised.
    #[error(transparent)]
    InvalidWriteMode(#[from] UnknownWriteMode),
    /// The request timeout is zero.
    #[error("request timeout must be at least one second")]
    ZeroTimeout,
}

/// Settings for the remote source, write mode and prompts.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "USER_DIRECTORY")]
pub struct DirectorySettings {
    /// Base URL of the remote user and comment API.
    pub base_url: Option<String>,
    /// Per-request timeout in seconds.
    pub request_timeout_secs: Option<u64>,
    /// `optimistic` or `server`.
    pub write_mode: Option<String>,
    /// Match search queries against email addresses too.
    #[ortho_config(default = false)]
    pub search_include_email: bool,
    /// Answer every confirmation prompt with yes.
    #[ortho_config(default = false)]
    pub assume_yes: bool,
}

impl DirectorySettings {
    /// Parsed base URL, falling back to the public JSONPlaceholder host.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidBaseUrl`] when the value does not parse.
    pub fn base_url(&self) -> Result<Url, SettingsError> {
        let raw = self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL);
        Url::parse(raw).map_err(|source| SettingsError::InvalidBaseUrl {
            url: raw.to_owned(),
            source,
        })
    }

    /// Request timeout, falling back to ten seconds.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::ZeroTimeout`] for a zero value.
    pub fn request_timeout(&self) -> Result<Duration, SettingsError> {
        match self
            .request_timeout_secs
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS)
        {
            0 => Err(SettingsError::ZeroTimeout),
            secs => Ok(Duration::from_secs(secs)),
        }
    }

    /// Configured write mode, optimistic when unset.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidWriteMode`] for an unknown name.
    pub fn write_mode(&self) -> Result<WriteMode, SettingsError> {
        match self.write_mode.as_deref() {
            Some(raw) => Ok(raw.parse()?),
            None => Ok(WriteMode::default()),
        }
    }

    /// Search options derived from the settings.
    pub fn search_options(&self) -> SearchOptions {
        SearchOptions {
            include_email: self.search_include_email,
        }
    }
}
