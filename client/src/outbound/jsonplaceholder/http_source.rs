//! Reqwest-backed JSONPlaceholder source adapter.
//!
//! This adapter owns transport details only: URL building, timeout and HTTP
//! error mapping, and JSON decoding into domain records.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::dto::{CommentDto, NewCommentDto, UserDto, UserPayloadDto};
use crate::domain::ports::{CommentSource, RemoteSourceError, UserSource};
use crate::domain::{Comment, NewComment, User};

const USER_AGENT: &str = "user-directory/0.1";

/// User and comment source backed by a JSONPlaceholder-compatible HTTP API.
pub struct JsonPlaceholderHttpSource {
    client: Client,
    base_url: Url,
}

impl JsonPlaceholderHttpSource {
    /// Build an adapter using a reqwest client with an explicit request timeout.
    ///
    /// A missing trailing slash on `base_url` is added so that resource paths
    /// resolve beneath it.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self {
            client,
            base_url: with_trailing_slash(base_url),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, RemoteSourceError> {
        self.base_url.join(path).map_err(|error| {
            RemoteSourceError::invalid_request(format!("cannot build URL for '{path}': {error}"))
        })
    }

    async fn exchange<T>(&self, request: RequestBuilder) -> Result<T, RemoteSourceError>
    where
        T: DeserializeOwned,
    {
        let response = request
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        debug!(status = status.as_u16(), bytes = body.len(), "remote source responded");
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        decode(body.as_ref())
    }
}

#[async_trait]
impl UserSource for JsonPlaceholderHttpSource {
    async fn fetch_all_users(&self) -> Result<Vec<User>, RemoteSourceError> {
        let url = self.endpoint("users")?;
        let users: Vec<UserDto> = self.exchange(self.client.get(url)).await?;
        users
            .into_iter()
            .map(UserDto::into_domain)
            .collect::<Result<Vec<_>, _>>()
            .map_err(RemoteSourceError::decode)
    }

    async fn create_user(&self, candidate: &User) -> Result<User, RemoteSourceError> {
        let url = self.endpoint("users")?;
        let request = self
            .client
            .post(url)
            .json(&UserPayloadDto::from(candidate));
        let created: UserDto = self.exchange(request).await?;
        created.into_domain().map_err(RemoteSourceError::decode)
    }

    async fn update_user(&self, updated: &User) -> Result<User, RemoteSourceError> {
        let url = self.endpoint(&format!("users/{}", updated.id()))?;
        let request = self.client.put(url).json(&UserPayloadDto::from(updated));
        let stored: UserDto = self.exchange(request).await?;
        stored.into_domain().map_err(RemoteSourceError::decode)
    }
}

#[async_trait]
impl CommentSource for JsonPlaceholderHttpSource {
    async fn fetch_all_comments(&self) -> Result<Vec<Comment>, RemoteSourceError> {
        let url = self.endpoint("comments")?;
        let comments: Vec<CommentDto> = self.exchange(self.client.get(url)).await?;
        Ok(comments.into_iter().map(Comment::from).collect())
    }

    async fn create_comment(&self, candidate: &NewComment) -> Result<Comment, RemoteSourceError> {
        let url = self.endpoint("comments")?;
        let request = self
            .client
            .post(url)
            .json(&NewCommentDto::from(candidate));
        let created: CommentDto = self.exchange(request).await?;
        Ok(created.into())
    }
}

fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, RemoteSourceError> {
    serde_json::from_slice(body).map_err(|error| {
        RemoteSourceError::decode(format!("invalid JSON payload: {error}"))
    })
}

fn map_transport_error(error: reqwest::Error) -> RemoteSourceError {
    if error.is_timeout() {
        RemoteSourceError::timeout(error.to_string())
    } else {
        RemoteSourceError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> RemoteSourceError {
    let preview = body_preview(body);
    let message = if preview.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("unexpected status")
            .to_owned()
    } else {
        preview
    };

    match status {
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            RemoteSourceError::timeout(format!("status {}: {message}", status.as_u16()))
        }
        _ => RemoteSourceError::status(status.as_u16(), message),
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
