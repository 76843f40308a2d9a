//! Wire shapes for the JSONPlaceholder user and comment resources.
//!
//! Responses decode into these DTOs first and map into domain records in one
//! pass. The remote user resource carries address, phone and company data the
//! directory ignores.

use serde::{Deserialize, Serialize};

use crate::domain::{Comment, NewComment, User};

#[derive(Debug, Deserialize)]
pub(super) struct UserDto {
    pub(super) id: i64,
    pub(super) name: String,
    pub(super) username: String,
    pub(super) email: String,
}

impl UserDto {
    pub(super) fn into_domain(self) -> Result<User, String> {
        let id = self.id;
        User::try_new(id, self.name, self.username, self.email)
            .map_err(|error| format!("user {id} rejected: {error}"))
    }
}

/// Body sent on `POST /users` and `PUT /users/{id}`.
#[derive(Debug, Serialize)]
pub(super) struct UserPayloadDto<'a> {
    pub(super) id: i64,
    pub(super) name: &'a str,
    pub(super) username: &'a str,
    pub(super) email: &'a str,
}

impl<'a> From<&'a User> for UserPayloadDto<'a> {
    fn from(user: &'a User) -> Self {
        Self {
            id: user.id().get(),
            name: user.name(),
            username: user.username(),
            email: user.email(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct CommentDto {
    pub(super) id: i64,
    pub(super) post_id: i64,
    #[serde(default)]
    pub(super) name: String,
    #[serde(default)]
    pub(super) email: String,
    #[serde(default)]
    pub(super) body: String,
    #[serde(default)]
    pub(super) parent_id: Option<i64>,
}

impl From<CommentDto> for Comment {
    fn from(dto: CommentDto) -> Self {
        Self {
            id: dto.id,
            post_id: dto.post_id,
            name: dto.name,
            email: dto.email,
            body: dto.body,
            parent_id: dto.parent_id,
        }
    }
}

/// Body sent on `POST /comments`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct NewCommentDto<'a> {
    pub(super) post_id: i64,
    pub(super) name: &'a str,
    pub(super) email: &'a str,
    pub(super) body: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) parent_id: Option<i64>,
}

impl<'a> From<&'a NewComment> for NewCommentDto<'a> {
    fn from(comment: &'a NewComment) -> Self {
        Self {
            post_id: comment.post_id,
            name: &comment.name,
            email: &comment.email,
            body: &comment.body,
            parent_id: comment.parent_id,
        }
    }
}
