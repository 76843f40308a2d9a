//! User data model.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Validation errors returned by [`User::try_new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    /// Ids must be positive.
    InvalidId {
        /// Rejected value.
        id: i64,
    },
    /// The name is blank.
    EmptyName,
    /// The username is blank.
    EmptyUsername,
    /// The email is blank.
    EmptyEmail,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidId { id } => write!(f, "user id must be positive, got {id}"),
            Self::EmptyName => write!(f, "name must not be empty"),
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::EmptyEmail => write!(f, "email must not be empty"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Integer user identifier, assigned by the caller or by the remote source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    /// Validate and construct a [`UserId`].
    ///
    /// # Errors
    ///
    /// Returns [`UserValidationError::InvalidId`] for zero or negative ids.
    pub fn new(id: i64) -> Result<Self, UserValidationError> {
        if id <= 0 {
            return Err(UserValidationError::InvalidId { id });
        }
        Ok(Self(id))
    }

    /// Raw integer value.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Trim surrounding whitespace and lower-case the value.
///
/// This is the only comparison rule applied to `email` and `username`.
///
/// # Examples
/// ```
/// use user_directory::domain::normalize;
///
/// assert_eq!(normalize("  Ann@X.com "), "ann@x.com");
/// ```
pub fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Directory user record.
///
/// ## Invariants
/// - `id` is positive.
/// - `name`, `username` and `email` are non-empty once trimmed.
///
/// Unknown JSON fields (address, phone, company) are ignored on decode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "UserDto", into = "UserDto")]
pub struct User {
    id: UserId,
    name: String,
    username: String,
    email: String,
}

impl User {
    /// Fallible constructor enforcing the non-empty field invariants.
    pub fn try_new(
        id: i64,
        name: impl Into<String>,
        username: impl Into<String>,
        email: impl Into<String>,
    ) -> Result<Self, UserValidationError> {
        let id = UserId::new(id)?;
        let name = non_empty(name.into(), UserValidationError::EmptyName)?;
        let username = non_empty(username.into(), UserValidationError::EmptyUsername)?;
        let email = non_empty(email.into(), UserValidationError::EmptyEmail)?;
        Ok(Self {
            id,
            name,
            username,
            email,
        })
    }

    /// Stable user identifier.
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Display name, compared verbatim.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Login handle as entered.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Contact email as entered.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Normalised email used for uniqueness checks.
    pub fn normalized_email(&self) -> String {
        normalize(&self.email)
    }

    /// Normalised username used for uniqueness checks.
    pub fn normalized_username(&self) -> String {
        normalize(&self.username)
    }

    /// Whether `other` carries the same editable values.
    ///
    /// `name` is compared verbatim; `email` and `username` after
    /// normalisation.
    pub fn has_same_values(&self, other: &Self) -> bool {
        self.name == other.name
            && self.normalized_email() == other.normalized_email()
            && self.normalized_username() == other.normalized_username()
    }
}

fn non_empty(value: String, error: UserValidationError) -> Result<String, UserValidationError> {
    if value.trim().is_empty() {
        return Err(error);
    }
    Ok(value)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserDto {
    id: i64,
    name: String,
    username: String,
    email: String,
}

impl From<User> for UserDto {
    fn from(value: User) -> Self {
        let User {
            id,
            name,
            username,
            email,
        } = value;
        Self {
            id: id.get(),
            name,
            username,
            email,
        }
    }
}

impl TryFrom<UserDto> for User {
    type Error = UserValidationError;

    fn try_from(value: UserDto) -> Result<Self, Self::Error> {
        Self::try_new(value.id, value.name, value.username, value.email)
    }
}
