//! Submitted user form and display-name formatting.

use serde::{Deserialize, Serialize};

use super::user::{User, UserValidationError};

/// Title-case a display name.
///
/// The value is lower-cased and split on single spaces; blank words are
/// dropped and each remaining word gets an upper-case first character.
///
/// # Examples
/// ```
/// use user_directory::domain::to_title_case;
///
/// assert_eq!(to_title_case("  ada   LOVELACE "), "Ada Lovelace");
/// ```
pub fn to_title_case(value: &str) -> String {
    value
        .to_lowercase()
        .split(' ')
        .filter(|word| !word.trim().is_empty())
        .map(capitalise)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalise(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Raw values captured by an add or edit form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserForm {
    /// Caller-chosen identifier.
    pub id: i64,
    /// Display name as typed.
    pub name: String,
    /// Username as typed.
    pub username: String,
    /// Email as typed.
    pub email: String,
}

impl UserForm {
    /// Apply title-case formatting to the display name.
    ///
    /// `username` and `email` stay as typed; uniqueness checks normalise them
    /// separately.
    #[must_use]
    pub fn formatted(self) -> Self {
        Self {
            name: to_title_case(&self.name),
            ..self
        }
    }
}

impl TryFrom<UserForm> for User {
    type Error = UserValidationError;

    fn try_from(value: UserForm) -> Result<Self, Self::Error> {
        Self::try_new(value.id, value.name, value.username, value.email)
    }
}
