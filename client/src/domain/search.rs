//! Case-insensitive user search.

use super::user::User;

/// Fields considered by [`filter_users`] besides `name` and `username`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchOptions {
    /// Also match against `email`. Off unless explicitly enabled.
    pub include_email: bool,
}

/// Return the users whose `name` or `username` contains `query`.
///
/// The query is trimmed and lower-cased first; an empty query returns every
/// user. Order is preserved.
///
/// # Examples
/// ```
/// use user_directory::domain::{SearchOptions, User, filter_users};
///
/// let users = vec![
///     User::try_new(1, "Ann", "x", "a@x.com").expect("valid"),
///     User::try_new(2, "Bo", "bo2", "b@x.com").expect("valid"),
/// ];
/// let hits = filter_users(&users, "bo", SearchOptions::default());
/// assert_eq!(hits.len(), 1);
/// assert_eq!(hits[0].name(), "Bo");
/// ```
pub fn filter_users<'a>(users: &'a [User], query: &str, options: SearchOptions) -> Vec<&'a User> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return users.iter().collect();
    }
    users
        .iter()
        .filter(|user| matches_user(user, &needle, options))
        .collect()
}

fn matches_user(user: &User, needle: &str, options: SearchOptions) -> bool {
    let contains = |value: &str| value.to_lowercase().contains(needle);
    contains(user.name())
        || contains(user.username())
        || (options.include_email && contains(user.email()))
}
