#![forbid(unsafe_code)]

//! The user directory.
//!
//! The host supplies an ordered list of users who can be mentioned. The
//! directory is a per-render snapshot: the composer never mutates it and
//! re-filters it on every keystroke, so a stale entry at worst produces a
//! stale suggestion until the next snapshot arrives.

/// A user that can be mentioned.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct User {
    /// Display name, used for matching and shown in suggestions.
    pub name: String,
    /// Profile URL the committed mention links to.
    pub url: String,
    /// Avatar image URL shown next to the suggestion.
    pub avatar: String,
}

impl User {
    /// Create a user record.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        url: impl Into<String>,
        avatar: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            avatar: avatar.into(),
        }
    }
}

/// An ordered snapshot of mentionable users.
///
/// Order is significant: candidate filtering preserves it and never re-sorts
/// by relevance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UserDirectory {
    users: Vec<User>,
}

impl UserDirectory {
    /// Create an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of users in the directory.
    #[must_use]
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// Whether the directory is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Iterate over all users in external order.
    pub fn iter(&self) -> impl Iterator<Item = &User> {
        self.users.iter()
    }

    /// Look up a user by exact display name.
    ///
    /// Returns the first match in external order, `None` if absent.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&User> {
        self.users.iter().find(|u| u.name == name)
    }

    /// Filter users whose name contains `query`, case-insensitively.
    ///
    /// Preserves external order; truncation to the suggestion cap is the
    /// caller's concern.
    pub fn filter<'a>(&'a self, query: &str) -> impl Iterator<Item = &'a User> {
        let needle = query.to_lowercase();
        self.users
            .iter()
            .filter(move |u| u.name.to_lowercase().contains(&needle))
    }
}

impl From<Vec<User>> for UserDirectory {
    fn from(users: Vec<User>) -> Self {
        Self { users }
    }
}

impl FromIterator<User> for UserDirectory {
    fn from_iter<I: IntoIterator<Item = User>>(iter: I) -> Self {
        Self {
            users: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directory() -> UserDirectory {
        vec![
            User::new("Amy Alvarez", "/contributors/amy", "/avatars/amy.png"),
            User::new("Bogdan", "/contributors/bogdan", "/avatars/bogdan.png"),
            User::new("amy lee", "/contributors/amylee", "/avatars/amylee.png"),
            User::new("Çağla", "/contributors/cagla", "/avatars/cagla.png"),
        ]
        .into()
    }

    #[test]
    fn find_is_exact_and_case_sensitive() {
        let dir = directory();
        assert_eq!(dir.find("Bogdan").map(|u| u.url.as_str()), Some("/contributors/bogdan"));
        assert!(dir.find("bogdan").is_none());
        assert!(dir.find("Nobody").is_none());
    }

    #[test]
    fn filter_is_case_insensitive_substring() {
        let dir = directory();
        let names: Vec<&str> = dir.filter("AMY").map(|u| u.name.as_str()).collect();
        assert_eq!(names, ["Amy Alvarez", "amy lee"]);
    }

    #[test]
    fn filter_preserves_external_order() {
        let dir = directory();
        let names: Vec<&str> = dir.filter("a").map(|u| u.name.as_str()).collect();
        // Substring match anywhere in the name, original order kept.
        assert_eq!(names, ["Amy Alvarez", "Bogdan", "amy lee", "Çağla"]);
    }

    #[test]
    fn filter_handles_non_ascii() {
        let dir = directory();
        let names: Vec<&str> = dir.filter("çağ").map(|u| u.name.as_str()).collect();
        assert_eq!(names, ["Çağla"]);
    }

    #[test]
    fn empty_query_matches_everyone() {
        let dir = directory();
        assert_eq!(dir.filter("").count(), dir.len());
    }
}
