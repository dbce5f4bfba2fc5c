//! Email address model

use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// An email address with optional display name
///
/// Two addresses are equal when their email values are equal; the display
/// name does not take part in comparison or hashing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Address {
    email: String,
    name: Option<String>,
}

impl Address {
    /// Create a new address with just the email
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name: None,
        }
    }

    /// Create a new address with a display name
    ///
    /// An empty name is treated as no name.
    pub fn with_name(name: impl Into<String>, email: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            email: email.into(),
            name: (!name.is_empty()).then_some(name),
        }
    }

    /// Parse an address from a string like "John Doe <john@example.com>"
    pub fn parse(s: &str) -> Self {
        let s = s.trim();

        if let Some(angle_start) = s.rfind('<')
            && let Some(angle_end) = s.rfind('>')
            && angle_start < angle_end
        {
            let name = s[..angle_start].trim().trim_matches('"').trim();
            let email = s[angle_start + 1..angle_end].trim();
            return Self::with_name(name, email);
        }

        Self::new(s)
    }

    /// Parse a comma-separated address list (e.g. a `To` or `Reply-To` header value)
    pub fn parse_list(s: &str) -> Vec<Self> {
        s.split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(Self::parse)
            .collect()
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Display name, or an empty string when none was given
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }

    /// Format the address for display
    pub fn display(&self) -> String {
        match &self.name {
            Some(name) => format!("{} <{}>", name, self.email),
            None => self.email.clone(),
        }
    }
}

impl PartialEq for Address {
    fn eq(&self, other: &Self) -> bool {
        self.email == other.email
    }
}

impl Eq for Address {}

impl Hash for Address {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.email.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_email_with_name() {
        let addr = Address::parse("John Doe <john@example.com>");
        assert_eq!(addr.name(), Some("John Doe"));
        assert_eq!(addr.email(), "john@example.com");
    }

    #[test]
    fn test_parse_quoted_name() {
        let addr = Address::parse("\"Doe, John\" <john@example.com>");
        assert_eq!(addr.name(), Some("Doe, John"));
    }

    #[test]
    fn test_parse_email_without_name() {
        let addr = Address::parse("  john@example.com ");
        assert_eq!(addr.name(), None);
        assert_eq!(addr.display_name(), "");
        assert_eq!(addr.email(), "john@example.com");
    }

    #[test]
    fn test_parse_email_with_angle_brackets_no_name() {
        let addr = Address::parse("<john@example.com>");
        assert_eq!(addr.name(), None);
        assert_eq!(addr.email(), "john@example.com");
    }

    #[test]
    fn test_parse_list() {
        let addrs = Address::parse_list("alice@example.com, Bob <bob@example.com>,");
        assert_eq!(addrs.len(), 2);
        assert_eq!(addrs[0].email(), "alice@example.com");
        assert_eq!(addrs[1].name(), Some("Bob"));
    }

    #[test]
    fn test_equality_ignores_name() {
        assert_eq!(
            Address::with_name("A", "a@example.com"),
            Address::with_name("Someone else", "a@example.com")
        );
        assert_ne!(Address::new("a@example.com"), Address::new("b@example.com"));
    }

    #[test]
    fn test_empty_name_is_none() {
        assert_eq!(Address::with_name("", "a@example.com").name(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(
            Address::with_name("John Doe", "john@example.com").display(),
            "John Doe <john@example.com>"
        );
        assert_eq!(Address::new("john@example.com").display(), "john@example.com");
    }
}
