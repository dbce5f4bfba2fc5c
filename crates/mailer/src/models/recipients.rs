//! Recipient inputs and their normalization into address lists
//!
//! Setters accept anything convertible into [`Recipients`]: a single string,
//! a single [`Address`], a list of either (mixed lists via [`Recipient`]),
//! or nothing at all. [`normalize`] turns that into the canonical
//! `Vec<Address>` the rest of the crate works with.

use super::Address;

/// A single recipient as supplied by a caller
#[derive(Debug, Clone)]
pub enum Recipient {
    /// An unparsed string, either `email` or `Name <email>`
    Raw(String),
    /// An already structured address, kept unchanged
    Structured(Address),
}

/// Any recipient input accepted by the address setters
#[derive(Debug, Clone, Default)]
pub enum Recipients {
    #[default]
    Empty,
    One(Recipient),
    Many(Vec<Recipient>),
}

/// Normalize recipient input into an ordered address list.
///
/// Raw strings pick up `default_name` unless they carry their own name in
/// `Name <email>` form. Structured addresses pass through unchanged. Order
/// and duplicates are preserved.
pub fn normalize(input: impl Into<Recipients>, default_name: Option<&str>) -> Vec<Address> {
    match input.into() {
        Recipients::Empty => Vec::new(),
        Recipients::One(recipient) => vec![coerce(recipient, default_name)],
        Recipients::Many(recipients) => recipients
            .into_iter()
            .map(|recipient| coerce(recipient, default_name))
            .collect(),
    }
}

fn coerce(recipient: Recipient, default_name: Option<&str>) -> Address {
    match recipient {
        Recipient::Structured(address) => address,
        Recipient::Raw(raw) => {
            let parsed = Address::parse(&raw);
            match (parsed.name(), default_name) {
                (None, Some(name)) => Address::with_name(name, parsed.email()),
                _ => parsed,
            }
        }
    }
}

impl Recipients {
    pub fn is_empty(&self) -> bool {
        match self {
            Recipients::Empty => true,
            Recipients::One(_) => false,
            Recipients::Many(items) => items.is_empty(),
        }
    }
}

impl From<&str> for Recipient {
    fn from(s: &str) -> Self {
        Recipient::Raw(s.to_string())
    }
}

impl From<String> for Recipient {
    fn from(s: String) -> Self {
        Recipient::Raw(s)
    }
}

impl From<&String> for Recipient {
    fn from(s: &String) -> Self {
        Recipient::Raw(s.clone())
    }
}

impl From<Address> for Recipient {
    fn from(address: Address) -> Self {
        Recipient::Structured(address)
    }
}

impl From<&Address> for Recipient {
    fn from(address: &Address) -> Self {
        Recipient::Structured(address.clone())
    }
}

impl From<Recipient> for Recipients {
    fn from(recipient: Recipient) -> Self {
        Recipients::One(recipient)
    }
}

impl From<&str> for Recipients {
    fn from(s: &str) -> Self {
        Recipients::One(s.into())
    }
}

impl From<String> for Recipients {
    fn from(s: String) -> Self {
        Recipients::One(s.into())
    }
}

impl From<Address> for Recipients {
    fn from(address: Address) -> Self {
        Recipients::One(address.into())
    }
}

impl From<&Address> for Recipients {
    fn from(address: &Address) -> Self {
        Recipients::One(address.into())
    }
}

impl<T: Into<Recipient>> From<Vec<T>> for Recipients {
    fn from(items: Vec<T>) -> Self {
        Recipients::Many(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Recipient>, const N: usize> From<[T; N]> for Recipients {
    fn from(items: [T; N]) -> Self {
        Recipients::Many(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Recipient> + Clone> From<&[T]> for Recipients {
    fn from(items: &[T]) -> Self {
        Recipients::Many(items.iter().cloned().map(Into::into).collect())
    }
}

impl<T: Into<Recipients>> From<Option<T>> for Recipients {
    fn from(value: Option<T>) -> Self {
        value.map_or(Recipients::Empty, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_none_is_empty() {
        assert!(normalize(None::<&str>, None).is_empty());
        assert!(normalize(Recipients::Empty, Some("Ignored")).is_empty());
    }

    #[test]
    fn test_single_string_without_name() {
        let list = normalize("a@x.com", None);
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].email(), "a@x.com");
        assert_eq!(list[0].display_name(), "");
    }

    #[test]
    fn test_single_string_takes_default_name() {
        let list = normalize("a@x.com", Some("Alice"));
        assert_eq!(list[0].display_name(), "Alice");
    }

    #[test]
    fn test_inline_name_wins_over_default() {
        let list = normalize("Bob <b@y.com>", Some("Alice"));
        assert_eq!(list[0].email(), "b@y.com");
        assert_eq!(list[0].display_name(), "Bob");
    }

    #[test]
    fn test_single_address_unchanged() {
        let list = normalize(Address::with_name("B", "b@y.com"), Some("Ignored"));
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].display_name(), "B");
    }

    #[test]
    fn test_mixed_sequence_preserves_order() {
        let list = normalize(
            vec![
                Recipient::from("a@x.com"),
                Recipient::from(Address::with_name("B", "b@y.com")),
            ],
            None,
        );
        assert_eq!(list, vec![Address::new("a@x.com"), Address::new("b@y.com")]);
        assert_eq!(list[0].display_name(), "");
        assert_eq!(list[1].display_name(), "B");
    }

    #[test]
    fn test_sequence_keeps_duplicates() {
        let list = normalize(["a@x.com", "a@x.com"], None);
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_empty_sequence() {
        let input: Recipients = Vec::<String>::new().into();
        assert!(input.is_empty());
        assert!(normalize(input, None).is_empty());
    }

    #[test]
    fn test_slice_of_addresses() {
        let addrs = [Address::new("a@x.com"), Address::new("b@y.com")];
        let list = normalize(&addrs[..], None);
        assert_eq!(list, addrs.to_vec());
    }
}
