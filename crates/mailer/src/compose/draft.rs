//! The in-progress message state behind a [`Composer`](super::Composer)

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::error::{ComposeError, Result};
use crate::models::{Address, Header, ThreadId};

/// Message priority, 1 (highest) to 5 (lowest)
///
/// Values outside that range are accepted and passed through as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Priority(pub u8);

impl Priority {
    pub const HIGHEST: Priority = Priority(1);
    pub const HIGH: Priority = Priority(2);
    pub const NORMAL: Priority = Priority(3);
    pub const LOW: Priority = Priority(4);
    pub const LOWEST: Priority = Priority(5);

    pub fn value(self) -> u8 {
        self.0
    }

    /// Human label used in the `X-Priority` header, if the value is in range
    pub fn label(self) -> Option<&'static str> {
        match self.0 {
            1 => Some("Highest"),
            2 => Some("High"),
            3 => Some("Normal"),
            4 => Some("Low"),
            5 => Some("Lowest"),
            _ => None,
        }
    }
}

impl Default for Priority {
    fn default() -> Self {
        Priority::HIGH
    }
}

impl From<u8> for Priority {
    fn from(value: u8) -> Self {
        Priority(value)
    }
}

/// Renders as the `X-Priority` header value, e.g. `2 (High)`
impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.label() {
            Some(label) => write!(f, "{} ({})", self.0, label),
            None => write!(f, "{}", self.0),
        }
    }
}

/// Mutable message state collected by the fluent setters
#[derive(Debug, Clone, Default)]
pub struct MessageDraft {
    pub from: Option<Address>,
    pub to: Vec<Address>,
    pub cc: Vec<Address>,
    pub bcc: Vec<Address>,
    pub reply_to: Vec<Address>,
    pub subject: Option<String>,
    pub body_html: Option<String>,
    pub priority: Priority,
    pub attachments: Vec<PathBuf>,
    pub headers: Vec<Header>,
    /// Opaque query parameters forwarded to the transport
    pub parameters: BTreeMap<String, String>,
    /// Set only while replying, from the source message
    pub(crate) thread_id: Option<ThreadId>,
}

impl MessageDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn thread_id(&self) -> Option<&ThreadId> {
        self.thread_id.as_ref()
    }

    /// Append attachments after checking that every path exists.
    ///
    /// Nothing is appended unless all paths exist; the first missing path is
    /// reported.
    pub fn add_attachments<I, P>(&mut self, paths: I) -> Result<()>
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let paths: Vec<PathBuf> = paths.into_iter().map(Into::into).collect();

        if let Some(missing) = paths.iter().find(|p| !p.exists()) {
            return Err(ComposeError::AttachmentNotFound(missing.clone()));
        }

        self.attachments.extend(paths);
        Ok(())
    }

    /// Append a header; repeated names produce repeated entries
    pub fn push_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.headers.push(Header::new(name, value));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_priority_is_high() {
        assert_eq!(MessageDraft::new().priority, Priority(2));
    }

    #[test]
    fn test_priority_display() {
        assert_eq!(Priority::HIGHEST.to_string(), "1 (Highest)");
        assert_eq!(Priority::LOWEST.to_string(), "5 (Lowest)");
        assert_eq!(Priority(9).to_string(), "9");
        assert_eq!(Priority(0).label(), None);
    }

    #[test]
    fn test_add_attachments_appends_in_order() {
        let dir = TempDir::new().unwrap();
        let a = dir.path().join("a.txt");
        let b = dir.path().join("b.txt");
        std::fs::write(&a, "a").unwrap();
        std::fs::write(&b, "b").unwrap();

        let mut draft = MessageDraft::new();
        draft.add_attachments([&a]).unwrap();
        draft.add_attachments([&b, &a]).unwrap();

        assert_eq!(draft.attachments, vec![a.clone(), b, a]);
    }

    #[test]
    fn test_add_attachments_is_atomic() {
        let dir = TempDir::new().unwrap();
        let present = dir.path().join("present.txt");
        std::fs::write(&present, "here").unwrap();
        let missing = dir.path().join("missing.txt");

        let mut draft = MessageDraft::new();
        draft.add_attachments([&present]).unwrap();

        let err = draft
            .add_attachments([present.clone(), missing.clone(), present.clone()])
            .unwrap_err();

        match err {
            ComposeError::AttachmentNotFound(path) => assert_eq!(path, missing),
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(draft.attachments, vec![present]);
    }

    #[test]
    fn test_push_header_accumulates() {
        let mut draft = MessageDraft::new();
        draft.push_header("X-Tag", "one");
        draft.push_header("X-Tag", "two");

        assert_eq!(
            draft.headers,
            vec![Header::new("X-Tag", "one"), Header::new("X-Tag", "two")]
        );
    }
}
