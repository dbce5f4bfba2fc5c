//! Canonical assembly of a draft into a sendable payload

use base64::prelude::*;
use serde::Serialize;
use std::path::PathBuf;

use super::draft::{MessageDraft, Priority};
use super::error::{ComposeError, Result};
use crate::models::{Address, Header, ThreadId};

/// Fully resolved message, ready for serialization
///
/// Empty `cc`, `bcc` and `reply_to` lists mean the header is omitted.
#[derive(Debug, Clone)]
pub struct OutgoingMessage {
    pub subject: Option<String>,
    pub from: Option<Address>,
    pub to: Vec<Address>,
    pub cc: Vec<Address>,
    pub bcc: Vec<Address>,
    pub reply_to: Vec<Address>,
    pub body_html: Option<String>,
    pub priority: Priority,
    pub attachments: Vec<PathBuf>,
    pub headers: Vec<Header>,
}

impl OutgoingMessage {
    /// Resolve a draft, failing if `to` or the sender is missing or an
    /// attachment disappeared
    pub fn from_draft(draft: &MessageDraft) -> Result<Self> {
        if draft.to.is_empty() {
            return Err(ComposeError::MissingRecipient);
        }
        if draft.from.is_none() {
            return Err(ComposeError::MissingSender);
        }

        if let Some(missing) = draft.attachments.iter().find(|p| !p.exists()) {
            return Err(ComposeError::AttachmentNotFound(missing.clone()));
        }

        Ok(Self {
            subject: draft.subject.clone(),
            from: draft.from.clone(),
            to: draft.to.clone(),
            cc: draft.cc.clone(),
            bcc: draft.bcc.clone(),
            reply_to: draft.reply_to.clone(),
            body_html: draft.body_html.clone(),
            priority: draft.priority,
            attachments: draft.attachments.clone(),
            headers: draft.headers.clone(),
        })
    }

    /// All headers with the given name, in insertion order
    pub fn headers_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.headers
            .iter()
            .filter(move |h| h.is(name))
            .map(|h| h.value.as_str())
    }
}

/// Payload accepted by the Gmail `messages.send` endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMessage {
    /// RFC 5322 message, URL-safe base64 without padding
    pub raw: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thread_id: Option<ThreadId>,
}

impl RawMessage {
    pub fn new(bytes: &[u8]) -> Self {
        Self {
            raw: encode_raw(bytes),
            thread_id: None,
        }
    }

    pub fn with_thread_id(mut self, thread_id: Option<ThreadId>) -> Self {
        self.thread_id = thread_id;
        self
    }
}

/// Encode serialized message bytes the way Gmail expects in `raw`.
///
/// Standard base64 with `+` → `-`, `/` → `_` and trailing `=` removed.
pub fn encode_raw(bytes: &[u8]) -> String {
    BASE64_URL_SAFE_NO_PAD.encode(bytes)
}
