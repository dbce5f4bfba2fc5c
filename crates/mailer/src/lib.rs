//! Mailer crate - compose, send and reply to email through the Gmail API
//!
//! This crate provides:
//! - Address model and recipient normalization
//! - A fluent [`Composer`] for new messages and threaded replies
//! - Canonical assembly into a raw, URL-safe base64 encoded payload
//! - Gmail API client and OAuth authentication as the default transport
//! - Credential and compose-default configuration
//!
//! Sending is synchronous; the crate imposes no retries or timeouts on top
//! of the transport.

pub mod compose;
pub mod config;
pub mod gmail;
pub mod models;

pub use crate::compose::{
    ComposeError, Composer, ErrorKind, LettreSerializer, MessageDraft, MessageSerializer,
    OutgoingMessage, Priority, RawMessage, ReplyContext, SentMessage, Transport, ViewRenderer,
};
pub use crate::config::{ComposeDefaults, GmailCredentials};
pub use crate::gmail::{GmailAuth, GmailClient, MessageNotFoundError, SourceMessage, api::ProfileResponse};
pub use crate::models::{Address, Header, MessageId, Recipient, Recipients, ThreadId, normalize};
