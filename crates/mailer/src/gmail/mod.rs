//! Gmail API integration
//!
//! This module provides:
//! - OAuth2 authentication flow
//! - Gmail API client: fetch source messages, look up the account, send
//! - [`SourceMessage`], the reply context built from a fetched message

mod auth;
mod client;
mod source;

pub use auth::GmailAuth;
pub use client::{GmailClient, MessageNotFoundError};
pub use source::SourceMessage;

/// Gmail API response types
pub mod api {
    use serde::Deserialize;

    pub use crate::models::Header;

    /// Message resource as returned by `messages.get`
    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct GmailMessage {
        pub id: String,
        pub thread_id: Option<String>,
        pub payload: Option<MessagePayload>,
    }

    /// Top-level payload; only the headers matter for replies
    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct MessagePayload {
        pub headers: Option<Vec<Header>>,
    }

    /// Response from `users.getProfile`
    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ProfileResponse {
        pub email_address: String,
    }
}
