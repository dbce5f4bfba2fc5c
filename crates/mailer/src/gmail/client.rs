//! Gmail API HTTP client
//!
//! Fetches source messages and the account profile, and sends raw messages.
//! Uses synchronous HTTP (ureq) to be executor-agnostic.

use anyhow::{Context, Result};
use std::collections::BTreeMap;
use url::Url;

use super::GmailAuth;
use super::api::{GmailMessage, ProfileResponse};
use crate::compose::{RawMessage, SentMessage, Transport};
use crate::models::MessageId;

/// Error indicating the requested message does not exist (404 from Gmail)
#[derive(Debug, thiserror::Error)]
#[error("Message {0} not found")]
pub struct MessageNotFoundError(pub MessageId);

/// Gmail API client
pub struct GmailClient {
    auth: GmailAuth,
}

impl GmailClient {
    /// Gmail API base URL
    const BASE_URL: &'static str = "https://gmail.googleapis.com/gmail/v1";

    /// Create a new Gmail client
    pub fn new(auth: GmailAuth) -> Self {
        Self { auth }
    }

    /// Get a message's metadata (headers, labels, thread) by ID
    pub fn get_message(&self, id: &MessageId) -> Result<GmailMessage> {
        let access_token = self.auth.get_access_token()?;

        let url = format!(
            "{}/users/me/messages/{}?format=metadata",
            Self::BASE_URL,
            urlencoding::encode(id.as_str())
        );

        let response = ureq::get(&url)
            .header("Authorization", &format!("Bearer {}", access_token))
            .call();

        match response {
            Ok(mut resp) => resp
                .body_mut()
                .read_json()
                .context("Failed to parse message response"),
            Err(ureq::Error::StatusCode(404)) => Err(MessageNotFoundError(id.clone()).into()),
            Err(e) => Err(anyhow::anyhow!("Failed to fetch message {}: {}", id, e)),
        }
    }

    /// Get the authenticated user's profile (includes their address)
    pub fn get_profile(&self) -> Result<ProfileResponse> {
        let access_token = self.auth.get_access_token()?;

        let url = format!("{}/users/me/profile", Self::BASE_URL);

        let mut response = ureq::get(&url)
            .header("Authorization", &format!("Bearer {}", access_token))
            .call()
            .context("Failed to send get profile request")?;

        let profile: ProfileResponse = response
            .body_mut()
            .read_json()
            .context("Failed to parse profile response")?;

        Ok(profile)
    }

    /// Send a raw message through `users.messages.send`
    ///
    /// # Arguments
    /// * `mailbox` - User id, normally `me`
    /// * `payload` - Encoded message, with a thread id when replying
    /// * `parameters` - Extra query parameters passed through unchanged
    pub fn send_message(
        &self,
        mailbox: &str,
        payload: &RawMessage,
        parameters: &BTreeMap<String, String>,
    ) -> Result<SentMessage> {
        let access_token = self.auth.get_access_token()?;
        let url = Self::send_url(mailbox, parameters)?;

        let response = ureq::post(url.as_str())
            .header("Authorization", &format!("Bearer {}", access_token))
            .send_json(payload);

        match response {
            Ok(mut resp) => resp
                .body_mut()
                .read_json()
                .context("Failed to parse send response"),
            Err(ureq::Error::StatusCode(status)) => {
                Err(anyhow::anyhow!("Gmail rejected the message (HTTP {})", status))
            }
            Err(e) => Err(anyhow::anyhow!("Failed to send message: {}", e)),
        }
    }

    fn send_url(mailbox: &str, parameters: &BTreeMap<String, String>) -> Result<Url> {
        let base = format!(
            "{}/users/{}/messages/send",
            Self::BASE_URL,
            urlencoding::encode(mailbox)
        );
        Url::parse_with_params(&base, parameters.iter()).context("Failed to build send URL")
    }

    /// Check if the client is authenticated
    pub fn is_authenticated(&self) -> bool {
        self.auth.is_authenticated()
    }

    /// Trigger authentication flow
    pub fn authenticate(&self) -> Result<()> {
        self.auth.get_access_token()?;
        Ok(())
    }
}

impl Transport for GmailClient {
    fn send_raw(
        &self,
        mailbox: &str,
        payload: &RawMessage,
        parameters: &BTreeMap<String, String>,
    ) -> Result<SentMessage> {
        self.send_message(mailbox, payload, parameters)
    }
}
