//! Source message for replies, built from Gmail API data

use anyhow::{Context, Result};
use log::debug;

use super::GmailClient;
use super::api::GmailMessage;
use crate::compose::ReplyContext;
use crate::models::{Address, Header, MessageId, ThreadId, find_header};

/// A fetched message that a reply can be composed against
#[derive(Debug, Clone)]
pub struct SourceMessage {
    id: MessageId,
    thread_id: Option<ThreadId>,
    headers: Vec<Header>,
    account_address: Option<String>,
}

impl SourceMessage {
    /// Fetch a message and the account address needed to reply to it
    pub fn fetch(client: &GmailClient, id: &MessageId) -> Result<Self> {
        let message = client.get_message(id)?;
        let profile = client
            .get_profile()
            .context("Failed to look up the authenticated account")?;
        debug!(
            "Fetched source message {} for account {}",
            id, profile.email_address
        );
        Ok(Self::from_api(message, Some(profile.email_address)))
    }

    /// Build from an API message; `account_address` is the replying account
    pub fn from_api(message: GmailMessage, account_address: Option<String>) -> Self {
        let headers = message
            .payload
            .and_then(|p| p.headers)
            .unwrap_or_default();

        Self {
            id: MessageId::new(message.id),
            thread_id: message.thread_id.map(ThreadId::new),
            headers,
            account_address,
        }
    }

    pub fn headers(&self) -> &[Header] {
        &self.headers
    }

    /// Parsed `From` header, if present
    pub fn sender(&self) -> Option<Address> {
        find_header(&self.headers, "From").map(Address::parse)
    }
}

impl ReplyContext for SourceMessage {
    fn id(&self) -> Option<MessageId> {
        Some(self.id.clone())
    }

    fn thread_id(&self) -> Option<ThreadId> {
        self.thread_id.clone()
    }

    fn header(&self, name: &str) -> Option<String> {
        find_header(&self.headers, name).map(str::to_string)
    }

    fn subject(&self) -> Option<String> {
        self.header("Subject")
    }

    fn reply_to_target(&self) -> Option<Address> {
        find_header(&self.headers, "Reply-To")
            .and_then(|value| Address::parse_list(value).into_iter().next())
            .or_else(|| self.sender())
            .filter(|address| !address.email().is_empty())
    }

    fn authenticated_address(&self) -> Option<String> {
        self.account_address.clone()
    }
}
