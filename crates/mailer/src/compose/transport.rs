//! Transport seam between the composer and the mail provider

use anyhow::Result;
use serde::Deserialize;
use std::collections::BTreeMap;

use super::assembly::RawMessage;
use crate::models::{MessageId, ThreadId};

/// Mailbox alias for the authenticated account
pub const MAILBOX_ME: &str = "me";

/// Delivers an assembled payload and reports the provider-assigned ids
///
/// Implementations perform a single attempt; failures are returned as-is.
pub trait Transport: Send + Sync {
    fn send_raw(
        &self,
        mailbox: &str,
        payload: &RawMessage,
        parameters: &BTreeMap<String, String>,
    ) -> Result<SentMessage>;
}

/// Provider response for an accepted message
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentMessage {
    pub id: MessageId,
    pub thread_id: ThreadId,
    #[serde(default)]
    pub label_ids: Vec<String>,
}
