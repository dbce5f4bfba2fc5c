//! Serialization of an [`OutgoingMessage`] into RFC 5322 bytes
//!
//! MIME generation is delegated to `lettre`'s message builder. `X-Priority`,
//! the thread headers and caller headers are appended as raw headers so
//! repeated names survive; lettre encodes and folds their values.

use anyhow::Context;
use lettre::message::header::{ContentType, HeaderName, HeaderValue};
use lettre::message::{Attachment, Mailbox, MessageBuilder, MultiPart, SinglePart};

use super::assembly::OutgoingMessage;
use super::error::{ComposeError, Result};
use crate::models::Address;

/// Turns a resolved message into a raw internet-message byte stream
pub trait MessageSerializer: Send + Sync {
    fn serialize(&self, message: &OutgoingMessage) -> Result<Vec<u8>>;
}

/// Default serializer backed by `lettre`
#[derive(Debug, Default, Clone, Copy)]
pub struct LettreSerializer;

impl LettreSerializer {
    /// Fields written by the builder itself; caller headers may not repeat them
    const BUILDER_FIELDS: [&'static str; 11] = [
        "From",
        "Sender",
        "To",
        "Cc",
        "Bcc",
        "Reply-To",
        "Subject",
        "Date",
        "MIME-Version",
        "Content-Type",
        "Content-Transfer-Encoding",
    ];
}

impl MessageSerializer for LettreSerializer {
    fn serialize(&self, message: &OutgoingMessage) -> Result<Vec<u8>> {
        let from = message.from.as_ref().ok_or(ComposeError::MissingSender)?;

        let mut builder = lettre::Message::builder()
            .from(mailbox(from)?)
            .subject(message.subject.clone().unwrap_or_default())
            .keep_bcc();

        for addr in &message.to {
            builder = builder.to(mailbox(addr)?);
        }
        for addr in &message.cc {
            builder = builder.cc(mailbox(addr)?);
        }
        for addr in &message.bcc {
            builder = builder.bcc(mailbox(addr)?);
        }
        for addr in &message.reply_to {
            builder = builder.reply_to(mailbox(addr)?);
        }

        builder = with_raw_header(builder, "X-Priority", message.priority.to_string())?;

        for header in &message.headers {
            if Self::BUILDER_FIELDS
                .iter()
                .any(|field| field.eq_ignore_ascii_case(&header.name))
            {
                return Err(ComposeError::InvalidHeader {
                    name: header.name.clone(),
                    reason: "set through the composer instead".to_string(),
                });
            }
            builder = with_raw_header(builder, &header.name, header.value.clone())?;
        }

        let html = SinglePart::html(message.body_html.clone().unwrap_or_default());

        let built = if message.attachments.is_empty() {
            builder.singlepart(html)
        } else {
            let mut parts = MultiPart::mixed().singlepart(html);
            for path in &message.attachments {
                parts = parts.singlepart(attachment_part(path)?);
            }
            builder.multipart(parts)
        };
        let built = built
            .context("Failed to build MIME message")
            .map_err(ComposeError::Serialize)?;

        Ok(built.formatted())
    }
}

/// Append a header, keeping any earlier header with the same name
fn with_raw_header(builder: MessageBuilder, name: &str, value: String) -> Result<MessageBuilder> {
    let name = HeaderName::new_from_ascii(name.to_string()).map_err(|e| {
        ComposeError::InvalidHeader {
            name: name.to_string(),
            reason: e.to_string(),
        }
    })?;
    Ok(builder.raw_header(HeaderValue::new(name, value)))
}

fn mailbox(address: &Address) -> Result<Mailbox> {
    let email = address
        .email()
        .parse::<lettre::Address>()
        .map_err(|e| ComposeError::InvalidAddress {
            address: address.email().to_string(),
            reason: e.to_string(),
        })?;
    Ok(Mailbox::new(address.name().map(str::to_string), email))
}

fn attachment_part(path: &std::path::Path) -> Result<SinglePart> {
    let content =
        std::fs::read(path).map_err(|e| ComposeError::attachment_io(path.to_path_buf(), e))?;

    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "attachment".to_string());

    let content_type = ContentType::parse("application/octet-stream")
        .context("Invalid attachment content type")
        .map_err(ComposeError::Serialize)?;

    Ok(Attachment::new(filename).body(content, content_type))
}
