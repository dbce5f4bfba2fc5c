//! Fluent builder for new messages and replies

use log::{debug, info};
use serde_json::Value;
use std::path::PathBuf;

use super::assembly::{OutgoingMessage, RawMessage};
use super::draft::{MessageDraft, Priority};
use super::error::{ComposeError, Result};
use super::reply::{ReplyContext, apply_reply_defaults};
use super::serialize::{LettreSerializer, MessageSerializer};
use super::transport::{MAILBOX_ME, SentMessage, Transport};
use super::view::ViewRenderer;
use crate::config::ComposeDefaults;
use crate::models::{Recipients, normalize};

/// Builder for an outgoing email
///
/// Setters consume and return the composer so calls chain. A composer is
/// used up by [`send`](Self::send) or [`reply`](Self::reply).
///
/// ```no_run
/// # fn demo(gmail: &mailer::GmailClient) -> mailer::compose::Result<()> {
/// use mailer::Composer;
///
/// let sent = Composer::new()
///     .from_named("me@example.com", "Me")
///     .to(["alice@example.com", "Bob <bob@example.com>"])
///     .subject("Release notes")
///     .body("<p>Shipped.</p>")
///     .attach(["notes.pdf"])?
///     .send(gmail)?;
/// println!("sent {} in thread {}", sent.id, sent.thread_id);
/// # Ok(())
/// # }
/// ```
pub struct Composer {
    draft: MessageDraft,
    serializer: Box<dyn MessageSerializer>,
}

impl Default for Composer {
    fn default() -> Self {
        Self::new()
    }
}

impl Composer {
    /// Create a composer with an empty draft
    pub fn new() -> Self {
        Self {
            draft: MessageDraft::new(),
            serializer: Box::new(LettreSerializer),
        }
    }

    /// Create a composer pre-filled with configured sender and priority
    pub fn with_defaults(defaults: &ComposeDefaults) -> Self {
        let mut composer = Self::new();
        if let Some(from) = &defaults.from {
            composer = composer.from_named(from.as_str(), defaults.from_name.as_deref().unwrap_or(""));
        }
        if let Some(priority) = defaults.priority {
            composer = composer.priority(priority);
        }
        composer
    }

    /// Replace the byte-stream serializer
    pub fn with_serializer(mut self, serializer: impl MessageSerializer + 'static) -> Self {
        self.serializer = Box::new(serializer);
        self
    }

    /// Current draft state
    pub fn draft(&self) -> &MessageDraft {
        &self.draft
    }

    pub fn to(self, recipients: impl Into<Recipients>) -> Self {
        self.to_named(recipients, "")
    }

    /// Set `to`; `name` is used for raw strings that carry no name of their own
    pub fn to_named(mut self, recipients: impl Into<Recipients>, name: &str) -> Self {
        self.draft.to = normalize(recipients, non_empty(name));
        self
    }

    pub fn from(self, sender: impl Into<Recipients>) -> Self {
        self.from_named(sender, "")
    }

    /// Set the sender; only the first address of a list is kept
    pub fn from_named(mut self, sender: impl Into<Recipients>, name: &str) -> Self {
        self.draft.from = normalize(sender, non_empty(name)).into_iter().next();
        self
    }

    pub fn cc(self, recipients: impl Into<Recipients>) -> Self {
        self.cc_named(recipients, "")
    }

    pub fn cc_named(mut self, recipients: impl Into<Recipients>, name: &str) -> Self {
        self.draft.cc = normalize(recipients, non_empty(name));
        self
    }

    pub fn bcc(self, recipients: impl Into<Recipients>) -> Self {
        self.bcc_named(recipients, "")
    }

    pub fn bcc_named(mut self, recipients: impl Into<Recipients>, name: &str) -> Self {
        self.draft.bcc = normalize(recipients, non_empty(name));
        self
    }

    /// Set the `Reply-To` addresses of the outgoing message
    pub fn reply_to(self, recipients: impl Into<Recipients>) -> Self {
        self.reply_to_named(recipients, "")
    }

    pub fn reply_to_named(mut self, recipients: impl Into<Recipients>, name: &str) -> Self {
        self.draft.reply_to = normalize(recipients, non_empty(name));
        self
    }

    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.draft.subject = Some(subject.into());
        self
    }

    /// Set the HTML body
    pub fn body(mut self, html: impl Into<String>) -> Self {
        self.draft.body_html = Some(html.into());
        self
    }

    /// Render a template and use the result as the HTML body
    pub fn view(mut self, renderer: &dyn ViewRenderer, template: &str, data: &Value) -> Result<Self> {
        let html = renderer
            .render(template, data)
            .map_err(|cause| ComposeError::Render {
                template: template.to_string(),
                cause,
            })?;
        self.draft.body_html = Some(html);
        Ok(self)
    }

    /// 1 is the highest priority and 5 the lowest; other values pass through
    pub fn priority(mut self, priority: impl Into<Priority>) -> Self {
        self.draft.priority = priority.into();
        self
    }

    /// Replace the query parameters forwarded to the transport
    pub fn optional_parameters<I, K, V>(mut self, parameters: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.draft.parameters = parameters
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self
    }

    /// Add a header; setting the same name twice yields two headers
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.draft.push_header(name, value);
        self
    }

    /// Queue files to attach. Fails without queueing anything if any path is missing.
    pub fn attach<I, P>(mut self, paths: I) -> Result<Self>
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.draft.add_attachments(paths)?;
        Ok(self)
    }

    /// Send as a new message
    pub fn send(self, transport: &dyn Transport) -> Result<SentMessage> {
        let payload = self.assemble()?;
        info!(
            "Sending message to {} recipient(s)",
            self.draft.to.len() + self.draft.cc.len() + self.draft.bcc.len()
        );
        self.deliver(transport, &payload)
    }

    /// Send as a reply to the message described by `context`
    ///
    /// Unset subject, recipients and sender are taken from the source
    /// message; thread headers and the thread id keep the reply in the
    /// source conversation.
    pub fn reply(mut self, transport: &dyn Transport, context: &dyn ReplyContext) -> Result<SentMessage> {
        apply_reply_defaults(&mut self.draft, context)?;

        let thread_id = self.draft.thread_id.clone();
        let payload = self.assemble()?.with_thread_id(thread_id);
        info!(
            "Replying in thread {}",
            payload.thread_id.as_ref().map_or("(none)", |t| t.as_str())
        );
        self.deliver(transport, &payload)
    }

    fn assemble(&self) -> Result<RawMessage> {
        let message = OutgoingMessage::from_draft(&self.draft)?;
        let bytes = self.serializer.serialize(&message)?;
        debug!(
            "Assembled message: {} bytes, {} attachment(s), {} extra header(s)",
            bytes.len(),
            message.attachments.len(),
            message.headers.len()
        );
        Ok(RawMessage::new(&bytes))
    }

    fn deliver(&self, transport: &dyn Transport, payload: &RawMessage) -> Result<SentMessage> {
        let sent = transport
            .send_raw(MAILBOX_ME, payload, &self.draft.parameters)
            .map_err(ComposeError::Transport)?;
        info!("Sent message {} (thread {})", sent.id, sent.thread_id);
        Ok(sent)
    }
}

fn non_empty(name: &str) -> Option<&str> {
    (!name.is_empty()).then_some(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Address, Header, Recipient};

    #[test]
    fn test_setters_overwrite() {
        let composer = Composer::new()
            .to("first@example.com")
            .to(["a@example.com", "b@example.com"])
            .subject("one")
            .subject("two")
            .priority(Priority::LOWEST);

        let draft = composer.draft();
        assert_eq!(draft.to.len(), 2);
        assert_eq!(draft.subject.as_deref(), Some("two"));
        assert_eq!(draft.priority, Priority::LOWEST);
    }

    #[test]
    fn test_named_setter_applies_to_raw_strings() {
        let composer = Composer::new().cc_named("c@example.com", "Carol");
        assert_eq!(composer.draft().cc[0].display_name(), "Carol");
    }

    #[test]
    fn test_from_keeps_first_address() {
        let composer = Composer::new().from(vec![
            Recipient::from(Address::with_name("Me", "me@example.com")),
            Recipient::from("other@example.com"),
        ]);
        let from = composer.draft().from.clone().unwrap();
        assert_eq!(from.email(), "me@example.com");
        assert_eq!(from.display_name(), "Me");
    }

    #[test]
    fn test_out_of_range_priority_passes_through() {
        let composer = Composer::new().priority(9u8);
        assert_eq!(composer.draft().priority, Priority(9));
    }

    #[test]
    fn test_headers_accumulate() {
        let composer = Composer::new()
            .header("X-Mailer", "a")
            .header("X-Mailer", "b");
        assert_eq!(
            composer.draft().headers,
            vec![Header::new("X-Mailer", "a"), Header::new("X-Mailer", "b")]
        );
    }

    #[test]
    fn test_optional_parameters_replaced() {
        let composer = Composer::new()
            .optional_parameters([("a", "1")])
            .optional_parameters([("b", "2")]);
        let params = &composer.draft().parameters;
        assert_eq!(params.len(), 1);
        assert_eq!(params.get("b").map(String::as_str), Some("2"));
    }

    #[test]
    fn test_view_sets_body() {
        let renderer = |template: &str, _: &Value| -> anyhow::Result<String> {
            Ok(format!("<p>{template}</p>"))
        };
        let composer = Composer::new()
            .view(&renderer, "greeting", &Value::Null)
            .unwrap();
        assert_eq!(composer.draft().body_html.as_deref(), Some("<p>greeting</p>"));
    }

    #[test]
    fn test_view_error_propagates() {
        let renderer = |_: &str, _: &Value| -> anyhow::Result<String> {
            anyhow::bail!("template missing")
        };
        let err = Composer::new()
            .view(&renderer, "missing", &Value::Null)
            .err()
            .unwrap();
        assert!(matches!(err, ComposeError::Render { ref template, .. } if template == "missing"));
    }

    #[test]
    fn test_with_defaults() {
        let defaults = ComposeDefaults {
            from: Some("noreply@example.com".to_string()),
            from_name: Some("Robot".to_string()),
            priority: Some(Priority::NORMAL),
        };
        let composer = Composer::with_defaults(&defaults);
        let from = composer.draft().from.clone().unwrap();
        assert_eq!(from.email(), "noreply@example.com");
        assert_eq!(from.display_name(), "Robot");
        assert_eq!(composer.draft().priority, Priority::NORMAL);
    }

    #[test]
    fn test_with_empty_defaults() {
        let composer = Composer::with_defaults(&ComposeDefaults::default());
        assert!(composer.draft().from.is_none());
        assert_eq!(composer.draft().priority, Priority::HIGH);
    }
}
