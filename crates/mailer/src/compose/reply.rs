//! Reply defaulting: filling a draft from the message being replied to

use log::debug;

use super::draft::MessageDraft;
use super::error::{ComposeError, Result};
use crate::models::{Address, MessageId, ThreadId, normalize};

/// Headers copied from the source message to keep the reply in its thread
pub const THREAD_HEADERS: [&str; 3] = ["In-Reply-To", "References", "Message-ID"];

/// What a reply needs to know about the message it answers
pub trait ReplyContext {
    /// Provider id of the source message; `None` means there is nothing to reply to
    fn id(&self) -> Option<MessageId>;

    fn thread_id(&self) -> Option<ThreadId>;

    /// Value of a source header (case-insensitive name)
    fn header(&self, name: &str) -> Option<String>;

    fn subject(&self) -> Option<String>;

    /// Where a reply should go: the source `Reply-To`, else its sender
    fn reply_to_target(&self) -> Option<Address>;

    /// Address of the account the reply is sent from
    fn authenticated_address(&self) -> Option<String>;
}

/// Fill the reply-only fields of `draft` that the caller left unset.
///
/// Fails with [`ComposeError::NotAReply`] before touching the draft when the
/// context has no source id, and with [`ComposeError::ReplyFromUndefined`]
/// when no sender can be resolved.
pub fn apply_reply_defaults(draft: &mut MessageDraft, context: &dyn ReplyContext) -> Result<()> {
    let source_id = context.id().ok_or(ComposeError::NotAReply)?;
    debug!("Applying reply defaults from message {}", source_id);

    // Thread linkage
    if let Some(thread_id) = context.thread_id() {
        for name in THREAD_HEADERS {
            if let Some(value) = context.header(name) {
                draft.push_header(name, value);
            }
        }
        draft.thread_id = Some(thread_id);
    }

    if draft.subject.is_none() {
        draft.subject = context.subject();
    }

    // Left empty when the source names nobody; assembly reports the missing recipient
    if draft.to.is_empty()
        && let Some(target) = context.reply_to_target()
    {
        debug!("Replying to {}", target.display());
        draft.to = normalize(target, None);
    }

    if draft.from.is_none() {
        let account = context
            .authenticated_address()
            .filter(|a| !a.trim().is_empty())
            .ok_or(ComposeError::ReplyFromUndefined)?;
        draft.from = normalize(account, None).into_iter().next();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Header;

    #[derive(Default)]
    struct Source {
        id: Option<&'static str>,
        thread_id: Option<&'static str>,
        headers: Vec<Header>,
        subject: Option<&'static str>,
        target: Option<Address>,
        account: Option<&'static str>,
    }

    impl ReplyContext for Source {
        fn id(&self) -> Option<MessageId> {
            self.id.map(MessageId::new)
        }

        fn thread_id(&self) -> Option<ThreadId> {
            self.thread_id.map(ThreadId::new)
        }

        fn header(&self, name: &str) -> Option<String> {
            crate::models::find_header(&self.headers, name).map(str::to_string)
        }

        fn subject(&self) -> Option<String> {
            self.subject.map(str::to_string)
        }

        fn reply_to_target(&self) -> Option<Address> {
            self.target.clone()
        }

        fn authenticated_address(&self) -> Option<String> {
            self.account.map(str::to_string)
        }
    }

    fn threaded_source() -> Source {
        Source {
            id: Some("m1"),
            thread_id: Some("T123"),
            headers: vec![
                Header::new("Message-ID", "<m1>"),
                Header::new("References", "<m0>"),
            ],
            subject: Some("Hi"),
            target: Some(Address::with_name("A", "a@b.com")),
            account: Some("me@co.com"),
        }
    }

    #[test]
    fn test_no_source_id_fails_before_defaulting() {
        let source = Source {
            id: None,
            ..threaded_source()
        };
        let mut draft = MessageDraft::new();

        let err = apply_reply_defaults(&mut draft, &source).unwrap_err();
        assert!(matches!(err, ComposeError::NotAReply));
        assert!(draft.headers.is_empty());
        assert!(draft.subject.is_none());
        assert!(draft.to.is_empty());
        assert!(draft.thread_id().is_none());
    }

    #[test]
    fn test_defaults_filled_from_source() {
        let mut draft = MessageDraft::new();
        apply_reply_defaults(&mut draft, &threaded_source()).unwrap();

        assert_eq!(draft.subject.as_deref(), Some("Hi"));
        assert_eq!(draft.to, vec![Address::new("a@b.com")]);
        assert_eq!(draft.to[0].display_name(), "A");
        assert_eq!(draft.from, Some(Address::new("me@co.com")));
        assert_eq!(draft.from.as_ref().unwrap().display_name(), "");
        assert_eq!(draft.thread_id(), Some(&ThreadId::new("T123")));
        assert_eq!(
            draft.headers,
            vec![
                Header::new("References", "<m0>"),
                Header::new("Message-ID", "<m1>"),
            ]
        );
    }

    #[test]
    fn test_all_thread_headers_copied_in_order() {
        let source = Source {
            headers: vec![
                Header::new("Message-ID", "<m1>"),
                Header::new("References", "<m0>"),
                Header::new("In-Reply-To", "<m0>"),
            ],
            ..threaded_source()
        };
        let mut draft = MessageDraft::new();
        apply_reply_defaults(&mut draft, &source).unwrap();

        let names: Vec<&str> = draft.headers.iter().map(|h| h.name.as_str()).collect();
        assert_eq!(names, THREAD_HEADERS);
    }

    #[test]
    fn test_no_target_leaves_to_empty() {
        let source = Source {
            target: None,
            ..threaded_source()
        };
        let mut draft = MessageDraft::new();
        apply_reply_defaults(&mut draft, &source).unwrap();

        assert!(draft.to.is_empty());
        assert_eq!(draft.from, Some(Address::new("me@co.com")));
    }

    #[test]
    fn test_explicit_values_win() {
        let mut draft = MessageDraft {
            subject: Some("Re: Hi".to_string()),
            to: vec![Address::new("other@b.com")],
            from: Some(Address::new("alias@co.com")),
            ..MessageDraft::default()
        };
        apply_reply_defaults(&mut draft, &threaded_source()).unwrap();

        assert_eq!(draft.subject.as_deref(), Some("Re: Hi"));
        assert_eq!(draft.to, vec![Address::new("other@b.com")]);
        assert_eq!(draft.from, Some(Address::new("alias@co.com")));
    }

    #[test]
    fn test_without_thread_no_linkage_headers() {
        let source = Source {
            thread_id: None,
            ..threaded_source()
        };
        let mut draft = MessageDraft::new();
        apply_reply_defaults(&mut draft, &source).unwrap();

        assert!(draft.headers.is_empty());
        assert!(draft.thread_id().is_none());
        assert_eq!(draft.subject.as_deref(), Some("Hi"));
    }

    #[test]
    fn test_missing_account_fails() {
        let source = Source {
            account: None,
            ..threaded_source()
        };
        let err = apply_reply_defaults(&mut MessageDraft::new(), &source).unwrap_err();
        assert!(matches!(err, ComposeError::ReplyFromUndefined));
    }

    #[test]
    fn test_blank_account_fails() {
        let source = Source {
            account: Some("  "),
            ..threaded_source()
        };
        let err = apply_reply_defaults(&mut MessageDraft::new(), &source).unwrap_err();
        assert!(matches!(err, ComposeError::ReplyFromUndefined));
    }
}
