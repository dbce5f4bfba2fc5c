//! Message composition, reply threading and dispatch
//!
//! [`Composer`] collects the message through chained setters and hands a
//! fully assembled payload to a [`Transport`]. Replies pull missing fields
//! from a [`ReplyContext`] describing the source message.

mod assembly;
mod composer;
mod draft;
mod error;
mod reply;
mod serialize;
mod transport;
mod view;

pub use assembly::{OutgoingMessage, RawMessage, encode_raw};
pub use composer::Composer;
pub use draft::{MessageDraft, Priority};
pub use error::{ComposeError, ErrorKind, Result};
pub use reply::{ReplyContext, THREAD_HEADERS, apply_reply_defaults};
pub use serialize::{LettreSerializer, MessageSerializer};
pub use transport::{MAILBOX_ME, SentMessage, Transport};
pub use view::ViewRenderer;
