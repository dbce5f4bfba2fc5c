//! Errors raised while composing, replying and sending

use std::path::PathBuf;

/// Result alias for compose operations
pub type Result<T> = std::result::Result<T, ComposeError>;

/// Broad classification of a [`ComposeError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The draft is incomplete or references something that does not exist
    Validation,
    /// The operation does not apply to this draft
    InvalidOperation,
    /// A required value could not be resolved
    InvalidState,
    /// The transport rejected or failed to deliver the message
    Transport,
    /// Rendering, serialization or local I/O failure
    Other,
}

#[derive(Debug, thiserror::Error)]
pub enum ComposeError {
    #[error("no recipient: `to` must contain at least one address")]
    MissingRecipient,

    #[error("no sender: `from` must be set")]
    MissingSender,

    #[error("attachment not found: {}", .0.display())]
    AttachmentNotFound(PathBuf),

    #[error("invalid address `{address}`: {reason}")]
    InvalidAddress { address: String, reason: String },

    #[error("invalid header `{name}`: {reason}")]
    InvalidHeader { name: String, reason: String },

    #[error("This is a new email. Use send().")]
    NotAReply,

    #[error("Reply from is not defined")]
    ReplyFromUndefined,

    #[error("failed to read attachment {}", path.display())]
    AttachmentRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to render view `{template}`: {cause:#}")]
    Render {
        template: String,
        cause: anyhow::Error,
    },

    #[error("failed to serialize message: {0:#}")]
    Serialize(anyhow::Error),

    #[error(transparent)]
    Transport(anyhow::Error),
}

impl ComposeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ComposeError::MissingRecipient
            | ComposeError::MissingSender
            | ComposeError::AttachmentNotFound(_)
            | ComposeError::InvalidAddress { .. }
            | ComposeError::InvalidHeader { .. } => ErrorKind::Validation,
            ComposeError::NotAReply => ErrorKind::InvalidOperation,
            ComposeError::ReplyFromUndefined => ErrorKind::InvalidState,
            ComposeError::Transport(_) => ErrorKind::Transport,
            ComposeError::AttachmentRead { .. }
            | ComposeError::Render { .. }
            | ComposeError::Serialize(_) => ErrorKind::Other,
        }
    }

    /// Map an I/O error raised while reading an attachment
    pub(crate) fn attachment_io(path: PathBuf, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            ComposeError::AttachmentNotFound(path)
        } else {
            ComposeError::AttachmentRead { path, source }
        }
    }
}
