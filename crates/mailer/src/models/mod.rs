//! Domain models for outgoing mail

mod address;
mod header;
mod ids;
pub mod recipients;

pub use address::Address;
pub use header::{Header, find_header};
pub use ids::{MessageId, ThreadId};
pub use recipients::{Recipient, Recipients, normalize};
