//! Data structures for Gmail message payloads.

mod message;
mod part;

pub use message::{
    ListMessagesResponse, Message, MessagePart, MessagePartBody, MessagePartHeader, MessageRef,
    NO_DATE, NO_SUBJECT,
};
pub use part::{Body, Part, DEFAULT_MAX_DEPTH};
