#![deny(missing_docs)]

//! Search exported Gmail messages and pull out what matters in them.
//!
//! The core of the crate walks a message's MIME part tree to find a textual
//! body and the names of its attachments. Around it sit a small search layer
//! over a pluggable [`MessageSource`] and the terminal rendering used by the
//! `gmail-search` binary.

pub mod config;
pub mod error;
pub mod extract;
pub mod models;
pub mod render;
pub mod search;

pub use config::Config;
pub use error::{GmailSearchError, Result};
pub use extract::{extract_attachments, extract_body, extract_body_with, BodyStrategy, NO_CONTENT};
pub use models::{Message, Part};
pub use search::{DirectorySource, MessageSource, SearchQuery, Searcher};
