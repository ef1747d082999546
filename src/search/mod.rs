//! Message search and summarization.

mod directory;

use std::fmt;

use serde::Serialize;
use tracing::{debug, info, warn};
use typed_builder::TypedBuilder;

use crate::{
    error::Result,
    extract::{extract_attachments, extract_body_with, BodyStrategy, NO_CONTENT},
    models::{ListMessagesResponse, Message, Part, DEFAULT_MAX_DEPTH},
};

pub use directory::DirectorySource;

/// A sender and subject search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    /// Sender address to match.
    pub from: String,
    /// Text the subject must contain.
    pub subject: String,
}

impl SearchQuery {
    /// Creates a new query.
    pub fn new(from: impl Into<String>, subject: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            subject: subject.into(),
        }
    }

    /// Evaluates the query against a message's headers.
    ///
    /// Both terms are case-insensitive substring matches; an empty term
    /// matches every message.
    pub fn matches(&self, message: &Message) -> bool {
        contains_ignore_case(message.header("From").unwrap_or_default(), &self.from)
            && contains_ignore_case(message.header("Subject").unwrap_or_default(), &self.subject)
    }
}

/// Renders the query in Gmail search syntax.
impl fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "from:{} subject:{}", self.from, self.subject)
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Supplies candidate messages for a query.
pub trait MessageSource {
    /// Lists the messages matching `query`, in the shape of a Gmail listing.
    fn list(&self, query: &SearchQuery) -> Result<ListMessagesResponse>;

    /// Fetches a full message by id.
    fn get(&self, id: &str) -> Result<Message>;
}

impl<T: MessageSource + ?Sized> MessageSource for &T {
    fn list(&self, query: &SearchQuery) -> Result<ListMessagesResponse> {
        (**self).list(query)
    }

    fn get(&self, id: &str) -> Result<Message> {
        (**self).get(id)
    }
}

/// What gets printed for one message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageSummary {
    /// Message id.
    pub id: String,
    /// `Date` header.
    pub date: String,
    /// `Subject` header.
    pub subject: String,
    /// Full extracted body.
    pub body: String,
    /// Attachment filenames in document order.
    pub attachments: Vec<String>,
}

/// A message that could not be summarized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchFailure {
    /// Id of the message.
    pub id: String,
    /// Description of the failure.
    pub error: String,
}

/// Outcome of a search.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchReport {
    /// The query in Gmail search syntax.
    pub query: String,
    /// Summaries of the messages that were processed.
    pub summaries: Vec<MessageSummary>,
    /// Messages that failed, in listing order.
    pub failures: Vec<SearchFailure>,
}

impl SearchReport {
    /// Returns true when the search listed no messages at all.
    pub fn is_empty(&self) -> bool {
        self.summaries.is_empty() && self.failures.is_empty()
    }
}

/// Runs queries against a [`MessageSource`] and summarizes the matches.
#[derive(Debug, TypedBuilder)]
pub struct Searcher<S> {
    /// Where messages come from.
    source: S,
    /// Body selection strategy.
    #[builder(default)]
    strategy: BodyStrategy,
    /// Maximum accepted part nesting.
    #[builder(default = DEFAULT_MAX_DEPTH)]
    max_depth: usize,
}

impl<S: MessageSource> Searcher<S> {
    /// Lists the messages matching `query` and summarizes each of them.
    ///
    /// A message that cannot be fetched or parsed is recorded in
    /// [`SearchReport::failures`] and the remaining messages are still
    /// processed.
    ///
    /// # Errors
    ///
    /// Returns an error only if the listing itself fails.
    pub fn search(&self, query: &SearchQuery) -> Result<SearchReport> {
        let refs = self.source.list(query)?.messages;
        info!(query = %query, count = refs.len(), "listed messages");

        let mut report = SearchReport {
            query: query.to_string(),
            ..Default::default()
        };

        for message_ref in refs {
            let summary = self
                .source
                .get(&message_ref.id)
                .and_then(|message| self.summarize(&message));
            match summary {
                Ok(summary) => report.summaries.push(summary),
                Err(e) => {
                    warn!(id = %message_ref.id, "failed to process message: {}", e);
                    report.failures.push(SearchFailure {
                        id: message_ref.id,
                        error: e.to_string(),
                    });
                }
            }
        }

        Ok(report)
    }

    /// Extracts the id, date, subject, body and attachment names of a message.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload nests deeper than the configured limit.
    pub fn summarize(&self, message: &Message) -> Result<MessageSummary> {
        let (body, attachments) = match &message.payload {
            Some(payload) => {
                let root = Part::from_raw(payload, self.max_depth)?;
                (
                    extract_body_with(&root, self.strategy),
                    extract_attachments(&root),
                )
            }
            None => (NO_CONTENT.to_string(), Vec::new()),
        };
        debug!(id = %message.id, attachments = attachments.len(), "summarized message");

        Ok(MessageSummary {
            id: message.id.clone(),
            date: message.date().to_string(),
            subject: message.subject().to_string(),
            body,
            attachments,
        })
    }

    /// The underlying message source.
    pub fn source(&self) -> &S {
        &self.source
    }
}
