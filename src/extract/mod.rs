//! Body and attachment extraction from a message part tree.
//!
//! The two walks have different termination policies and are kept apart on
//! purpose: [`extract_body`] stops at the first acceptable part, while
//! [`extract_attachments`] always visits every node.

mod decode;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

use crate::error::GmailSearchError;
use crate::models::Part;

pub use decode::{decode_body_data, encode_body_data};

/// Returned by body extraction when no textual content was found.
pub const NO_CONTENT: &str = "(No Content)";

const TEXT_PLAIN: &str = "text/plain";
const TEXT_HTML: &str = "text/html";

/// How [`extract_body_with`] picks the body among the parts of a message.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyStrategy {
    /// First `text/plain` or `text/html` child in document order.
    ///
    /// The first nested container met during the scan is descended into and
    /// its result is returned as is, even [`NO_CONTENT`]; later siblings are
    /// never examined.
    #[serde(alias = "first-match")]
    FirstMatch,
    /// Scan the whole tree, take the first `text/plain` part, then the first
    /// `text/html` part.
    #[default]
    #[serde(alias = "prefer-plain")]
    PreferPlain,
}

impl fmt::Display for BodyStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FirstMatch => write!(f, "first-match"),
            Self::PreferPlain => write!(f, "prefer-plain"),
        }
    }
}

impl FromStr for BodyStrategy {
    type Err = GmailSearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "first-match" => Ok(Self::FirstMatch),
            "prefer-plain" => Ok(Self::PreferPlain),
            other => Err(GmailSearchError::new(format!(
                "unknown body strategy '{}', expected first-match or prefer-plain",
                other
            ))),
        }
    }
}

/// Extracts the textual body of a message with the default strategy.
///
/// See [`extract_body_with`].
pub fn extract_body(root: &Part) -> String {
    extract_body_with(root, BodyStrategy::default())
}

/// Extracts the textual body of a message.
///
/// A leaf root is decoded whatever its MIME type. Parts whose data is not
/// valid base64url are treated as having no data. Returns [`NO_CONTENT`]
/// when nothing qualifies.
///
/// This walk short-circuits; unlike [`extract_attachments`] it does not
/// visit the whole tree.
pub fn extract_body_with(root: &Part, strategy: BodyStrategy) -> String {
    let body = match strategy {
        BodyStrategy::FirstMatch => first_match(root),
        BodyStrategy::PreferPlain => prefer_plain(root),
    };
    body.unwrap_or_else(|| NO_CONTENT.to_string())
}

/// Collects the filenames of every attachment below `root`.
///
/// A part is an attachment when it has a filename and an attachment id.
/// The walk is exhaustive and pre-order: a part is reported before its
/// children and siblings keep document order. `root` itself is the message
/// and is never reported. Duplicates are kept.
pub fn extract_attachments(root: &Part) -> Vec<String> {
    let mut names = Vec::new();
    collect_attachments(root, &mut names);
    names
}

fn collect_attachments(part: &Part, names: &mut Vec<String>) {
    for child in part.children() {
        if child.is_attachment() {
            if let Some(filename) = child.filename() {
                trace!(filename, "attachment found");
                names.push(filename.to_string());
            }
        }
        collect_attachments(child, names);
    }
}

fn first_match(part: &Part) -> Option<String> {
    for child in part.children() {
        if is_mime(child, TEXT_PLAIN) || is_mime(child, TEXT_HTML) {
            if let Some(text) = decoded(child) {
                return Some(text);
            }
        }
        if child.is_container() {
            return first_match(child);
        }
    }
    decoded(part)
}

fn prefer_plain(root: &Part) -> Option<String> {
    if !root.is_container() {
        return decoded(root);
    }
    find_text(root, TEXT_PLAIN)
        .or_else(|| find_text(root, TEXT_HTML))
        .or_else(|| decoded(root))
}

fn find_text(part: &Part, mime_type: &str) -> Option<String> {
    part.children().iter().find_map(|child| {
        if is_mime(child, mime_type) {
            if let Some(text) = decoded(child) {
                return Some(text);
            }
        }
        find_text(child, mime_type)
    })
}

fn is_mime(part: &Part, mime_type: &str) -> bool {
    part.mime_type().eq_ignore_ascii_case(mime_type)
}

fn decoded(part: &Part) -> Option<String> {
    let data = part.body().data.as_deref()?;
    match decode_body_data(data) {
        Ok(text) => Some(text),
        Err(e) => {
            warn!(mime_type = part.mime_type(), "skipping undecodable body data: {}", e);
            None
        }
    }
}
