//! Validated message part tree.

use tracing::trace;

use super::{MessagePart, MessagePartBody};
use crate::error::{GmailSearchError, Result};

/// Default nesting limit accepted by [`Part::from_raw`].
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Body of a part with empty strings already normalized away.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Body {
    /// Inline content, base64url encoded.
    pub data: Option<String>,
    /// Reference to content stored out of band.
    pub attachment_id: Option<String>,
}

impl From<&MessagePartBody> for Body {
    fn from(body: &MessagePartBody) -> Self {
        Self {
            data: non_empty(body.data.as_deref()),
            attachment_id: non_empty(body.attachment_id.as_deref()),
        }
    }
}

/// A node of a message's content tree.
///
/// A raw part with a `parts` array becomes a `Container`, even when the
/// array is empty. Containers keep their own body because real messages
/// sometimes carry one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Part {
    /// A part with no children.
    Leaf {
        /// MIME type, e.g. `text/plain`.
        mime_type: String,
        /// Attachment filename.
        filename: Option<String>,
        /// Part body.
        body: Body,
    },
    /// A part holding child parts, e.g. `multipart/alternative`.
    Container {
        /// MIME type, e.g. `multipart/mixed`.
        mime_type: String,
        /// Attachment filename, rarely set on containers.
        filename: Option<String>,
        /// Part body, usually empty.
        body: Body,
        /// Children in document order.
        parts: Vec<Part>,
    },
}

impl Part {
    /// Builds a validated tree from a raw payload.
    ///
    /// # Errors
    ///
    /// Returns [`GmailSearchError::MalformedDocument`] when parts are nested
    /// deeper than `max_depth` levels below `raw`.
    pub fn from_raw(raw: &MessagePart, max_depth: usize) -> Result<Self> {
        Self::parse(raw, 0, max_depth)
    }

    fn parse(raw: &MessagePart, depth: usize, max_depth: usize) -> Result<Self> {
        if depth > max_depth {
            return Err(GmailSearchError::MalformedDocument(format!(
                "part nesting exceeds {} levels",
                max_depth
            )));
        }

        let mime_type = raw.mime_type.clone().unwrap_or_default();
        let filename = non_empty(raw.filename.as_deref());
        let body = raw.body.as_ref().map(Body::from).unwrap_or_default();

        match raw.parts.as_deref() {
            Some(children) => {
                trace!(depth, %mime_type, children = children.len(), "container part");
                let parts = children
                    .iter()
                    .map(|child| Self::parse(child, depth + 1, max_depth))
                    .collect::<Result<Vec<_>>>()?;
                Ok(Self::Container {
                    mime_type,
                    filename,
                    body,
                    parts,
                })
            }
            None => Ok(Self::Leaf {
                mime_type,
                filename,
                body,
            }),
        }
    }

    /// The MIME type of this part.
    pub fn mime_type(&self) -> &str {
        match self {
            Self::Leaf { mime_type, .. } | Self::Container { mime_type, .. } => mime_type,
        }
    }

    /// The attachment filename, if any.
    pub fn filename(&self) -> Option<&str> {
        match self {
            Self::Leaf { filename, .. } | Self::Container { filename, .. } => filename.as_deref(),
        }
    }

    /// The body of this part.
    pub fn body(&self) -> &Body {
        match self {
            Self::Leaf { body, .. } | Self::Container { body, .. } => body,
        }
    }

    /// Child parts; empty for leaves and for containers with an empty `parts` array.
    pub fn children(&self) -> &[Part] {
        match self {
            Self::Leaf { .. } => &[],
            Self::Container { parts, .. } => parts,
        }
    }

    /// Returns true for containers.
    pub fn is_container(&self) -> bool {
        matches!(self, Self::Container { .. })
    }

    /// Returns true when this part references out-of-band content under a filename.
    pub fn is_attachment(&self) -> bool {
        self.filename().is_some() && self.body().attachment_id.is_some()
    }
}

impl TryFrom<&MessagePart> for Part {
    type Error = GmailSearchError;

    fn try_from(raw: &MessagePart) -> Result<Self> {
        Self::from_raw(raw, DEFAULT_MAX_DEPTH)
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_string)
}
