//! Message models mirroring the Gmail "get message" and "list messages" responses.

use serde::{Deserialize, Serialize};

/// Fallback subject for messages without a `Subject` header.
pub const NO_SUBJECT: &str = "No Subject";
/// Fallback date for messages without a `Date` header.
pub const NO_DATE: &str = "No Date";

/// A full message as returned by a `format=full` get request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// The immutable id of the message.
    #[serde(default)]
    pub id: String,
    /// The id of the thread the message belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thread_id: Option<String>,
    /// Labels applied to the message.
    #[serde(default)]
    pub label_ids: Vec<String>,
    /// A short part of the message text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
    /// Internal creation timestamp in epoch milliseconds, as a string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub internal_date: Option<String>,
    /// The parsed email structure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<MessagePart>,
}

impl Message {
    /// Returns the first payload header named `name`, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.payload.as_ref()?.header(name)
    }

    /// Returns the `Subject` header, or [`NO_SUBJECT`].
    pub fn subject(&self) -> &str {
        self.header("Subject").unwrap_or(NO_SUBJECT)
    }

    /// Returns the `Date` header, or [`NO_DATE`].
    pub fn date(&self) -> &str {
        self.header("Date").unwrap_or(NO_DATE)
    }
}

/// One node of the raw message payload tree, exactly as it arrives on the wire.
///
/// Use [`Part::from_raw`](super::Part::from_raw) to get a validated tree.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessagePart {
    /// The immutable id of the part.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub part_id: Option<String>,
    /// The MIME type of the part.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    /// The filename of the attachment, empty for body parts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    /// Headers of this part.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub headers: Vec<MessagePartHeader>,
    /// The part body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<MessagePartBody>,
    /// Child parts, only present on container MIME types.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parts: Option<Vec<MessagePart>>,
}

impl MessagePart {
    /// Returns the first header named `name`, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|h| h.name.eq_ignore_ascii_case(name))
            .map(|h| h.value.as_str())
    }
}

/// The body of a message part.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessagePartBody {
    /// Number of bytes of the body data.
    #[serde(default)]
    pub size: u64,
    /// The body data, base64url encoded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    /// Reference to content fetched separately through the attachments endpoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment_id: Option<String>,
}

/// A single header of a message part.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessagePartHeader {
    /// Header name, e.g. `Subject`.
    pub name: String,
    /// Header value.
    pub value: String,
}

/// A reference to a message returned by a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageRef {
    /// The id of the message.
    pub id: String,
    /// The id of the thread the message belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thread_id: Option<String>,
}

/// Response from listing messages.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListMessagesResponse {
    /// Matching messages. Absent from the wire when nothing matched.
    #[serde(default)]
    pub messages: Vec<MessageRef>,
    /// Token for retrieving the next page of results.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
    /// Estimated total number of results.
    #[serde(default)]
    pub result_size_estimate: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_full_message() {
        let message: Message = serde_json::from_value(json!({
            "id": "18c1",
            "threadId": "18c0",
            "labelIds": ["INBOX"],
            "payload": {
                "mimeType": "multipart/mixed",
                "filename": "",
                "headers": [
                    { "name": "subject", "value": "Quarterly report" },
                    { "name": "Date", "value": "Mon, 1 Jan 2024 10:00:00 +0000" }
                ],
                "body": { "size": 0 },
                "parts": [
                    { "partId": "0", "mimeType": "text/plain", "body": { "size": 5, "data": "SGVsbG8=" } }
                ]
            }
        }))
        .expect("valid message");

        assert_eq!(message.thread_id.as_deref(), Some("18c0"));
        assert_eq!(message.subject(), "Quarterly report");
        assert_eq!(message.date(), "Mon, 1 Jan 2024 10:00:00 +0000");
        let payload = message.payload.as_ref().expect("payload");
        assert_eq!(payload.parts.as_ref().map(Vec::len), Some(1));
    }

    #[test]
    fn test_missing_headers_fall_back() {
        let message: Message = serde_json::from_value(json!({ "id": "1" })).expect("valid");
        assert_eq!(message.subject(), NO_SUBJECT);
        assert_eq!(message.date(), NO_DATE);
    }

    #[test]
    fn test_empty_listing() {
        let list: ListMessagesResponse =
            serde_json::from_value(json!({ "resultSizeEstimate": 0 })).expect("valid");
        assert!(list.messages.is_empty());
        assert!(list.next_page_token.is_none());
    }
}
