use std::fs;

use gmail_search::{
    extract::encode_body_data,
    extract_attachments, extract_body, extract_body_with,
    models::MessagePart,
    search::MessageSource,
    BodyStrategy, DirectorySource, Part, SearchQuery, Searcher, NO_CONTENT,
};
use serde_json::{json, Value};
use tempfile::TempDir;

fn part(value: Value) -> Part {
    let raw: MessagePart = serde_json::from_value(value).expect("valid payload");
    Part::try_from(&raw).expect("valid tree")
}

#[test]
fn test_leaf_body_is_decoded() {
    let root = part(json!({
        "mimeType": "text/plain",
        "body": { "data": encode_body_data("Grüße aus Zürich") }
    }));
    assert_eq!(extract_body(&root), "Grüße aus Zürich");
}

#[test]
fn test_invalid_utf8_is_replaced_not_rejected() {
    let root = part(json!({
        "mimeType": "text/plain",
        "body": { "data": encode_body_data([0x48, 0x69, 0xc3, 0x28]) }
    }));
    assert_eq!(extract_body(&root), "Hi\u{FFFD}(");
}

#[test]
fn test_empty_leaf_is_no_content() {
    let root = part(json!({ "mimeType": "text/plain", "body": { "size": 0 } }));
    assert_eq!(extract_body(&root), NO_CONTENT);
    assert_eq!(extract_body(&root), "(No Content)");
}

#[test]
fn test_first_plain_child_wins() {
    let root = part(json!({
        "mimeType": "multipart/alternative",
        "parts": [
            { "mimeType": "text/plain", "body": { "data": "SGVsbG8=" } },
            { "mimeType": "text/html", "body": { "data": encode_body_data("<b>Bye</b>") } }
        ]
    }));
    assert_eq!(extract_body_with(&root, BodyStrategy::FirstMatch), "Hello");
    assert_eq!(extract_body_with(&root, BodyStrategy::PreferPlain), "Hello");
}

#[test]
fn test_attachments_in_tree_order() {
    let root = part(json!({
        "mimeType": "multipart/mixed",
        "parts": [
            { "mimeType": "text/plain", "body": { "data": "SGVsbG8=" } },
            { "mimeType": "application/pdf", "filename": "x.pdf", "body": { "attachmentId": "1" } },
            {
                "mimeType": "multipart/mixed",
                "parts": [
                    { "mimeType": "image/png", "filename": "y.png", "body": { "attachmentId": "2" } }
                ]
            }
        ]
    }));
    assert_eq!(extract_attachments(&root), vec!["x.pdf", "y.png"]);
}

#[test]
fn test_no_attachments() {
    let root = part(json!({
        "mimeType": "multipart/alternative",
        "body": { "size": 0 },
        "parts": [
            { "mimeType": "text/plain", "filename": "", "body": { "data": "SGVsbG8=" } },
            { "mimeType": "text/html", "filename": "", "body": { "data": "SGVsbG8=" } }
        ]
    }));
    assert!(extract_attachments(&root).is_empty());
}

#[test]
fn test_sibling_attachments_are_all_reported() {
    let root = part(json!({
        "mimeType": "multipart/mixed",
        "parts": [
            { "mimeType": "application/zip", "filename": "one.zip", "body": { "attachmentId": "a" } },
            { "mimeType": "application/zip", "filename": "two.zip", "body": { "attachmentId": "b" } }
        ]
    }));
    assert_eq!(extract_attachments(&root), vec!["one.zip", "two.zip"]);
}

#[test]
fn test_text_round_trip() {
    for text in ["", "plain ascii", "emoji 📬 and ñ", "line\r\nbreaks\n", "日本語"] {
        let root = part(json!({
            "mimeType": "text/plain",
            "body": { "data": encode_body_data(text) }
        }));
        let expected = if text.is_empty() { NO_CONTENT } else { text };
        assert_eq!(extract_body(&root), expected);
    }
}

#[test]
fn test_first_match_short_circuits_on_nested_container() {
    let root = part(json!({
        "mimeType": "multipart/mixed",
        "parts": [
            {
                "mimeType": "multipart/related",
                "parts": [
                    { "mimeType": "image/gif", "filename": "spacer.gif", "body": { "attachmentId": "g" } }
                ]
            },
            { "mimeType": "text/plain", "body": { "data": encode_body_data("sibling") } }
        ]
    }));
    assert_eq!(extract_body_with(&root, BodyStrategy::FirstMatch), NO_CONTENT);
    assert_eq!(extract_body_with(&root, BodyStrategy::PreferPlain), "sibling");
    assert_eq!(extract_attachments(&root), vec!["spacer.gif"]);
}

#[test]
fn test_first_match_stops_at_empty_parts_array() {
    let root = part(json!({
        "mimeType": "multipart/mixed",
        "parts": [
            { "mimeType": "multipart/related", "parts": [] },
            { "mimeType": "text/plain", "body": { "data": encode_body_data("sibling") } }
        ]
    }));
    assert_eq!(extract_body_with(&root, BodyStrategy::FirstMatch), NO_CONTENT);
    assert_eq!(extract_body_with(&root, BodyStrategy::PreferPlain), "sibling");
}

#[test]
fn test_search_reports_the_listed_message_not_its_file_namesake() {
    let dir = TempDir::new().expect("tempdir");
    let message = |id: &str, from: &str, subject: &str, text: &str| {
        json!({
            "id": id,
            "payload": {
                "mimeType": "text/plain",
                "headers": [
                    { "name": "From", "value": from },
                    { "name": "Subject", "value": subject }
                ],
                "body": { "data": encode_body_data(text) }
            }
        })
    };
    fs::write(
        dir.path().join("a.json"),
        message("b", "a@x.com", "invoice A", "body of A").to_string(),
    )
    .expect("write");
    fs::write(
        dir.path().join("b.json"),
        message("c", "z@x.com", "other", "body of B-file").to_string(),
    )
    .expect("write");

    let searcher = Searcher::builder()
        .source(DirectorySource::new(dir.path()))
        .build();
    let report = searcher
        .search(&SearchQuery::new("a@x.com", "invoice"))
        .expect("search");

    assert!(report.failures.is_empty());
    assert_eq!(report.summaries.len(), 1);
    assert_eq!(report.summaries[0].id, "b");
    assert_eq!(report.summaries[0].subject, "invoice A");
    assert_eq!(report.summaries[0].body, "body of A");
}

#[test]
fn test_directory_search_end_to_end() {
    let dir = TempDir::new().expect("tempdir");
    let message = json!({
        "id": "18d4a",
        "threadId": "18d4a",
        "payload": {
            "mimeType": "multipart/mixed",
            "headers": [
                { "name": "From", "value": "Billing <billing@example.com>" },
                { "name": "Subject", "value": "Your March invoice" },
                { "name": "Date", "value": "Fri, 1 Mar 2024 08:30:00 +0000" }
            ],
            "body": { "size": 0 },
            "parts": [
                {
                    "mimeType": "multipart/alternative",
                    "parts": [
                        { "mimeType": "text/html", "body": { "data": encode_body_data("<p>Total: 10</p>") } },
                        { "mimeType": "text/plain", "body": { "data": encode_body_data("Total: 10") } }
                    ]
                },
                { "mimeType": "application/pdf", "filename": "march.pdf", "body": { "attachmentId": "ANG1" } }
            ]
        }
    });
    fs::write(dir.path().join("18d4a.json"), message.to_string()).expect("write");
    fs::write(dir.path().join("corrupt.json"), "[1, 2").expect("write");

    let source = DirectorySource::new(dir.path());
    let query = SearchQuery::new("billing@example.com", "invoice");
    assert_eq!(source.list(&query).expect("list").messages.len(), 1);

    let searcher = Searcher::builder().source(&source).build();
    let report = searcher.search(&query).expect("search");
    assert!(report.failures.is_empty());
    assert_eq!(report.summaries.len(), 1);

    let summary = &report.summaries[0];
    assert_eq!(summary.id, "18d4a");
    assert_eq!(summary.subject, "Your March invoice");
    assert_eq!(summary.date, "Fri, 1 Mar 2024 08:30:00 +0000");
    assert_eq!(summary.body, "Total: 10");
    assert_eq!(summary.attachments, vec!["march.pdf"]);

    let legacy = Searcher::builder()
        .source(&source)
        .strategy(BodyStrategy::FirstMatch)
        .build();
    let report = legacy.search(&query).expect("search");
    assert_eq!(report.summaries[0].body, "<p>Total: 10</p>");
}
