//! Terminal rendering of message summaries.

use colored::*;

use crate::search::MessageSummary;

/// Default number of body characters shown per message.
pub const DEFAULT_PREVIEW_LEN: usize = 500;

/// Returns at most the first `max_chars` characters of `body`.
pub fn preview(body: &str, max_chars: usize) -> &str {
    match body.char_indices().nth(max_chars) {
        Some((end, _)) => &body[..end],
        None => body,
    }
}

/// Formats a summary as the block printed for each matching message.
pub fn format_summary(summary: &MessageSummary, preview_len: usize) -> String {
    let attachments = if summary.attachments.is_empty() {
        "None".to_string()
    } else {
        summary.attachments.join(", ")
    };

    [
        format!("{} {}", "Email ID:".bright_blue().bold(), summary.id),
        format!("{} {}", "Date:".blue(), summary.date),
        format!("{} {}", "Subject:".blue(), summary.subject.bold()),
        format!(
            "{} {}",
            "Body Preview:".cyan(),
            preview(&summary.body, preview_len)
        ),
        format!("{} {}", "Attachments:".yellow(), attachments),
    ]
    .join("\n")
}
