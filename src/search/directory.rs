//! Message source backed by a directory of exported messages.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::{MessageSource, SearchQuery};
use crate::{
    error::{GmailSearchError, Result},
    models::{ListMessagesResponse, Message, MessageRef},
};

const MESSAGE_EXTENSION: &str = "json";

/// Reads messages from `*.json` files, one full "get message" response per file.
///
/// A message without an `id` field takes the file stem as its id. Ids seen
/// by the last directory scan are remembered so fetching a listed message
/// reads a single file.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
    index: RefCell<HashMap<String, PathBuf>>,
}

impl DirectorySource {
    /// Creates a source over the given directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            index: RefCell::new(HashMap::new()),
        }
    }

    /// The directory messages are read from.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn message_files(&self) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            if path.is_file()
                && path.extension().and_then(|e| e.to_str()) == Some(MESSAGE_EXTENSION)
            {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }

    fn load(path: &Path) -> Result<Message> {
        let text = fs::read_to_string(path)?;
        let mut message: Message = serde_json::from_str(&text)?;
        if message.id.is_empty() {
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                message.id = stem.to_string();
            }
        }
        Ok(message)
    }

    /// Loads `path` and keeps it only if it holds message `id`.
    fn load_if_id(path: &Path, id: &str) -> Option<Message> {
        match Self::load(path) {
            Ok(message) if message.id == id => Some(message),
            Ok(message) => {
                debug!(path = %path.display(), found = %message.id, wanted = id, "id mismatch");
                None
            }
            Err(e) => {
                debug!(path = %path.display(), "candidate file unreadable: {}", e);
                None
            }
        }
    }

    /// Loads every readable message, skipping files that fail to parse, and
    /// rebuilds the id index.
    fn load_all(&self) -> Result<Vec<Message>> {
        let mut messages = Vec::new();
        let mut index = HashMap::new();
        for path in self.message_files()? {
            match Self::load(&path) {
                Ok(message) => {
                    index.entry(message.id.clone()).or_insert(path);
                    messages.push(message);
                }
                Err(e) => warn!(path = %path.display(), "skipping unreadable message: {}", e),
            }
        }
        *self.index.borrow_mut() = index;
        Ok(messages)
    }
}

impl MessageSource for DirectorySource {
    fn list(&self, query: &SearchQuery) -> Result<ListMessagesResponse> {
        let messages: Vec<MessageRef> = self
            .load_all()?
            .into_iter()
            .filter(|message| query.matches(message))
            .map(|message| MessageRef {
                id: message.id,
                thread_id: message.thread_id,
            })
            .collect();
        debug!(root = %self.root.display(), matches = messages.len(), "directory listing");
        Ok(ListMessagesResponse {
            result_size_estimate: messages.len() as u32,
            messages,
            next_page_token: None,
        })
    }

    fn get(&self, id: &str) -> Result<Message> {
        let indexed = self.index.borrow().get(id).cloned();
        if let Some(message) = indexed.and_then(|path| Self::load_if_id(&path, id)) {
            return Ok(message);
        }

        // Ids that are plain file names may be stored under that name.
        if Path::new(id).file_name().and_then(|n| n.to_str()) == Some(id) {
            let path = self.root.join(format!("{}.{}", id, MESSAGE_EXTENSION));
            if path.is_file() {
                if let Some(message) = Self::load_if_id(&path, id) {
                    return Ok(message);
                }
            }
        }

        self.load_all()?
            .into_iter()
            .find(|message| message.id == id)
            .ok_or_else(|| GmailSearchError::MessageNotFound(id.to_string()))
    }
}
