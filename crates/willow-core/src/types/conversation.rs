use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::message::Message;

/// Title given to a conversation before its first user message arrives
pub const DEFAULT_TITLE: &str = "New chat";

/// Auto-derived titles are cut at this many characters
pub const TITLE_MAX_CHARS: usize = 50;

/// A titled, ordered collection of messages.
///
/// Insertion order of `messages` is the display order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub is_favorite: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub messages: Vec<Message>,
    /// True while the title is still auto-derived from the first user
    /// message; a manual rename pins the title and clears this.
    #[serde(default)]
    pub title_auto: bool,
}

impl Conversation {
    /// Create an empty conversation with the default title
    pub fn new(id: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            title: DEFAULT_TITLE.to_string(),
            is_favorite: false,
            created_at: now,
            updated_at: now,
            messages: Vec::new(),
            title_auto: true,
        }
    }

    /// Set a fixed title (pins it against auto-derivation)
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self.title_auto = false;
        self
    }

    /// Set the favorite flag
    pub fn with_favorite(mut self, favorite: bool) -> Self {
        self.is_favorite = favorite;
        self
    }

    /// Set both timestamps to a fixed instant
    pub fn with_timestamps(mut self, created: DateTime<Utc>, updated: DateTime<Utc>) -> Self {
        self.created_at = created;
        self.updated_at = updated;
        self
    }

    /// Append a message without touching the title
    pub fn push_message(&mut self, message: Message) {
        self.messages.push(message);
        self.touch();
    }

    /// Refresh the updated-at timestamp
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Get the last message, if any
    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Derive a title from the first user message: the first
    /// [`TITLE_MAX_CHARS`] characters, ellipsis-terminated when longer.
    pub fn derived_title(content: &str) -> String {
        let mut title: String = content.chars().take(TITLE_MAX_CHARS).collect();
        if content.chars().count() > TITLE_MAX_CHARS {
            title.push('…');
        }
        title
    }
}
