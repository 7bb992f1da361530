mod conversation;
mod message;

pub use conversation::{Conversation, DEFAULT_TITLE, TITLE_MAX_CHARS};
pub use message::{Message, MessageId, Role};
