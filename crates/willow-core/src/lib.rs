pub mod chat;
pub mod storage;
pub mod types;

pub use chat::StreamChunk;
pub use storage::{keys, FileKv, KvError, KvResult, KvStore, MemoryKv};
pub use types::{Conversation, Message, MessageId, Role};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
