//! Key-value persistence port.
//!
//! Every durable piece of state in the demo goes through [`KvStore`]: a
//! string-keyed get/set/remove interface injected into its consumers, so
//! tests can swap in [`MemoryKv`] and the TUI can run with [`FileKv`].
//! Reads and writes are synchronous; there is a single logical writer.

use thiserror::Error;

mod file;
mod memory;

pub use file::FileKv;
pub use memory::MemoryKv;

/// Fixed storage keys, one entry per persisted piece of state
pub mod keys {
    pub const CONVERSATIONS: &str = "willow-conversations";
    pub const SUBSCRIPTION: &str = "willow-subscription";
    pub const SETTINGS: &str = "willow-settings";
    pub const USER: &str = "willow-user";
    pub const AUTH: &str = "willow-auth";
    pub const THEME: &str = "willow-theme";
}

/// Storage error type
#[derive(Error, Debug)]
pub enum KvError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid key: {key}")]
    InvalidKey { key: String },
}

/// Storage result type
pub type KvResult<T> = Result<T, KvError>;

/// String-keyed persistence interface.
///
/// A missing key reads as `None`; removing a missing key is not an error.
pub trait KvStore: Send + Sync {
    /// Read the value stored under `key`
    fn get(&self, key: &str) -> KvResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&self, key: &str, value: &str) -> KvResult<()>;

    /// Delete the value stored under `key`
    fn remove(&self, key: &str) -> KvResult<()>;
}
