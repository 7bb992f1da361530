//! # Willow Conversation Store
//!
//! Willow 聊天演示的会话状态存储。
//!
//! ## 功能特性
//!
//! - **会话集合管理**：创建、删除、重命名、收藏
//! - **消息操作**：追加、就地编辑、删除、截断尾部
//! - **活跃指针**：最多一个活跃会话，删除后自动重新指向
//! - **标题派生**：首条用户消息自动派生标题（50 字符截断）
//! - **搜索视图**：标题子串过滤，不修改底层集合
//! - **快照持久化**：每次变更整体序列化写入 KvStore，启动时回读，
//!   失败则回退到种子数据
//!
//! ## 使用示例
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use willow_core::{MemoryKv, Role};
//! use willow_session::ConversationStore;
//!
//! let kv = Arc::new(MemoryKv::new());
//! let mut store = ConversationStore::load(kv);
//!
//! let id = store.start_new_chat();
//! store.add_message(Role::User, "Explain JWT", None, None);
//! assert_eq!(store.active_id(), Some(id.as_str()));
//! ```

mod seed;
mod store;

pub use seed::seed_conversations;
pub use store::ConversationStore;

/// 版本信息
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
