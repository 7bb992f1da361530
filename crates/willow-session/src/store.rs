//! # ConversationStore
//!
//! 会话集合的唯一事实来源，负责：
//! - 维护内存中的会话列表与活跃指针
//! - 每次变更后将完整快照写入 KvStore（尽力而为，失败只记日志）
//! - 启动时从快照恢复，损坏或缺失时回退到种子数据

use std::sync::Arc;

use tracing::{debug, warn};
use uuid::Uuid;

use willow_core::storage::keys;
use willow_core::{Conversation, KvStore, Message, MessageId, Role};

use crate::seed::seed_conversations;

/// 会话存储
///
/// 单写者结构：所有变更都在 UI 循环上同步发生，无并发写者，
/// 因此唯一 id 的"生成-检查-重试"循环是安全的。
pub struct ConversationStore {
    kv: Arc<dyn KvStore>,
    conversations: Vec<Conversation>,
    active_id: Option<String>,
    search_query: String,
}

impl ConversationStore {
    /// 从 KvStore 快照恢复；缺失或损坏时使用种子数据
    pub fn load(kv: Arc<dyn KvStore>) -> Self {
        let conversations = match kv.get(keys::CONVERSATIONS) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<Conversation>>(&raw) {
                Ok(conversations) => conversations,
                Err(err) => {
                    warn!("conversation snapshot is corrupt, falling back to seed: {err}");
                    seed_conversations()
                }
            },
            Ok(None) => seed_conversations(),
            Err(err) => {
                warn!("failed to read conversation snapshot, falling back to seed: {err}");
                seed_conversations()
            }
        };

        let active_id = conversations.first().map(|c| c.id.clone());
        Self {
            kv,
            conversations,
            active_id,
            search_query: String::new(),
        }
    }

    /// 创建空会话：生成不冲突的新 id，插到列表最前并设为活跃
    pub fn start_new_chat(&mut self) -> String {
        let id = self.generate_conversation_id();
        self.conversations.insert(0, Conversation::new(id.as_str()));
        self.active_id = Some(id.clone());
        debug!("started new chat {id}");
        self.persist();
        id
    }

    /// 向目标会话（默认活跃会话）追加一条消息。
    ///
    /// 目标无法解析时静默返回 `None`。空会话的首条用户消息会派生标题
    /// （除非标题已被手动固定）。`message_id` 允许把流式占位 id
    /// 原样提升为落库消息 id。
    pub fn add_message(
        &mut self,
        role: Role,
        content: impl Into<String>,
        conversation_id: Option<&str>,
        message_id: Option<MessageId>,
    ) -> Option<Message> {
        let target = self.resolve_target(conversation_id)?;
        let content = content.into();

        let conversation = self.conversations.iter_mut().find(|c| c.id == target)?;
        if conversation.messages.is_empty() && role == Role::User && conversation.title_auto {
            conversation.title = Conversation::derived_title(&content);
        }

        let message = match message_id {
            Some(id) => Message::with_id(id, role, content),
            None => Message::new(role, content),
        };
        conversation.push_message(message.clone());
        self.persist();
        Some(message)
    }

    /// 就地替换消息内容；角色和时间戳保持不变
    pub fn update_message(
        &mut self,
        message_id: &str,
        new_content: impl Into<String>,
        conversation_id: Option<&str>,
    ) {
        let Some(target) = self.resolve_target(conversation_id) else {
            return;
        };
        let Some(conversation) = self.conversations.iter_mut().find(|c| c.id == target) else {
            return;
        };
        let Some(message) = conversation.messages.iter_mut().find(|m| m.id == message_id) else {
            return;
        };
        message.content = new_content.into();
        conversation.touch();
        self.persist();
    }

    /// 按 id 删除恰好一条消息
    pub fn remove_message(&mut self, message_id: &str, conversation_id: Option<&str>) {
        let Some(target) = self.resolve_target(conversation_id) else {
            return;
        };
        let Some(conversation) = self.conversations.iter_mut().find(|c| c.id == target) else {
            return;
        };
        let Some(index) = conversation.messages.iter().position(|m| m.id == message_id) else {
            return;
        };
        conversation.messages.remove(index);
        conversation.touch();
        self.persist();
    }

    /// 截断消息序列，使其止于（并包含）给定消息；id 不存在则不动
    pub fn remove_messages_after(&mut self, message_id: &str, conversation_id: Option<&str>) {
        let Some(target) = self.resolve_target(conversation_id) else {
            return;
        };
        let Some(conversation) = self.conversations.iter_mut().find(|c| c.id == target) else {
            return;
        };
        let Some(index) = conversation.messages.iter().position(|m| m.id == message_id) else {
            return;
        };
        if index + 1 < conversation.messages.len() {
            conversation.messages.truncate(index + 1);
            conversation.touch();
            self.persist();
        }
    }

    /// 删除会话及其全部消息；若删的是活跃会话，指针移到剩余的第一个
    pub fn delete_conversation(&mut self, id: &str) {
        let before = self.conversations.len();
        self.conversations.retain(|c| c.id != id);
        if self.conversations.len() == before {
            return;
        }
        if self.active_id.as_deref() == Some(id) {
            self.active_id = self.conversations.first().map(|c| c.id.clone());
        }
        debug!("deleted conversation {id}");
        self.persist();
    }

    /// 按原样设置标题（调用方负责修剪和非空校验），并固定它
    pub fn rename_conversation(&mut self, id: &str, title: impl Into<String>) {
        let Some(conversation) = self.conversations.iter_mut().find(|c| c.id == id) else {
            return;
        };
        conversation.title = title.into();
        conversation.title_auto = false;
        conversation.touch();
        self.persist();
    }

    /// 翻转收藏标记
    pub fn toggle_favorite(&mut self, id: &str) {
        let Some(conversation) = self.conversations.iter_mut().find(|c| c.id == id) else {
            return;
        };
        conversation.is_favorite = !conversation.is_favorite;
        conversation.touch();
        self.persist();
    }

    /// 清空全部会话并清除活跃指针（破坏性操作，这一层不做确认）
    pub fn clear_all_conversations(&mut self) {
        self.conversations.clear();
        self.active_id = None;
        self.persist();
    }

    /// 设为活跃会话；id 不存在则不动
    pub fn set_active(&mut self, id: &str) {
        if self.conversations.iter().any(|c| c.id == id) {
            self.active_id = Some(id.to_string());
        }
    }

    pub fn active_id(&self) -> Option<&str> {
        self.active_id.as_deref()
    }

    pub fn active_conversation(&self) -> Option<&Conversation> {
        let id = self.active_id.as_deref()?;
        self.conversations.iter().find(|c| c.id == id)
    }

    pub fn get(&self, id: &str) -> Option<&Conversation> {
        self.conversations.iter().find(|c| c.id == id)
    }

    /// 完整集合（不受搜索过滤影响）
    pub fn conversations(&self) -> &[Conversation] {
        &self.conversations
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    /// 搜索视图：标题大小写不敏感的子串匹配；查询为空时返回全部
    pub fn filtered_conversations(&self) -> Vec<&Conversation> {
        if self.search_query.is_empty() {
            return self.conversations.iter().collect();
        }
        let needle = self.search_query.to_lowercase();
        self.conversations
            .iter()
            .filter(|c| c.title.to_lowercase().contains(&needle))
            .collect()
    }

    fn resolve_target(&self, conversation_id: Option<&str>) -> Option<String> {
        conversation_id
            .map(str::to_string)
            .or_else(|| self.active_id.clone())
    }

    fn generate_conversation_id(&self) -> String {
        loop {
            let id = Uuid::new_v4().to_string();
            if !self.conversations.iter().any(|c| c.id == id) {
                return id;
            }
        }
    }

    /// 整体快照写入；失败只告警，不打断演示
    fn persist(&self) {
        let snapshot = match serde_json::to_string(&self.conversations) {
            Ok(snapshot) => snapshot,
            Err(err) => {
                warn!("failed to serialize conversation snapshot: {err}");
                return;
            }
        };
        if let Err(err) = self.kv.set(keys::CONVERSATIONS, &snapshot) {
            warn!("failed to persist conversation snapshot: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use willow_core::MemoryKv;

    fn empty_store() -> ConversationStore {
        let mut store = ConversationStore::load(Arc::new(MemoryKv::new()));
        store.clear_all_conversations();
        store
    }

    #[test]
    fn test_load_falls_back_to_seed() {
        let store = ConversationStore::load(Arc::new(MemoryKv::new()));
        assert_eq!(store.conversations().len(), 4);
        assert_eq!(
            store.active_id(),
            Some(store.conversations()[0].id.as_str())
        );
    }

    #[test]
    fn test_load_falls_back_on_corrupt_snapshot() {
        let kv = Arc::new(MemoryKv::new());
        kv.set(keys::CONVERSATIONS, "{not json").unwrap();
        let store = ConversationStore::load(kv);
        assert_eq!(store.conversations().len(), 4);
    }

    #[test]
    fn test_start_new_chat_prepends_and_activates() {
        let mut store = empty_store();
        let first = store.start_new_chat();
        let second = store.start_new_chat();

        assert_eq!(store.conversations()[0].id, second);
        assert_eq!(store.conversations()[1].id, first);
        assert_eq!(store.active_id(), Some(second.as_str()));
    }

    #[test]
    fn test_new_chat_ids_are_distinct() {
        let mut store = empty_store();
        let mut ids: Vec<String> = (0..16).map(|_| store.start_new_chat()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 16);
    }

    #[test]
    fn test_add_message_appends_in_call_order() {
        let mut store = empty_store();
        store.start_new_chat();
        for i in 0..5 {
            store.add_message(Role::User, format!("message {i}"), None, None);
        }

        let conversation = store.active_conversation().unwrap();
        let contents: Vec<&str> = conversation
            .messages
            .iter()
            .map(|m| m.content.as_str())
            .collect();
        assert_eq!(
            contents,
            vec![
                "message 0",
                "message 1",
                "message 2",
                "message 3",
                "message 4"
            ]
        );
    }

    #[test]
    fn test_add_message_without_target_is_noop() {
        let mut store = empty_store();
        assert!(store
            .add_message(Role::User, "orphan", None, None)
            .is_none());
    }

    #[test]
    fn test_first_user_message_derives_title() {
        let mut store = empty_store();
        store.start_new_chat();
        store.add_message(Role::User, "Explain JWT authentication", None, None);
        assert_eq!(
            store.active_conversation().unwrap().title,
            "Explain JWT authentication"
        );
    }

    #[test]
    fn test_long_first_message_title_is_truncated() {
        let mut store = empty_store();
        store.start_new_chat();
        let long = "x".repeat(120);
        store.add_message(Role::User, long, None, None);

        let title = &store.active_conversation().unwrap().title;
        assert_eq!(title.chars().count(), 51);
        assert!(title.ends_with('…'));
    }

    #[test]
    fn test_manual_rename_pins_title() {
        let mut store = empty_store();
        let id = store.start_new_chat();
        store.rename_conversation(&id, "My topic");
        store.add_message(Role::User, "this would normally become the title", None, None);
        assert_eq!(store.active_conversation().unwrap().title, "My topic");
    }

    #[test]
    fn test_assistant_message_does_not_derive_title() {
        let mut store = empty_store();
        store.start_new_chat();
        store.add_message(Role::Assistant, "Hello there", None, None);
        assert_eq!(
            store.active_conversation().unwrap().title,
            willow_core::types::DEFAULT_TITLE
        );
    }

    #[test]
    fn test_explicit_message_id_is_kept() {
        let mut store = empty_store();
        store.start_new_chat();
        let message = store
            .add_message(
                Role::Assistant,
                "streamed",
                None,
                Some("placeholder-1".to_string()),
            )
            .unwrap();
        assert_eq!(message.id, "placeholder-1");
    }

    #[test]
    fn test_update_message_keeps_role_and_timestamp() {
        let mut store = empty_store();
        store.start_new_chat();
        let message = store
            .add_message(Role::User, "before", None, None)
            .unwrap();

        store.update_message(&message.id, "after", None);

        let stored = &store.active_conversation().unwrap().messages[0];
        assert_eq!(stored.content, "after");
        assert_eq!(stored.role, Role::User);
        assert_eq!(stored.timestamp, message.timestamp);
    }

    #[test]
    fn test_remove_message_deletes_exactly_one() {
        let mut store = empty_store();
        store.start_new_chat();
        let m1 = store.add_message(Role::User, "one", None, None).unwrap();
        store.add_message(Role::Assistant, "two", None, None);

        store.remove_message(&m1.id, None);

        let conversation = store.active_conversation().unwrap();
        assert_eq!(conversation.messages.len(), 1);
        assert_eq!(conversation.messages[0].content, "two");
    }

    #[test]
    fn test_remove_messages_after_truncates_tail() {
        let mut store = empty_store();
        store.start_new_chat();
        let ids: Vec<String> = (1..=4)
            .map(|i| {
                store
                    .add_message(Role::User, format!("m{i}"), None, None)
                    .unwrap()
                    .id
            })
            .collect();

        store.remove_messages_after(&ids[1], None);

        let conversation = store.active_conversation().unwrap();
        let kept: Vec<&str> = conversation
            .messages
            .iter()
            .map(|m| m.content.as_str())
            .collect();
        assert_eq!(kept, vec!["m1", "m2"]);
    }

    #[test]
    fn test_remove_messages_after_unknown_id_is_noop() {
        let mut store = empty_store();
        store.start_new_chat();
        store.add_message(Role::User, "only", None, None);

        store.remove_messages_after("no-such-id", None);
        assert_eq!(store.active_conversation().unwrap().messages.len(), 1);
    }

    #[test]
    fn test_delete_active_reactivates_first_remaining() {
        let mut store = empty_store();
        let a = store.start_new_chat();
        let b = store.start_new_chat();
        let c = store.start_new_chat();
        store.set_active(&b);

        store.delete_conversation(&b);

        // 列表顺序是 [c, a]，活跃指针移到剩余的第一个
        assert_eq!(store.active_id(), Some(c.as_str()));
        assert!(store.get(&a).is_some());
    }

    #[test]
    fn test_delete_last_conversation_clears_active() {
        let mut store = empty_store();
        let id = store.start_new_chat();
        store.delete_conversation(&id);
        assert_eq!(store.active_id(), None);
        assert!(store.conversations().is_empty());
    }

    #[test]
    fn test_toggle_favorite_flips_flag() {
        let mut store = empty_store();
        let id = store.start_new_chat();
        store.toggle_favorite(&id);
        assert!(store.get(&id).unwrap().is_favorite);
        store.toggle_favorite(&id);
        assert!(!store.get(&id).unwrap().is_favorite);
    }

    #[test]
    fn test_search_filter_is_case_insensitive_and_non_destructive() {
        let mut store = empty_store();
        let a = store.start_new_chat();
        store.rename_conversation(&a, "Dashboard layout");
        let b = store.start_new_chat();
        store.rename_conversation(&b, "WebSocket handshake");

        store.set_search_query("DASH");
        let filtered = store.filtered_conversations();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, a);
        assert_eq!(store.conversations().len(), 2);

        store.set_search_query("");
        assert_eq!(store.filtered_conversations().len(), 2);
    }

    #[test]
    fn test_snapshot_round_trip() {
        let kv: Arc<dyn KvStore> = Arc::new(MemoryKv::new());
        let mut store = ConversationStore::load(Arc::clone(&kv));
        let id = store.start_new_chat();
        store.add_message(Role::User, "persist me", None, None);
        store.toggle_favorite(&id);

        let reloaded = ConversationStore::load(kv);
        let original = store.get(&id).unwrap();
        let restored = reloaded.get(&id).unwrap();

        assert_eq!(restored.title, original.title);
        assert!(restored.is_favorite);
        assert_eq!(restored.messages.len(), 1);
        assert_eq!(restored.messages[0].content, "persist me");
        assert_eq!(restored.messages[0].role, Role::User);
        assert_eq!(
            restored.messages[0].timestamp.timestamp_millis(),
            original.messages[0].timestamp.timestamp_millis()
        );
    }

    #[test]
    fn test_snapshot_round_trip_on_disk() {
        use willow_core::FileKv;

        let dir = tempfile::TempDir::new().unwrap();
        let kv = Arc::new(FileKv::open(dir.path()).unwrap());

        let mut store = ConversationStore::load(Arc::clone(&kv) as Arc<dyn KvStore>);
        let id = store.start_new_chat();
        store.add_message(Role::User, "written to disk", None, None);

        let reloaded = ConversationStore::load(kv);
        let restored = reloaded.get(&id).unwrap();
        assert_eq!(restored.messages[0].content, "written to disk");
    }

    #[test]
    fn test_clear_all_conversations_empties_store() {
        let mut store = ConversationStore::load(Arc::new(MemoryKv::new()));
        store.clear_all_conversations();
        assert!(store.conversations().is_empty());
        assert_eq!(store.active_id(), None);
    }
}
