use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::Instant;
use uuid::Uuid;

use willow_config::{
    load_subscription, load_theme, save_theme, sign_in, PlanId, Settings, Theme, UserProfile,
};
use willow_core::{KvStore, MemoryKv, Role, StreamChunk};
use willow_responder::{stream_text, suggested_prompts, Responder, StreamHandle};
use willow_session::ConversationStore;

/// Latency simulated before the first token of a reply
pub const THINKING_DELAY: Duration = Duration::from_millis(400);

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputMode {
    Normal,
    Search,
    Rename,
}

/// A reply that has been computed but is still in its thinking delay
pub struct PendingReply {
    pub conversation_id: String,
    pub text: String,
    pub start_at: Instant,
}

/// A reply currently being revealed by the typewriter stream.
///
/// The text lives only here until the stream completes or is stopped;
/// the store never sees a partial message.
pub struct StreamingReply {
    pub conversation_id: String,
    pub message_id: String,
    pub text: String,
    pub rx: mpsc::UnboundedReceiver<StreamChunk>,
    pub handle: StreamHandle,
}

pub struct App {
    pub store: ConversationStore,
    pub responder: Responder,
    pub settings: Settings,
    pub user: UserProfile,
    pub plan: PlanId,
    pub theme: Theme,
    pub input: String,
    pub mode: InputMode,
    pub rename_buffer: String,
    pub pending: Option<PendingReply>,
    pub streaming: Option<StreamingReply>,
    pub scroll_offset: usize,
    pub suggestion_index: usize,
    pub typing_interval: Duration,
    /// Id of the user message being edited for resubmission, if any
    pub editing_message: Option<String>,
    prefs_kv: Arc<dyn KvStore>,
}

impl App {
    pub fn new(kv: Arc<dyn KvStore>, typing_interval: Duration) -> Self {
        let settings = Settings::load(&*kv);
        let user = UserProfile::load(&*kv);
        let plan = load_subscription(&*kv);
        let theme = load_theme(&*kv);
        sign_in(&*kv);

        // With chat-history retention off, the conversation snapshot goes
        // to a throwaway in-memory store; preferences stay on disk.
        let conversation_kv: Arc<dyn KvStore> = if settings.chat_history {
            Arc::clone(&kv)
        } else {
            Arc::new(MemoryKv::new())
        };
        let store = ConversationStore::load(conversation_kv);

        Self {
            store,
            responder: Responder::new(),
            settings,
            user,
            plan,
            theme,
            input: String::new(),
            mode: InputMode::Normal,
            rename_buffer: String::new(),
            pending: None,
            streaming: None,
            scroll_offset: 0,
            suggestion_index: 0,
            typing_interval,
            editing_message: None,
            prefs_kv: kv,
        }
    }

    /// A reply is in flight (thinking or streaming)
    pub fn is_busy(&self) -> bool {
        self.pending.is_some() || self.streaming.is_some()
    }

    /// Submit the input box: record the user message and queue a reply
    pub fn send_message(&mut self) {
        if self.is_busy() {
            return;
        }
        let content = self.input.trim().to_string();
        if content.is_empty() {
            return;
        }
        self.input.clear();

        if self.store.active_id().is_none() {
            self.store.start_new_chat();
        }

        if let Some(edited) = self.editing_message.take() {
            // Edit + regenerate: replace in place, drop the stale tail.
            self.store.update_message(&edited, content.clone(), None);
            self.store.remove_messages_after(&edited, None);
        } else {
            self.store.add_message(Role::User, content.clone(), None, None);
        }

        self.queue_reply(&content);
    }

    /// Regenerate the reply to the last user message of the active chat
    pub fn regenerate(&mut self) {
        if self.is_busy() {
            return;
        }
        let Some(conversation) = self.store.active_conversation() else {
            return;
        };
        let Some(last_user) = conversation.messages.iter().rev().find(|m| m.is_user()) else {
            return;
        };
        let (id, prompt) = (last_user.id.clone(), last_user.content.clone());

        self.store.remove_messages_after(&id, None);
        self.queue_reply(&prompt);
    }

    /// Pull the last user message back into the input box for editing
    pub fn edit_last_user_message(&mut self) {
        if self.is_busy() {
            return;
        }
        let Some(conversation) = self.store.active_conversation() else {
            return;
        };
        let Some(last_user) = conversation.messages.iter().rev().find(|m| m.is_user()) else {
            return;
        };
        self.input = last_user.content.clone();
        self.editing_message = Some(last_user.id.clone());
    }

    /// Compute the full reply now; reveal it after the thinking delay
    fn queue_reply(&mut self, prompt: &str) {
        let Some(conversation_id) = self.store.active_id().map(str::to_string) else {
            return;
        };
        let text = self.responder.respond(prompt);
        self.pending = Some(PendingReply {
            conversation_id,
            text,
            start_at: Instant::now() + THINKING_DELAY,
        });
        self.scroll_offset = 0;
    }

    /// Timer tick: promote a pending reply into a live stream
    pub fn on_tick(&mut self) {
        let ready = matches!(&self.pending, Some(p) if Instant::now() >= p.start_at);
        if !ready || self.streaming.is_some() {
            return;
        }
        let Some(pending) = self.pending.take() else {
            return;
        };
        let (rx, handle) = stream_text(&pending.text, self.typing_interval);
        self.streaming = Some(StreamingReply {
            conversation_id: pending.conversation_id,
            message_id: Uuid::new_v4().to_string(),
            text: String::new(),
            rx,
            handle,
        });
    }

    /// Drain the stream channel; commit the reply when it completes
    pub fn process_stream(&mut self) {
        let Some(streaming) = self.streaming.as_mut() else {
            return;
        };
        let mut done = false;
        while let Ok(chunk) = streaming.rx.try_recv() {
            match chunk {
                StreamChunk::Token { text } => streaming.text.push_str(&text),
                StreamChunk::Done => {
                    done = true;
                    break;
                }
            }
        }
        if done {
            self.commit_streaming();
        }
    }

    /// Stop generation: cancel the stream and commit whatever was revealed
    pub fn stop_generation(&mut self) {
        self.pending = None;
        if let Some(streaming) = self.streaming.as_ref() {
            streaming.handle.cancel();
        }
        self.commit_streaming();
    }

    fn commit_streaming(&mut self) {
        let Some(streaming) = self.streaming.take() else {
            return;
        };
        if streaming.text.is_empty() {
            return;
        }
        // The placeholder id is promoted to the committed message id, so
        // the bubble keeps its identity across the commit.
        self.store.add_message(
            Role::Assistant,
            streaming.text,
            Some(&streaming.conversation_id),
            Some(streaming.message_id),
        );
    }

    pub fn new_chat(&mut self) {
        self.stop_generation();
        self.store.start_new_chat();
        self.editing_message = None;
        self.scroll_offset = 0;
    }

    pub fn delete_active_conversation(&mut self) {
        let Some(id) = self.store.active_id().map(str::to_string) else {
            return;
        };
        self.stop_generation();
        self.store.delete_conversation(&id);
        self.editing_message = None;
        self.scroll_offset = 0;
    }

    pub fn toggle_favorite_active(&mut self) {
        if let Some(id) = self.store.active_id().map(str::to_string) {
            self.store.toggle_favorite(&id);
        }
    }

    pub fn clear_all(&mut self) {
        self.stop_generation();
        self.store.clear_all_conversations();
        self.editing_message = None;
        self.scroll_offset = 0;
    }

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
        save_theme(&*self.prefs_kv, self.theme);
    }

    /// Move the active selection within the filtered sidebar list
    pub fn select_sibling(&mut self, offset: isize) {
        let filtered: Vec<String> = self
            .store
            .filtered_conversations()
            .iter()
            .map(|c| c.id.clone())
            .collect();
        if filtered.is_empty() {
            return;
        }
        let current = self
            .store
            .active_id()
            .and_then(|id| filtered.iter().position(|c| c == id));
        let next = match current {
            Some(index) => {
                let len = filtered.len() as isize;
                ((index as isize + offset).rem_euclid(len)) as usize
            }
            None => 0,
        };
        let id = filtered[next].clone();
        self.stop_generation();
        self.store.set_active(&id);
        self.editing_message = None;
        self.scroll_offset = 0;
    }

    /// Cycle the next suggested prompt into the input box
    pub fn cycle_suggestion(&mut self) {
        let prompts = suggested_prompts();
        self.input = prompts[self.suggestion_index % prompts.len()].to_string();
        self.suggestion_index = (self.suggestion_index + 1) % prompts.len();
    }

    /// The empty state shows prompt suggestions
    pub fn show_suggestions(&self) -> bool {
        !self.is_busy()
            && self
                .store
                .active_conversation()
                .map(|c| c.messages.is_empty())
                .unwrap_or(true)
    }

    pub fn enter_rename_mode(&mut self) {
        let Some(conversation) = self.store.active_conversation() else {
            return;
        };
        self.rename_buffer = conversation.title.clone();
        self.mode = InputMode::Rename;
    }

    pub fn commit_rename(&mut self) {
        let title = self.rename_buffer.trim().to_string();
        if !title.is_empty() {
            if let Some(id) = self.store.active_id().map(str::to_string) {
                self.store.rename_conversation(&id, title);
            }
        }
        self.rename_buffer.clear();
        self.mode = InputMode::Normal;
    }

    pub fn scroll_up(&mut self, lines: usize) {
        self.scroll_offset = self.scroll_offset.saturating_add(lines);
    }

    pub fn scroll_down(&mut self, lines: usize) {
        self.scroll_offset = self.scroll_offset.saturating_sub(lines);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_app() -> App {
        let mut app = App::new(Arc::new(MemoryKv::new()), Duration::from_millis(1));
        app.store.clear_all_conversations();
        app
    }

    #[tokio::test(start_paused = true)]
    async fn test_send_records_user_message_and_queues_reply() {
        let mut app = test_app();
        app.input = "Explain JWT authentication".to_string();
        app.send_message();

        let conversation = app.store.active_conversation().unwrap();
        assert_eq!(conversation.messages.len(), 1);
        assert_eq!(conversation.messages[0].role, Role::User);
        assert!(app.pending.is_some());
        assert!(app.is_busy());
    }

    #[tokio::test(start_paused = true)]
    async fn test_full_reply_cycle_commits_assistant_message() {
        let mut app = test_app();
        app.input = "hello".to_string();
        app.send_message();

        // thinking delay elapses
        tokio::time::advance(THINKING_DELAY + Duration::from_millis(1)).await;
        app.on_tick();
        assert!(app.streaming.is_some());

        // drain until the stream completes
        for _ in 0..10_000 {
            app.process_stream();
            if app.streaming.is_none() {
                break;
            }
            tokio::time::advance(Duration::from_millis(2)).await;
            tokio::task::yield_now().await;
        }

        let conversation = app.store.active_conversation().unwrap();
        assert_eq!(conversation.messages.len(), 2);
        assert_eq!(conversation.messages[1].role, Role::Assistant);
        assert!(!conversation.messages[1].content.is_empty());
        assert!(!app.is_busy());
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_during_thinking_commits_nothing() {
        let mut app = test_app();
        app.input = "hello".to_string();
        app.send_message();

        app.stop_generation();

        assert!(!app.is_busy());
        let conversation = app.store.active_conversation().unwrap();
        assert_eq!(conversation.messages.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_send_while_busy_is_ignored() {
        let mut app = test_app();
        app.input = "first".to_string();
        app.send_message();

        app.input = "second".to_string();
        app.send_message();

        let conversation = app.store.active_conversation().unwrap();
        assert_eq!(conversation.messages.len(), 1);
        assert_eq!(app.input, "second");
    }

    #[tokio::test(start_paused = true)]
    async fn test_regenerate_truncates_to_last_user_message() {
        let mut app = test_app();
        app.store.start_new_chat();
        app.store.add_message(Role::User, "prompt", None, None);
        app.store.add_message(Role::Assistant, "old reply", None, None);

        app.regenerate();

        let conversation = app.store.active_conversation().unwrap();
        assert_eq!(conversation.messages.len(), 1);
        assert_eq!(conversation.messages[0].content, "prompt");
        assert!(app.pending.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_edit_resubmit_replaces_in_place() {
        let mut app = test_app();
        app.store.start_new_chat();
        let user = app
            .store
            .add_message(Role::User, "first wording", None, None)
            .unwrap();
        app.store.add_message(Role::Assistant, "reply", None, None);

        app.edit_last_user_message();
        assert_eq!(app.input, "first wording");

        app.input = "second wording".to_string();
        app.send_message();

        let conversation = app.store.active_conversation().unwrap();
        assert_eq!(conversation.messages.len(), 1);
        assert_eq!(conversation.messages[0].id, user.id);
        assert_eq!(conversation.messages[0].content, "second wording");
    }

    #[tokio::test(start_paused = true)]
    async fn test_history_off_uses_ephemeral_snapshot() {
        let kv = Arc::new(MemoryKv::new());
        let mut settings = Settings::default();
        settings.chat_history = false;
        settings.save(&*kv);

        let mut app = App::new(Arc::clone(&kv) as Arc<dyn KvStore>, Duration::from_millis(1));
        app.store.clear_all_conversations();
        app.store.start_new_chat();
        app.store.add_message(Role::User, "not retained", None, None);

        assert_eq!(
            kv.get(willow_core::keys::CONVERSATIONS).unwrap(),
            None
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_cycle_suggestion_fills_input() {
        let mut app = test_app();
        assert!(app.show_suggestions());
        app.cycle_suggestion();
        assert_eq!(app.input, suggested_prompts()[0]);
        app.cycle_suggestion();
        assert_eq!(app.input, suggested_prompts()[1]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_select_sibling_wraps_around() {
        let mut app = test_app();
        let a = app.store.start_new_chat();
        let b = app.store.start_new_chat();
        // list order is [b, a], b active

        app.select_sibling(1);
        assert_eq!(app.store.active_id(), Some(a.as_str()));
        app.select_sibling(1);
        assert_eq!(app.store.active_id(), Some(b.as_str()));
        app.select_sibling(-1);
        assert_eq!(app.store.active_id(), Some(a.as_str()));
    }
}
