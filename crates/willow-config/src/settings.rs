//! 设置开关与"缺键补默认值"合并。

use serde::{Deserialize, Serialize};
use tracing::warn;

use willow_core::storage::keys;
use willow_core::KvStore;

/// 设置开关集合
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// 允许用对话改进模型
    pub improve_model: bool,
    /// 保留聊天历史（关闭后会话快照只写入内存）
    pub chat_history: bool,
    pub email_notifs: bool,
    pub push_notifs: bool,
    pub cookie_essential: bool,
    pub cookie_analytics: bool,
    pub cookie_personalization: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            improve_model: false,
            chat_history: true,
            email_notifs: true,
            push_notifs: false,
            cookie_essential: true,
            cookie_analytics: false,
            cookie_personalization: false,
        }
    }
}

/// 旧快照里可能缺失的键：逐键可选
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsPatch {
    improve_model: Option<bool>,
    chat_history: Option<bool>,
    email_notifs: Option<bool>,
    push_notifs: Option<bool>,
    cookie_essential: Option<bool>,
    cookie_analytics: Option<bool>,
    cookie_personalization: Option<bool>,
}

impl Settings {
    /// 显式逐键合并：快照里出现的键覆盖默认值，缺失的键保持默认
    fn apply(mut self, patch: SettingsPatch) -> Self {
        if let Some(value) = patch.improve_model {
            self.improve_model = value;
        }
        if let Some(value) = patch.chat_history {
            self.chat_history = value;
        }
        if let Some(value) = patch.email_notifs {
            self.email_notifs = value;
        }
        if let Some(value) = patch.push_notifs {
            self.push_notifs = value;
        }
        if let Some(value) = patch.cookie_essential {
            self.cookie_essential = value;
        }
        if let Some(value) = patch.cookie_analytics {
            self.cookie_analytics = value;
        }
        if let Some(value) = patch.cookie_personalization {
            self.cookie_personalization = value;
        }
        self
    }

    /// 从存储读取；缺失或损坏时返回默认值
    pub fn load(kv: &dyn KvStore) -> Self {
        match kv.get(keys::SETTINGS) {
            Ok(Some(raw)) => match serde_json::from_str::<SettingsPatch>(&raw) {
                Ok(patch) => Self::default().apply(patch),
                Err(err) => {
                    warn!("stored settings are corrupt, using defaults: {err}");
                    Self::default()
                }
            },
            Ok(None) => Self::default(),
            Err(err) => {
                warn!("failed to read settings, using defaults: {err}");
                Self::default()
            }
        }
    }

    /// 整体写回存储；失败只告警
    pub fn save(&self, kv: &dyn KvStore) {
        match serde_json::to_string(self) {
            Ok(raw) => {
                if let Err(err) = kv.set(keys::SETTINGS, &raw) {
                    warn!("failed to persist settings: {err}");
                }
            }
            Err(err) => warn!("failed to serialize settings: {err}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use willow_core::MemoryKv;

    #[test]
    fn test_missing_key_loads_defaults() {
        let kv = MemoryKv::new();
        assert_eq!(Settings::load(&kv), Settings::default());
    }

    #[test]
    fn test_partial_snapshot_merges_over_defaults() {
        let kv = MemoryKv::new();
        kv.set(keys::SETTINGS, r#"{"improveModel":true,"pushNotifs":true}"#)
            .unwrap();

        let settings = Settings::load(&kv);
        assert!(settings.improve_model);
        assert!(settings.push_notifs);
        // untouched keys keep their defaults
        assert!(settings.chat_history);
        assert!(settings.cookie_essential);
        assert!(!settings.cookie_analytics);
    }

    #[test]
    fn test_corrupt_snapshot_loads_defaults() {
        let kv = MemoryKv::new();
        kv.set(keys::SETTINGS, "not json at all").unwrap();
        assert_eq!(Settings::load(&kv), Settings::default());
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let kv = MemoryKv::new();
        let mut settings = Settings::default();
        settings.email_notifs = false;
        settings.cookie_personalization = true;
        settings.save(&kv);

        assert_eq!(Settings::load(&kv), settings);
    }
}
