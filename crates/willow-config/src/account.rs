//! 用户资料、登录标记与账号数据清理。

use serde::{Deserialize, Serialize};
use tracing::warn;

use willow_core::storage::keys;
use willow_core::KvStore;

/// 用户资料（演示账号）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub name: String,
    pub email: String,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            name: "James Mitchell".to_string(),
            email: "james.mitchell@email.com".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserPatch {
    name: Option<String>,
    email: Option<String>,
}

impl UserProfile {
    /// 逐字段合并：快照缺失的字段保持演示默认值
    fn apply(mut self, patch: UserPatch) -> Self {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        self
    }

    /// 从存储读取；缺失或损坏时返回默认资料
    pub fn load(kv: &dyn KvStore) -> Self {
        match kv.get(keys::USER) {
            Ok(Some(raw)) => match serde_json::from_str::<UserPatch>(&raw) {
                Ok(patch) => Self::default().apply(patch),
                Err(err) => {
                    warn!("stored user profile is corrupt, using defaults: {err}");
                    Self::default()
                }
            },
            Ok(None) => Self::default(),
            Err(err) => {
                warn!("failed to read user profile, using defaults: {err}");
                Self::default()
            }
        }
    }

    /// 写回存储；失败只告警
    pub fn save(&self, kv: &dyn KvStore) {
        match serde_json::to_string(self) {
            Ok(raw) => {
                if let Err(err) = kv.set(keys::USER, &raw) {
                    warn!("failed to persist user profile: {err}");
                }
            }
            Err(err) => warn!("failed to serialize user profile: {err}"),
        }
    }
}

/// 登录标记：auth 键存在且为 "true" 即视为已登录
pub fn is_signed_in(kv: &dyn KvStore) -> bool {
    matches!(kv.get(keys::AUTH), Ok(Some(value)) if value == "true")
}

pub fn sign_in(kv: &dyn KvStore) {
    if let Err(err) = kv.set(keys::AUTH, "true") {
        warn!("failed to persist sign-in flag: {err}");
    }
}

/// 登出即删除标记
pub fn sign_out(kv: &dyn KvStore) {
    if let Err(err) = kv.remove(keys::AUTH) {
        warn!("failed to clear sign-in flag: {err}");
    }
}

/// 删除账号相关数据：用户资料、设置、订阅。
/// 删除账号时调用。
pub fn clear_account_data(kv: &dyn KvStore) {
    for key in [keys::USER, keys::SETTINGS, keys::SUBSCRIPTION] {
        if let Err(err) = kv.remove(key) {
            warn!("failed to clear {key}: {err}");
        }
    }
}
