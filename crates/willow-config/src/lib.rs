//! # Willow Preferences
//!
//! 演示应用的偏好设置层：设置开关、订阅计划、用户资料、主题与登录标记，
//! 全部通过注入的 KvStore 读写。
//!
//! 读写都是"尽力而为"：任何失败都静默回退到默认值并记录日志，
//! 绝不打断演示。

pub mod account;
pub mod settings;
pub mod subscription;
pub mod theme;

pub use account::{clear_account_data, is_signed_in, sign_in, sign_out, UserProfile};
pub use settings::Settings;
pub use subscription::{
    load_subscription, plan_by_id, plans, save_subscription, BillingInterval, Plan, PlanId,
};
pub use theme::{load_theme, save_theme, Theme};

use std::path::PathBuf;

/// 获取 Willow 数据目录路径 (~/.willow)
pub fn willow_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".willow"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_willow_dir() {
        let dir = willow_dir();
        assert!(dir.is_some());
        assert!(dir.unwrap().to_string_lossy().contains(".willow"));
    }
}
