//! 主题读写。终端场景下默认深色。

use tracing::warn;

use willow_core::storage::keys;
use willow_core::KvStore;

/// 界面主题
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// 解析存储值；未知值落到默认主题
    pub fn parse(value: &str) -> Self {
        match value {
            "light" => Theme::Light,
            "dark" => Theme::Dark,
            _ => Theme::default(),
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 读取主题；缺失或未知值回退默认
pub fn load_theme(kv: &dyn KvStore) -> Theme {
    match kv.get(keys::THEME) {
        Ok(Some(raw)) => Theme::parse(raw.trim()),
        Ok(None) => Theme::default(),
        Err(err) => {
            warn!("failed to read theme, using default: {err}");
            Theme::default()
        }
    }
}

/// 写回主题；失败只告警
pub fn save_theme(kv: &dyn KvStore, theme: Theme) {
    if let Err(err) = kv.set(keys::THEME, theme.as_str()) {
        warn!("failed to persist theme: {err}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use willow_core::MemoryKv;

    #[test]
    fn test_defaults_to_dark() {
        let kv = MemoryKv::new();
        assert_eq!(load_theme(&kv), Theme::Dark);
    }

    #[test]
    fn test_round_trip_and_unknown_value() {
        let kv = MemoryKv::new();
        save_theme(&kv, Theme::Light);
        assert_eq!(load_theme(&kv), Theme::Light);

        kv.set(keys::THEME, "sepia").unwrap();
        assert_eq!(load_theme(&kv), Theme::Dark);
    }

    #[test]
    fn test_toggle() {
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
    }
}
