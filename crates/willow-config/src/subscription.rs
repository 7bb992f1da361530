//! 订阅计划目录与当前计划的持久化。

use serde::{Deserialize, Serialize};
use tracing::warn;

use willow_core::storage::keys;
use willow_core::KvStore;

/// 计划标识
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanId {
    Free,
    Pro,
    Team,
}

impl PlanId {
    pub const DEFAULT: PlanId = PlanId::Free;

    pub fn as_str(&self) -> &'static str {
        match self {
            PlanId::Free => "free",
            PlanId::Pro => "pro",
            PlanId::Team => "team",
        }
    }

    /// 解析存储值；未知值返回 `None`
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "free" => Some(PlanId::Free),
            "pro" => Some(PlanId::Pro),
            "team" => Some(PlanId::Team),
            _ => None,
        }
    }
}

impl std::fmt::Display for PlanId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 计费周期
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BillingInterval {
    Month,
    Year,
}

impl std::fmt::Display for BillingInterval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BillingInterval::Month => write!(f, "month"),
            BillingInterval::Year => write!(f, "year"),
        }
    }
}

/// 计划目录条目
#[derive(Debug, Clone, Copy)]
pub struct Plan {
    pub id: PlanId,
    pub name: &'static str,
    pub price: u32,
    pub interval: BillingInterval,
    pub description: &'static str,
    pub features: &'static [&'static str],
    pub highlighted: bool,
}

/// 固定的计划目录
pub fn plans() -> &'static [Plan] {
    &[
        Plan {
            id: PlanId::Free,
            name: "Free",
            price: 0,
            interval: BillingInterval::Month,
            description: "Get started with Willow",
            features: &[
                "20 messages per day",
                "Basic conversations",
                "Standard response speed",
                "Community support",
            ],
            highlighted: false,
        },
        Plan {
            id: PlanId::Pro,
            name: "Pro",
            price: 20,
            interval: BillingInterval::Month,
            description: "For power users and professionals",
            features: &[
                "Unlimited messages",
                "Priority access",
                "Faster responses",
                "Advanced models",
                "Email support",
                "Export conversations",
            ],
            highlighted: true,
        },
        Plan {
            id: PlanId::Team,
            name: "Team",
            price: 40,
            interval: BillingInterval::Month,
            description: "For teams and organizations",
            features: &[
                "Everything in Pro",
                "Shared workspaces",
                "Admin controls",
                "Usage analytics",
                "SSO & SAML",
                "Priority support",
            ],
            highlighted: false,
        },
    ]
}

/// 按 id 查目录；查不到时退回第一个（Free）
pub fn plan_by_id(id: PlanId) -> &'static Plan {
    plans()
        .iter()
        .find(|plan| plan.id == id)
        .unwrap_or(&plans()[0])
}

/// 读取当前计划；缺失或未知值回退到默认计划
pub fn load_subscription(kv: &dyn KvStore) -> PlanId {
    match kv.get(keys::SUBSCRIPTION) {
        Ok(Some(raw)) => PlanId::parse(raw.trim()).unwrap_or(PlanId::DEFAULT),
        Ok(None) => PlanId::DEFAULT,
        Err(err) => {
            warn!("failed to read subscription, using default plan: {err}");
            PlanId::DEFAULT
        }
    }
}

/// 写回当前计划（裸字符串，不包 JSON）
pub fn save_subscription(kv: &dyn KvStore, plan: PlanId) {
    if let Err(err) = kv.set(keys::SUBSCRIPTION, plan.as_str()) {
        warn!("failed to persist subscription: {err}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use willow_core::MemoryKv;

    #[test]
    fn test_catalog_shape() {
        let catalog = plans();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog[0].id, PlanId::Free);
        assert!(catalog[1].highlighted);
        assert_eq!(plan_by_id(PlanId::Team).name, "Team");
    }

    #[test]
    fn test_missing_value_defaults_to_free() {
        let kv = MemoryKv::new();
        assert_eq!(load_subscription(&kv), PlanId::Free);
    }

    #[test]
    fn test_unknown_value_defaults_to_free() {
        let kv = MemoryKv::new();
        kv.set(keys::SUBSCRIPTION, "enterprise").unwrap();
        assert_eq!(load_subscription(&kv), PlanId::Free);
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let kv = MemoryKv::new();
        save_subscription(&kv, PlanId::Pro);
        assert_eq!(load_subscription(&kv), PlanId::Pro);
        assert_eq!(kv.get(keys::SUBSCRIPTION).unwrap().as_deref(), Some("pro"));
    }
}
