//! CooldownAction - Time-gated earn actions
//!
//! Cooldown markers live in a dedicated map on the ledger, keyed by
//! user and action. Legacy ledgers stored them inside the currency map
//! under prefixed keys; the migration step relocates those.

use serde::{Deserialize, Serialize};

/// An earn action gated by a per-user cooldown window
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum CooldownAction {
    Work,
    Daily,
}

impl CooldownAction {
    /// Cooldown window in seconds
    pub fn window_secs(self) -> i64 {
        match self {
            CooldownAction::Work => 30 * 60,
            CooldownAction::Daily => 24 * 60 * 60,
        }
    }

    /// Key prefix used by legacy ledger files inside the currency map
    pub fn legacy_prefix(self) -> &'static str {
        match self {
            CooldownAction::Work => "last_work_",
            CooldownAction::Daily => "last_daily_",
        }
    }
}

impl std::fmt::Display for CooldownAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CooldownAction::Work => write!(f, "work"),
            CooldownAction::Daily => write!(f, "daily"),
        }
    }
}

impl std::str::FromStr for CooldownAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "work" => Ok(CooldownAction::Work),
            "daily" => Ok(CooldownAction::Daily),
            _ => Err(format!("Unknown cooldown action: {}", s)),
        }
    }
}
