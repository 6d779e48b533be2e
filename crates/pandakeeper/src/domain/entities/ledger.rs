//! Ledger - Aggregate root for accounts, adoptions and the catalog
//!
//! The ledger is owned exclusively by the `LedgerStore`; engines reach
//! it only through the store's guarded read/mutate operations.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::{OwnedPanda, PandaTemplate};
use crate::domain::errors::DomainError;
use crate::domain::value_objects::CooldownAction;

/// Balance implied for users with no currency record yet
pub const STARTING_BALANCE: i64 = 100;

/// Ledger - All user accounts plus the panda catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Ledger {
    /// User id -> adopted panda records
    pub adoptions: HashMap<String, Vec<OwnedPanda>>,
    /// Catalog of templates, insertion order preserved
    #[serde(rename = "available_pandas")]
    pub catalog: Vec<PandaTemplate>,
    /// User id -> bamboo coin balance
    #[serde(rename = "user_currency")]
    pub balances: HashMap<String, i64>,
    /// User id -> action -> last invocation time
    #[serde(default)]
    pub cooldowns: HashMap<String, HashMap<CooldownAction, DateTime<Utc>>>,
}

impl Ledger {
    /// Fresh ledger seeded with the starter catalog
    pub fn starter() -> Self {
        Self {
            adoptions: HashMap::new(),
            catalog: PandaTemplate::starter_catalog(),
            balances: HashMap::new(),
            cooldowns: HashMap::new(),
        }
    }

    /// Balance of a user; unseen users start at [`STARTING_BALANCE`]
    pub fn balance(&self, user_id: &str) -> i64 {
        self.balances
            .get(user_id)
            .copied()
            .unwrap_or(STARTING_BALANCE)
    }

    /// Credit coins to a user
    pub fn credit(&mut self, user_id: &str, amount: i64) {
        let new_balance = self.balance(user_id) + amount;
        self.balances.insert(user_id.to_string(), new_balance);
    }

    /// Debit coins from a user, rejecting anything that would go negative
    pub fn debit(&mut self, user_id: &str, amount: i64) -> Result<(), DomainError> {
        let current = self.balance(user_id);
        if current < amount {
            return Err(DomainError::InsufficientFunds {
                required: amount,
                available: current,
            });
        }
        self.balances.insert(user_id.to_string(), current - amount);
        Ok(())
    }

    /// Resolve a template by id
    pub fn template(&self, panda_id: &str) -> Option<&PandaTemplate> {
        self.catalog.iter().find(|p| p.id == panda_id)
    }

    /// Resolve a template mutably
    pub fn template_mut(&mut self, panda_id: &str) -> Option<&mut PandaTemplate> {
        self.catalog.iter_mut().find(|p| p.id == panda_id)
    }

    /// Templates still open for adoption, in stored order
    pub fn available_pandas(&self) -> Vec<&PandaTemplate> {
        self.catalog.iter().filter(|p| p.available).collect()
    }

    /// A user's owned records (empty slice for unknown users)
    pub fn pandas_of(&self, user_id: &str) -> &[OwnedPanda] {
        self.adoptions
            .get(user_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Mutable access to one owned record
    pub fn owned_mut(&mut self, user_id: &str, panda_id: &str) -> Option<&mut OwnedPanda> {
        self.adoptions
            .get_mut(user_id)?
            .iter_mut()
            .find(|p| p.panda_id == panda_id)
    }

    /// Seconds left on a cooldown, or None when the action is ready.
    /// The check uses exact elapsed seconds.
    pub fn cooldown_remaining(
        &self,
        user_id: &str,
        action: CooldownAction,
        now: DateTime<Utc>,
    ) -> Option<i64> {
        let last = self.cooldowns.get(user_id)?.get(&action)?;
        let elapsed = (now - *last).num_seconds();
        let remaining = action.window_secs() - elapsed;
        (remaining > 0).then_some(remaining)
    }

    /// Record that an action just ran
    pub fn mark_cooldown(&mut self, user_id: &str, action: CooldownAction, now: DateTime<Utc>) {
        self.cooldowns
            .entry(user_id.to_string())
            .or_default()
            .insert(action, now);
    }

    /// Next free catalog id of the form `panda_NNN`
    pub fn next_panda_id(&self) -> String {
        let max = self
            .catalog
            .iter()
            .filter_map(|p| p.id.strip_prefix("panda_"))
            .filter_map(|n| n.parse::<u32>().ok())
            .max()
            .unwrap_or(0);
        format!("panda_{:03}", max + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unseen_user_starts_at_default_balance() {
        let ledger = Ledger::starter();
        assert_eq!(ledger.balance("u1"), STARTING_BALANCE);
    }

    #[test]
    fn test_debit_rejects_overdraft() {
        let mut ledger = Ledger::starter();
        let err = ledger.debit("u1", 150).unwrap_err();
        assert!(matches!(
            err,
            DomainError::InsufficientFunds {
                required: 150,
                available: 100
            }
        ));
        // Nothing was written.
        assert_eq!(ledger.balance("u1"), STARTING_BALANCE);
    }

    #[test]
    fn test_credit_then_debit() {
        let mut ledger = Ledger::starter();
        ledger.credit("u1", 100);
        ledger.debit("u1", 150).unwrap();
        assert_eq!(ledger.balance("u1"), 50);
    }

    #[test]
    fn test_cooldown_boundary_exact_seconds() {
        let mut ledger = Ledger::starter();
        let t0 = Utc::now();
        ledger.mark_cooldown("u1", CooldownAction::Work, t0);

        let almost = t0 + chrono::Duration::seconds(1799);
        assert_eq!(
            ledger.cooldown_remaining("u1", CooldownAction::Work, almost),
            Some(1)
        );

        let ready = t0 + chrono::Duration::seconds(1800);
        assert_eq!(
            ledger.cooldown_remaining("u1", CooldownAction::Work, ready),
            None
        );
    }

    #[test]
    fn test_next_panda_id_after_starter() {
        let ledger = Ledger::starter();
        assert_eq!(ledger.next_panda_id(), "panda_006");
    }

    #[test]
    fn test_available_pandas_preserves_order() {
        let mut ledger = Ledger::starter();
        ledger.template_mut("panda_002").unwrap().available = false;
        let ids: Vec<&str> = ledger
            .available_pandas()
            .iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(ids, vec!["panda_001", "panda_003", "panda_004", "panda_005"]);
    }
}
