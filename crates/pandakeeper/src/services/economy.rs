//! Economy Engine - Cooldown-gated earn actions
//!
//! Grants bamboo coins for `work` (30 minute window) and the daily
//! bonus (24 hour window). Rewards are rolled before the ledger lock
//! is taken; the check-credit-mark sequence runs as one unit.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rand::Rng;
use tracing::info;

use crate::domain::entities::Ledger;
use crate::domain::errors::DomainError;
use crate::domain::value_objects::CooldownAction;
use crate::ports::repositories::LedgerRepository;
use crate::services::store::LedgerStore;

/// Coins granted per work shift
const WORK_REWARD_MIN: i64 = 20;
const WORK_REWARD_MAX: i64 = 50;
/// Chance of the flat work bonus
const WORK_BONUS_CHANCE: f64 = 0.15;
const WORK_BONUS: i64 = 15;
/// Fixed daily claim
const DAILY_BONUS: i64 = 100;

/// Outcome of a successful earn action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EarnReceipt {
    /// Total coins credited, bonus included
    pub coins_earned: i64,
    /// Bonus portion, when the bonus roll hit
    pub bonus: Option<i64>,
    /// Balance after the credit
    pub balance: i64,
}

/// Application service for time-gated currency grants
pub struct EconomyService<R: LedgerRepository> {
    store: Arc<LedgerStore<R>>,
}

impl<R: LedgerRepository> EconomyService<R> {
    pub fn new(store: Arc<LedgerStore<R>>) -> Self {
        Self { store }
    }

    /// Work a shift for a random coin reward
    pub async fn work(&self, user_id: &str) -> Result<EarnReceipt, DomainError> {
        self.work_at(user_id, Utc::now()).await
    }

    /// Work with an explicit clock (cooldown boundaries are exact seconds)
    pub async fn work_at(
        &self,
        user_id: &str,
        now: DateTime<Utc>,
    ) -> Result<EarnReceipt, DomainError> {
        let (reward, bonus) = {
            let mut rng = rand::rng();
            let reward = rng.random_range(WORK_REWARD_MIN..=WORK_REWARD_MAX);
            let bonus = rng.random_bool(WORK_BONUS_CHANCE).then_some(WORK_BONUS);
            (reward, bonus)
        };

        let receipt = self
            .earn(user_id, CooldownAction::Work, reward, bonus, now)
            .await?;
        info!(
            user = %user_id,
            coins = receipt.coins_earned,
            "💼 Work shift completed"
        );
        Ok(receipt)
    }

    /// Claim the fixed daily bonus
    pub async fn claim_daily(&self, user_id: &str) -> Result<EarnReceipt, DomainError> {
        self.claim_daily_at(user_id, Utc::now()).await
    }

    /// Claim the daily bonus with an explicit clock
    pub async fn claim_daily_at(
        &self,
        user_id: &str,
        now: DateTime<Utc>,
    ) -> Result<EarnReceipt, DomainError> {
        let receipt = self
            .earn(user_id, CooldownAction::Daily, DAILY_BONUS, None, now)
            .await?;
        info!(user = %user_id, coins = receipt.coins_earned, "🎁 Daily bonus claimed");
        Ok(receipt)
    }

    /// Current balance (unseen users start at the default)
    pub async fn balance(&self, user_id: &str) -> i64 {
        let user = user_id.to_string();
        self.store.read(move |ledger| ledger.balance(&user)).await
    }

    async fn earn(
        &self,
        user_id: &str,
        action: CooldownAction,
        reward: i64,
        bonus: Option<i64>,
        now: DateTime<Utc>,
    ) -> Result<EarnReceipt, DomainError> {
        let user = user_id.to_string();
        self.store
            .mutate(move |ledger: &mut Ledger| {
                if let Some(remaining) = ledger.cooldown_remaining(&user, action, now) {
                    return Err(DomainError::Cooldown {
                        remaining_secs: remaining,
                    });
                }
                let total = reward + bonus.unwrap_or(0);
                ledger.credit(&user, total);
                ledger.mark_cooldown(&user, action, now);
                Ok(EarnReceipt {
                    coins_earned: total,
                    bonus,
                    balance: ledger.balance(&user),
                })
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::domain::entities::STARTING_BALANCE;
    use crate::services::store::testing::store_with;

    fn service() -> EconomyService<crate::services::store::testing::NullRepository> {
        EconomyService::new(store_with(Ledger::starter()))
    }

    #[tokio::test]
    async fn test_work_credits_within_reward_range() {
        let economy = service();
        let receipt = economy.work_at("u1", Utc::now()).await.unwrap();

        assert!(receipt.coins_earned >= WORK_REWARD_MIN);
        assert!(receipt.coins_earned <= WORK_REWARD_MAX + WORK_BONUS);
        assert_eq!(receipt.balance, STARTING_BALANCE + receipt.coins_earned);
    }

    #[tokio::test]
    async fn test_work_cooldown_boundary() {
        let economy = service();
        let t0 = Utc::now();
        economy.work_at("u1", t0).await.unwrap();

        // One second short of the window still fails.
        let err = economy
            .work_at("u1", t0 + Duration::seconds(1799))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Cooldown { remaining_secs: 1 }));

        // Exactly at the window succeeds.
        economy
            .work_at("u1", t0 + Duration::seconds(1800))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_daily_fixed_amount_and_24h_window() {
        let economy = service();
        let t0 = Utc::now();
        let receipt = economy.claim_daily_at("u1", t0).await.unwrap();
        assert_eq!(receipt.coins_earned, DAILY_BONUS);
        assert_eq!(receipt.bonus, None);

        let err = economy
            .claim_daily_at("u1", t0 + Duration::hours(23))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Cooldown { .. }));

        economy
            .claim_daily_at("u1", t0 + Duration::hours(24))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_cooldowns_are_per_user_and_per_action() {
        let economy = service();
        let t0 = Utc::now();
        economy.work_at("u1", t0).await.unwrap();

        // A different user and a different action are unaffected.
        economy.work_at("u2", t0).await.unwrap();
        economy.claim_daily_at("u1", t0).await.unwrap();
    }

    #[tokio::test]
    async fn test_balance_defaults_for_unseen_user() {
        let economy = service();
        assert_eq!(economy.balance("nobody").await, STARTING_BALANCE);
    }
}
