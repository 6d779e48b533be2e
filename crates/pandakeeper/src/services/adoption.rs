//! Adoption Engine - Moving pandas from the catalog into user care
//!
//! Adoption is all-or-nothing: the fee debit, the availability flip and
//! the new owned record land together or not at all. Checks run in a
//! fixed order so callers always see the most specific error first.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;

use crate::domain::entities::{Ledger, OwnedPanda, PandaTemplate};
use crate::domain::errors::DomainError;
use crate::ports::repositories::LedgerRepository;
use crate::services::store::LedgerStore;

/// Most pandas one user may hold at once
pub const MAX_PANDAS_PER_USER: usize = 3;
/// Average happiness required before adopting beyond the second panda
pub const CARE_QUALITY_THRESHOLD: i32 = 70;

/// Settings for the adoption engine
#[derive(Debug, Clone)]
pub struct AdoptionConfig {
    pub max_pandas: usize,
    pub care_quality_threshold: i32,
    /// Judge the care-quality gate on decayed happiness
    pub decay_enabled: bool,
}

impl Default for AdoptionConfig {
    fn default() -> Self {
        Self {
            max_pandas: MAX_PANDAS_PER_USER,
            care_quality_threshold: CARE_QUALITY_THRESHOLD,
            decay_enabled: false,
        }
    }
}

/// Outcome of a successful adoption
#[derive(Debug, Clone, PartialEq)]
pub struct AdoptionReceipt {
    pub template: PandaTemplate,
    pub fee: i64,
    /// Balance after the fee was taken
    pub balance: i64,
}

/// Application service for catalog adoptions
pub struct AdoptionService<R: LedgerRepository> {
    store: Arc<LedgerStore<R>>,
    config: AdoptionConfig,
}

impl<R: LedgerRepository> AdoptionService<R> {
    pub fn new(store: Arc<LedgerStore<R>>, config: AdoptionConfig) -> Self {
        Self { store, config }
    }

    /// Adopt a panda from the catalog
    pub async fn adopt(
        &self,
        user_id: &str,
        panda_id: &str,
    ) -> Result<AdoptionReceipt, DomainError> {
        self.adopt_at(user_id, panda_id, Utc::now()).await
    }

    /// Adopt with an explicit clock
    pub async fn adopt_at(
        &self,
        user_id: &str,
        panda_id: &str,
        now: DateTime<Utc>,
    ) -> Result<AdoptionReceipt, DomainError> {
        let user = user_id.to_string();
        let panda_id = panda_id.to_string();
        let config = self.config.clone();

        let receipt = self
            .store
            .mutate(move |ledger: &mut Ledger| {
                let template = ledger
                    .template(&panda_id)
                    .ok_or_else(|| DomainError::not_found(&panda_id))?
                    .clone();

                if !template.available {
                    return Err(DomainError::AlreadyAdopted {
                        name: template.name,
                    });
                }

                let balance = ledger.balance(&user);
                if balance < template.adoption_fee {
                    return Err(DomainError::InsufficientFunds {
                        required: template.adoption_fee,
                        available: balance,
                    });
                }

                let owned = ledger.pandas_of(&user);
                if owned.len() >= config.max_pandas {
                    return Err(DomainError::OwnershipLimitExceeded {
                        limit: config.max_pandas,
                    });
                }

                if owned.len() >= 2 {
                    let average = average_happiness(ledger, &user, config.decay_enabled, now);
                    if average < config.care_quality_threshold {
                        return Err(DomainError::CareQualityTooLow {
                            average,
                            required: config.care_quality_threshold,
                        });
                    }
                }

                ledger.debit(&user, template.adoption_fee)?;
                let record = OwnedPanda::new(&template.id, template.base_happiness, now);
                ledger
                    .adoptions
                    .entry(user.clone())
                    .or_default()
                    .push(record);
                if let Some(entry) = ledger.template_mut(&template.id) {
                    entry.available = false;
                }

                Ok(AdoptionReceipt {
                    fee: template.adoption_fee,
                    balance: ledger.balance(&user),
                    template,
                })
            })
            .await?;

        info!(
            user = %user_id,
            panda = %receipt.template.id,
            fee = receipt.fee,
            "🏡 Panda adopted"
        );
        Ok(receipt)
    }

    /// Catalog entries currently open for adoption
    pub async fn available(&self) -> Vec<PandaTemplate> {
        self.store
            .read(|ledger| ledger.available_pandas().into_iter().cloned().collect())
            .await
    }
}

fn average_happiness(ledger: &Ledger, user_id: &str, decay_enabled: bool, now: DateTime<Utc>) -> i32 {
    let owned = ledger.pandas_of(user_id);
    if owned.is_empty() {
        return 0;
    }
    let total: i32 = owned
        .iter()
        .map(|panda| {
            let decay = if decay_enabled {
                ledger
                    .template(&panda.panda_id)
                    .map(|t| t.rarity.decay_per_hour())
                    .unwrap_or(0.0)
            } else {
                0.0
            };
            panda.effective_happiness(decay, now)
        })
        .sum();
    total / owned.len() as i32
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::domain::entities::STARTING_BALANCE;
    use crate::services::store::testing::{store_with, NullRepository};

    fn service(ledger: Ledger) -> AdoptionService<NullRepository> {
        AdoptionService::new(store_with(ledger), AdoptionConfig::default())
    }

    fn rich_ledger(balance: i64) -> Ledger {
        let mut ledger = Ledger::starter();
        ledger.balances.insert("u1".to_string(), balance);
        ledger
    }

    #[tokio::test]
    async fn test_adopt_debits_fee_and_flips_availability() {
        let adoption = service(rich_ledger(500));
        let receipt = adoption.adopt_at("u1", "panda_003", Utc::now()).await.unwrap();

        assert_eq!(receipt.template.name, "Mochi");
        assert_eq!(receipt.fee, 120);
        assert_eq!(receipt.balance, 380);

        let available = adoption.available().await;
        assert!(available.iter().all(|p| p.id != "panda_003"));
    }

    #[tokio::test]
    async fn test_adopt_unknown_panda() {
        let adoption = service(rich_ledger(500));
        let err = adoption.adopt_at("u1", "panda_999", Utc::now()).await.unwrap_err();
        assert!(matches!(err, DomainError::PandaNotFound { .. }));
    }

    #[tokio::test]
    async fn test_adopt_taken_panda() {
        let adoption = service(rich_ledger(500));
        adoption.adopt_at("u1", "panda_003", Utc::now()).await.unwrap();

        let err = adoption.adopt_at("u2", "panda_003", Utc::now()).await.unwrap_err();
        assert!(matches!(err, DomainError::AlreadyAdopted { .. }));
    }

    #[tokio::test]
    async fn test_adopt_insufficient_funds_changes_nothing() {
        let adoption = service(Ledger::starter());
        // Default balance 100 cannot cover Bamboo's 150 fee.
        let err = adoption.adopt_at("u1", "panda_001", Utc::now()).await.unwrap_err();
        assert!(matches!(
            err,
            DomainError::InsufficientFunds {
                required: 150,
                available: 100
            }
        ));

        let ledger = adoption.store.snapshot().await;
        assert_eq!(ledger.balance("u1"), STARTING_BALANCE);
        assert!(ledger.template("panda_001").unwrap().available);
        assert!(ledger.pandas_of("u1").is_empty());
    }

    #[tokio::test]
    async fn test_ownership_cap_at_three() {
        let adoption = service(rich_ledger(10_000));
        let now = Utc::now();
        for id in ["panda_001", "panda_002", "panda_003"] {
            adoption.adopt_at("u1", id, now).await.unwrap();
        }

        let err = adoption.adopt_at("u1", "panda_004", now).await.unwrap_err();
        assert!(matches!(
            err,
            DomainError::OwnershipLimitExceeded { limit: 3 }
        ));
    }

    #[tokio::test]
    async fn test_care_quality_gate_blocks_neglectful_owner() {
        let mut ledger = rich_ledger(10_000);
        let now = Utc::now();
        for id in ["panda_001", "panda_002"] {
            ledger
                .adoptions
                .entry("u1".to_string())
                .or_default()
                .push(OwnedPanda::new(id, 40, now));
            ledger.template_mut(id).unwrap().available = false;
        }
        let adoption = service(ledger);

        let err = adoption.adopt_at("u1", "panda_003", now).await.unwrap_err();
        assert!(matches!(
            err,
            DomainError::CareQualityTooLow {
                average: 40,
                required: 70
            }
        ));
    }

    #[tokio::test]
    async fn test_care_quality_gate_ignores_first_two_adoptions() {
        let mut ledger = rich_ledger(10_000);
        let now = Utc::now();
        ledger
            .adoptions
            .entry("u1".to_string())
            .or_default()
            .push(OwnedPanda::new("panda_001", 10, now));
        ledger.template_mut("panda_001").unwrap().available = false;
        let adoption = service(ledger);

        // One miserable panda does not block the second adoption.
        adoption.adopt_at("u1", "panda_002", now).await.unwrap();
    }

    #[tokio::test]
    async fn test_care_quality_gate_uses_decayed_happiness() {
        let mut ledger = rich_ledger(10_000);
        let t0 = Utc::now();
        for id in ["panda_001", "panda_002"] {
            // Stored at 80, but 10 hours of common-rarity decay lands at 60.
            ledger
                .adoptions
                .entry("u1".to_string())
                .or_default()
                .push(OwnedPanda::new(id, 80, t0 - Duration::hours(10)));
            ledger.template_mut(id).unwrap().available = false;
        }
        let adoption = AdoptionService::new(
            store_with(ledger),
            AdoptionConfig {
                decay_enabled: true,
                ..AdoptionConfig::default()
            },
        );

        let err = adoption.adopt_at("u1", "panda_003", t0).await.unwrap_err();
        assert!(matches!(err, DomainError::CareQualityTooLow { average: 60, .. }));
    }

    #[tokio::test]
    async fn test_daily_then_adopt_scenario() {
        // A fresh user cannot afford Bamboo, claims the daily bonus,
        // then adopts and ends at 50 coins.
        let store = store_with(Ledger::starter());
        let adoption = AdoptionService::new(store.clone(), AdoptionConfig::default());
        let now = Utc::now();

        assert!(adoption.adopt_at("u1", "panda_001", now).await.is_err());

        store
            .mutate(|ledger| {
                ledger.credit("u1", 100);
                Ok(())
            })
            .await
            .unwrap();

        let receipt = adoption.adopt_at("u1", "panda_001", now).await.unwrap();
        assert_eq!(receipt.balance, 50);

        let ledger = store.snapshot().await;
        assert_eq!(ledger.pandas_of("u1").len(), 1);
        assert_eq!(ledger.pandas_of("u1")[0].panda_id, "panda_001");
    }
}
