//! Care Engine - Feed and play interactions with owned pandas
//!
//! Each interaction raises happiness (clamped to 100), pays a small
//! coin reward and grants experience. Cooldowns are per panda and per
//! interaction, tracked on the owned record's own timestamps. Pandas
//! above level 1 give a flat +1 happiness and +1 coin per extra level.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rand::Rng;
use tracing::info;

use crate::domain::entities::{Ledger, OwnedPanda};
use crate::domain::errors::DomainError;
use crate::domain::value_objects::Rarity;
use crate::ports::repositories::LedgerRepository;
use crate::services::store::LedgerStore;

const FEED_COOLDOWN_SECS: i64 = 3600;
const PLAY_COOLDOWN_SECS: i64 = 2700;

const FEED_HAPPINESS_MIN: i32 = 5;
const FEED_HAPPINESS_MAX: i32 = 15;
const FEED_COINS_MIN: i64 = 5;
const FEED_COINS_MAX: i64 = 10;
const FEED_XP_MIN: i64 = 5;
const FEED_XP_MAX: i64 = 15;

const PLAY_HAPPINESS_MIN: i32 = 10;
const PLAY_HAPPINESS_MAX: i32 = 20;
const PLAY_COINS_MIN: i64 = 8;
const PLAY_COINS_MAX: i64 = 15;
const PLAY_XP_MIN: i64 = 8;
const PLAY_XP_MAX: i64 = 20;

/// Settings for the care engine
#[derive(Debug, Clone, Default)]
pub struct CareConfig {
    /// Apply time-based happiness decay when reading happiness
    pub decay_enabled: bool,
}

/// Outcome of a feed or play interaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CareReceipt {
    pub panda_id: String,
    pub panda_name: String,
    /// Happiness after the interaction
    pub happiness: i32,
    /// Portion actually applied (may be cut short by the clamp)
    pub happiness_gain: i32,
    pub coins_earned: i64,
    pub balance: i64,
    pub experience: i64,
    pub level: i32,
    pub leveled_up: bool,
}

/// Read-model row for a user's panda listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PandaSummary {
    pub panda_id: String,
    pub name: String,
    pub rarity: Rarity,
    /// Effective happiness (decayed when decay is enabled)
    pub happiness: i32,
    pub level: i32,
    pub adopted_at: DateTime<Utc>,
}

/// The two care interactions, with their per-panda windows and rolls
#[derive(Debug, Clone, Copy)]
enum Interaction {
    Feed,
    Play,
}

impl Interaction {
    fn cooldown_secs(self) -> i64 {
        match self {
            Self::Feed => FEED_COOLDOWN_SECS,
            Self::Play => PLAY_COOLDOWN_SECS,
        }
    }

    fn last_done(self, panda: &OwnedPanda) -> DateTime<Utc> {
        match self {
            Self::Feed => panda.last_fed,
            Self::Play => panda.last_played,
        }
    }

    fn roll(self, rng: &mut impl Rng) -> (i32, i64, i64) {
        match self {
            Self::Feed => (
                rng.random_range(FEED_HAPPINESS_MIN..=FEED_HAPPINESS_MAX),
                rng.random_range(FEED_COINS_MIN..=FEED_COINS_MAX),
                rng.random_range(FEED_XP_MIN..=FEED_XP_MAX),
            ),
            Self::Play => (
                rng.random_range(PLAY_HAPPINESS_MIN..=PLAY_HAPPINESS_MAX),
                rng.random_range(PLAY_COINS_MIN..=PLAY_COINS_MAX),
                rng.random_range(PLAY_XP_MIN..=PLAY_XP_MAX),
            ),
        }
    }
}

/// Application service for panda care interactions
pub struct CareService<R: LedgerRepository> {
    store: Arc<LedgerStore<R>>,
    config: CareConfig,
}

impl<R: LedgerRepository> CareService<R> {
    pub fn new(store: Arc<LedgerStore<R>>, config: CareConfig) -> Self {
        Self { store, config }
    }

    /// Feed an owned panda
    pub async fn feed(&self, user_id: &str, panda_id: &str) -> Result<CareReceipt, DomainError> {
        self.feed_at(user_id, panda_id, Utc::now()).await
    }

    /// Feed with an explicit clock
    pub async fn feed_at(
        &self,
        user_id: &str,
        panda_id: &str,
        now: DateTime<Utc>,
    ) -> Result<CareReceipt, DomainError> {
        let receipt = self
            .interact(user_id, panda_id, Interaction::Feed, now)
            .await?;
        info!(
            user = %user_id,
            panda = %receipt.panda_id,
            happiness = receipt.happiness,
            "🎋 Panda fed"
        );
        Ok(receipt)
    }

    /// Play with an owned panda
    pub async fn play(&self, user_id: &str, panda_id: &str) -> Result<CareReceipt, DomainError> {
        self.play_at(user_id, panda_id, Utc::now()).await
    }

    /// Play with an explicit clock
    pub async fn play_at(
        &self,
        user_id: &str,
        panda_id: &str,
        now: DateTime<Utc>,
    ) -> Result<CareReceipt, DomainError> {
        let receipt = self
            .interact(user_id, panda_id, Interaction::Play, now)
            .await?;
        info!(
            user = %user_id,
            panda = %receipt.panda_id,
            happiness = receipt.happiness,
            "🎾 Playtime over"
        );
        Ok(receipt)
    }

    /// List a user's pandas with their effective happiness
    pub async fn pandas_of(&self, user_id: &str) -> Vec<PandaSummary> {
        self.pandas_of_at(user_id, Utc::now()).await
    }

    /// Listing with an explicit clock
    pub async fn pandas_of_at(&self, user_id: &str, now: DateTime<Utc>) -> Vec<PandaSummary> {
        let user = user_id.to_string();
        let decay_enabled = self.config.decay_enabled;
        self.store
            .read(move |ledger| {
                ledger
                    .pandas_of(&user)
                    .iter()
                    .map(|owned| {
                        let (name, rarity) = match ledger.template(&owned.panda_id) {
                            Some(t) => (t.name.clone(), t.rarity),
                            None => (owned.panda_id.clone(), Rarity::default()),
                        };
                        let decay = if decay_enabled {
                            rarity.decay_per_hour()
                        } else {
                            0.0
                        };
                        PandaSummary {
                            panda_id: owned.panda_id.clone(),
                            name,
                            rarity,
                            happiness: owned.effective_happiness(decay, now),
                            level: owned.level,
                            adopted_at: owned.adopted_at,
                        }
                    })
                    .collect()
            })
            .await
    }

    async fn interact(
        &self,
        user_id: &str,
        panda_id: &str,
        interaction: Interaction,
        now: DateTime<Utc>,
    ) -> Result<CareReceipt, DomainError> {
        let (happiness_roll, coins_roll, xp_roll) = {
            let mut rng = rand::rng();
            interaction.roll(&mut rng)
        };

        let user = user_id.to_string();
        let panda_id = panda_id.to_string();
        self.store
            .mutate(move |ledger: &mut Ledger| {
                let panda_name = ledger
                    .template(&panda_id)
                    .map(|t| t.name.clone())
                    .unwrap_or_else(|| panda_id.clone());

                let owned = ledger
                    .owned_mut(&user, &panda_id)
                    .ok_or_else(|| DomainError::NotOwned {
                        id: panda_id.clone(),
                    })?;

                let elapsed = (now - interaction.last_done(owned)).num_seconds();
                let remaining = interaction.cooldown_secs() - elapsed;
                if remaining > 0 {
                    return Err(DomainError::Cooldown {
                        remaining_secs: remaining,
                    });
                }

                // Level bonus: +1 happiness and +1 coin per level above 1.
                let level_bonus = i64::from(owned.level - 1).max(0);
                let happiness_gain = happiness_roll + level_bonus as i32;
                let coins = coins_roll + level_bonus;

                let before = owned.happiness;
                owned.gain_happiness(happiness_gain);
                let applied = owned.happiness - before;
                let leveled_up = owned.grant_experience(xp_roll);

                match interaction {
                    Interaction::Feed => {
                        owned.last_fed = now;
                        owned.total_feeds += 1;
                    }
                    Interaction::Play => {
                        owned.last_played = now;
                        owned.total_plays += 1;
                    }
                }

                let happiness = owned.happiness;
                let experience = owned.experience;
                let level = owned.level;

                ledger.credit(&user, coins);
                Ok(CareReceipt {
                    panda_id: panda_id.clone(),
                    panda_name,
                    happiness,
                    happiness_gain: applied,
                    coins_earned: coins,
                    balance: ledger.balance(&user),
                    experience,
                    level,
                    leveled_up,
                })
            })
            .await
    }
}
