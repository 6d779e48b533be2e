//! OwnedPanda - Per-user adoption record
//!
//! References a catalog template by id (lookup only, no ownership).
//! Mutated by the Care Engine; never deleted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Upper bound for stored happiness
pub const MAX_HAPPINESS: i32 = 100;

/// Experience needed to advance from `level` to `level + 1`
pub fn experience_for_level(level: i32) -> i64 {
    i64::from(level) * 100
}

/// OwnedPanda - Mutable per-user instance data for an adopted panda
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OwnedPanda {
    pub panda_id: String,
    #[serde(rename = "adopted_date")]
    pub adopted_at: DateTime<Utc>,
    pub happiness: i32,
    pub last_fed: DateTime<Utc>,
    pub last_played: DateTime<Utc>,
    #[serde(default)]
    pub experience: i64,
    #[serde(default = "default_level")]
    pub level: i32,
    #[serde(default)]
    pub total_feeds: u32,
    #[serde(default)]
    pub total_plays: u32,
}

fn default_level() -> i32 {
    1
}

impl OwnedPanda {
    /// Create a fresh adoption record with all timestamps set to now
    pub fn new(panda_id: impl Into<String>, base_happiness: i32, now: DateTime<Utc>) -> Self {
        Self {
            panda_id: panda_id.into(),
            adopted_at: now,
            happiness: base_happiness.clamp(0, MAX_HAPPINESS),
            last_fed: now,
            last_played: now,
            experience: 0,
            level: 1,
            total_feeds: 0,
            total_plays: 0,
        }
    }

    /// Raise happiness, clamped to [0, 100]
    pub fn gain_happiness(&mut self, gain: i32) {
        self.happiness = (self.happiness + gain).clamp(0, MAX_HAPPINESS);
    }

    /// Grant experience and apply any level-ups.
    /// Returns true when at least one level was gained.
    pub fn grant_experience(&mut self, amount: i64) -> bool {
        self.experience += amount;
        let mut leveled = false;
        while self.experience >= experience_for_level(self.level) {
            self.experience -= experience_for_level(self.level);
            self.level += 1;
            leveled = true;
        }
        leveled
    }

    /// Happiness after lazy decay, derived at read time and never persisted.
    /// Decay accrues from the most recent care interaction.
    pub fn effective_happiness(&self, decay_per_hour: f64, now: DateTime<Utc>) -> i32 {
        if decay_per_hour <= 0.0 {
            return self.happiness;
        }
        let last_cared = self.last_fed.max(self.last_played);
        let hours = (now - last_cared).num_seconds().max(0) as f64 / 3600.0;
        let decayed = self.happiness - (hours * decay_per_hour).floor() as i32;
        decayed.clamp(0, MAX_HAPPINESS)
    }
}
