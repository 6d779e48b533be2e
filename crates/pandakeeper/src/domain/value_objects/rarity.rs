//! Rarity - Weighted classification of generated pandas
//!
//! Rarity fixes a generated panda's base happiness, its happiness decay
//! rate, and the base component of its adoption fee.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Rarity tier of a panda template
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Rarity {
    #[default]
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

impl Rarity {
    /// Roll a rarity from the weighted distribution:
    /// common 60%, uncommon 25%, rare 10%, epic 4%, legendary 1%.
    pub fn roll(rng: &mut impl Rng) -> Self {
        match rng.random_range(0..100u32) {
            0..=59 => Rarity::Common,
            60..=84 => Rarity::Uncommon,
            85..=94 => Rarity::Rare,
            95..=98 => Rarity::Epic,
            _ => Rarity::Legendary,
        }
    }

    /// Base adoption fee before the per-panda jitter is applied
    pub fn base_fee(self) -> i64 {
        match self {
            Rarity::Common => 100,
            Rarity::Uncommon => 175,
            Rarity::Rare => 275,
            Rarity::Epic => 400,
            Rarity::Legendary => 600,
        }
    }

    /// Happiness a freshly adopted panda of this tier starts with
    pub fn base_happiness(self) -> i32 {
        match self {
            Rarity::Common => 80,
            Rarity::Uncommon => 85,
            Rarity::Rare => 90,
            Rarity::Epic => 95,
            Rarity::Legendary => 100,
        }
    }

    /// Happiness lost per hour of neglect (lazy decay, derived at read time)
    pub fn decay_per_hour(self) -> f64 {
        match self {
            Rarity::Common => 2.0,
            Rarity::Uncommon => 1.5,
            Rarity::Rare => 1.0,
            Rarity::Epic => 0.5,
            Rarity::Legendary => 0.0,
        }
    }
}

impl std::fmt::Display for Rarity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rarity::Common => write!(f, "common"),
            Rarity::Uncommon => write!(f, "uncommon"),
            Rarity::Rare => write!(f, "rare"),
            Rarity::Epic => write!(f, "epic"),
            Rarity::Legendary => write!(f, "legendary"),
        }
    }
}

impl std::str::FromStr for Rarity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "common" => Ok(Rarity::Common),
            "uncommon" => Ok(Rarity::Uncommon),
            "rare" => Ok(Rarity::Rare),
            "epic" => Ok(Rarity::Epic),
            "legendary" => Ok(Rarity::Legendary),
            _ => Err(format!("Unknown rarity: {}", s)),
        }
    }
}
