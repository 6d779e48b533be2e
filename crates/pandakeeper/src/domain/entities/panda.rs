//! PandaTemplate - Catalog entry for an adoptable panda
//!
//! Pure domain entity without infrastructure dependencies. Templates
//! are never deleted; adoption only flips the `available` flag.

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::Rarity;

/// Floor for adoption fees of generated pandas
pub const MIN_ADOPTION_FEE: i64 = 50;

/// PandaTemplate - Immutable display and economic attributes
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PandaTemplate {
    pub id: String,
    pub name: String,
    pub age: String,
    pub personality: String,
    pub favorite_food: String,
    pub special_trait: String,
    pub image_url: String,
    pub adoption_fee: i64,
    pub available: bool,
    /// Rarity tier; legacy ledgers had no rarity, so default to common
    #[serde(default)]
    pub rarity: Rarity,
    /// Happiness a fresh adoption of this panda starts with
    #[serde(default = "default_base_happiness")]
    pub base_happiness: i32,
}

fn default_base_happiness() -> i32 {
    100
}

impl PandaTemplate {
    /// The five starter pandas seeded into a fresh ledger
    pub fn starter_catalog() -> Vec<PandaTemplate> {
        vec![
            PandaTemplate {
                id: "panda_001".to_string(),
                name: "Bamboo".to_string(),
                age: "3 months".to_string(),
                personality: "Playful and energetic".to_string(),
                favorite_food: "Fresh bamboo shoots".to_string(),
                special_trait: "Loves to tumble around".to_string(),
                image_url: "https://images.unsplash.com/photo-1564349683136-77e08dba1ef7?w=400"
                    .to_string(),
                adoption_fee: 150,
                available: true,
                rarity: Rarity::Common,
                base_happiness: 100,
            },
            PandaTemplate {
                id: "panda_002".to_string(),
                name: "Snuggles".to_string(),
                age: "6 months".to_string(),
                personality: "Calm and cuddly".to_string(),
                favorite_food: "Bamboo leaves".to_string(),
                special_trait: "Expert hugger".to_string(),
                image_url: "https://images.unsplash.com/photo-1548247416-ec66f4900b2e?w=400"
                    .to_string(),
                adoption_fee: 200,
                available: true,
                rarity: Rarity::Common,
                base_happiness: 100,
            },
            PandaTemplate {
                id: "panda_003".to_string(),
                name: "Mochi".to_string(),
                age: "2 months".to_string(),
                personality: "Shy but sweet".to_string(),
                favorite_food: "Young bamboo tips".to_string(),
                special_trait: "Squeaks when happy".to_string(),
                image_url: "https://images.unsplash.com/photo-1539979138647-0d8e368d09fb?w=400"
                    .to_string(),
                adoption_fee: 120,
                available: true,
                rarity: Rarity::Common,
                base_happiness: 100,
            },
            PandaTemplate {
                id: "panda_004".to_string(),
                name: "Thunder".to_string(),
                age: "1 year".to_string(),
                personality: "Brave and adventurous".to_string(),
                favorite_food: "Thick bamboo stems".to_string(),
                special_trait: "Amazing climber".to_string(),
                image_url: "https://images.unsplash.com/photo-1515036551567-6ea0ac3b7bd5?w=400"
                    .to_string(),
                adoption_fee: 300,
                available: true,
                rarity: Rarity::Uncommon,
                base_happiness: 100,
            },
            PandaTemplate {
                id: "panda_005".to_string(),
                name: "Marshmallow".to_string(),
                age: "4 months".to_string(),
                personality: "Gentle and loving".to_string(),
                favorite_food: "Soft bamboo shoots".to_string(),
                special_trait: "Purrs like a cat".to_string(),
                image_url: "https://images.unsplash.com/photo-1582792141062-cdc80a803cc8?w=400"
                    .to_string(),
                adoption_fee: 175,
                available: true,
                rarity: Rarity::Common,
                base_happiness: 100,
            },
        ]
    }
}
