//! Catalog generator - Weighted-rarity panda creation
//!
//! Rolls a complete panda from attribute pools, priced off its rarity
//! tier with a small jitter, and appends it to the catalog under the
//! next free id.

use std::sync::Arc;

use rand::prelude::IndexedRandom;
use rand::Rng;
use tracing::info;

use crate::domain::entities::{Ledger, PandaTemplate, MIN_ADOPTION_FEE};
use crate::domain::errors::DomainError;
use crate::domain::value_objects::Rarity;
use crate::ports::repositories::LedgerRepository;
use crate::services::store::LedgerStore;

const NAMES: &[&str] = &[
    "Bao", "Mei", "Ling", "Pudding", "Dumpling", "Noodle", "Pebble", "Willow", "Biscuit", "Clover",
    "Maple", "Tofu", "Ginger", "Sesame", "Juniper", "Acorn",
];

const AGES: &[&str] = &[
    "2 months", "3 months", "4 months", "6 months", "8 months", "1 year", "18 months", "2 years",
];

const PERSONALITIES: &[&str] = &[
    "Playful and energetic",
    "Calm and cuddly",
    "Shy but sweet",
    "Brave and adventurous",
    "Gentle and loving",
    "Curious and clever",
    "Sleepy and serene",
    "Mischievous and bold",
];

const FOODS: &[&str] = &[
    "Fresh bamboo shoots",
    "Bamboo leaves",
    "Young bamboo tips",
    "Thick bamboo stems",
    "Soft bamboo shoots",
    "Sweet bamboo hearts",
];

const TRAITS: &[&str] = &[
    "Loves to tumble around",
    "Expert hugger",
    "Squeaks when happy",
    "Amazing climber",
    "Purrs like a cat",
    "Does somersaults for treats",
    "Naps in odd places",
    "Waves at visitors",
];

const IMAGES: &[&str] = &[
    "https://images.unsplash.com/photo-1564349683136-77e08dba1ef7?w=400",
    "https://images.unsplash.com/photo-1548247416-ec66f4900b2e?w=400",
    "https://images.unsplash.com/photo-1539979138647-0d8e368d09fb?w=400",
    "https://images.unsplash.com/photo-1515036551567-6ea0ac3b7bd5?w=400",
    "https://images.unsplash.com/photo-1582792141062-cdc80a803cc8?w=400",
];

/// Attribute roll, priced but not yet assigned a catalog id
#[derive(Debug, Clone)]
struct Blueprint {
    name: String,
    age: String,
    personality: String,
    favorite_food: String,
    special_trait: String,
    image_url: String,
    adoption_fee: i64,
    rarity: Rarity,
}

impl Blueprint {
    fn roll(rng: &mut impl Rng) -> Self {
        let rarity = Rarity::roll(rng);
        let jitter = rng.random_range(-50..=100);
        let adoption_fee = (rarity.base_fee() + jitter).max(MIN_ADOPTION_FEE);
        Self {
            name: pick(rng, NAMES),
            age: pick(rng, AGES),
            personality: pick(rng, PERSONALITIES),
            favorite_food: pick(rng, FOODS),
            special_trait: pick(rng, TRAITS),
            image_url: pick(rng, IMAGES),
            adoption_fee,
            rarity,
        }
    }

    fn into_template(self, id: String) -> PandaTemplate {
        PandaTemplate {
            id,
            name: self.name,
            age: self.age,
            personality: self.personality,
            favorite_food: self.favorite_food,
            special_trait: self.special_trait,
            image_url: self.image_url,
            adoption_fee: self.adoption_fee,
            available: true,
            rarity: self.rarity,
            base_happiness: self.rarity.base_happiness(),
        }
    }
}

fn pick(rng: &mut impl Rng, pool: &[&str]) -> String {
    // Pools are non-empty constants, choose cannot return None.
    pool.choose(rng).copied().unwrap_or(pool[0]).to_string()
}

/// Application service that grows the catalog
pub struct GeneratorService<R: LedgerRepository> {
    store: Arc<LedgerStore<R>>,
}

impl<R: LedgerRepository> GeneratorService<R> {
    pub fn new(store: Arc<LedgerStore<R>>) -> Self {
        Self { store }
    }

    /// Roll a new panda and add it to the catalog
    pub async fn generate(&self) -> Result<PandaTemplate, DomainError> {
        let blueprint = {
            let mut rng = rand::rng();
            Blueprint::roll(&mut rng)
        };

        let template = self
            .store
            .mutate(move |ledger: &mut Ledger| {
                let template = blueprint.into_template(ledger.next_panda_id());
                ledger.catalog.push(template.clone());
                Ok(template)
            })
            .await?;

        info!(
            panda = %template.id,
            rarity = %template.rarity,
            fee = template.adoption_fee,
            "🐼 New panda arrived"
        );
        Ok(template)
    }
}
