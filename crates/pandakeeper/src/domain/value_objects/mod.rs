//! Value Objects
//!
//! Immutable value types shared across the domain.

mod cooldown;
mod rarity;

pub use cooldown::*;
pub use rarity::*;
