//! Domain Entities
//!
//! Pure domain models without infrastructure dependencies.
//! - PandaTemplate: catalog-defined display/economic attributes
//! - OwnedPanda: mutable per-user adoption record
//! - Ledger: aggregate of accounts, adoptions and the catalog

mod ledger;
mod owned;
mod panda;

pub use ledger::*;
pub use owned::*;
pub use panda::*;
