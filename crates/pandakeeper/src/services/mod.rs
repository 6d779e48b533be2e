//! Application Services
//!
//! Engines that run ledger operations through the guarded store.

mod adoption;
mod care;
mod economy;
mod generator;
mod scheduler;
mod store;

pub use adoption::*;
pub use care::*;
pub use economy::*;
pub use generator::*;
pub use scheduler::*;
pub use store::LedgerStore;
