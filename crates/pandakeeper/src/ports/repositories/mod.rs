//! Repository Ports
//!
//! Abstract interfaces for data persistence operations.

mod config_repository;
mod ledger_repository;

pub use config_repository::*;
pub use ledger_repository::*;
