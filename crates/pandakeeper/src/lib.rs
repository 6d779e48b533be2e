//! Pandakeeper Domain Library
//!
//! Core domain types and engines for the panda adoption ledger.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain/`): Pure business entities and logic
//!   - `entities/`: Core domain models (PandaTemplate, OwnedPanda, Ledger)
//!   - `value_objects/`: Immutable value types (Rarity, CooldownAction)
//!   - `errors`: Domain-specific error types
//!   - `migration`: Legacy ledger file upgrade
//!
//! - **Ports** (`ports/`): Abstract interfaces (traits)
//!   - `repositories/`: Data access interfaces
//!   - `services/`: External service interfaces
//!
//! - **Services** (`services/`): Application engines over the ledger
//!   (store, economy, care, adoption, generator, daily scheduler)
//!
//! # Usage
//!
//! ```rust,ignore
//! use pandakeeper::domain::{Ledger, PandaTemplate, DomainError};
//! use pandakeeper::services::{LedgerStore, AdoptionService};
//! ```

pub mod config;
pub mod domain;
pub mod ports;
pub mod services;

// Re-export commonly used types
pub use config::BotConfig;
pub use domain::{
    CooldownAction, DomainError, Ledger, LedgerDocument, OwnedPanda, PandaTemplate, Rarity,
    MAX_HAPPINESS, MIN_ADOPTION_FEE, STARTING_BALANCE,
};
pub use ports::{
    ConfigRepository,
    DailyPost,
    DailyPostSink,
    // Repositories
    LedgerRepository,
    // Services
    PandaContentSource,
};
pub use services::{
    AdoptionConfig, AdoptionReceipt, AdoptionService, CareConfig, CareReceipt, CareService,
    DailyScheduler, EarnReceipt, EconomyService, GeneratorService, LedgerStore, PandaSummary,
};
