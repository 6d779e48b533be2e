//! Config Repository Port
//!
//! Abstract interface for the persisted bot configuration file.

use async_trait::async_trait;

use crate::config::BotConfig;
use crate::domain::errors::DomainError;

/// Repository interface for the persisted configuration file
#[async_trait]
pub trait ConfigRepository: Send + Sync {
    /// Load the configuration. Ok(None) when no file exists yet.
    async fn load(&self) -> Result<Option<BotConfig>, DomainError>;

    /// Persist the configuration atomically
    async fn save(&self, config: &BotConfig) -> Result<(), DomainError>;
}
