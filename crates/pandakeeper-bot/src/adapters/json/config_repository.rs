//! JSON-file implementation of ConfigRepository

use std::path::PathBuf;

use async_trait::async_trait;
use tracing::{error, warn};

use pandakeeper::config::BotConfig;
use pandakeeper::domain::DomainError;
use pandakeeper::ports::ConfigRepository;

use super::write_atomic;

/// Load the bot configuration, never failing startup: a missing file
/// seeds a default one, an unreadable file logs and falls back to
/// defaults in memory.
pub async fn load_config_or_default<R: ConfigRepository>(repo: &R) -> BotConfig {
    match repo.load().await {
        Ok(Some(config)) => config,
        Ok(None) => {
            // Seed a config file so operators have something to edit.
            let config = BotConfig::default();
            if let Err(e) = repo.save(&config).await {
                warn!("Failed to seed config file: {}", e);
            }
            config
        }
        Err(e) => {
            error!("Failed to load config, continuing with defaults: {}", e);
            BotConfig::default()
        }
    }
}

/// Bot configuration persistence backed by one JSON file
pub struct JsonConfigRepository {
    path: PathBuf,
}

impl JsonConfigRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ConfigRepository for JsonConfigRepository {
    async fn load(&self) -> Result<Option<BotConfig>, DomainError> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(DomainError::persistence(e)),
        };
        let config = serde_json::from_str(&raw).map_err(DomainError::persistence)?;
        Ok(Some(config))
    }

    async fn save(&self, config: &BotConfig) -> Result<(), DomainError> {
        let contents = serde_json::to_string_pretty(config).map_err(DomainError::persistence)?;
        write_atomic(&self.path, &contents).await
    }
}
