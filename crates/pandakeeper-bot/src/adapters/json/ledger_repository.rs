//! JSON-file implementation of LedgerRepository

use std::path::PathBuf;

use async_trait::async_trait;
use tracing::debug;

use pandakeeper::domain::{DomainError, Ledger, LedgerDocument};
use pandakeeper::ports::LedgerRepository;

use super::write_atomic;

/// Ledger persistence backed by one JSON file
pub struct JsonLedgerRepository {
    path: PathBuf,
}

impl JsonLedgerRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl LedgerRepository for JsonLedgerRepository {
    /// Read the raw ledger document. A missing file is not an error;
    /// unreadable or unparseable content is.
    async fn load(&self) -> Result<Option<LedgerDocument>, DomainError> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(DomainError::persistence(e)),
        };
        let document = serde_json::from_str(&raw).map_err(DomainError::persistence)?;
        Ok(Some(document))
    }

    async fn save(&self, ledger: &Ledger) -> Result<(), DomainError> {
        let contents = serde_json::to_string_pretty(ledger).map_err(DomainError::persistence)?;
        write_atomic(&self.path, &contents).await?;
        debug!(path = %self.path.display(), "Ledger saved");
        Ok(())
    }
}
