//! Ledger Repository Port
//!
//! Abstract interface for durable ledger persistence. The store loads
//! the tolerant wire document and saves the full in-memory ledger.

use async_trait::async_trait;

use crate::domain::entities::Ledger;
use crate::domain::errors::DomainError;
use crate::domain::migration::LedgerDocument;

/// Repository interface for the persisted ledger file
#[async_trait]
pub trait LedgerRepository: Send + Sync {
    /// Load the raw ledger document. Ok(None) when no file exists yet.
    async fn load(&self) -> Result<Option<LedgerDocument>, DomainError>;

    /// Persist the full ledger atomically (write-temp-then-rename)
    async fn save(&self, ledger: &Ledger) -> Result<(), DomainError>;
}
