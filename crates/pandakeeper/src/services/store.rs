//! LedgerStore - Guarded access to the in-memory ledger
//!
//! The store owns the single authoritative copy of the ledger behind a
//! process-wide mutex. Every mutating engine operation runs its whole
//! check-then-mutate sequence inside one `mutate` call and is persisted
//! before the lock is released, so two users' operations can never
//! interleave their read-modify-write sequences.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{error, info};

use crate::domain::entities::Ledger;
use crate::domain::errors::DomainError;
use crate::ports::repositories::LedgerRepository;

/// Sole owner and writer of the ledger
pub struct LedgerStore<R: LedgerRepository> {
    repo: Arc<R>,
    ledger: Mutex<Ledger>,
}

impl<R: LedgerRepository> LedgerStore<R> {
    /// Load the ledger from the repository, falling back to the starter
    /// ledger when no file exists or the file is unreadable. Load never
    /// fails; a fresh ledger is persisted so the file exists from the
    /// first run.
    pub async fn open(repo: Arc<R>) -> Self {
        let ledger = match repo.load().await {
            Ok(Some(document)) => {
                let ledger = document.upgrade();
                info!(
                    pandas = ledger.catalog.len(),
                    users = ledger.balances.len(),
                    "📖 Ledger loaded"
                );
                ledger
            }
            Ok(None) => {
                info!("📖 No ledger file yet, seeding starter catalog");
                let ledger = Ledger::starter();
                if let Err(e) = repo.save(&ledger).await {
                    error!("Failed to persist starter ledger: {}", e);
                }
                ledger
            }
            Err(e) => {
                error!("Failed to load ledger, continuing with defaults: {}", e);
                Ledger::starter()
            }
        };

        Self {
            repo,
            ledger: Mutex::new(ledger),
        }
    }

    /// Read from the ledger under the lock
    pub async fn read<T>(&self, f: impl FnOnce(&Ledger) -> T) -> T {
        let guard = self.ledger.lock().await;
        f(&guard)
    }

    /// Run one check-then-mutate sequence as a unit and persist on
    /// success. A failed operation restores the pre-operation ledger,
    /// so no partial mutation is ever visible. A failed save is logged
    /// and swallowed; the in-memory ledger stays authoritative until
    /// the next successful save.
    pub async fn mutate<T>(
        &self,
        f: impl FnOnce(&mut Ledger) -> Result<T, DomainError>,
    ) -> Result<T, DomainError> {
        let mut guard = self.ledger.lock().await;
        let snapshot = guard.clone();
        match f(&mut guard) {
            Ok(value) => {
                if let Err(e) = self.repo.save(&guard).await {
                    error!("Ledger save failed, keeping in-memory state: {}", e);
                }
                Ok(value)
            }
            Err(e) => {
                *guard = snapshot;
                Err(e)
            }
        }
    }

    /// Clone the current ledger (diagnostics and tests)
    pub async fn snapshot(&self) -> Ledger {
        self.ledger.lock().await.clone()
    }
}
