//! JSON File Adapters
//!
//! Repository implementations over pretty-printed JSON files. Writes
//! go to a sibling `.tmp` file first and are renamed into place, so a
//! crash mid-write never leaves a truncated ledger behind.

mod config_repository;
mod ledger_repository;

pub use config_repository::*;
pub use ledger_repository::*;

use std::path::Path;

use pandakeeper::domain::DomainError;

/// Write `contents` to `path` through a temp file plus rename
pub(crate) async fn write_atomic(path: &Path, contents: &str) -> Result<(), DomainError> {
    let tmp = path.with_extension("tmp");
    tokio::fs::write(&tmp, contents)
        .await
        .map_err(DomainError::persistence)?;
    tokio::fs::rename(&tmp, path)
        .await
        .map_err(DomainError::persistence)?;
    Ok(())
}
