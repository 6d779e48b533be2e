//! Domain Errors
//!
//! Typed failure taxonomy for ledger operations. Every engine surfaces
//! these as `Result` values so the presentation layer can render a
//! stable message per kind; nothing panics across the port boundary.

use thiserror::Error;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Panda not found: {id}")]
    PandaNotFound { id: String },

    #[error("{name} has already been adopted")]
    AlreadyAdopted { name: String },

    #[error("Insufficient funds: need {required} bamboo coins, have {available}")]
    InsufficientFunds { required: i64, available: i64 },

    #[error("You can only adopt up to {limit} pandas at a time")]
    OwnershipLimitExceeded { limit: usize },

    #[error("Average happiness {average}% is below the {required}% needed to adopt another panda")]
    CareQualityTooLow { average: i32, required: i32 },

    #[error("On cooldown: try again in {}", format_remaining(*remaining_secs))]
    Cooldown { remaining_secs: i64 },

    #[error("You do not own a panda with id {id}")]
    NotOwned { id: String },

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl DomainError {
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::PandaNotFound { id: id.into() }
    }

    pub fn persistence(err: impl std::fmt::Display) -> Self {
        Self::Persistence(err.to_string())
    }

    /// Remaining whole minutes for display, rounded up
    pub fn remaining_minutes(&self) -> Option<i64> {
        match self {
            Self::Cooldown { remaining_secs } => Some((remaining_secs + 59) / 60),
            _ => None,
        }
    }
}

/// Render a remaining cooldown in whole minutes or hours.
/// The underlying check always uses exact elapsed seconds.
fn format_remaining(secs: i64) -> String {
    if secs >= 3600 {
        format!("{} hours", secs / 3600)
    } else {
        format!("{} minutes", (secs + 59) / 60)
    }
}
