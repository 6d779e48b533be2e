//! Daily Post Sink Port
//!
//! Abstract interface for delivering the scheduled daily post to the
//! chat platform. Rendering and transport live behind this trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::errors::DomainError;

/// A scheduled daily post, assembled by the scheduler
#[derive(Debug, Clone)]
pub struct DailyPost {
    /// Destination channel from the bot configuration
    pub channel_id: u64,
    /// Image URL, when the content source had one
    pub image_url: Option<String>,
    /// Short fact, when the content source had one
    pub fact: Option<String>,
    pub scheduled_at: DateTime<Utc>,
}

/// Service interface for daily post delivery
#[async_trait]
pub trait DailyPostSink: Send + Sync {
    /// Deliver one daily post
    async fn deliver(&self, post: DailyPost) -> Result<(), DomainError>;
}
