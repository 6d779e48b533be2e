//! Panda Content Source Port
//!
//! Abstract interface for fetching the image and fact that go into the
//! daily post. Real implementations wrap external APIs; the core only
//! sees this trait.

use async_trait::async_trait;

use crate::domain::errors::DomainError;

/// Service interface for daily post content
#[async_trait]
pub trait PandaContentSource: Send + Sync {
    /// Fetch a panda image URL
    async fn fetch_image(&self) -> Result<String, DomainError>;

    /// Fetch a short panda fact
    async fn fetch_fact(&self) -> Result<String, DomainError>;
}
