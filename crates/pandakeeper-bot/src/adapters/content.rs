//! Built-in content source and post sink
//!
//! The bundled content source serves from fixed pools so the daily
//! post works without any external API. The log sink renders posts to
//! the log; a chat-platform sink would replace it in deployment.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tracing::info;

use pandakeeper::domain::DomainError;
use pandakeeper::ports::{DailyPost, DailyPostSink, PandaContentSource};

const IMAGES: &[&str] = &[
    "https://images.unsplash.com/photo-1564349683136-77e08dba1ef7?w=400",
    "https://images.unsplash.com/photo-1548247416-ec66f4900b2e?w=400",
    "https://images.unsplash.com/photo-1539979138647-0d8e368d09fb?w=400",
    "https://images.unsplash.com/photo-1515036551567-6ea0ac3b7bd5?w=400",
    "https://images.unsplash.com/photo-1582792141062-cdc80a803cc8?w=400",
];

const FACTS: &[&str] = &[
    "Giant pandas spend 10 to 16 hours a day feeding.",
    "A newborn panda is about the size of a stick of butter.",
    "Pandas have a pseudo-thumb, an extended wrist bone, for gripping bamboo.",
    "Wild pandas live almost exclusively in the mountains of central China.",
    "Bamboo makes up around 99% of a giant panda's diet.",
    "Pandas can swim and are excellent tree climbers.",
    "An adult panda can eat up to 38 kilograms of bamboo in a day.",
];

/// Content source that rotates through bundled images and facts
#[derive(Default)]
pub struct StaticContentSource {
    image_cursor: AtomicUsize,
    fact_cursor: AtomicUsize,
}

#[async_trait]
impl PandaContentSource for StaticContentSource {
    async fn fetch_image(&self) -> Result<String, DomainError> {
        let index = self.image_cursor.fetch_add(1, Ordering::Relaxed);
        Ok(IMAGES[index % IMAGES.len()].to_string())
    }

    async fn fetch_fact(&self) -> Result<String, DomainError> {
        let index = self.fact_cursor.fetch_add(1, Ordering::Relaxed);
        Ok(FACTS[index % FACTS.len()].to_string())
    }
}

/// Post sink that renders the daily post into the log
pub struct LogPostSink;

#[async_trait]
impl DailyPostSink for LogPostSink {
    async fn deliver(&self, post: DailyPost) -> Result<(), DomainError> {
        info!(
            channel = post.channel_id,
            image = post.image_url.as_deref().unwrap_or("-"),
            fact = post.fact.as_deref().unwrap_or("-"),
            "🐼 Daily panda post"
        );
        Ok(())
    }
}
