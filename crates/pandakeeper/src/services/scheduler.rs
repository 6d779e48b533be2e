//! Daily post scheduler
//!
//! Background task that waits until the configured wall-clock time,
//! then delivers one panda post every 24 hours. Content fetch failures
//! degrade the post field-by-field instead of skipping the day.

use std::sync::Arc;

use chrono::Utc;
use tokio::task::JoinHandle;
use tokio::time::{interval, sleep, Duration};
use tracing::{error, info, warn};

use crate::config::{BotConfig, SECONDS_PER_DAY};
use crate::ports::services::{DailyPost, DailyPostSink, PandaContentSource};

/// Background scheduler for the daily panda post
pub struct DailyScheduler<C: PandaContentSource, P: DailyPostSink> {
    config: BotConfig,
    source: Arc<C>,
    sink: Arc<P>,
}

impl<C, P> DailyScheduler<C, P>
where
    C: PandaContentSource + 'static,
    P: DailyPostSink + 'static,
{
    pub fn new(config: BotConfig, source: Arc<C>, sink: Arc<P>) -> Self {
        Self {
            config,
            source,
            sink,
        }
    }

    /// Spawn the scheduler loop
    pub fn start(self) -> JoinHandle<()> {
        tokio::spawn(async move {
            self.run().await;
        })
    }

    async fn run(&self) {
        if !self.config.enabled {
            info!("📅 Daily post disabled, scheduler not starting");
            return;
        }
        let Some(channel_id) = self.config.daily_channel_id else {
            warn!("📅 Daily post enabled but no channel configured, scheduler not starting");
            return;
        };

        let delay = match self.config.next_fire_delay(Utc::now()) {
            Ok(delay) => delay,
            Err(e) => {
                error!("Daily post schedule invalid: {}", e);
                return;
            }
        };
        info!(
            time = %self.config.daily_time,
            first_in_secs = delay.as_secs(),
            "📅 Daily post scheduler started"
        );
        sleep(delay).await;

        // First tick fires immediately after the initial sleep.
        let mut ticker = interval(Duration::from_secs(SECONDS_PER_DAY));
        loop {
            ticker.tick().await;
            self.post_once(channel_id).await;
        }
    }

    /// Assemble and deliver one post. Fetch failures leave the field
    /// empty; delivery failure is logged and retried next period.
    async fn post_once(&self, channel_id: u64) {
        let image_url = match self.source.fetch_image().await {
            Ok(url) => Some(url),
            Err(e) => {
                warn!("Daily post image fetch failed: {}", e);
                None
            }
        };
        let fact = match self.source.fetch_fact().await {
            Ok(fact) => Some(fact),
            Err(e) => {
                warn!("Daily post fact fetch failed: {}", e);
                None
            }
        };

        let post = DailyPost {
            channel_id,
            image_url,
            fact,
            scheduled_at: Utc::now(),
        };
        match self.sink.deliver(post).await {
            Ok(()) => info!(channel = channel_id, "📅 Daily panda post delivered"),
            Err(e) => error!("Daily post delivery failed: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use tokio::sync::Mutex;

    use super::*;
    use crate::domain::errors::DomainError;

    struct StaticSource;

    #[async_trait]
    impl PandaContentSource for StaticSource {
        async fn fetch_image(&self) -> Result<String, DomainError> {
            Ok("https://example.com/panda.jpg".to_string())
        }

        async fn fetch_fact(&self) -> Result<String, DomainError> {
            Ok("Pandas spend up to 14 hours a day eating.".to_string())
        }
    }

    struct FailingSource;

    #[async_trait]
    impl PandaContentSource for FailingSource {
        async fn fetch_image(&self) -> Result<String, DomainError> {
            Err(DomainError::Persistence("api down".to_string()))
        }

        async fn fetch_fact(&self) -> Result<String, DomainError> {
            Err(DomainError::Persistence("api down".to_string()))
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        posts: Mutex<Vec<DailyPost>>,
    }

    #[async_trait]
    impl DailyPostSink for RecordingSink {
        async fn deliver(&self, post: DailyPost) -> Result<(), DomainError> {
            self.posts.lock().await.push(post);
            Ok(())
        }
    }

    fn enabled_config() -> BotConfig {
        BotConfig {
            daily_channel_id: Some(42),
            enabled: true,
            ..BotConfig::default()
        }
    }

    #[tokio::test]
    async fn test_post_once_delivers_full_post() {
        let sink = Arc::new(RecordingSink::default());
        let scheduler = DailyScheduler::new(enabled_config(), Arc::new(StaticSource), sink.clone());

        scheduler.post_once(42).await;

        let posts = sink.posts.lock().await;
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].channel_id, 42);
        assert!(posts[0].image_url.is_some());
        assert!(posts[0].fact.is_some());
    }

    #[tokio::test]
    async fn test_post_once_degrades_on_fetch_failure() {
        let sink = Arc::new(RecordingSink::default());
        let scheduler =
            DailyScheduler::new(enabled_config(), Arc::new(FailingSource), sink.clone());

        scheduler.post_once(42).await;

        // The post still goes out, just without the failed fields.
        let posts = sink.posts.lock().await;
        assert_eq!(posts.len(), 1);
        assert!(posts[0].image_url.is_none());
        assert!(posts[0].fact.is_none());
    }

    #[tokio::test]
    async fn test_run_exits_when_disabled() {
        let sink = Arc::new(RecordingSink::default());
        let scheduler = DailyScheduler::new(
            BotConfig::default(),
            Arc::new(StaticSource),
            sink.clone(),
        );

        scheduler.run().await;
        assert!(sink.posts.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_run_exits_without_channel() {
        let sink = Arc::new(RecordingSink::default());
        let config = BotConfig {
            enabled: true,
            ..BotConfig::default()
        };
        let scheduler = DailyScheduler::new(config, Arc::new(StaticSource), sink.clone());

        scheduler.run().await;
        assert!(sink.posts.lock().await.is_empty());
    }
}
