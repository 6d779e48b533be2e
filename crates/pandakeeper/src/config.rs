//! Bot configuration
//!
//! Persisted settings for the daily post task. Loaded with
//! merge-with-defaults semantics: a file missing any key still parses,
//! field-by-field.

use chrono::{DateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;

/// Seconds in one scheduler period
pub const SECONDS_PER_DAY: u64 = 86_400;

/// Configuration for the daily panda post
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BotConfig {
    /// Destination channel; None disables posting
    #[serde(default)]
    pub daily_channel_id: Option<u64>,
    /// "HH:MM" 24-hour wall-clock time, UTC
    #[serde(default = "default_daily_time")]
    pub daily_time: String,
    /// Display timezone label; scheduling math is UTC
    #[serde(default = "default_timezone")]
    pub timezone: String,
    #[serde(default)]
    pub enabled: bool,
}

fn default_daily_time() -> String {
    "12:00".to_string()
}

fn default_timezone() -> String {
    "UTC".to_string()
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            daily_channel_id: None,
            daily_time: default_daily_time(),
            timezone: default_timezone(),
            enabled: false,
        }
    }
}

impl BotConfig {
    /// Parse `daily_time` into (hour, minute)
    pub fn parse_daily_time(&self) -> Result<(u32, u32), DomainError> {
        let invalid = || {
            DomainError::Validation(format!(
                "Invalid daily_time {:?}, expected HH:MM",
                self.daily_time
            ))
        };
        let (hour, minute) = self.daily_time.split_once(':').ok_or_else(invalid)?;
        let hour: u32 = hour.parse().map_err(|_| invalid())?;
        let minute: u32 = minute.parse().map_err(|_| invalid())?;
        if hour >= 24 || minute >= 60 {
            return Err(invalid());
        }
        Ok((hour, minute))
    }

    /// How long to wait until the next configured fire time.
    /// A target earlier than (or equal to) the current wall-clock time
    /// waits until tomorrow, so restarts mid-window never double-fire.
    pub fn next_fire_delay(&self, now: DateTime<Utc>) -> Result<std::time::Duration, DomainError> {
        let (hour, minute) = self.parse_daily_time()?;
        let now_secs = u64::from(now.hour()) * 3600 + u64::from(now.minute()) * 60
            + u64::from(now.second());
        let target_secs = u64::from(hour) * 3600 + u64::from(minute) * 60;

        let wait = if target_secs > now_secs {
            target_secs - now_secs
        } else {
            SECONDS_PER_DAY - (now_secs - target_secs)
        };
        Ok(std::time::Duration::from_secs(wait))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32, minute: u32, second: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 10, hour, minute, second).unwrap()
    }

    fn config(daily_time: &str) -> BotConfig {
        BotConfig {
            daily_time: daily_time.to_string(),
            ..BotConfig::default()
        }
    }

    #[test]
    fn test_delay_before_target_today() {
        let delay = config("12:00").next_fire_delay(at(10, 0, 0)).unwrap();
        assert_eq!(delay.as_secs(), 2 * 3600);
    }

    #[test]
    fn test_delay_after_target_waits_for_tomorrow() {
        let delay = config("12:00").next_fire_delay(at(13, 30, 0)).unwrap();
        assert_eq!(delay.as_secs(), SECONDS_PER_DAY - 90 * 60);
    }

    #[test]
    fn test_delay_at_exact_target_waits_full_day() {
        let delay = config("12:00").next_fire_delay(at(12, 0, 0)).unwrap();
        assert_eq!(delay.as_secs(), SECONDS_PER_DAY);
    }

    #[test]
    fn test_invalid_time_string_rejected() {
        for bad in ["noon", "25:00", "12:60", "12", "12:0x"] {
            assert!(config(bad).next_fire_delay(at(0, 0, 0)).is_err(), "{bad}");
        }
    }

    #[test]
    fn test_missing_keys_fill_defaults() {
        let parsed: BotConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed, BotConfig::default());

        let partial: BotConfig =
            serde_json::from_str(r#"{"enabled": true, "daily_channel_id": 42}"#).unwrap();
        assert!(partial.enabled);
        assert_eq!(partial.daily_channel_id, Some(42));
        assert_eq!(partial.daily_time, "12:00");
    }
}
