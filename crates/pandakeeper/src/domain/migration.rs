//! Ledger file migration
//!
//! Older ledger files overloaded the currency map with cooldown
//! timestamps under prefixed keys, and owned records grew fields over
//! time. Instead of defensive get-with-default calls on every read
//! path, the raw document is upgraded once at load into a fully
//! populated [`Ledger`].

use std::collections::HashMap;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};
use tracing::warn;

use crate::domain::entities::{Ledger, OwnedPanda, PandaTemplate, MAX_HAPPINESS};
use crate::domain::value_objects::CooldownAction;

/// Raw on-disk shape of the ledger file. Every key is optional so a
/// partially written or older file still loads field-by-field.
#[derive(Debug, Default, Deserialize)]
pub struct LedgerDocument {
    #[serde(default)]
    pub adoptions: HashMap<String, Vec<OwnedPandaRecord>>,
    #[serde(default)]
    pub available_pandas: Vec<PandaTemplate>,
    /// Legacy files mixed integer balances and ISO timestamp strings here
    #[serde(default)]
    pub user_currency: HashMap<String, serde_json::Value>,
    #[serde(default)]
    pub cooldowns: HashMap<String, HashMap<CooldownAction, DateTime<Utc>>>,
}

/// On-disk shape of one adoption record, tolerant of missing fields
#[derive(Debug, Deserialize)]
pub struct OwnedPandaRecord {
    pub panda_id: String,
    #[serde(rename = "adopted_date", deserialize_with = "flexible_timestamp")]
    pub adopted_at: DateTime<Utc>,
    pub happiness: Option<i32>,
    #[serde(default, deserialize_with = "flexible_timestamp_opt")]
    pub last_fed: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "flexible_timestamp_opt")]
    pub last_played: Option<DateTime<Utc>>,
    pub experience: Option<i64>,
    pub level: Option<i32>,
    pub total_feeds: Option<u32>,
    pub total_plays: Option<u32>,
}

/// Parse a stored timestamp. New files carry an RFC 3339 offset; older
/// files wrote naive ISO 8601 strings that are UTC by convention.
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(timestamp) = raw.parse::<DateTime<Utc>>() {
        return Some(timestamp);
    }
    raw.parse::<NaiveDateTime>().ok().map(|naive| naive.and_utc())
}

fn flexible_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {raw}")))
}

fn flexible_timestamp_opt<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(raw) => parse_timestamp(&raw)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {raw}"))),
    }
}

impl OwnedPandaRecord {
    /// Backfill missing stats; care timestamps default to the adoption time
    fn upgrade(self) -> OwnedPanda {
        OwnedPanda {
            adopted_at: self.adopted_at,
            happiness: self.happiness.unwrap_or(100).clamp(0, MAX_HAPPINESS),
            last_fed: self.last_fed.unwrap_or(self.adopted_at),
            last_played: self.last_played.unwrap_or(self.adopted_at),
            experience: self.experience.unwrap_or(0).max(0),
            level: self.level.unwrap_or(1).max(1),
            total_feeds: self.total_feeds.unwrap_or(0),
            total_plays: self.total_plays.unwrap_or(0),
            panda_id: self.panda_id,
        }
    }
}

impl LedgerDocument {
    /// Upgrade the raw document into a fully populated ledger.
    ///
    /// - Prefix-keyed cooldown entries move out of `user_currency` into
    ///   the dedicated cooldown map (already-migrated entries win).
    /// - An empty catalog is replaced with the starter catalog.
    /// - Unparseable currency entries are dropped with a warning.
    pub fn upgrade(self) -> Ledger {
        let mut balances = HashMap::new();
        let mut cooldowns = self.cooldowns;

        'entries: for (key, value) in self.user_currency {
            for action in [CooldownAction::Work, CooldownAction::Daily] {
                if let Some(user_id) = key.strip_prefix(action.legacy_prefix()) {
                    migrate_cooldown(&mut cooldowns, user_id, action, &value);
                    continue 'entries;
                }
            }
            match value.as_i64() {
                Some(amount) => {
                    balances.insert(key, amount);
                }
                None => warn!(key = %key, "Dropping non-integer currency entry"),
            }
        }

        let catalog = if self.available_pandas.is_empty() {
            PandaTemplate::starter_catalog()
        } else {
            self.available_pandas
        };

        let adoptions = self
            .adoptions
            .into_iter()
            .map(|(user, records)| {
                (
                    user,
                    records.into_iter().map(OwnedPandaRecord::upgrade).collect(),
                )
            })
            .collect();

        Ledger {
            adoptions,
            catalog,
            balances,
            cooldowns,
        }
    }
}

fn migrate_cooldown(
    cooldowns: &mut HashMap<String, HashMap<CooldownAction, DateTime<Utc>>>,
    user_id: &str,
    action: CooldownAction,
    value: &serde_json::Value,
) {
    let parsed = value.as_str().and_then(parse_timestamp);
    let Some(timestamp) = parsed else {
        warn!(user = %user_id, action = %action, "Dropping unparseable legacy cooldown entry");
        return;
    };
    cooldowns
        .entry(user_id.to_string())
        .or_default()
        .entry(action)
        .or_insert(timestamp);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_becomes_starter_ledger() {
        let ledger = LedgerDocument::default().upgrade();
        assert_eq!(ledger, Ledger::starter());
    }

    #[test]
    fn test_legacy_cooldowns_move_out_of_currency_map() {
        let json = serde_json::json!({
            "adoptions": {},
            "available_pandas": [],
            "user_currency": {
                "12345": 250,
                "last_work_12345": "2024-03-01T10:00:00Z",
                "last_daily_12345": "2024-03-01T08:00:00Z"
            }
        });
        let doc: LedgerDocument = serde_json::from_value(json).unwrap();
        let ledger = doc.upgrade();

        assert_eq!(ledger.balance("12345"), 250);
        assert!(!ledger.balances.contains_key("last_work_12345"));
        let user_cooldowns = ledger.cooldowns.get("12345").unwrap();
        assert!(user_cooldowns.contains_key(&CooldownAction::Work));
        assert!(user_cooldowns.contains_key(&CooldownAction::Daily));
    }

    #[test]
    fn test_unparseable_entries_are_dropped() {
        let json = serde_json::json!({
            "user_currency": {
                "last_work_999": 42,
                "corrupt": "not a number"
            }
        });
        let doc: LedgerDocument = serde_json::from_value(json).unwrap();
        let ledger = doc.upgrade();
        assert!(ledger.balances.is_empty());
        assert!(ledger.cooldowns.is_empty());
    }

    #[test]
    fn test_owned_record_backfill() {
        let json = serde_json::json!({
            "adoptions": {
                "u1": [{
                    "panda_id": "panda_001",
                    "adopted_date": "2024-01-15T12:00:00Z",
                    "happiness": 180
                }]
            }
        });
        let doc: LedgerDocument = serde_json::from_value(json).unwrap();
        let ledger = doc.upgrade();
        let owned = &ledger.pandas_of("u1")[0];

        assert_eq!(owned.happiness, 100);
        assert_eq!(owned.last_fed, owned.adopted_at);
        assert_eq!(owned.last_played, owned.adopted_at);
        assert_eq!(owned.level, 1);
        assert_eq!(owned.experience, 0);
    }

    #[test]
    fn test_naive_timestamps_parse_as_utc() {
        // Older files stored offset-less ISO 8601 strings with
        // microsecond precision; they are UTC by convention.
        let json = serde_json::json!({
            "adoptions": {
                "u1": [{
                    "panda_id": "panda_001",
                    "adopted_date": "2024-01-15T12:00:00.123456",
                    "happiness": 85,
                    "last_fed": "2024-01-16T08:30:00.500000",
                    "last_played": "2024-01-16T09:00:00"
                }]
            },
            "user_currency": {
                "u1": 180,
                "last_work_u1": "2024-03-01T10:00:00.250000"
            }
        });
        let doc: LedgerDocument = serde_json::from_value(json).unwrap();
        let ledger = doc.upgrade();

        let owned = &ledger.pandas_of("u1")[0];
        assert_eq!(
            owned.adopted_at,
            "2024-01-15T12:00:00.123456Z".parse::<DateTime<Utc>>().unwrap()
        );
        assert_eq!(
            owned.last_fed,
            "2024-01-16T08:30:00.500000Z".parse::<DateTime<Utc>>().unwrap()
        );
        assert_eq!(ledger.balance("u1"), 180);
        assert_eq!(
            ledger.cooldowns["u1"][&CooldownAction::Work],
            "2024-03-01T10:00:00.250000Z".parse::<DateTime<Utc>>().unwrap()
        );
    }

    #[test]
    fn test_already_migrated_cooldown_wins_over_legacy() {
        let json = serde_json::json!({
            "user_currency": {
                "last_work_u1": "2024-01-01T00:00:00Z"
            },
            "cooldowns": {
                "u1": { "work": "2024-06-01T00:00:00Z" }
            }
        });
        let doc: LedgerDocument = serde_json::from_value(json).unwrap();
        let ledger = doc.upgrade();
        let kept = ledger.cooldowns["u1"][&CooldownAction::Work];
        assert_eq!(kept, "2024-06-01T00:00:00Z".parse::<DateTime<Utc>>().unwrap());
    }

    #[test]
    fn test_new_format_round_trips_through_document() {
        let mut ledger = Ledger::starter();
        ledger.credit("u1", 50);
        ledger.mark_cooldown("u1", CooldownAction::Work, Utc::now());

        let bytes = serde_json::to_vec(&ledger).unwrap();
        let doc: LedgerDocument = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(doc.upgrade(), ledger);
    }
}
