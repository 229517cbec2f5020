use chrono::{DateTime, Utc};
use log::warn;
use serde::Deserialize;
use std::collections::HashMap;

use crate::domain::{GeneratedOrderRecord, OrderedPlayer, PlayerId, Tier};
use crate::errors::EngineResult;

/// Stored blob as read for re-seeding, before tiers are checked.
#[derive(Deserialize)]
struct StoredOrder {
    players: Vec<StoredPlayer>,
    timestamp: DateTime<Utc>,
}

#[derive(Deserialize)]
struct StoredPlayer {
    id: PlayerId,
    tier: serde_json::Value,
}

impl StoredPlayer {
    fn into_ordered(self) -> Option<OrderedPlayer> {
        let tier = self
            .tier
            .as_u64()
            .and_then(|t| u8::try_from(t).ok())
            .and_then(|t| Tier::try_from(t).ok());

        match tier {
            Some(tier) => Some(OrderedPlayer { id: self.id, tier }),
            None => {
                warn!("Dropping previous tier {} for {}", self.tier, self.id);
                None
            }
        }
    }
}

impl GeneratedOrderRecord {
    /// Encodes the record as the stored JSON blob:
    /// `{"players":[{"id":..,"tier":1..4}],"timestamp":"<ISO-8601>"}`.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> EngineResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads a stored blob for re-seeding. An unreadable blob counts as no
    /// previous order at all, so generation starts fresh instead of failing.
    /// Entries whose tier is not 1-4 are dropped on their own; those players
    /// are seeded like newcomers while everyone else keeps their tier.
    pub fn decode_prior(blob: Option<&str>) -> Option<Self> {
        let blob = blob.filter(|b| !b.trim().is_empty())?;
        let stored: StoredOrder = match serde_json::from_str(blob) {
            Ok(stored) => stored,
            Err(e) => {
                warn!("Ignoring previous player order, starting fresh: {}", e);
                return None;
            }
        };

        Some(Self {
            players: stored
                .players
                .into_iter()
                .filter_map(StoredPlayer::into_ordered)
                .collect(),
            timestamp: stored.timestamp,
        })
    }

    pub fn tier_of(&self, player_id: &str) -> Option<Tier> {
        self.players
            .iter()
            .find(|p| p.id == player_id)
            .map(|p| p.tier)
    }

    /// 1-based turn position of a player.
    pub fn position_of(&self, player_id: &str) -> Option<usize> {
        self.players
            .iter()
            .position(|p| p.id == player_id)
            .map(|idx| idx + 1)
    }

    /// Player id to tier; the last entry wins if an id repeats.
    pub fn tier_map(&self) -> HashMap<&str, Tier> {
        self.players
            .iter()
            .map(|p| (p.id.as_str(), p.tier))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::EngineError;
    use chrono::TimeZone;

    fn sample() -> GeneratedOrderRecord {
        GeneratedOrderRecord {
            players: vec![
                OrderedPlayer { id: "b".into(), tier: Tier::try_from(1u8).unwrap() },
                OrderedPlayer { id: "a".into(), tier: Tier::try_from(2u8).unwrap() },
                OrderedPlayer { id: "c".into(), tier: Tier::try_from(4u8).unwrap() },
            ],
            timestamp: Utc.with_ymd_and_hms(2024, 7, 26, 18, 30, 0).unwrap(),
        }
    }

    #[test]
    fn test_json_shape() {
        let json = sample().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["players"][0]["id"], "b");
        assert_eq!(value["players"][0]["tier"], 1);
        assert_eq!(value["players"][2]["tier"], 4);
        assert_eq!(value["timestamp"], "2024-07-26T18:30:00Z");
    }

    #[test]
    fn test_reads_blob_written_by_browser_clients() {
        let blob = r#"{"players":[{"id":"u-1","tier":3},{"id":"u-2","tier":1}],"timestamp":"2024-05-01T09:15:42.123Z"}"#;
        let record = GeneratedOrderRecord::from_json(blob).unwrap();

        assert_eq!(record.len(), 2);
        assert_eq!(record.tier_of("u-1").map(|t| t.value()), Some(3));
        assert_eq!(record.position_of("u-2"), Some(2));
    }

    #[test]
    fn test_out_of_range_tier_is_malformed() {
        let blob = r#"{"players":[{"id":"x","tier":9}],"timestamp":"2024-05-01T09:15:42Z"}"#;
        assert!(matches!(
            GeneratedOrderRecord::from_json(blob),
            Err(EngineError::MalformedPriorState(_))
        ));
    }

    #[test]
    fn test_decode_prior_drops_only_bad_tiers() {
        let blob = r#"{"players":[{"id":"a","tier":2},{"id":"b","tier":0},{"id":"c","tier":9},{"id":"d","tier":"x"},{"id":"e","tier":4}],"timestamp":"2024-05-01T09:15:42Z"}"#;

        let record = GeneratedOrderRecord::decode_prior(Some(blob)).unwrap();

        let ids: Vec<&str> = record.players.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "e"]);
        assert_eq!(record.tier_of("a").map(|t| t.value()), Some(2));
        assert_eq!(record.tier_of("b"), None);
        assert_eq!(record.tier_of("e"), Some(Tier::LAST));
    }

    #[test]
    fn test_repeated_id_takes_last_tier() {
        let blob = r#"{"players":[{"id":"a","tier":1},{"id":"b","tier":2},{"id":"a","tier":3}],"timestamp":"2024-05-01T09:15:42Z"}"#;
        let record = GeneratedOrderRecord::from_json(blob).unwrap();

        let tiers = record.tier_map();
        assert_eq!(tiers.len(), 2);
        assert_eq!(tiers["a"].value(), 3);
        assert_eq!(tiers["b"].value(), 2);
    }

    #[test]
    fn test_decode_prior_falls_back_to_none() {
        assert!(GeneratedOrderRecord::decode_prior(None).is_none());
        assert!(GeneratedOrderRecord::decode_prior(Some("")).is_none());
        assert!(GeneratedOrderRecord::decode_prior(Some("{not json")).is_none());
        assert!(GeneratedOrderRecord::decode_prior(Some(r#"{"players":[]}"#)).is_none());

        let json = sample().to_json().unwrap();
        assert_eq!(GeneratedOrderRecord::decode_prior(Some(&json)), Some(sample()));
    }

    #[test]
    fn test_lookups() {
        let record = sample();
        assert_eq!(record.position_of("b"), Some(1));
        assert_eq!(record.position_of("zzz"), None);
        assert_eq!(record.tier_of("zzz"), None);
        assert_eq!(record.tier_map().len(), 3);
        assert_eq!(record.tier_map()["c"], Tier::LAST);
    }
}
