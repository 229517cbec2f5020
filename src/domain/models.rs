use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::EngineError;

pub type PlayerId = String;
pub type EventId = String;
pub type TeamId = String;

/// Podium medal attached to a score. "No medal" is `Option::<Medal>::None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Medal {
    Gold,
    Silver,
    Bronze,
}

impl Medal {
    pub fn as_str(&self) -> &str {
        match self {
            Medal::Gold => "gold",
            Medal::Silver => "silver",
            Medal::Bronze => "bronze",
        }
    }

    /// Zero-based finishing position this medal stands for.
    pub fn rank(&self) -> usize {
        match self {
            Medal::Gold => 0,
            Medal::Silver => 1,
            Medal::Bronze => 2,
        }
    }

    /// Medal awarded for a zero-based finishing position, if any.
    pub fn for_rank(rank: usize) -> Option<Self> {
        match rank {
            0 => Some(Medal::Gold),
            1 => Some(Medal::Silver),
            2 => Some(Medal::Bronze),
            _ => None,
        }
    }
}

impl fmt::Display for Medal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Medal {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "gold" => Ok(Medal::Gold),
            "silver" => Ok(Medal::Silver),
            "bronze" => Ok(Medal::Bronze),
            other => Err(format!("unknown medal '{}'", other)),
        }
    }
}

/// How a batch of scores is turned into points and medals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResolutionMode {
    /// Points and medals derived from score ranking
    #[default]
    Automatic,
    /// Points derived from caller-supplied medals
    Override,
}

impl ResolutionMode {
    pub fn as_str(&self) -> &str {
        match self {
            ResolutionMode::Automatic => "automatic",
            ResolutionMode::Override => "override",
        }
    }
}

impl FromStr for ResolutionMode {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "automatic" => Ok(ResolutionMode::Automatic),
            "override" => Ok(ResolutionMode::Override),
            other => Err(EngineError::InvalidMode(other.to_string())),
        }
    }
}

/// One row of raw score input for a single game instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRow {
    pub player_id: Option<PlayerId>,
    pub score: f64,
    #[serde(default)]
    pub medal: Option<Medal>,
}

impl ScoreRow {
    pub fn new(player_id: &str, score: f64) -> Self {
        Self {
            player_id: Some(player_id.to_string()),
            score,
            medal: None,
        }
    }

    pub fn with_medal(mut self, medal: Option<Medal>) -> Self {
        self.medal = medal;
        self
    }

    /// The row's player, if it names one.
    pub fn player(&self) -> Option<&str> {
        self.player_id
            .as_deref()
            .filter(|id| !id.trim().is_empty())
    }
}

/// A resolved score annotated with points and medal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub player_id: PlayerId,
    pub score: f64,
    pub points: u8,
    pub medal: Option<Medal>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerPresence {
    pub player_id: PlayerId,
    pub is_present: bool,
}

impl PlayerPresence {
    pub fn new(player_id: &str, is_present: bool) -> Self {
        Self {
            player_id: player_id.to_string(),
            is_present,
        }
    }
}

/// Fairness bucket used to weight turn-order shuffles. Always 1..=4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Tier(u8);

impl Tier {
    pub const FIRST: Tier = Tier(1);
    pub const LAST: Tier = Tier(4);
    pub const COUNT: usize = 4;

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Tier {
    type Error = EngineError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if (1..=Tier::COUNT as u8).contains(&value) {
            Ok(Tier(value))
        } else {
            Err(EngineError::InvalidTier(value))
        }
    }
}

impl From<Tier> for u8 {
    fn from(tier: Tier) -> Self {
        tier.0
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tier {}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderedPlayer {
    pub id: PlayerId,
    pub tier: Tier,
}

/// Persisted result of a turn-order generation, fed back in as the seed for the next one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedOrderRecord {
    pub players: Vec<OrderedPlayer>,
    pub timestamp: DateTime<Utc>,
}

// --- Standings ---

/// A stored, already-resolved score as read back for leaderboards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub player_id: Option<PlayerId>,
    pub event_id: EventId,
    pub points: u32,
    pub medal: Option<Medal>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedalCount {
    pub gold: u32,
    pub silver: u32,
    pub bronze: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    pub total_points: u32,
    pub total_games: u32,
    pub medals: MedalCount,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandingEntry {
    pub player_id: PlayerId,
    pub tally: Tally,
}

/// Which player represents a team in which event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamAssignment {
    pub player_id: PlayerId,
    pub event_id: EventId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    pub assignments: Vec<TeamAssignment>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamStandingEntry {
    pub team_id: TeamId,
    pub name: String,
    pub tally: Tally,
}
