use thiserror::Error;

/// Failures surfaced by the scoring and seeding engine.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("no players available: mark at least one player as present")]
    NoPlayersAvailable,

    #[error("unknown resolution mode '{0}', expected 'automatic' or 'override'")]
    InvalidMode(String),

    #[error("tier {0} is out of range, expected 1-4")]
    InvalidTier(u8),

    #[error("previous order could not be read: {0}")]
    MalformedPriorState(#[from] serde_json::Error),
}

pub type EngineResult<T> = Result<T, EngineError>;
