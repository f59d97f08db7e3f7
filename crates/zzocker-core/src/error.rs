use thiserror::Error;

use crate::team::{PlayerId, Team};

/// Invalid field, body, or match configuration. Raised before a match starts.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{name} must be > 0, got {value}")]
    NonPositiveDimension { name: &'static str, value: f64 },
    #[error("goal width {goal_width} must be smaller than field height {field_height}")]
    GoalTooWide { goal_width: f64, field_height: f64 },
    #[error("goal width {goal_width} does not fit on the end line of width {field_width}")]
    GoalWiderThanField { goal_width: f64, field_width: f64 },
    #[error("duplicate player id {0}")]
    DuplicatePlayerId(PlayerId),
    #[error("{body} radius must be > 0, got {radius}")]
    InvalidRadius { body: String, radius: f64 },
    #[error("{body} mass must be > 0, got {mass}")]
    InvalidMass { body: String, mass: f64 },
    #[error("{body} max speed must be > 0, got {max_speed}")]
    InvalidSpeedCap { body: String, max_speed: f64 },
    #[error("{name} is out of range: {value}")]
    InvalidTunable { name: &'static str, value: f64 },
    #[error("kickoff layout has {available} slots for {team} but {needed} players")]
    KickoffSlotsMissing {
        team: Team,
        needed: usize,
        available: usize,
    },
    #[error("kickoff depth {depth} is outside the half field of height {half_height}")]
    KickoffDepthOutOfField { depth: f64, half_height: f64 },
    #[error("kickoff spot ({x}, {y}) for player {id} does not fit inside the field")]
    KickoffSpotOutOfField { id: PlayerId, x: f64, y: f64 },
    #[error("failed to parse match config: {0}")]
    Parse(String),
    #[error("failed to read match config: {0}")]
    Io(String),
}

/// The intent provider failed while the orchestrator was gathering intents.
#[derive(Debug, Error)]
#[error("intent provider failed on tick {tick}: {source}")]
pub struct IntentError {
    pub tick: u64,
    #[source]
    pub source: Box<dyn std::error::Error + Send + Sync>,
}

impl IntentError {
    pub fn new(tick: u64, source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self {
            tick,
            source: source.into(),
        }
    }
}
