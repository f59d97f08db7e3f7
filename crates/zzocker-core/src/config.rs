use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::field::{Field, KickoffLayout};
use crate::world::World;

/// Environment variable naming a TOML config file.
pub const CONFIG_ENV_VAR: &str = "ZZOCKER_CONFIG";
/// Fallback config path, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "config/zzocker.toml";

/// Contact, kick, and integration tunables.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Fixed tick size in seconds.
    pub dt: f64,
    /// Restitution for player-ball contacts.
    pub ball_restitution: f64,
    /// Restitution for player-player contacts.
    pub player_restitution: f64,
    /// Restitution for bounces off the touchlines and end lines.
    pub wall_restitution: f64,
    /// Kick velocity gained per second of full-strength kick.
    pub kick_force: f64,
    /// Extra distance beyond contact within which a kick still connects.
    pub kick_reach: f64,
    /// Extra distance beyond contact within which a player holds possession.
    pub possession_range: f64,
    /// Ball speed below which it snaps to rest.
    pub ball_stop_speed: f64,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            dt: 1.0 / 60.0,
            ball_restitution: 0.8,
            player_restitution: 0.3,
            wall_restitution: 0.7,
            kick_force: 600.0,
            kick_reach: 0.5,
            possession_range: 0.75,
            ball_stop_speed: 0.05,
        }
    }
}

impl PhysicsConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.dt > 0.0 && self.dt.is_finite()) {
            return Err(ConfigError::InvalidTunable {
                name: "physics.dt",
                value: self.dt,
            });
        }
        for (name, value) in [
            ("physics.ball_restitution", self.ball_restitution),
            ("physics.player_restitution", self.player_restitution),
            ("physics.wall_restitution", self.wall_restitution),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::InvalidTunable { name, value });
            }
        }
        for (name, value) in [
            ("physics.kick_force", self.kick_force),
            ("physics.kick_reach", self.kick_reach),
            ("physics.possession_range", self.possession_range),
            ("physics.ball_stop_speed", self.ball_stop_speed),
        ] {
            if !(value >= 0.0 && value.is_finite()) {
                return Err(ConfigError::InvalidTunable { name, value });
            }
        }
        Ok(())
    }
}

/// Ball properties.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BallConfig {
    pub radius: f64,
    pub mass: f64,
    /// Fraction of velocity kept after one second, in (0, 1].
    pub friction: f64,
    pub max_speed: f64,
}

impl Default for BallConfig {
    fn default() -> Self {
        Self {
            radius: 0.11,
            mass: 0.43,
            friction: 0.6,
            max_speed: 30.0,
        }
    }
}

/// Properties shared by every player on the roster.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub per_team: usize,
    pub radius: f64,
    pub mass: f64,
    /// Treat players as immovable anchors in contact resolution.
    pub unbounded_mass: bool,
    pub max_speed: f64,
    pub acceleration: f64,
    pub friction: f64,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            per_team: 5,
            radius: 0.5,
            mass: 75.0,
            unbounded_mass: false,
            max_speed: 8.0,
            acceleration: 20.0,
            friction: 25.0,
        }
    }
}

/// Game-over predicate. The match ends when any configured limit is reached.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EndCondition {
    /// First team to this many goals wins.
    pub score_limit: Option<u32>,
    /// Match length in simulated seconds.
    pub time_limit: Option<f64>,
}

impl EndCondition {
    pub fn is_met(&self, world: &World) -> bool {
        let score_reached = self
            .score_limit
            .is_some_and(|limit| world.score.home >= limit || world.score.away >= limit);
        let time_reached = self
            .time_limit
            .is_some_and(|limit| world.elapsed_time >= limit);
        score_reached || time_reached
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(limit) = self.time_limit
            && !(limit > 0.0)
        {
            return Err(ConfigError::InvalidTunable {
                name: "end.time_limit",
                value: limit,
            });
        }
        if self.score_limit == Some(0) {
            return Err(ConfigError::InvalidTunable {
                name: "end.score_limit",
                value: 0.0,
            });
        }
        Ok(())
    }
}

/// Top-level match configuration, loadable from TOML.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    pub field: Field,
    pub physics: PhysicsConfig,
    pub ball: BallConfig,
    pub players: PlayerConfig,
    pub kickoff: KickoffLayout,
    pub end: EndCondition,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            field: Field::default(),
            physics: PhysicsConfig::default(),
            ball: BallConfig::default(),
            players: PlayerConfig::default(),
            kickoff: KickoffLayout::default(),
            end: EndCondition {
                score_limit: None,
                time_limit: Some(600.0),
            },
        }
    }
}

impl MatchConfig {
    /// Load from `$ZZOCKER_CONFIG` or `config/zzocker.toml`, falling back to
    /// defaults when the file is missing or unparseable.
    pub fn load() -> Self {
        let path =
            std::env::var(CONFIG_ENV_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        match std::fs::read_to_string(&path) {
            Ok(content) => match Self::from_toml_str(&content) {
                Ok(cfg) => {
                    tracing::info!(path = %path, "Loaded match configuration");
                    cfg
                },
                Err(e) => {
                    tracing::warn!("Failed to parse {path}: {e}, using defaults");
                    Self::default()
                },
            },
            Err(_) => {
                tracing::info!("No {path} found, using defaults");
                Self::default()
            },
        }
    }

    /// Strictly load and validate a config file.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content =
            std::fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate TOML.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let cfg: Self = toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.field.validate()?;
        self.physics.validate()?;
        self.end.validate()?;
        let p = &self.players;
        if !(p.radius > 0.0 && p.radius.is_finite()) {
            return Err(ConfigError::InvalidRadius {
                body: "players".to_string(),
                radius: p.radius,
            });
        }
        if !p.unbounded_mass && !(p.mass > 0.0 && p.mass.is_finite()) {
            return Err(ConfigError::InvalidMass {
                body: "players".to_string(),
                mass: p.mass,
            });
        }
        if !(self.ball.mass > 0.0 && self.ball.mass.is_finite()) {
            return Err(ConfigError::InvalidMass {
                body: "ball".to_string(),
                mass: self.ball.mass,
            });
        }
        // Remaining body checks happen when the world is built.
        World::from_config(self).map(|_| ())
    }
}
