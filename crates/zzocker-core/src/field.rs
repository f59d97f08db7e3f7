use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::team::Team;
use crate::vec2::Vector2;

/// Pitch geometry. The origin is the centre spot.
///
/// `x` runs across the pitch in `[-width/2, width/2]`; `y` runs between the
/// two end lines at `±height/2`. Each goal mouth spans `|x| < goal_width/2`
/// on its end line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Field {
    pub width: f64,
    pub height: f64,
    pub goal_width: f64,
}

impl Default for Field {
    fn default() -> Self {
        Self {
            width: 68.0,
            height: 105.0,
            goal_width: 7.32,
        }
    }
}

impl Field {
    pub fn new(width: f64, height: f64, goal_width: f64) -> Result<Self, ConfigError> {
        let field = Self {
            width,
            height,
            goal_width,
        };
        field.validate()?;
        Ok(field)
    }

    pub fn half_width(&self) -> f64 {
        self.width / 2.0
    }

    pub fn half_height(&self) -> f64 {
        self.height / 2.0
    }

    pub fn goal_half_width(&self) -> f64 {
        self.goal_width / 2.0
    }

    /// Whether `x` lies strictly inside the goal-mouth span.
    pub fn in_goal_mouth(&self, x: f64) -> bool {
        x.abs() < self.goal_half_width()
    }

    pub fn centre(&self) -> Vector2 {
        Vector2::ZERO
    }

    /// Whether a circle of `radius` at `position` lies fully inside the pitch.
    pub fn fits(&self, position: Vector2, radius: f64) -> bool {
        position.x.abs() <= self.half_width() - radius
            && position.y.abs() <= self.half_height() - radius
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("field width", self.width),
            ("field height", self.height),
            ("goal width", self.goal_width),
        ] {
            if !(value > 0.0 && value.is_finite()) {
                return Err(ConfigError::NonPositiveDimension { name, value });
            }
        }
        if self.goal_width >= self.height {
            return Err(ConfigError::GoalTooWide {
                goal_width: self.goal_width,
                field_height: self.height,
            });
        }
        if self.goal_width >= self.width {
            return Err(ConfigError::GoalWiderThanField {
                goal_width: self.goal_width,
                field_width: self.width,
            });
        }
        Ok(())
    }
}

/// Where players stand at match start and after every goal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum KickoffLayout {
    /// One evenly spaced line per team, `depth` units from the halfway line
    /// on the team's own half.
    Line { depth: f64 },
    /// Explicit spots per team, assigned in ascending player id order.
    Explicit {
        home: Vec<Vector2>,
        away: Vec<Vector2>,
    },
}

impl Default for KickoffLayout {
    fn default() -> Self {
        KickoffLayout::Line { depth: 20.0 }
    }
}

impl KickoffLayout {
    /// Kickoff spots for `count` players of `team`, in player order.
    pub fn spots(&self, field: &Field, team: Team, count: usize) -> Result<Vec<Vector2>, ConfigError> {
        match self {
            KickoffLayout::Line { depth } => {
                let half_height = field.half_height();
                if !(*depth > 0.0 && *depth < half_height) {
                    return Err(ConfigError::KickoffDepthOutOfField {
                        depth: *depth,
                        half_height,
                    });
                }
                let y = team.defending_side() * depth;
                let spacing = field.width / (count as f64 + 1.0);
                Ok((0..count)
                    .map(|i| Vector2::new(-field.half_width() + spacing * (i as f64 + 1.0), y))
                    .collect())
            },
            KickoffLayout::Explicit { home, away } => {
                let slots = match team {
                    Team::Home => home,
                    Team::Away => away,
                };
                if slots.len() < count {
                    return Err(ConfigError::KickoffSlotsMissing {
                        team,
                        needed: count,
                        available: slots.len(),
                    });
                }
                Ok(slots[..count].to_vec())
            },
        }
    }
}
