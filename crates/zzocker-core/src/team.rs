use std::fmt;

use serde::{Deserialize, Serialize};

/// Unique identifier for a player within one world.
pub type PlayerId = u64;

/// One of the two sides in a match.
///
/// `Home` defends the end line at `y = -height / 2` and attacks towards
/// `+y`; `Away` defends `y = +height / 2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Team {
    Home,
    Away,
}

impl Team {
    pub const ALL: [Team; 2] = [Team::Home, Team::Away];

    pub fn opponent(self) -> Self {
        match self {
            Team::Home => Team::Away,
            Team::Away => Team::Home,
        }
    }

    /// Sign of the `y` coordinate of the end line this team defends.
    pub fn defending_side(self) -> f64 {
        match self {
            Team::Home => -1.0,
            Team::Away => 1.0,
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Team::Home => write!(f, "home"),
            Team::Away => write!(f, "away"),
        }
    }
}

/// Goals per team. Only ever incremented, one goal at a time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub home: u32,
    pub away: u32,
}

impl Score {
    pub fn get(&self, team: Team) -> u32 {
        match team {
            Team::Home => self.home,
            Team::Away => self.away,
        }
    }

    pub fn record_goal(&mut self, team: Team) {
        match team {
            Team::Home => self.home += 1,
            Team::Away => self.away += 1,
        }
    }

    pub fn total(&self) -> u32 {
        self.home + self.away
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.home, self.away)
    }
}
