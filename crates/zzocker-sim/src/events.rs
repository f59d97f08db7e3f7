use serde::Serialize;
use zzocker_core::{PlayerId, Score, Team};

/// Observable things that happened during one tick.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum MatchEvent {
    Goal {
        scoring_team: Team,
        score: Score,
    },
    PossessionChanged {
        from: Option<PlayerId>,
        to: Option<PlayerId>,
    },
    GameOver {
        score: Score,
        elapsed: f64,
    },
}

/// Whether the simulation can keep stepping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Running,
    /// The end condition was met.
    Finished,
    /// Halted by the stop signal or a provider failure.
    Stopped,
}

/// Result of one `step()`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TickOutcome {
    pub status: RunStatus,
    pub events: Vec<MatchEvent>,
}

impl TickOutcome {
    pub(crate) fn halted(status: RunStatus) -> Self {
        Self {
            status,
            events: Vec::new(),
        }
    }

    pub fn is_running(&self) -> bool {
        self.status == RunStatus::Running
    }

    pub fn goals(&self) -> impl Iterator<Item = Team> + '_ {
        self.events.iter().filter_map(|e| match e {
            MatchEvent::Goal { scoring_team, .. } => Some(*scoring_team),
            _ => None,
        })
    }
}
