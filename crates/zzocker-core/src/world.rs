use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::body::{Ball, Body, Mass, Player, SpeedCap};
use crate::config::MatchConfig;
use crate::error::ConfigError;
use crate::field::{Field, KickoffLayout};
use crate::team::{PlayerId, Score, Team};
use crate::vec2::Vector2;

/// Complete match state. Mutated in place once per tick.
///
/// Players are keyed by id in a `BTreeMap` so every per-player pass runs in
/// ascending id order, which keeps the simulation deterministic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    pub field: Field,
    pub kickoff: KickoffLayout,
    pub players: BTreeMap<PlayerId, Player>,
    pub ball: Ball,
    pub score: Score,
    /// Simulated seconds since kickoff. Never decreases.
    pub elapsed_time: f64,
    /// Completed ticks.
    pub tick: u64,
    /// Once set, stays set for the rest of the match.
    pub game_over: bool,
    /// Player currently controlling the ball by proximity.
    pub possession: Option<PlayerId>,
    /// Last player whose contact or kick moved the ball.
    pub last_touch: Option<PlayerId>,
    kickoff_spots: BTreeMap<PlayerId, Vector2>,
}

impl World {
    /// Build a world from explicit bodies, validating the whole layout.
    ///
    /// Players keep the positions they were given; the kickoff layout is
    /// resolved now and used for every later reset.
    pub fn new(
        field: Field,
        kickoff: KickoffLayout,
        players: Vec<Player>,
        ball: Ball,
    ) -> Result<Self, ConfigError> {
        field.validate()?;
        ball.validate()?;

        let mut seen = BTreeSet::new();
        for player in &players {
            if !seen.insert(player.id) {
                return Err(ConfigError::DuplicatePlayerId(player.id));
            }
            player.validate()?;
        }

        let players: BTreeMap<PlayerId, Player> =
            players.into_iter().map(|p| (p.id, p)).collect();
        let kickoff_spots = resolve_kickoff(&field, &kickoff, &players)?;

        Ok(Self {
            field,
            kickoff,
            players,
            ball,
            score: Score::default(),
            elapsed_time: 0.0,
            tick: 0,
            game_over: false,
            possession: None,
            last_touch: None,
            kickoff_spots,
        })
    }

    /// Build the configured roster and place everyone at kickoff.
    ///
    /// Home players get ids `1..=n`, away players `n+1..=2n`.
    pub fn from_config(config: &MatchConfig) -> Result<Self, ConfigError> {
        let p = &config.players;
        let mass = if p.unbounded_mass {
            Mass::Unbounded
        } else {
            Mass::Finite(p.mass)
        };

        let per_team = p.per_team as PlayerId;
        let players = Team::ALL
            .iter()
            .enumerate()
            .flat_map(|(team_index, &team)| {
                (1..=per_team).map(move |n| (team_index as PlayerId * per_team + n, team))
            })
            .map(|(id, team)| {
                let body = Body::new(Vector2::ZERO, p.radius, mass, SpeedCap::Limited(p.max_speed));
                Player::new(id, team, body, p.acceleration, p.friction)
            })
            .collect();

        let b = &config.ball;
        let ball = Ball::new(
            Body::new(
                config.field.centre(),
                b.radius,
                Mass::Finite(b.mass),
                SpeedCap::Limited(b.max_speed),
            ),
            b.friction,
        );

        let mut world = Self::new(config.field, config.kickoff.clone(), players, ball)?;
        world.place_at_kickoff();
        Ok(world)
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(&id)
    }

    pub fn player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.get_mut(&id)
    }

    /// Players of one team, in ascending id order.
    pub fn players_on(&self, team: Team) -> impl Iterator<Item = &Player> {
        self.players.values().filter(move |p| p.team == team)
    }

    pub fn player_with_possession(&self) -> Option<&Player> {
        self.possession.and_then(|id| self.player(id))
    }

    pub fn player_who_last_touched(&self) -> Option<&Player> {
        self.last_touch.and_then(|id| self.player(id))
    }

    /// Kickoff spot resolved for a player at construction.
    pub fn kickoff_spot(&self, id: PlayerId) -> Option<Vector2> {
        self.kickoff_spots.get(&id).copied()
    }

    /// Canonical kickoff layout: ball at the centre spot, everyone at their
    /// kickoff spot, all bodies at rest, possession cleared.
    pub fn place_at_kickoff(&mut self) {
        self.ball.body.position = self.field.centre();
        self.ball.body.stop();
        for (id, player) in &mut self.players {
            if let Some(spot) = self.kickoff_spots.get(id) {
                player.body.position = *spot;
            }
            player.body.stop();
        }
        self.possession = None;
        self.last_touch = None;
    }

    /// Latch the game-over flag. Never cleared within a match.
    pub fn mark_game_over(&mut self) {
        self.game_over = true;
    }
}

fn resolve_kickoff(
    field: &Field,
    layout: &KickoffLayout,
    players: &BTreeMap<PlayerId, Player>,
) -> Result<BTreeMap<PlayerId, Vector2>, ConfigError> {
    let mut spots = BTreeMap::new();
    for team in Team::ALL {
        let ids: Vec<PlayerId> = players
            .values()
            .filter(|p| p.team == team)
            .map(|p| p.id)
            .collect();
        if ids.is_empty() {
            continue;
        }
        let positions = layout.spots(field, team, ids.len())?;
        for (id, spot) in ids.into_iter().zip(positions) {
            let radius = players.get(&id).map_or(0.0, |p| p.body.radius);
            if !field.fits(spot, radius) {
                return Err(ConfigError::KickoffSpotOutOfField {
                    id,
                    x: spot.x,
                    y: spot.y,
                });
            }
            spots.insert(id, spot);
        }
    }
    Ok(spots)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(id: PlayerId, team: Team) -> Player {
        let body = Body::new(
            Vector2::new(id as f64, 0.0),
            0.5,
            Mass::Finite(75.0),
            SpeedCap::Limited(8.0),
        );
        Player::new(id, team, body, 20.0, 25.0)
    }

    fn ball() -> Ball {
        Ball::new(
            Body::new(Vector2::ZERO, 0.11, Mass::Finite(0.43), SpeedCap::Limited(30.0)),
            0.6,
        )
    }

    fn field() -> Field {
        Field::new(100.0, 60.0, 20.0).unwrap()
    }

    #[test]
    fn rejects_duplicate_ids() {
        let result = World::new(
            field(),
            KickoffLayout::default(),
            vec![player(1, Team::Home), player(1, Team::Away)],
            ball(),
        );
        assert_eq!(result.unwrap_err(), ConfigError::DuplicatePlayerId(1));
    }

    #[test]
    fn rejects_massless_player() {
        let mut p = player(1, Team::Home);
        p.body.mass = Mass::Finite(0.0);
        let result = World::new(field(), KickoffLayout::default(), vec![p], ball());
        assert!(matches!(result, Err(ConfigError::InvalidMass { .. })));
    }

    #[test]
    fn new_keeps_given_positions() {
        let world = World::new(
            field(),
            KickoffLayout::default(),
            vec![player(3, Team::Home)],
            ball(),
        )
        .unwrap();
        assert_eq!(world.player(3).unwrap().body.position, Vector2::new(3.0, 0.0));
        assert!(world.kickoff_spot(3).is_some());
    }

    #[test]
    fn from_config_builds_both_teams_at_kickoff() {
        let cfg = MatchConfig::default();
        let world = World::from_config(&cfg).unwrap();
        let n = cfg.players.per_team;

        assert_eq!(world.players.len(), 2 * n);
        assert_eq!(world.players_on(Team::Home).count(), n);
        assert!(world.players_on(Team::Home).all(|p| p.body.position.y < 0.0));
        assert!(world.players_on(Team::Away).all(|p| p.body.position.y > 0.0));
        assert!(world.players_on(Team::Home).all(|p| p.id <= n as PlayerId));
        assert_eq!(world.ball.body.position, Vector2::ZERO);
    }

    #[test]
    fn place_at_kickoff_resets_motion_and_possession() {
        let mut world = World::from_config(&MatchConfig::default()).unwrap();
        let spot = world.kickoff_spot(1).unwrap();
        {
            let p = world.player_mut(1).unwrap();
            p.body.position = Vector2::new(3.0, 3.0);
            p.body.velocity = Vector2::new(1.0, 1.0);
        }
        world.ball.body.velocity = Vector2::new(5.0, 0.0);
        world.possession = Some(1);
        world.last_touch = Some(1);

        world.place_at_kickoff();

        let p = world.player(1).unwrap();
        assert_eq!(p.body.position, spot);
        assert_eq!(p.body.velocity, Vector2::ZERO);
        assert_eq!(world.ball.body.velocity, Vector2::ZERO);
        assert_eq!(world.possession, None);
        assert!(world.player_who_last_touched().is_none());
    }

    #[test]
    fn snapshot_keeps_kickoff_spots() {
        let mut world = World::from_config(&MatchConfig::default()).unwrap();
        world.player_mut(2).unwrap().body.position = Vector2::new(1.0, 1.0);
        world.score.record_goal(Team::Away);

        let json = serde_json::to_string(&world).unwrap();
        assert!(json.contains("\"away\":1"));

        let mut restored: World = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.players, world.players);
        restored.place_at_kickoff();
        assert_eq!(
            Some(restored.player(2).unwrap().body.position),
            world.kickoff_spot(2)
        );
    }

    #[test]
    fn rejects_line_kickoff_too_close_to_end_line() {
        // Depth is inside the half but the player's radius crosses the line
        let result = World::new(
            field(),
            KickoffLayout::Line { depth: 29.8 },
            vec![player(1, Team::Home)],
            ball(),
        );
        assert!(matches!(
            result,
            Err(ConfigError::KickoffSpotOutOfField { id: 1, .. })
        ));

        World::new(
            field(),
            KickoffLayout::Line { depth: 29.5 },
            vec![player(1, Team::Home)],
            ball(),
        )
        .unwrap();
    }

    #[test]
    fn rejects_explicit_kickoff_outside_field() {
        let layout = KickoffLayout::Explicit {
            home: vec![Vector2::new(0.0, -80.0)],
            away: vec![],
        };
        let result = World::new(field(), layout, vec![player(1, Team::Home)], ball());
        assert_eq!(
            result.unwrap_err(),
            ConfigError::KickoffSpotOutOfField {
                id: 1,
                x: 0.0,
                y: -80.0,
            }
        );

        let sideways = KickoffLayout::Explicit {
            home: vec![],
            away: vec![Vector2::new(49.8, 5.0)],
        };
        assert!(World::new(field(), sideways, vec![player(2, Team::Away)], ball()).is_err());
    }
}
