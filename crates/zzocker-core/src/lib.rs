//! Shared world model for the zzocker match simulator.
//!
//! - `vec2`: 2D vector primitive
//! - `body`, `world`, `field`: bodies, pitch geometry, and match state
//! - `intent`: the per-player control-intent contract and provider trait
//! - `config`: TOML-loadable match configuration

pub mod body;
pub mod config;
pub mod error;
pub mod field;
pub mod intent;
pub mod team;
pub mod vec2;
pub mod world;

pub use body::{Ball, Body, Mass, Player, SpeedCap};
pub use config::{BallConfig, EndCondition, MatchConfig, PhysicsConfig, PlayerConfig};
pub use error::{ConfigError, IntentError};
pub use field::{Field, KickoffLayout};
pub use intent::{ControlIntent, IdleProvider, IntentMap, IntentProvider, ProviderError};
pub use team::{PlayerId, Score, Team};
pub use vec2::Vector2;
pub use world::World;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers {
    use crate::body::{Ball, Body, Mass, Player, SpeedCap};
    use crate::config::{EndCondition, MatchConfig};
    use crate::field::{Field, KickoffLayout};
    use crate::team::{PlayerId, Team};
    use crate::vec2::Vector2;
    use crate::world::World;

    /// The 100x60 pitch with a 20-wide goal used throughout the tests.
    pub fn test_field() -> Field {
        Field {
            width: 100.0,
            height: 60.0,
            goal_width: 20.0,
        }
    }

    /// Config on [`test_field`] with `per_team` players a side, a frictionless
    /// ball, and no end condition.
    pub fn test_config(per_team: usize) -> MatchConfig {
        let mut cfg = MatchConfig::default();
        cfg.field = test_field();
        cfg.players.per_team = per_team;
        cfg.ball.friction = 1.0;
        cfg.ball.radius = 0.5;
        cfg.physics.dt = 0.1;
        cfg.kickoff = KickoffLayout::Line { depth: 10.0 };
        cfg.end = EndCondition::default();
        cfg
    }

    /// A finite-mass player with radius 1 at `position`.
    pub fn make_player(id: PlayerId, team: Team, position: Vector2) -> Player {
        let body = Body::new(position, 1.0, Mass::Finite(1.0), SpeedCap::Limited(10.0));
        Player::new(id, team, body, 20.0, 25.0)
    }

    /// A ball of radius 0.5 and mass 0.5 at `position`, no rolling friction.
    pub fn make_ball(position: Vector2) -> Ball {
        Ball::new(
            Body::new(position, 0.5, Mass::Finite(0.5), SpeedCap::Limited(30.0)),
            1.0,
        )
    }

    /// A world on [`test_field`] holding exactly the given players and ball.
    pub fn make_world(players: Vec<Player>, ball: Ball) -> World {
        World::new(
            test_field(),
            KickoffLayout::Line { depth: 10.0 },
            players,
            ball,
        )
        .expect("test world must be valid")
    }

    /// A world with only a ball.
    pub fn ball_only_world(position: Vector2, velocity: Vector2) -> World {
        let mut ball = make_ball(position);
        ball.body.velocity = velocity;
        make_world(Vec::new(), ball)
    }

    /// Assert every body lies inside the pitch, allowing the ball to sit past
    /// an end line only inside the goal mouth.
    pub fn assert_bodies_in_bounds(world: &World) {
        let eps = 1e-9;
        let hw = world.field.half_width();
        let hh = world.field.half_height();
        for p in world.players.values() {
            let pos = p.body.position;
            let r = p.body.radius;
            assert!(
                pos.x.abs() <= hw - r + eps && pos.y.abs() <= hh - r + eps,
                "player {} out of bounds at {pos:?}",
                p.id
            );
        }
        let b = &world.ball.body;
        assert!(
            b.position.x.abs() <= hw - b.radius + eps,
            "ball out of bounds at {:?}",
            b.position
        );
        if !world.field.in_goal_mouth(b.position.x) {
            assert!(
                b.position.y.abs() <= hh - b.radius + eps,
                "ball past end line outside goal mouth at {:?}",
                b.position
            );
        }
    }
}
