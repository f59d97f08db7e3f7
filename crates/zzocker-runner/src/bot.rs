use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use zzocker_core::{ControlIntent, IntentMap, IntentProvider, ProviderError, Team, Vector2, World};

/// How far a supporting player sits from its kickoff spot toward the ball.
const SUPPORT_PULL: f64 = 0.4;

/// Reference provider: the nearest player on each team chases the ball and
/// shoots at the opponent's goal, teammates drift between their kickoff spot
/// and the ball. Seeded jitter keeps repeated runs identical.
pub struct ChaseBall {
    rng: StdRng,
    jitter: f64,
}

impl ChaseBall {
    pub fn new(seed: u64, jitter: f64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            jitter: jitter.max(0.0),
        }
    }

    fn wobble(&mut self) -> Vector2 {
        if self.jitter == 0.0 {
            return Vector2::ZERO;
        }
        Vector2::new(
            self.rng.random_range(-self.jitter..=self.jitter),
            self.rng.random_range(-self.jitter..=self.jitter),
        )
    }
}

impl IntentProvider for ChaseBall {
    fn intents(&mut self, world: &World) -> Result<IntentMap, ProviderError> {
        let ball = world.ball.body.position;
        let mut intents = IntentMap::new();

        for team in Team::ALL {
            let chaser = world
                .players_on(team)
                .min_by(|a, b| {
                    let da = a.body.position.distance_squared(ball);
                    let db = b.body.position.distance_squared(ball);
                    da.total_cmp(&db)
                })
                .map(|p| p.id);

            // Opponent's goal lies on the side this team attacks
            let goal = Vector2::new(0.0, -team.defending_side() * world.field.half_height());

            for player in world.players_on(team) {
                let pos = player.body.position;
                let intent = if Some(player.id) == chaser {
                    let shot = goal - ball;
                    ControlIntent::new(ball - pos + self.wobble(), 1.0, shot)
                } else {
                    let home = world.kickoff_spot(player.id).unwrap_or(pos);
                    let target = home + (ball - home) * SUPPORT_PULL;
                    ControlIntent::moving(target - pos + self.wobble())
                };
                intents.insert(player.id, intent);
            }
        }

        Ok(intents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zzocker_core::test_helpers::{make_ball, make_player, make_world};

    fn world() -> World {
        make_world(
            vec![
                make_player(1, Team::Home, Vector2::new(0.0, -5.0)),
                make_player(2, Team::Home, Vector2::new(20.0, -20.0)),
                make_player(3, Team::Away, Vector2::new(0.0, 8.0)),
            ],
            make_ball(Vector2::ZERO),
        )
    }

    #[test]
    fn nearest_player_chases_and_shoots_at_the_opponent_goal() {
        let mut bot = ChaseBall::new(7, 0.0);
        let intents = bot.intents(&world()).unwrap();

        let home_chaser = intents[&1];
        assert!(home_chaser.wants_kick());
        assert!(home_chaser.move_direction().y > 0.0);
        assert!(home_chaser.kick_direction().y > 0.0);

        let away_chaser = intents[&3];
        assert!(away_chaser.kick_direction().y < 0.0);

        assert!(!intents[&2].wants_kick());
    }

    #[test]
    fn same_seed_same_intents() {
        let w = world();
        let a = ChaseBall::new(42, 0.3).intents(&w).unwrap();
        let b = ChaseBall::new(42, 0.3).intents(&w).unwrap();
        assert_eq!(a, b);
    }
}
