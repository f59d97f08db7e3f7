//! End-to-end match flow through the public `Simulation` API.

use zzocker_core::test_helpers::{
    assert_bodies_in_bounds, ball_only_world, make_ball, make_player, make_world, test_config,
};
use zzocker_core::{
    ControlIntent, EndCondition, IdleProvider, IntentMap, KickoffLayout, PhysicsConfig,
    ProviderError, Team, Vector2, World,
};
use zzocker_sim::{MatchEvent, RunStatus, Simulation};

fn physics(dt: f64) -> PhysicsConfig {
    PhysicsConfig {
        dt,
        ..PhysicsConfig::default()
    }
}

/// Every player runs at the ball and kicks it toward the opponent's goal.
fn chase(world: &World) -> Result<IntentMap, ProviderError> {
    let ball = world.ball.body.position;
    Ok(world
        .players
        .values()
        .map(|p| {
            let toward_goal = Vector2::new(0.0, -p.team.defending_side());
            let intent = ControlIntent::new(ball - p.body.position, 1.0, toward_goal);
            (p.id, intent)
        })
        .collect())
}

#[test]
fn ball_through_goal_mouth_scores_and_resets() {
    let world = ball_only_world(Vector2::new(0.0, 29.0), Vector2::new(0.0, 5.0));
    let mut phys = physics(0.1);
    phys.ball_stop_speed = 0.0;
    let mut sim = Simulation::new(world, IdleProvider, phys, EndCondition::default()).unwrap();

    let first = sim.step().unwrap();
    assert!(first.events.is_empty());
    assert!((sim.world().ball.body.position.y - 29.5).abs() < 1e-12);

    let mut goal_tick = None;
    for _ in 0..5 {
        let outcome = sim.step().unwrap();
        if outcome.goals().next().is_some() {
            goal_tick = Some(sim.world().tick);
            break;
        }
    }
    assert_eq!(goal_tick, Some(3));
    assert_eq!(sim.world().score.home, 1);
    assert_eq!(sim.world().score.away, 0);
    assert_eq!(sim.world().ball.body.position, Vector2::ZERO);
    assert_eq!(sim.world().ball.body.velocity, Vector2::ZERO);
}

#[test]
fn ball_wide_of_the_post_rebounds_into_play() {
    let world = ball_only_world(Vector2::new(-15.0, -28.0), Vector2::new(0.0, -20.0));
    let mut sim =
        Simulation::new(world, IdleProvider, physics(0.1), EndCondition::default()).unwrap();
    for _ in 0..10 {
        let outcome = sim.step().unwrap();
        assert_eq!(outcome.goals().count(), 0);
        assert_bodies_in_bounds(sim.world());
    }
    assert!(sim.world().ball.body.position.y > -29.5);
    assert_eq!(sim.world().score.total(), 0);
}

#[test]
fn colliding_players_swap_velocities() {
    let mut a = make_player(1, Team::Home, Vector2::new(-0.75, 0.0));
    let mut b = make_player(2, Team::Away, Vector2::new(0.75, 0.0));
    a.body.velocity = Vector2::new(1.0, 0.0);
    b.body.velocity = Vector2::new(-1.0, 0.0);
    // No braking, so the contact sees exactly +1 and -1
    a.friction = 0.0;
    b.friction = 0.0;
    let world = make_world(vec![a, b], make_ball(Vector2::new(0.0, 20.0)));

    let mut phys = physics(1e-6);
    phys.player_restitution = 1.0;
    let mut sim = Simulation::new(world, IdleProvider, phys, EndCondition::default()).unwrap();
    sim.step().unwrap();

    let (a, b) = (sim.world().player(1).unwrap(), sim.world().player(2).unwrap());
    assert!((a.body.velocity.x + 1.0).abs() < 1e-9, "a: {:?}", a.body.velocity);
    assert!((b.body.velocity.x - 1.0).abs() < 1e-9, "b: {:?}", b.body.velocity);
    assert!(a.body.velocity.y.abs() < 1e-12 && b.body.velocity.y.abs() < 1e-12);
    let gap = a.body.position.distance(b.body.position);
    assert!((gap - 2.0).abs() < 1e-9, "gap {gap}");
}

#[test]
fn chasing_players_finish_a_timed_match_deterministically() {
    let mut cfg = test_config(2);
    cfg.end.time_limit = Some(30.0);

    let play = || {
        let mut sim = Simulation::from_config(&cfg, chase).unwrap();
        let mut events = Vec::new();
        let status = sim
            .run_with(|world, outcome| {
                assert_bodies_in_bounds(world);
                events.extend(outcome.events.iter().cloned());
            })
            .unwrap();
        (status, sim.into_world(), events)
    };

    let (status, world, events) = play();
    assert_eq!(status, RunStatus::Finished);
    assert!(world.game_over);
    assert!(matches!(events.last(), Some(MatchEvent::GameOver { .. })));
    assert!(
        events
            .iter()
            .any(|e| matches!(e, MatchEvent::PossessionChanged { .. }))
    );

    let (_, replay, replay_events) = play();
    assert_eq!(world.players, replay.players);
    assert_eq!(world.ball, replay.ball);
    assert_eq!(world.score, replay.score);
    assert_eq!(events, replay_events);
}

#[test]
fn score_limit_ends_the_match_on_the_goal_tick() {
    let mut cfg = test_config(1);
    cfg.end.score_limit = Some(1);
    cfg.end.time_limit = Some(600.0);
    let world = {
        let mut w = World::from_config(&cfg).unwrap();
        w.ball.body.position = Vector2::new(0.0, -29.0);
        w.ball.body.velocity = Vector2::new(0.0, -10.0);
        w
    };
    let mut sim = Simulation::new(world, IdleProvider, cfg.physics.clone(), cfg.end.clone())
        .unwrap();

    let mut ticks = Vec::new();
    let status = sim
        .run_with(|world, outcome| ticks.push((world.tick, outcome.goals().collect::<Vec<_>>())))
        .unwrap();

    assert_eq!(status, RunStatus::Finished);
    // -29.0 -> -30.0 -> -31.0 crosses Home's line on the second tick
    assert_eq!(ticks, vec![(1, vec![]), (2, vec![Team::Away])]);
    let world = sim.world();
    assert_eq!(world.score.away, 1);
    assert!(world.game_over);
    assert!(world.elapsed_time < 600.0);
    assert!(!sim.is_running());
}

#[test]
fn kickoff_at_deepest_allowed_line_stays_in_bounds_after_a_goal() {
    let mut cfg = test_config(1);
    // Player radius 0.5 on a 60-high pitch
    cfg.kickoff = KickoffLayout::Line { depth: 29.5 };
    let mut world = World::from_config(&cfg).unwrap();
    world.ball.body.position = Vector2::new(5.0, 29.9);
    world.ball.body.velocity = Vector2::new(0.0, 10.0);
    let mut sim =
        Simulation::new(world, IdleProvider, cfg.physics.clone(), cfg.end.clone()).unwrap();

    let outcome = sim.step().unwrap();
    assert_eq!(outcome.goals().collect::<Vec<_>>(), vec![Team::Home]);
    assert_bodies_in_bounds(sim.world());
    assert_eq!(sim.world().player(1).unwrap().body.position.y, -29.5);

    cfg.kickoff = KickoffLayout::Line { depth: 29.8 };
    assert!(Simulation::from_config(&cfg, IdleProvider).is_err());
}
