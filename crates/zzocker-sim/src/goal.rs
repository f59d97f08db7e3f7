use zzocker_core::{Team, World};

/// The scoring team if the ball's centre is past an end line inside the goal
/// mouth. Crossing the `+y` line (Away's goal) scores for Home, and vice versa.
pub fn detect_goal(world: &World) -> Option<Team> {
    let pos = world.ball.body.position;
    if pos.y.abs() <= world.field.half_height() || !world.field.in_goal_mouth(pos.x) {
        return None;
    }
    let conceding = if pos.y > 0.0 { Team::Away } else { Team::Home };
    Some(conceding.opponent())
}

/// Score any goal and reset the world to its kickoff layout.
pub fn check_and_reset(world: &mut World) -> Option<Team> {
    let scorer = detect_goal(world)?;
    world.score.record_goal(scorer);
    tracing::info!(
        team = %scorer,
        score = %world.score,
        elapsed = world.elapsed_time,
        "Goal"
    );
    world.place_at_kickoff();
    tracing::debug!(tick = world.tick, "Kickoff reset");
    Some(scorer)
}
