use zzocker_core::{Ball, ControlIntent, IntentMap, PhysicsConfig, Player, Vector2, World};

/// Integrate every body by one tick (semi-implicit Euler), then cap speeds.
///
/// Players without an entry in `intents` get [`ControlIntent::IDLE`].
pub fn integrate(world: &mut World, intents: &IntentMap, physics: &PhysicsConfig) {
    let dt = physics.dt;
    for player in world.players.values_mut() {
        let intent = intents.get(&player.id).copied().unwrap_or_default();
        integrate_player(player, &intent, dt);
    }
    integrate_ball(&mut world.ball, dt, physics.ball_stop_speed);
    cap_speeds(world);
}

/// Steer toward `move_direction * max_speed` with acceleration limited to the
/// player's rate, or brake to rest at the friction rate when idle.
pub fn integrate_player(player: &mut Player, intent: &ControlIntent, dt: f64) {
    let direction = intent.move_direction().normalize();
    let body = &mut player.body;

    if direction.is_zero() {
        body.velocity = brake(body.velocity, player.friction * dt);
    } else {
        let accel = match body.max_speed.limit() {
            Some(max_speed) => {
                let desired = direction * max_speed;
                ((desired - body.velocity) / dt).clamp_length(player.acceleration)
            },
            // No target speed to steer toward: pure thrust
            None => direction * player.acceleration,
        };
        body.velocity += accel * dt;
    }

    body.position += body.velocity * dt;
}

/// Reduce speed by `drop`, snapping to exactly zero instead of overshooting.
fn brake(velocity: Vector2, drop: f64) -> Vector2 {
    let speed = velocity.length();
    if speed <= drop {
        Vector2::ZERO
    } else {
        velocity - velocity / speed * drop
    }
}

/// Roll the ball: per-second friction raised to `dt`, then snap to rest below
/// `stop_speed`.
pub fn integrate_ball(ball: &mut Ball, dt: f64, stop_speed: f64) {
    let body = &mut ball.body;
    body.velocity = body.velocity * ball.friction.powf(dt);
    if body.velocity.length_squared() < stop_speed * stop_speed {
        body.velocity = Vector2::ZERO;
    }
    body.position += body.velocity * dt;
}

/// Clamp every body's speed to its cap.
pub fn cap_speeds(world: &mut World) {
    for player in world.players.values_mut() {
        player.body.cap_speed();
    }
    world.ball.body.cap_speed();
}
