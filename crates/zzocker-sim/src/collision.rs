//! Circle-circle and circle-boundary contact resolution.
//!
//! Per tick the passes run in a fixed order: player-ball (with kicks), then
//! player-player, then boundaries. A kick applied in the first pass is never
//! undone by a player-player push in the same tick.

use zzocker_core::{Body, IntentMap, PhysicsConfig, Player, PlayerId, Vector2, World};

/// Normal used when two centres coincide exactly.
const FALLBACK_NORMAL: Vector2 = Vector2::UNIT_X;

/// An overlap between two circles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Unit normal pointing from the first body toward the second.
    pub normal: Vector2,
    /// Centre distance.
    pub distance: f64,
    /// Radius sum minus distance. Always > 0.
    pub overlap: f64,
}

/// Detect overlap between two circles. Only takes a square root once the
/// squared-distance test confirms contact.
pub fn detect(a: &Body, b: &Body) -> Option<Contact> {
    let radius_sum = a.radius + b.radius;
    let dist_sq = a.position.distance_squared(b.position);
    if dist_sq >= radius_sum * radius_sum {
        return None;
    }

    let distance = dist_sq.sqrt();
    let normal = if distance > 0.0 {
        (b.position - a.position) / distance
    } else {
        FALLBACK_NORMAL
    };
    Some(Contact {
        normal,
        distance,
        overlap: radius_sum - distance,
    })
}

/// Push two bodies apart by half the overlap each, regardless of mass.
pub fn separate(a: &mut Body, b: &mut Body, contact: &Contact) {
    let push = contact.normal * (contact.overlap / 2.0);
    a.position -= push;
    b.position += push;
}

/// Exchange an impulse along the contact normal if the bodies approach.
///
/// `j = -(1 + e) * (v_rel . n) / (1/m1 + 1/m2)`, with unbounded mass
/// contributing zero inverse mass. Returns the impulse magnitude applied.
pub fn exchange_impulse(a: &mut Body, b: &mut Body, normal: Vector2, restitution: f64) -> f64 {
    let approach = (b.velocity - a.velocity).dot(normal);
    if approach >= 0.0 {
        return 0.0;
    }

    let inv_mass_sum = a.inverse_mass() + b.inverse_mass();
    // Two anchors: nothing can move
    if inv_mass_sum == 0.0 {
        return 0.0;
    }

    let j = -(1.0 + restitution) * approach / inv_mass_sum;
    a.apply_impulse(-normal * j);
    b.apply_impulse(normal * j);
    j
}

/// Separate and exchange impulse if the bodies overlap.
pub fn resolve_pair(a: &mut Body, b: &mut Body, restitution: f64) -> Option<Contact> {
    let contact = detect(a, b)?;
    separate(a, b, &contact);
    exchange_impulse(a, b, contact.normal, restitution);
    Some(contact)
}

/// Resolve every player against the ball, applying kicks straight after each
/// player's contact. Returns the last player (in id order) to touch the ball.
pub fn resolve_player_ball(
    world: &mut World,
    intents: &IntentMap,
    physics: &PhysicsConfig,
) -> Option<PlayerId> {
    let ball = &mut world.ball.body;
    let mut last_touch = None;

    for player in world.players.values_mut() {
        if resolve_pair(&mut player.body, ball, physics.ball_restitution).is_some() {
            last_touch = Some(player.id);
        }

        let Some(intent) = intents.get(&player.id) else {
            continue;
        };
        if !intent.wants_kick() {
            continue;
        }
        let reach = player.body.radius + ball.radius + physics.kick_reach;
        if player.body.position.distance_squared(ball.position) <= reach * reach {
            // Kick magnitude scales with dt
            ball.velocity += intent.kick_direction().normalize()
                * (intent.kick_strength() * physics.kick_force * physics.dt);
            last_touch = Some(player.id);
        }
    }

    last_touch
}

/// Resolve every unordered player pair once, in ascending id order.
pub fn resolve_player_player(world: &mut World, restitution: f64) {
    let mut players: Vec<&mut Player> = world.players.values_mut().collect();
    for i in 0..players.len() {
        let (head, tail) = players.split_at_mut(i + 1);
        let a = &mut head[i];
        for b in tail.iter_mut() {
            resolve_pair(&mut a.body, &mut b.body, restitution);
        }
    }
}

/// Keep every body inside the pitch. The ball is not stopped by an end line
/// while inside the goal-mouth span.
pub fn resolve_boundaries(world: &mut World, restitution: f64) {
    let half_width = world.field.half_width();
    let half_height = world.field.half_height();

    for player in world.players.values_mut() {
        confine(&mut player.body, half_width, half_height, true, restitution);
    }

    let ball = &mut world.ball.body;
    let end_lines = !world.field.in_goal_mouth(ball.position.x);
    confine(ball, half_width, half_height, end_lines, restitution);
}

fn confine(body: &mut Body, half_width: f64, half_height: f64, end_lines: bool, e: f64) {
    bounce_axis(
        &mut body.position.x,
        &mut body.velocity.x,
        body.radius,
        half_width,
        e,
    );
    if end_lines {
        bounce_axis(
            &mut body.position.y,
            &mut body.velocity.y,
            body.radius,
            half_height,
            e,
        );
    }
}

/// Clamp one axis to `[-half + r, half - r]`, reflecting the velocity
/// component only while it still points outward.
fn bounce_axis(pos: &mut f64, vel: &mut f64, radius: f64, half: f64, e: f64) {
    if *pos - radius < -half {
        *pos = -half + radius;
        if *vel < 0.0 {
            *vel = -*vel * e;
        }
    } else if *pos + radius > half {
        *pos = half - radius;
        if *vel > 0.0 {
            *vel = -*vel * e;
        }
    }
}
