use zzocker_core::{PlayerId, World};

/// The player nearest the ball among those within `range` of touching it.
/// Ties go to the lower id.
pub fn nearest_in_range(world: &World, range: f64) -> Option<PlayerId> {
    let ball = &world.ball.body;
    let mut best: Option<(PlayerId, f64)> = None;

    for player in world.players.values() {
        let reach = player.body.radius + ball.radius + range;
        let dist_sq = player.body.position.distance_squared(ball.position);
        if dist_sq > reach * reach {
            continue;
        }
        // Ascending id order: strict comparison keeps the lower id on ties
        if best.is_none_or(|(_, d)| dist_sq < d) {
            best = Some((player.id, dist_sq));
        }
    }

    best.map(|(id, _)| id)
}

/// Recompute possession from the current ball position.
pub fn update(world: &mut World, range: f64) {
    let holder = nearest_in_range(world, range);
    if holder != world.possession {
        tracing::debug!(from = ?world.possession, to = ?holder, "Possession changed");
        world.possession = holder;
    }
}
