use std::collections::BTreeMap;

use crate::team::PlayerId;
use crate::vec2::Vector2;
use crate::world::World;

/// Failure reported by an intent provider.
pub type ProviderError = Box<dyn std::error::Error + Send + Sync>;

/// One tick's intents, keyed by player. A missing entry means "do nothing".
pub type IntentMap = BTreeMap<PlayerId, ControlIntent>;

/// A single player's control input for one tick.
///
/// Directions are normalized and kick strength is clamped to `[0, 1]` at
/// construction, so an intent is always well formed once built.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlIntent {
    move_direction: Vector2,
    kick_strength: f64,
    kick_direction: Vector2,
}

impl Default for ControlIntent {
    fn default() -> Self {
        Self::IDLE
    }
}

impl ControlIntent {
    /// Stand still, no kick.
    pub const IDLE: Self = Self {
        move_direction: Vector2::ZERO,
        kick_strength: 0.0,
        kick_direction: Vector2::ZERO,
    };

    pub fn new(move_direction: Vector2, kick_strength: f64, kick_direction: Vector2) -> Self {
        // NaN strength collapses to no kick
        let kick_strength = if kick_strength.is_nan() {
            0.0
        } else {
            kick_strength.clamp(0.0, 1.0)
        };
        Self {
            move_direction: sanitize_direction(move_direction),
            kick_strength,
            kick_direction: sanitize_direction(kick_direction),
        }
    }

    /// Move only.
    pub fn moving(direction: Vector2) -> Self {
        Self::new(direction, 0.0, Vector2::ZERO)
    }

    pub fn move_direction(&self) -> Vector2 {
        self.move_direction
    }

    pub fn kick_strength(&self) -> f64 {
        self.kick_strength
    }

    /// Kick direction. Meaningless when [`Self::wants_kick`] is false.
    pub fn kick_direction(&self) -> Vector2 {
        self.kick_direction
    }

    pub fn wants_kick(&self) -> bool {
        self.kick_strength > 0.0 && !self.kick_direction.is_zero()
    }
}

fn sanitize_direction(v: Vector2) -> Vector2 {
    if v.is_finite() {
        v.normalize()
    } else {
        Vector2::ZERO
    }
}

/// External decision-maker that turns the world into per-player intents.
///
/// Called exactly once per tick, synchronously, before any state is mutated.
/// Returning an error stops the run.
pub trait IntentProvider {
    fn intents(&mut self, world: &World) -> Result<IntentMap, ProviderError>;
}

impl<F> IntentProvider for F
where
    F: FnMut(&World) -> Result<IntentMap, ProviderError>,
{
    fn intents(&mut self, world: &World) -> Result<IntentMap, ProviderError> {
        self(world)
    }
}

/// Provider that never moves anyone.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdleProvider;

impl IntentProvider for IdleProvider {
    fn intents(&mut self, _world: &World) -> Result<IntentMap, ProviderError> {
        Ok(IntentMap::new())
    }
}
