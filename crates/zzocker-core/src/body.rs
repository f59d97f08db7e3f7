use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::team::{PlayerId, Team};
use crate::vec2::Vector2;

/// Mass used by impulse resolution.
///
/// `Unbounded` is an immovable anchor: it has zero inverse mass, so contact
/// impulses never change its velocity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Mass {
    Finite(f64),
    Unbounded,
}

impl Mass {
    pub fn inverse(self) -> f64 {
        match self {
            Mass::Finite(m) if m > 0.0 && m.is_finite() => 1.0 / m,
            // Degenerate masses never reach a division
            Mass::Finite(_) => 0.0,
            Mass::Unbounded => 0.0,
        }
    }

    pub fn is_unbounded(self) -> bool {
        matches!(self, Mass::Unbounded)
    }
}

/// Speed limit enforced after every tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SpeedCap {
    Limited(f64),
    Unbounded,
}

impl SpeedCap {
    pub fn limit(self) -> Option<f64> {
        match self {
            SpeedCap::Limited(max) => Some(max),
            SpeedCap::Unbounded => None,
        }
    }
}

/// A circular rigid body. Shared by players and the ball.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub position: Vector2,
    pub velocity: Vector2,
    pub radius: f64,
    pub mass: Mass,
    pub max_speed: SpeedCap,
}

impl Body {
    pub fn new(position: Vector2, radius: f64, mass: Mass, max_speed: SpeedCap) -> Self {
        Self {
            position,
            velocity: Vector2::ZERO,
            radius,
            mass,
            max_speed,
        }
    }

    pub fn speed(&self) -> f64 {
        self.velocity.length()
    }

    pub fn inverse_mass(&self) -> f64 {
        self.mass.inverse()
    }

    /// Apply an instantaneous momentum change, scaled by inverse mass.
    pub fn apply_impulse(&mut self, impulse: Vector2) {
        self.velocity += impulse * self.inverse_mass();
    }

    /// Rescale velocity down to the configured cap, keeping direction.
    pub fn cap_speed(&mut self) {
        if let Some(max) = self.max_speed.limit() {
            self.velocity = self.velocity.clamp_length(max);
        }
    }

    pub fn stop(&mut self) {
        self.velocity = Vector2::ZERO;
    }

    pub fn validate(&self, label: &str) -> Result<(), ConfigError> {
        if !(self.radius > 0.0 && self.radius.is_finite()) {
            return Err(ConfigError::InvalidRadius {
                body: label.to_string(),
                radius: self.radius,
            });
        }
        if let Mass::Finite(mass) = self.mass
            && !(mass > 0.0 && mass.is_finite())
        {
            return Err(ConfigError::InvalidMass {
                body: label.to_string(),
                mass,
            });
        }
        if let SpeedCap::Limited(max_speed) = self.max_speed
            && !(max_speed > 0.0 && max_speed.is_finite())
        {
            return Err(ConfigError::InvalidSpeedCap {
                body: label.to_string(),
                max_speed,
            });
        }
        Ok(())
    }
}

/// A movable player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub team: Team,
    pub body: Body,
    /// Maximum steering acceleration (units/s^2).
    pub acceleration: f64,
    /// Deceleration applied when there is no move intent (units/s^2).
    pub friction: f64,
}

impl Player {
    pub fn new(id: PlayerId, team: Team, body: Body, acceleration: f64, friction: f64) -> Self {
        Self {
            id,
            team,
            body,
            acceleration,
            friction,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.body.validate(&format!("player {}", self.id))?;
        if !(self.acceleration > 0.0 && self.acceleration.is_finite()) {
            return Err(ConfigError::InvalidTunable {
                name: "player acceleration",
                value: self.acceleration,
            });
        }
        if !(self.friction >= 0.0 && self.friction.is_finite()) {
            return Err(ConfigError::InvalidTunable {
                name: "player friction",
                value: self.friction,
            });
        }
        Ok(())
    }
}

/// The match ball.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub body: Body,
    /// Fraction of velocity kept after one second of rolling, in (0, 1].
    pub friction: f64,
}

impl Ball {
    pub fn new(body: Body, friction: f64) -> Self {
        Self { body, friction }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.body.validate("ball")?;
        if !(self.friction > 0.0 && self.friction <= 1.0) {
            return Err(ConfigError::InvalidTunable {
                name: "ball friction",
                value: self.friction,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(mass: Mass) -> Body {
        Body::new(Vector2::ZERO, 1.0, mass, SpeedCap::Limited(10.0))
    }

    #[test]
    fn unbounded_mass_ignores_impulse() {
        let mut b = body(Mass::Unbounded);
        b.apply_impulse(Vector2::new(100.0, 0.0));
        assert_eq!(b.velocity, Vector2::ZERO);
    }

    #[test]
    fn degenerate_mass_has_zero_inverse() {
        for m in [0.0, -2.0, f64::NAN, f64::INFINITY] {
            assert_eq!(Mass::Finite(m).inverse(), 0.0, "mass {m}");
        }
        let mut b = body(Mass::Finite(0.0));
        b.apply_impulse(Vector2::new(5.0, 0.0));
        assert_eq!(b.velocity, Vector2::ZERO);
    }

    #[test]
    fn impulse_scales_by_inverse_mass() {
        let mut b = body(Mass::Finite(4.0));
        b.apply_impulse(Vector2::new(8.0, 0.0));
        assert_eq!(b.velocity, Vector2::new(2.0, 0.0));
    }

    #[test]
    fn cap_speed_rescales() {
        let mut b = body(Mass::Finite(1.0));
        b.velocity = Vector2::new(30.0, 40.0);
        b.cap_speed();
        assert!((b.speed() - 10.0).abs() < 1e-9);
        assert!(b.velocity.x > 0.0 && b.velocity.y > 0.0);
    }

    #[test]
    fn unbounded_cap_never_rescales() {
        let mut b = Body::new(Vector2::ZERO, 1.0, Mass::Finite(1.0), SpeedCap::Unbounded);
        b.velocity = Vector2::new(1e6, 0.0);
        b.cap_speed();
        assert_eq!(b.velocity.x, 1e6);
    }

    #[test]
    fn validate_rejects_zero_mass_and_radius() {
        assert!(matches!(
            body(Mass::Finite(0.0)).validate("b"),
            Err(ConfigError::InvalidMass { .. })
        ));
        assert!(matches!(
            body(Mass::Finite(-2.0)).validate("b"),
            Err(ConfigError::InvalidMass { .. })
        ));
        let mut flat = body(Mass::Finite(1.0));
        flat.radius = 0.0;
        assert!(matches!(
            flat.validate("b"),
            Err(ConfigError::InvalidRadius { .. })
        ));
    }

    #[test]
    fn validate_rejects_ball_friction_above_one() {
        let ball = Ball::new(body(Mass::Finite(0.45)), 1.5);
        assert!(matches!(
            ball.validate(),
            Err(ConfigError::InvalidTunable { .. })
        ));
    }
}
