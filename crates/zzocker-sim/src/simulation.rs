use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use zzocker_core::{
    ConfigError, EndCondition, IntentError, IntentMap, IntentProvider, MatchConfig,
    PhysicsConfig, World,
};

use crate::collision;
use crate::error::SimulationError;
use crate::events::{MatchEvent, RunStatus, TickOutcome};
use crate::goal;
use crate::movement;
use crate::possession;

/// Cloneable stop signal, checked between ticks.
#[derive(Debug, Clone, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn stop(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Owns one match and advances it a fixed tick at a time.
pub struct Simulation<P> {
    world: World,
    provider: P,
    physics: PhysicsConfig,
    end: EndCondition,
    stop: StopHandle,
}

impl<P: IntentProvider> Simulation<P> {
    pub fn new(
        world: World,
        provider: P,
        physics: PhysicsConfig,
        end: EndCondition,
    ) -> Result<Self, ConfigError> {
        physics.validate()?;
        end.validate()?;
        Ok(Self {
            world,
            provider,
            physics,
            end,
            stop: StopHandle::default(),
        })
    }

    pub fn from_config(config: &MatchConfig, provider: P) -> Result<Self, ConfigError> {
        config.validate()?;
        let world = World::from_config(config)?;
        Self::new(world, provider, config.physics.clone(), config.end.clone())
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn into_world(self) -> World {
        self.world
    }

    pub fn provider_mut(&mut self) -> &mut P {
        &mut self.provider
    }

    pub fn physics(&self) -> &PhysicsConfig {
        &self.physics
    }

    /// A handle that can stop this simulation from elsewhere, including
    /// another thread.
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    pub fn stop(&self) {
        self.stop.stop();
    }

    pub fn is_running(&self) -> bool {
        !self.world.game_over && !self.stop.is_stopped()
    }

    /// Advance one tick.
    ///
    /// Does nothing once the match is over or stopped. A provider failure
    /// stops the simulation and leaves the world as of the last completed
    /// tick.
    pub fn step(&mut self) -> Result<TickOutcome, SimulationError> {
        if self.world.game_over {
            return Ok(TickOutcome::halted(RunStatus::Finished));
        }
        if self.stop.is_stopped() {
            return Ok(TickOutcome::halted(RunStatus::Stopped));
        }

        let intents = self.gather_intents()?;
        let mut events = Vec::new();
        let possession_before = self.world.possession;

        self.world.elapsed_time += self.physics.dt;
        self.world.tick += 1;

        movement::integrate(&mut self.world, &intents, &self.physics);
        if let Some(id) = collision::resolve_player_ball(&mut self.world, &intents, &self.physics) {
            self.world.last_touch = Some(id);
        }
        collision::resolve_player_player(&mut self.world, self.physics.player_restitution);
        collision::resolve_boundaries(&mut self.world, self.physics.wall_restitution);
        possession::update(&mut self.world, self.physics.possession_range);

        if let Some(scoring_team) = goal::check_and_reset(&mut self.world) {
            events.push(MatchEvent::Goal {
                scoring_team,
                score: self.world.score,
            });
        }
        if self.world.possession != possession_before {
            events.push(MatchEvent::PossessionChanged {
                from: possession_before,
                to: self.world.possession,
            });
        }

        movement::cap_speeds(&mut self.world);

        let status = if self.end.is_met(&self.world) {
            self.world.mark_game_over();
            tracing::info!(
                score = %self.world.score,
                elapsed = self.world.elapsed_time,
                ticks = self.world.tick,
                "Game over"
            );
            events.push(MatchEvent::GameOver {
                score: self.world.score,
                elapsed: self.world.elapsed_time,
            });
            RunStatus::Finished
        } else {
            RunStatus::Running
        };

        Ok(TickOutcome { status, events })
    }

    /// Step until the match ends or the stop signal is set.
    pub fn run(&mut self) -> Result<RunStatus, SimulationError> {
        self.run_with(|_, _| {})
    }

    /// Like [`Self::run`], calling `observer` after every completed tick.
    pub fn run_with<F>(&mut self, mut observer: F) -> Result<RunStatus, SimulationError>
    where
        F: FnMut(&World, &TickOutcome),
    {
        tracing::info!(
            players = self.world.players.len(),
            dt = self.physics.dt,
            "Match started"
        );
        loop {
            let outcome = self.step()?;
            if outcome.status == RunStatus::Stopped {
                tracing::info!(tick = self.world.tick, "Simulation stopped");
                return Ok(RunStatus::Stopped);
            }
            observer(&self.world, &outcome);
            if !outcome.is_running() {
                return Ok(outcome.status);
            }
        }
    }

    fn gather_intents(&mut self) -> Result<IntentMap, SimulationError> {
        match self.provider.intents(&self.world) {
            Ok(intents) => Ok(intents),
            Err(source) => {
                self.stop.stop();
                let err = IntentError::new(self.world.tick + 1, source);
                tracing::error!("Stopping simulation: {err}");
                Err(err.into())
            },
        }
    }
}
