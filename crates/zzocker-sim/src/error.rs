use thiserror::Error;
use zzocker_core::IntentError;

/// Failures that end a run.
#[derive(Debug, Error)]
pub enum SimulationError {
    #[error(transparent)]
    Intent(#[from] IntentError),
}
