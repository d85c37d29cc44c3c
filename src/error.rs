//! Simulation error types.

use thiserror::Error;

use crate::validation::ValidationError;

/// Result of a simulation entry point.
pub type SimulationResult<T> = Result<T, SimulationError>;

/// Why a simulation run was refused.
///
/// Every variant is raised before any run state exists, so a failed run
/// never yields a partial timeline.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimulationError {
    #[error("input validation failed: {}", summarize(.0))]
    Validation(Vec<ValidationError>),

    #[error(transparent)]
    Policy(#[from] PolicyError),
}

/// Policy selection errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PolicyError {
    #[error("unknown scheduling policy: {0}")]
    UnknownPolicy(String),

    #[error("priority scheduling requires a priority for process '{process_id}'")]
    MissingPriority { process_id: String },
}

impl From<Vec<ValidationError>> for SimulationError {
    fn from(errors: Vec<ValidationError>) -> Self {
        SimulationError::Validation(errors)
    }
}

fn summarize(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
