//! Errors raised while configuring or running an evaluation.

use qecc_circuit::error::CircuitError;
use thiserror::Error;

/// Failure modes of the Monte Carlo harness.
///
/// Everything except [`EvaluationError::Circuit`] is a configuration error and is
/// reported before any simulation starts.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvaluationError {
    #[error("noise strength {p} is outside [0, 1/3]")]
    InvalidNoiseStrength { p: f64 },

    #[error("no noise strengths given")]
    EmptyNoiseStrengths,

    #[error("trial count must be positive")]
    InvalidTrials,

    #[error("error location {index} is out of range for a code with {num_qubits} physical qubits")]
    ErrorLocationOutOfRange { index: usize, num_qubits: usize },

    #[error("explicit error locations must name at least one qubit")]
    EmptyErrorLocations,

    #[error("logical state must be 0 or 1, got {0}")]
    InvalidLogicalState(u8),

    #[error("unknown measurement type '{0}' (expected direct, logical, decoded or 0s)")]
    UnknownMeasurementType(String),

    #[error("direct measurement needs the logical-zero components of '{code}', which it does not provide")]
    UnsupportedMeasurement { code: String },

    #[error("circuit backend failed: {0}")]
    Circuit(#[from] CircuitError),
}
