//! Errors raised while building or simulating circuits.

use thiserror::Error;

/// Failure modes of circuit construction and simulation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CircuitError {
    #[error("qubit {index} out of range for a circuit with {num_qubits} qubits")]
    QubitOutOfRange { index: usize, num_qubits: usize },

    #[error("classical bit {index} out of range for a circuit with {num_clbits} bits")]
    ClbitOutOfRange { index: usize, num_clbits: usize },

    #[error("cannot compose '{name}': it acts on {expected} {what}, but {got} were mapped")]
    CompositionMismatch {
        name: String,
        what: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("cannot compose '{name}': {what} {index} is mapped more than once")]
    DuplicateMapping {
        name: String,
        what: &'static str,
        index: usize,
    },

    #[error("circuit '{name}' is not invertible: it contains a {instruction}")]
    NotInvertible {
        name: String,
        instruction: &'static str,
    },

    #[error("invalid amplitude vector: {reason}")]
    InvalidAmplitudes { reason: String },

    #[error("invalid probability {value} for {what}")]
    InvalidProbability { what: &'static str, value: f64 },

    #[error("shot count must be positive")]
    InvalidShots,

    #[error("{num_qubits} qubits exceeds the state-vector limit of {max}")]
    TooManyQubits { num_qubits: usize, max: usize },

    #[error("{num_clbits} classical bits exceeds the outcome width of {max}")]
    TooManyClbits { num_clbits: usize, max: usize },
}
