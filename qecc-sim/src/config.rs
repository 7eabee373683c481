//! Evaluation inputs and outputs.

use std::fmt;
use std::str::FromStr;

use crate::code::StabilizerCode;
use crate::error::EvaluationError;

/// Largest per-Pauli probability of the depolarizing-like channel.
pub const MAX_NOISE_STRENGTH: f64 = 1.0 / 3.0;

/// Logical input state of an experiment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum LogicalState {
    #[default]
    Zero,
    One,
}

impl LogicalState {
    pub fn as_u8(self) -> u8 {
        match self {
            LogicalState::Zero => 0,
            LogicalState::One => 1,
        }
    }
}

impl TryFrom<u8> for LogicalState {
    type Error = EvaluationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(LogicalState::Zero),
            1 => Ok(LogicalState::One),
            other => Err(EvaluationError::InvalidLogicalState(other)),
        }
    }
}

impl fmt::Display for LogicalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}

/// How a shot is scored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum MeasurementType {
    /// Measure the codeword as is; success when the outcome is a basis component of
    /// the prepared logical state. Needs [`StabilizerCode::logical_zero_components`].
    #[default]
    Direct,
    /// Undo the encoding before measuring; success when every qubit reads 0.
    Decoded,
}

impl FromStr for MeasurementType {
    type Err = EvaluationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "direct" | "logical" => Ok(MeasurementType::Direct),
            "decoded" | "0s" => Ok(MeasurementType::Decoded),
            _ => Err(EvaluationError::UnknownMeasurementType(s.to_string())),
        }
    }
}

impl fmt::Display for MeasurementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeasurementType::Direct => write!(f, "direct"),
            MeasurementType::Decoded => write!(f, "decoded"),
        }
    }
}

/// Which physical qubits receive the noisy identity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ErrorLocations {
    #[default]
    All,
    /// Explicit physical-qubit indices, in order. A repeated index is hit twice.
    Qubits(Vec<usize>),
}

impl ErrorLocations {
    /// Resolve to concrete indices for a code with `num_qubits` physical qubits.
    pub fn resolve(&self, num_qubits: usize) -> Result<Vec<usize>, EvaluationError> {
        match self {
            ErrorLocations::All => Ok((0..num_qubits).collect()),
            ErrorLocations::Qubits(qubits) if qubits.is_empty() => {
                Err(EvaluationError::EmptyErrorLocations)
            }
            ErrorLocations::Qubits(qubits) => {
                if let Some(&index) = qubits.iter().find(|&&q| q >= num_qubits) {
                    return Err(EvaluationError::ErrorLocationOutOfRange { index, num_qubits });
                }
                Ok(qubits.clone())
            }
        }
    }
}

impl FromStr for ErrorLocations {
    type Err = std::num::ParseIntError;

    /// `all`, or a comma-separated list of indices.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") {
            return Ok(ErrorLocations::All);
        }
        s.split(',')
            .filter(|part| !part.trim().is_empty())
            .map(|part| part.trim().parse())
            .collect::<Result<Vec<_>, _>>()
            .map(ErrorLocations::Qubits)
    }
}

/// One noise strength or an ordered list of them.
#[derive(Debug, Clone, PartialEq)]
pub enum NoiseStrengths {
    Single(f64),
    List(Vec<f64>),
}

impl NoiseStrengths {
    pub fn values(&self) -> &[f64] {
        match self {
            NoiseStrengths::Single(p) => std::slice::from_ref(p),
            NoiseStrengths::List(ps) => ps,
        }
    }

    /// Reject an empty list and any value outside `[0, 1/3]` (NaN included).
    pub fn validate(&self) -> Result<(), EvaluationError> {
        validate_noise_strengths(self.values())
    }
}

impl From<f64> for NoiseStrengths {
    fn from(p: f64) -> Self {
        NoiseStrengths::Single(p)
    }
}

impl From<Vec<f64>> for NoiseStrengths {
    fn from(ps: Vec<f64>) -> Self {
        NoiseStrengths::List(ps)
    }
}

impl From<&[f64]> for NoiseStrengths {
    fn from(ps: &[f64]) -> Self {
        NoiseStrengths::List(ps.to_vec())
    }
}

pub(crate) fn validate_noise_strengths(ps: &[f64]) -> Result<(), EvaluationError> {
    if ps.is_empty() {
        return Err(EvaluationError::EmptyNoiseStrengths);
    }
    for &p in ps {
        if !(0.0..=MAX_NOISE_STRENGTH).contains(&p) {
            return Err(EvaluationError::InvalidNoiseStrength { p });
        }
    }
    Ok(())
}

/// Success fraction per noise strength, shaped like the [`NoiseStrengths`] input.
#[derive(Debug, Clone, PartialEq)]
pub enum SuccessFractions {
    Single(f64),
    List(Vec<f64>),
}

impl SuccessFractions {
    pub fn as_slice(&self) -> &[f64] {
        match self {
            SuccessFractions::Single(f) => std::slice::from_ref(f),
            SuccessFractions::List(fs) => fs,
        }
    }

    pub fn single(&self) -> Option<f64> {
        match self {
            SuccessFractions::Single(f) => Some(*f),
            SuccessFractions::List(_) => None,
        }
    }

    pub fn into_vec(self) -> Vec<f64> {
        match self {
            SuccessFractions::Single(f) => vec![f],
            SuccessFractions::List(fs) => fs,
        }
    }
}

/// Settings shared by every noise strength of one evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationConfig {
    pub logical_state: LogicalState,
    /// Shots per noise strength.
    pub trials: usize,
    pub measurement: MeasurementType,
    pub error_locations: ErrorLocations,
    /// Base seed for reproducible runs; fresh entropy when `None`.
    pub seed: Option<u64>,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            logical_state: LogicalState::Zero,
            trials: 1000,
            measurement: MeasurementType::Direct,
            error_locations: ErrorLocations::All,
            seed: None,
        }
    }
}

impl EvaluationConfig {
    /// Decoded scoring, which every code supports.
    pub fn decoded() -> Self {
        Self::default().with_measurement(MeasurementType::Decoded)
    }

    pub fn with_logical_state(mut self, logical_state: LogicalState) -> Self {
        self.logical_state = logical_state;
        self
    }

    pub fn with_trials(mut self, trials: usize) -> Self {
        self.trials = trials;
        self
    }

    pub fn with_measurement(mut self, measurement: MeasurementType) -> Self {
        self.measurement = measurement;
        self
    }

    pub fn with_error_locations(mut self, error_locations: ErrorLocations) -> Self {
        self.error_locations = error_locations;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check the configuration against `code` and return the resolved error locations.
    pub fn validate<C: StabilizerCode + ?Sized>(
        &self,
        code: &C,
    ) -> Result<Vec<usize>, EvaluationError> {
        if self.trials == 0 {
            return Err(EvaluationError::InvalidTrials);
        }
        let locations = self.error_locations.resolve(code.num_physical_qubits())?;
        let scorable = code
            .logical_zero_components()
            .map_or(false, |c| c.is_disjoint_from_flip());
        if self.measurement == MeasurementType::Direct && !scorable {
            return Err(EvaluationError::UnsupportedMeasurement {
                code: code.name().to_string(),
            });
        }
        Ok(locations)
    }
}
