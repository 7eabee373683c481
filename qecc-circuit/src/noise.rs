//! Pauli noise channels attached to gate kinds.
//!
//! A channel replaces a gate's ideal action with a randomly chosen Pauli applied right
//! after it: X, Y or Z with their own probabilities, identity otherwise. Each shot samples
//! one Pauli per touched qubit, independently, which is the Monte Carlo unravelling of
//! the Kraus sum {√(1-px-py-pz)·I, √px·X, √py·Y, √pz·Z}.

use std::collections::BTreeMap;

use rand::Rng;

use crate::error::CircuitError;
use crate::gate::{GateKind, Pauli};

/// Slack allowed when checking that probabilities sum to at most one.
const PROBABILITY_EPSILON: f64 = 1e-12;

/// Single-qubit Pauli channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PauliChannel {
    px: f64,
    py: f64,
    pz: f64,
}

impl PauliChannel {
    pub fn new(px: f64, py: f64, pz: f64) -> Result<Self, CircuitError> {
        for (what, value) in [("X error", px), ("Y error", py), ("Z error", pz)] {
            if !(0.0..=1.0).contains(&value) {
                return Err(CircuitError::InvalidProbability { what, value });
            }
        }
        let total = px + py + pz;
        if total > 1.0 + PROBABILITY_EPSILON {
            return Err(CircuitError::InvalidProbability {
                what: "total Pauli error",
                value: total,
            });
        }
        Ok(Self { px, py, pz })
    }

    /// X, Y and Z each with probability `p`, identity with `1 - 3p`.
    ///
    /// Valid for `0 <= p <= 1/3`.
    pub fn depolarizing_like(p: f64) -> Result<Self, CircuitError> {
        Self::new(p, p, p)
    }

    /// The channel that never errs.
    pub fn identity() -> Self {
        Self {
            px: 0.0,
            py: 0.0,
            pz: 0.0,
        }
    }

    pub fn error_probability(&self) -> f64 {
        self.px + self.py + self.pz
    }

    pub fn is_noiseless(&self) -> bool {
        self.error_probability() == 0.0
    }

    /// Outcome distribution in the order X, Y, Z, I.
    pub fn probabilities(&self) -> [(Pauli, f64); 4] {
        [
            (Pauli::X, self.px),
            (Pauli::Y, self.py),
            (Pauli::Z, self.pz),
            (Pauli::I, (1.0 - self.error_probability()).max(0.0)),
        ]
    }

    /// Draw one Pauli from the channel.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> Pauli {
        if self.is_noiseless() {
            return Pauli::I;
        }
        let r: f64 = rng.gen();
        let mut cumulative = 0.0;
        for (pauli, probability) in self.probabilities() {
            cumulative += probability;
            if r < cumulative {
                return pauli;
            }
        }
        // Rounding can leave r just above the last cumulative sum.
        Pauli::I
    }
}

/// Map from gate kind to the channel that follows every gate of that kind.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NoiseModel {
    gate_errors: BTreeMap<GateKind, PauliChannel>,
}

impl NoiseModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach `channel` to every qubit touched by gates of the listed kinds.
    pub fn add_all_qubit_error(&mut self, channel: PauliChannel, kinds: &[GateKind]) -> &mut Self {
        for &kind in kinds {
            self.gate_errors.insert(kind, channel);
        }
        self
    }

    pub fn channel_for(&self, kind: GateKind) -> Option<&PauliChannel> {
        self.gate_errors.get(&kind)
    }

    /// True if the gate kind carries a channel with non-zero error probability.
    pub fn is_noisy(&self, kind: GateKind) -> bool {
        self.channel_for(kind).map_or(false, |c| !c.is_noiseless())
    }

    pub fn is_noiseless(&self) -> bool {
        self.gate_errors.values().all(PauliChannel::is_noiseless)
    }

    pub fn noisy_gates(&self) -> impl Iterator<Item = GateKind> + '_ {
        self.gate_errors
            .iter()
            .filter(|(_, c)| !c.is_noiseless())
            .map(|(k, _)| *k)
    }
}
