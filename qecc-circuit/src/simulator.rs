//! Shot-based state-vector simulator with Pauli noise.
//!
//! Each shot runs the circuit on a fresh state vector, samples measurement outcomes,
//! evaluates classical conditions against the bits measured so far in that shot, and
//! after every gate whose kind carries a channel in the [`NoiseModel`] applies one
//! sampled Pauli per touched qubit.
//!
//! The leading run of noiseless gates is identical for every shot, so it is simulated
//! once and each shot starts from a copy of the result.

use log::{debug, trace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::circuit::{Circuit, Instruction};
use crate::counts::Counts;
use crate::error::CircuitError;
use crate::gate::Gate;
use crate::noise::NoiseModel;
use crate::state::StateVector;

/// Widest classical memory a shot outcome can be packed into.
pub const MAX_CLBITS: usize = 64;

/// Multiplier spreading per-shot seeds across the generator's seed space.
const SHOT_SEED_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;

#[derive(Debug, Clone, Default)]
pub struct NoisySimulator {
    noise: NoiseModel,
    seed: Option<u64>,
}

impl NoisySimulator {
    pub fn new(noise: NoiseModel) -> Self {
        Self { noise, seed: None }
    }

    /// Simulator with an empty noise model.
    pub fn noiseless() -> Self {
        Self::default()
    }

    /// Fix the base seed so runs are reproducible. Shot `i` is seeded from the base
    /// seed and `i` alone, independent of thread scheduling.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn noise_model(&self) -> &NoiseModel {
        &self.noise
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Execute `shots` independent shots and histogram the final classical memory.
    pub fn run(&self, circuit: &Circuit, shots: usize) -> Result<Counts, CircuitError> {
        if shots == 0 {
            return Err(CircuitError::InvalidShots);
        }
        check_clbits(circuit)?;

        let split = self.deterministic_prefix_len(circuit);
        let (prefix, rest) = circuit.instructions().split_at(split);
        let mut initial = StateVector::zero(circuit.num_qubits())?;
        for inst in prefix {
            if let Instruction::Gate(gate) = inst {
                initial.apply_gate(gate);
            }
        }

        let base_seed = self.seed.unwrap_or_else(|| rand::thread_rng().gen());
        debug!(
            "running '{}' ({} qubits, {} instructions, {} cached) for {} shots, seed {}",
            circuit.name(),
            circuit.num_qubits(),
            circuit.len(),
            split,
            shots,
            base_seed
        );

        let num_clbits = circuit.num_clbits();
        let run_shot = |shot: usize| -> u64 {
            let mut rng = StdRng::seed_from_u64(shot_seed(base_seed, shot));
            let mut state = initial.clone();
            self.execute(&mut state, rest, &mut rng)
        };

        #[cfg(feature = "parallel")]
        let counts = (0..shots)
            .into_par_iter()
            .fold(
                || Counts::new(num_clbits),
                |mut acc, shot| {
                    acc.record(run_shot(shot));
                    acc
                },
            )
            .reduce(
                || Counts::new(num_clbits),
                |mut a, b| {
                    a.merge(b);
                    a
                },
            );

        #[cfg(not(feature = "parallel"))]
        let counts = {
            let mut acc = Counts::new(num_clbits);
            for shot in 0..shots {
                acc.record(run_shot(shot));
            }
            acc
        };

        trace!("'{}' produced {} distinct outcomes", circuit.name(), counts.len());
        Ok(counts)
    }

    /// Execute one shot from `|0...0⟩` with the caller's generator and return the
    /// final classical memory.
    pub fn run_single<R: Rng>(&self, circuit: &Circuit, rng: &mut R) -> Result<u64, CircuitError> {
        check_clbits(circuit)?;
        let mut state = StateVector::zero(circuit.num_qubits())?;
        Ok(self.execute(&mut state, circuit.instructions(), rng))
    }

    /// Number of leading instructions that are noiseless gates or barriers.
    fn deterministic_prefix_len(&self, circuit: &Circuit) -> usize {
        circuit
            .instructions()
            .iter()
            .position(|inst| match inst {
                Instruction::Gate(gate) => self.noise.is_noisy(gate.kind()),
                Instruction::Barrier => false,
                _ => true,
            })
            .unwrap_or(circuit.len())
    }

    fn execute<R: Rng>(&self, state: &mut StateVector, instructions: &[Instruction], rng: &mut R) -> u64 {
        let mut memory = 0u64;
        for inst in instructions {
            match inst {
                Instruction::Gate(gate) => self.apply_noisy(state, gate, rng),
                Instruction::Measure { qubit, clbit } => {
                    let bit = 1u64 << clbit;
                    if state.measure(*qubit, rng) {
                        memory |= bit;
                    } else {
                        memory &= !bit;
                    }
                }
                Instruction::Reset { qubit } => state.reset(*qubit, rng),
                Instruction::Barrier => {}
                Instruction::Conditional {
                    clbits,
                    value,
                    gate,
                } => {
                    let read = clbits
                        .iter()
                        .enumerate()
                        .fold(0u64, |acc, (k, &c)| acc | ((memory >> c & 1) << k));
                    if read == *value {
                        self.apply_noisy(state, gate, rng);
                    }
                }
            }
        }
        memory
    }

    fn apply_noisy<R: Rng>(&self, state: &mut StateVector, gate: &Gate, rng: &mut R) {
        state.apply_gate(gate);
        let Some(channel) = self.noise.channel_for(gate.kind()) else {
            return;
        };
        if channel.is_noiseless() {
            return;
        }
        for q in gate.qubits() {
            if let Some(error) = channel.sample(rng).gate(q) {
                state.apply_gate(&error);
            }
        }
    }
}

fn check_clbits(circuit: &Circuit) -> Result<(), CircuitError> {
    if circuit.num_clbits() > MAX_CLBITS {
        return Err(CircuitError::TooManyClbits {
            num_clbits: circuit.num_clbits(),
            max: MAX_CLBITS,
        });
    }
    Ok(())
}

fn shot_seed(base: u64, shot: usize) -> u64 {
    base.wrapping_add((shot as u64).wrapping_mul(SHOT_SEED_STRIDE))
}
