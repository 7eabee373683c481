//! Dense state vector over `n` qubits.
//!
//! Basis index bit `k` is qubit `k`, so `|q_{n-1} ... q_1 q_0⟩` has index
//! `Σ q_k 2^k`. Memory is `2^n` complex amplitudes, which caps the simulator at
//! [`MAX_QUBITS`].

use num_complex::Complex;
use rand::Rng;

use crate::error::CircuitError;
use crate::gate::{Gate, Matrix2x2};
use crate::register::QubitId;

/// Largest register the dense simulator accepts (2^24 amplitudes, 256 MiB).
pub const MAX_QUBITS: usize = 24;

#[derive(Debug, Clone, PartialEq)]
pub struct StateVector {
    num_qubits: usize,
    amplitudes: Vec<Complex<f64>>,
}

impl StateVector {
    /// `|0...0⟩` on `num_qubits` qubits.
    pub fn zero(num_qubits: usize) -> Result<Self, CircuitError> {
        if num_qubits > MAX_QUBITS {
            return Err(CircuitError::TooManyQubits {
                num_qubits,
                max: MAX_QUBITS,
            });
        }
        let mut amplitudes = vec![Complex::new(0.0, 0.0); 1usize << num_qubits];
        amplitudes[0] = Complex::new(1.0, 0.0);
        Ok(Self {
            num_qubits,
            amplitudes,
        })
    }

    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    pub fn amplitudes(&self) -> &[Complex<f64>] {
        &self.amplitudes
    }

    /// Squared norm; stays 1 up to rounding.
    pub fn norm_sqr(&self) -> f64 {
        self.amplitudes.iter().map(|a| a.norm_sqr()).sum()
    }

    /// Born-rule probability of every basis state.
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(|a| a.norm_sqr()).collect()
    }

    /// |⟨other|self⟩|², insensitive to global phase.
    pub fn fidelity(&self, other: &StateVector) -> f64 {
        let overlap: Complex<f64> = other
            .amplitudes
            .iter()
            .zip(&self.amplitudes)
            .map(|(a, b)| a.conj() * b)
            .sum();
        overlap.norm_sqr()
    }

    pub fn apply_gate(&mut self, gate: &Gate) {
        match gate {
            Gate::Id(_) => {}
            Gate::X(q) => self.apply_x(*q),
            Gate::Z(q) => self.apply_z(*q),
            Gate::Cx { control, target } => self.apply_cx(*control, *target),
            Gate::Cz { control, target } => self.apply_cz(*control, *target),
            Gate::Prepare(prep) => {
                if let Some(w) = prep.reflector() {
                    self.apply_reflection(prep.qubits(), w);
                }
            }
            Gate::H(q) | Gate::Y(q) => {
                if let Some(m) = gate.matrix() {
                    self.apply_matrix(*q, &m);
                }
            }
        }
    }

    /// Apply a 2x2 matrix to one qubit.
    pub fn apply_matrix(&mut self, qubit: QubitId, m: &Matrix2x2) {
        let bit = 1usize << qubit;
        for i in 0..self.amplitudes.len() {
            if i & bit == 0 {
                let a0 = self.amplitudes[i];
                let a1 = self.amplitudes[i | bit];
                self.amplitudes[i] = m[0] * a0 + m[1] * a1;
                self.amplitudes[i | bit] = m[2] * a0 + m[3] * a1;
            }
        }
    }

    fn apply_x(&mut self, qubit: QubitId) {
        let bit = 1usize << qubit;
        for i in 0..self.amplitudes.len() {
            if i & bit == 0 {
                self.amplitudes.swap(i, i | bit);
            }
        }
    }

    fn apply_z(&mut self, qubit: QubitId) {
        let bit = 1usize << qubit;
        for (i, a) in self.amplitudes.iter_mut().enumerate() {
            if i & bit != 0 {
                *a = -*a;
            }
        }
    }

    pub fn apply_cx(&mut self, control: QubitId, target: QubitId) {
        let c = 1usize << control;
        let t = 1usize << target;
        for i in 0..self.amplitudes.len() {
            if i & c != 0 && i & t == 0 {
                self.amplitudes.swap(i, i | t);
            }
        }
    }

    pub fn apply_cz(&mut self, control: QubitId, target: QubitId) {
        let mask = (1usize << control) | (1usize << target);
        for (i, a) in self.amplitudes.iter_mut().enumerate() {
            if i & mask == mask {
                *a = -*a;
            }
        }
    }

    /// Apply `I - 2|w⟩⟨w|` on the subspace spanned by `qubits`.
    pub fn apply_reflection(&mut self, qubits: &[QubitId], w: &[Complex<f64>]) {
        debug_assert_eq!(w.len(), 1usize << qubits.len());
        let mask: usize = qubits.iter().map(|&q| 1usize << q).sum();
        // Offset of each local basis state inside the full index space.
        let offsets: Vec<usize> = (0..w.len())
            .map(|local| {
                qubits
                    .iter()
                    .enumerate()
                    .filter(|(k, _)| local >> k & 1 == 1)
                    .map(|(_, &q)| 1usize << q)
                    .sum()
            })
            .collect();

        for base in 0..self.amplitudes.len() {
            if base & mask != 0 {
                continue;
            }
            let overlap: Complex<f64> = offsets
                .iter()
                .zip(w)
                .map(|(&off, wl)| wl.conj() * self.amplitudes[base | off])
                .sum();
            if overlap.norm_sqr() == 0.0 {
                continue;
            }
            for (&off, wl) in offsets.iter().zip(w) {
                self.amplitudes[base | off] -= *wl * overlap * 2.0;
            }
        }
    }

    /// Probability that measuring `qubit` yields 1.
    pub fn probability_one(&self, qubit: QubitId) -> f64 {
        let bit = 1usize << qubit;
        self.amplitudes
            .iter()
            .enumerate()
            .filter(|(i, _)| i & bit != 0)
            .map(|(_, a)| a.norm_sqr())
            .sum::<f64>()
            .clamp(0.0, 1.0)
    }

    /// Projective Z measurement of `qubit`. Collapses and renormalizes the state.
    pub fn measure<R: Rng>(&mut self, qubit: QubitId, rng: &mut R) -> bool {
        let p1 = self.probability_one(qubit);
        let outcome = rng.gen::<f64>() < p1;
        let p = if outcome { p1 } else { 1.0 - p1 };
        let scale = 1.0 / p.sqrt();
        let bit = 1usize << qubit;
        for (i, a) in self.amplitudes.iter_mut().enumerate() {
            if (i & bit != 0) == outcome {
                *a *= scale;
            } else {
                *a = Complex::new(0.0, 0.0);
            }
        }
        outcome
    }

    /// Measure `qubit` and flip it back to `|0⟩` if needed.
    pub fn reset<R: Rng>(&mut self, qubit: QubitId, rng: &mut R) {
        if self.measure(qubit, rng) {
            self.apply_x(qubit);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gate::StatePreparation;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::Arc;

    #[test]
    fn zero_state_is_normalized() {
        let sv = StateVector::zero(3).unwrap();
        assert_eq!(sv.amplitudes().len(), 8);
        assert!((sv.norm_sqr() - 1.0).abs() < 1e-12);
        assert!((sv.probabilities()[0] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn too_many_qubits_rejected() {
        assert!(matches!(
            StateVector::zero(MAX_QUBITS + 1),
            Err(CircuitError::TooManyQubits { .. })
        ));
    }

    #[test]
    fn bell_state_amplitudes() {
        let mut sv = StateVector::zero(2).unwrap();
        sv.apply_gate(&Gate::H(0));
        sv.apply_gate(&Gate::Cx {
            control: 0,
            target: 1,
        });
        let p = sv.probabilities();
        assert!((p[0] - 0.5).abs() < 1e-12);
        assert!((p[3] - 0.5).abs() < 1e-12);
        assert!(p[1] < 1e-12 && p[2] < 1e-12);
    }

    #[test]
    fn x_flips_addressed_qubit_only() {
        let mut sv = StateVector::zero(3).unwrap();
        sv.apply_gate(&Gate::X(1));
        assert!((sv.probabilities()[0b010] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn z_and_cz_only_change_phase() {
        let mut sv = StateVector::zero(2).unwrap();
        sv.apply_gate(&Gate::H(0));
        sv.apply_gate(&Gate::H(1));
        let before = sv.probabilities();
        sv.apply_gate(&Gate::Z(0));
        sv.apply_gate(&Gate::Cz {
            control: 0,
            target: 1,
        });
        assert_eq!(before.len(), sv.probabilities().len());
        for (a, b) in before.iter().zip(sv.probabilities()) {
            assert!((a - b).abs() < 1e-12);
        }
        assert!((sv.amplitudes()[3].re - 0.5).abs() < 1e-12);
        assert!((sv.amplitudes()[1].re + 0.5).abs() < 1e-12);
    }

    #[test]
    fn reflection_prepares_target_exactly() {
        let amps: Vec<Complex<f64>> = [0.25, -0.25, 0.0, 0.5, 0.5, 0.0, -0.5, 0.25]
            .iter()
            .map(|&a| Complex::new(a, 0.0))
            .collect();
        let prep = StatePreparation::new(&[0, 2, 1], &amps).unwrap();
        let target = prep.amplitudes().to_vec();

        let mut sv = StateVector::zero(3).unwrap();
        sv.apply_gate(&Gate::Prepare(Arc::new(prep.clone())));
        // Local index bit k lives on qubits[k] = [0, 2, 1][k].
        for (local, amp) in target.iter().enumerate() {
            let global = (local & 1) | ((local >> 1 & 1) << 2) | ((local >> 2 & 1) << 1);
            assert!((sv.amplitudes()[global] - amp).norm() < 1e-12);
        }

        // The reflection is its own inverse.
        sv.apply_gate(&Gate::Prepare(Arc::new(prep)));
        assert!((sv.probabilities()[0] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn measurement_collapses() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut sv = StateVector::zero(2).unwrap();
        sv.apply_gate(&Gate::H(0));
        sv.apply_gate(&Gate::Cx {
            control: 0,
            target: 1,
        });
        let first = sv.measure(0, &mut rng);
        let second = sv.measure(1, &mut rng);
        assert_eq!(first, second, "Bell pair outcomes must agree");
        assert!((sv.norm_sqr() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn reset_returns_to_zero() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..20 {
            let mut sv = StateVector::zero(1).unwrap();
            sv.apply_gate(&Gate::H(0));
            sv.reset(0, &mut rng);
            assert!((sv.probabilities()[0] - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn fidelity_ignores_global_phase() {
        let mut a = StateVector::zero(1).unwrap();
        a.apply_gate(&Gate::X(0));
        let mut b = a.clone();
        b.apply_gate(&Gate::Y(0));
        b.apply_gate(&Gate::X(0));
        b.apply_gate(&Gate::Z(0));
        // YXZ = -i·I, so b equals a up to global phase.
        assert!((a.fidelity(&b) - 1.0).abs() < 1e-12);
    }
}
