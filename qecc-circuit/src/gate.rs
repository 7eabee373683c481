//! Gate set: the Pauli group, Hadamard, CX, CZ and amplitude-vector state preparation.
//!
//! Single-qubit gates are stored as 2x2 matrices `[row0col0, row0col1, row1col0, row1col1]`.
//! Every gate in this set is its own inverse. For state preparation this holds because it
//! is realized as a Householder reflection.

use std::fmt;
use std::sync::Arc;

use num_complex::Complex;
use smallvec::{smallvec, SmallVec};

use crate::error::CircuitError;
use crate::register::QubitId;

/// A single-qubit 2x2 matrix stored as [row0col0, row0col1, row1col0, row1col1].
pub type Matrix2x2 = [Complex<f64>; 4];

/// Tolerance used when normalizing amplitude vectors.
const NORM_EPSILON: f64 = 1e-12;

/// Single-qubit Pauli operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Pauli {
    I,
    X,
    Y,
    Z,
}

impl Pauli {
    /// The Pauli as a gate on `qubit`, or `None` for the identity.
    pub fn gate(self, qubit: QubitId) -> Option<Gate> {
        match self {
            Pauli::I => None,
            Pauli::X => Some(Gate::X(qubit)),
            Pauli::Y => Some(Gate::Y(qubit)),
            Pauli::Z => Some(Gate::Z(qubit)),
        }
    }

    pub fn matrix(self) -> Matrix2x2 {
        match self {
            Pauli::I => identity_matrix(),
            Pauli::X => pauli_x_matrix(),
            Pauli::Y => pauli_y_matrix(),
            Pauli::Z => pauli_z_matrix(),
        }
    }
}

impl fmt::Display for Pauli {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Pauli::I => "I",
            Pauli::X => "X",
            Pauli::Y => "Y",
            Pauli::Z => "Z",
        };
        f.write_str(s)
    }
}

/// Gate identity without operands. Noise models are keyed by this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GateKind {
    Id,
    H,
    X,
    Y,
    Z,
    Cx,
    Cz,
    Prepare,
}

impl GateKind {
    /// Lower-case gate name as used by common circuit toolkits ("id", "cx", ...).
    pub fn name(self) -> &'static str {
        match self {
            GateKind::Id => "id",
            GateKind::H => "h",
            GateKind::X => "x",
            GateKind::Y => "y",
            GateKind::Z => "z",
            GateKind::Cx => "cx",
            GateKind::Cz => "cz",
            GateKind::Prepare => "prepare",
        }
    }
}

/// Exact preparation of an arbitrary state on `k` qubits from `|0...0⟩`.
///
/// Stores the Householder vector `w = (|0⟩ - |ψ⟩) / ‖|0⟩ - |ψ⟩‖` so that
/// `U = I - 2|w⟩⟨w|` maps `|0⟩` to `|ψ⟩`. The global phase of `|ψ⟩` is chosen so that
/// `⟨0|ψ⟩` is real and non-negative, which makes the mapping exact up to that phase.
#[derive(Debug, Clone, PartialEq)]
pub struct StatePreparation {
    qubits: SmallVec<[QubitId; 8]>,
    amplitudes: Vec<Complex<f64>>,
    reflector: Option<Vec<Complex<f64>>>,
}

impl StatePreparation {
    /// Build a preparation of `amplitudes` on `qubits`. The vector is normalized here.
    ///
    /// Basis index bit `k` corresponds to `qubits[k]`.
    pub fn new(qubits: &[QubitId], amplitudes: &[Complex<f64>]) -> Result<Self, CircuitError> {
        if qubits.is_empty() {
            return Err(CircuitError::InvalidAmplitudes {
                reason: "state preparation needs at least one qubit".to_string(),
            });
        }
        let dim = 1usize << qubits.len();
        if amplitudes.len() != dim {
            return Err(CircuitError::InvalidAmplitudes {
                reason: format!(
                    "expected {} amplitudes for {} qubits, got {}",
                    dim,
                    qubits.len(),
                    amplitudes.len()
                ),
            });
        }
        for (i, q) in qubits.iter().enumerate() {
            if qubits[..i].contains(q) {
                return Err(CircuitError::InvalidAmplitudes {
                    reason: format!("qubit {} listed twice", q),
                });
            }
        }
        let norm = amplitudes.iter().map(|a| a.norm_sqr()).sum::<f64>().sqrt();
        if !norm.is_finite() || norm < NORM_EPSILON {
            return Err(CircuitError::InvalidAmplitudes {
                reason: format!("amplitude vector has norm {}", norm),
            });
        }

        // Rotate the global phase so that ⟨0|ψ⟩ is real and non-negative.
        let lead = amplitudes[0];
        let phase = if lead.norm() > NORM_EPSILON {
            lead.conj() / lead.norm()
        } else {
            Complex::new(1.0, 0.0)
        };
        let amplitudes: Vec<Complex<f64>> =
            amplitudes.iter().map(|a| *a * phase / norm).collect();

        let mut w: Vec<Complex<f64>> = amplitudes.iter().map(|a| -*a).collect();
        w[0] += Complex::new(1.0, 0.0);
        let w_norm = w.iter().map(|a| a.norm_sqr()).sum::<f64>().sqrt();
        let reflector = if w_norm < NORM_EPSILON {
            None
        } else {
            Some(w.into_iter().map(|a| a / w_norm).collect())
        };

        Ok(Self {
            qubits: qubits.iter().copied().collect(),
            amplitudes,
            reflector,
        })
    }

    pub fn qubits(&self) -> &[QubitId] {
        &self.qubits
    }

    /// The normalized target state.
    pub fn amplitudes(&self) -> &[Complex<f64>] {
        &self.amplitudes
    }

    /// Householder vector, or `None` when the target is already `|0...0⟩`.
    pub fn reflector(&self) -> Option<&[Complex<f64>]> {
        self.reflector.as_deref()
    }

    fn remap(&self, map: &[QubitId]) -> Self {
        Self {
            qubits: self.qubits.iter().map(|&q| map[q]).collect(),
            amplitudes: self.amplitudes.clone(),
            reflector: self.reflector.clone(),
        }
    }
}

/// A unitary gate applied to specific qubits.
#[derive(Debug, Clone, PartialEq)]
pub enum Gate {
    /// Identity. Does nothing on its own; used as a noise carrier.
    Id(QubitId),
    H(QubitId),
    X(QubitId),
    Y(QubitId),
    Z(QubitId),
    Cx { control: QubitId, target: QubitId },
    Cz { control: QubitId, target: QubitId },
    Prepare(Arc<StatePreparation>),
}

impl Gate {
    pub fn kind(&self) -> GateKind {
        match self {
            Gate::Id(_) => GateKind::Id,
            Gate::H(_) => GateKind::H,
            Gate::X(_) => GateKind::X,
            Gate::Y(_) => GateKind::Y,
            Gate::Z(_) => GateKind::Z,
            Gate::Cx { .. } => GateKind::Cx,
            Gate::Cz { .. } => GateKind::Cz,
            Gate::Prepare(_) => GateKind::Prepare,
        }
    }

    pub fn name(&self) -> &'static str {
        self.kind().name()
    }

    /// Qubits touched by the gate, in operand order.
    pub fn qubits(&self) -> SmallVec<[QubitId; 2]> {
        match self {
            Gate::Id(q) | Gate::H(q) | Gate::X(q) | Gate::Y(q) | Gate::Z(q) => smallvec![*q],
            Gate::Cx { control, target } | Gate::Cz { control, target } => {
                smallvec![*control, *target]
            }
            Gate::Prepare(prep) => prep.qubits().iter().copied().collect(),
        }
    }

    /// Matrix of a single-qubit gate, `None` for multi-qubit gates.
    pub fn matrix(&self) -> Option<Matrix2x2> {
        match self {
            Gate::Id(_) => Some(identity_matrix()),
            Gate::H(_) => Some(hadamard_matrix()),
            Gate::X(_) => Some(pauli_x_matrix()),
            Gate::Y(_) => Some(pauli_y_matrix()),
            Gate::Z(_) => Some(pauli_z_matrix()),
            _ => None,
        }
    }

    /// The adjoint gate. Every gate in this set is self-inverse.
    pub fn inverse(&self) -> Gate {
        self.clone()
    }

    /// Rename operands through `map` (old index -> new index).
    pub(crate) fn remap(&self, map: &[QubitId]) -> Gate {
        match self {
            Gate::Id(q) => Gate::Id(map[*q]),
            Gate::H(q) => Gate::H(map[*q]),
            Gate::X(q) => Gate::X(map[*q]),
            Gate::Y(q) => Gate::Y(map[*q]),
            Gate::Z(q) => Gate::Z(map[*q]),
            Gate::Cx { control, target } => Gate::Cx {
                control: map[*control],
                target: map[*target],
            },
            Gate::Cz { control, target } => Gate::Cz {
                control: map[*control],
                target: map[*target],
            },
            Gate::Prepare(prep) => Gate::Prepare(Arc::new(prep.remap(map))),
        }
    }
}

pub fn identity_matrix() -> Matrix2x2 {
    let zero = Complex::new(0.0, 0.0);
    let one = Complex::new(1.0, 0.0);
    [one, zero, zero, one]
}

pub fn hadamard_matrix() -> Matrix2x2 {
    let h = Complex::new(std::f64::consts::FRAC_1_SQRT_2, 0.0);
    [h, h, h, -h]
}

pub fn pauli_x_matrix() -> Matrix2x2 {
    let zero = Complex::new(0.0, 0.0);
    let one = Complex::new(1.0, 0.0);
    [zero, one, one, zero]
}

pub fn pauli_y_matrix() -> Matrix2x2 {
    let zero = Complex::new(0.0, 0.0);
    let i = Complex::new(0.0, 1.0);
    [zero, -i, i, zero]
}

pub fn pauli_z_matrix() -> Matrix2x2 {
    let zero = Complex::new(0.0, 0.0);
    let one = Complex::new(1.0, 0.0);
    [one, zero, zero, -one]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mul(a: &Matrix2x2, b: &Matrix2x2) -> Matrix2x2 {
        [
            a[0] * b[0] + a[1] * b[2],
            a[0] * b[1] + a[1] * b[3],
            a[2] * b[0] + a[3] * b[2],
            a[2] * b[1] + a[3] * b[3],
        ]
    }

    fn assert_identity(m: &Matrix2x2) {
        let id = identity_matrix();
        for k in 0..4 {
            assert!((m[k] - id[k]).norm() < 1e-12, "entry {} = {:?}", k, m[k]);
        }
    }

    #[test]
    fn single_qubit_gates_square_to_identity() {
        for gate in [Gate::H(0), Gate::X(0), Gate::Y(0), Gate::Z(0)] {
            let m = gate.matrix().unwrap();
            assert_identity(&mul(&m, &m));
        }
    }

    #[test]
    fn y_equals_i_x_z() {
        let i = Complex::new(0.0, 1.0);
        let xz = mul(&pauli_x_matrix(), &pauli_z_matrix());
        let y = pauli_y_matrix();
        for k in 0..4 {
            assert!((y[k] - i * xz[k]).norm() < 1e-12);
        }
    }

    #[test]
    fn remap_renames_operands() {
        let gate = Gate::Cx {
            control: 0,
            target: 2,
        };
        let mapped = gate.remap(&[5, 6, 7]);
        assert_eq!(
            mapped,
            Gate::Cx {
                control: 5,
                target: 7
            }
        );
        assert_eq!(mapped.qubits().as_slice(), &[5, 7]);
    }

    #[test]
    fn preparation_rejects_bad_vectors() {
        let one = Complex::new(1.0, 0.0);
        assert!(StatePreparation::new(&[0, 1], &[one; 3]).is_err());
        assert!(StatePreparation::new(&[0, 1], &[Complex::new(0.0, 0.0); 4]).is_err());
        assert!(StatePreparation::new(&[0, 0], &[one; 4]).is_err());
        assert!(StatePreparation::new(&[], &[one]).is_err());
    }

    #[test]
    fn preparation_normalizes_and_fixes_phase() {
        let i = Complex::new(0.0, 1.0);
        let prep = StatePreparation::new(&[0], &[i * 3.0, i * 4.0]).unwrap();
        let amps = prep.amplitudes();
        assert!((amps[0] - Complex::new(0.6, 0.0)).norm() < 1e-12);
        assert!((amps[1] - Complex::new(0.8, 0.0)).norm() < 1e-12);
        assert!(prep.reflector().is_some());
    }

    #[test]
    fn preparing_zero_state_has_no_reflector() {
        let one = Complex::new(1.0, 0.0);
        let zero = Complex::new(0.0, 0.0);
        let prep = StatePreparation::new(&[0, 1], &[one, zero, zero, zero]).unwrap();
        assert!(prep.reflector().is_none());
    }

    #[test]
    fn gate_names() {
        assert_eq!(Gate::Id(3).name(), "id");
        assert_eq!(
            Gate::Cz {
                control: 0,
                target: 1
            }
            .name(),
            "cz"
        );
        assert_eq!(Pauli::Y.to_string(), "Y");
        assert_eq!(Pauli::I.gate(0), None);
        assert_eq!(Pauli::Z.gate(4), Some(Gate::Z(4)));
    }
}
