//! The perfect five-qubit code.
//!
//! Stabilizers are the cyclic shifts of `X Z Z X I`; the four independent ones used
//! here start at qubits 0, 1, 2 and 3. Logical zero is prepared directly from its
//! amplitude vector (six components at `+1/4`, ten at `-1/4`) and logical X is X on
//! every qubit.
//!
//! Every single-qubit Pauli error gives a distinct non-trivial syndrome, with closed
//! forms for the error on qubit `j` (all exponents mod 5, results mod 16):
//!
//! | error | syndrome |
//! |-------|----------|
//! | X | `2^(j-1) + 2^(j-2)` |
//! | Z | `2^j + 2^(j-3)` |
//! | Y | `31 - 2^(j-4)` |

use std::sync::Arc;

use log::trace;
use qecc_circuit::circuit::Circuit;
use qecc_circuit::gate::{Gate, Pauli, StatePreparation};
use qecc_circuit::register::QubitId;

use crate::code::{Correction, CorrectionRule, LogicalComponents, StabilizerCode};

const N: usize = 5;
const NUM_CHECKS: usize = 4;

/// Components of logical zero with amplitude `+1/4`, written with qubit 0 rightmost.
const POSITIVE_COMPONENTS: [u64; 6] = [0b00000, 0b00101, 0b01010, 0b10100, 0b01001, 0b10010];

/// Components of logical zero with amplitude `-1/4`.
const NEGATIVE_COMPONENTS: [u64; 10] = [
    0b00011, 0b00110, 0b01100, 0b11000, 0b10001, 0b01111, 0b11110, 0b11101, 0b11011, 0b10111,
];

/// The `[[5, 1, 3]]` code with four syndrome bits.
#[derive(Debug, Clone, PartialEq)]
pub struct FiveQubitCode {
    components: LogicalComponents,
    preparation: Arc<StatePreparation>,
}

impl Default for FiveQubitCode {
    fn default() -> Self {
        Self::new()
    }
}

impl FiveQubitCode {
    pub const NUM_PHYSICAL_QUBITS: usize = N;
    pub const NUM_SYNDROMES: usize = NUM_CHECKS;

    pub fn new() -> Self {
        let components = LogicalComponents::new(N, POSITIVE_COMPONENTS, NEGATIVE_COMPONENTS);
        let qubits: Vec<QubitId> = (0..N).collect();
        // Sixteen components of equal magnitude: always a valid unit vector.
        let preparation = StatePreparation::new(&qubits, &components.amplitudes())
            .expect("five-qubit logical-zero amplitudes are normalized");
        Self {
            components,
            preparation: Arc::new(preparation),
        }
    }

    /// Syndrome produced by `pauli` acting on qubit `j`, or 0 for the identity.
    pub fn syndrome_of(pauli: Pauli, j: QubitId) -> u64 {
        let pow = |shift: usize| 1u64 << ((j + N - shift) % N);
        let raw = match pauli {
            Pauli::I => 0,
            Pauli::X => pow(1) + pow(2),
            Pauli::Z => pow(0) + pow(3),
            Pauli::Y => 31 - pow(4),
        };
        raw % (1 << NUM_CHECKS)
    }

    /// Single-qubit error identified by each of the 16 syndromes; `None` for syndrome 0.
    pub fn syndrome_table() -> [Option<(Pauli, QubitId)>; 1 << NUM_CHECKS] {
        let mut table = [None; 1 << NUM_CHECKS];
        for pauli in [Pauli::X, Pauli::Z, Pauli::Y] {
            for j in 0..N {
                table[Self::syndrome_of(pauli, j) as usize] = Some((pauli, j));
            }
        }
        table
    }
}

impl StabilizerCode for FiveQubitCode {
    fn name(&self) -> &str {
        "5-Qubit"
    }

    fn num_physical_qubits(&self) -> usize {
        N
    }

    fn num_syndromes(&self) -> usize {
        NUM_CHECKS
    }

    fn logical_zero_preparer(&self) -> Circuit {
        let mut qc = Circuit::new("5-Qubit Logical 0 Preparation");
        qc.add_qreg("code", N);
        qc.apply(Gate::Prepare(Arc::clone(&self.preparation)));
        qc
    }

    fn logical_x(&self) -> Circuit {
        let mut qc = Circuit::new("5-Qubit Logical X");
        let code = qc.add_qreg("code", N);
        for q in code.indices() {
            qc.x(q);
        }
        qc
    }

    fn append_checks(&self, qc: &mut Circuit, code: &[QubitId], check: &[QubitId]) {
        for &a in check {
            qc.h(a);
        }
        for (i, &a) in check.iter().enumerate() {
            // X Z Z X on qubits i .. i+3, cyclically.
            qc.cx(a, code[i % N]);
            qc.cz(a, code[(i + 1) % N]);
            qc.cz(a, code[(i + 2) % N]);
            qc.cx(a, code[(i + 3) % N]);
        }
        for &a in check {
            qc.h(a);
        }
    }

    fn correction_rules(&self) -> Vec<CorrectionRule> {
        let rules: Vec<CorrectionRule> = [Pauli::X, Pauli::Z, Pauli::Y]
            .into_iter()
            .flat_map(|pauli| {
                (0..N).map(move |j| {
                    CorrectionRule::full(
                        NUM_CHECKS,
                        Self::syndrome_of(pauli, j),
                        Correction::single(pauli, j),
                    )
                })
            })
            .collect();
        trace!("5-Qubit recovery table has {} rules", rules.len());
        rules
    }

    fn logical_zero_components(&self) -> Option<&LogicalComponents> {
        Some(&self.components)
    }
}
