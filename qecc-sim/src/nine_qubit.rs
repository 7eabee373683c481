//! Shor's nine-qubit code.
//!
//! Physical qubits form three blocks `{0,1,2}, {3,4,5}, {6,7,8}`. Encoding first spreads
//! qubit 0 across the block leaders 0, 3, 6 and moves them to the Hadamard basis
//! (phase-flip layer), then copies each leader onto its two neighbours (bit-flip layer).
//! Because of that ordering the logical X of this encoder is Z on every physical qubit.
//!
//! Checks and syndrome bits:
//!
//! | bits | check | locates |
//! |------|-------|---------|
//! | `2i`, `2i+1` | `Z Z` on qubits `(3i, 3i+1)` and `(3i+1, 3i+2)` | bit flip inside block `i` |
//! | 6, 7 | `X⊗6` on blocks (0, 1) and (1, 2) | phase flip on a block |

use log::trace;
use qecc_circuit::circuit::Circuit;
use qecc_circuit::gate::Pauli;
use qecc_circuit::register::QubitId;

use crate::code::{Correction, CorrectionRule, StabilizerCode};

const NUM_BLOCKS: usize = 3;
const BLOCK_SIZE: usize = 3;

/// Shor's `[[9, 1, 3]]` code with eight syndrome bits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NineQubitCode;

impl NineQubitCode {
    pub const NUM_PHYSICAL_QUBITS: usize = 9;
    pub const NUM_SYNDROMES: usize = 8;

    pub fn new() -> Self {
        Self
    }

    /// The block holding physical qubit `qubit`.
    pub fn block_of(qubit: QubitId) -> usize {
        qubit / BLOCK_SIZE
    }

    fn block(i: usize) -> Vec<QubitId> {
        (BLOCK_SIZE * i..BLOCK_SIZE * (i + 1)).collect()
    }
}

impl StabilizerCode for NineQubitCode {
    fn name(&self) -> &str {
        "Shor"
    }

    fn num_physical_qubits(&self) -> usize {
        Self::NUM_PHYSICAL_QUBITS
    }

    fn num_syndromes(&self) -> usize {
        Self::NUM_SYNDROMES
    }

    fn logical_zero_preparer(&self) -> Circuit {
        let mut qc = Circuit::new("Shor Logical 0 Preparation");
        let code = qc.add_qreg("code", Self::NUM_PHYSICAL_QUBITS);
        let leaders: Vec<QubitId> = (0..NUM_BLOCKS).map(|i| code.index(BLOCK_SIZE * i)).collect();

        qc.cx(leaders[0], leaders[1]).cx(leaders[0], leaders[2]);
        for &q in &leaders {
            qc.h(q);
        }
        for &leader in &leaders {
            qc.cx(leader, leader + 1).cx(leader, leader + 2);
        }
        qc
    }

    fn logical_x(&self) -> Circuit {
        let mut qc = Circuit::new("Shor Logical X");
        let code = qc.add_qreg("code", Self::NUM_PHYSICAL_QUBITS);
        for q in code.indices() {
            qc.z(q);
        }
        qc
    }

    fn append_checks(&self, qc: &mut Circuit, code: &[QubitId], check: &[QubitId]) {
        // Bit-flip parities: ancilla 2i compares (3i, 3i+1), ancilla 2i+1 compares (3i+1, 3i+2).
        for i in 0..NUM_BLOCKS {
            let base = BLOCK_SIZE * i;
            qc.cx(code[base], check[2 * i]);
            qc.cx(code[base + 1], check[2 * i]);
            qc.cx(code[base + 1], check[2 * i + 1]);
            qc.cx(code[base + 2], check[2 * i + 1]);
        }

        // Phase-flip parities over pairs of neighbouring blocks.
        for i in 0..NUM_BLOCKS - 1 {
            let ancilla = check[2 * NUM_BLOCKS + i];
            qc.h(ancilla);
            for j in 0..2 * BLOCK_SIZE {
                qc.cx(ancilla, code[BLOCK_SIZE * i + j]);
            }
            qc.h(ancilla);
        }
    }

    fn correction_rules(&self) -> Vec<CorrectionRule> {
        let phase_bits = [2 * NUM_BLOCKS, 2 * NUM_BLOCKS + 1];
        // (s6, s7) = (1, 0) -> block 0, (1, 1) -> block 1, (0, 1) -> block 2.
        let mut rules = vec![
            CorrectionRule::partial(&phase_bits, 0b01, Correction::new(Pauli::Z, Self::block(0))),
            CorrectionRule::partial(&phase_bits, 0b11, Correction::new(Pauli::Z, Self::block(1))),
            CorrectionRule::partial(&phase_bits, 0b10, Correction::new(Pauli::Z, Self::block(2))),
        ];

        for i in 0..NUM_BLOCKS {
            let bits = [2 * i, 2 * i + 1];
            let base = BLOCK_SIZE * i;
            rules.push(CorrectionRule::partial(&bits, 0b01, Correction::single(Pauli::X, base)));
            rules.push(CorrectionRule::partial(&bits, 0b11, Correction::single(Pauli::X, base + 1)));
            rules.push(CorrectionRule::partial(&bits, 0b10, Correction::single(Pauli::X, base + 2)));
        }
        trace!("Shor recovery table has {} rules", rules.len());
        rules
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qecc_circuit::gate::GateKind;

    #[test]
    fn sizes() {
        let code = NineQubitCode::new();
        assert_eq!(code.num_physical_qubits(), 9);
        assert_eq!(code.num_syndromes(), 8);
        assert!(code.logical_zero_components().is_none());
        assert_eq!(NineQubitCode::block_of(7), 2);
    }

    #[test]
    fn preparer_gate_counts() {
        let prep = NineQubitCode::new().logical_zero_preparer();
        assert_eq!(prep.num_qubits(), 9);
        assert_eq!(prep.count_gates(GateKind::Cx), 8);
        assert_eq!(prep.count_gates(GateKind::H), 3);
        assert_eq!(prep.name(), "Shor Logical 0 Preparation");
    }

    #[test]
    fn logical_x_is_transversal_z() {
        let x = NineQubitCode::new().logical_x();
        assert_eq!(x.count_gates(GateKind::Z), 9);
        assert_eq!(x.len(), 9);
    }

    #[test]
    fn checker_layout() {
        let checker = NineQubitCode::new().error_checker();
        assert_eq!(checker.num_qubits(), 17);
        assert_eq!(checker.num_clbits(), 0);
        assert_eq!(checker.count_gates(GateKind::Cx), 12 + 12);
        assert_eq!(checker.count_gates(GateKind::H), 4);
    }

    #[test]
    fn corrector_measures_then_conditions() {
        let corrector = NineQubitCode::new().error_corrector();
        assert_eq!(corrector.num_qubits(), 17);
        assert_eq!(corrector.num_clbits(), 8);
        assert_eq!(corrector.count_measurements(), 8);
        // 3 blocks x 3 phase corrections, 9 single bit-flip corrections.
        assert_eq!(corrector.count_gates(GateKind::Z), 9);
        assert_eq!(corrector.count_gates(GateKind::X), 9);
    }

    #[test]
    fn decodes_phase_and_bit_flips_independently() {
        let code = NineQubitCode::new();
        assert!(code.decode_syndrome(0).is_empty());

        // Block 1 phase flip.
        assert_eq!(
            code.decode_syndrome(0b11 << 6),
            vec![Correction::new(Pauli::Z, vec![3, 4, 5])]
        );
        // Bit flip on qubit 8: block 2 sub-syndrome (s4, s5) = (0, 1).
        assert_eq!(
            code.decode_syndrome(0b10 << 4),
            vec![Correction::single(Pauli::X, 8)]
        );
        // Y on qubit 0 flips both the block-0 bit parity and the phase parity.
        assert_eq!(
            code.decode_syndrome((0b01 << 6) | 0b01),
            vec![
                Correction::new(Pauli::Z, vec![0, 1, 2]),
                Correction::single(Pauli::X, 0)
            ]
        );
    }

    #[test]
    fn construction_is_repeatable() {
        let code = NineQubitCode::new();
        assert_eq!(code.error_corrector(), code.error_corrector());
        assert_eq!(code.logical_zero_preparer(), code.logical_zero_preparer());
    }
}
