//! The contract every stabilizer code implements.
//!
//! A code hands out three circuit components over its own local indices: a logical-zero
//! preparer on the `n` physical qubits, a logical X on the same qubits, and an error
//! corrector on `n` physical qubits, `m` ancillas and an `m`-bit syndrome register.
//! The corrector measures every check into the syndrome register, resets the ancillas,
//! then applies the recovery selected by the syndrome value.
//!
//! Recovery is described by a table of [`CorrectionRule`]s. The same table drives both
//! the conditional gates in the corrector and the pure [`StabilizerCode::decode_syndrome`]
//! mapping, so the two cannot drift apart.

use std::collections::BTreeSet;
use std::fmt;

use num_complex::Complex;
use qecc_circuit::circuit::Circuit;
use qecc_circuit::gate::Pauli;
use qecc_circuit::register::{ClbitId, QubitId};

/// A Pauli to apply to a set of physical qubits.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Correction {
    pub pauli: Pauli,
    pub qubits: Vec<QubitId>,
}

impl Correction {
    pub fn new(pauli: Pauli, qubits: impl Into<Vec<QubitId>>) -> Self {
        Self {
            pauli,
            qubits: qubits.into(),
        }
    }

    pub fn single(pauli: Pauli, qubit: QubitId) -> Self {
        Self::new(pauli, vec![qubit])
    }
}

impl fmt::Display for Correction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let qubits: Vec<String> = self.qubits.iter().map(|q| q.to_string()).collect();
        write!(f, "{} on [{}]", self.pauli, qubits.join(", "))
    }
}

/// Apply `correction` when the syndrome bits `syndrome_bits` read `value`
/// (bit `k` of `value` is compared with syndrome bit `syndrome_bits[k]`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorrectionRule {
    pub syndrome_bits: Vec<usize>,
    pub value: u64,
    pub correction: Correction,
}

impl CorrectionRule {
    /// Rule keyed on the whole `width`-bit syndrome.
    pub fn full(width: usize, value: u64, correction: Correction) -> Self {
        Self {
            syndrome_bits: (0..width).collect(),
            value,
            correction,
        }
    }

    /// Rule keyed on a subset of syndrome bits.
    pub fn partial(syndrome_bits: &[usize], value: u64, correction: Correction) -> Self {
        Self {
            syndrome_bits: syndrome_bits.to_vec(),
            value,
            correction,
        }
    }

    pub fn matches(&self, syndrome: u64) -> bool {
        let read = self
            .syndrome_bits
            .iter()
            .enumerate()
            .fold(0u64, |acc, (k, &bit)| acc | ((syndrome >> bit & 1) << k));
        read == self.value
    }
}

/// Computational-basis components of a logical-zero codeword, split by the sign of
/// their amplitude. Bit `k` of a component is physical qubit `k`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalComponents {
    num_qubits: usize,
    positive: BTreeSet<u64>,
    negative: BTreeSet<u64>,
}

impl LogicalComponents {
    pub fn new(
        num_qubits: usize,
        positive: impl IntoIterator<Item = u64>,
        negative: impl IntoIterator<Item = u64>,
    ) -> Self {
        Self {
            num_qubits,
            positive: positive.into_iter().collect(),
            negative: negative.into_iter().collect(),
        }
    }

    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    pub fn positive(&self) -> &BTreeSet<u64> {
        &self.positive
    }

    pub fn negative(&self) -> &BTreeSet<u64> {
        &self.negative
    }

    /// Both groups together.
    pub fn all(&self) -> BTreeSet<u64> {
        self.positive.union(&self.negative).copied().collect()
    }

    pub fn contains(&self, basis_state: u64) -> bool {
        self.positive.contains(&basis_state) || self.negative.contains(&basis_state)
    }

    pub fn len(&self) -> usize {
        self.positive.len() + self.negative.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Components after a bit flip on every qubit, i.e. those of a logical one
    /// obtained by transversal X.
    pub fn flipped(&self) -> LogicalComponents {
        let mask = all_ones(self.num_qubits);
        LogicalComponents {
            num_qubits: self.num_qubits,
            positive: self.positive.iter().map(|c| c ^ mask).collect(),
            negative: self.negative.iter().map(|c| c ^ mask).collect(),
        }
    }

    /// True when no component of logical zero is also a component of logical one.
    /// Direct scoring is only meaningful in that case.
    pub fn is_disjoint_from_flip(&self) -> bool {
        let flipped = self.flipped();
        self.all().is_disjoint(&flipped.all())
    }

    /// Normalized amplitude vector over `2^num_qubits` basis states: equal magnitude,
    /// `+` on positive components and `-` on negative ones.
    pub fn amplitudes(&self) -> Vec<Complex<f64>> {
        let mut amplitudes = vec![Complex::new(0.0, 0.0); 1usize << self.num_qubits];
        if self.is_empty() {
            return amplitudes;
        }
        let magnitude = 1.0 / (self.len() as f64).sqrt();
        for &c in &self.positive {
            amplitudes[c as usize] = Complex::new(magnitude, 0.0);
        }
        for &c in &self.negative {
            amplitudes[c as usize] = Complex::new(-magnitude, 0.0);
        }
        amplitudes
    }
}

pub(crate) fn all_ones(width: usize) -> u64 {
    if width >= 64 {
        u64::MAX
    } else {
        (1u64 << width) - 1
    }
}

/// A single-logical-qubit stabilizer code that corrects one arbitrary Pauli error.
///
/// Implementors supply the preparer, the logical X, the check circuit and the recovery
/// table; the corrector and the syndrome decoder are derived from those.
pub trait StabilizerCode: Send + Sync + fmt::Debug {
    /// Short label used in circuit names and log output.
    fn name(&self) -> &str;

    fn num_physical_qubits(&self) -> usize;

    /// Number of checks, which is also the number of ancillas and syndrome bits.
    fn num_syndromes(&self) -> usize;

    /// Circuit on the physical qubits mapping `|0...0⟩` to logical zero exactly.
    fn logical_zero_preparer(&self) -> Circuit;

    /// Circuit on the physical qubits implementing the logical bit flip.
    fn logical_x(&self) -> Circuit;

    /// Append the check circuit acting on `code` (physical) and `check` (ancilla) qubits.
    /// Afterwards ancilla `k` holds syndrome bit `k` in its Z basis.
    fn append_checks(&self, circuit: &mut Circuit, code: &[QubitId], check: &[QubitId]);

    /// Recovery table. Rules are applied in order; several may fire for one syndrome.
    fn correction_rules(&self) -> Vec<CorrectionRule>;

    /// Basis components of logical zero, for codes where direct scoring is meaningful.
    fn logical_zero_components(&self) -> Option<&LogicalComponents> {
        None
    }

    /// Standalone check circuit on registers `code` and `check`.
    fn error_checker(&self) -> Circuit {
        let mut qc = Circuit::new(format!("{} Error Checker", self.name()));
        let code = qc.add_qreg("code", self.num_physical_qubits());
        let check = qc.add_qreg("check", self.num_syndromes());
        self.append_checks(&mut qc, &code.indices(), &check.indices());
        qc
    }

    /// Check, measure into `syndromes`, reset ancillas, then correct.
    fn error_corrector(&self) -> Circuit {
        let mut qc = Circuit::new(format!("{} Corrector", self.name()));
        let code = qc.add_qreg("code", self.num_physical_qubits());
        let check = qc.add_qreg("check", self.num_syndromes());
        let syndromes = qc.add_creg("syndromes", self.num_syndromes());

        self.append_checks(&mut qc, &code.indices(), &check.indices());
        qc.barrier();
        qc.measure_many(&check.indices(), &syndromes.indices());
        for q in check.indices() {
            qc.reset(q);
        }
        qc.barrier();

        for rule in self.correction_rules() {
            let bits: Vec<ClbitId> = rule
                .syndrome_bits
                .iter()
                .map(|&b| syndromes.index(b))
                .collect();
            for &q in &rule.correction.qubits {
                if let Some(gate) = rule.correction.pauli.gate(code.index(q)) {
                    qc.conditional(&bits, rule.value, gate);
                }
            }
        }
        qc
    }

    /// Corrections the corrector applies for `syndrome` (bit `k` = syndrome bit `k`).
    /// Empty for the trivial syndrome.
    fn decode_syndrome(&self, syndrome: u64) -> Vec<Correction> {
        self.correction_rules()
            .into_iter()
            .filter(|rule| rule.matches(syndrome))
            .map(|rule| rule.correction)
            .collect()
    }
}
