//! Composable circuits: registers, gates, measurement, classical conditioning.
//!
//! A circuit is a plain value. Components such as an encoder or an error corrector are
//! built once as small circuits over their own local indices and then spliced into a
//! larger experiment with [`Circuit::compose`], which renames qubits and classical bits.

use std::sync::Arc;

use num_complex::Complex;
use smallvec::SmallVec;

use crate::error::CircuitError;
use crate::gate::{Gate, GateKind, StatePreparation};
use crate::register::{ClbitId, QubitId, Register};

/// One step of a circuit.
#[derive(Debug, Clone, PartialEq)]
pub enum Instruction {
    Gate(Gate),
    /// Projective Z-basis measurement of `qubit` into `clbit`.
    Measure { qubit: QubitId, clbit: ClbitId },
    /// Return `qubit` to `|0⟩`, discarding its state.
    Reset { qubit: QubitId },
    /// Visual separator; no effect on simulation.
    Barrier,
    /// Apply `gate` only when the bits `clbits` read `value`
    /// (bit `k` of `value` is compared with `clbits[k]`).
    Conditional {
        clbits: SmallVec<[ClbitId; 4]>,
        value: u64,
        gate: Gate,
    },
}

impl Instruction {
    pub fn name(&self) -> &'static str {
        match self {
            Instruction::Gate(gate) => gate.name(),
            Instruction::Measure { .. } => "measure",
            Instruction::Reset { .. } => "reset",
            Instruction::Barrier => "barrier",
            Instruction::Conditional { .. } => "conditional",
        }
    }

    /// The unitary carried by this instruction, conditional or not.
    pub fn gate(&self) -> Option<&Gate> {
        match self {
            Instruction::Gate(gate) | Instruction::Conditional { gate, .. } => Some(gate),
            _ => None,
        }
    }

    fn remap(&self, qubits: &[QubitId], clbits: &[ClbitId]) -> Instruction {
        match self {
            Instruction::Gate(gate) => Instruction::Gate(gate.remap(qubits)),
            Instruction::Measure { qubit, clbit } => Instruction::Measure {
                qubit: qubits[*qubit],
                clbit: clbits[*clbit],
            },
            Instruction::Reset { qubit } => Instruction::Reset {
                qubit: qubits[*qubit],
            },
            Instruction::Barrier => Instruction::Barrier,
            Instruction::Conditional {
                clbits: bits,
                value,
                gate,
            } => Instruction::Conditional {
                clbits: bits.iter().map(|&c| clbits[c]).collect(),
                value: *value,
                gate: gate.remap(qubits),
            },
        }
    }
}

/// An ordered list of instructions over a fixed number of qubits and classical bits.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Circuit {
    name: String,
    qregs: Vec<Register>,
    cregs: Vec<Register>,
    num_qubits: usize,
    num_clbits: usize,
    instructions: Vec<Instruction>,
}

impl Circuit {
    /// Empty circuit with no registers.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Circuit with a single qubit register named `q`.
    pub fn with_qubits(name: impl Into<String>, num_qubits: usize) -> Self {
        let mut circuit = Self::new(name);
        circuit.add_qreg("q", num_qubits);
        circuit
    }

    /// Allocate `size` fresh qubits after the existing ones.
    pub fn add_qreg(&mut self, name: impl Into<String>, size: usize) -> Register {
        let reg = Register::new(name, self.num_qubits, size);
        self.num_qubits += size;
        self.qregs.push(reg.clone());
        reg
    }

    /// Allocate `size` fresh classical bits after the existing ones.
    pub fn add_creg(&mut self, name: impl Into<String>, size: usize) -> Register {
        let reg = Register::new(name, self.num_clbits, size);
        self.num_clbits += size;
        self.cregs.push(reg.clone());
        reg
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    pub fn num_clbits(&self) -> usize {
        self.num_clbits
    }

    pub fn qregs(&self) -> &[Register] {
        &self.qregs
    }

    pub fn cregs(&self) -> &[Register] {
        &self.cregs
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Number of gates of `kind`, including conditional ones.
    pub fn count_gates(&self, kind: GateKind) -> usize {
        self.instructions
            .iter()
            .filter_map(Instruction::gate)
            .filter(|g| g.kind() == kind)
            .count()
    }

    /// Number of measurement instructions.
    pub fn count_measurements(&self) -> usize {
        self.instructions
            .iter()
            .filter(|i| matches!(i, Instruction::Measure { .. }))
            .count()
    }

    fn check_qubit(&self, qubit: QubitId) {
        assert!(
            qubit < self.num_qubits,
            "qubit {} out of range for circuit '{}' with {} qubits",
            qubit,
            self.name,
            self.num_qubits
        );
    }

    fn check_clbit(&self, clbit: ClbitId) {
        assert!(
            clbit < self.num_clbits,
            "classical bit {} out of range for circuit '{}' with {} bits",
            clbit,
            self.name,
            self.num_clbits
        );
    }

    /// Append a gate.
    ///
    /// # Panics
    ///
    /// Panics if an operand is out of range or a two-qubit gate uses the same qubit twice.
    pub fn apply(&mut self, gate: Gate) -> &mut Self {
        self.check_gate(&gate);
        self.instructions.push(Instruction::Gate(gate));
        self
    }

    fn check_gate(&self, gate: &Gate) {
        let qubits = gate.qubits();
        for &q in &qubits {
            self.check_qubit(q);
        }
        if let Gate::Cx { control, target } | Gate::Cz { control, target } = gate {
            assert_ne!(control, target, "control and target must differ");
        }
    }

    pub fn id(&mut self, qubit: QubitId) -> &mut Self {
        self.apply(Gate::Id(qubit))
    }

    pub fn h(&mut self, qubit: QubitId) -> &mut Self {
        self.apply(Gate::H(qubit))
    }

    pub fn x(&mut self, qubit: QubitId) -> &mut Self {
        self.apply(Gate::X(qubit))
    }

    pub fn y(&mut self, qubit: QubitId) -> &mut Self {
        self.apply(Gate::Y(qubit))
    }

    pub fn z(&mut self, qubit: QubitId) -> &mut Self {
        self.apply(Gate::Z(qubit))
    }

    pub fn cx(&mut self, control: QubitId, target: QubitId) -> &mut Self {
        self.apply(Gate::Cx { control, target })
    }

    pub fn cz(&mut self, control: QubitId, target: QubitId) -> &mut Self {
        self.apply(Gate::Cz { control, target })
    }

    /// Append an exact preparation of `amplitudes` on `qubits`, assuming they start in
    /// `|0...0⟩`. The vector is normalized; bit `k` of a basis index is `qubits[k]`.
    pub fn prepare_state(
        &mut self,
        qubits: &[QubitId],
        amplitudes: &[Complex<f64>],
    ) -> Result<&mut Self, CircuitError> {
        for &q in qubits {
            if q >= self.num_qubits {
                return Err(CircuitError::QubitOutOfRange {
                    index: q,
                    num_qubits: self.num_qubits,
                });
            }
        }
        let prep = StatePreparation::new(qubits, amplitudes)?;
        self.instructions
            .push(Instruction::Gate(Gate::Prepare(Arc::new(prep))));
        Ok(self)
    }

    pub fn measure(&mut self, qubit: QubitId, clbit: ClbitId) -> &mut Self {
        self.check_qubit(qubit);
        self.check_clbit(clbit);
        self.instructions.push(Instruction::Measure { qubit, clbit });
        self
    }

    /// Measure `qubits[k]` into `clbits[k]` for every `k`.
    pub fn measure_many(&mut self, qubits: &[QubitId], clbits: &[ClbitId]) -> &mut Self {
        assert_eq!(
            qubits.len(),
            clbits.len(),
            "measure_many needs one classical bit per qubit"
        );
        for (&q, &c) in qubits.iter().zip(clbits) {
            self.measure(q, c);
        }
        self
    }

    pub fn reset(&mut self, qubit: QubitId) -> &mut Self {
        self.check_qubit(qubit);
        self.instructions.push(Instruction::Reset { qubit });
        self
    }

    pub fn barrier(&mut self) -> &mut Self {
        self.instructions.push(Instruction::Barrier);
        self
    }

    /// Append `gate`, executed only if `clbits` read `value` at that point of the run.
    ///
    /// # Panics
    ///
    /// Panics on out-of-range operands, or if `value` does not fit in `clbits.len()` bits.
    pub fn conditional(&mut self, clbits: &[ClbitId], value: u64, gate: Gate) -> &mut Self {
        for &c in clbits {
            self.check_clbit(c);
        }
        assert!(
            clbits.len() >= 64 || value >> clbits.len() == 0,
            "value {} does not fit in {} classical bits",
            value,
            clbits.len()
        );
        self.check_gate(&gate);
        self.instructions.push(Instruction::Conditional {
            clbits: clbits.iter().copied().collect(),
            value,
            gate,
        });
        self
    }

    /// Splice `other` into this circuit. `other`'s qubit `i` becomes `qubits[i]` and its
    /// classical bit `j` becomes `clbits[j]`.
    pub fn compose(
        &mut self,
        other: &Circuit,
        qubits: &[QubitId],
        clbits: &[ClbitId],
    ) -> Result<&mut Self, CircuitError> {
        if qubits.len() != other.num_qubits {
            return Err(CircuitError::CompositionMismatch {
                name: other.name.clone(),
                what: "qubits",
                expected: other.num_qubits,
                got: qubits.len(),
            });
        }
        if clbits.len() != other.num_clbits {
            return Err(CircuitError::CompositionMismatch {
                name: other.name.clone(),
                what: "classical bits",
                expected: other.num_clbits,
                got: clbits.len(),
            });
        }
        if let Some(&q) = qubits.iter().find(|&&q| q >= self.num_qubits) {
            return Err(CircuitError::QubitOutOfRange {
                index: q,
                num_qubits: self.num_qubits,
            });
        }
        if let Some(&c) = clbits.iter().find(|&&c| c >= self.num_clbits) {
            return Err(CircuitError::ClbitOutOfRange {
                index: c,
                num_clbits: self.num_clbits,
            });
        }
        if let Some(q) = first_repeat(qubits) {
            return Err(CircuitError::DuplicateMapping {
                name: other.name.clone(),
                what: "qubit",
                index: q,
            });
        }
        if let Some(c) = first_repeat(clbits) {
            return Err(CircuitError::DuplicateMapping {
                name: other.name.clone(),
                what: "classical bit",
                index: c,
            });
        }

        self.instructions.extend(
            other
                .instructions
                .iter()
                .map(|inst| inst.remap(qubits, clbits)),
        );
        Ok(self)
    }

    /// The adjoint circuit: reversed order, each gate inverted.
    ///
    /// Fails if the circuit measures, resets or conditions on classical bits.
    pub fn inverse(&self) -> Result<Circuit, CircuitError> {
        let mut instructions = Vec::with_capacity(self.instructions.len());
        for inst in self.instructions.iter().rev() {
            match inst {
                Instruction::Gate(gate) => instructions.push(Instruction::Gate(gate.inverse())),
                Instruction::Barrier => instructions.push(Instruction::Barrier),
                other => {
                    return Err(CircuitError::NotInvertible {
                        name: self.name.clone(),
                        instruction: other.name(),
                    })
                }
            }
        }
        Ok(Circuit {
            name: format!("{}_dg", self.name),
            qregs: self.qregs.clone(),
            cregs: self.cregs.clone(),
            num_qubits: self.num_qubits,
            num_clbits: self.num_clbits,
            instructions,
        })
    }
}

fn first_repeat(indices: &[usize]) -> Option<usize> {
    indices
        .iter()
        .enumerate()
        .find(|&(i, &q)| indices[..i].contains(&q))
        .map(|(_, &q)| q)
}
