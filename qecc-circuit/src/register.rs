//! Named, contiguous ranges of qubits or classical bits.

use std::ops::Range;

/// Index of a qubit inside a circuit.
pub type QubitId = usize;

/// Index of a classical bit inside a circuit.
pub type ClbitId = usize;

/// A named block of consecutive qubits or classical bits.
///
/// Registers are handed out by [`Circuit::add_qreg`](crate::Circuit::add_qreg) and
/// [`Circuit::add_creg`](crate::Circuit::add_creg). Ancillas are ordinary qubit
/// registers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Register {
    name: String,
    offset: usize,
    size: usize,
}

impl Register {
    pub(crate) fn new(name: impl Into<String>, offset: usize, size: usize) -> Self {
        Self {
            name: name.into(),
            offset,
            size,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Position of the first bit in the owning circuit.
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Circuit-level index of the `i`-th bit of this register.
    ///
    /// # Panics
    ///
    /// Panics if `i` is not smaller than the register size.
    pub fn index(&self, i: usize) -> usize {
        assert!(
            i < self.size,
            "index {} out of range for register '{}' of size {}",
            i,
            self.name,
            self.size
        );
        self.offset + i
    }

    /// All circuit-level indices, in register order.
    pub fn indices(&self) -> Vec<usize> {
        (self.offset..self.offset + self.size).collect()
    }

    /// Circuit-level indices of a sub-range of this register.
    ///
    /// # Panics
    ///
    /// Panics if the range extends past the end of the register.
    pub fn slice(&self, range: Range<usize>) -> Vec<usize> {
        assert!(
            range.end <= self.size,
            "range {:?} out of bounds for register '{}' of size {}",
            range,
            self.name,
            self.size
        );
        range.map(|i| self.offset + i).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_are_offset() {
        let reg = Register::new("check", 9, 4);
        assert_eq!(reg.indices(), vec![9, 10, 11, 12]);
        assert_eq!(reg.index(2), 11);
        assert_eq!(reg.slice(1..3), vec![10, 11]);
        assert_eq!(reg.len(), 4);
        assert!(!reg.is_empty());
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn index_past_end_panics() {
        Register::new("code", 0, 5).index(5);
    }
}
