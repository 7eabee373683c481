//! Histogram of classical outcomes.

use std::collections::BTreeMap;
use std::fmt;

use crate::register::Register;

/// Occurrences of each full classical outcome. Bit `k` of a key is classical bit `k`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Counts {
    num_clbits: usize,
    counts: BTreeMap<u64, usize>,
}

impl Counts {
    pub fn new(num_clbits: usize) -> Self {
        Self {
            num_clbits,
            counts: BTreeMap::new(),
        }
    }

    pub fn num_clbits(&self) -> usize {
        self.num_clbits
    }

    pub fn record(&mut self, outcome: u64) {
        self.record_n(outcome, 1);
    }

    pub fn record_n(&mut self, outcome: u64, n: usize) {
        if n > 0 {
            *self.counts.entry(outcome).or_insert(0) += n;
        }
    }

    /// Fold another histogram over the same classical memory into this one.
    pub fn merge(&mut self, other: Counts) {
        for (outcome, n) in other.counts {
            self.record_n(outcome, n);
        }
    }

    pub fn get(&self, outcome: u64) -> usize {
        self.counts.get(&outcome).copied().unwrap_or(0)
    }

    /// Number of shots recorded.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Number of distinct outcomes.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u64, usize)> + '_ {
        self.counts.iter().map(|(&k, &v)| (k, v))
    }

    /// Restrict outcomes to the bits of `register`; bit `k` of a new key is the
    /// register's bit `k`.
    pub fn marginal(&self, register: &Register) -> Counts {
        let mut out = Counts::new(register.len());
        for (outcome, n) in self.iter() {
            out.record_n(extract_bits(outcome, register.offset(), register.len()), n);
        }
        out
    }

    /// Outcomes as bit strings with classical bit 0 rightmost.
    pub fn to_bitstrings(&self) -> Vec<(String, usize)> {
        self.iter()
            .map(|(k, v)| (bitstring(k, self.num_clbits), v))
            .collect()
    }

    /// Count of shots whose outcome satisfies `predicate`.
    pub fn count_where(&self, mut predicate: impl FnMut(u64) -> bool) -> usize {
        self.iter()
            .filter(|(k, _)| predicate(*k))
            .map(|(_, v)| v)
            .sum()
    }
}

impl fmt::Display for Counts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entries: Vec<String> = self
            .to_bitstrings()
            .into_iter()
            .map(|(s, n)| format!("{}: {}", s, n))
            .collect();
        write!(f, "{{{}}}", entries.join(", "))
    }
}

/// `width` bits of `value` starting at `offset`.
pub fn extract_bits(value: u64, offset: usize, width: usize) -> u64 {
    if width == 0 {
        return 0;
    }
    let shifted = value >> offset;
    if width >= 64 {
        shifted
    } else {
        shifted & ((1u64 << width) - 1)
    }
}

/// Render `value` as `width` binary digits, bit 0 rightmost.
pub fn bitstring(value: u64, width: usize) -> String {
    (0..width)
        .rev()
        .map(|k| if value >> k & 1 == 1 { '1' } else { '0' })
        .collect()
}

/// Inverse of [`bitstring`]. Returns `None` for characters other than `0`/`1` or more
/// than 64 digits.
pub fn parse_bitstring(s: &str) -> Option<u64> {
    if s.is_empty() || s.len() > 64 {
        return None;
    }
    u64::from_str_radix(s, 2).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bitstrings_put_bit_zero_last() {
        assert_eq!(bitstring(0b00101, 5), "00101");
        assert_eq!(bitstring(1, 3), "001");
        assert_eq!(parse_bitstring("10100"), Some(0b10100));
        assert_eq!(parse_bitstring("10a"), None);
        assert_eq!(parse_bitstring(""), None);
    }

    #[test]
    fn record_and_total() {
        let mut counts = Counts::new(3);
        counts.record(0b101);
        counts.record(0b101);
        counts.record_n(0b000, 3);
        counts.record_n(0b111, 0);
        assert_eq!(counts.total(), 5);
        assert_eq!(counts.get(0b101), 2);
        assert_eq!(counts.get(0b111), 0);
        assert_eq!(counts.len(), 2);
        assert_eq!(counts.to_string(), "{000: 3, 101: 2}");
    }

    #[test]
    fn marginal_selects_register_bits() {
        let syndromes = Register::new("syndromes", 0, 2);
        let code = Register::new("code", 2, 3);
        let mut counts = Counts::new(5);
        counts.record(0b101_11);
        counts.record(0b101_00);
        counts.record(0b000_11);

        let code_counts = counts.marginal(&code);
        assert_eq!(code_counts.get(0b101), 2);
        assert_eq!(code_counts.get(0b000), 1);

        let syndrome_counts = counts.marginal(&syndromes);
        assert_eq!(syndrome_counts.get(0b11), 2);
        assert_eq!(syndrome_counts.total(), 3);
    }

    #[test]
    fn merge_adds_counts() {
        let mut a = Counts::new(2);
        a.record(1);
        let mut b = Counts::new(2);
        b.record(1);
        b.record(2);
        a.merge(b);
        assert_eq!(a.get(1), 2);
        assert_eq!(a.get(2), 1);
        assert_eq!(a.count_where(|k| k != 0), 3);
    }
}
