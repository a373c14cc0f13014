//! Tallies of measurement outcomes keyed by bitstring.

use std::fmt;
use itertools::Itertools;
use rustc_hash::FxHashMap;
use crate::{
    bits,
    error::Result,
};

/// Mapping from measured bitstrings to the number of shots that produced
/// them.
///
/// Only outcomes that occurred at least once are stored.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Counts {
    n: usize,
    data: FxHashMap<String, usize>,
}

impl Counts {
    /// Build from a dense tally indexed by basis index.
    pub fn from_tally(n: usize, tally: &[usize]) -> Result<Self> {
        let mut data: FxHashMap<String, usize> = FxHashMap::default();
        for (index, count) in tally.iter().enumerate().filter(|(_, c)| **c > 0) {
            data.insert(bits::to_bitstring(index, n)?, *count);
        }
        Ok(Self { n, data })
    }

    /// Return the number of qubits each outcome describes.
    pub fn num_qubits(&self) -> usize { self.n }

    /// Return the number of distinct outcomes observed.
    pub fn len(&self) -> usize { self.data.len() }

    pub fn is_empty(&self) -> bool { self.data.is_empty() }

    /// Return the count for a bitstring, zero if it never occurred.
    pub fn get(&self, bits: &str) -> usize {
        self.data.get(bits).copied().unwrap_or(0)
    }

    /// Return the count for a basis index.
    pub fn get_index(&self, index: usize) -> Result<usize> {
        Ok(self.get(&bits::to_bitstring(index, self.n)?))
    }

    /// Return the total number of shots.
    pub fn total(&self) -> usize { self.data.values().sum() }

    /// Return the observed frequency of a bitstring.
    pub fn frequency(&self, bits: &str) -> f64 {
        match self.total() {
            0 => 0.0,
            t => self.get(bits) as f64 / t as f64,
        }
    }

    /// Iterate over all `(bitstring, count)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> + '_ {
        self.data.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Return all outcomes sorted by descending count, ties broken by
    /// bitstring.
    pub fn ranked(&self) -> Vec<(&str, usize)> {
        self.iter()
            .sorted_by(|(ka, va), (kb, vb)| vb.cmp(va).then(ka.cmp(kb)))
            .collect()
    }

    /// Return the most frequent outcome, if any.
    pub fn most_frequent(&self) -> Option<(&str, usize)> {
        self.ranked().into_iter().next()
    }

    /// Return `true` if `bits` strictly outnumbers every other outcome.
    pub fn is_unique_max(&self, bits: &str) -> bool {
        let c = self.get(bits);
        c > 0 && self.iter().all(|(k, v)| k == bits || v < c)
    }
}

/// Prints in `{"bits": count, ...}` form, ordered by bitstring.
impl fmt::Display for Counts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        let body
            = self.data.iter()
            .sorted_by(|(ka, _), (kb, _)| ka.cmp(kb))
            .map(|(k, v)| format!("{:?}: {}", k, v))
            .join(", ");
        write!(f, "{}}}", body)
    }
}
