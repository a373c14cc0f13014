//! The fixed gate vocabulary needed for amplitude amplification.
//!
//! Qubit indices follow the bitstring convention of [`crate::bits`]: qubit 0 is
//! the most significant (leftmost) bit of a basis index.

use std::fmt;
use itertools::Itertools;
use crate::error::{ DomainError, Result };

/// Description of a single gate for a register of `n` qubits.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Gate {
    /// Hadamard
    H(usize),
    /// π rotation about X
    X(usize),
    /// π rotation about Z
    Z(usize),
    /// Multiply-controlled π rotation about X.
    ///
    /// The target is flipped iff every control qubit is ∣1⟩. With no controls
    /// this is equivalent to `X(target)`.
    MCX {
        controls: Vec<usize>,
        target: usize,
    },
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::H(k) => write!(f, "H({})", k),
            Self::X(k) => write!(f, "X({})", k),
            Self::Z(k) => write!(f, "Z({})", k),
            Self::MCX { controls, target }
                => write!(f, "MCX([{}], {})", controls.iter().join(", "), target),
        }
    }
}

impl Gate {
    /// Shorthand for a multi-controlled X.
    pub fn mcx<I>(controls: I, target: usize) -> Self
    where I: IntoIterator<Item = usize>
    {
        Self::MCX { controls: controls.into_iter().collect(), target }
    }

    /// Shorthand for a Toffoli (doubly controlled X).
    pub fn toffoli(c0: usize, c1: usize, target: usize) -> Self {
        Self::MCX { controls: vec![c0, c1], target }
    }

    /// Return `true` if `self` is `H`.
    pub fn is_h(&self) -> bool { matches!(self, Self::H(..)) }

    /// Return `true` if `self` is `X`.
    pub fn is_x(&self) -> bool { matches!(self, Self::X(..)) }

    /// Return `true` if `self` is `Z`.
    pub fn is_z(&self) -> bool { matches!(self, Self::Z(..)) }

    /// Return `true` if `self` is `MCX`.
    pub fn is_mcx(&self) -> bool { matches!(self, Self::MCX { .. }) }

    /// Short name of the gate kind, used for operation tallies.
    pub fn name(&self) -> &'static str {
        match self {
            Self::H(..) => "h",
            Self::X(..) => "x",
            Self::Z(..) => "z",
            Self::MCX { .. } => "mcx",
        }
    }

    /// The qubit acted upon non-trivially (the target, for `MCX`).
    pub fn target(&self) -> usize {
        match self {
            Self::H(k) | Self::X(k) | Self::Z(k) => *k,
            Self::MCX { target, .. } => *target,
        }
    }

    /// Iterate over every qubit index the gate touches, controls first.
    pub fn qubits(&self) -> impl Iterator<Item = usize> + '_ {
        let controls: &[usize]
            = match self {
                Self::MCX { controls, .. } => controls,
                _ => &[],
            };
        controls.iter().copied().chain(std::iter::once(self.target()))
    }

    /// Return a copy of `self` with every qubit index shifted up by `offset`.
    pub fn shifted(&self, offset: usize) -> Self {
        match self {
            Self::H(k) => Self::H(k + offset),
            Self::X(k) => Self::X(k + offset),
            Self::Z(k) => Self::Z(k + offset),
            Self::MCX { controls, target }
                => Self::MCX {
                    controls: controls.iter().map(|c| c + offset).collect(),
                    target: target + offset,
                },
        }
    }

    /// Check that all qubit indices are less than `n` and that no qubit
    /// appears twice.
    pub fn validate(&self, n: usize) -> Result<()> {
        if let Some(qubit) = self.qubits().find(|q| *q >= n) {
            return Err(DomainError::QubitOutOfRange { qubit, n }.into());
        }
        if let Some(qubit) = self.qubits().duplicates().next() {
            return Err(
                DomainError::RepeatedQubit { qubit, gate: self.clone() }.into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::GroverError;

    #[test]
    fn display() {
        assert_eq!(Gate::H(2).to_string(), "H(2)");
        assert_eq!(Gate::mcx([0, 1], 2).to_string(), "MCX([0, 1], 2)");
        assert_eq!(Gate::mcx(Vec::new(), 0).to_string(), "MCX([], 0)");
    }

    #[test]
    fn qubits_and_shift() {
        let g = Gate::toffoli(0, 1, 2);
        assert_eq!(g.qubits().collect::<Vec<_>>(), vec![0, 1, 2]);
        assert_eq!(g.shifted(3), Gate::toffoli(3, 4, 5));
        assert_eq!(Gate::Z(1).qubits().collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn validate() {
        assert!(Gate::X(2).validate(3).is_ok());
        assert!(Gate::X(3).validate(3).unwrap_err().is_domain());
        assert_eq!(
            Gate::toffoli(0, 1, 1).validate(3),
            Err(GroverError::from(DomainError::RepeatedQubit {
                qubit: 1,
                gate: Gate::toffoli(0, 1, 1),
            })),
        );
        assert_eq!(
            Gate::mcx([0, 4], 1).validate(3),
            Err(GroverError::from(DomainError::QubitOutOfRange { qubit: 4, n: 3 })),
        );
    }
}
