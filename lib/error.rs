//! Error types for circuit construction and simulation.
//!
//! Failures fall into two groups: [`DomainError`]s, raised when a caller asks
//! for something outside the valid parameter space (and surfaced immediately),
//! and [`InvariantError`]s, raised when the simulator observes a state that no
//! correct gate sequence could have produced.

use thiserror::Error;
use crate::gate::Gate;

/// Result type alias for this crate.
pub type Result<T> = std::result::Result<T, GroverError>;

/// Top-level error type.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GroverError {
    /// Out-of-range or otherwise invalid input.
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),

    /// Numerical invariant violated during simulation.
    #[error("invariant violated: {0}")]
    Invariant(#[from] InvariantError),
}

impl GroverError {
    /// Return `true` if `self` is `Domain`.
    pub fn is_domain(&self) -> bool { matches!(self, Self::Domain(..)) }

    /// Return `true` if `self` is `Invariant`.
    pub fn is_invariant(&self) -> bool { matches!(self, Self::Invariant(..)) }
}

/// Invalid parameters supplied by a caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Register size outside `1..=max`.
    #[error("register size {n} must be in 1..={max}")]
    RegisterSize { n: usize, max: usize },

    /// Basis index outside `[0, 2^n)`.
    #[error("index {index} out of range for {n} qubit(s) (must be < {dim})")]
    IndexOutOfRange { index: usize, n: usize, dim: usize },

    /// Gate acting on a qubit that the circuit does not have.
    #[error("qubit {qubit} out of range for a {n}-qubit circuit")]
    QubitOutOfRange { qubit: usize, n: usize },

    /// Circuit and state disagree on the number of qubits.
    #[error("expected a {expected}-qubit circuit, got {got} qubit(s)")]
    QubitCount { expected: usize, got: usize },

    /// Amplitude vector whose length is not a supported power of two.
    #[error("amplitude vector of length {len} does not describe a register")]
    Dimension { len: usize },

    /// The same qubit appears more than once in a single gate.
    #[error("qubit {qubit} appears more than once in {gate}")]
    RepeatedQubit { qubit: usize, gate: Gate },

    /// Attempted to append to a circuit after its measurement step.
    #[error("circuit has already been measured; no further gates may follow")]
    AlreadyMeasured,

    /// Attempted to sample from a circuit with no measurement step.
    #[error("circuit has no measurement step")]
    NotMeasured,

    /// A count that must be positive was zero.
    #[error("{what} must be at least 1")]
    ZeroCount { what: &'static str },

    /// String that is not a bitstring.
    #[error("malformed bitstring {0:?}")]
    Bitstring(String),

    /// Not enough borrowed qubits to lower a multi-controlled gate.
    #[error("need {needed} ancilla qubit(s) to lower {gate}, got {got}")]
    Ancillas { needed: usize, got: usize, gate: Gate },
}

/// Violation of a numerical invariant of the state vector.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvariantError {
    /// Total probability drifted away from 1 after a gate.
    #[error("norm {norm} after gate #{position} ({gate}) deviates from 1 by more than {tol:e}")]
    Normalization { position: usize, gate: Gate, norm: f64, tol: f64 },

    /// Outcome probabilities could not form a categorical distribution.
    #[error("unusable outcome distribution: {0}")]
    Distribution(String),
}
