//! Dense state-vector simulation of [`Circuit`]s.
//!
//! An *n*-qubit state is held as the full vector of 2<sup>*n*</sup> complex
//! amplitudes, indexed by basis index with qubit 0 as the most significant bit.
//! Gates act in place by visiting each affected pair of amplitudes once, so a
//! single gate costs *O*(2<sup>*n*</sup>) time and no extra memory; this is
//! what limits the register size, not correctness.
//!
//! Every gate in the vocabulary is unitary, so the total probability must stay
//! at 1. [`StateVector::apply_circuit`] checks this after each gate and reports
//! any drift as an [`InvariantError`] rather than renormalizing.
//!
//! # Example
//! ```
//! use grover_sim::{ circuit::Circuit, state::StateVector };
//!
//! let mut circ = Circuit::new(2).unwrap();
//! circ.h(0).unwrap().mcx(&[0], 1).unwrap();
//!
//! let mut state = StateVector::new(2).unwrap();
//! state.apply_circuit(&circ).unwrap();
//! let probs = state.probabilities();
//! assert!((probs[0b00] - 0.5).abs() < 1e-12);
//! assert!((probs[0b11] - 0.5).abs() < 1e-12);
//! ```

use std::fmt;
use num_complex::Complex64 as C64;
use rand::{
    distributions::{ Distribution, WeightedIndex },
    rngs::StdRng,
    Rng,
    SeedableRng,
};
use tracing::{ debug, trace };
use crate::{
    bits::{ self, qubit_mask },
    circuit::Circuit,
    counts::Counts,
    error::{ DomainError, InvariantError, Result },
    gate::Gate,
};

/// Largest tolerated deviation of the total probability from 1.
pub const NORM_TOL: f64 = 1e-9;

/// A pure state of `n` qubits as a dense vector of complex amplitudes.
#[derive(Clone, Debug, PartialEq)]
pub struct StateVector {
    n: usize,
    amps: Vec<C64>,
}

impl StateVector {
    /// Create a new state initialized to ∣0...0⟩.
    pub fn new(n: usize) -> Result<Self> { Self::basis(n, 0) }

    /// Create a new state initialized to the basis state ∣`index`⟩.
    pub fn basis(n: usize, index: usize) -> Result<Self> {
        bits::check_index(index, n)?;
        let mut amps: Vec<C64> = vec![C64::new(0.0, 0.0); 1 << n];
        amps[index] = C64::new(1.0, 0.0);
        Ok(Self { n, amps })
    }

    /// Create a state directly from a list of amplitudes, whose length must be
    /// a power of two.
    ///
    /// The amplitudes are taken as-is; no normalization is performed or
    /// checked.
    pub fn from_amplitudes(amps: Vec<C64>) -> Result<Self> {
        let len = amps.len();
        let n = len.trailing_zeros() as usize;
        if !len.is_power_of_two() || bits::dim(n).is_err() {
            return Err(DomainError::Dimension { len }.into());
        }
        Ok(Self { n, amps })
    }

    /// Return the number of qubits.
    pub fn num_qubits(&self) -> usize { self.n }

    /// Return the amplitudes, indexed by basis index.
    pub fn amplitudes(&self) -> &[C64] { &self.amps }

    /// Return the total probability Σ<sub>*k*</sub> |*a*<sub>*k*</sub>|².
    pub fn norm_sqr(&self) -> f64 {
        self.amps.iter().map(|a| a.norm_sqr()).sum()
    }

    /// Return the probability of measuring each basis index.
    pub fn probabilities(&self) -> Vec<f64> {
        self.amps.iter().map(|a| a.norm_sqr()).collect()
    }

    /// Apply a single gate in place.
    pub fn apply_gate(&mut self, gate: &Gate) -> Result<&mut Self> {
        gate.validate(self.n)?;
        match gate {
            Gate::H(k) => self.apply_h(*k),
            Gate::X(k) => self.apply_x(*k),
            Gate::Z(k) => self.apply_z(*k),
            Gate::MCX { controls, target } => self.apply_mcx(controls, *target),
        };
        Ok(self)
    }

    /// Apply every gate of `circuit` in order, checking after each that the
    /// total probability is still 1 to within [`NORM_TOL`].
    ///
    /// The circuit's measurement step, if any, is not performed here; see
    /// [`Self::sample`].
    pub fn apply_circuit(&mut self, circuit: &Circuit) -> Result<&mut Self> {
        if circuit.num_qubits() != self.n {
            return Err(DomainError::QubitCount {
                expected: self.n,
                got: circuit.num_qubits(),
            }.into());
        }
        for (position, gate) in circuit.gates().iter().enumerate() {
            self.apply_gate(gate)?;
            let norm = self.norm_sqr();
            trace!(position, %gate, norm, "applied gate");
            self.check_norm(position, gate, norm)?;
        }
        Ok(self)
    }

    fn check_norm(&self, position: usize, gate: &Gate, norm: f64) -> Result<()> {
        if (norm - 1.0).abs() <= NORM_TOL {
            Ok(())
        } else {
            Err(InvariantError::Normalization {
                position,
                gate: gate.clone(),
                norm,
                tol: NORM_TOL,
            }.into())
        }
    }

    /// Draw `shots` independent measurement outcomes of all qubits in the
    /// computational basis and tally them by bitstring.
    ///
    /// The state itself is left untouched.
    pub fn sample<R>(&self, shots: usize, rng: &mut R) -> Result<Counts>
    where R: Rng + ?Sized
    {
        let dist
            = WeightedIndex::new(self.amps.iter().map(|a| a.norm_sqr()))
            .map_err(|err| InvariantError::Distribution(err.to_string()))?;
        let mut tally: Vec<usize> = vec![0; self.amps.len()];
        (0..shots).for_each(|_| { tally[dist.sample(rng)] += 1; });
        Counts::from_tally(self.n, &tally)
    }

    fn apply_h(&mut self, k: usize) {
        use std::f64::consts::FRAC_1_SQRT_2;
        let mask = qubit_mask(k, self.n);
        let mut a: C64;
        let mut b: C64;
        for i in (0..self.amps.len()).filter(|i| i & mask == 0) {
            a = self.amps[i];
            b = self.amps[i | mask];
            self.amps[i] = (a + b) * FRAC_1_SQRT_2;
            self.amps[i | mask] = (a - b) * FRAC_1_SQRT_2;
        }
    }

    fn apply_x(&mut self, k: usize) {
        let mask = qubit_mask(k, self.n);
        for i in (0..self.amps.len()).filter(|i| i & mask == 0) {
            self.amps.swap(i, i | mask);
        }
    }

    fn apply_z(&mut self, k: usize) {
        let mask = qubit_mask(k, self.n);
        self.amps.iter_mut()
            .enumerate()
            .filter(|(i, _)| i & mask != 0)
            .for_each(|(_, a)| { *a = -*a; });
    }

    // swap target-0 and target-1 amplitudes on the subspace where every
    // control is 1
    fn apply_mcx(&mut self, controls: &[usize], target: usize) {
        let cmask: usize
            = controls.iter()
            .fold(0, |acc, c| acc | qubit_mask(*c, self.n));
        let tmask = qubit_mask(target, self.n);
        for i in (0..self.amps.len()).filter(|i| i & cmask == cmask && i & tmask == 0) {
            self.amps.swap(i, i | tmask);
        }
    }
}

impl fmt::Display for StateVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (k, a) in self.amps.iter().enumerate() {
            if a.norm_sqr() < NORM_TOL { continue; }
            if !first { write!(f, " ")?; }
            write!(f, "{:+.5}{:+.5}i∣{:0width$b}⟩", a.re, a.im, k, width = self.n)?;
            first = false;
        }
        if first { write!(f, "0")?; }
        Ok(())
    }
}

/// Simulate `circuit` from ∣0...0⟩ and sample `shots` outcomes of its terminal
/// measurement using `rng`.
///
/// State evolution is deterministic; only the sampling consumes randomness.
/// Fails if the circuit has no measurement step, if `shots` is zero, or if the
/// state loses normalization along the way.
pub fn simulate<R>(circuit: &Circuit, shots: usize, rng: &mut R) -> Result<Counts>
where R: Rng + ?Sized
{
    if !circuit.is_measured() {
        return Err(DomainError::NotMeasured.into());
    }
    if shots == 0 {
        return Err(DomainError::ZeroCount { what: "shots" }.into());
    }
    let mut state = StateVector::new(circuit.num_qubits())?;
    state.apply_circuit(circuit)?;
    let counts = state.sample(shots, rng)?;
    debug!(
        qubits = circuit.num_qubits(),
        gates = circuit.len(),
        shots,
        outcomes = counts.len(),
        "simulated circuit"
    );
    Ok(counts)
}

/// Like [`simulate`], but with an internal generator seeded from `seed`, or
/// from system entropy if `seed` is `None`.
pub fn simulate_seeded(circuit: &Circuit, shots: usize, seed: Option<u64>)
    -> Result<Counts>
{
    let mut rng
        = seed.map(StdRng::seed_from_u64)
        .unwrap_or_else(StdRng::from_entropy);
    simulate(circuit, shots, &mut rng)
}

#[cfg(test)]
mod test {
    use super::*;
    use std::f64::consts::FRAC_1_SQRT_2;

    fn close(a: C64, b: C64) -> bool { (a - b).norm() < 1e-12 }

    #[test]
    fn single_qubit_gates() {
        let mut sv = StateVector::new(2).unwrap();
        sv.apply_gate(&Gate::X(0)).unwrap();
        assert!(close(sv.amplitudes()[0b10], C64::new(1.0, 0.0)));
        sv.apply_gate(&Gate::Z(0)).unwrap();
        assert!(close(sv.amplitudes()[0b10], C64::new(-1.0, 0.0)));
        sv.apply_gate(&Gate::H(1)).unwrap();
        assert!(close(sv.amplitudes()[0b10], C64::new(-FRAC_1_SQRT_2, 0.0)));
        assert!(close(sv.amplitudes()[0b11], C64::new(-FRAC_1_SQRT_2, 0.0)));
        sv.apply_gate(&Gate::H(1)).unwrap();
        assert!(close(sv.amplitudes()[0b10], C64::new(-1.0, 0.0)));
        assert!(sv.apply_gate(&Gate::H(2)).unwrap_err().is_domain());
    }

    #[test]
    fn mcx_flips_only_when_all_controls_set() {
        for index in 0..8 {
            let mut sv = StateVector::basis(3, index).unwrap();
            sv.apply_gate(&Gate::mcx([0, 2], 1)).unwrap();
            let expected = if index & 0b101 == 0b101 { index ^ 0b010 } else { index };
            assert!(close(sv.amplitudes()[expected], C64::new(1.0, 0.0)));
        }
        // no controls acts as a plain X
        let mut sv = StateVector::new(1).unwrap();
        sv.apply_gate(&Gate::mcx(Vec::new(), 0)).unwrap();
        assert!(close(sv.amplitudes()[1], C64::new(1.0, 0.0)));
    }

    #[test]
    fn normalization_violation_is_reported() {
        let amps = vec![C64::new(1.0, 0.0), C64::new(0.5, 0.0)];
        let mut sv = StateVector::from_amplitudes(amps).unwrap();
        let mut circ = Circuit::new(1).unwrap();
        circ.x(0).unwrap();
        let err = sv.apply_circuit(&circ).unwrap_err();
        assert!(err.is_invariant());
        assert!(StateVector::from_amplitudes(vec![C64::new(1.0, 0.0); 3]).is_err());
    }

    #[test]
    fn sampling_is_seeded() {
        let mut circ = Circuit::new(3).unwrap();
        circ.h_all().unwrap().measure_all().unwrap();
        let a = simulate_seeded(&circ, 500, Some(10546)).unwrap();
        let b = simulate_seeded(&circ, 500, Some(10546)).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.total(), 500);
        assert!(a.len() <= 8);
    }

    #[test]
    fn simulate_requires_measurement() {
        let mut circ = Circuit::new(1).unwrap();
        circ.h(0).unwrap();
        let err = simulate_seeded(&circ, 10, Some(0)).unwrap_err();
        assert!(err.is_domain());
        circ.measure_all().unwrap();
        assert!(simulate_seeded(&circ, 1, Some(0)).is_ok());
    }

    #[test]
    fn zero_shots_rejected() {
        let mut circ = Circuit::new(2).unwrap();
        circ.h_all().unwrap().measure_all().unwrap();
        let err = simulate_seeded(&circ, 0, Some(0)).unwrap_err();
        assert_eq!(
            err,
            crate::error::GroverError::from(DomainError::ZeroCount { what: "shots" }),
        );
    }

    #[test]
    fn deterministic_outcome() {
        let mut circ = Circuit::new(2).unwrap();
        circ.x(1).unwrap().measure_all().unwrap();
        let counts = simulate_seeded(&circ, 64, None).unwrap();
        assert_eq!(counts.get("01"), 64);
        assert_eq!(counts.len(), 1);
    }

    #[test]
    fn display() {
        let mut sv = StateVector::new(2).unwrap();
        sv.apply_gate(&Gate::X(1)).unwrap();
        assert_eq!(sv.to_string(), "+1.00000+0.00000i∣01⟩");
    }
}
