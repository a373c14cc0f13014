//! Oracle, diffuser, and full search circuits for Grover's algorithm.
//!
//! For a register of *n* qubits and *N* = 2<sup>*n*</sup> basis states, one
//! Grover iteration is a phase oracle, which flips the sign of the marked basis
//! state, followed by the diffuser, which reflects all amplitudes about their
//! mean. Starting from the uniform superposition, each iteration rotates the
//! state by an angle 2θ towards the marked state, where sin θ = 1/√*N*.
//!
//! Both the oracle and the diffuser need a phase flip conditioned on every
//! qubit being ∣1⟩. Lacking a native multiply-controlled Z, this is built from
//! the identity *H* · *X* · *H* = *Z* on the target qubit; see [`apply_mcz`].
//!
//! # Example
//! ```
//! use grover_sim::{ grover, state };
//!
//! let n = 3;
//! let iters = grover::recommended_iterations(n);
//! let circ = grover::build_grover_circuit(n, 0b101, iters).unwrap();
//! let counts = state::simulate_seeded(&circ, 2000, Some(7)).unwrap();
//! assert_eq!(counts.most_frequent().unwrap().0, "101");
//! ```

use std::f64::consts::FRAC_PI_4;
use tracing::debug;
use crate::{
    bits,
    circuit::Circuit,
    error::Result,
};

/// Append a phase flip of -1 on the subspace where `target` and every qubit
/// in `controls` is ∣1⟩.
///
/// With no controls this is a plain `Z(target)`; otherwise the target is
/// sandwiched between Hadamards around a multiply-controlled X.
pub fn apply_mcz<'a>(circuit: &'a mut Circuit, controls: &[usize], target: usize)
    -> Result<&'a mut Circuit>
{
    if controls.is_empty() {
        circuit.z(target)
    } else {
        circuit.h(target)?.mcx(controls, target)?.h(target)
    }
}

// phase flip on ∣1...1⟩ across the whole register
fn apply_all_ones_phase(circuit: &mut Circuit) -> Result<&mut Circuit> {
    let n = circuit.num_qubits();
    let controls: Vec<usize> = (0..n - 1).collect();
    apply_mcz(circuit, &controls, n - 1)
}

/// Build the phase oracle marking basis state ∣`marked_index`⟩ in an `n`-qubit
/// register.
///
/// Qubits whose bit in the marked index is 0 are complemented so that the
/// marked state becomes ∣1...1⟩, whose phase is flipped before the complement
/// is undone. No ancillas are used and nothing is measured.
///
/// Fails if `n` is not a valid register size or `marked_index` ≥ 2<sup>`n`</sup>.
pub fn build_oracle(n: usize, marked_index: usize) -> Result<Circuit> {
    let bs = bits::to_bitstring(marked_index, n)?;
    let mut circ = Circuit::named(n, format!("Oracle({})", bs))?;
    let zeros: Vec<usize>
        = bs.bytes().enumerate()
        .filter_map(|(k, b)| (b == b'0').then_some(k))
        .collect();
    for &k in zeros.iter() { circ.x(k)?; }
    apply_all_ones_phase(&mut circ)?;
    for &k in zeros.iter() { circ.x(k)?; }
    Ok(circ)
}

/// Build the diffuser (inversion about the mean) for an `n`-qubit register.
///
/// This is *H*<sup>⊗n</sup> *X*<sup>⊗n</sup> (phase flip on ∣1...1⟩)
/// *X*<sup>⊗n</sup> *H*<sup>⊗n</sup>, which is independent of the marked index
/// and is its own inverse.
pub fn build_diffuser(n: usize) -> Result<Circuit> {
    let mut circ = Circuit::named(n, "Diffuser")?;
    circ.h_all()?.x_all()?;
    apply_all_ones_phase(&mut circ)?;
    circ.x_all()?.h_all()?;
    Ok(circ)
}

/// Build the complete search circuit: uniform superposition, `iterations`
/// rounds of oracle followed by diffuser, and measurement of every qubit.
///
/// `iterations = 0` is allowed and simply measures the uniform superposition.
pub fn build_grover_circuit(n: usize, marked_index: usize, iterations: usize)
    -> Result<Circuit>
{
    let oracle = build_oracle(n, marked_index)?;
    let diffuser = build_diffuser(n)?;
    let mut circ = Circuit::named(n, "Grover")?;
    circ.h_all()?;
    for _ in 0..iterations {
        circ.append(&oracle, 0)?.append(&diffuser, 0)?;
    }
    circ.measure_all()?;
    debug!(
        n,
        marked_index,
        iterations,
        gates = circ.len(),
        "built search circuit"
    );
    Ok(circ)
}

/// Return the number of iterations ⌊(π/4)√*N*⌋ that approximately maximizes
/// the probability of measuring the marked state, but at least 1.
///
/// Meaningful for `n` in `1..=`[`bits::MAX_QUBITS`], the same range accepted
/// by [`bits::dim`]; no check is made here.
pub fn recommended_iterations(n: usize) -> usize {
    let dim = 2.0_f64.powi(n as i32);
    ((FRAC_PI_4 * dim.sqrt()).floor() as usize).max(1)
}

/// Return the exact probability of measuring the marked state after
/// `iterations` rounds on an `n`-qubit register, sin²((2*k* + 1)θ) with
/// sin θ = 1/√*N*.
///
/// Like [`recommended_iterations`], `n` should lie in `1..=`[`bits::MAX_QUBITS`].
pub fn success_probability(n: usize, iterations: usize) -> f64 {
    let theta = (2.0_f64.powi(n as i32)).sqrt().recip().asin();
    ((2 * iterations + 1) as f64 * theta).sin().powi(2)
}
