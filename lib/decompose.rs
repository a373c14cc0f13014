//! Lowering of multiply-controlled X gates to Toffoli gates.
//!
//! An X gate on `target` controlled by *m* ≥ 3 qubits is rewritten as 4(*m* - 2)
//! Toffolis acting on the controls, the target, and *m* - 2 borrowed ("dirty")
//! ancilla qubits whose initial state is arbitrary and is restored at the end.
//! This is the V-chain construction of Barenco et al., "Elementary gates for
//! quantum computation", Lemma 7.2 ([arXiv:quant-ph/9503016][barenco]).
//!
//! There is no ancilla-free counterpart built from Toffolis alone: on a
//! register of *n* ≥ 4 qubits every Toffoli is an even permutation of the basis
//! states, whereas an X controlled by all *n* - 1 other qubits swaps a single
//! pair of basis states and is therefore odd. The simulator thus applies
//! [`Gate::MCX`] directly, and lowering is only possible when idle qubits are
//! around to be borrowed.
//!
//! [barenco]: https://arxiv.org/abs/quant-ph/9503016

use crate::{
    error::{ DomainError, Result },
    gate::Gate,
};

/// Lower `MCX(controls, target)` to Toffolis using exactly the given borrowed
/// qubits, which must be distinct from the controls and the target.
///
/// Gates with two or fewer controls are returned unchanged. Only the first
/// `controls.len() - 2` ancillas are used.
pub fn mcx_with_ancillas(controls: &[usize], target: usize, ancillas: &[usize])
    -> Result<Vec<Gate>>
{
    let gate = Gate::mcx(controls.iter().copied(), target);
    gate.validate(usize::MAX)?;
    let m = controls.len();
    if m <= 2 { return Ok(vec![gate]); }
    let needed = m - 2;
    if ancillas.len() < needed {
        return Err(
            DomainError::Ancillas { needed, got: ancillas.len(), gate }.into());
    }
    let a = &ancillas[..needed];
    if let Some(&qubit) = a.iter().find(|q| **q == target || controls.contains(*q)) {
        return Err(DomainError::RepeatedQubit { qubit, gate }.into());
    }
    Gate::mcx(controls.iter().chain(a).copied(), target).validate(usize::MAX)?;

    let c = controls;
    // one pass computes (or uncomputes) the AND of all but the last control
    // into the last ancilla, relative to the ancillas' initial values
    let half = |out: &mut Vec<Gate>| {
        out.push(Gate::toffoli(c[m - 1], a[m - 3], target));
        for i in (2..m - 1).rev() {
            out.push(Gate::toffoli(c[i], a[i - 2], a[i - 1]));
        }
        out.push(Gate::toffoli(c[0], c[1], a[0]));
        for i in 2..m - 1 {
            out.push(Gate::toffoli(c[i], a[i - 2], a[i - 1]));
        }
    };
    let mut out: Vec<Gate> = Vec::with_capacity(4 * needed);
    half(&mut out);
    half(&mut out);
    Ok(out)
}

/// Lower a single gate, borrowing whichever qubits in `pool` it does not
/// already act on.
///
/// Gates other than `MCX` with more than two controls pass through unchanged.
pub fn lower_mcx(gate: &Gate, pool: &[usize]) -> Result<Vec<Gate>> {
    match gate {
        Gate::MCX { controls, target } if controls.len() > 2 => {
            let free: Vec<usize>
                = pool.iter().copied()
                .filter(|q| q != target && !controls.contains(q))
                .collect();
            mcx_with_ancillas(controls, *target, &free)
        },
        _ => Ok(vec![gate.clone()]),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::state::StateVector;

    // permutation action of a list of X-type gates on a classical basis index
    fn permute(n: usize, gates: &[Gate], index: usize) -> usize {
        let mut sv = StateVector::basis(n, index).unwrap();
        gates.iter().for_each(|g| { sv.apply_gate(g).unwrap(); });
        sv.probabilities()
            .into_iter()
            .position(|p| (p - 1.0).abs() < 1e-12)
            .unwrap()
    }

    #[test]
    fn small_gates_pass_through() {
        let g = mcx_with_ancillas(&[0, 1], 2, &[]).unwrap();
        assert_eq!(g, vec![Gate::toffoli(0, 1, 2)]);
        let g = lower_mcx(&Gate::H(0), &[1, 2]).unwrap();
        assert_eq!(g, vec![Gate::H(0)]);
    }

    #[test]
    fn gate_count() {
        for m in 3..=5 {
            let controls: Vec<usize> = (0..m).collect();
            let ancillas: Vec<usize> = (m + 1..2 * m - 1).collect();
            let g = mcx_with_ancillas(&controls, m, &ancillas).unwrap();
            assert_eq!(g.len(), 4 * (m - 2));
            assert!(g.iter().all(|gk| matches!(gk, Gate::MCX { controls, .. } if controls.len() == 2)));
        }
    }

    #[test]
    fn equivalent_on_every_basis_state() {
        // 3 controls + target + 1 dirty ancilla, and 4 controls + target + 2
        for (controls, target, ancillas) in [
            (vec![0, 1, 2], 3, vec![4]),
            (vec![4, 0, 2], 1, vec![3]),
            (vec![0, 1, 2, 3], 4, vec![5, 6]),
        ] {
            let n = controls.len() + 1 + ancillas.len();
            let direct = [Gate::mcx(controls.iter().copied(), target)];
            let lowered = mcx_with_ancillas(&controls, target, &ancillas).unwrap();
            for index in 0..1 << n {
                assert_eq!(
                    permute(n, &direct, index),
                    permute(n, &lowered, index),
                    "mismatch on basis state {index:0n$b}",
                );
            }
        }
    }

    #[test]
    fn errors() {
        assert!(mcx_with_ancillas(&[0, 1, 2], 3, &[]).unwrap_err().is_domain());
        assert!(mcx_with_ancillas(&[0, 1, 2], 3, &[2]).unwrap_err().is_domain());
        assert!(mcx_with_ancillas(&[0, 1, 1], 3, &[4]).unwrap_err().is_domain());
        // full-width gate: nothing left to borrow
        let g = Gate::mcx([0, 1, 2], 3);
        assert!(lower_mcx(&g, &[0, 1, 2, 3]).unwrap_err().is_domain());
    }
}
