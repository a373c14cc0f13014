//! Property-based tests over register sizes, marked indices, and seeds.

use proptest::prelude::*;
use grover_sim::{
    bits,
    build_diffuser,
    build_grover_circuit,
    build_oracle,
    grover::success_probability,
    search::{ GroverSearch, SearchConfig },
    StateVector,
};

fn n_and_marked() -> impl Strategy<Value = (usize, usize)> {
    (1usize..=5).prop_flat_map(|n| (Just(n), 0..1usize << n))
}

proptest! {
    /// Property: the oracle multiplies exactly one basis amplitude by -1
    #[test]
    fn oracle_is_single_phase_flip(
        (n, marked) in n_and_marked(),
        index in 0usize..32,
    ) {
        let index = index % (1 << n);
        let mut sv = StateVector::basis(n, index).unwrap();
        sv.apply_circuit(&build_oracle(n, marked).unwrap()).unwrap();
        let expected = if index == marked { -1.0 } else { 1.0 };
        prop_assert!((sv.amplitudes()[index].re - expected).abs() < 1e-12);
        prop_assert!((sv.norm_sqr() - 1.0).abs() < 1e-12);
    }

    /// Property: the diffuser squares to the identity on basis states
    #[test]
    fn diffuser_squares_to_identity((n, index) in n_and_marked()) {
        let diffuser = build_diffuser(n).unwrap();
        let mut sv = StateVector::basis(n, index).unwrap();
        sv.apply_circuit(&diffuser).unwrap().apply_circuit(&diffuser).unwrap();
        let expected = StateVector::basis(n, index).unwrap();
        for (a, b) in sv.amplitudes().iter().zip(expected.amplitudes()) {
            prop_assert!((a - b).norm() < 1e-9);
        }
    }

    /// Property: simulated marked-state probability matches sin²((2k + 1)θ)
    #[test]
    fn probability_matches_theory((n, marked) in n_and_marked(), iters in 0usize..6) {
        let circ = build_grover_circuit(n, marked, iters).unwrap();
        let mut sv = StateVector::new(n).unwrap();
        sv.apply_circuit(&circ).unwrap();
        let p = sv.probabilities()[marked];
        prop_assert!((p - success_probability(n, iters)).abs() < 1e-9);
    }

    /// Property: shot totals are preserved and seeded runs repeat
    #[test]
    fn seeded_search_is_reproducible(
        (n, marked) in n_and_marked(),
        shots in 1usize..500,
        seed in any::<u64>(),
    ) {
        let config = SearchConfig { n, marked, shots, iterations: None, seed: Some(seed) };
        let a = GroverSearch::new(config).unwrap().run().unwrap();
        let b = GroverSearch::new(config).unwrap().run().unwrap();
        prop_assert_eq!(a.counts.total(), shots);
        prop_assert_eq!(&a.counts, &b.counts);
        for (key, _) in a.counts.iter() {
            prop_assert_eq!(key.len(), n);
            prop_assert!(bits::from_bitstring(key).unwrap() < 1 << n);
        }
    }

    /// Property: out-of-range marked indices are always rejected
    #[test]
    fn out_of_range_marked_rejected(n in 1usize..=8, excess in 0usize..100) {
        let marked = (1 << n) + excess;
        prop_assert!(build_oracle(n, marked).unwrap_err().is_domain());
        prop_assert!(build_grover_circuit(n, marked, 1).unwrap_err().is_domain());
    }
}
