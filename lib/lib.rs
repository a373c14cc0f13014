//! Tools for demonstrating Grover's search on a small register of qubits.
//!
//! Circuits are built from a fixed vocabulary of *H*, *X*, *Z*, and
//! multiply-controlled *X* gates and executed on a dense state-vector
//! simulator, which samples measurement outcomes from the final state.
//!
//! # Example
//! ```
//! use grover_sim::search::{ GroverSearch, SearchConfig };
//!
//! let config = SearchConfig { n: 2, marked: 2, shots: 1024, seed: Some(1), ..Default::default() };
//! let outcome = GroverSearch::new(config).unwrap().run().unwrap();
//! assert_eq!(outcome.counts.most_frequent(), Some(("10", 1024)));
//! ```

pub mod error;
pub mod bits;
pub mod gate;
pub mod circuit;
pub mod decompose;
pub mod grover;
pub mod state;
pub mod counts;
pub mod search;

pub use error::{ DomainError, GroverError, InvariantError, Result };
pub use gate::Gate;
pub use circuit::Circuit;
pub use counts::Counts;
pub use grover::{
    apply_mcz,
    build_diffuser,
    build_grover_circuit,
    build_oracle,
    recommended_iterations,
};
pub use state::{ simulate, simulate_seeded, StateVector };
