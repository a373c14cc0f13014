//! One-call driver for running a Grover search on the simulator.

use rand::{ rngs::StdRng, SeedableRng };
use tracing::info;
use crate::{
    bits,
    circuit::Circuit,
    counts::Counts,
    error::{ DomainError, Result },
    grover,
    state,
};

/// Parameters of a single search.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SearchConfig {
    /// Number of qubits.
    pub n: usize,
    /// Basis index to search for.
    pub marked: usize,
    /// Number of measurement samples.
    pub shots: usize,
    /// Number of oracle + diffuser rounds; `None` defers to
    /// [`grover::recommended_iterations`].
    pub iterations: Option<usize>,
    /// Seed for the sampling generator; `None` draws from system entropy.
    pub seed: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { n: 2, marked: 1, shots: 1024, iterations: None, seed: None }
    }
}

impl SearchConfig {
    /// Check all parameters, failing on the first invalid one.
    pub fn validate(&self) -> Result<()> {
        bits::check_index(self.marked, self.n)?;
        if self.shots == 0 {
            return Err(DomainError::ZeroCount { what: "shots" }.into());
        }
        if self.iterations == Some(0) {
            return Err(DomainError::ZeroCount { what: "iterations" }.into());
        }
        Ok(())
    }

    /// Return the number of rounds actually used.
    pub fn iterations(&self) -> usize {
        self.iterations
            .unwrap_or_else(|| grover::recommended_iterations(self.n))
    }
}

/// Everything produced by one search.
#[derive(Clone, Debug)]
pub struct SearchOutcome {
    /// The circuit that was simulated.
    pub circuit: Circuit,
    /// Number of oracle + diffuser rounds in `circuit`.
    pub iterations: usize,
    /// Measurement tallies.
    pub counts: Counts,
}

impl SearchOutcome {
    /// Return the observed frequency of the marked bitstring.
    pub fn success_rate(&self, marked: usize) -> Result<f64> {
        let bits = bits::to_bitstring(marked, self.circuit.num_qubits())?;
        Ok(self.counts.frequency(&bits))
    }
}

/// Main driver holding a validated configuration and its random number
/// generator.
///
/// Repeated calls to [`Self::run`] continue the same random stream, so a seeded
/// driver yields a reproducible sequence of outcomes.
#[derive(Clone, Debug)]
pub struct GroverSearch {
    config: SearchConfig,
    rng: StdRng,
}

impl GroverSearch {
    /// Validate `config` and seed the internal generator.
    pub fn new(config: SearchConfig) -> Result<Self> {
        config.validate()?;
        let rng
            = config.seed.map(StdRng::seed_from_u64)
            .unwrap_or_else(StdRng::from_entropy);
        Ok(Self { config, rng })
    }

    pub fn config(&self) -> &SearchConfig { &self.config }

    /// Build the search circuit and sample it.
    pub fn run(&mut self) -> Result<SearchOutcome> {
        let SearchConfig { n, marked, shots, .. } = self.config;
        let iterations = self.config.iterations();
        info!(n, dim = 1_usize << n, marked, iterations, shots, "running Grover search");
        let circuit = grover::build_grover_circuit(n, marked, iterations)?;
        let counts = state::simulate(&circuit, shots, &mut self.rng)?;
        Ok(SearchOutcome { circuit, iterations, counts })
    }
}
