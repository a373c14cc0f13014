//! Flat gate-list circuits with named sub-circuit blocks and a terminal
//! measurement step.
//!
//! Sub-circuits are composed by inlining: appending a [`Circuit`] to another
//! copies its gates, shifted by a qubit offset, into the parent's gate list.
//! The parent remembers where each named block starts and ends, but only for
//! rendering; nothing downstream needs nested circuit objects.

use std::fmt;
use rustc_hash::FxHashMap;
use crate::{
    bits,
    decompose,
    error::{ DomainError, Result },
    gate::Gate,
};

/// Record of a named sub-circuit inlined into a parent circuit.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Block {
    /// Name of the inlined sub-circuit.
    pub name: String,
    /// Position of the block's first gate in the parent.
    pub start: usize,
    /// Number of gates in the block.
    pub len: usize,
    /// Qubit offset at which the block was inlined.
    pub offset: usize,
}

/// An ordered sequence of [`Gate`]s on a fixed number of qubits, optionally
/// terminated by a measurement of every qubit.
///
/// All gates held by a `Circuit` are guaranteed to act only on qubits with
/// index less than [`Self::num_qubits`] and never to name the same qubit twice.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Circuit {
    n: usize,
    name: Option<String>,
    gates: Vec<Gate>,
    blocks: Vec<Block>,
    measured: bool,
}

impl IntoIterator for Circuit {
    type Item = Gate;
    type IntoIter = <Vec<Gate> as IntoIterator>::IntoIter;

    fn into_iter(self) -> Self::IntoIter { self.gates.into_iter() }
}

impl<'a> IntoIterator for &'a Circuit {
    type Item = &'a Gate;
    type IntoIter = <&'a Vec<Gate> as IntoIterator>::IntoIter;

    fn into_iter(self) -> Self::IntoIter { self.gates.iter() }
}

impl Circuit {
    /// Create a new, empty circuit on `n` qubits.
    ///
    /// Fails if `n` is zero or larger than [`bits::MAX_QUBITS`].
    pub fn new(n: usize) -> Result<Self> {
        bits::dim(n)?;
        Ok(Self { n, name: None, gates: Vec::new(), blocks: Vec::new(), measured: false })
    }

    /// Like [`Self::new`], but attaching a name used when the circuit is
    /// rendered or inlined into another.
    pub fn named<S>(n: usize, name: S) -> Result<Self>
    where S: Into<String>
    {
        let mut circ = Self::new(n)?;
        circ.name = Some(name.into());
        Ok(circ)
    }

    /// Return the number of qubits.
    pub fn num_qubits(&self) -> usize { self.n }

    /// Return the number of classical output bits: `n` once measured, else 0.
    pub fn num_clbits(&self) -> usize { if self.measured { self.n } else { 0 } }

    pub fn name(&self) -> Option<&str> { self.name.as_deref() }

    pub fn gates(&self) -> &[Gate] { &self.gates }

    pub fn blocks(&self) -> &[Block] { &self.blocks }

    pub fn len(&self) -> usize { self.gates.len() }

    pub fn is_empty(&self) -> bool { self.gates.is_empty() }

    /// Return `true` if the terminal measurement step has been added.
    pub fn is_measured(&self) -> bool { self.measured }

    /// Append a single gate.
    pub fn push(&mut self, gate: Gate) -> Result<&mut Self> {
        if self.measured {
            return Err(DomainError::AlreadyMeasured.into());
        }
        gate.validate(self.n)?;
        self.gates.push(gate);
        Ok(self)
    }

    /// Append a Hadamard on qubit `k`.
    pub fn h(&mut self, k: usize) -> Result<&mut Self> { self.push(Gate::H(k)) }

    /// Append an X on qubit `k`.
    pub fn x(&mut self, k: usize) -> Result<&mut Self> { self.push(Gate::X(k)) }

    /// Append a Z on qubit `k`.
    pub fn z(&mut self, k: usize) -> Result<&mut Self> { self.push(Gate::Z(k)) }

    /// Append an X on `target` controlled on all of `controls`.
    pub fn mcx(&mut self, controls: &[usize], target: usize)
        -> Result<&mut Self>
    {
        self.push(Gate::mcx(controls.iter().copied(), target))
    }

    /// Append a Hadamard on every qubit.
    pub fn h_all(&mut self) -> Result<&mut Self> {
        (0..self.n).try_for_each(|k| self.h(k).map(|_| ()))?;
        Ok(self)
    }

    /// Append an X on every qubit.
    pub fn x_all(&mut self) -> Result<&mut Self> {
        (0..self.n).try_for_each(|k| self.x(k).map(|_| ()))?;
        Ok(self)
    }

    /// Inline all gates of `sub` into `self`, mapping qubit `k` of `sub` to
    /// qubit `offset + k` of `self`.
    ///
    /// `sub` must not carry a measurement step and must fit within `self` at
    /// the given offset. If `sub` is named, a [`Block`] is recorded.
    pub fn append(&mut self, sub: &Circuit, offset: usize) -> Result<&mut Self> {
        if self.measured || sub.measured {
            return Err(DomainError::AlreadyMeasured.into());
        }
        if offset + sub.n > self.n {
            return Err(
                DomainError::QubitOutOfRange { qubit: offset + sub.n - 1, n: self.n }
                    .into()
            );
        }
        let start = self.gates.len();
        self.gates.extend(sub.gates.iter().map(|g| g.shifted(offset)));
        if let (Some(name), false) = (&sub.name, sub.is_empty()) {
            self.blocks.push(
                Block { name: name.clone(), start, len: sub.len(), offset });
        }
        Ok(self)
    }

    /// Add the terminal measurement of every qubit into its own classical
    /// bit. No gates may be appended afterward.
    pub fn measure_all(&mut self) -> Result<&mut Self> {
        if self.measured {
            return Err(DomainError::AlreadyMeasured.into());
        }
        self.measured = true;
        Ok(self)
    }

    /// Count the gates of each kind, keyed by [`Gate::name`].
    pub fn count_ops(&self) -> FxHashMap<&'static str, usize> {
        let mut ops: FxHashMap<&'static str, usize> = FxHashMap::default();
        self.gates.iter()
            .for_each(|g| { *ops.entry(g.name()).or_insert(0) += 1; });
        if self.measured {
            ops.insert("measure", self.n);
        }
        ops
    }

    /// Return a copy of `self` in which every multi-controlled X with more than
    /// two controls is lowered to Toffoli gates, borrowing idle qubits from
    /// `ancillas`.
    ///
    /// See [`decompose::lower_mcx`].
    pub fn lower_mcx(&self, ancillas: &[usize]) -> Result<Self> {
        let mut gates: Vec<Gate> = Vec::with_capacity(self.gates.len());
        for gate in self.gates.iter() {
            gates.extend(decompose::lower_mcx(gate, ancillas)?);
        }
        for gate in gates.iter() { gate.validate(self.n)?; }
        Ok(Self {
            n: self.n,
            name: self.name.clone(),
            gates,
            blocks: Vec::new(),
            measured: self.measured,
        })
    }
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} [{} qubit(s), {} clbit(s), {} gate(s)]",
            self.name.as_deref().unwrap_or("circuit"),
            self.n,
            self.num_clbits(),
            self.gates.len(),
        )?;
        let mut blocks = self.blocks.iter().peekable();
        let mut indent = "  ";
        for (k, gate) in self.gates.iter().enumerate() {
            if let Some(block) = blocks.next_if(|b| b.start == k) {
                writeln!(f, "  {}:", block.name)?;
                indent = "    ";
            }
            writeln!(f, "{}{}", indent, gate)?;
            if self.blocks.iter().any(|b| b.start + b.len == k + 1) {
                indent = "  ";
            }
        }
        if self.measured {
            write!(f, "  measure(0..{}) -> c[0..{}]", self.n, self.n)?;
        }
        Ok(())
    }
}
