//! Output modes and result projections.

use num_complex::Complex64;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Which projection of the final state a run returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OutputMode {
    /// Raw amplitudes, exactly as evolved, no normalization.
    Statevector,
    /// Probability of every basis state.
    Probabilities,
    /// One outcome bitstring per shot, in draw order.
    Memory,
    /// Occurrence tally per distinct outcome bitstring.
    #[default]
    Counts,
}

/// Aggregated measurement outcomes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Counts(FxHashMap<String, u64>);

impl Counts {
    /// Create an empty tally.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `n` occurrences of an outcome.
    pub fn insert(&mut self, outcome: impl Into<String>, n: u64) {
        *self.0.entry(outcome.into()).or_insert(0) += n;
    }

    /// Occurrences of an outcome; zero when absent.
    pub fn get(&self, outcome: &str) -> u64 {
        self.0.get(outcome).copied().unwrap_or(0)
    }

    /// Total occurrences across all outcomes.
    pub fn total(&self) -> u64 {
        self.0.values().sum()
    }

    /// Number of distinct outcomes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check whether any outcome has been recorded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over `(outcome, occurrences)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &u64)> {
        self.0.iter()
    }
}

impl FromIterator<(String, u64)> for Counts {
    fn from_iter<I: IntoIterator<Item = (String, u64)>>(iter: I) -> Self {
        let mut counts = Counts::new();
        for (outcome, n) in iter {
            counts.insert(outcome, n);
        }
        counts
    }
}

/// The result of a run: exactly the projection that was requested.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SimOutput {
    /// Raw amplitude sequence of length `2^num_qubits`.
    Statevector(Vec<Complex64>),
    /// Bitstring → probability, all `2^num_qubits` keys present.
    /// Qubit `num_qubits − 1` is the leftmost character.
    Probabilities(FxHashMap<String, f64>),
    /// Per-shot outcome bitstrings; length equals the shot count.
    Memory(Vec<String>),
    /// Outcome tallies; keys only for outcomes that occurred.
    Counts(Counts),
}

impl SimOutput {
    /// Get the amplitudes if this is a statevector result.
    pub fn as_statevector(&self) -> Option<&[Complex64]> {
        match self {
            SimOutput::Statevector(amps) => Some(amps),
            _ => None,
        }
    }

    /// Get the probability table if this is a probabilities result.
    pub fn as_probabilities(&self) -> Option<&FxHashMap<String, f64>> {
        match self {
            SimOutput::Probabilities(table) => Some(table),
            _ => None,
        }
    }

    /// Get the shot list if this is a memory result.
    pub fn as_memory(&self) -> Option<&[String]> {
        match self {
            SimOutput::Memory(shots) => Some(shots),
            _ => None,
        }
    }

    /// Get the tally if this is a counts result.
    pub fn as_counts(&self) -> Option<&Counts> {
        match self {
            SimOutput::Counts(counts) => Some(counts),
            _ => None,
        }
    }
}
