//! Readout noise model.
//!
//! Noise here is an approximation of measurement-time decoherence: a
//! per-qubit bit-flip probability mixed into the derived measurement
//! probabilities after evolution. Amplitudes are never touched — this
//! is not a general quantum channel.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{SimError, SimResult};

/// Per-qubit readout bit-flip probabilities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NoiseModel {
    /// One flip probability broadcast to every qubit.
    Uniform(f64),
    /// One flip probability per qubit, in qubit order. The length must
    /// equal the circuit's qubit count.
    PerQubit(Vec<f64>),
}

impl NoiseModel {
    /// Resolve to a per-qubit probability vector of length `num_qubits`.
    ///
    /// Fails on a length mismatch or any probability outside `[0, 1]`.
    pub fn resolve(&self, num_qubits: usize) -> SimResult<Vec<f64>> {
        let probs = match self {
            NoiseModel::Uniform(p) => vec![*p; num_qubits],
            NoiseModel::PerQubit(ps) => {
                if ps.len() != num_qubits {
                    return Err(SimError::NoiseLengthMismatch {
                        got: ps.len(),
                        expected: num_qubits,
                    });
                }
                ps.clone()
            }
        };
        for &p in &probs {
            if !(0.0..=1.0).contains(&p) {
                return Err(SimError::InvalidProbability(p));
            }
        }
        Ok(probs)
    }
}

impl fmt::Display for NoiseModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoiseModel::Uniform(p) => write!(f, "bit_flip(p={p:.4})"),
            NoiseModel::PerQubit(ps) => write!(f, "bit_flip(per_qubit, n={})", ps.len()),
        }
    }
}

/// Mix measurement probabilities qubit by qubit.
///
/// For qubit `j` with flip probability `p`, every index pair differing
/// only in bit `j` is mixed: `p0' = (1−p)·p0 + p·p1` and symmetrically.
/// Qubits are visited in ascending order, including those with `p = 0`.
pub(crate) fn mix_probabilities(probs: &mut [f64], flip_probs: &[f64]) {
    for (j, &p) in flip_probs.iter().enumerate() {
        let mask = 1usize << j;
        for i in 0..probs.len() {
            if i & mask == 0 {
                let k = i | mask;
                let p0 = probs[i];
                let p1 = probs[k];
                probs[i] = (1.0 - p) * p0 + p * p1;
                probs[k] = (1.0 - p) * p1 + p * p0;
            }
        }
    }
}
