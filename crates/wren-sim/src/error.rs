//! Error types for the simulation engine.

use thiserror::Error;
use wren_circuit::CircuitError;

/// Errors produced while evolving or sampling a circuit.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SimError {
    /// Circuit is wider than this engine is configured to simulate.
    #[error("circuit has {qubits} qubits but the engine allows at most {max}")]
    CircuitTooLarge {
        /// Qubit count of the circuit.
        qubits: usize,
        /// The engine's ceiling.
        max: usize,
    },

    /// An operation references a qubit the statevector does not have.
    ///
    /// Reachable because gate appenders are permissive by default, and
    /// because circuits can be deserialized from untrusted input.
    #[error("malformed {op} operation: qubit {qubit} out of range for {n_qubits} qubits")]
    MalformedOp {
        /// Name of the offending operation.
        op: &'static str,
        /// The out-of-range qubit index.
        qubit: u32,
        /// Number of qubits in the statevector.
        n_qubits: usize,
    },

    /// A measurement references a classical bit the circuit does not have.
    #[error("malformed measure operation: clbit {clbit} out of range for {n_clbits} classical bits")]
    MalformedMeasure {
        /// The out-of-range classical bit index.
        clbit: u32,
        /// Number of classical bits in the circuit.
        n_clbits: usize,
    },

    /// Sampled output modes need at least one shot.
    #[error("shots must be at least 1, got {0}")]
    InvalidShots(u32),

    /// Per-qubit noise model length must equal the qubit count.
    #[error("noise model has {got} probabilities but the circuit has {expected} qubits")]
    NoiseLengthMismatch {
        /// Supplied probability count.
        got: usize,
        /// Expected probability count.
        expected: usize,
    },

    /// A flip probability outside `[0, 1]`.
    #[error("flip probability {0} is outside [0, 1]")]
    InvalidProbability(f64),

    /// Circuit builder error.
    #[error("circuit error: {0}")]
    Circuit(#[from] CircuitError),
}

/// Result type for simulation operations.
pub type SimResult<T> = Result<T, SimError>;
