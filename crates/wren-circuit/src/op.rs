//! Primitive circuit operations.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::qubit::{ClbitId, QubitId};

/// A primitive operation in a circuit's execution-ordered list.
///
/// This is the closed set the simulation engine understands, matched
/// exhaustively during evolution. Composite gates (`y`, `z`, `ry`, `t`,
/// `crz`) never appear here — the builder expands them into these
/// primitives at append time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Op {
    /// Overwrite a prefix of the statevector with caller-supplied
    /// amplitudes. Normalization is the caller's responsibility.
    Init(Vec<Complex64>),
    /// Pauli-X gate.
    X(QubitId),
    /// Hadamard gate.
    H(QubitId),
    /// Rotation around the X axis.
    Rx {
        /// Rotation angle in radians.
        theta: f64,
        /// Target qubit.
        qubit: QubitId,
    },
    /// Rotation around the Z axis.
    Rz {
        /// Rotation angle in radians.
        theta: f64,
        /// Target qubit.
        qubit: QubitId,
    },
    /// Controlled-X (CNOT) gate.
    Cx {
        /// Control qubit.
        control: QubitId,
        /// Target qubit.
        target: QubitId,
    },
    /// Controlled rotation around the X axis.
    Crx {
        /// Rotation angle in radians.
        theta: f64,
        /// Control qubit.
        control: QubitId,
        /// Target qubit.
        target: QubitId,
    },
    /// SWAP gate.
    Swap(QubitId, QubitId),
    /// Deferred measurement: records a qubit→clbit association and
    /// leaves the amplitudes untouched.
    Measure {
        /// Measured qubit.
        qubit: QubitId,
        /// Classical bit receiving the outcome.
        clbit: ClbitId,
    },
}

impl Op {
    /// Get the name of this operation.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Op::Init(_) => "init",
            Op::X(_) => "x",
            Op::H(_) => "h",
            Op::Rx { .. } => "rx",
            Op::Rz { .. } => "rz",
            Op::Cx { .. } => "cx",
            Op::Crx { .. } => "crx",
            Op::Swap(_, _) => "swap",
            Op::Measure { .. } => "measure",
        }
    }

    /// Qubits this operation references, in declaration order.
    pub fn qubits(&self) -> Vec<QubitId> {
        match self {
            Op::Init(_) => vec![],
            Op::X(q) | Op::H(q) | Op::Rx { qubit: q, .. } | Op::Rz { qubit: q, .. } => vec![*q],
            Op::Cx { control, target }
            | Op::Crx {
                control, target, ..
            } => vec![*control, *target],
            Op::Swap(a, b) => vec![*a, *b],
            Op::Measure { qubit, .. } => vec![*qubit],
        }
    }

    /// Check if this is a unitary gate (not `Init` or `Measure`).
    #[inline]
    pub fn is_gate(&self) -> bool {
        !matches!(self, Op::Init(_) | Op::Measure { .. })
    }

    /// Check if this is a measurement.
    #[inline]
    pub fn is_measure(&self) -> bool {
        matches!(self, Op::Measure { .. })
    }
}
