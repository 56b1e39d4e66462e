//! High-level circuit builder API.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::error::{CircuitError, CircuitResult};
use crate::op::Op;
use crate::qubit::{ClbitId, QubitId};

/// Hard ceiling on qubit count. Above this the amplitude buffer
/// (`2^n` complex pairs) stops fitting in commodity memory.
pub const MAX_QUBITS: usize = 25;

/// Soft ceiling on qubit count. Circuits this wide still simulate,
/// slowly; the engine logs a warning when crossing it.
pub const SOFT_MAX_QUBITS: usize = 20;

/// A quantum circuit: an execution-ordered, append-only list of
/// primitive operations over fixed qubit and classical-bit counts.
///
/// Built through fluent appenders that return `&mut Self` for chaining.
/// Gate appenders are permissive by default — they do not range-check
/// qubit indices, mirroring the behavior of the systems this builder
/// was written against. [`Circuit::strict`] opts into range checks as a
/// hardening measure. [`Circuit::measure`] always checks both of its
/// indices regardless of mode.
///
/// The simulation engine treats a circuit as read-only input: one
/// circuit may be re-run any number of times, including concurrently.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Circuit {
    /// Name of the circuit.
    name: String,
    /// Number of qubits.
    num_qubits: usize,
    /// Number of classical bits.
    num_clbits: usize,
    /// Operations in execution order.
    ops: Vec<Op>,
    /// Whether gate appenders range-check qubit indices.
    #[serde(default)]
    strict: bool,
}

impl Circuit {
    /// Create a circuit with `num_qubits` qubits and `num_clbits`
    /// classical bits.
    ///
    /// Fails when `num_qubits` is zero or above [`MAX_QUBITS`].
    pub fn new(num_qubits: usize, num_clbits: usize) -> CircuitResult<Self> {
        if num_qubits == 0 {
            return Err(CircuitError::NoQubits);
        }
        if num_qubits > MAX_QUBITS {
            return Err(CircuitError::TooManyQubits {
                requested: num_qubits,
                max: MAX_QUBITS,
            });
        }
        Ok(Self {
            name: String::new(),
            num_qubits,
            num_clbits,
            ops: vec![],
            strict: false,
        })
    }

    /// Create a named circuit.
    pub fn named(
        name: impl Into<String>,
        num_qubits: usize,
        num_clbits: usize,
    ) -> CircuitResult<Self> {
        let mut circuit = Self::new(num_qubits, num_clbits)?;
        circuit.name = name.into();
        Ok(circuit)
    }

    /// Enable strict index validation on gate appenders.
    ///
    /// The permissive default is the documented contract; strict mode is
    /// an opt-in hardening layer for callers that want construction-time
    /// failures instead of evolution-time ones.
    #[must_use]
    pub fn strict(mut self) -> Self {
        self.strict = true;
        self
    }

    fn check_qubit(&self, qubit: QubitId) -> CircuitResult<()> {
        if qubit.index() >= self.num_qubits {
            return Err(CircuitError::QubitOutOfRange {
                qubit,
                n_qubits: self.num_qubits,
            });
        }
        Ok(())
    }

    /// Range check applied by gate appenders: a no-op unless strict.
    fn check_qubit_lenient(&self, qubit: QubitId) -> CircuitResult<()> {
        if self.strict {
            self.check_qubit(qubit)?;
        }
        Ok(())
    }

    // =========================================================================
    // Single-qubit gates
    // =========================================================================

    /// Apply Pauli-X.
    pub fn x(&mut self, qubit: QubitId) -> CircuitResult<&mut Self> {
        self.check_qubit_lenient(qubit)?;
        self.ops.push(Op::X(qubit));
        Ok(self)
    }

    /// Apply Hadamard.
    pub fn h(&mut self, qubit: QubitId) -> CircuitResult<&mut Self> {
        self.check_qubit_lenient(qubit)?;
        self.ops.push(Op::H(qubit));
        Ok(self)
    }

    /// Apply an X-axis rotation.
    pub fn rx(&mut self, theta: f64, qubit: QubitId) -> CircuitResult<&mut Self> {
        self.check_qubit_lenient(qubit)?;
        self.ops.push(Op::Rx { theta, qubit });
        Ok(self)
    }

    /// Apply a Z-axis rotation.
    pub fn rz(&mut self, theta: f64, qubit: QubitId) -> CircuitResult<&mut Self> {
        self.check_qubit_lenient(qubit)?;
        self.ops.push(Op::Rz { theta, qubit });
        Ok(self)
    }

    /// Apply a Y-axis rotation: `Rx(π/2)`, `Rz(θ)`, `Rx(−π/2)`.
    pub fn ry(&mut self, theta: f64, qubit: QubitId) -> CircuitResult<&mut Self> {
        self.rx(FRAC_PI_2, qubit)?;
        self.rz(theta, qubit)?;
        self.rx(-FRAC_PI_2, qubit)?;
        Ok(self)
    }

    /// Apply Pauli-Y: `Rz(π)` then `X`.
    pub fn y(&mut self, qubit: QubitId) -> CircuitResult<&mut Self> {
        self.rz(PI, qubit)?;
        self.x(qubit)?;
        Ok(self)
    }

    /// Apply Pauli-Z: `Rz(π)`.
    pub fn z(&mut self, qubit: QubitId) -> CircuitResult<&mut Self> {
        self.rz(PI, qubit)?;
        Ok(self)
    }

    /// Apply the T gate: `Rz(π/4)`.
    pub fn t(&mut self, qubit: QubitId) -> CircuitResult<&mut Self> {
        self.rz(FRAC_PI_4, qubit)?;
        Ok(self)
    }

    // =========================================================================
    // Two-qubit gates
    // =========================================================================

    /// Apply controlled-X (CNOT).
    pub fn cx(&mut self, control: QubitId, target: QubitId) -> CircuitResult<&mut Self> {
        self.check_qubit_lenient(control)?;
        self.check_qubit_lenient(target)?;
        self.ops.push(Op::Cx { control, target });
        Ok(self)
    }

    /// Apply a controlled X-axis rotation.
    pub fn crx(&mut self, theta: f64, control: QubitId, target: QubitId) -> CircuitResult<&mut Self> {
        self.check_qubit_lenient(control)?;
        self.check_qubit_lenient(target)?;
        self.ops.push(Op::Crx {
            theta,
            control,
            target,
        });
        Ok(self)
    }

    /// Apply a controlled Z-axis rotation: `H(target)`, `Crx(θ)`,
    /// `H(target)` — the `Rz = H·Rx·H` identity lifted to the
    /// controlled case.
    pub fn crz(&mut self, theta: f64, control: QubitId, target: QubitId) -> CircuitResult<&mut Self> {
        self.h(target)?;
        self.crx(theta, control, target)?;
        self.h(target)?;
        Ok(self)
    }

    /// Apply SWAP.
    pub fn swap(&mut self, a: QubitId, b: QubitId) -> CircuitResult<&mut Self> {
        self.check_qubit_lenient(a)?;
        self.check_qubit_lenient(b)?;
        self.ops.push(Op::Swap(a, b));
        Ok(self)
    }

    // =========================================================================
    // Other operations
    // =========================================================================

    /// Append an `Init`: when evolved, overwrites a prefix of the
    /// statevector with `amplitudes`.
    ///
    /// The engine truncates whichever of the payload and the statevector
    /// is longer. The payload must be non-empty; in strict mode its
    /// length must equal `2^num_qubits` exactly. The caller is
    /// responsible for normalization.
    pub fn initialize(&mut self, amplitudes: Vec<Complex64>) -> CircuitResult<&mut Self> {
        if amplitudes.is_empty() {
            return Err(CircuitError::EmptyInitState);
        }
        if self.strict {
            let expected = 1usize << self.num_qubits;
            if amplitudes.len() != expected {
                return Err(CircuitError::InitStateLength {
                    got: amplitudes.len(),
                    expected,
                });
            }
        }
        self.ops.push(Op::Init(amplitudes));
        Ok(self)
    }

    /// Measure a qubit into a classical bit.
    ///
    /// Measurement is deferred: the engine records the association and
    /// applies it to the final sampled state, so amplitudes are never
    /// collapsed mid-circuit. Both indices are always range-checked.
    pub fn measure(&mut self, qubit: QubitId, clbit: ClbitId) -> CircuitResult<&mut Self> {
        self.check_qubit(qubit)?;
        if clbit.index() >= self.num_clbits {
            return Err(CircuitError::ClbitOutOfRange {
                clbit,
                n_clbits: self.num_clbits,
            });
        }
        self.ops.push(Op::Measure { qubit, clbit });
        Ok(self)
    }

    /// Measure every qubit into the classical bit of the same index.
    ///
    /// A circuit built with zero classical bits grows them here first.
    pub fn measure_all(&mut self) -> CircuitResult<&mut Self> {
        if self.num_clbits == 0 {
            self.num_clbits = self.num_qubits;
        }
        for q in 0..self.num_qubits {
            self.measure(QubitId::from(q), ClbitId::from(q))?;
        }
        Ok(self)
    }

    /// Concatenate two circuits: the wider of each bit count, the left
    /// circuit's name, and both operation lists in order.
    pub fn concat(&self, other: &Circuit) -> Circuit {
        let mut ops = self.ops.clone();
        ops.extend(other.ops.iter().cloned());
        Circuit {
            name: self.name.clone(),
            num_qubits: self.num_qubits.max(other.num_qubits),
            num_clbits: self.num_clbits.max(other.num_clbits),
            ops,
            strict: self.strict,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the circuit name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Get the number of classical bits.
    pub fn num_clbits(&self) -> usize {
        self.num_clbits
    }

    /// Get the operations in execution order.
    pub fn ops(&self) -> &[Op] {
        &self.ops
    }

    /// Get the number of appended operations.
    pub fn num_ops(&self) -> usize {
        self.ops.len()
    }

    /// Check whether any operations have been appended.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    // =========================================================================
    // Pre-built circuits
    // =========================================================================

    /// Create a Bell pair circuit with measurements.
    pub fn bell() -> CircuitResult<Self> {
        let mut circuit = Self::named("bell", 2, 2)?;
        circuit
            .h(QubitId(0))?
            .cx(QubitId(0), QubitId(1))?
            .measure_all()?;
        Ok(circuit)
    }

    /// Create an `n`-qubit GHZ circuit with measurements.
    pub fn ghz(n: usize) -> CircuitResult<Self> {
        let mut circuit = Self::named("ghz", n, n)?;
        circuit.h(QubitId(0))?;
        for i in 0..n - 1 {
            circuit.cx(QubitId::from(i), QubitId::from(i + 1))?;
        }
        circuit.measure_all()?;
        Ok(circuit)
    }
}
