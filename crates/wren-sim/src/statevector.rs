//! Statevector representation and gate kernels.

use num_complex::Complex64;
use std::f64::consts::FRAC_1_SQRT_2;

use wren_circuit::{Op, QubitId};

use crate::error::{SimError, SimResult};

/// An exact quantum state: `2^n` complex amplitudes.
///
/// Basis state index bit `q` holds the value of qubit `q`, with qubit 0
/// in the least-significant position. The buffer is owned by one run of
/// the engine; nothing here normalizes — an `Init` overwrite is applied
/// verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct Statevector {
    /// The state amplitudes (2^n complex numbers).
    amplitudes: Vec<Complex64>,
    /// Number of qubits.
    num_qubits: usize,
}

impl Statevector {
    /// Create a new statevector initialized to |0...0⟩.
    pub fn new(num_qubits: usize) -> Self {
        let size = 1 << num_qubits;
        let mut amplitudes = vec![Complex64::new(0.0, 0.0); size];
        amplitudes[0] = Complex64::new(1.0, 0.0);
        Self {
            amplitudes,
            num_qubits,
        }
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Get the amplitudes.
    pub fn amplitudes(&self) -> &[Complex64] {
        &self.amplitudes
    }

    /// Consume the statevector and return the raw amplitudes.
    pub fn into_amplitudes(self) -> Vec<Complex64> {
        self.amplitudes
    }

    /// Apply one primitive operation.
    ///
    /// `Measure` only range-checks its qubit here — the deferred
    /// qubit→clbit bookkeeping lives in the engine, and amplitudes are
    /// never collapsed. Every referenced qubit is validated before the
    /// buffer is touched, so a permissively built (or deserialized)
    /// out-of-range operation fails instead of panicking.
    pub fn apply(&mut self, op: &Op) -> SimResult<()> {
        match op {
            Op::Init(amplitudes) => self.overwrite_prefix(amplitudes),
            Op::X(q) => {
                let j = self.check_qubit("x", *q)?;
                self.apply_x(j);
            }
            Op::H(q) => {
                let j = self.check_qubit("h", *q)?;
                self.apply_h(j);
            }
            Op::Rx { theta, qubit } => {
                let j = self.check_qubit("rx", *qubit)?;
                self.apply_rx(j, *theta);
            }
            Op::Rz { theta, qubit } => {
                let j = self.check_qubit("rz", *qubit)?;
                self.apply_rz(j, *theta);
            }
            Op::Cx { control, target } => {
                let c = self.check_qubit("cx", *control)?;
                let t = self.check_qubit("cx", *target)?;
                self.apply_cx(c, t);
            }
            Op::Crx {
                theta,
                control,
                target,
            } => {
                let c = self.check_qubit("crx", *control)?;
                let t = self.check_qubit("crx", *target)?;
                self.apply_crx(c, t, *theta);
            }
            Op::Swap(a, b) => {
                let a = self.check_qubit("swap", *a)?;
                let b = self.check_qubit("swap", *b)?;
                self.apply_swap(a, b);
            }
            Op::Measure { qubit, .. } => {
                self.check_qubit("measure", *qubit)?;
            }
        }
        Ok(())
    }

    /// Per-basis-state measurement probabilities.
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(Complex64::norm_sqr).collect()
    }

    fn check_qubit(&self, op: &'static str, qubit: QubitId) -> SimResult<usize> {
        let index = qubit.index();
        if index >= self.num_qubits {
            return Err(SimError::MalformedOp {
                op,
                qubit: qubit.0,
                n_qubits: self.num_qubits,
            });
        }
        Ok(index)
    }

    /// Overwrite amplitudes from index 0, truncating whichever of the
    /// payload and the buffer is longer.
    fn overwrite_prefix(&mut self, amplitudes: &[Complex64]) {
        let n = amplitudes.len().min(self.amplitudes.len());
        self.amplitudes[..n].copy_from_slice(&amplitudes[..n]);
    }

    // =========================================================================
    // Single-qubit gate kernels
    // =========================================================================

    fn apply_x(&mut self, qubit: usize) {
        let mask = 1 << qubit;
        for i in 0..self.amplitudes.len() {
            if i & mask == 0 {
                self.amplitudes.swap(i, i | mask);
            }
        }
    }

    fn apply_h(&mut self, qubit: usize) {
        let mask = 1 << qubit;
        for i in 0..self.amplitudes.len() {
            if i & mask == 0 {
                let j = i | mask;
                let a = self.amplitudes[i];
                let b = self.amplitudes[j];
                self.amplitudes[i] = FRAC_1_SQRT_2 * (a + b);
                self.amplitudes[j] = FRAC_1_SQRT_2 * (a - b);
            }
        }
    }

    fn apply_rx(&mut self, qubit: usize, theta: f64) {
        let mask = 1 << qubit;
        let c = (theta / 2.0).cos();
        let neg_i_s = Complex64::new(0.0, -(theta / 2.0).sin());
        for i in 0..self.amplitudes.len() {
            if i & mask == 0 {
                let j = i | mask;
                let a = self.amplitudes[i];
                let b = self.amplitudes[j];
                self.amplitudes[i] = c * a + neg_i_s * b;
                self.amplitudes[j] = neg_i_s * a + c * b;
            }
        }
    }

    fn apply_rz(&mut self, qubit: usize, theta: f64) {
        let mask = 1 << qubit;
        let phase_0 = Complex64::from_polar(1.0, -theta / 2.0);
        let phase_1 = Complex64::from_polar(1.0, theta / 2.0);
        for i in 0..self.amplitudes.len() {
            if i & mask == 0 {
                self.amplitudes[i] *= phase_0;
            } else {
                self.amplitudes[i] *= phase_1;
            }
        }
    }

    // =========================================================================
    // Two-qubit gate kernels
    // =========================================================================

    fn apply_cx(&mut self, control: usize, target: usize) {
        let ctrl_mask = 1 << control;
        let tgt_mask = 1 << target;
        for i in 0..self.amplitudes.len() {
            if (i & ctrl_mask != 0) && (i & tgt_mask == 0) {
                self.amplitudes.swap(i, i | tgt_mask);
            }
        }
    }

    fn apply_crx(&mut self, control: usize, target: usize, theta: f64) {
        let ctrl_mask = 1 << control;
        let tgt_mask = 1 << target;
        let c = (theta / 2.0).cos();
        let neg_i_s = Complex64::new(0.0, -(theta / 2.0).sin());
        for i in 0..self.amplitudes.len() {
            if (i & ctrl_mask != 0) && (i & tgt_mask == 0) {
                let j = i | tgt_mask;
                let a = self.amplitudes[i];
                let b = self.amplitudes[j];
                self.amplitudes[i] = c * a + neg_i_s * b;
                self.amplitudes[j] = neg_i_s * a + c * b;
            }
        }
    }

    fn apply_swap(&mut self, a: usize, b: usize) {
        let mask_a = 1 << a;
        let mask_b = 1 << b;
        for i in 0..self.amplitudes.len() {
            if (i & mask_a != 0) && (i & mask_b == 0) {
                let j = (i & !mask_a) | mask_b;
                self.amplitudes.swap(i, j);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;
    use wren_circuit::ClbitId;

    fn approx_eq(a: Complex64, b: Complex64) -> bool {
        (a - b).norm() < 1e-10
    }

    #[test]
    fn test_initial_state() {
        let sv = Statevector::new(2);
        assert!(approx_eq(sv.amplitudes()[0], Complex64::new(1.0, 0.0)));
        assert!(approx_eq(sv.amplitudes()[1], Complex64::new(0.0, 0.0)));
        assert!(approx_eq(sv.amplitudes()[2], Complex64::new(0.0, 0.0)));
        assert!(approx_eq(sv.amplitudes()[3], Complex64::new(0.0, 0.0)));
    }

    #[test]
    fn test_x_gate() {
        let mut sv = Statevector::new(1);
        sv.apply(&Op::X(QubitId(0))).unwrap();
        assert!(approx_eq(sv.amplitudes()[0], Complex64::new(0.0, 0.0)));
        assert!(approx_eq(sv.amplitudes()[1], Complex64::new(1.0, 0.0)));
    }

    #[test]
    fn test_hadamard() {
        let mut sv = Statevector::new(1);
        sv.apply(&Op::H(QubitId(0))).unwrap();
        assert!(approx_eq(
            sv.amplitudes()[0],
            Complex64::new(FRAC_1_SQRT_2, 0.0)
        ));
        assert!(approx_eq(
            sv.amplitudes()[1],
            Complex64::new(FRAC_1_SQRT_2, 0.0)
        ));
    }

    #[test]
    fn test_bell_state() {
        let mut sv = Statevector::new(2);
        sv.apply(&Op::H(QubitId(0))).unwrap();
        sv.apply(&Op::Cx {
            control: QubitId(0),
            target: QubitId(1),
        })
        .unwrap();

        let expected = Complex64::new(FRAC_1_SQRT_2, 0.0);
        assert!(approx_eq(sv.amplitudes()[0], expected));
        assert!(approx_eq(sv.amplitudes()[1], Complex64::new(0.0, 0.0)));
        assert!(approx_eq(sv.amplitudes()[2], Complex64::new(0.0, 0.0)));
        assert!(approx_eq(sv.amplitudes()[3], expected));
    }

    #[test]
    fn test_rx_pi_is_x_up_to_phase() {
        // Rx(π)|0⟩ = −i|1⟩.
        let mut sv = Statevector::new(1);
        sv.apply(&Op::Rx {
            theta: PI,
            qubit: QubitId(0),
        })
        .unwrap();
        assert!(approx_eq(sv.amplitudes()[0], Complex64::new(0.0, 0.0)));
        assert!(approx_eq(sv.amplitudes()[1], Complex64::new(0.0, -1.0)));
    }

    #[test]
    fn test_rz_phases() {
        // Rz(π) on |+⟩ gives (e^{−iπ/2}|0⟩ + e^{iπ/2}|1⟩)/√2 = (−i|0⟩ + i|1⟩)/√2.
        let mut sv = Statevector::new(1);
        sv.apply(&Op::H(QubitId(0))).unwrap();
        sv.apply(&Op::Rz {
            theta: PI,
            qubit: QubitId(0),
        })
        .unwrap();
        assert!(approx_eq(
            sv.amplitudes()[0],
            Complex64::new(0.0, -FRAC_1_SQRT_2)
        ));
        assert!(approx_eq(
            sv.amplitudes()[1],
            Complex64::new(0.0, FRAC_1_SQRT_2)
        ));
    }

    #[test]
    fn test_swap() {
        // |01⟩ (qubit 0 set) swaps to |10⟩ (qubit 1 set).
        let mut sv = Statevector::new(2);
        sv.apply(&Op::X(QubitId(0))).unwrap();
        sv.apply(&Op::Swap(QubitId(0), QubitId(1))).unwrap();
        assert!(approx_eq(sv.amplitudes()[1], Complex64::new(0.0, 0.0)));
        assert!(approx_eq(sv.amplitudes()[2], Complex64::new(1.0, 0.0)));
    }

    #[test]
    fn test_crx_inactive_without_control() {
        let mut sv = Statevector::new(2);
        sv.apply(&Op::Crx {
            theta: PI,
            control: QubitId(0),
            target: QubitId(1),
        })
        .unwrap();
        assert!(approx_eq(sv.amplitudes()[0], Complex64::new(1.0, 0.0)));
    }

    #[test]
    fn test_crx_rotates_with_control_set() {
        // |01⟩ with control q0 set: Crx(π) takes the target to −i|1⟩.
        let mut sv = Statevector::new(2);
        sv.apply(&Op::X(QubitId(0))).unwrap();
        sv.apply(&Op::Crx {
            theta: PI,
            control: QubitId(0),
            target: QubitId(1),
        })
        .unwrap();
        assert!(approx_eq(sv.amplitudes()[1], Complex64::new(0.0, 0.0)));
        assert!(approx_eq(sv.amplitudes()[3], Complex64::new(0.0, -1.0)));
    }

    #[test]
    fn test_init_overwrites_prefix() {
        let mut sv = Statevector::new(2);
        sv.apply(&Op::Init(vec![
            Complex64::new(0.0, 0.0),
            Complex64::new(1.0, 0.0),
        ]))
        .unwrap();
        assert!(approx_eq(sv.amplitudes()[0], Complex64::new(0.0, 0.0)));
        assert!(approx_eq(sv.amplitudes()[1], Complex64::new(1.0, 0.0)));
        assert!(approx_eq(sv.amplitudes()[2], Complex64::new(0.0, 0.0)));
    }

    #[test]
    fn test_init_truncates_long_payload() {
        let mut sv = Statevector::new(1);
        let payload = vec![Complex64::new(0.5, 0.0); 8];
        sv.apply(&Op::Init(payload)).unwrap();
        assert_eq!(sv.amplitudes().len(), 2);
        assert!(approx_eq(sv.amplitudes()[1], Complex64::new(0.5, 0.0)));
    }

    #[test]
    fn test_out_of_range_op_rejected() {
        let mut sv = Statevector::new(1);
        assert!(matches!(
            sv.apply(&Op::X(QubitId(5))),
            Err(SimError::MalformedOp {
                op: "x",
                qubit: 5,
                n_qubits: 1,
            })
        ));
    }

    #[test]
    fn test_measure_leaves_amplitudes() {
        let mut sv = Statevector::new(1);
        sv.apply(&Op::H(QubitId(0))).unwrap();
        let before = sv.amplitudes().to_vec();
        sv.apply(&Op::Measure {
            qubit: QubitId(0),
            clbit: ClbitId(0),
        })
        .unwrap();
        assert_eq!(sv.amplitudes(), &before[..]);
    }

    #[test]
    fn test_probabilities() {
        let mut sv = Statevector::new(1);
        sv.apply(&Op::H(QubitId(0))).unwrap();
        let probs = sv.probabilities();
        assert!((probs[0] - 0.5).abs() < 1e-10);
        assert!((probs[1] - 0.5).abs() < 1e-10);
    }
}
