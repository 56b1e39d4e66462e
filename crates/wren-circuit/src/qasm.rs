//! OpenQASM 2.0 export.

use std::fmt::Write;

use crate::circuit::Circuit;
use crate::op::Op;

impl Circuit {
    /// Render the circuit as an OpenQASM 2.0 program.
    ///
    /// `Init` has no QASM 2.0 counterpart and is skipped. `crx` is not
    /// in `qelib1.inc`, so it is emitted through its `cz`/`rx`
    /// decomposition.
    pub fn to_qasm(&self) -> String {
        let mut qasm = String::from("OPENQASM 2.0;\ninclude \"qelib1.inc\";\n\n");
        let _ = writeln!(qasm, "qreg q[{}];", self.num_qubits());
        if self.num_clbits() > 0 {
            let _ = writeln!(qasm, "creg c[{}];", self.num_clbits());
        }
        qasm.push('\n');

        for op in self.ops() {
            match op {
                Op::Init(_) => {}
                Op::X(q) => {
                    let _ = writeln!(qasm, "x q[{}];", q.0);
                }
                Op::H(q) => {
                    let _ = writeln!(qasm, "h q[{}];", q.0);
                }
                Op::Rx { theta, qubit } => {
                    let _ = writeln!(qasm, "rx({theta}) q[{}];", qubit.0);
                }
                Op::Rz { theta, qubit } => {
                    let _ = writeln!(qasm, "rz({theta}) q[{}];", qubit.0);
                }
                Op::Cx { control, target } => {
                    let _ = writeln!(qasm, "cx q[{}], q[{}];", control.0, target.0);
                }
                Op::Crx {
                    theta,
                    control,
                    target,
                } => {
                    // crx(θ) = rx(θ/2)·cz·rx(−θ/2)·cz on the target.
                    let _ = writeln!(qasm, "cz q[{}], q[{}];", control.0, target.0);
                    let _ = writeln!(qasm, "rx({}) q[{}];", -theta / 2.0, target.0);
                    let _ = writeln!(qasm, "cz q[{}], q[{}];", control.0, target.0);
                    let _ = writeln!(qasm, "rx({}) q[{}];", theta / 2.0, target.0);
                }
                Op::Swap(a, b) => {
                    let _ = writeln!(qasm, "swap q[{}], q[{}];", a.0, b.0);
                }
                Op::Measure { qubit, clbit } => {
                    let _ = writeln!(qasm, "measure q[{}] -> c[{}];", qubit.0, clbit.0);
                }
            }
        }
        qasm
    }
}
