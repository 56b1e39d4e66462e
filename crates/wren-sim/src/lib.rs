//! wren statevector simulation engine
//!
//! Evolves a [`wren_circuit::Circuit`] as an exact statevector —
//! `2^n` complex amplitudes — and projects the final state into one of
//! four shapes: raw amplitudes, a full probability table, a per-shot
//! outcome list, or aggregated counts.
//!
//! # Design
//!
//! - **Deferred measurement**: `measure` records a qubit→clbit
//!   association and never collapses amplitudes; every recorded
//!   measurement is applied to the *final* state at sampling time.
//! - **Readout noise**: an optional per-qubit bit-flip model mixed into
//!   the derived probabilities, not an amplitude-level channel.
//! - **Synchronous**: one [`Simulator::run`] call completes or fails
//!   outright; no partial results, no cancellation.
//!
//! # Performance
//!
//! | Qubits | Amplitudes | Memory |
//! |--------|------------|--------|
//! | 10 | 1 024 | ~16 KB |
//! | 15 | 32 768 | ~512 KB |
//! | 20 | ~1M | ~16 MB (soft ceiling, warns) |
//! | 25 | ~33M | ~512 MB (hard ceiling) |
//!
//! # Example
//!
//! ```rust
//! use wren_circuit::Circuit;
//! use wren_sim::{RunOptions, simulate};
//!
//! let circuit = Circuit::bell().unwrap();
//! let output = simulate(&circuit, &RunOptions::new().with_shots(1000)).unwrap();
//!
//! // A Bell pair only ever measures 00 or 11.
//! let counts = output.as_counts().unwrap();
//! assert_eq!(counts.get("00") + counts.get("11"), 1000);
//! assert_eq!(counts.get("01") + counts.get("10"), 0);
//! ```

pub mod error;
pub mod noise;
pub mod result;
pub mod simulator;
pub mod statevector;

pub use error::{SimError, SimResult};
pub use noise::NoiseModel;
pub use result::{Counts, OutputMode, SimOutput};
pub use simulator::{RunOptions, Simulator, simulate};
pub use statevector::Statevector;
