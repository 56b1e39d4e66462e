//! Simulation engine: evolve, mix noise, project.

use rand::Rng;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use wren_circuit::{Circuit, MAX_QUBITS, Op, SOFT_MAX_QUBITS};

use crate::error::{SimError, SimResult};
use crate::noise::{NoiseModel, mix_probabilities};
use crate::result::{Counts, OutputMode, SimOutput};
use crate::statevector::Statevector;

/// Run parameters for one simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunOptions {
    /// Number of measurement draws. Ignored unless the mode samples
    /// (`Memory` or `Counts`).
    pub shots: u32,
    /// Requested projection of the final state.
    pub mode: OutputMode,
    /// Optional readout noise mixed into measurement probabilities.
    pub noise: Option<NoiseModel>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            shots: 1024,
            mode: OutputMode::Counts,
            noise: None,
        }
    }
}

impl RunOptions {
    /// Default options: 1024 shots, counts, no noise.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the shot count.
    #[must_use]
    pub fn with_shots(mut self, shots: u32) -> Self {
        self.shots = shots;
        self
    }

    /// Set the output mode.
    #[must_use]
    pub fn with_mode(mut self, mode: OutputMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the noise model.
    #[must_use]
    pub fn with_noise(mut self, noise: NoiseModel) -> Self {
        self.noise = Some(noise);
        self
    }
}

/// Exact statevector simulation engine.
///
/// Single-threaded and synchronous: one [`Simulator::run`] call evolves
/// the full operation list and samples to completion, or fails outright
/// — there is no partial result. The circuit is read-only input and each
/// run owns its amplitude buffer, so one circuit may be re-run, or run
/// concurrently from several threads, freely.
#[derive(Debug, Clone)]
pub struct Simulator {
    /// Maximum number of qubits this engine will evolve.
    max_qubits: usize,
}

impl Simulator {
    /// Create an engine with the default qubit ceiling.
    pub fn new() -> Self {
        Self {
            max_qubits: MAX_QUBITS,
        }
    }

    /// Create an engine with a custom qubit ceiling.
    pub fn with_max_qubits(max_qubits: usize) -> Self {
        Self { max_qubits }
    }

    /// Simulate a circuit and return the requested projection.
    ///
    /// Operations are evolved strictly in appended order. Measurements
    /// are deferred: each `Measure` records its qubit→clbit association
    /// and the whole map is applied to the final sampled state, so a
    /// gate appearing after a measurement still affects that
    /// measurement's outcome.
    #[instrument(skip(self, circuit, options), fields(circuit = circuit.name()))]
    pub fn run(&self, circuit: &Circuit, options: &RunOptions) -> SimResult<SimOutput> {
        let num_qubits = circuit.num_qubits();
        let num_clbits = circuit.num_clbits();
        if num_qubits > self.max_qubits {
            return Err(SimError::CircuitTooLarge {
                qubits: num_qubits,
                max: self.max_qubits,
            });
        }
        if num_qubits > SOFT_MAX_QUBITS {
            warn!("simulating {num_qubits} qubits, above the soft ceiling of {SOFT_MAX_QUBITS}");
        }
        let sampled = matches!(options.mode, OutputMode::Memory | OutputMode::Counts);
        if sampled && options.shots == 0 {
            return Err(SimError::InvalidShots(0));
        }
        // Resolve the noise model up front so a bad one fails before
        // any evolution work.
        let flip_probs = options
            .noise
            .as_ref()
            .map(|n| n.resolve(num_qubits))
            .transpose()?;

        debug!(
            "evolving {} operations over {num_qubits} qubits",
            circuit.num_ops()
        );
        let mut state = Statevector::new(num_qubits);
        // Deferred measurement: clbit → qubit, consulted only at sampling.
        let mut outmap: FxHashMap<usize, usize> = FxHashMap::default();
        for op in circuit.ops() {
            state.apply(op)?;
            if let Op::Measure { qubit, clbit } = op {
                if clbit.index() >= num_clbits {
                    return Err(SimError::MalformedMeasure {
                        clbit: clbit.0,
                        n_clbits: num_clbits,
                    });
                }
                outmap.insert(clbit.index(), qubit.index());
            }
        }

        if options.mode == OutputMode::Statevector {
            return Ok(SimOutput::Statevector(state.into_amplitudes()));
        }

        let mut probs = state.probabilities();
        if let Some(flips) = &flip_probs {
            mix_probabilities(&mut probs, flips);
        }

        if options.mode == OutputMode::Probabilities {
            let table = probs
                .iter()
                .enumerate()
                .map(|(i, &p)| (bitstring(i, num_qubits), p))
                .collect();
            return Ok(SimOutput::Probabilities(table));
        }

        let mut rng = rand::thread_rng();
        let mut memory = Vec::with_capacity(options.shots as usize);
        for _ in 0..options.shots {
            let index = sample_index(&probs, &mut rng);
            let raw = bitstring(index, num_qubits);
            memory.push(project_outcome(&raw, &outmap, num_qubits, num_clbits));
        }
        debug!("sampled {} shots", memory.len());

        if options.mode == OutputMode::Memory {
            return Ok(SimOutput::Memory(memory));
        }
        let mut counts = Counts::new();
        for outcome in memory {
            counts.insert(outcome, 1);
        }
        Ok(SimOutput::Counts(counts))
    }
}

impl Default for Simulator {
    fn default() -> Self {
        Self::new()
    }
}

/// Simulate a circuit with a default-configured engine.
pub fn simulate(circuit: &Circuit, options: &RunOptions) -> SimResult<SimOutput> {
    Simulator::new().run(circuit, options)
}

/// Basis state index → qubit-ordered bitstring, qubit `width − 1`
/// leftmost.
fn bitstring(index: usize, width: usize) -> String {
    format!("{index:0width$b}")
}

/// Inverse-CDF sampling: the first index whose cumulative probability
/// exceeds the draw, falling back to the last index when rounding
/// leaves the cumulative sum short.
fn sample_index(probs: &[f64], rng: &mut impl Rng) -> usize {
    let r: f64 = rng.r#gen();
    let mut cumulative = 0.0;
    for (i, &p) in probs.iter().enumerate() {
        cumulative += p;
        if r < cumulative {
            return i;
        }
    }
    probs.len() - 1
}

/// Apply the recorded measurements to a raw sampled bitstring.
///
/// Classical bit `num_clbits − 1` is the leftmost character of the
/// outcome. With no recorded measurements the raw string itself is the
/// outcome, left-padded with zeros to cover the classical register.
fn project_outcome(
    raw: &str,
    outmap: &FxHashMap<usize, usize>,
    num_qubits: usize,
    num_clbits: usize,
) -> String {
    if outmap.is_empty() {
        let width = num_clbits.max(num_qubits);
        return format!("{raw:0>width$}");
    }
    let raw_bytes = raw.as_bytes();
    let mut out: Vec<char> = vec!['0'; num_clbits];
    for (&clbit, &qubit) in outmap {
        out[num_clbits - 1 - clbit] = raw_bytes[num_qubits - 1 - qubit] as char;
    }
    out.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bitstring_orientation() {
        // Index 1 is qubit 0 set; qubit n−1 is leftmost.
        assert_eq!(bitstring(1, 3), "001");
        assert_eq!(bitstring(4, 3), "100");
        assert_eq!(bitstring(0, 1), "0");
    }

    #[test]
    fn test_sample_index_walks_cumulative() {
        use rand::SeedableRng;
        use rand::rngs::StdRng;

        let mut rng = StdRng::seed_from_u64(17);
        let probs = [0.0, 0.0, 1.0, 0.0];
        for _ in 0..50 {
            assert_eq!(sample_index(&probs, &mut rng), 2);
        }
    }

    #[test]
    fn test_sample_index_rounding_fallback() {
        use rand::SeedableRng;
        use rand::rngs::StdRng;

        // All-zero probabilities never exceed the draw: last index wins.
        let mut rng = StdRng::seed_from_u64(17);
        let probs = [0.0, 0.0, 0.0];
        assert_eq!(sample_index(&probs, &mut rng), 2);
    }

    #[test]
    fn test_project_outcome_with_outmap() {
        // Qubit 0 measured into clbit 2 of a 3-bit register.
        let mut outmap = FxHashMap::default();
        outmap.insert(2, 0);
        assert_eq!(project_outcome("01", &outmap, 2, 3), "100");
    }

    #[test]
    fn test_project_outcome_crossed_wires() {
        // q0→c1 and q1→c0: outcome bits swap positions.
        let mut outmap = FxHashMap::default();
        outmap.insert(1, 0);
        outmap.insert(0, 1);
        assert_eq!(project_outcome("01", &outmap, 2, 2), "10");
    }

    #[test]
    fn test_project_outcome_empty_outmap_pads() {
        let outmap = FxHashMap::default();
        assert_eq!(project_outcome("1", &outmap, 1, 0), "1");
        assert_eq!(project_outcome("1", &outmap, 1, 3), "001");
        assert_eq!(project_outcome("10", &outmap, 2, 1), "10");
    }
}
