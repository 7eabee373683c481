//! Monte Carlo evaluation of a code under single-qubit Pauli noise.
//!
//! One experiment circuit is built per evaluation:
//!
//! 1. prepare logical zero, then apply logical X if the input state is one;
//! 2. an `id` gate on every targeted physical qubit (the noise carrier);
//! 3. the code's error corrector;
//! 4. for decoded scoring, logical X again if the input state is one, then the inverse
//!    preparer;
//! 5. measure all physical qubits.
//!
//! Each noise strength `p` gets its own noise model, X, Y and Z each with probability
//! `p` after every `id`, and its own seed stream. Strengths are independent, so with the
//! `parallel` feature they run concurrently; results always come back in input order.

use std::sync::OnceLock;

use log::{debug, info, warn};
use qecc_circuit::circuit::Circuit;
use qecc_circuit::gate::{GateKind, Pauli};
use qecc_circuit::noise::{NoiseModel, PauliChannel};
use qecc_circuit::register::{QubitId, Register};
use qecc_circuit::simulator::NoisySimulator;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::code::{LogicalComponents, StabilizerCode};
use crate::config::{
    validate_noise_strengths, EvaluationConfig, LogicalState, MeasurementType, NoiseStrengths,
    SuccessFractions,
};
use crate::error::EvaluationError;
use crate::five_qubit::FiveQubitCode;
use crate::stats::{estimate_pseudo_threshold, EvaluationResult};

/// Identity probability below which a warning is logged.
const LOW_IDENTITY_PROBABILITY: f64 = 0.1;

/// Multiplier separating the seed streams of different noise strengths.
const STRENGTH_SEED_STRIDE: u64 = 0xD1B5_4A32_D192_ED03;

static DEFAULT_CODE: OnceLock<FiveQubitCode> = OnceLock::new();

/// Shared five-qubit code used when no code is chosen explicitly.
pub fn default_code() -> &'static FiveQubitCode {
    DEFAULT_CODE.get_or_init(FiveQubitCode::new)
}

/// [`evaluate`] on [`default_code`] with [`EvaluationConfig::default`].
pub fn evaluate_default(p: impl Into<NoiseStrengths>) -> Result<SuccessFractions, EvaluationError> {
    evaluate(p, default_code(), &EvaluationConfig::default())
}

/// Success fraction of `code` at each noise strength in `p`.
///
/// Returns [`SuccessFractions::Single`] for a scalar `p` and an ordered
/// [`SuccessFractions::List`] for a list. Configuration errors are reported before
/// anything is simulated.
pub fn evaluate<C: StabilizerCode + ?Sized>(
    p: impl Into<NoiseStrengths>,
    code: &C,
    config: &EvaluationConfig,
) -> Result<SuccessFractions, EvaluationError> {
    let p = p.into();
    let fractions: Vec<f64> = evaluate_detailed(p.values(), code, config)?
        .into_iter()
        .map(|r| r.success_fraction)
        .collect();
    match p {
        NoiseStrengths::Single(_) => fractions
            .first()
            .copied()
            .map(SuccessFractions::Single)
            .ok_or(EvaluationError::EmptyNoiseStrengths),
        NoiseStrengths::List(_) => Ok(SuccessFractions::List(fractions)),
    }
}

/// Like [`evaluate`], with success counts and 95% intervals, one entry per strength.
pub fn evaluate_detailed<C: StabilizerCode + ?Sized>(
    p_values: &[f64],
    code: &C,
    config: &EvaluationConfig,
) -> Result<Vec<EvaluationResult>, EvaluationError> {
    validate_noise_strengths(p_values)?;
    let locations = config.validate(code)?;
    let experiment = Experiment::assemble(code, config, Carrier::Noisy(&locations))?;
    let target = success_target(code, config);

    debug!(
        "evaluating '{}': {} qubits, {} instructions, {} noise strengths x {} trials",
        experiment.circuit.name(),
        experiment.circuit.num_qubits(),
        experiment.circuit.len(),
        p_values.len(),
        config.trials
    );

    let run = |(index, &p): (usize, &f64)| -> Result<EvaluationResult, EvaluationError> {
        if 1.0 - 3.0 * p < LOW_IDENTITY_PROBABILITY {
            warn!(
                "p = {} leaves the noise channel an identity probability of only {:.3}",
                p,
                1.0 - 3.0 * p
            );
        }
        let simulator = strength_simulator(p, index, config.seed)?;
        debug!(
            "p={:.4}: noisy gates {:?}, seed {:?}",
            p,
            simulator.noise_model().noisy_gates().collect::<Vec<_>>(),
            simulator.seed()
        );

        let successes = experiment.successes(&simulator, config.trials, target.as_ref())?;
        let result = EvaluationResult::new(p, config.trials, successes);
        info!(
            "{} p={:.4} state={} {}: {}/{} successes ({:.4}, CI [{:.4}, {:.4}])",
            code.name(),
            p,
            config.logical_state,
            config.measurement,
            result.successes,
            result.trials,
            result.success_fraction,
            result.ci_low,
            result.ci_high
        );
        Ok(result)
    };

    #[cfg(feature = "parallel")]
    let results = p_values.par_iter().enumerate().map(run).collect();

    #[cfg(not(feature = "parallel"))]
    let results = p_values.iter().enumerate().map(run).collect();

    results
}

/// The circuit [`evaluate`] simulates, for inspection.
pub fn build_experiment_circuit<C: StabilizerCode + ?Sized>(
    code: &C,
    config: &EvaluationConfig,
) -> Result<Circuit, EvaluationError> {
    let locations = config.validate(code)?;
    Ok(Experiment::assemble(code, config, Carrier::Noisy(&locations))?.circuit)
}

/// Result of deliberately injecting one Pauli error.
#[derive(Debug, Clone, PartialEq)]
pub struct SingleErrorOutcome {
    pub pauli: Pauli,
    pub qubit: QubitId,
    pub result: EvaluationResult,
}

impl SingleErrorOutcome {
    pub fn corrected(&self) -> bool {
        self.result.successes == self.result.trials
    }
}

/// Run the experiment once per (X, Y, Z) x targeted qubit with that single error in
/// place of the noisy identity and no other noise.
pub fn verify_single_errors<C: StabilizerCode + ?Sized>(
    code: &C,
    config: &EvaluationConfig,
) -> Result<Vec<SingleErrorOutcome>, EvaluationError> {
    let locations = config.validate(code)?;
    let target = success_target(code, config);
    let mut simulator = NoisySimulator::noiseless();
    if let Some(seed) = config.seed {
        simulator = simulator.with_seed(seed);
    }

    let mut outcomes = Vec::with_capacity(3 * locations.len());
    for pauli in [Pauli::X, Pauli::Y, Pauli::Z] {
        for &qubit in &locations {
            let experiment = Experiment::assemble(code, config, Carrier::Injected(pauli, qubit))?;
            let successes = experiment.successes(&simulator, config.trials, target.as_ref())?;
            let result = EvaluationResult::new(0.0, config.trials, successes);
            debug!(
                "{}: {} on qubit {} -> {}/{}",
                code.name(),
                pauli,
                qubit,
                result.successes,
                result.trials
            );
            outcomes.push(SingleErrorOutcome {
                pauli,
                qubit,
                result,
            });
        }
    }
    Ok(outcomes)
}

/// Sweep results of one code.
#[derive(Debug, Clone, PartialEq)]
pub struct CodeSweep {
    pub code: String,
    pub num_physical_qubits: usize,
    pub results: Vec<EvaluationResult>,
    /// Where the encoded failure rate crosses the bare-qubit rate `2p`, if it does.
    pub pseudo_threshold: Option<f64>,
}

/// Evaluate several codes over the same noise strengths. Every configuration is
/// checked against every code before the first simulation.
pub fn compare_codes(
    codes: &[&dyn StabilizerCode],
    p_values: &[f64],
    config: &EvaluationConfig,
) -> Result<Vec<CodeSweep>, EvaluationError> {
    validate_noise_strengths(p_values)?;
    for code in codes {
        config.validate(*code)?;
    }

    codes
        .iter()
        .map(|code| {
            let results = evaluate_detailed(p_values, *code, config)?;
            let mut ordered = results.clone();
            ordered.sort_by(|a, b| a.p.total_cmp(&b.p));
            Ok(CodeSweep {
                code: code.name().to_string(),
                num_physical_qubits: code.num_physical_qubits(),
                pseudo_threshold: estimate_pseudo_threshold(&ordered),
                results,
            })
        })
        .collect()
}

/// What occupies the noise-carrier slot of the experiment.
#[derive(Debug, Clone, Copy)]
enum Carrier<'a> {
    /// `id` on each listed physical qubit.
    Noisy(&'a [usize]),
    /// One fixed Pauli on one physical qubit.
    Injected(Pauli, QubitId),
}

/// Experiment circuit plus the register holding the physical-qubit measurements.
struct Experiment {
    circuit: Circuit,
    code_measurements: Register,
}

impl Experiment {
    fn assemble<C: StabilizerCode + ?Sized>(
        code: &C,
        config: &EvaluationConfig,
        carrier: Carrier<'_>,
    ) -> Result<Self, EvaluationError> {
        let n = code.num_physical_qubits();
        let m = code.num_syndromes();

        let mut qc = Circuit::new(format!("{} Experiment", code.name()));
        let qubits_code = qc.add_qreg("code", n);
        let qubits_check = qc.add_qreg("check", m);
        let syndromes = qc.add_creg("syndromes", m);
        let code_measurements = qc.add_creg("code_measurements", n);

        let physical = qubits_code.indices();
        let mut corrector_wires = physical.clone();
        corrector_wires.extend(qubits_check.indices());

        let preparer = code.logical_zero_preparer();
        let logical_x = code.logical_x();

        qc.compose(&preparer, &physical, &[])?;
        if config.logical_state == LogicalState::One {
            qc.compose(&logical_x, &physical, &[])?;
        }

        match carrier {
            Carrier::Noisy(locations) => {
                for &q in locations {
                    qc.id(qubits_code.index(q));
                }
            }
            Carrier::Injected(pauli, q) => {
                if let Some(gate) = pauli.gate(qubits_code.index(q)) {
                    qc.apply(gate);
                }
            }
        }

        qc.compose(&code.error_corrector(), &corrector_wires, &syndromes.indices())?;

        if config.measurement == MeasurementType::Decoded {
            if config.logical_state == LogicalState::One {
                qc.compose(&logical_x, &physical, &[])?;
            }
            qc.compose(&preparer.inverse()?, &physical, &[])?;
        }
        qc.measure_many(&physical, &code_measurements.indices());

        Ok(Self {
            circuit: qc,
            code_measurements,
        })
    }

    /// Shots whose physical-qubit outcome counts as a success: all zeros when `target`
    /// is `None`, otherwise membership in `target`.
    fn successes(
        &self,
        simulator: &NoisySimulator,
        trials: usize,
        target: Option<&LogicalComponents>,
    ) -> Result<usize, EvaluationError> {
        let counts = simulator
            .run(&self.circuit, trials)?
            .marginal(&self.code_measurements);
        Ok(match target {
            None => counts.get(0),
            Some(components) => counts.count_where(|outcome| components.contains(outcome)),
        })
    }
}

/// Component set a direct measurement must land in, or `None` for decoded scoring.
fn success_target<C: StabilizerCode + ?Sized>(
    code: &C,
    config: &EvaluationConfig,
) -> Option<LogicalComponents> {
    if config.measurement == MeasurementType::Decoded {
        return None;
    }
    code.logical_zero_components()
        .map(|components| match config.logical_state {
            LogicalState::Zero => components.clone(),
            LogicalState::One => components.flipped(),
        })
}

/// Backend for the `index`-th noise strength: `p` on every `id`, seeded from its own stream.
fn strength_simulator(
    p: f64,
    index: usize,
    seed: Option<u64>,
) -> Result<NoisySimulator, EvaluationError> {
    let mut noise = NoiseModel::new();
    noise.add_all_qubit_error(PauliChannel::depolarizing_like(p)?, &[GateKind::Id]);
    let simulator = NoisySimulator::new(noise);
    Ok(match seed {
        Some(seed) => simulator.with_seed(strength_seed(seed, index)),
        None => simulator,
    })
}

fn strength_seed(base: u64, index: usize) -> u64 {
    base ^ (index as u64).wrapping_mul(STRENGTH_SEED_STRIDE)
}
