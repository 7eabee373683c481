//! Circuit-level behaviour of both codes on the noiseless backend.

use qecc_circuit::prelude::*;
use qecc_sim::prelude::*;

/// Outcomes of one run: physical-qubit measurements and syndromes.
struct Run {
    code: Counts,
    syndromes: Counts,
}

/// prepare → `errors` → logical X `x_times` times → corrector → (inverse preparer) → measure.
fn run_encoded(
    code: &dyn StabilizerCode,
    errors: &[Gate],
    x_times: usize,
    decode: bool,
    shots: usize,
) -> Run {
    let n = code.num_physical_qubits();
    let m = code.num_syndromes();
    let mut qc = Circuit::new("property");
    let data = qc.add_qreg("code", n);
    let check = qc.add_qreg("check", m);
    let syndromes = qc.add_creg("syndromes", m);
    let out = qc.add_creg("out", n);
    let mut wires = data.indices();
    wires.extend(check.indices());

    let preparer = code.logical_zero_preparer();
    qc.compose(&preparer, &data.indices(), &[]).unwrap();
    for gate in errors {
        qc.apply(gate.clone());
    }
    for _ in 0..x_times {
        qc.compose(&code.logical_x(), &data.indices(), &[]).unwrap();
    }
    qc.compose(&code.error_corrector(), &wires, &syndromes.indices())
        .unwrap();
    if decode {
        qc.compose(&preparer.inverse().unwrap(), &data.indices(), &[])
            .unwrap();
    }
    qc.measure_many(&data.indices(), &out.indices());

    let counts = NoisySimulator::noiseless()
        .with_seed(11)
        .run(&qc, shots)
        .unwrap();
    Run {
        code: counts.marginal(&out),
        syndromes: counts.marginal(&syndromes),
    }
}

fn codes() -> (FiveQubitCode, NineQubitCode) {
    (FiveQubitCode::new(), NineQubitCode::new())
}

#[test]
fn zero_noise_keeps_codeword_and_trivial_syndrome() {
    let (five, nine) = codes();
    for code in [&five as &dyn StabilizerCode, &nine] {
        let run = run_encoded(code, &[], 0, true, 50);
        assert_eq!(run.code.get(0), 50, "{} decoded outcomes {}", code.name(), run.code);
        assert_eq!(run.syndromes.get(0), 50, "{} syndromes {}", code.name(), run.syndromes);
    }
}

#[test]
fn five_qubit_codeword_measures_into_components() {
    let five = FiveQubitCode::new();
    let components = five.logical_zero_components().unwrap();
    let run = run_encoded(&five, &[], 0, false, 400);
    assert_eq!(run.code.count_where(|s| components.contains(s)), 400);
    // Sixteen equally likely components.
    assert!(run.code.len() > 8, "only {} distinct outcomes", run.code.len());
}

#[test]
fn logical_x_then_decode_is_never_all_zero() {
    let (five, nine) = codes();

    let run = run_encoded(&nine, &[], 1, true, 20);
    assert_eq!(run.code.get(0), 0);
    assert_eq!(run.code.len(), 1, "Shor logical one decodes to one pattern: {}", run.code);

    let run = run_encoded(&five, &[], 1, true, 200);
    assert_eq!(run.code.get(0), 0, "outcomes {}", run.code);
}

#[test]
fn logical_x_twice_is_identity() {
    let (five, nine) = codes();
    let components = five.logical_zero_components().unwrap();

    let once = run_encoded(&five, &[], 1, false, 200);
    assert_eq!(once.code.count_where(|s| components.flipped().contains(s)), 200);

    let twice = run_encoded(&five, &[], 2, false, 200);
    assert_eq!(twice.code.count_where(|s| components.contains(s)), 200);

    let twice = run_encoded(&nine, &[], 2, true, 10);
    assert_eq!(twice.code.get(0), 10);
}

#[test]
fn five_qubit_measured_syndromes_match_closed_forms() {
    let five = FiveQubitCode::new();
    for pauli in [Pauli::X, Pauli::Y, Pauli::Z] {
        for j in 0..5 {
            let error = pauli.gate(j).unwrap();
            let run = run_encoded(&five, &[error], 0, true, 5);
            let expected = FiveQubitCode::syndrome_of(pauli, j);
            assert_eq!(
                run.syndromes.get(expected),
                5,
                "{} on {}: syndromes {}",
                pauli,
                j,
                run.syndromes
            );
            assert_eq!(run.code.get(0), 5, "{} on {} not corrected", pauli, j);
        }
    }
}

#[test]
fn nine_qubit_single_errors_are_corrected_in_place() {
    let nine = NineQubitCode::new();
    for pauli in [Pauli::X, Pauli::Y, Pauli::Z] {
        for j in 0..9 {
            let error = pauli.gate(j).unwrap();
            let run = run_encoded(&nine, &[error], 0, true, 2);
            assert_eq!(run.syndromes.len(), 1, "syndrome must be deterministic");
            let (syndrome, _) = run.syndromes.iter().next().unwrap();
            assert!(!nine.decode_syndrome(syndrome).is_empty(), "{} on {}", pauli, j);
            assert_eq!(run.code.get(0), 2, "{} on {} not corrected", pauli, j);
        }
    }
}

#[test]
fn single_errors_corrected_through_harness() {
    let (five, nine) = codes();
    for state in [LogicalState::Zero, LogicalState::One] {
        let config = EvaluationConfig::decoded()
            .with_logical_state(state)
            .with_trials(2)
            .with_seed(3);
        for code in [&five as &dyn StabilizerCode, &nine] {
            let outcomes = verify_single_errors(code, &config).unwrap();
            assert_eq!(outcomes.len(), 3 * code.num_physical_qubits());
            for o in &outcomes {
                assert!(o.corrected(), "{} {} on {} with |{}_L⟩", code.name(), o.pauli, o.qubit, state);
            }
        }

        let direct = EvaluationConfig::default()
            .with_logical_state(state)
            .with_trials(20)
            .with_seed(4);
        for o in verify_single_errors(&five, &direct).unwrap() {
            assert!(o.corrected(), "direct {} on {} with |{}_L⟩", o.pauli, o.qubit, state);
        }
    }
}

#[test]
fn two_errors_can_defeat_the_five_qubit_code() {
    let five = FiveQubitCode::new();
    // X0 Z1 has syndrome 8 ^ 10 = 2, read as Z on qubit 4. The residual X0 Z1 Z4
    // anticommutes with logical Z, so the decoded state is logical one.
    assert_eq!(FiveQubitCode::syndrome_of(Pauli::Z, 4), 2);
    let run = run_encoded(&five, &[Gate::X(0), Gate::Z(1)], 0, true, 20);
    assert_eq!(run.code.get(0), 0);
}
