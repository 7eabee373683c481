use proptest::prelude::*;

use qecc_circuit::gate::Pauli;
use qecc_sim::prelude::*;

fn pauli_strategy() -> impl Strategy<Value = Pauli> {
    prop_oneof![Just(Pauli::X), Just(Pauli::Y), Just(Pauli::Z)]
}

fn anticommutes(a: Pauli, b: Pauli) -> bool {
    a != Pauli::I && b != Pauli::I && a != b
}

/// Syndrome of a single-qubit error against the cyclic generators `X Z Z X I`.
fn five_qubit_model(pauli: Pauli, j: usize) -> u64 {
    let generator = [Pauli::X, Pauli::Z, Pauli::Z, Pauli::X, Pauli::I];
    (0..4).fold(0, |acc, i| {
        let g = generator[(j + 5 - i) % 5];
        acc | (anticommutes(pauli, g) as u64) << i
    })
}

/// Syndrome of a single-qubit error on the nine-qubit code, from the parity checks alone.
fn nine_qubit_model(pauli: Pauli, q: usize) -> u64 {
    let (block, offset) = (q / 3, q % 3);
    let mut s = 0;
    if matches!(pauli, Pauli::X | Pauli::Y) {
        if offset < 2 {
            s |= 1 << (2 * block);
        }
        if offset > 0 {
            s |= 1 << (2 * block + 1);
        }
    }
    if matches!(pauli, Pauli::Z | Pauli::Y) {
        if block < 2 {
            s |= 1 << 6;
        }
        if block > 0 {
            s |= 1 << 7;
        }
    }
    s
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn five_qubit_closed_form_matches_anticommutation(pauli in pauli_strategy(), j in 0usize..5) {
        prop_assert_eq!(FiveQubitCode::syndrome_of(pauli, j), five_qubit_model(pauli, j));
    }

    #[test]
    fn five_qubit_decodes_its_own_syndromes(pauli in pauli_strategy(), j in 0usize..5) {
        let code = FiveQubitCode::new();
        let s = FiveQubitCode::syndrome_of(pauli, j);
        prop_assert_ne!(s, 0);
        prop_assert_eq!(code.decode_syndrome(s), vec![Correction::single(pauli, j)]);
    }

    #[test]
    fn five_qubit_nonzero_syndromes_have_one_correction(s in 1u64..16) {
        prop_assert_eq!(FiveQubitCode::new().decode_syndrome(s).len(), 1);
    }

    #[test]
    fn nine_qubit_locates_single_errors(pauli in pauli_strategy(), q in 0usize..9) {
        let code = NineQubitCode::new();
        let block = NineQubitCode::block_of(q);
        let mut expected = Vec::new();
        if matches!(pauli, Pauli::Z | Pauli::Y) {
            expected.push(Correction::new(Pauli::Z, vec![3 * block, 3 * block + 1, 3 * block + 2]));
        }
        if matches!(pauli, Pauli::X | Pauli::Y) {
            expected.push(Correction::single(Pauli::X, q));
        }
        prop_assert_eq!(code.decode_syndrome(nine_qubit_model(pauli, q)), expected);
    }

    #[test]
    fn nine_qubit_corrections_stay_on_the_code(s in 0u64..256) {
        let corrections = NineQubitCode::new().decode_syndrome(s);
        prop_assert!(corrections.len() <= 4);
        for c in &corrections {
            prop_assert!(c.qubits.iter().all(|&q| q < 9), "{}", c);
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(8))]

    #[test]
    fn fractions_are_probabilities(p in 0.0f64..=(1.0 / 3.0), seed in any::<u64>()) {
        let config = EvaluationConfig::default().with_trials(20).with_seed(seed);
        let f = evaluate(p, &FiveQubitCode::new(), &config).unwrap().single().unwrap();
        prop_assert!((0.0..=1.0).contains(&f));
    }

    #[test]
    fn strengths_above_one_third_are_rejected(p in (1.0f64 / 3.0 + 1e-9)..1.0) {
        let config = EvaluationConfig::decoded().with_trials(10);
        prop_assert_eq!(
            evaluate(p, &FiveQubitCode::new(), &config),
            Err(EvaluationError::InvalidNoiseStrength { p })
        );
    }
}
