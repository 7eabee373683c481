//! Five-qubit vs nine-qubit code under the same Pauli noise.
//!
//! 1. Every single X, Y and Z error is corrected by both codes.
//! 2. Decoded success rate against the bare-qubit baseline `1 - 2p`.
//! 3. Direct scoring on the five-qubit code for both logical states.
//!
//! Run with `RUST_LOG=info` to see per-strength progress.

use qecc_sim::prelude::*;

fn main() {
    env_logger::init();

    println!("╔══════════════════════════════════════════════════════════╗");
    println!("║     Shor [[9,1,3]] vs Perfect [[5,1,3]] Code            ║");
    println!("║     Monte Carlo Recovery under Pauli Noise              ║");
    println!("╚══════════════════════════════════════════════════════════╝");
    println!();

    let five = FiveQubitCode::new();
    let nine = NineQubitCode::new();
    let codes: [&dyn StabilizerCode; 2] = [&five, &nine];

    // ═══ 1. Single-error correction ═══
    println!("═══ 1. Single-Error Correction ═══");
    println!();
    let exact = EvaluationConfig::decoded().with_trials(4).with_seed(1);
    for code in codes {
        match verify_single_errors(code, &exact) {
            Ok(outcomes) => {
                let corrected = outcomes.iter().filter(|o| o.corrected()).count();
                println!("  {:<8} {}/{} corrected", code.name(), corrected, outcomes.len());
            }
            Err(e) => println!("  {:<8} failed: {}", code.name(), e),
        }
    }
    println!();

    // ═══ 2. Decoded success vs bare qubit ═══
    println!("═══ 2. Decoded Success Rate ═══");
    println!();
    let rates = [0.0, 0.01, 0.02, 0.05, 0.08, 0.12, 0.16, 0.2];
    let config = EvaluationConfig::decoded().with_trials(400).with_seed(42);
    let sweeps = match compare_codes(&codes, &rates, &config) {
        Ok(sweeps) => sweeps,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    print!("  p      bare  ");
    for sweep in &sweeps {
        print!(" {:<8}", sweep.code);
    }
    println!();
    println!("  ─────  ───── {}", " ────────".repeat(sweeps.len()));
    for (i, &p) in rates.iter().enumerate() {
        print!("  {:.3}  {:.3} ", p, 1.0 - 2.0 * p);
        for sweep in &sweeps {
            print!(" {:.3}   ", sweep.results[i].success_fraction);
        }
        println!();
    }
    println!();
    for sweep in &sweeps {
        match sweep.pseudo_threshold {
            Some(t) => println!("  {} pseudo-threshold ≈ {:.3}", sweep.code, t),
            None => println!("  {} beats the bare qubit across this range", sweep.code),
        }
    }
    println!();

    // ═══ 3. Direct scoring ═══
    println!("═══ 3. Direct Scoring (5-Qubit) ═══");
    println!();
    for state in [LogicalState::Zero, LogicalState::One] {
        let config = EvaluationConfig::default()
            .with_logical_state(state)
            .with_trials(1000)
            .with_seed(7);
        match evaluate(vec![0.0, 0.05, 0.1], &five, &config) {
            Ok(fractions) => println!("  |{}_L⟩  {:?}", state, fractions.as_slice()),
            Err(e) => println!("  |{}_L⟩  failed: {}", state, e),
        }
    }

    // The Shor code exposes no component sets, so direct scoring is refused.
    if let Err(e) = evaluate(0.05, &nine, &EvaluationConfig::default()) {
        println!("  Shor     {}", e);
    }
}
