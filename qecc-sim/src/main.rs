//! Noise sweep for the nine-qubit and five-qubit codes.
//!
//! # Usage
//!
//! ```bash
//! # Five-qubit code, direct scoring, default strengths
//! cargo run --release -p qecc-sim --bin qecc-sweep
//!
//! # Shor code, decoded scoring, logical one, CSV on stdout
//! cargo run --release -p qecc-sim --bin qecc-sweep -- \
//!     --code nine --measurement decoded --logical-state 1 --p 0,0.02,0.05 --csv
//!
//! # Check that every single X/Y/Z error is corrected
//! cargo run --release -p qecc-sim --bin qecc-sweep -- --code both --measurement decoded --verify
//! ```
//!
//! Set `RUST_LOG=info` to log each noise strength as it finishes.

use std::error::Error;

use clap::{Parser, ValueEnum};
use log::error;

use qecc_sim::prelude::*;

#[derive(Parser, Debug)]
#[command(name = "qecc-sweep")]
#[command(about = "Monte Carlo success rates of small stabilizer codes under Pauli noise")]
struct Args {
    /// Code to evaluate
    #[arg(long, value_enum, default_value_t = CodeChoice::Five)]
    code: CodeChoice,

    /// Per-Pauli error probabilities (comma-separated, each in [0, 1/3])
    #[arg(long, value_delimiter = ',', default_values_t = vec![0.0, 0.01, 0.02, 0.05, 0.1, 0.15, 0.2])]
    p: Vec<f64>,

    /// Shots per noise strength
    #[arg(long, default_value_t = 1000)]
    trials: usize,

    /// Logical input state (0 or 1)
    #[arg(long, default_value = "0", value_parser = parse_logical_state)]
    logical_state: LogicalState,

    /// Scoring: direct (alias logical) or decoded (alias 0s)
    #[arg(long, default_value = "direct")]
    measurement: MeasurementType,

    /// Qubits receiving noise: "all" or a comma-separated list of indices
    #[arg(long, default_value = "all")]
    error_locations: ErrorLocations,

    /// Base seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Output results as CSV to stdout
    #[arg(long)]
    csv: bool,

    /// Inject every single X/Y/Z error deterministically instead of sweeping
    #[arg(long)]
    verify: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum CodeChoice {
    Five,
    Nine,
    Both,
}

fn parse_logical_state(s: &str) -> Result<LogicalState, Box<dyn Error + Send + Sync>> {
    let bit: u8 = s.parse()?;
    Ok(LogicalState::try_from(bit)?)
}

fn build_config(args: &Args) -> EvaluationConfig {
    let config = EvaluationConfig::default()
        .with_logical_state(args.logical_state)
        .with_trials(args.trials)
        .with_measurement(args.measurement)
        .with_error_locations(args.error_locations.clone());
    match args.seed {
        Some(seed) => config.with_seed(seed),
        None => config,
    }
}

fn print_sweep(sweep: &CodeSweep, csv: bool) {
    if csv {
        for r in &sweep.results {
            println!("{}", r.to_csv(&sweep.code));
        }
        return;
    }

    println!("{} code ({} physical qubits)", sweep.code, sweep.num_physical_qubits);
    println!("  p        success   95% CI              bare qubit");
    println!("  ───────  ────────  ──────────────────  ──────────");
    for r in &sweep.results {
        println!(
            "  {:.4}   {:.4}    [{:.4}, {:.4}]    {:.4}",
            r.p,
            r.success_fraction,
            r.ci_low,
            r.ci_high,
            1.0 - r.unencoded_failure()
        );
    }
    match sweep.pseudo_threshold {
        Some(t) => println!("  pseudo-threshold ≈ {:.4}", t),
        None => println!("  no pseudo-threshold crossing in this range"),
    }
    println!();
}

fn print_verification(code: &dyn StabilizerCode, outcomes: &[SingleErrorOutcome]) -> bool {
    let failed: Vec<&SingleErrorOutcome> = outcomes.iter().filter(|o| !o.corrected()).collect();
    println!(
        "{}: {}/{} single-qubit errors corrected",
        code.name(),
        outcomes.len() - failed.len(),
        outcomes.len()
    );
    for o in &failed {
        println!(
            "  {} on qubit {}: {}/{} shots recovered",
            o.pauli, o.qubit, o.result.successes, o.result.trials
        );
    }
    failed.is_empty()
}

fn run(args: &Args) -> Result<bool, EvaluationError> {
    let config = build_config(args);
    let five = FiveQubitCode::new();
    let nine = NineQubitCode::new();
    let codes: Vec<&dyn StabilizerCode> = match args.code {
        CodeChoice::Five => vec![&five as &dyn StabilizerCode],
        CodeChoice::Nine => vec![&nine as &dyn StabilizerCode],
        CodeChoice::Both => vec![&five as &dyn StabilizerCode, &nine],
    };

    if args.verify {
        let mut all_corrected = true;
        for code in &codes {
            let outcomes = verify_single_errors(*code, &config)?;
            all_corrected &= print_verification(*code, &outcomes);
        }
        return Ok(all_corrected);
    }

    let sweeps = compare_codes(&codes, &args.p, &config)?;
    if args.csv {
        println!("{}", CSV_HEADER);
    }
    for sweep in &sweeps {
        print_sweep(sweep, args.csv);
    }
    Ok(true)
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    match run(&args) {
        Ok(true) => {}
        Ok(false) => std::process::exit(2),
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
