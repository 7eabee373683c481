use criterion::{black_box, criterion_group, criterion_main, Criterion};
use qecc_sim::prelude::*;

fn benchmark_circuit_construction(c: &mut Criterion) {
    let five = FiveQubitCode::new();
    let nine = NineQubitCode::new();
    let config = EvaluationConfig::decoded();

    c.bench_function("build_five_qubit_experiment", |b| {
        b.iter(|| build_experiment_circuit(black_box(&five), &config).unwrap());
    });

    c.bench_function("build_nine_qubit_experiment", |b| {
        b.iter(|| build_experiment_circuit(black_box(&nine), &config).unwrap());
    });

    c.bench_function("decode_all_nine_qubit_syndromes", |b| {
        b.iter(|| {
            (0..256u64)
                .map(|s| nine.decode_syndrome(black_box(s)).len())
                .sum::<usize>()
        });
    });
}

fn benchmark_evaluation(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluate");
    group.sample_size(10);

    let five = FiveQubitCode::new();
    let config = EvaluationConfig::decoded().with_trials(1000).with_seed(1);
    group.bench_function("five_qubit_1000_trials", |b| {
        b.iter(|| evaluate(black_box(0.05), &five, &config).unwrap());
    });

    let nine = NineQubitCode::new();
    let config = EvaluationConfig::decoded().with_trials(50).with_seed(1);
    group.bench_function("nine_qubit_50_trials", |b| {
        b.iter(|| evaluate(black_box(0.05), &nine, &config).unwrap());
    });

    group.finish();
}

criterion_group!(benches, benchmark_circuit_construction, benchmark_evaluation);
criterion_main!(benches);
