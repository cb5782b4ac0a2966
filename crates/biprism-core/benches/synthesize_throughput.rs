use biprism_core::{solve, synthesize, InputParameters, SynthesisOpts};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn synthesize_bench(c: &mut Criterion) {
    let solution = solve(InputParameters::default()).unwrap();
    let inputs = solution.results.plot_inputs();
    let opts = SynthesisOpts::default();

    c.bench_function("solve_defaults", |b| {
        b.iter(|| black_box(solve(black_box(InputParameters::default())).unwrap()));
    });

    c.bench_function("synthesize_default_window", |b| {
        b.iter(|| black_box(synthesize(black_box(&inputs), &opts).unwrap()));
    });
}

criterion_group!(benches, synthesize_bench);
criterion_main!(benches);
