use binary_ga::config::GaConfig;
use binary_ga::evolution::EvolutionEngine;
use binary_ga::evolution::context::GaContext;
use binary_ga::evolution::fitness::evaluate_population;
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

// A larger run than the defaults so the loop dominates setup
fn bench_config() -> GaConfig {
    GaConfig {
        population_size: 101,
        chromosomes_per_parameter: 16,
        iterations: 50,
        mutation_rate: 0.1,
        tournament_size: 5,
        seed: Some(7),
    }
}

fn benchmark_evolution(c: &mut Criterion) {
    let engine = EvolutionEngine::new(GaContext::new(bench_config()));

    let mut group = c.benchmark_group("EvolutionEngine Performance");

    group.bench_function("evaluate_population", |b| {
        let cpp = bench_config().chromosomes_per_parameter;
        b.iter(|| evaluate_population(black_box(engine.population()), cpp))
    });

    group.bench_function("evolve_full_run", |b| {
        // `clone` resets the population and random source for each run.
        b.iter(|| {
            let mut cloned_engine = engine.clone();
            cloned_engine.evolve()
        })
    });

    group.finish();
}

criterion_group!(benches, benchmark_evolution);
criterion_main!(benches);
