use binary_ga::config::GaConfig;
use binary_ga::evolution::EvolutionEngine;
use binary_ga::evolution::context::GaContext;
use std::env;
use std::path::PathBuf;
use std::process;

const DEFAULT_CONFIG_PATH: &str = "config.toml";

fn main() {
    env_logger::init();
    log::info!("Booting binary GA...");

    // 1. Load Configuration, bad values fall back to their defaults
    let config_path = env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
    let config = GaConfig::load_or_default(&config_path);
    log::info!(
        "Configuration: population={}, chromosomes/parameter={}, iterations={}, mutation rate={}, tournament={}, seed={:?}",
        config.population_size,
        config.chromosomes_per_parameter,
        config.iterations,
        config.mutation_rate,
        config.tournament_size,
        config.seed
    );

    // 2. Run the Evolution
    log::info!("--- Starting Evolution ---");
    let mut engine = EvolutionEngine::new(GaContext::new(config));
    let summary = match engine.evolve_with(|report| {
        println!(
            "Iteration {}: best fitness = {}, mean fitness = {}",
            report.generation, report.best_fitness, report.mean_fitness
        );
    }) {
        Ok(s) => s,
        Err(e) => {
            log::error!("Evolution failed: {}", e);
            process::exit(1);
        }
    };

    // 3. Report the best solution
    let best = summary.best;
    println!(
        "Best solution: x1 = {}, x2 = {}, f(x1, x2) = {}",
        best.x1, best.x2, best.fitness
    );
}
