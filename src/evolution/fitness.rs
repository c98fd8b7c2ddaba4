use crate::evolution::codec::decode_individual;
use crate::evolution::{EvaluatedIndividual, EvolutionError, Genome};
use log::trace;

/// The function being maximized.
pub fn objective(x1: f64, x2: f64) -> f64 {
    (x1 * 0.05).sin() + (x2 * 0.05).sin() + 0.4 * (x1 * 0.15).sin() * (x2 * 0.15).sin()
}

/// Decodes a genome and scores it. Higher is fitter; the raw objective is
/// used with no scaling or shifting.
///
/// # Arguments
/// * `genome` - The bits of one individual
/// * `chromosomes_per_parameter` - Length of each half of the genome
///
/// # Returns
/// * `Result<f64, EvolutionError>` - The fitness, or a decoding error for a malformed genome
pub fn evaluate_fitness(
    genome: &[u8],
    chromosomes_per_parameter: usize,
) -> Result<f64, EvolutionError> {
    let (x1, x2) = decode_individual(genome, chromosomes_per_parameter)?;
    Ok(objective(x1, x2))
}

/// Scores every individual, in population order.
pub fn evaluate_population(
    population: &[Genome],
    chromosomes_per_parameter: usize,
) -> Result<Vec<EvaluatedIndividual>, EvolutionError> {
    population
        .iter()
        .map(|genome| {
            let fitness = evaluate_fitness(genome, chromosomes_per_parameter)?;
            trace!("Genome {:?} scored {:.6}", genome, fitness);
            Ok(EvaluatedIndividual {
                genome: genome.clone(),
                fitness,
            })
        })
        .collect()
}
