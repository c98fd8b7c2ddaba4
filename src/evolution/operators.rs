//! Random operators of the algorithm: population initialization, tournament
//! selection and single-bit mutation. Every draw comes from the `GaContext`.

use crate::evolution::context::GaContext;
use crate::evolution::{EvaluatedIndividual, EvolutionError, Genome, Population};
use log::trace;
use rand::Rng;
use rand::seq::index;

/// Builds the first generation: `population_size` genomes of
/// `bits_per_individual` uniformly random bits each.
pub fn initialize_population(ctx: &mut GaContext) -> Population {
    let size = ctx.config().population_size;
    let bits = ctx.config().bits_per_individual();
    let rng = ctx.rng();
    (0..size)
        .map(|_| (0..bits).map(|_| rng.random_range(0..=1u8)).collect())
        .collect()
}

/// Picks one parent by tournament.
///
/// `tournament_size` distinct individuals are drawn uniformly without
/// replacement, in random order. The winner is the first contestant in that
/// order holding the maximum fitness (stable-first-max); ties are not
/// re-broken randomly.
///
/// # Arguments
/// * `ctx` - The `GaContext` supplying the tournament size and the random source
/// * `evaluated` - The scored current generation
///
/// # Returns
/// * `Result<Genome, EvolutionError>` - A copy of the winner's genome,
///   `TournamentTooLarge` when the population cannot field a full tournament
///   (an empty population included), or `EmptyTournament` for a size of zero
pub fn tournament_select(
    ctx: &mut GaContext,
    evaluated: &[EvaluatedIndividual],
) -> Result<Genome, EvolutionError> {
    let tournament_size = ctx.config().tournament_size;
    if tournament_size == 0 {
        return Err(EvolutionError::EmptyTournament);
    }
    if tournament_size > evaluated.len() {
        return Err(EvolutionError::TournamentTooLarge {
            tournament_size,
            population_size: evaluated.len(),
        });
    }

    let contestants = index::sample(ctx.rng(), evaluated.len(), tournament_size);
    let mut winner: Option<&EvaluatedIndividual> = None;
    for i in contestants.iter() {
        let contestant = &evaluated[i];
        // strict comparison keeps the first maximum
        if winner.is_none_or(|w| contestant.fitness > w.fitness) {
            winner = Some(contestant);
        }
    }

    // at least one contestant was drawn, so there is always a winner
    let winner = winner.ok_or(EvolutionError::EmptyTournament)?;
    trace!("Tournament won with fitness {:.6}", winner.fitness);
    Ok(winner.genome.clone())
}

/// Returns a copy of `genome`, with exactly one random bit flipped with
/// probability `mutation_rate`. The input is never touched.
pub fn mutate(ctx: &mut GaContext, genome: &[u8]) -> Genome {
    let mut mutated = genome.to_vec();
    if mutated.is_empty() {
        return mutated;
    }
    let mutation_rate = ctx.config().mutation_rate;
    let rng = ctx.rng();
    if rng.random::<f64>() < mutation_rate {
        let point = rng.random_range(0..mutated.len());
        mutated[point] = 1 - mutated[point];
        trace!("Flipped bit {}", point);
    }
    mutated
}

/// Index of the fittest individual, the first one in population order on ties.
///
/// This is the element a stable descending sort by fitness would put first.
pub fn best_index(evaluated: &[EvaluatedIndividual]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (i, individual) in evaluated.iter().enumerate() {
        if best.is_none_or(|b| individual.fitness > evaluated[b].fitness) {
            best = Some(i);
        }
    }
    best
}
