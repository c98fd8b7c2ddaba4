pub mod codec;
pub mod context;
pub mod fitness;
pub mod operators;

use crate::evolution::codec::decode_individual;
use crate::evolution::context::GaContext;
use crate::evolution::fitness::evaluate_population;
use crate::evolution::operators::{best_index, initialize_population, mutate, tournament_select};
use log::{debug, info};
use thiserror::Error;

/// Alias within crate for genome representation, one 0/1 value per bit
pub type Genome = Vec<u8>;

/// A generation of genomes, in insertion order
pub type Population = Vec<Genome>;

#[derive(Error, Debug, PartialEq)]
pub enum EvolutionError {
    #[error("Cannot decode an empty chromosome")]
    EmptyChromosome,
    #[error("Genome has {actual} bits, expected {expected}")]
    GenomeLength { expected: usize, actual: usize },
    #[error(
        "Tournament of size {tournament_size} cannot be drawn from a population of {population_size}"
    )]
    TournamentTooLarge {
        tournament_size: usize,
        population_size: usize,
    },
    #[error("Tournament size must be at least 1")]
    EmptyTournament,
    #[error("Population is empty")]
    EmptyPopulation,
    #[error("Evolution has already terminated")]
    AlreadyTerminated,
}

/// A genome paired with the fitness it scored in the current generation.
/// Never carried over: every generation is scored afresh.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluatedIndividual {
    pub genome: Genome,
    /// Value of the objective at the decoded point, higher is better
    pub fitness: f64,
}

/// Progress record emitted once per generation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationReport {
    /// 1-based generation index
    pub generation: usize,
    pub best_fitness: f64,
    pub mean_fitness: f64,
}

/// The fittest individual of the final population, decoded
#[derive(Debug, Clone, PartialEq)]
pub struct BestSolution {
    pub x1: f64,
    pub x2: f64,
    pub fitness: f64,
    pub genome: Genome,
}

/// Outcome of a complete run
#[derive(Debug, Clone, PartialEq)]
pub struct EvolutionSummary {
    /// One entry per generation, in order
    pub history: Vec<GenerationReport>,
    pub best: BestSolution,
}

/// Lifecycle of an `EvolutionEngine`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// Population created, no generation run yet
    Initialized,
    /// `generation` (0-based) is the next generation to run
    Running { generation: usize },
    /// All iterations are done; the population is final
    Terminated,
}

/// Orchestrates the generational loop: evaluate, report, select, mutate and
/// carry the elite forward, for exactly `iterations` generations.
#[derive(Debug, Clone)]
pub struct EvolutionEngine {
    /// Configuration and random source for the whole run
    ctx: GaContext,
    /// The current generation, replaced wholesale after every step
    population: Population,
    state: EngineState,
}

impl EvolutionEngine {
    /// Creates a new EvolutionEngine and draws its initial population
    ///
    /// # Arguments
    /// * `ctx` - The `GaContext` owning the configuration and the random source
    ///
    /// # Returns
    /// * `Self` - An engine in the `Initialized` state
    pub fn new(mut ctx: GaContext) -> Self {
        info!(
            "Initializing population of size {}...",
            ctx.config().population_size
        );
        let population = initialize_population(&mut ctx);
        let state = if ctx.config().iterations == 0 {
            EngineState::Terminated
        } else {
            EngineState::Initialized
        };
        Self {
            ctx,
            population,
            state,
        }
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn population(&self) -> &[Genome] {
        &self.population
    }

    /// Runs the evolution process without observing progress
    pub fn evolve(&mut self) -> Result<EvolutionSummary, EvolutionError> {
        self.evolve_with(|_| {})
    }

    /// Runs every remaining generation, then picks the best individual of the
    /// final population.
    ///
    /// This method mutably borrows the `EvolutionEngine` instance,
    /// replacing its `population` field once per generation. After evolution, this field
    /// contains the last generation.
    ///
    /// # Arguments
    /// * `observer` - Called with each `GenerationReport` as soon as the generation is scored
    ///
    /// # Returns
    /// * `Result<EvolutionSummary, EvolutionError>` - The per-generation history and the decoded best solution
    pub fn evolve_with<F>(&mut self, mut observer: F) -> Result<EvolutionSummary, EvolutionError>
    where
        F: FnMut(&GenerationReport),
    {
        let mut history = Vec::with_capacity(self.ctx.config().iterations);
        while self.state != EngineState::Terminated {
            let report = self.step()?;
            observer(&report);
            history.push(report);
        }

        info!("--- Final Evaluation of Last Generation ---");
        let best = self.best_solution()?;
        info!(
            "Evolution complete. Best: x1={:.4}, x2={:.4}, fitness={:.4}",
            best.x1, best.x2, best.fitness
        );
        Ok(EvolutionSummary { history, best })
    }

    /// Runs a single generation and replaces the population with its offspring.
    ///
    /// `population_size - 1` slots are filled by tournament selection followed
    /// by mutation; the last slot receives an unmutated copy of the current
    /// best individual.
    ///
    /// # Returns
    /// * `Result<GenerationReport, EvolutionError>` - Best and mean fitness of the generation
    ///   that was just scored, or `AlreadyTerminated` once all iterations are done
    pub fn step(&mut self) -> Result<GenerationReport, EvolutionError> {
        let generation = match self.state {
            EngineState::Initialized => 0,
            EngineState::Running { generation } => generation,
            EngineState::Terminated => return Err(EvolutionError::AlreadyTerminated),
        };
        let iterations = self.ctx.config().iterations;
        let chromosomes_per_parameter = self.ctx.config().chromosomes_per_parameter;
        let population_size = self.ctx.config().population_size;

        let evaluated = evaluate_population(&self.population, chromosomes_per_parameter)?;
        let elite = best_index(&evaluated).ok_or(EvolutionError::EmptyPopulation)?;
        let report = GenerationReport {
            generation: generation + 1,
            best_fitness: evaluated[elite].fitness,
            mean_fitness: evaluated.iter().map(|ind| ind.fitness).sum::<f64>()
                / evaluated.len() as f64,
        };
        info!(
            "Gen {}/{}: Best Fitness={:.4} | Mean Fitness={:.4}",
            report.generation, iterations, report.best_fitness, report.mean_fitness
        );

        let mut next_generation = Vec::with_capacity(population_size);
        for _ in 0..population_size.saturating_sub(1) {
            let parent = tournament_select(&mut self.ctx, &evaluated)?;
            next_generation.push(mutate(&mut self.ctx, &parent));
        }
        // Preserve the best for next generation (exploitation)
        next_generation.push(evaluated[elite].genome.clone());
        debug!(
            "Elite carried forward with fitness {:.6}",
            evaluated[elite].fitness
        );

        self.population = next_generation;
        self.state = if generation + 1 >= iterations {
            EngineState::Terminated
        } else {
            EngineState::Running {
                generation: generation + 1,
            }
        };
        Ok(report)
    }

    /// Scores the current population and decodes its fittest member, the
    /// first one in population order on ties.
    pub fn best_solution(&self) -> Result<BestSolution, EvolutionError> {
        let chromosomes_per_parameter = self.ctx.config().chromosomes_per_parameter;
        let evaluated = evaluate_population(&self.population, chromosomes_per_parameter)?;
        let best = best_index(&evaluated).ok_or(EvolutionError::EmptyPopulation)?;
        let EvaluatedIndividual { genome, fitness } = evaluated[best].clone();
        let (x1, x2) = decode_individual(&genome, chromosomes_per_parameter)?;
        Ok(BestSolution {
            x1,
            x2,
            fitness,
            genome,
        })
    }
}
