use log::{debug, warn};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;
use toml::Value;

/// Lower bound of the search domain for both x1 and x2
pub const MIN_VALUE: f64 = 0.0;
/// Upper bound of the search domain for both x1 and x2
pub const MAX_VALUE: f64 = 100.0;

const DEFAULT_POPULATION_SIZE: usize = 9;
const DEFAULT_CHROMOSOMES_PER_PARAMETER: usize = 5;
const DEFAULT_ITERATIONS: usize = 20;
const DEFAULT_MUTATION_RATE: f64 = 0.1;
const DEFAULT_TOURNAMENT_SIZE: usize = 2;

/// Integer parameters are bounded the way a 32-bit prompt would bound them.
const INT_LIMIT: i64 = i32::MAX as i64;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileReadError(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Resolved parameters of a single run. Once built it is never modified.
#[derive(Debug, Clone, PartialEq)]
pub struct GaConfig {
    /// Number of individuals per generation, always odd
    pub population_size: usize,
    /// Bits encoding each of the two parameters
    pub chromosomes_per_parameter: usize,
    /// Number of generations to run
    pub iterations: usize,
    /// Probability that an offspring gets exactly one bit flipped
    pub mutation_rate: f64,
    /// Number of contestants drawn per tournament
    pub tournament_size: usize,
    /// Seed for the random source, `None` draws from OS entropy
    pub seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: DEFAULT_POPULATION_SIZE,
            chromosomes_per_parameter: DEFAULT_CHROMOSOMES_PER_PARAMETER,
            iterations: DEFAULT_ITERATIONS,
            mutation_rate: DEFAULT_MUTATION_RATE,
            tournament_size: DEFAULT_TOURNAMENT_SIZE,
            seed: None,
        }
    }
}

impl GaConfig {
    /// Loads a config file and resolves it, falling back to defaults on any failure.
    ///
    /// A missing or malformed file is not fatal: the problem is logged and
    /// `GaConfig::default()` is returned.
    ///
    /// # Arguments
    /// * `path` - Reference to the `Path` of the TOML config file
    ///
    /// # Returns
    /// * `GaConfig` - The resolved configuration
    pub fn load_or_default(path: &Path) -> Self {
        match RawConfig::load(path) {
            Ok(raw) => raw.resolve(),
            Err(e) => {
                warn!(
                    "Could not use config file '{}' ({}). Falling back to defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Length of an individual's genome, two chromosomes back to back.
    pub fn bits_per_individual(&self) -> usize {
        self.chromosomes_per_parameter * 2
    }

    /// Largest tournament allowed for the given population size (floor division).
    pub fn max_tournament_size(population_size: usize) -> usize {
        (population_size / 5).max(2)
    }
}

/// On-disk form of the configuration.
///
/// Fields are kept loosely typed so that a bad value can be replaced by its
/// default instead of failing deserialization of the whole file.
#[derive(Deserialize, Debug, Default, Clone)]
pub struct RawConfig {
    pub population_size: Option<Value>,
    pub chromosomes_per_parameter: Option<Value>,
    pub iterations: Option<Value>,
    pub mutation_rate: Option<Value>,
    pub tournament_size: Option<Value>,
    pub seed: Option<Value>,
}

impl RawConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config: RawConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Applies range validation and the per-parameter fallback policy.
    ///
    /// The tournament bound depends on the population size, so the population
    /// is resolved (and forced odd) first.
    ///
    /// # Returns
    /// * `GaConfig` - Every field either the supplied value or its default
    pub fn resolve(&self) -> GaConfig {
        let mut population_size = read_int(
            "population_size",
            self.population_size.as_ref(),
            DEFAULT_POPULATION_SIZE,
            1,
            INT_LIMIT,
        );
        if population_size % 2 == 0 {
            debug!(
                "population_size {} is even, bumping to {}",
                population_size,
                population_size + 1
            );
            population_size += 1;
        }

        let chromosomes_per_parameter = read_int(
            "chromosomes_per_parameter",
            self.chromosomes_per_parameter.as_ref(),
            DEFAULT_CHROMOSOMES_PER_PARAMETER,
            3,
            INT_LIMIT,
        );
        let iterations = read_int(
            "iterations",
            self.iterations.as_ref(),
            DEFAULT_ITERATIONS,
            1,
            INT_LIMIT,
        );
        let mutation_rate = read_real(
            "mutation_rate",
            self.mutation_rate.as_ref(),
            DEFAULT_MUTATION_RATE,
            0.0,
            1.0,
        );
        let tournament_size = read_int(
            "tournament_size",
            self.tournament_size.as_ref(),
            DEFAULT_TOURNAMENT_SIZE,
            2,
            GaConfig::max_tournament_size(population_size) as i64,
        );
        let seed = self.seed.as_ref().and_then(|value| {
            let seed = as_integer(value).and_then(|n| u64::try_from(n).ok());
            if seed.is_none() {
                warn!("Ignoring invalid seed {}, using system entropy", value);
            }
            seed
        });

        GaConfig {
            population_size,
            chromosomes_per_parameter,
            iterations,
            mutation_rate,
            tournament_size,
            seed,
        }
    }
}

fn as_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Integer(n) => Some(*n),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn as_real(value: &Value) -> Option<f64> {
    match value {
        Value::Float(x) => Some(*x),
        Value::Integer(n) => Some(*n as f64),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn read_int(name: &str, value: Option<&Value>, default: usize, min: i64, max: i64) -> usize {
    let Some(value) = value else {
        return default;
    };
    match as_integer(value).filter(|n| (min..=max).contains(n)) {
        Some(n) => n as usize,
        None => {
            warn!(
                "Invalid {} '{}' (expected an integer in [{}, {}]), using default {}",
                name, value, min, max, default
            );
            default
        }
    }
}

fn read_real(name: &str, value: Option<&Value>, default: f64, min: f64, max: f64) -> f64 {
    let Some(value) = value else {
        return default;
    };
    // NaN fails the range check and falls back as well
    match as_real(value).filter(|x| *x >= min && *x <= max) {
        Some(x) => x,
        None => {
            warn!(
                "Invalid {} '{}' (expected a number in [{}, {}]), using default {}",
                name, value, min, max, default
            );
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    fn resolve_str(content: &str) -> GaConfig {
        let raw: RawConfig = toml::from_str(content).unwrap();
        raw.resolve()
    }

    #[test]
    fn test_valid_config_loads() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("config.toml");
        let mut file = File::create(&file_path).unwrap();
        write!(
            file,
            "population_size = 25\nchromosomes_per_parameter = 8\niterations = 40\nmutation_rate = 0.25\ntournament_size = 5\nseed = 7"
        )
        .unwrap();

        let config = GaConfig::load_or_default(&file_path);
        assert_eq!(
            config,
            GaConfig {
                population_size: 25,
                chromosomes_per_parameter: 8,
                iterations: 40,
                mutation_rate: 0.25,
                tournament_size: 5,
                seed: Some(7),
            }
        );
        assert_eq!(config.bits_per_individual(), 16);
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let dir = tempdir().unwrap();
        let config = GaConfig::load_or_default(&dir.path().join("nope.toml"));
        assert_eq!(config, GaConfig::default());
    }

    #[test]
    fn test_malformed_file_falls_back_to_defaults() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("broken.toml");
        let mut file = File::create(&file_path).unwrap();
        write!(file, "population_size = = 3").unwrap();

        assert!(matches!(
            RawConfig::load(&file_path),
            Err(ConfigError::ParseError(_))
        ));
        assert_eq!(GaConfig::load_or_default(&file_path), GaConfig::default());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        assert_eq!(resolve_str(""), GaConfig::default());
    }

    #[test]
    fn test_even_population_is_made_odd() {
        assert_eq!(resolve_str("population_size = 10").population_size, 11);
        assert_eq!(resolve_str("population_size = 1").population_size, 1);
    }

    #[test]
    fn test_non_numeric_values_fall_back() {
        let config = resolve_str(
            "population_size = \"lots\"\nchromosomes_per_parameter = true\niterations = \"x\"\nmutation_rate = \"high\"\ntournament_size = [3]",
        );
        assert_eq!(config, GaConfig::default());
    }

    #[test]
    fn test_numeric_strings_are_parsed() {
        let config = resolve_str("population_size = \" 21 \"\nmutation_rate = \"0.5\"");
        assert_eq!(config.population_size, 21);
        assert_eq!(config.mutation_rate, 0.5);
    }

    #[test]
    fn test_out_of_range_values_fall_back() {
        let config = resolve_str(
            "population_size = 0\nchromosomes_per_parameter = 2\niterations = -4\nmutation_rate = 1.5\ntournament_size = 1",
        );
        assert_eq!(config, GaConfig::default());

        let config = resolve_str("mutation_rate = \"NaN\"");
        assert_eq!(config.mutation_rate, DEFAULT_MUTATION_RATE);
    }

    #[test]
    fn test_integer_fields_reject_reals() {
        let config = resolve_str("chromosomes_per_parameter = 3.5\niterations = 10.0");
        assert_eq!(config.chromosomes_per_parameter, DEFAULT_CHROMOSOMES_PER_PARAMETER);
        assert_eq!(config.iterations, DEFAULT_ITERATIONS);
    }

    #[test]
    fn test_mutation_rate_bounds_are_inclusive() {
        assert_eq!(resolve_str("mutation_rate = 0").mutation_rate, 0.0);
        assert_eq!(resolve_str("mutation_rate = 1").mutation_rate, 1.0);
    }

    #[test]
    fn test_tournament_bound_uses_floor_division() {
        // 29 / 5 == 5
        let config = resolve_str("population_size = 29\ntournament_size = 5");
        assert_eq!(config.tournament_size, 5);
        let config = resolve_str("population_size = 29\ntournament_size = 6");
        assert_eq!(config.tournament_size, DEFAULT_TOURNAMENT_SIZE);

        // small populations still allow a tournament of two
        let config = resolve_str("population_size = 3\ntournament_size = 2");
        assert_eq!(config.tournament_size, 2);
        let config = resolve_str("population_size = 3\ntournament_size = 3");
        assert_eq!(config.tournament_size, DEFAULT_TOURNAMENT_SIZE);
    }

    #[test]
    fn test_tournament_bound_follows_odd_population() {
        // 14 becomes 15, and 15 / 5 == 3
        let config = resolve_str("population_size = 14\ntournament_size = 3");
        assert_eq!(config.population_size, 15);
        assert_eq!(config.tournament_size, 3);
    }

    #[test]
    fn test_invalid_seed_is_ignored() {
        assert_eq!(resolve_str("seed = -1").seed, None);
        assert_eq!(resolve_str("seed = \"abc\"").seed, None);
        assert_eq!(resolve_str("seed = \"12\"").seed, Some(12));
    }
}
