use crate::config::GaConfig;
use log::debug;
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Everything an operator needs for a run: the immutable configuration and
/// the one random source every draw goes through.
///
/// Initialization, selection and mutation all borrow the same `GaContext`,
/// so a fixed seed reproduces a run exactly as long as the draw order is kept.
#[derive(Debug, Clone)]
pub struct GaContext {
    config: GaConfig,
    rng: StdRng,
}

impl GaContext {
    /// Creates a new `GaContext`
    ///
    /// # Arguments
    /// * `config` - The resolved `GaConfig`; its `seed` decides how the random source is built
    ///
    /// # Returns
    /// * `Self` - A context seeded from `config.seed`, or from OS entropy when there is none
    pub fn new(config: GaConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => {
                debug!("Seeding random source with {}", seed);
                StdRng::seed_from_u64(seed)
            }
            None => StdRng::from_os_rng(),
        };
        Self { config, rng }
    }

    pub fn config(&self) -> &GaConfig {
        &self.config
    }

    pub(crate) fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }
}
