use crate::config::{MAX_VALUE, MIN_VALUE};
use crate::evolution::EvolutionError;

/// Decodes a chromosome into a real number in `[min, max]`.
///
/// The bits are read least-significant first: `bits[i]` contributes `bits[i] * 2^i`.
/// The resulting integer is scaled linearly so that all zeros map to `min`
/// and all ones map to `max`.
///
/// # Arguments
/// * `bits` - Slice of 0/1 values forming one chromosome
/// * `min` - Lower bound of the target range
/// * `max` - Upper bound of the target range
///
/// # Returns
/// * `Result<f64, EvolutionError>` - The decoded value, or `EmptyChromosome` if `bits` is empty
pub fn decode_chromosome(bits: &[u8], min: f64, max: f64) -> Result<f64, EvolutionError> {
    if bits.is_empty() {
        return Err(EvolutionError::EmptyChromosome);
    }
    // v / (2^len - 1) == sum(bits[i] * 2^(i - len)) / (1 - 2^-len), which stays
    // finite for any length
    let len = bits.len() as i32;
    let scaled = bits
        .iter()
        .enumerate()
        .map(|(i, &bit)| f64::from(bit) * 2f64.powi(i as i32 - len))
        .sum::<f64>();
    let ratio = (scaled / (1.0 - 2f64.powi(-len))).min(1.0);
    Ok(min + (max - min) * ratio)
}

/// Splits a genome into its two chromosomes and decodes them to `(x1, x2)`
/// over the fixed search domain.
pub fn decode_individual(
    genome: &[u8],
    chromosomes_per_parameter: usize,
) -> Result<(f64, f64), EvolutionError> {
    let expected = chromosomes_per_parameter * 2;
    if genome.len() != expected {
        return Err(EvolutionError::GenomeLength {
            expected,
            actual: genome.len(),
        });
    }
    let (first, second) = genome.split_at(chromosomes_per_parameter);
    let x1 = decode_chromosome(first, MIN_VALUE, MAX_VALUE)?;
    let x2 = decode_chromosome(second, MIN_VALUE, MAX_VALUE)?;
    Ok((x1, x2))
}
