use rand::Rng;
use rand::distr::Distribution;
use rand::distr::StandardUniform;

/// Generate `n` random elements using the given source of randomness.
///
/// For an example implementation of the [`Distribution`] trait for
/// [`StandardUniform`], see [`PrimeFieldElement`][pfe].
///
/// [pfe]: crate::prelude::PrimeFieldElement
pub fn random_elements<T, R>(n: usize, rng: &mut R) -> Vec<T>
where
    StandardUniform: Distribution<T>,
    R: Rng + ?Sized,
{
    (0..n).map(|_| rng.random()).collect()
}
