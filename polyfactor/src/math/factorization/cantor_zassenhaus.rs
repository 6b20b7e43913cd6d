use num_bigint::BigUint;
use num_traits::Pow;
use rand::Rng;
use tracing::debug;
use tracing::trace;

use super::SplittingStrategy;
use super::checked_characteristic;
use super::checked_equal_degree;
use super::checked_non_zero;
use super::is_proper_factor;
use crate::error::FactorizationError;
use crate::error::PolynomialError;
use crate::math::traits::UnivariatePolynomial;

/// Finds a non-trivial factor of `h`, a product of distinct irreducible
/// polynomials of degree `d`, by the randomized method of Cantor and
/// Zassenhaus. If `h` has degree `d`, it is irreducible and returned monic.
///
/// Every attempt draws a random polynomial `a` of degree smaller than `h`.
/// Modulo each irreducible factor of `h`, the map `a ↦ a^((p^d - 1)/2)` sends
/// `a` to ±1, or, for `p = 2`, the trace `a + a² + … + a^(2^(d-1))` sends it
/// to 0 or 1. With probability at least one half, the two values differ on
/// some pair of factors, and a greatest common divisor with `h` separates
/// them.
///
/// # Errors
///
/// - [`FactorizationError::InvalidFactorDegree`] if `d` does not divide the
///   degree of `h`,
/// - [`FactorizationError::Exhausted`] if `max_attempts` draws all fail.
pub fn cantor_zassenhaus_split<P, R>(
    h: &P,
    p: u64,
    d: usize,
    rng: &mut R,
    max_attempts: usize,
) -> Result<P, FactorizationError>
where
    P: UnivariatePolynomial,
    R: Rng + ?Sized,
{
    let p = checked_characteristic::<P>(p)?;
    checked_non_zero(h)?;
    if checked_equal_degree(h, d)? == d {
        return Ok(h.monic()?);
    }

    find_split(h, p, d, rng, max_attempts)
}

pub(super) fn find_split<P, R>(
    h: &P,
    p: usize,
    d: usize,
    rng: &mut R,
    max_attempts: usize,
) -> Result<P, FactorizationError>
where
    P: UnivariatePolynomial,
    R: Rng + ?Sized,
{
    let degree = usize::try_from(h.degree()).unwrap_or(0);
    let half_order = (Pow::pow(BigUint::from(p), d) - 1_u32) / 2_u32;

    for attempt in 1..=max_attempts {
        let a = P::random(degree, rng);
        if a.degree() <= 0 {
            continue;
        }

        let common = h.gcd(&a)?;
        if is_proper_factor(&common, h) {
            trace!(attempt, "CZ common factor {common}");
            return Ok(common);
        }

        let image = match p {
            2 => absolute_trace(&a, d, h)?,
            _ => a.pow_mod(&half_order, h)? - P::one(),
        };
        let factor = h.gcd(&image)?;
        if is_proper_factor(&factor, h) {
            debug!(attempt, "CZ {factor}");
            return Ok(factor);
        }
    }

    Err(FactorizationError::Exhausted {
        strategy: SplittingStrategy::CantorZassenhaus,
        attempts: max_attempts,
    })
}

/// `a + a² + a⁴ + … + a^(2^(d-1)) mod h`
fn absolute_trace<P>(a: &P, d: usize, h: &P) -> Result<P, PolynomialError>
where
    P: UnivariatePolynomial,
{
    let mut square = a.remainder(h)?;
    let mut trace = square.clone();
    for _ in 1..d {
        square = square.mul_mod(&square, h)?;
        trace = trace + square.clone();
    }

    Ok(trace)
}
