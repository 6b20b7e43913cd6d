use num_bigint::BigUint;
use tracing::debug;
use tracing::trace;

use super::SplittingStrategy;
use super::checked_characteristic;
use super::checked_equal_degree;
use super::checked_non_zero;
use super::is_proper_factor;
use crate::error::FactorizationError;
use crate::math::traits::UnivariatePolynomial;

/// Deterministically finds a non-trivial factor of `h`, a product of distinct
/// irreducible polynomials of degree `d`. If `h` has degree `d`, it is
/// irreducible and returned monic.
///
/// For every monomial `t = X^j` with `0 < j < deg(h)` and `j` not divisible by
/// `p`, the trace `u = t + t^p + … + t^(p^(d-1)) mod h` is computed. Modulo
/// each irreducible factor, `u` is a constant of the prime field. Since the
/// traces of all monomials cannot agree on every factor, some `gcd(h, u - c)`
/// with `c ∈ GF(p)` is a proper factor.
///
/// # Errors
///
/// - [`FactorizationError::InvalidFactorDegree`] if `d` does not divide the
///   degree of `h`,
/// - [`FactorizationError::Exhausted`] if no candidate splits `h`, which can
///   only happen if `h` is not a product of distinct degree-`d` irreducibles.
pub fn trace_split<P>(h: &P, p: u64, d: usize) -> Result<P, FactorizationError>
where
    P: UnivariatePolynomial,
{
    let p = checked_characteristic::<P>(p)?;
    checked_non_zero(h)?;
    if checked_equal_degree(h, d)? == d {
        return Ok(h.monic()?);
    }

    find_split(h, p, d)
}

pub(super) fn find_split<P>(h: &P, p: usize, d: usize) -> Result<P, FactorizationError>
where
    P: UnivariatePolynomial,
{
    let degree = usize::try_from(h.degree()).unwrap_or(0);
    let characteristic = BigUint::from(p);

    let mut attempts = 0;
    for j in (1..degree).filter(|j| j % p != 0) {
        attempts += 1;
        let t = P::monomial(j)?;
        let mut u = t.clone();
        for _ in 1..d {
            u = t.clone() + u.pow_mod(&characteristic, h)?;
        }
        trace!(j, "trace of X^{j} is {u}");

        for c in 0..p as u64 {
            let factor = h.gcd(&(u.clone() - P::from_field_value(c)))?;
            if is_proper_factor(&factor, h) {
                debug!(j, c, "trace split {factor}");
                return Ok(factor);
            }
        }
    }

    Err(FactorizationError::Exhausted {
        strategy: SplittingStrategy::TraceSplit,
        attempts,
    })
}
