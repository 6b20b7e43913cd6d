use num_bigint::BigUint;
use tracing::debug;
use tracing::trace;

use super::SplittingStrategy;
use super::checked_characteristic;
use super::checked_non_zero;
use super::is_proper_factor;
use crate::error::FactorizationError;
use crate::error::PolynomialError;
use crate::math::traits::UnivariatePolynomial;

/// Deterministically finds a non-trivial factor of the square-free polynomial
/// `f`. Polynomials of degree at most one are returned monic.
///
/// First, the period of `X` under the Frobenius map is determined: the
/// smallest `N` such that `X^(p^N) ≡ X mod f`. It is the least common multiple
/// of the degrees of the irreducible factors of `f`. Then, for `i = 1, 2, …`,
/// the sum `T_i = Σ_{j<N} (X^i)^(p^j) mod f` is a constant of the prime field
/// modulo each irreducible factor, and the first proper `gcd(f, T_i - c)` with
/// `c ∈ GF(p)` is returned.
///
/// Unlike the equal-degree splitters, `f` may have irreducible factors of
/// different degrees.
///
/// # Errors
///
/// Fails with [`FactorizationError::Exhausted`] if the period exceeds
/// `max_period`, or if no sum splits `f`. The latter is always the case for
/// irreducible `f`.
pub fn period_split<P>(f: &P, p: u64, max_period: usize) -> Result<P, FactorizationError>
where
    P: UnivariatePolynomial,
{
    let p = checked_characteristic::<P>(p)?;
    checked_non_zero(f)?;
    if f.degree() <= 1 {
        return Ok(f.monic()?);
    }

    find_split(f, p, max_period)
}

pub(super) fn find_split<P>(f: &P, p: usize, max_period: usize) -> Result<P, FactorizationError>
where
    P: UnivariatePolynomial,
{
    let characteristic = BigUint::from(p);
    let period = frobenius_period(f, &characteristic, max_period)?;
    trace!(period, "Frobenius period of X modulo {f}");

    let degree = usize::try_from(f.degree()).unwrap_or(0);
    for i in 1..degree {
        let sum = frobenius_orbit_sum(&P::monomial(i)?, &characteristic, period, f)?;
        for c in 0..p as u64 {
            let factor = f.gcd(&(sum.clone() - P::from_field_value(c)))?;
            if !is_proper_factor(&factor, f) {
                continue;
            }

            let (_, remainder) = f.divide(&factor)?;
            if remainder.is_zero() {
                debug!(i, c, "period split {factor}");
                return Ok(factor);
            }
        }
    }

    Err(FactorizationError::Exhausted {
        strategy: SplittingStrategy::PeriodSplit,
        attempts: degree.saturating_sub(1),
    })
}

/// The smallest `N` in `[1, max_period]` with `X^(p^N) ≡ X mod f`.
fn frobenius_period<P>(
    f: &P,
    characteristic: &BigUint,
    max_period: usize,
) -> Result<usize, FactorizationError>
where
    P: UnivariatePolynomial,
{
    let x = P::monomial(1)?.remainder(f)?;
    let mut image = x.clone();
    for period in 1..=max_period {
        image = image.pow_mod(characteristic, f)?;
        if image == x {
            return Ok(period);
        }
    }

    Err(FactorizationError::Exhausted {
        strategy: SplittingStrategy::PeriodSplit,
        attempts: max_period,
    })
}

/// `t + t^p + t^(p²) + … + t^(p^(period-1)) mod f`
fn frobenius_orbit_sum<P>(
    t: &P,
    characteristic: &BigUint,
    period: usize,
    f: &P,
) -> Result<P, PolynomialError>
where
    P: UnivariatePolynomial,
{
    let mut image = t.remainder(f)?;
    let mut sum = image.clone();
    for _ in 1..period {
        image = image.pow_mod(characteristic, f)?;
        sum = sum + image.clone();
    }

    Ok(sum)
}
