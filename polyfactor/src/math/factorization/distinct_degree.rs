use num_bigint::BigUint;
use tracing::debug;

use super::checked_characteristic;
use super::checked_non_zero;
use super::square_free::radical;
use crate::error::FactorizationError;
use crate::error::PolynomialError;
use crate::math::traits::UnivariatePolynomial;

/// Groups the irreducible factors of the square-free part `s` of `f` by
/// degree. The returned vector has length `deg(s)`; entry `i` is the monic
/// product of all irreducible factors of `s` of degree `i + 1`, or one if
/// there are none. The product of all entries is `s`.
///
/// # Errors
///
/// Fails if `f` is zero or if `p` is not the characteristic of `P`.
pub fn distinct_degree_factors<P>(f: &P, p: u64) -> Result<Vec<P>, FactorizationError>
where
    P: UnivariatePolynomial,
{
    let p = checked_characteristic::<P>(p)?;
    checked_non_zero(f)?;

    let square_free = radical(f, p)?;
    Ok(buckets_of_square_free(&square_free, p)?)
}

/// Distinct-degree factorization of a monic, square-free `s`.
///
/// After round `i`, `h ≡ X^(p^i) mod s`, and `gcd(s, h - X)` collects every
/// remaining irreducible factor whose degree divides `i`. Factors of smaller
/// degree have already been divided out.
pub(super) fn buckets_of_square_free<P>(s: &P, p: usize) -> Result<Vec<P>, PolynomialError>
where
    P: UnivariatePolynomial,
{
    let degree = usize::try_from(s.degree()).unwrap_or(0);
    let characteristic = BigUint::from(p);
    let x = P::monomial(1)?;

    let mut buckets = Vec::with_capacity(degree);
    let mut remaining = s.clone();
    let mut h = x.clone();
    for i in 0..degree {
        if remaining.degree() <= 0 {
            buckets.push(P::one());
            continue;
        }

        // no two remaining factors fit, so what is left is irreducible
        if remaining.degree() < 2 * (i as isize + 1) {
            if remaining.degree() == i as isize + 1 {
                debug!(degree = i + 1, "DDF {remaining}");
                buckets.push(std::mem::replace(&mut remaining, P::one()));
            } else {
                buckets.push(P::one());
            }
            continue;
        }

        h = h.pow_mod(&characteristic, &remaining)?;
        let bucket = remaining.gcd(&(h.clone() - x.clone()))?;
        if bucket.degree() > 0 {
            debug!(degree = i + 1, "DDF {bucket}");
            remaining = remaining.quotient(&bucket)?;
        }
        buckets.push(bucket);
    }

    Ok(buckets)
}
