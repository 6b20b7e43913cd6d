use tracing::debug;
use tracing::trace;

use super::Factor;
use super::checked_characteristic;
use super::checked_non_zero;
use crate::error::FactorizationError;
use crate::error::PolynomialError;
use crate::math::traits::UnivariatePolynomial;

/// Decomposes `f` into pairwise coprime, square-free, monic factors with
/// multiplicities, such that the product of `factor^multiplicity` equals `f` up
/// to a unit. A constant polynomial has no factors.
///
/// Multiplicities that are multiples of `p` are found by undoing the Frobenius
/// map: whenever a derivative vanishes, the polynomial is a `p`-th power.
///
/// # Errors
///
/// Fails if `f` is zero or if `p` is not the characteristic of `P`.
pub fn square_free_factors<P>(f: &P, p: u64) -> Result<Vec<Factor<P>>, FactorizationError>
where
    P: UnivariatePolynomial,
{
    let p = checked_characteristic::<P>(p)?;
    checked_non_zero(f)?;

    Ok(yun(f, p)?)
}

/// The product of the distinct monic irreducible factors of `f`, _i.e._, its
/// radical. A constant polynomial has square-free part one.
///
/// # Errors
///
/// Fails if `f` is zero or if `p` is not the characteristic of `P`.
pub fn square_free_part<P>(f: &P, p: u64) -> Result<P, FactorizationError>
where
    P: UnivariatePolynomial,
{
    let p = checked_characteristic::<P>(p)?;
    checked_non_zero(f)?;

    Ok(radical(f, p)?)
}

pub(super) fn radical<P: UnivariatePolynomial>(f: &P, p: usize) -> Result<P, PolynomialError> {
    yun(f, p)?
        .iter()
        .try_fold(P::one(), |acc, factor| acc.try_mul(&factor.polynomial))
}

/// Yun's algorithm, adapted to positive characteristic.
pub(super) fn yun<P: UnivariatePolynomial>(
    f: &P,
    p: usize,
) -> Result<Vec<Factor<P>>, PolynomialError> {
    if f.degree() <= 0 {
        return Ok(vec![]);
    }

    let derivative = f.formal_derivative();
    if derivative.is_zero() {
        trace!("derivative of {f} vanishes, taking {p}-th root");
        return pth_root_factors(f, p);
    }

    let mut factors = vec![];
    let mut c = f.gcd(&derivative)?;
    let mut w = f.quotient(&c)?;
    let mut multiplicity = 1;
    while w.degree() > 0 {
        let y = w.gcd(&c)?;
        let z = w.quotient(&y)?;
        if z.degree() > 0 {
            let polynomial = z.monic()?;
            debug!(multiplicity, "SFF {polynomial}");
            factors.push(Factor::new(polynomial, multiplicity));
        }

        c = c.quotient(&y)?;
        w = y;
        multiplicity += 1;
    }

    // whatever is left has only multiplicities divisible by p
    if c.degree() > 0 {
        trace!("remaining cofactor {c} is a {p}-th power");
        factors.extend(pth_root_factors(&c, p)?);
    }

    Ok(factors)
}

fn pth_root_factors<P: UnivariatePolynomial>(
    f: &P,
    p: usize,
) -> Result<Vec<Factor<P>>, PolynomialError> {
    let root = f.unpower(p)?;
    let factors = yun(&root, p)?
        .into_iter()
        .map(|Factor { polynomial, multiplicity }| Factor::new(polynomial, multiplicity * p))
        .collect();

    Ok(factors)
}
