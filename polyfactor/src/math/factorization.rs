//! Factorization of univariate polynomials over prime fields.
//!
//! The pipeline has three stages:
//! 1. [square-free factorization](square_free_factors) separates repeated
//!    factors,
//! 1. [distinct-degree factorization](distinct_degree_factors) groups the
//!    irreducible factors of a square-free polynomial by their degree, and
//! 1. equal-degree splitting breaks every group into its irreducible factors
//!    using one of the [`SplittingStrategy`]s.
//!
//! All entry points take the field characteristic explicitly and reject
//! polynomials over a different field.

use std::cmp::Ordering;
use std::fmt::Display;
use std::fmt::Formatter;

use arbitrary::Arbitrary;
use rand::Rng;
use serde::Deserialize;
use serde::Serialize;
use tracing::debug;

use crate::config;
use crate::error::FactorizationError;
use crate::math::traits::UnivariatePolynomial;

mod cantor_zassenhaus;
mod distinct_degree;
mod period_split;
mod square_free;
mod trace_split;

pub use cantor_zassenhaus::cantor_zassenhaus_split;
pub use distinct_degree::distinct_degree_factors;
pub use period_split::period_split;
pub use square_free::square_free_factors;
pub use square_free::square_free_part;
pub use trace_split::trace_split;

/// The algorithm used to separate a product of distinct irreducible
/// polynomials of equal degree.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Arbitrary, Serialize, Deserialize)]
pub enum SplittingStrategy {
    /// Randomized. Requires a source of randomness and is bounded by
    /// [`SplitBudget::max_attempts`].
    #[default]
    CantorZassenhaus,

    /// Deterministic. Tries the traces of the monomials `X^j` in turn.
    TraceSplit,

    /// Deterministic. Finds the period of `X` under the Frobenius map first,
    /// bounded by [`SplitBudget::max_period`].
    PeriodSplit,
}

impl Display for SplittingStrategy {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CantorZassenhaus => write!(f, "Cantor–Zassenhaus"),
            Self::TraceSplit => write!(f, "trace split"),
            Self::PeriodSplit => write!(f, "period split"),
        }
    }
}

/// A monic polynomial together with the number of times it divides some other
/// polynomial.
///
/// Factors are ordered by multiplicity first, then by degree, then by the
/// polynomial itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Factor<P> {
    pub polynomial: P,
    pub multiplicity: usize,
}

impl<P> Factor<P> {
    pub fn new(polynomial: P, multiplicity: usize) -> Self {
        Self {
            polynomial,
            multiplicity,
        }
    }
}

impl<P: UnivariatePolynomial> PartialOrd for Factor<P> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<P: UnivariatePolynomial> Ord for Factor<P> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.multiplicity
            .cmp(&other.multiplicity)
            .then_with(|| self.polynomial.degree().cmp(&other.polynomial.degree()))
            .then_with(|| self.polynomial.cmp(&other.polynomial))
    }
}

/// Bounds on the work the splitting strategies may do before giving up with
/// [`FactorizationError::Exhausted`].
///
/// The [`Default`] is taken from the [configuration](crate::config).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Arbitrary, Serialize, Deserialize)]
pub struct SplitBudget {
    /// The number of random draws per Cantor–Zassenhaus split.
    pub max_attempts: usize,

    /// The largest Frobenius period the period split searches for.
    pub max_period: usize,
}

impl Default for SplitBudget {
    fn default() -> Self {
        Self {
            max_attempts: config::cantor_zassenhaus_max_attempts(),
            max_period: config::period_split_max_period(),
        }
    }
}

/// Verifies that `p` is the characteristic of `P`'s coefficient field.
pub(crate) fn checked_characteristic<P: UnivariatePolynomial>(
    p: u64,
) -> Result<usize, FactorizationError> {
    if p != P::CHARACTERISTIC {
        return Err(FactorizationError::CharacteristicMismatch {
            expected: P::CHARACTERISTIC,
            actual: p,
        });
    }

    usize::try_from(p).map_err(|_| FactorizationError::CharacteristicMismatch {
        expected: P::CHARACTERISTIC,
        actual: p,
    })
}

pub(crate) fn checked_non_zero<P: UnivariatePolynomial>(f: &P) -> Result<(), FactorizationError> {
    if f.is_zero() {
        return Err(FactorizationError::ZeroPolynomial);
    }

    Ok(())
}

/// Verifies that `h` can be a product of irreducibles of degree `d`, returning
/// the degree of `h`.
pub(crate) fn checked_equal_degree<P: UnivariatePolynomial>(
    h: &P,
    d: usize,
) -> Result<usize, FactorizationError> {
    let degree = usize::try_from(h.degree()).unwrap_or(0);
    if d == 0 || degree == 0 || degree % d != 0 {
        return Err(FactorizationError::InvalidFactorDegree {
            degree,
            factor_degree: d,
        });
    }

    Ok(degree)
}

/// A divisor of `f` that is neither a unit nor an associate of `f`.
pub(crate) fn is_proper_factor<P: UnivariatePolynomial>(candidate: &P, f: &P) -> bool {
    candidate.degree() > 0 && candidate.degree() < f.degree()
}

/// Whether `f` is irreducible. Constants, including units, are not.
///
/// # Errors
///
/// Fails if `f` is zero or if `p` is not the characteristic of `P`.
pub fn is_irreducible<P>(f: &P, p: u64) -> Result<bool, FactorizationError>
where
    P: UnivariatePolynomial,
{
    let p = checked_characteristic::<P>(p)?;
    checked_non_zero(f)?;

    let degree = f.degree();
    if degree <= 0 {
        return Ok(false);
    }

    let monic = f.monic()?;
    if square_free::radical(f, p)? != monic {
        return Ok(false);
    }

    let buckets = distinct_degree::buckets_of_square_free(&monic, p)?;
    Ok(buckets.last() == Some(&monic))
}

/// Finds one non-trivial factor of `f`, or `f` itself made monic if `f` is
/// irreducible or constant.
///
/// If `f` is not square-free, its square-free part is returned. Otherwise the
/// lowest-degree group of irreducible factors is split with `strategy`. The
/// period split works on `f` directly.
///
/// # Errors
///
/// Fails if `f` is zero, if `p` is not the characteristic of `P`, or if the
/// strategy exhausts its [default budget](SplitBudget::default).
pub fn split<P, R>(
    f: &P,
    p: u64,
    strategy: SplittingStrategy,
    rng: &mut R,
) -> Result<P, FactorizationError>
where
    P: UnivariatePolynomial,
    R: Rng + ?Sized,
{
    split_with_budget(f, p, strategy, rng, SplitBudget::default())
}

/// Like [`split`], with an explicit budget.
///
/// # Errors
///
/// See [`split`].
pub fn split_with_budget<P, R>(
    f: &P,
    p: u64,
    strategy: SplittingStrategy,
    rng: &mut R,
    budget: SplitBudget,
) -> Result<P, FactorizationError>
where
    P: UnivariatePolynomial,
    R: Rng + ?Sized,
{
    let p = checked_characteristic::<P>(p)?;
    checked_non_zero(f)?;

    let monic = f.monic()?;
    if monic.degree() <= 1 {
        return Ok(monic);
    }

    let square_free = square_free::radical(f, p)?;
    if square_free != monic {
        return Ok(square_free);
    }

    let buckets = distinct_degree::buckets_of_square_free(&monic, p)?;
    let Some((index, bucket)) = buckets
        .into_iter()
        .enumerate()
        .find(|(_, bucket)| bucket.degree() > 0)
    else {
        return Ok(monic);
    };

    let d = index + 1;
    if bucket.degree() as usize == d {
        return Ok(bucket);
    }

    match strategy {
        SplittingStrategy::PeriodSplit => period_split::find_split(&monic, p, budget.max_period),
        _ => split_equal_degree(&bucket, p, d, strategy, rng, budget),
    }
}

/// The irreducible factors of `f`, each monic and repeated according to its
/// multiplicity, in ascending order of degree. A constant polynomial has no
/// factors.
///
/// # Errors
///
/// Fails if `f` is zero, if `p` is not the characteristic of `P`, or if the
/// strategy exhausts its [default budget](SplitBudget::default).
pub fn factorize<P, R>(
    f: &P,
    p: u64,
    strategy: SplittingStrategy,
    rng: &mut R,
) -> Result<Vec<P>, FactorizationError>
where
    P: UnivariatePolynomial,
    R: Rng + ?Sized,
{
    factorize_with_budget(f, p, strategy, rng, SplitBudget::default())
}

/// Like [`factorize`], with an explicit budget.
///
/// # Errors
///
/// See [`factorize`].
pub fn factorize_with_budget<P, R>(
    f: &P,
    p: u64,
    strategy: SplittingStrategy,
    rng: &mut R,
    budget: SplitBudget,
) -> Result<Vec<P>, FactorizationError>
where
    P: UnivariatePolynomial,
    R: Rng + ?Sized,
{
    let mut irreducibles = factors_with_budget(f, p, strategy, rng, budget)?
        .into_iter()
        .flat_map(|Factor { polynomial, multiplicity }| vec![polynomial; multiplicity])
        .collect::<Vec<_>>();
    irreducibles.sort_by(|a, b| a.degree().cmp(&b.degree()).then_with(|| a.cmp(b)));

    Ok(irreducibles)
}

/// The distinct irreducible factors of `f` with their multiplicities, sorted
/// as described on [`Factor`].
///
/// # Errors
///
/// See [`factorize`].
pub fn factorize_with_multiplicities<P, R>(
    f: &P,
    p: u64,
    strategy: SplittingStrategy,
    rng: &mut R,
) -> Result<Vec<Factor<P>>, FactorizationError>
where
    P: UnivariatePolynomial,
    R: Rng + ?Sized,
{
    factors_with_budget(f, p, strategy, rng, SplitBudget::default())
}

fn factors_with_budget<P, R>(
    f: &P,
    p: u64,
    strategy: SplittingStrategy,
    rng: &mut R,
    budget: SplitBudget,
) -> Result<Vec<Factor<P>>, FactorizationError>
where
    P: UnivariatePolynomial,
    R: Rng + ?Sized,
{
    let p = checked_characteristic::<P>(p)?;
    checked_non_zero(f)?;

    let mut factors = vec![];
    for Factor {
        polynomial,
        multiplicity,
    } in square_free::yun(f, p)?
    {
        let buckets = distinct_degree::buckets_of_square_free(&polynomial, p)?;
        for (index, bucket) in buckets.into_iter().enumerate() {
            if bucket.degree() <= 0 {
                continue;
            }

            let d = index + 1;
            for irreducible in equal_degree_factors(bucket, p, d, strategy, rng, budget)? {
                factors.push(Factor::new(irreducible, multiplicity));
            }
        }
    }
    factors.sort();

    Ok(factors)
}

/// Completely splits `h`, a product of distinct monic irreducibles of degree
/// `d`.
fn equal_degree_factors<P, R>(
    h: P,
    p: usize,
    d: usize,
    strategy: SplittingStrategy,
    rng: &mut R,
    budget: SplitBudget,
) -> Result<Vec<P>, FactorizationError>
where
    P: UnivariatePolynomial,
    R: Rng + ?Sized,
{
    let mut irreducibles = vec![];
    let mut pending = vec![h.monic()?];
    while let Some(h) = pending.pop() {
        if h.degree() as usize == d {
            debug!(degree = d, "EDF {h}");
            irreducibles.push(h);
            continue;
        }

        let factor = split_equal_degree(&h, p, d, strategy, rng, budget)?.monic()?;
        let cofactor = h.quotient(&factor)?;
        pending.push(factor);
        pending.push(cofactor);
    }

    Ok(irreducibles)
}

/// One proper factor of `h`, a product of at least two distinct monic
/// irreducibles of degree `d`.
fn split_equal_degree<P, R>(
    h: &P,
    p: usize,
    d: usize,
    strategy: SplittingStrategy,
    rng: &mut R,
    budget: SplitBudget,
) -> Result<P, FactorizationError>
where
    P: UnivariatePolynomial,
    R: Rng + ?Sized,
{
    match strategy {
        SplittingStrategy::CantorZassenhaus => {
            cantor_zassenhaus::find_split(h, p, d, rng, budget.max_attempts)
        }
        SplittingStrategy::TraceSplit => trace_split::find_split(h, p, d),
        SplittingStrategy::PeriodSplit => period_split::find_split(h, p, budget.max_period),
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use test_strategy::proptest;

    use super::*;
    use crate::math::gf2_dense_polynomial::Gf2Bitset;
    use crate::math::gf2_sparse_polynomial::SparseGf2Polynomial;
    use crate::math::polynomial::Polynomial;
    use crate::math::prime_field_element::F2;
    use crate::math::prime_field_element::PrimeFieldElement;

    type F3 = PrimeFieldElement<3>;
    type F5 = PrimeFieldElement<5>;

    const ALL_STRATEGIES: [SplittingStrategy; 3] = [
        SplittingStrategy::CantorZassenhaus,
        SplittingStrategy::TraceSplit,
        SplittingStrategy::PeriodSplit,
    ];

    fn product<P: UnivariatePolynomial>(factors: &[P]) -> P {
        factors
            .iter()
            .fold(P::one(), |acc, factor| acc.try_mul(factor).unwrap())
    }

    #[test]
    fn factors_are_ordered_by_multiplicity_then_degree() {
        let linear = Factor::new(Polynomial::<F3>::from([1, 1]), 2);
        let quadratic = Factor::new(Polynomial::<F3>::from([1, 0, 1]), 1);
        let other_linear = Factor::new(Polynomial::<F3>::from([2, 1]), 2);

        assert!(quadratic < linear);
        assert!(linear < other_linear);
    }

    #[test]
    fn strategy_display() {
        assert_eq!("Cantor–Zassenhaus", SplittingStrategy::CantorZassenhaus.to_string());
        assert_eq!("trace split", SplittingStrategy::TraceSplit.to_string());
        assert_eq!("period split", SplittingStrategy::PeriodSplit.to_string());
    }

    #[test]
    fn default_budget_follows_configuration() {
        config::set_cantor_zassenhaus_max_attempts(42);
        config::set_period_split_max_period(43);
        let budget = SplitBudget::default();
        if std::env::var("POLYFACTOR_CANTOR_ZASSENHAUS_MAX_ATTEMPTS").is_err() {
            assert_eq!(42, budget.max_attempts);
        }
        if std::env::var("POLYFACTOR_PERIOD_SPLIT_MAX_PERIOD").is_err() {
            assert_eq!(43, budget.max_period);
        }
    }

    #[test]
    fn degree_seven_product_splits_into_known_factors() {
        // (X⁵ + X⁴ + X³ + X² + 1)·(X² + X + 1)
        let f = Polynomial::<F2>::from([1, 1, 0, 0, 1, 1, 0, 1]);
        let quintic = Polynomial::from([1, 0, 1, 1, 1, 1]);
        let quadratic = Polynomial::from([1, 1, 1]);

        let mut rng = StdRng::seed_from_u64(7);
        for strategy in ALL_STRATEGIES {
            let factor = split(&f, 2, strategy, &mut rng).unwrap();
            assert!(factor == quintic || factor == quadratic, "{strategy}: {factor}");

            let factors = factorize(&f, 2, strategy, &mut rng).unwrap();
            assert_eq!(vec![quadratic.clone(), quintic.clone()], factors);
        }
    }

    #[test]
    fn splitting_a_non_square_free_polynomial_returns_its_square_free_part() {
        // X⁴ + X² + 1 = (X² + X + 1)²
        let f = SparseGf2Polynomial::from_exponents([4, 2, 0]);
        let mut rng = StdRng::seed_from_u64(0);
        let factor = split(&f, 2, SplittingStrategy::TraceSplit, &mut rng).unwrap();
        assert_eq!(SparseGf2Polynomial::from_exponents([2, 1, 0]), factor);
    }

    #[test]
    fn splitting_an_irreducible_polynomial_returns_it() {
        let f = Gf2Bitset::from_exponents([7, 1, 0]).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        for strategy in ALL_STRATEGIES {
            assert_eq!(f, split(&f, 2, strategy, &mut rng).unwrap());
        }
    }

    #[test]
    fn irreducibility() {
        let irreducible = Polynomial::<F5>::from([2, 1, 1]);
        let reducible = Polynomial::<F5>::from([4, 2, 4, 4, 2, 0, 1]);
        let square = irreducible.clone() * irreducible.clone();

        assert!(is_irreducible(&irreducible, 5).unwrap());
        assert!(!is_irreducible(&reducible, 5).unwrap());
        assert!(!is_irreducible(&square, 5).unwrap());
        assert!(!is_irreducible(&Polynomial::<F5>::from([3]), 5).unwrap());
        assert!(is_irreducible(&Polynomial::<F5>::from([3, 2]), 5).unwrap());
    }

    #[test]
    fn multiplicities_survive_factorization() {
        // (X + 1)·(X² + 1)³·(X + 2)⁴
        let f = Polynomial::<F3>::from([1, 0, 2, 2, 0, 1, 1, 0, 2, 2, 0, 1]);
        let mut rng = StdRng::seed_from_u64(3);
        for strategy in ALL_STRATEGIES {
            let factors = factorize_with_multiplicities(&f, 3, strategy, &mut rng).unwrap();
            let expected = vec![
                Factor::new(Polynomial::from([1, 1]), 1),
                Factor::new(Polynomial::from([1, 0, 1]), 3),
                Factor::new(Polynomial::from([2, 1]), 4),
            ];
            assert_eq!(expected, factors);
        }
    }

    #[test]
    fn constant_polynomial_has_no_factors() {
        let mut rng = StdRng::seed_from_u64(0);
        let f = Polynomial::<F5>::from([4]);
        assert!(
            factorize(&f, 5, SplittingStrategy::default(), &mut rng)
                .unwrap()
                .is_empty()
        );
    }

    #[test]
    fn zero_polynomial_cannot_be_factored() {
        let mut rng = StdRng::seed_from_u64(0);
        for strategy in ALL_STRATEGIES {
            let err = factorize(&SparseGf2Polynomial::zero(), 2, strategy, &mut rng).unwrap_err();
            assert_eq!(FactorizationError::ZeroPolynomial, err);
        }
    }

    #[test]
    fn exhausted_budget_is_reported() {
        // (X² + X + 1)·(X² + X + 2) has Frobenius period 2
        let f = Polynomial::<F5>::from([2, 3, 4, 2, 1]);
        let budget = SplitBudget {
            max_attempts: 1,
            max_period: 1,
        };

        let mut rng = StdRng::seed_from_u64(0);
        let err = factorize_with_budget(&f, 5, SplittingStrategy::PeriodSplit, &mut rng, budget)
            .unwrap_err();
        assert!(matches!(
            err,
            FactorizationError::Exhausted {
                strategy: SplittingStrategy::PeriodSplit,
                ..
            }
        ));
    }

    #[proptest(cases = 32)]
    fn factorization_recombines_to_monic_input(
        #[filter(!#f.is_zero())] f: Polynomial<F3>,
        #[strategy(0usize..3)] strategy: usize,
        seed: u64,
    ) {
        let strategy = ALL_STRATEGIES[strategy];
        let mut rng = StdRng::seed_from_u64(seed);
        let factors = factorize(&f, 3, strategy, &mut rng).unwrap();
        prop_assert_eq!(f.monic().unwrap(), product(&factors));
        for factor in &factors {
            prop_assert!(is_irreducible(factor, 3).unwrap());
        }
    }

    #[proptest(cases = 32)]
    fn strategies_agree_over_gf2(#[filter(!#f.is_zero())] f: SparseGf2Polynomial, seed: u64) {
        let mut rng = StdRng::seed_from_u64(seed);
        let cantor_zassenhaus = SplittingStrategy::CantorZassenhaus;
        let by_cantor_zassenhaus = factorize(&f, 2, cantor_zassenhaus, &mut rng).unwrap();
        let by_trace = factorize(&f, 2, SplittingStrategy::TraceSplit, &mut rng).unwrap();
        let by_period = factorize(&f, 2, SplittingStrategy::PeriodSplit, &mut rng).unwrap();
        prop_assert_eq!(&by_cantor_zassenhaus, &by_trace);
        prop_assert_eq!(&by_cantor_zassenhaus, &by_period);
    }
}
