use std::fmt::Debug;
use std::fmt::Display;
use std::fmt::Formatter;
use std::hash::Hash;
use std::ops::Add;
use std::ops::AddAssign;
use std::ops::Div;
use std::ops::Mul;
use std::ops::MulAssign;
use std::ops::Neg;
use std::ops::Rem;
use std::ops::Sub;
use std::ops::SubAssign;

use arbitrary::Arbitrary;
use arbitrary::Unstructured;
use get_size2::GetSize;
use itertools::EitherOrBoth;
use itertools::Itertools;
use num_traits::Zero;
use rand::Rng;
use serde::Deserialize;
use serde::Serialize;

use crate::error::PolynomialError;
use crate::math::traits::PrimeField;
use crate::math::traits::UnivariatePolynomial;

/// A univariate polynomial with coefficients in a [prime field](PrimeField), in
/// monomial form.
///
/// The coefficient vector never carries trailing zeros, so structural equality
/// is polynomial equality.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<FF>", into = "Vec<FF>", bound(deserialize = ""))]
pub struct Polynomial<FF: PrimeField> {
    /// The polynomial's coefficients, in order of increasing degree. That is,
    /// the polynomial's leading coefficient is the last element of the vector.
    coefficients: Vec<FF>,
}

impl<FF: PrimeField> Debug for Polynomial<FF> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Polynomial")
            .field("coefficients", &self.coefficients)
            .finish()
    }
}

impl<FF: PrimeField> Display for Polynomial<FF> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        let degree = match self.degree() {
            -1 => return write!(f, "0"),
            d => d as usize,
        };

        for pow in (0..=degree).rev() {
            let coeff = self.coefficients[pow];
            if coeff.is_zero() {
                continue;
            }

            if pow != degree {
                write!(f, " + ")?;
            }
            let show_coefficient = !coeff.is_one() || pow == 0;
            if show_coefficient {
                write!(f, "{coeff}")?;
            }
            match pow {
                0 => (),
                _ if show_coefficient => write!(f, "*")?,
                _ => (),
            }
            match pow {
                0 => (),
                1 => write!(f, "X")?,
                _ => write!(f, "X^{pow}")?,
            }
        }

        Ok(())
    }
}

impl<FF: PrimeField> GetSize for Polynomial<FF> {
    fn get_heap_size(&self) -> usize {
        self.coefficients.capacity() * std::mem::size_of::<FF>()
    }
}

impl<'a, FF> Arbitrary<'a> for Polynomial<FF>
where
    FF: PrimeField + Arbitrary<'a>,
{
    fn arbitrary(u: &mut Unstructured<'a>) -> arbitrary::Result<Self> {
        Ok(Self::new(u.arbitrary()?))
    }
}

impl<const N: usize, FF, E> From<[E; N]> for Polynomial<FF>
where
    FF: PrimeField,
    E: Into<FF>,
{
    fn from(coefficients: [E; N]) -> Self {
        Self::new(coefficients.into_iter().map(|c| c.into()).collect())
    }
}

impl<FF, E> From<&[E]> for Polynomial<FF>
where
    FF: PrimeField,
    E: Into<FF> + Clone,
{
    fn from(coefficients: &[E]) -> Self {
        Self::new(coefficients.iter().map(|c| c.clone().into()).collect())
    }
}

impl<FF, E> From<Vec<E>> for Polynomial<FF>
where
    FF: PrimeField,
    E: Into<FF>,
{
    fn from(coefficients: Vec<E>) -> Self {
        Self::new(coefficients.into_iter().map(|c| c.into()).collect())
    }
}

impl<FF: PrimeField> From<Polynomial<FF>> for Vec<FF> {
    fn from(polynomial: Polynomial<FF>) -> Self {
        polynomial.coefficients
    }
}

impl<FF: PrimeField> Polynomial<FF> {
    /// Builds a polynomial from its coefficients in order of increasing
    /// degree. Trailing zeros are dropped.
    pub fn new(coefficients: Vec<FF>) -> Self {
        let mut polynomial = Self { coefficients };
        polynomial.normalize();
        polynomial
    }

    fn normalize(&mut self) {
        while self.coefficients.last().is_some_and(Zero::is_zero) {
            self.coefficients.pop();
        }
    }

    pub fn coefficients(&self) -> &[FF] {
        &self.coefficients
    }

    pub fn from_constant(constant: FF) -> Self {
        Self::new(vec![constant])
    }

    /// The coefficient of the polynomial's term of highest power. `None` if (and
    /// only if) `self` is zero.
    ///
    /// Furthermore, is never `Some(FF::ZERO)`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use polyfactor::prelude::*;
    /// let f = Polynomial::<PrimeFieldElement<5>>::from([1, 2, 3]);
    /// assert_eq!(Some(pfe!(3)), f.leading_coefficient());
    /// assert_eq!(None, Polynomial::<F2>::zero().leading_coefficient());
    /// ```
    pub fn leading_coefficient(&self) -> Option<FF> {
        self.coefficients.last().copied()
    }

    pub fn evaluate(&self, x: FF) -> FF {
        let mut acc = FF::ZERO;
        for &c in self.coefficients.iter().rev() {
            acc = c + x * acc;
        }

        acc
    }

    #[must_use]
    pub fn scalar_mul(&self, scalar: FF) -> Self {
        Self::new(self.coefficients.iter().map(|&c| c * scalar).collect())
    }

    /// `self^exponent`, by square-and-multiply.
    #[must_use]
    pub fn pow(&self, exponent: u64) -> Self {
        let mut acc = Self::one();
        for i in (0..u64::BITS - exponent.leading_zeros()).rev() {
            acc = acc.naive_multiply(&acc);
            if exponent >> i & 1 == 1 {
                acc = acc.naive_multiply(self);
            }
        }

        acc
    }

    fn naive_multiply(&self, other: &Self) -> Self {
        let Ok(degree_lhs) = usize::try_from(self.degree()) else {
            return Self::zero();
        };
        let Ok(degree_rhs) = usize::try_from(other.degree()) else {
            return Self::zero();
        };

        let mut product = vec![FF::ZERO; degree_lhs + degree_rhs + 1];
        for (i, &lhs_coeff) in self.coefficients.iter().enumerate() {
            if lhs_coeff.is_zero() {
                continue;
            }
            for (j, &rhs_coeff) in other.coefficients.iter().enumerate() {
                product[i + j] += lhs_coeff * rhs_coeff;
            }
        }

        Self::new(product)
    }

    fn naive_divide(&self, divisor: &Self) -> Result<(Self, Self), PolynomialError> {
        let divisor_lc_inv = divisor
            .leading_coefficient()
            .ok_or(PolynomialError::DivisionByZero)?
            .try_inverse()?;

        let Ok(quotient_degree) = usize::try_from(self.degree() - divisor.degree()) else {
            // self.degree() < divisor.degree()
            return Ok((Self::zero(), self.clone()));
        };

        // quotient is built from back to front, must be reversed later
        let mut rev_quotient = Vec::with_capacity(quotient_degree + 1);
        let mut remainder = self.coefficients.clone();

        for _ in 0..=quotient_degree {
            let Some(remainder_lc) = remainder.pop() else {
                break;
            };
            let quotient_coeff = remainder_lc * divisor_lc_inv;
            rev_quotient.push(quotient_coeff);

            if quotient_coeff.is_zero() {
                continue;
            }

            // don't use `.degree()` to still count leading zeros in intermittent remainders
            let remainder_degree = remainder.len().saturating_sub(1);

            // skip divisor's leading coefficient: it has already been dealt with
            for (i, &divisor_coeff) in divisor.coefficients.iter().rev().skip(1).enumerate() {
                remainder[remainder_degree - i] -= quotient_coeff * divisor_coeff;
            }
        }

        rev_quotient.reverse();
        Ok((Self::new(rev_quotient), Self::new(remainder)))
    }
}

impl<FF: PrimeField> UnivariatePolynomial for Polynomial<FF> {
    const CHARACTERISTIC: u64 = FF::CHARACTERISTIC;

    fn zero() -> Self {
        Self {
            coefficients: vec![],
        }
    }

    fn one() -> Self {
        Self {
            coefficients: vec![FF::ONE],
        }
    }

    fn monomial(exponent: usize) -> Result<Self, PolynomialError> {
        let mut coefficients = vec![FF::ZERO; exponent + 1];
        coefficients[exponent] = FF::ONE;
        Ok(Self { coefficients })
    }

    fn from_field_value(value: u64) -> Self {
        Self::from_constant(FF::from(value))
    }

    fn degree(&self) -> isize {
        self.coefficients.len() as isize - 1
    }

    fn is_one(&self) -> bool {
        self.coefficients.len() == 1 && self.coefficients[0].is_one()
    }

    fn try_mul(&self, other: &Self) -> Result<Self, PolynomialError> {
        Ok(self.naive_multiply(other))
    }

    fn divide(&self, divisor: &Self) -> Result<(Self, Self), PolynomialError> {
        self.naive_divide(divisor)
    }

    fn monic(&self) -> Result<Self, PolynomialError> {
        match self.leading_coefficient() {
            None => Ok(Self::zero()),
            Some(lc) if lc.is_one() => Ok(self.clone()),
            Some(lc) => Ok(self.scalar_mul(lc.try_inverse()?)),
        }
    }

    fn formal_derivative(&self) -> Self {
        // not `enumerate()`ing: `PrimeField` is trait-bound to `From<u64>` but not `From<usize>`
        let coefficients = (0..)
            .zip(&self.coefficients)
            .map(|(i, &coefficient)| FF::from(i) * coefficient)
            .skip(1)
            .collect();

        Self::new(coefficients)
    }

    fn power(&self, n: usize) -> Result<Self, PolynomialError> {
        if n == 0 {
            let constant = self.coefficients.iter().fold(FF::ZERO, |acc, &c| acc + c);
            return Ok(Self::from_constant(constant));
        }
        let Ok(degree) = usize::try_from(self.degree()) else {
            return Ok(Self::zero());
        };

        let num_coefficients = degree
            .checked_mul(n)
            .and_then(|powered_degree| powered_degree.checked_add(1))
            .ok_or(PolynomialError::ExponentOverflow {
                exponent: degree as u64,
                power: n,
            })?;

        let mut coefficients = vec![FF::ZERO; num_coefficients];
        for (i, &coefficient) in self.coefficients.iter().enumerate() {
            coefficients[i * n] = coefficient;
        }

        Ok(Self { coefficients })
    }

    fn unpower(&self, n: usize) -> Result<Self, PolynomialError> {
        if n == 0 {
            let exponent = usize::try_from(self.degree()).unwrap_or(0);
            return Err(PolynomialError::InvalidDivisibility { exponent, power: n });
        }

        if let Some((exponent, _)) = self
            .coefficients
            .iter()
            .enumerate()
            .find(|&(i, c)| i % n != 0 && !c.is_zero())
        {
            return Err(PolynomialError::InvalidDivisibility { exponent, power: n });
        }

        let coefficients = self.coefficients.iter().copied().step_by(n).collect();
        Ok(Self { coefficients })
    }

    fn random<R: Rng + ?Sized>(degree_bound: usize, rng: &mut R) -> Self {
        let coefficients = (0..degree_bound)
            .map(|_| FF::from(rng.random_range(0..FF::CHARACTERISTIC)))
            .collect();

        Self::new(coefficients)
    }
}

/// # Panics
///
/// Panics if the divisor is zero.
impl<FF: PrimeField> Div for Polynomial<FF> {
    type Output = Self;

    fn div(self, other: Self) -> Self {
        let (quotient, _) = self
            .naive_divide(&other)
            .expect("divisor should be non-zero");
        quotient
    }
}

/// # Panics
///
/// Panics if the divisor is zero.
impl<FF: PrimeField> Rem for Polynomial<FF> {
    type Output = Self;

    fn rem(self, other: Self) -> Self {
        let (_, remainder) = self
            .naive_divide(&other)
            .expect("divisor should be non-zero");
        remainder
    }
}

impl<FF: PrimeField> Add for Polynomial<FF> {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        let summed = self
            .coefficients
            .into_iter()
            .zip_longest(other.coefficients)
            .map(|a| match a {
                EitherOrBoth::Both(l, r) => l + r,
                EitherOrBoth::Left(l) => l,
                EitherOrBoth::Right(r) => r,
            })
            .collect();

        Self::new(summed)
    }
}

impl<FF: PrimeField> AddAssign for Polynomial<FF> {
    fn add_assign(&mut self, rhs: Self) {
        let rhs_len = rhs.coefficients.len();
        let self_len = self.coefficients.len();
        for i in 0..std::cmp::min(self_len, rhs_len) {
            self.coefficients[i] += rhs.coefficients[i];
        }

        if rhs_len > self_len {
            self.coefficients
                .extend_from_slice(&rhs.coefficients[self_len..]);
        }
        self.normalize();
    }
}

impl<FF: PrimeField> Sub for Polynomial<FF> {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        let coefficients = self
            .coefficients
            .into_iter()
            .zip_longest(other.coefficients)
            .map(|a| match a {
                EitherOrBoth::Both(l, r) => l - r,
                EitherOrBoth::Left(l) => l,
                EitherOrBoth::Right(r) => -r,
            })
            .collect();

        Self::new(coefficients)
    }
}

impl<FF: PrimeField> SubAssign for Polynomial<FF> {
    fn sub_assign(&mut self, rhs: Self) {
        *self += -rhs;
    }
}

impl<FF: PrimeField> Mul for Polynomial<FF> {
    type Output = Self;

    fn mul(self, other: Self) -> Self {
        self.naive_multiply(&other)
    }
}

impl<FF: PrimeField> Mul<FF> for Polynomial<FF> {
    type Output = Self;

    fn mul(self, scalar: FF) -> Self {
        self.scalar_mul(scalar)
    }
}

impl<FF: PrimeField> MulAssign for Polynomial<FF> {
    fn mul_assign(&mut self, rhs: Self) {
        *self = self.naive_multiply(&rhs);
    }
}

impl<FF: PrimeField> Neg for Polynomial<FF> {
    type Output = Self;

    fn neg(self) -> Self::Output {
        let coefficients = self.coefficients.into_iter().map(|c| -c).collect();
        Self { coefficients }
    }
}
