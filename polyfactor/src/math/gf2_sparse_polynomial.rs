//! Polynomials over GF(2) stored as the list of exponents with coefficient
//! one. Arithmetic is a merge over sorted exponent lists, which keeps it cheap
//! for high-degree polynomials with few terms.

use std::cmp::Ordering;
use std::fmt::Display;
use std::fmt::Formatter;
use std::ops::Add;
use std::ops::AddAssign;
use std::ops::Mul;
use std::ops::Sub;

use arbitrary::Arbitrary;
use arbitrary::Unstructured;
use get_size2::GetSize;
use itertools::EitherOrBoth;
use itertools::Itertools;
use num_traits::One;
use rand::Rng;
use serde::Deserialize;
use serde::Serialize;

use crate::error::PolynomialError;
use crate::math::polynomial::Polynomial;
use crate::math::prime_field_element::F2;
use crate::math::traits::UnivariatePolynomial;

/// A polynomial over GF(2), represented by its exponents with non-zero
/// coefficient, in strictly decreasing order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, GetSize, Serialize, Deserialize)]
#[serde(from = "Vec<u64>", into = "Vec<u64>")]
pub struct SparseGf2Polynomial {
    exponents: Vec<u64>,
}

/// The symmetric difference of two strictly decreasing exponent lists.
fn xor_merge<'a>(
    lhs: impl IntoIterator<Item = &'a u64>,
    rhs: impl IntoIterator<Item = u64>,
) -> Vec<u64> {
    lhs.into_iter()
        .copied()
        .merge_join_by(rhs, |l, r| r.cmp(l))
        .filter_map(|either| match either {
            EitherOrBoth::Left(e) | EitherOrBoth::Right(e) => Some(e),
            EitherOrBoth::Both(_, _) => None,
        })
        .collect()
}

impl SparseGf2Polynomial {
    /// The sum of the monomials `X^e` for all given `e`. Exponents occurring an
    /// even number of times cancel.
    ///
    /// # Examples
    ///
    /// ```
    /// # use polyfactor::prelude::*;
    /// let f = SparseGf2Polynomial::from_exponents([1, 5, 3, 2, 7, 7]);
    /// assert_eq!([5, 3, 2, 1], f.exponents());
    /// ```
    pub fn from_exponents(exponents: impl IntoIterator<Item = u64>) -> Self {
        let mut exponents = exponents.into_iter().collect_vec();
        exponents.sort_unstable_by(|a, b| b.cmp(a));

        let exponents = exponents
            .into_iter()
            .dedup_with_count()
            .filter(|&(count, _)| count % 2 == 1)
            .map(|(_, exponent)| exponent)
            .collect();

        Self { exponents }
    }

    /// The exponents with non-zero coefficient, highest first.
    pub fn exponents(&self) -> &[u64] {
        &self.exponents
    }

    pub fn x() -> Self {
        Self { exponents: vec![1] }
    }

    /// Multiplication by `X^n`.
    #[must_use]
    pub fn times_x_to_the(&self, n: u64) -> Self {
        let exponents = self.exponents.iter().map(|&e| e + n).collect();
        Self { exponents }
    }

    fn leading_exponent(&self) -> Option<u64> {
        self.exponents.first().copied()
    }

    fn naive_multiply(&self, other: &Self) -> Self {
        let mut product = vec![];
        for &shift in &self.exponents {
            product = xor_merge(&product, other.exponents.iter().map(|&e| e + shift));
        }

        Self { exponents: product }
    }

    fn naive_divide(&self, divisor: &Self) -> Result<(Self, Self), PolynomialError> {
        let divisor_degree = divisor
            .leading_exponent()
            .ok_or(PolynomialError::DivisionByZero)?;

        let mut quotient = vec![];
        let mut remainder = self.exponents.clone();
        while let Some(&remainder_degree) = remainder.first() {
            if remainder_degree < divisor_degree {
                break;
            }

            let shift = remainder_degree - divisor_degree;
            quotient.push(shift);
            remainder = xor_merge(&remainder, divisor.exponents.iter().map(|&e| e + shift));
        }

        let quotient = Self {
            exponents: quotient,
        };
        let remainder = Self {
            exponents: remainder,
        };
        Ok((quotient, remainder))
    }
}

impl PartialOrd for SparseGf2Polynomial {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Orders by degree first, then by the remaining terms. This coincides with
/// the order of the polynomials read as binary numbers.
impl Ord for SparseGf2Polynomial {
    fn cmp(&self, other: &Self) -> Ordering {
        self.exponents.cmp(&other.exponents)
    }
}

impl Display for SparseGf2Polynomial {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.exponents.is_empty() {
            return write!(f, "0");
        }

        let terms = self.exponents.iter().map(|&e| match e {
            0 => "1".to_string(),
            1 => "X".to_string(),
            _ => format!("X^{e}"),
        });
        write!(f, "{}", terms.format(" + "))
    }
}

impl<'a> Arbitrary<'a> for SparseGf2Polynomial {
    fn arbitrary(u: &mut Unstructured<'a>) -> arbitrary::Result<Self> {
        let exponents: Vec<u8> = u.arbitrary()?;
        Ok(Self::from_exponents(exponents.into_iter().map(u64::from)))
    }
}

impl From<Vec<u64>> for SparseGf2Polynomial {
    fn from(exponents: Vec<u64>) -> Self {
        Self::from_exponents(exponents)
    }
}

impl From<SparseGf2Polynomial> for Vec<u64> {
    fn from(polynomial: SparseGf2Polynomial) -> Self {
        polynomial.exponents
    }
}

impl From<&Polynomial<F2>> for SparseGf2Polynomial {
    fn from(polynomial: &Polynomial<F2>) -> Self {
        let exponents = polynomial
            .coefficients()
            .iter()
            .enumerate()
            .rev()
            .filter(|(_, c)| c.is_one())
            .map(|(e, _)| e as u64)
            .collect();

        Self { exponents }
    }
}

impl From<Polynomial<F2>> for SparseGf2Polynomial {
    fn from(polynomial: Polynomial<F2>) -> Self {
        Self::from(&polynomial)
    }
}

impl From<&SparseGf2Polynomial> for Polynomial<F2> {
    fn from(polynomial: &SparseGf2Polynomial) -> Self {
        let Some(degree) = polynomial.leading_exponent() else {
            return Polynomial::zero();
        };

        let mut coefficients = vec![F2::ZERO; degree as usize + 1];
        for &e in &polynomial.exponents {
            coefficients[e as usize] = F2::ONE;
        }

        Polynomial::new(coefficients)
    }
}

impl From<SparseGf2Polynomial> for Polynomial<F2> {
    fn from(polynomial: SparseGf2Polynomial) -> Self {
        Self::from(&polynomial)
    }
}

impl UnivariatePolynomial for SparseGf2Polynomial {
    const CHARACTERISTIC: u64 = 2;

    fn zero() -> Self {
        Self { exponents: vec![] }
    }

    fn one() -> Self {
        Self { exponents: vec![0] }
    }

    fn monomial(exponent: usize) -> Result<Self, PolynomialError> {
        Ok(Self {
            exponents: vec![exponent as u64],
        })
    }

    fn from_field_value(value: u64) -> Self {
        match value % 2 {
            0 => Self::zero(),
            _ => Self::one(),
        }
    }

    fn degree(&self) -> isize {
        self.leading_exponent().map_or(-1, |e| e as isize)
    }

    fn is_one(&self) -> bool {
        self.exponents == [0]
    }

    fn try_mul(&self, other: &Self) -> Result<Self, PolynomialError> {
        Ok(self.naive_multiply(other))
    }

    fn divide(&self, divisor: &Self) -> Result<(Self, Self), PolynomialError> {
        self.naive_divide(divisor)
    }

    fn monic(&self) -> Result<Self, PolynomialError> {
        Ok(self.clone())
    }

    /// Only odd exponents survive, each shifted down by one.
    fn formal_derivative(&self) -> Self {
        let exponents = self
            .exponents
            .iter()
            .filter(|&&e| e % 2 == 1)
            .map(|&e| e - 1)
            .collect();

        Self { exponents }
    }

    fn power(&self, n: usize) -> Result<Self, PolynomialError> {
        let exponents = self
            .exponents
            .iter()
            .map(|&exponent| {
                exponent
                    .checked_mul(n as u64)
                    .ok_or(PolynomialError::ExponentOverflow { exponent, power: n })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::from_exponents(exponents))
    }

    fn unpower(&self, n: usize) -> Result<Self, PolynomialError> {
        if n == 0 {
            let exponent = self.leading_exponent().unwrap_or(0) as usize;
            return Err(PolynomialError::InvalidDivisibility { exponent, power: n });
        }

        let power = n as u64;
        if let Some(&exponent) = self.exponents.iter().find(|&&e| e % power != 0) {
            let exponent = exponent as usize;
            return Err(PolynomialError::InvalidDivisibility { exponent, power: n });
        }

        let exponents = self.exponents.iter().map(|&e| e / power).collect();
        Ok(Self { exponents })
    }

    fn random<R: Rng + ?Sized>(degree_bound: usize, rng: &mut R) -> Self {
        let exponents = (0..degree_bound as u64)
            .rev()
            .filter(|_| rng.random())
            .collect();

        Self { exponents }
    }
}

impl Add for SparseGf2Polynomial {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        let exponents = xor_merge(&self.exponents, other.exponents);
        Self { exponents }
    }
}

impl AddAssign for SparseGf2Polynomial {
    fn add_assign(&mut self, rhs: Self) {
        self.exponents = xor_merge(&self.exponents, rhs.exponents);
    }
}

/// Subtraction and addition coincide in characteristic two.
impl Sub for SparseGf2Polynomial {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        self + other
    }
}

impl Mul for SparseGf2Polynomial {
    type Output = Self;

    fn mul(self, other: Self) -> Self {
        self.naive_multiply(&other)
    }
}
