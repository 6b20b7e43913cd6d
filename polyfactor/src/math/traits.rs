use std::fmt::Debug;
use std::fmt::Display;
use std::hash::Hash;
use std::ops::Add;
use std::ops::AddAssign;
use std::ops::Mul;
use std::ops::MulAssign;
use std::ops::Neg;
use std::ops::Sub;
use std::ops::SubAssign;

use num_bigint::BigUint;
use num_traits::ConstOne;
use num_traits::ConstZero;
use rand::Rng;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::FieldElementError;
use crate::error::PolynomialError;

pub trait Inverse
where
    Self: Sized,
{
    /// The multiplicative inverse: `a * a.try_inverse()? == 1`
    ///
    /// # Errors
    ///
    /// Fails with [`FieldElementError::NoInverse`] if `self` has no multiplicative
    /// inverse. Over a field, this only happens for zero.
    fn try_inverse(&self) -> Result<Self, FieldElementError>;
}

/// An element of the prime field ℤ/pℤ.
pub trait PrimeField:
    Copy
    + Debug
    + Display
    + Eq
    + Ord
    + Hash
    + Serialize
    + DeserializeOwned
    + ConstZero
    + ConstOne
    + Add<Output = Self>
    + Mul<Output = Self>
    + Sub<Output = Self>
    + Neg<Output = Self>
    + AddAssign
    + MulAssign
    + SubAssign
    + Inverse
    + From<u64>
    + Send
    + Sync
{
    /// The characteristic `p` of the field.
    const CHARACTERISTIC: u64;

    /// The canonical representative in `[0, p)`.
    fn value(&self) -> u64;

    /// Multiplication by the inverse of `divisor`.
    fn try_div(self, divisor: Self) -> Result<Self, FieldElementError> {
        if divisor.is_zero() {
            return Err(FieldElementError::DivisionByZero);
        }

        Ok(self * divisor.try_inverse()?)
    }

    #[inline(always)]
    fn square(self) -> Self {
        self * self
    }
}

/// The algebraic contract shared by every polynomial representation in this
/// crate. The factorization pipeline is written against this trait only.
///
/// All representations are kept normalized: no zero coefficient is ever
/// stored, and the zero polynomial has [degree](Self::degree) -1.
pub trait UnivariatePolynomial:
    Clone + Debug + Display + Eq + Ord + Hash + Add<Output = Self> + Sub<Output = Self>
{
    /// The characteristic of the coefficient field.
    const CHARACTERISTIC: u64;

    fn zero() -> Self;

    fn one() -> Self;

    /// `X^exponent`
    ///
    /// # Errors
    ///
    /// Fails for representations with bounded capacity if `exponent` is not
    /// representable.
    fn monomial(exponent: usize) -> Result<Self, PolynomialError>;

    /// The constant polynomial `value mod p`.
    fn from_field_value(value: u64) -> Self;

    /// The degree of the polynomial, or -1 for the zero polynomial.
    fn degree(&self) -> isize;

    fn is_zero(&self) -> bool {
        self.degree() == -1
    }

    fn is_one(&self) -> bool;

    /// Polynomial multiplication.
    ///
    /// # Errors
    ///
    /// Fails with [`PolynomialError::CapacityExceeded`] if the product does not
    /// fit the representation.
    fn try_mul(&self, other: &Self) -> Result<Self, PolynomialError>;

    /// Euclidean division: returns `(quotient, remainder)` such that
    /// `self == quotient · divisor + remainder` and the degree of `remainder` is
    /// smaller than the degree of `divisor`.
    ///
    /// # Errors
    ///
    /// Fails with [`PolynomialError::DivisionByZero`] if `divisor` is zero.
    fn divide(&self, divisor: &Self) -> Result<(Self, Self), PolynomialError>;

    /// Scales the polynomial such that its leading coefficient is one. The zero
    /// polynomial is returned unchanged.
    fn monic(&self) -> Result<Self, PolynomialError>;

    fn formal_derivative(&self) -> Self;

    /// `f(X^n)`: every exponent gets multiplied by `n`.
    fn power(&self, n: usize) -> Result<Self, PolynomialError>;

    /// The inverse of [`power`](Self::power): every exponent gets divided by
    /// `n`.
    ///
    /// # Errors
    ///
    /// Fails with [`PolynomialError::InvalidDivisibility`] if some exponent
    /// with a non-zero coefficient is not a multiple of `n`, or if `n` is zero.
    fn unpower(&self, n: usize) -> Result<Self, PolynomialError>;

    /// A uniformly random polynomial of degree smaller than `degree_bound`.
    /// Representations with bounded capacity clamp the bound to their
    /// capacity.
    fn random<R: Rng + ?Sized>(degree_bound: usize, rng: &mut R) -> Self;

    fn quotient(&self, divisor: &Self) -> Result<Self, PolynomialError> {
        let (quotient, _) = self.divide(divisor)?;
        Ok(quotient)
    }

    fn remainder(&self, divisor: &Self) -> Result<Self, PolynomialError> {
        let (_, remainder) = self.divide(divisor)?;
        Ok(remainder)
    }

    /// The monic greatest common divisor, computed with the Euclidean
    /// algorithm.
    ///
    /// # Errors
    ///
    /// Fails with [`PolynomialError::DivisionByZero`] only if both `self` and
    /// `other` are zero.
    fn gcd(&self, other: &Self) -> Result<Self, PolynomialError> {
        if self.is_zero() && other.is_zero() {
            return Err(PolynomialError::DivisionByZero);
        }

        let (mut a, mut b) = if self.degree() >= other.degree() {
            (self.clone(), other.clone())
        } else {
            (other.clone(), self.clone())
        };

        while !b.is_zero() {
            let remainder = a.remainder(&b)?;
            a = b;
            b = remainder;
        }

        a.monic()
    }

    fn mul_mod(&self, other: &Self, modulus: &Self) -> Result<Self, PolynomialError> {
        self.try_mul(other)?.remainder(modulus)
    }

    /// `self^exponent mod modulus`, by square-and-multiply.
    fn pow_mod(&self, exponent: &BigUint, modulus: &Self) -> Result<Self, PolynomialError> {
        let base = self.remainder(modulus)?;
        let mut acc = Self::one().remainder(modulus)?;
        for i in (0..exponent.bits()).rev() {
            acc = acc.mul_mod(&acc, modulus)?;
            if exponent.bit(i) {
                acc = acc.mul_mod(&base, modulus)?;
            }
        }

        Ok(acc)
    }
}
