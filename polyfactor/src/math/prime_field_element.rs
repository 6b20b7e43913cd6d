use std::fmt;
use std::fmt::Formatter;
use std::iter::Product;
use std::iter::Sum;
use std::ops::Add;
use std::ops::AddAssign;
use std::ops::Mul;
use std::ops::MulAssign;
use std::ops::Neg;
use std::ops::Sub;
use std::ops::SubAssign;
use std::str::FromStr;

use arbitrary::Arbitrary;
use arbitrary::Unstructured;
use get_size2::GetSize;
use num_traits::ConstOne;
use num_traits::ConstZero;
use num_traits::One;
use num_traits::Zero;
use rand::Rng;
use rand::distr::Distribution;
use rand::distr::StandardUniform;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;
use serde::de::Error as _;

use crate::error::FieldElementError;
use crate::math::traits::Inverse;
use crate::math::traits::PrimeField;

/// An element of ℤ/Pℤ for a small prime `P`, stored as its canonical
/// representative in `[0, P)`.
///
/// Inversion is done by exhaustive search, which restricts this type to
/// fields of small characteristic. If `P` is not prime, non-zero elements may
/// lack an inverse, which is reported as [`FieldElementError::NoInverse`].
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct PrimeFieldElement<const P: u64>(u64);

/// The binary field GF(2).
pub type F2 = PrimeFieldElement<2>;

/// Simplifies constructing [prime field element][PrimeFieldElement]s.
///
/// The type [`PrimeFieldElement`] must be in scope for this macro to work, and
/// the characteristic must be inferable from context. See
/// [`PrimeFieldElement::from`] for supported types.
///
/// # Examples
///
/// ```
/// # use polyfactor::prelude::*;
/// let a: PrimeFieldElement<5> = pfe!(4);
/// let b: PrimeFieldElement<5> = pfe!(-1); // correctly translates to `4`
/// assert_eq!(a, b);
/// ```
#[macro_export]
macro_rules! pfe {
    ($value:expr) => {
        PrimeFieldElement::from($value)
    };
}

/// Simplifies constructing vectors of [prime field element][PrimeFieldElement]s.
///
/// The type [`PrimeFieldElement`] must be in scope for this macro to work. See
/// also [`pfe!`].
///
/// # Examples
///
/// ```
/// # use polyfactor::prelude::*;
/// let a: Vec<PrimeFieldElement<3>> = pfe_vec![1, 2, 3];
/// let b = vec![pfe!(1), pfe!(2), pfe!(0)];
/// assert_eq!(a, b);
/// ```
#[macro_export]
macro_rules! pfe_vec {
    ($b:expr; $n:expr) => {
        vec![PrimeFieldElement::from($b); $n]
    };
    ($($b:expr),* $(,)?) => {
        vec![$(PrimeFieldElement::from($b)),*]
    };
}

impl<const P: u64> PrimeFieldElement<P> {
    const CHARACTERISTIC_IS_AT_LEAST_TWO: () =
        assert!(P >= 2, "characteristic must be at least 2");

    pub const ZERO: Self = Self(0);
    pub const ONE: Self = Self(1);

    /// Reduces `value` modulo `P`.
    pub const fn new(value: u64) -> Self {
        let () = Self::CHARACTERISTIC_IS_AT_LEAST_TWO;
        Self(value % P)
    }

    fn try_new(value: u64) -> Result<Self, FieldElementError> {
        if value >= P {
            return Err(FieldElementError::NotCanonical(value));
        }

        Ok(Self::new(value))
    }

    pub const fn value(&self) -> u64 {
        self.0
    }

    #[must_use]
    pub const fn mod_pow(&self, exp: u64) -> Self {
        let mut acc = Self::ONE;
        let mut base = *self;
        let mut exp = exp;
        while exp > 0 {
            if exp & 1 == 1 {
                acc = Self(mul_mod::<P>(acc.0, base.0));
            }
            base = Self(mul_mod::<P>(base.0, base.0));
            exp >>= 1;
        }

        acc
    }
}

const fn mul_mod<const P: u64>(a: u64, b: u64) -> u64 {
    ((a as u128 * b as u128) % P as u128) as u64
}

impl<const P: u64> GetSize for PrimeFieldElement<P> {}

impl<const P: u64> fmt::Display for PrimeFieldElement<P> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{P}]", self.0)
    }
}

impl<const P: u64> FromStr for PrimeFieldElement<P> {
    type Err = FieldElementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.parse().map_err(FieldElementError::ParseIntError)?;
        Self::try_new(value)
    }
}

impl<'a, const P: u64> Arbitrary<'a> for PrimeFieldElement<P> {
    fn arbitrary(u: &mut Unstructured<'a>) -> arbitrary::Result<Self> {
        u.arbitrary().map(Self::new)
    }
}

impl<const P: u64> Serialize for PrimeFieldElement<P> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de, const P: u64> Deserialize<'de> for PrimeFieldElement<P> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Self::try_new(u64::deserialize(deserializer)?).map_err(D::Error::custom)
    }
}

impl<const P: u64> Distribution<PrimeFieldElement<P>> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PrimeFieldElement<P> {
        PrimeFieldElement::new(rng.random_range(0..P))
    }
}

impl<const P: u64> From<u64> for PrimeFieldElement<P> {
    fn from(value: u64) -> Self {
        Self::new(value)
    }
}

impl<const P: u64> From<u32> for PrimeFieldElement<P> {
    fn from(value: u32) -> Self {
        Self::new(value.into())
    }
}

impl<const P: u64> From<usize> for PrimeFieldElement<P> {
    fn from(value: usize) -> Self {
        // targets with pointers wider than 64 bits are not supported
        Self::new(value as u64)
    }
}

impl<const P: u64> From<i64> for PrimeFieldElement<P> {
    fn from(value: i64) -> Self {
        let reduced = i128::from(value).rem_euclid(i128::from(P));
        Self::new(reduced as u64)
    }
}

impl<const P: u64> From<i32> for PrimeFieldElement<P> {
    fn from(value: i32) -> Self {
        Self::from(i64::from(value))
    }
}

impl<const P: u64> From<PrimeFieldElement<P>> for u64 {
    fn from(element: PrimeFieldElement<P>) -> Self {
        element.0
    }
}

impl<const P: u64> Inverse for PrimeFieldElement<P> {
    fn try_inverse(&self) -> Result<Self, FieldElementError> {
        (1..P)
            .map(Self)
            .find(|&candidate| (*self * candidate).is_one())
            .ok_or(FieldElementError::NoInverse)
    }
}

impl<const P: u64> PrimeField for PrimeFieldElement<P> {
    const CHARACTERISTIC: u64 = P;

    fn value(&self) -> u64 {
        self.0
    }
}

impl<const P: u64> Zero for PrimeFieldElement<P> {
    #[inline]
    fn zero() -> Self {
        Self::ZERO
    }

    #[inline]
    fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl<const P: u64> ConstZero for PrimeFieldElement<P> {
    const ZERO: Self = Self(0);
}

impl<const P: u64> One for PrimeFieldElement<P> {
    #[inline]
    fn one() -> Self {
        Self::ONE
    }

    #[inline]
    fn is_one(&self) -> bool {
        self.0 == 1
    }
}

impl<const P: u64> ConstOne for PrimeFieldElement<P> {
    const ONE: Self = Self(1);
}

impl<const P: u64> Add for PrimeFieldElement<P> {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        let sum = (u128::from(self.0) + u128::from(rhs.0)) % u128::from(P);
        Self(sum as u64)
    }
}

impl<const P: u64> Sub for PrimeFieldElement<P> {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        self + -rhs
    }
}

impl<const P: u64> Mul for PrimeFieldElement<P> {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Self(mul_mod::<P>(self.0, rhs.0))
    }
}

impl<const P: u64> Neg for PrimeFieldElement<P> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self((P - self.0) % P)
    }
}

impl<const P: u64> AddAssign for PrimeFieldElement<P> {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl<const P: u64> SubAssign for PrimeFieldElement<P> {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl<const P: u64> MulAssign for PrimeFieldElement<P> {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl<const P: u64> Sum for PrimeFieldElement<P> {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |acc, x| acc + x)
    }
}

impl<const P: u64> Product for PrimeFieldElement<P> {
    fn product<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ONE, |acc, x| acc * x)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use proptest::prelude::*;
    use proptest_arbitrary_interop::arb;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use test_strategy::proptest;

    use super::*;

    type F3 = PrimeFieldElement<3>;
    type F5 = PrimeFieldElement<5>;
    type F7 = PrimeFieldElement<7>;

    impl<const P: u64> proptest::arbitrary::Arbitrary for PrimeFieldElement<P> {
        type Parameters = ();

        fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
            arb().boxed()
        }

        type Strategy = BoxedStrategy<Self>;
    }

    #[test]
    fn construction_reduces_modulo_characteristic() {
        assert_eq!(2, F5::new(7).value());
        assert_eq!(F5::new(2), pfe!(7));
        assert_eq!(F5::new(4), pfe!(-1));
        assert_eq!(F5::new(3), pfe!(-12_i64));
        assert_eq!(F7::ZERO, pfe!(-14));
    }

    #[test]
    fn small_field_arithmetic() {
        let four = F5::new(4);
        let three = F5::new(3);
        assert_eq!(F5::new(2), four * three);
        assert_eq!(F5::new(3), four.try_div(three).unwrap());
        assert_eq!(F3::new(1), F3::new(2) + F3::new(2));
        assert_eq!(F7::new(3), F7::new(2) - F7::new(6));
        assert_eq!(F7::new(5), -F7::new(2));
        assert_eq!(F7::ZERO, -F7::ZERO);
    }

    #[test]
    fn inverses_in_gf5() {
        for (element, inverse) in [(1, 1), (2, 3), (3, 2), (4, 4)] {
            assert_eq!(F5::new(inverse), F5::new(element).try_inverse().unwrap());
        }
    }

    #[test]
    fn zero_has_no_inverse() {
        assert_eq!(Err(FieldElementError::NoInverse), F5::ZERO.try_inverse());
        assert_eq!(Err(FieldElementError::NoInverse), F2::ZERO.try_inverse());
    }

    #[test]
    fn division_by_zero_fails() {
        assert_eq!(
            Err(FieldElementError::DivisionByZero),
            F7::new(3).try_div(F7::ZERO)
        );
    }

    #[test]
    fn non_prime_modulus_reports_missing_inverse() {
        let two = PrimeFieldElement::<4>::new(2);
        assert_eq!(Err(FieldElementError::NoInverse), two.try_inverse());
    }

    #[test]
    fn display_shows_value_and_characteristic() {
        assert_eq!("4[5]", F5::new(4).to_string());
        assert_eq!("0[2]", F2::ZERO.to_string());
    }

    #[test]
    fn parsing_rejects_non_canonical_values() {
        assert_eq!(Ok(F5::new(3)), "3".parse());
        assert_eq!(Err(FieldElementError::NotCanonical(5)), "5".parse::<F5>());
        assert!(matches!(
            "three".parse::<F5>(),
            Err(FieldElementError::ParseIntError(_))
        ));
    }

    #[test]
    fn serialization_uses_canonical_integer() {
        let element = F7::new(6);
        let json = serde_json::to_string(&element).unwrap();
        assert_eq!("6", json);
        assert_eq!(element, serde_json::from_str(&json).unwrap());
        assert!(serde_json::from_str::<F7>("7").is_err());
    }

    #[test]
    fn random_elements_are_canonical() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for _ in 0..100 {
            let element: F7 = rng.random();
            assert!(element.value() < 7);
        }
    }

    #[proptest]
    fn every_non_zero_element_is_invertible(
        #[filter(!#element.is_zero())] element: PrimeFieldElement<97>,
    ) {
        let inverse = element.try_inverse().unwrap();
        prop_assert!((element * inverse).is_one());
    }

    #[proptest]
    fn subtraction_is_addition_of_negation(a: F7, b: F7) {
        prop_assert_eq!(a - b, a + -b);
        prop_assert_eq!(a, a - b + b);
    }

    #[proptest]
    fn multiplication_distributes_over_addition(
        a: PrimeFieldElement<13>,
        b: PrimeFieldElement<13>,
        c: PrimeFieldElement<13>,
    ) {
        prop_assert_eq!(a * (b + c), a * b + a * c);
    }

    #[proptest]
    fn fermats_little_theorem_holds(#[filter(!#a.is_zero())] a: PrimeFieldElement<101>) {
        prop_assert!(a.mod_pow(100).is_one());
    }

    #[proptest]
    fn compound_assignment_matches_binary_operators(a: F5, b: F5) {
        let mut c = a;
        c += b;
        prop_assert_eq!(a + b, c);
        c -= b;
        prop_assert_eq!(a, c);
        c *= b;
        prop_assert_eq!(a * b, c);
    }

    #[proptest]
    fn large_characteristic_does_not_overflow(
        a: PrimeFieldElement<18446744073709551557>,
        b: PrimeFieldElement<18446744073709551557>,
    ) {
        prop_assert!((a + b).value() < 18446744073709551557);
        prop_assert!((a * b).value() < 18446744073709551557);
        prop_assert_eq!(a, a - b + b);
    }

    #[proptest]
    fn sum_and_product_fold_correctly(
        #[strategy(prop::collection::vec(arb::<F7>(), 0..10))] elements: Vec<F7>,
    ) {
        let sum = elements.iter().copied().fold(F7::ZERO, |acc, x| acc + x);
        let product = elements.iter().copied().fold(F7::ONE, |acc, x| acc * x);
        prop_assert_eq!(sum, elements.iter().copied().sum::<F7>());
        prop_assert_eq!(product, elements.iter().copied().product::<F7>());
    }
}
