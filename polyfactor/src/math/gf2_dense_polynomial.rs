use std::fmt::Display;
use std::fmt::Formatter;
use std::ops::Add;
use std::ops::AddAssign;
use std::ops::Sub;

use arbitrary::Arbitrary;
use arbitrary::Unstructured;
use get_size2::GetSize;
use itertools::Itertools;
use num_traits::One;
use rand::Rng;
use serde::Deserialize;
use serde::Serialize;
use serde_big_array::BigArray;

use crate::error::PolynomialError;
use crate::math::gf2_sparse_polynomial::SparseGf2Polynomial;
use crate::math::polynomial::Polynomial;
use crate::math::prime_field_element::F2;
use crate::math::traits::UnivariatePolynomial;

const WORD_BITS: usize = u64::BITS as usize;

/// The dense GF(2) polynomial with room for 1024 coefficients.
pub type Gf2Bitset = DenseGf2Polynomial<16>;

/// A polynomial over GF(2) stored as a fixed-capacity bit vector: bit `i` of
/// the vector is the coefficient of `X^i`. The capacity of `64·WORDS`
/// coefficients is a hard ceiling. Every operation whose result would need a
/// larger exponent fails with [`PolynomialError::CapacityExceeded`].
///
/// The degree is cached and kept in sync on every mutation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "DenseGf2Words<WORDS>", into = "DenseGf2Words<WORDS>")]
pub struct DenseGf2Polynomial<const WORDS: usize> {
    // field order matters for the derived `Ord`
    degree: isize,
    words: [u64; WORDS],
}

#[derive(Serialize, Deserialize)]
struct DenseGf2Words<const WORDS: usize> {
    #[serde(with = "BigArray")]
    words: [u64; WORDS],
}

impl<const WORDS: usize> From<DenseGf2Words<WORDS>> for DenseGf2Polynomial<WORDS> {
    fn from(DenseGf2Words { words }: DenseGf2Words<WORDS>) -> Self {
        Self::from_words(words)
    }
}

impl<const WORDS: usize> From<DenseGf2Polynomial<WORDS>> for DenseGf2Words<WORDS> {
    fn from(polynomial: DenseGf2Polynomial<WORDS>) -> Self {
        Self {
            words: polynomial.words,
        }
    }
}

impl<const WORDS: usize> DenseGf2Polynomial<WORDS> {
    const AT_LEAST_ONE_WORD: () = assert!(WORDS > 0, "capacity must be at least one word");

    /// The number of coefficients the representation can hold.
    pub const CAPACITY: usize = WORDS * WORD_BITS;

    /// Selects the even bit positions. Shifting a polynomial right by one and
    /// masking keeps exactly the images of the odd-degree terms, which is the
    /// formal derivative over GF(2).
    pub const DERIVATIVE_MASK: [u64; WORDS] = [0x5555_5555_5555_5555; WORDS];

    pub const fn capacity(&self) -> usize {
        Self::CAPACITY
    }

    pub fn from_words(words: [u64; WORDS]) -> Self {
        let () = Self::AT_LEAST_ONE_WORD;
        let mut polynomial = Self { degree: -1, words };
        polynomial.recompute_degree(Self::CAPACITY as isize - 1);
        polynomial
    }

    /// The sum of the monomials `X^e` for all given `e`.
    ///
    /// # Errors
    ///
    /// Fails if some exponent does not fit the capacity.
    pub fn from_exponents(
        exponents: impl IntoIterator<Item = u64>,
    ) -> Result<Self, PolynomialError> {
        let mut words = [0; WORDS];
        for exponent in exponents {
            let exponent = Self::checked_exponent(exponent as usize)?;
            words[exponent / WORD_BITS] ^= 1 << (exponent % WORD_BITS);
        }

        Ok(Self::from_words(words))
    }

    pub fn words(&self) -> &[u64; WORDS] {
        &self.words
    }

    /// The exponents with non-zero coefficient, highest first.
    pub fn exponents(&self) -> Vec<u64> {
        let degree = usize::try_from(self.degree).map_or(0, |d| d + 1);
        (0..degree)
            .rev()
            .filter(|&i| self.bit(i))
            .map(|i| i as u64)
            .collect()
    }

    pub fn x() -> Self {
        let mut words = [0; WORDS];
        words[0] = 0b10;
        Self::from_words(words)
    }

    fn checked_exponent(exponent: usize) -> Result<usize, PolynomialError> {
        if exponent >= Self::CAPACITY {
            return Err(PolynomialError::CapacityExceeded {
                degree: exponent,
                capacity: Self::CAPACITY,
            });
        }

        Ok(exponent)
    }

    fn bit(&self, i: usize) -> bool {
        self.words[i / WORD_BITS] >> (i % WORD_BITS) & 1 == 1
    }

    fn flip_bit(&mut self, i: usize) {
        self.words[i / WORD_BITS] ^= 1 << (i % WORD_BITS);
    }

    /// Scans down from `upper_bound` for the highest set bit.
    fn recompute_degree(&mut self, upper_bound: isize) {
        let Ok(upper_bound) = usize::try_from(upper_bound) else {
            self.degree = -1;
            return;
        };

        let top_word = (upper_bound / WORD_BITS).min(WORDS - 1);
        self.degree = self.words[..=top_word]
            .iter()
            .rposition(|&word| word != 0)
            .map_or(-1, |i| {
                let high_bit = WORD_BITS - 1 - self.words[i].leading_zeros() as usize;
                (i * WORD_BITS + high_bit) as isize
            });
    }

    /// `self ^= other · X^shift`. The caller guarantees that the result fits
    /// the capacity.
    fn xor_shifted(&mut self, other: &Self, shift: usize) {
        let Ok(other_degree) = usize::try_from(other.degree) else {
            return;
        };

        let word_shift = shift / WORD_BITS;
        let bit_shift = shift % WORD_BITS;
        let top_word = ((other_degree + shift) / WORD_BITS).min(WORDS - 1);
        for i in word_shift..=top_word {
            let source = i - word_shift;
            let mut word = other.words[source] << bit_shift;
            if bit_shift > 0 && source > 0 {
                word |= other.words[source - 1] >> (WORD_BITS - bit_shift);
            }
            self.words[i] ^= word;
        }
    }

    /// `self ← self · X`. The caller guarantees that the result fits the
    /// capacity.
    fn shift_up_by_one(&mut self) {
        let mut carry = 0;
        for word in &mut self.words {
            let next_carry = *word >> (WORD_BITS - 1);
            *word = *word << 1 | carry;
            carry = next_carry;
        }
        if self.degree >= 0 {
            self.degree += 1;
        }
    }

    /// Shift-and-add multiplication that reduces after every shift, so no
    /// intermediate result reaches the degree of the modulus.
    fn reducing_multiply(&self, other: &Self, modulus: &Self) -> Result<Self, PolynomialError> {
        let lhs = self.remainder(modulus)?;
        let mut shifted = other.remainder(modulus)?;
        let mut product = Self::zero();
        let Ok(lhs_degree) = usize::try_from(lhs.degree) else {
            return Ok(product);
        };

        for i in 0..=lhs_degree {
            if lhs.bit(i) {
                product += shifted;
            }
            if i < lhs_degree {
                shifted.shift_up_by_one();
                if shifted.degree == modulus.degree {
                    shifted += *modulus;
                }
            }
        }

        Ok(product)
    }

    fn naive_multiply(&self, other: &Self) -> Result<Self, PolynomialError> {
        let (Ok(degree_lhs), Ok(degree_rhs)) =
            (usize::try_from(self.degree), usize::try_from(other.degree))
        else {
            return Ok(Self::zero());
        };
        Self::checked_exponent(degree_lhs + degree_rhs)?;

        let mut product = Self::zero();
        for i in (0..=degree_lhs).filter(|&i| self.bit(i)) {
            product.xor_shifted(other, i);
        }
        product.degree = (degree_lhs + degree_rhs) as isize;

        Ok(product)
    }

    fn naive_divide(&self, divisor: &Self) -> Result<(Self, Self), PolynomialError> {
        let Ok(divisor_degree) = usize::try_from(divisor.degree) else {
            return Err(PolynomialError::DivisionByZero);
        };

        let mut quotient = Self::zero();
        let mut remainder = *self;
        while remainder.degree >= divisor.degree {
            let remainder_degree = remainder.degree;
            let shift = remainder_degree as usize - divisor_degree;
            quotient.flip_bit(shift);
            remainder.xor_shifted(divisor, shift);
            remainder.recompute_degree(remainder_degree - 1);
        }
        quotient.recompute_degree(self.degree - divisor.degree);

        Ok((quotient, remainder))
    }
}

impl<const WORDS: usize> Display for DenseGf2Polynomial<WORDS> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.degree < 0 {
            return write!(f, "0");
        }

        let terms = self.exponents().into_iter().map(|e| match e {
            0 => "1".to_string(),
            1 => "X".to_string(),
            _ => format!("X^{e}"),
        });
        write!(f, "{}", terms.format(" + "))
    }
}

impl<const WORDS: usize> GetSize for DenseGf2Polynomial<WORDS> {}

impl<'a, const WORDS: usize> Arbitrary<'a> for DenseGf2Polynomial<WORDS> {
    fn arbitrary(u: &mut Unstructured<'a>) -> arbitrary::Result<Self> {
        Ok(Self::from_words(u.arbitrary()?))
    }
}

impl<const WORDS: usize> TryFrom<&Polynomial<F2>> for DenseGf2Polynomial<WORDS> {
    type Error = PolynomialError;

    fn try_from(polynomial: &Polynomial<F2>) -> Result<Self, Self::Error> {
        let exponents = polynomial
            .coefficients()
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_one())
            .map(|(e, _)| e as u64);

        Self::from_exponents(exponents)
    }
}

impl<const WORDS: usize> TryFrom<Polynomial<F2>> for DenseGf2Polynomial<WORDS> {
    type Error = PolynomialError;

    fn try_from(polynomial: Polynomial<F2>) -> Result<Self, Self::Error> {
        Self::try_from(&polynomial)
    }
}

impl<const WORDS: usize> TryFrom<&SparseGf2Polynomial> for DenseGf2Polynomial<WORDS> {
    type Error = PolynomialError;

    fn try_from(polynomial: &SparseGf2Polynomial) -> Result<Self, Self::Error> {
        Self::from_exponents(polynomial.exponents().iter().copied())
    }
}

impl<const WORDS: usize> From<DenseGf2Polynomial<WORDS>> for Polynomial<F2> {
    fn from(polynomial: DenseGf2Polynomial<WORDS>) -> Self {
        let Ok(degree) = usize::try_from(polynomial.degree) else {
            return Polynomial::zero();
        };

        let coefficients = (0..=degree)
            .map(|i| if polynomial.bit(i) { F2::ONE } else { F2::ZERO })
            .collect();

        Polynomial::new(coefficients)
    }
}

impl<const WORDS: usize> From<DenseGf2Polynomial<WORDS>> for SparseGf2Polynomial {
    fn from(polynomial: DenseGf2Polynomial<WORDS>) -> Self {
        SparseGf2Polynomial::from_exponents(polynomial.exponents())
    }
}

impl<const WORDS: usize> UnivariatePolynomial for DenseGf2Polynomial<WORDS> {
    const CHARACTERISTIC: u64 = 2;

    fn zero() -> Self {
        Self {
            degree: -1,
            words: [0; WORDS],
        }
    }

    fn one() -> Self {
        let mut words = [0; WORDS];
        words[0] = 1;
        Self::from_words(words)
    }

    fn monomial(exponent: usize) -> Result<Self, PolynomialError> {
        let exponent = Self::checked_exponent(exponent)?;
        let mut monomial = Self::zero();
        monomial.flip_bit(exponent);
        monomial.degree = exponent as isize;

        Ok(monomial)
    }

    fn from_field_value(value: u64) -> Self {
        match value % 2 {
            0 => Self::zero(),
            _ => Self::one(),
        }
    }

    fn degree(&self) -> isize {
        self.degree
    }

    fn is_one(&self) -> bool {
        self.degree == 0
    }

    fn try_mul(&self, other: &Self) -> Result<Self, PolynomialError> {
        self.naive_multiply(other)
    }

    fn divide(&self, divisor: &Self) -> Result<(Self, Self), PolynomialError> {
        self.naive_divide(divisor)
    }

    fn mul_mod(&self, other: &Self, modulus: &Self) -> Result<Self, PolynomialError> {
        self.reducing_multiply(other, modulus)
    }

    fn monic(&self) -> Result<Self, PolynomialError> {
        Ok(*self)
    }

    fn formal_derivative(&self) -> Self {
        let mut words = [0; WORDS];
        for i in 0..WORDS {
            let carry = self.words.get(i + 1).map_or(0, |&next| next << (WORD_BITS - 1));
            words[i] = (self.words[i] >> 1 | carry) & Self::DERIVATIVE_MASK[i];
        }

        let mut derivative = Self { degree: -1, words };
        derivative.recompute_degree(self.degree - 1);
        derivative
    }

    fn power(&self, n: usize) -> Result<Self, PolynomialError> {
        let mut powered = Self::zero();
        for exponent in self.exponents() {
            let exponent = Self::checked_exponent((exponent as usize).saturating_mul(n))?;
            powered.flip_bit(exponent);
        }
        powered.recompute_degree(Self::CAPACITY as isize - 1);

        Ok(powered)
    }

    fn unpower(&self, n: usize) -> Result<Self, PolynomialError> {
        if n == 0 {
            let exponent = usize::try_from(self.degree).unwrap_or(0);
            return Err(PolynomialError::InvalidDivisibility { exponent, power: n });
        }

        let mut unpowered = Self::zero();
        for exponent in self.exponents() {
            let exponent = exponent as usize;
            if exponent % n != 0 {
                return Err(PolynomialError::InvalidDivisibility { exponent, power: n });
            }
            unpowered.flip_bit(exponent / n);
        }
        unpowered.recompute_degree(self.degree);

        Ok(unpowered)
    }

    fn random<R: Rng + ?Sized>(degree_bound: usize, rng: &mut R) -> Self {
        let degree_bound = degree_bound.min(Self::CAPACITY);
        let mut words = [0; WORDS];
        for (i, word) in words.iter_mut().enumerate() {
            let low_bit = i * WORD_BITS;
            if low_bit >= degree_bound {
                break;
            }

            *word = rng.random();
            let bits_in_bound = degree_bound - low_bit;
            if bits_in_bound < WORD_BITS {
                *word &= (1 << bits_in_bound) - 1;
            }
        }

        Self::from_words(words)
    }
}

impl<const WORDS: usize> Add for DenseGf2Polynomial<WORDS> {
    type Output = Self;

    fn add(mut self, other: Self) -> Self {
        self += other;
        self
    }
}

impl<const WORDS: usize> AddAssign for DenseGf2Polynomial<WORDS> {
    fn add_assign(&mut self, rhs: Self) {
        for (word, rhs_word) in self.words.iter_mut().zip(rhs.words) {
            *word ^= rhs_word;
        }
        self.recompute_degree(self.degree.max(rhs.degree));
    }
}

/// Subtraction and addition coincide in characteristic two.
impl<const WORDS: usize> Sub for DenseGf2Polynomial<WORDS> {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        self + other
    }
}
