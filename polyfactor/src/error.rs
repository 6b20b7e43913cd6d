use std::num::ParseIntError;

use thiserror::Error;

use crate::math::factorization::SplittingStrategy;

#[derive(Debug, Clone, Eq, PartialEq, Error)]
#[non_exhaustive]
pub enum FieldElementError {
    #[error("division by the zero element")]
    DivisionByZero,

    #[error("the zero element has no multiplicative inverse")]
    NoInverse,

    #[error("non-canonical field element value: {0}")]
    NotCanonical(u64),

    #[error("invalid integer")]
    ParseIntError(#[source] ParseIntError),
}

#[derive(Debug, Clone, Eq, PartialEq, Error)]
#[non_exhaustive]
pub enum PolynomialError {
    #[error("division by the zero polynomial")]
    DivisionByZero,

    #[error("degree {degree} exceeds the capacity of {capacity} coefficients")]
    CapacityExceeded { degree: usize, capacity: usize },

    #[error("exponent {exponent} is not divisible by {power}")]
    InvalidDivisibility { exponent: usize, power: usize },

    #[error("exponent {exponent} multiplied by {power} overflows")]
    ExponentOverflow { exponent: u64, power: usize },

    #[error(transparent)]
    Field(#[from] FieldElementError),
}

#[derive(Debug, Clone, Eq, PartialEq, Error)]
#[non_exhaustive]
pub enum FactorizationError {
    #[error("the zero polynomial cannot be factored")]
    ZeroPolynomial,

    #[error("requested characteristic {actual} does not match field characteristic {expected}")]
    CharacteristicMismatch { expected: u64, actual: u64 },

    #[error("degree {degree} is not a positive multiple of factor degree {factor_degree}")]
    InvalidFactorDegree { degree: usize, factor_degree: usize },

    #[error("{strategy} found no non-trivial factor within {attempts} attempts")]
    Exhausted {
        strategy: SplittingStrategy,
        attempts: usize,
    },

    #[error(transparent)]
    Polynomial(#[from] PolynomialError),
}

impl From<FieldElementError> for FactorizationError {
    fn from(error: FieldElementError) -> Self {
        Self::Polynomial(PolynomialError::Field(error))
    }
}
