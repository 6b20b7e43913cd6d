pub use crate::error::FactorizationError;
pub use crate::error::FieldElementError;
pub use crate::error::PolynomialError;
pub use crate::math::factorization;
pub use crate::math::factorization::Factor;
pub use crate::math::factorization::SplitBudget;
pub use crate::math::factorization::SplittingStrategy;
pub use crate::math::gf2_dense_polynomial::DenseGf2Polynomial;
pub use crate::math::gf2_dense_polynomial::Gf2Bitset;
pub use crate::math::gf2_sparse_polynomial::SparseGf2Polynomial;
pub use crate::math::polynomial::Polynomial;
pub use crate::math::prime_field_element::F2;
pub use crate::math::prime_field_element::PrimeFieldElement;
pub use crate::math::traits::Inverse;
pub use crate::math::traits::PrimeField;
pub use crate::math::traits::UnivariatePolynomial;
pub use crate::pfe;
pub use crate::pfe_vec;
