pub mod factorization;
pub mod gf2_dense_polynomial;
pub mod gf2_sparse_polynomial;
pub mod other;
pub mod polynomial;
pub mod prime_field_element;
pub mod traits;
