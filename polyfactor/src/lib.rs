pub mod config;
pub mod error;
pub mod math;
pub mod prelude;

// re-export crates used in our public API
pub use num_bigint;
pub use rand;
