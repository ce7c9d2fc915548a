//! Exact algebra over the symmetric group on n labeled points.
//!
//! Elements come in three interconvertible shapes: [`Permutation`] (an image
//! sequence), [`Cycle`] (a single cyclic permutation) and
//! [`CycleDecomposition`] (disjoint cycles covering `1..=n`). The engine in
//! [`generate`](crate::generate) enumerates all permutations of a degree
//! with a choice of four deterministic orders, and
//! [`random`](crate::random) draws uniformly.

mod describe;

pub mod cycle;
pub mod cycle_decomposition;
pub mod element;
pub mod error;
pub mod generate;
pub mod permutation;
pub mod random;

pub use cycle::Cycle;
pub use cycle_decomposition::CycleDecomposition;
pub use element::{Composable, HasIdentity, SymmetricGroupElement};
pub use error::{
    ConstructionError, DegreeMismatch, DomainError, UnsupportedAlgorithm,
};
pub use generate::{generate, generate_named, Algorithm, PermutationGenerator};
pub use permutation::Permutation;
pub use random::{random_generator, random_permutation, RandomAlgorithm, RandomPermutations};
