use std::collections::BTreeSet;

use crate::cycle_decomposition::CycleDecomposition;
use crate::error::DegreeMismatch;

pub trait HasIdentity: Sized {
    fn identity(degree: usize) -> Self;
}

/// Group-closed representations compose. `Cycle` deliberately does not
/// implement this: the product of two arbitrary cycles is not a cycle.
pub trait Composable: Sized {
    /// Right-to-left composition, `(self ∘ other)(x) = self(other(x))`.
    fn compose(&self, other: &Self) -> Result<Self, DegreeMismatch>;
    fn degree(&self) -> usize;
}

/// The capability set shared by the three representations of a symmetric
/// group element.
pub trait SymmetricGroupElement {
    /// The smallest m > 0 with the m-th power equal to the identity.
    fn order(&self) -> usize;

    /// +1 for even elements, -1 for odd ones.
    fn sgn(&self) -> i32;

    /// The points not fixed by the element.
    fn support(&self) -> BTreeSet<usize>;

    fn cycle_decomposition(&self) -> CycleDecomposition;

    fn is_even(&self) -> bool {
        self.sgn() == 1
    }

    fn is_odd(&self) -> bool {
        self.sgn() == -1
    }

    /// True when no point is fixed. The degree 0 identity does not count.
    fn is_derangement(&self) -> bool;

    fn cycle_notation(&self) -> String {
        self.cycle_decomposition().to_string()
    }
}
