use std::collections::BTreeSet;
use std::fmt;
use std::ops::Mul;

use itertools::Itertools;
use num::integer::lcm;

use crate::cycle::Cycle;
use crate::describe::{list, pair_list, two_column_table};
use crate::element::{Composable, HasIdentity, SymmetricGroupElement};
use crate::error::{ConstructionError, DegreeMismatch, DomainError};
use crate::permutation::Permutation;

/// A permutation of {1, ..., n} written as its disjoint cycles, every point
/// appearing in exactly one cycle and fixed points kept as singletons.
///
/// Cycles are stored sorted by minimal element, which together with the
/// canonical rotation inside each [`Cycle`] makes the derived equality and
/// hashing agree with equality of the underlying maps.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CycleDecomposition {
    cycles: Vec<Cycle>,
}

impl TryFrom<Vec<Cycle>> for CycleDecomposition {
    type Error = ConstructionError;

    fn try_from(cycles: Vec<Cycle>) -> Result<Self, ConstructionError> {
        for (left, right) in cycles.iter().tuple_combinations() {
            if let Some(shared) = left.elements().iter().find(|point| right.contains(**point)) {
                return Err(ConstructionError::OverlappingCycles(*shared));
            }
        }
        let covered: BTreeSet<usize> = cycles
            .iter()
            .flat_map(|cycle| cycle.elements().iter().copied())
            .collect();
        for point in 1..=covered.len() {
            if !covered.contains(&point) {
                return Err(ConstructionError::MissingPoint(point));
            }
        }
        let sorted = cycles
            .into_iter()
            .sorted_by_key(|cycle| *cycle.elements().first())
            .collect();
        Ok(Self { cycles: sorted })
    }
}

impl HasIdentity for CycleDecomposition {
    fn identity(degree: usize) -> Self {
        Self {
            cycles: (1..=degree).map(|point| Cycle::trusted(vec![point])).collect(),
        }
    }
}

impl CycleDecomposition {
    /// The caller promises disjoint covering cycles already sorted by
    /// minimal element; the decomposition walk emits them that way.
    pub(crate) fn trusted(cycles: Vec<Cycle>) -> Self {
        debug_assert!(cycles
            .iter()
            .tuple_windows()
            .all(|(left, right)| left.elements().first() < right.elements().first()));
        Self { cycles }
    }

    pub fn cycles(&self) -> &[Cycle] {
        &self.cycles
    }

    pub fn degree(&self) -> usize {
        self.cycles.iter().map(Cycle::len).sum()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Cycle> {
        self.cycles.iter()
    }

    /// The same mapping flattened back to an image sequence.
    pub fn to_permutation(&self) -> Permutation {
        let mut image = vec![0; self.degree()];
        for cycle in &self.cycles {
            for point in cycle.elements() {
                image[point - 1] = cycle.apply(*point);
            }
        }
        Permutation::trusted(image)
    }

    pub fn apply(&self, point: usize) -> Result<usize, DomainError> {
        if point < 1 || point > self.degree() {
            return Err(DomainError {
                point,
                degree: self.degree(),
            });
        }
        Ok(self
            .cycles
            .iter()
            .find(|cycle| cycle.contains(point))
            .map(|cycle| cycle.apply(point))
            .unwrap_or(point))
    }

    pub fn orbit(&self, point: usize) -> Result<Vec<usize>, DomainError> {
        self.to_permutation().orbit(point)
    }

    pub fn inverse(&self) -> Self {
        self.to_permutation().inverse().cycle_decomposition()
    }

    pub fn power(&self, exponent: i64) -> Self {
        self.to_permutation().power(exponent).cycle_decomposition()
    }

    /// Cycle lengths ascending, singletons included.
    pub fn cycle_type(&self) -> Vec<usize> {
        self.cycles.iter().map(Cycle::len).sorted().collect()
    }

    pub fn is_regular(&self) -> bool {
        self.cycles.iter().map(Cycle::len).all_equal()
    }

    pub fn is_conjugate(&self, other: &Self) -> Result<bool, DegreeMismatch> {
        if self.degree() != other.degree() {
            return Err(DegreeMismatch {
                left: self.degree(),
                right: other.degree(),
            });
        }
        Ok(self.cycle_type() == other.cycle_type())
    }

    pub fn lehmer_code(&self) -> Vec<usize> {
        self.to_permutation().lehmer_code()
    }

    pub fn lexicographic_rank(&self) -> Result<u128, ConstructionError> {
        self.to_permutation().lexicographic_rank()
    }

    pub fn describe(&self) -> String {
        let as_permutation = self.to_permutation();
        let parity = if self.is_even() {
            "+1 (even)"
        } else {
            "-1 (odd)"
        };
        two_column_table(
            &self.to_string(),
            &[
                ("order", self.order().to_string()),
                ("degree", self.degree().to_string()),
                ("is derangement", self.is_derangement().to_string()),
                ("inverse", self.inverse().to_string()),
                ("parity", parity.to_string()),
                ("cycle notation", self.to_string()),
                (
                    "cycle type",
                    format!("({})", self.cycle_type().iter().join(", ")),
                ),
                ("inversions", pair_list(&as_permutation.inversions())),
                ("ascents", list(&as_permutation.ascents())),
                ("descents", list(&as_permutation.descents())),
                ("exceedances", list(&as_permutation.exceedances(false))),
                ("records", list(&as_permutation.records())),
            ],
        )
    }
}

impl Composable for CycleDecomposition {
    /// Composition goes through the flat image form; the result is
    /// re-decomposed so its cycles are again disjoint and cover 1..=n.
    fn compose(&self, other: &Self) -> Result<Self, DegreeMismatch> {
        let product = self.to_permutation().compose(&other.to_permutation())?;
        Ok(product.cycle_decomposition())
    }

    fn degree(&self) -> usize {
        self.degree()
    }
}

/// Operator form of composition. Panics on a degree mismatch; use
/// [`Composable::compose`] for the checked path.
impl Mul for CycleDecomposition {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        assert!(
            self.degree() == rhs.degree(),
            "cannot multiply cycle decompositions of degrees {} and {}",
            self.degree(),
            rhs.degree()
        );
        (self.to_permutation() * rhs.to_permutation()).cycle_decomposition()
    }
}

impl SymmetricGroupElement for CycleDecomposition {
    fn order(&self) -> usize {
        self.cycles.iter().map(Cycle::len).fold(1, lcm)
    }

    fn sgn(&self) -> i32 {
        if (self.degree() - self.cycles.len()) % 2 == 0 {
            1
        } else {
            -1
        }
    }

    fn support(&self) -> BTreeSet<usize> {
        self.cycles
            .iter()
            .flat_map(|cycle| cycle.support())
            .collect()
    }

    fn cycle_decomposition(&self) -> CycleDecomposition {
        self.clone()
    }

    fn is_derangement(&self) -> bool {
        !self.cycles.is_empty() && self.cycles.iter().all(|cycle| cycle.len() > 1)
    }
}

impl<'a> IntoIterator for &'a CycleDecomposition {
    type Item = &'a Cycle;
    type IntoIter = std::slice::Iter<'a, Cycle>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for CycleDecomposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for cycle in &self.cycles {
            fmt::Display::fmt(cycle, f)?;
        }
        if self.cycles.is_empty() {
            f.write_str("()")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn cycle(elements: &[usize]) -> Cycle {
        Cycle::try_from(elements.to_vec()).unwrap()
    }

    fn decomposition(cycles: &[&[usize]]) -> CycleDecomposition {
        CycleDecomposition::try_from(
            cycles.iter().map(|c| cycle(c)).collect::<Vec<_>>(),
        )
        .unwrap()
    }

    #[test]
    fn validation() {
        assert_eq!(
            CycleDecomposition::try_from(vec![cycle(&[1, 2]), cycle(&[2, 3])]),
            Err(ConstructionError::OverlappingCycles(2))
        );
        assert_eq!(
            CycleDecomposition::try_from(vec![cycle(&[1, 3])]),
            Err(ConstructionError::MissingPoint(2))
        );
        assert!(CycleDecomposition::try_from(vec![]).is_ok());
    }

    #[test]
    fn cycles_sort_by_minimal_element() {
        let d = CycleDecomposition::try_from(vec![cycle(&[4, 3]), cycle(&[1, 2])]).unwrap();
        assert_eq!(d.to_string(), "(1 2)(3 4)");
        assert_eq!(d, decomposition(&[&[1, 2], &[3, 4]]));
    }

    #[test]
    fn mapping_and_flattening() {
        let d = decomposition(&[&[1, 3, 4], &[2]]);
        assert_eq!(d.degree(), 4);
        assert_eq!(
            d.to_permutation(),
            Permutation::try_from(vec![3, 2, 4, 1]).unwrap()
        );
        assert_eq!(d.apply(1), Ok(3));
        assert_eq!(d.apply(2), Ok(2));
        assert!(d.apply(5).is_err());
        assert_eq!(d.orbit(1).unwrap(), vec![1, 3, 4]);
    }

    #[test]
    fn algebra_matches_the_flat_form() {
        let d = decomposition(&[&[1, 3, 4], &[2]]);
        assert_eq!(d.order(), 3);
        assert_eq!(d.sgn(), 1);
        assert_eq!(d.cycle_type(), vec![1, 3]);
        assert_eq!(d.support(), BTreeSet::from([1, 3, 4]));
        assert!(!d.is_derangement());
        assert!(decomposition(&[&[1, 2], &[3, 4]]).is_derangement());
        assert!(decomposition(&[&[1, 2], &[3, 4]]).is_regular());
        assert!(!d.is_regular());
        assert_eq!(
            d.inverse().to_permutation(),
            Permutation::try_from(vec![3, 2, 4, 1]).unwrap().inverse()
        );
        assert_eq!(d.power(3), CycleDecomposition::identity(4));
    }

    #[test]
    fn composition_recomputes_disjoint_cycles() {
        let left = decomposition(&[&[1, 2], &[3]]);
        let right = decomposition(&[&[1, 3], &[2]]);
        let product = left.compose(&right).unwrap();
        // (1 2)(1 3) sends 1->3, 3->2, 2->1
        assert_eq!(product, decomposition(&[&[1, 3, 2]]));
        assert!(left
            .compose(&decomposition(&[&[1, 2]]))
            .is_err());
    }

    #[test]
    fn ranks_delegate_to_the_flat_form() {
        let d = decomposition(&[&[1, 3, 2]]);
        let p = d.to_permutation();
        assert_eq!(d.lehmer_code(), p.lehmer_code());
        assert_eq!(d.lexicographic_rank(), p.lexicographic_rank());
    }

    #[test]
    fn describe_uses_the_cycle_form_as_title() {
        let rendered = decomposition(&[&[1, 3, 4], &[2]]).describe();
        assert!(rendered.contains("(1 3 4)(2)"));
        assert!(rendered.contains("order"));
    }
}
