use std::collections::BTreeSet;
use std::fmt;

use itertools::Itertools;
use nonempty::NonEmpty;

use crate::cycle_decomposition::CycleDecomposition;
use crate::describe::two_column_table;
use crate::element::SymmetricGroupElement;
use crate::error::{ConstructionError, DomainError};
use crate::permutation::Permutation;

/// A single cyclic permutation: `(a_1 ... a_k)` sends each listed point to
/// the next and the last back to the first, fixing everything else.
///
/// The element tuple is stored in canonical rotation, minimal element first,
/// so that rotations of the same tuple compare and hash equal. Reflections
/// are distinct cycles.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Cycle {
    elements: NonEmpty<usize>,
}

impl TryFrom<Vec<usize>> for Cycle {
    type Error = ConstructionError;

    fn try_from(elements: Vec<usize>) -> Result<Self, ConstructionError> {
        let mut seen = BTreeSet::new();
        for &element in &elements {
            if element < 1 {
                return Err(ConstructionError::ZeroPoint);
            }
            if !seen.insert(element) {
                return Err(ConstructionError::RepeatedCycleElement(element));
            }
        }
        let elements = NonEmpty::from_vec(canonical_rotation(elements))
            .ok_or(ConstructionError::EmptyCycle)?;
        Ok(Self { elements })
    }
}

/// Rotate so the minimal element leads. No-op on an empty vector.
fn canonical_rotation(mut elements: Vec<usize>) -> Vec<usize> {
    if let Some(smallest) = elements.iter().position_min() {
        elements.rotate_left(smallest);
    }
    elements
}

impl Cycle {
    /// The caller promises distinct positive elements with the minimum
    /// first; the decomposition walk produces exactly that.
    pub(crate) fn trusted(elements: Vec<usize>) -> Self {
        debug_assert_eq!(elements.iter().position_min(), Some(0));
        Self {
            elements: NonEmpty::from_vec(elements).expect("a cycle walk visits at least one point"),
        }
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// Canonical element tuple, minimal element first.
    pub fn elements(&self) -> &NonEmpty<usize> {
        &self.elements
    }

    /// The degree of the smallest symmetric group containing the cycle.
    pub fn degree(&self) -> usize {
        *self.elements.maximum()
    }

    pub fn contains(&self, point: usize) -> bool {
        self.elements.contains(&point)
    }

    /// Points off the cycle are fixed, whatever their size; a cycle denotes
    /// a map on all of {1, 2, ...}.
    pub fn apply(&self, point: usize) -> usize {
        match self.elements.iter().position(|&element| element == point) {
            Some(position) => self.elements[(position + 1) % self.len()],
            None => point,
        }
    }

    pub fn orbit(&self, point: usize) -> Vec<usize> {
        if !self.contains(point) {
            return vec![point];
        }
        let mut visited = vec![point];
        let mut current = self.apply(point);
        while current != point {
            visited.push(current);
            current = self.apply(current);
        }
        visited
    }

    /// The same mapping as a permutation of the inferred degree, fixed
    /// points padded in.
    pub fn to_permutation(&self) -> Permutation {
        self.to_permutation_of_degree(self.degree())
            .expect("the inferred degree bounds every element")
    }

    /// The same mapping as a permutation of the supplied degree, which must
    /// be at least the largest element.
    pub fn to_permutation_of_degree(&self, degree: usize) -> Result<Permutation, DomainError> {
        if degree < self.degree() {
            return Err(DomainError {
                point: self.degree(),
                degree,
            });
        }
        let image = (1..=degree).map(|point| self.apply(point)).collect();
        Ok(Permutation::trusted(image))
    }

    pub fn describe(&self) -> String {
        let title = format!("Cycle({})", self.elements.iter().join(", "));
        let parity = if self.is_even() {
            "+1 (even)"
        } else {
            "-1 (odd)"
        };
        two_column_table(
            &title,
            &[
                ("order", self.order().to_string()),
                ("degree", self.degree().to_string()),
                ("is derangement", self.is_derangement().to_string()),
                ("parity", parity.to_string()),
                ("cycle notation", self.to_string()),
            ],
        )
    }
}

impl SymmetricGroupElement for Cycle {
    fn order(&self) -> usize {
        self.len()
    }

    fn sgn(&self) -> i32 {
        if self.len() % 2 == 1 {
            1
        } else {
            -1
        }
    }

    fn support(&self) -> BTreeSet<usize> {
        if self.len() == 1 {
            BTreeSet::new()
        } else {
            self.elements.iter().copied().collect()
        }
    }

    /// The single-cycle decomposition on the inferred degree, skipped points
    /// becoming singleton cycles.
    fn cycle_decomposition(&self) -> CycleDecomposition {
        let mut cycles: Vec<Cycle> = (1..self.degree())
            .filter(|point| !self.contains(*point))
            .map(|point| Cycle::trusted(vec![point]))
            .collect();
        cycles.push(self.clone());
        cycles.sort_by_key(|cycle| *cycle.elements.first());
        CycleDecomposition::trusted(cycles)
    }

    fn is_derangement(&self) -> bool {
        self.len() > 1
    }
}

impl fmt::Display for Cycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", self.elements.iter().join(" "))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn cycle(elements: &[usize]) -> Cycle {
        Cycle::try_from(elements.to_vec()).unwrap()
    }

    #[test]
    fn construction_and_canonical_rotation() {
        assert_eq!(Cycle::try_from(vec![]), Err(ConstructionError::EmptyCycle));
        assert_eq!(
            Cycle::try_from(vec![1, 0]),
            Err(ConstructionError::ZeroPoint)
        );
        assert_eq!(
            Cycle::try_from(vec![3, 1, 3]),
            Err(ConstructionError::RepeatedCycleElement(3))
        );
        // rotations coincide, reflections do not
        assert_eq!(cycle(&[3, 1, 2]), cycle(&[1, 2, 3]));
        assert_eq!(cycle(&[2, 3, 1]), cycle(&[1, 2, 3]));
        assert_ne!(cycle(&[1, 3, 2]), cycle(&[1, 2, 3]));
        assert_eq!(cycle(&[4, 2, 7]).elements().clone().into_iter().collect::<Vec<_>>(), vec![2, 7, 4]);
    }

    #[test]
    fn mapping() {
        let c = cycle(&[1, 3, 2]);
        assert_eq!(c.apply(1), 3);
        assert_eq!(c.apply(3), 2);
        assert_eq!(c.apply(2), 1);
        // off-cycle points are fixed
        assert_eq!(c.apply(7), 7);
        assert_eq!(c.orbit(1), vec![1, 3, 2]);
        assert_eq!(c.orbit(5), vec![5]);
    }

    #[test]
    fn group_facts() {
        assert_eq!(cycle(&[1, 2, 3]).order(), 3);
        assert_eq!(cycle(&[1, 2, 3]).sgn(), 1);
        assert_eq!(cycle(&[1, 2]).sgn(), -1);
        assert!(cycle(&[1, 2]).is_derangement());
        assert!(!cycle(&[4]).is_derangement());
        assert_eq!(cycle(&[4]).support(), BTreeSet::new());
        assert_eq!(cycle(&[2, 4]).support(), BTreeSet::from([2, 4]));
    }

    #[test]
    fn conversions() {
        assert_eq!(
            cycle(&[1, 2, 3]).to_permutation(),
            Permutation::try_from(vec![2, 3, 1]).unwrap()
        );
        // padding up to a larger degree
        assert_eq!(
            cycle(&[2, 4]).to_permutation_of_degree(5).unwrap(),
            Permutation::try_from(vec![1, 4, 3, 2, 5]).unwrap()
        );
        assert!(cycle(&[2, 4]).to_permutation_of_degree(3).is_err());
        assert_eq!(cycle(&[2, 4]).cycle_decomposition().to_string(), "(1)(2 4)(3)");
    }

    #[test]
    fn display() {
        assert_eq!(cycle(&[3, 1, 2]).to_string(), "(1 2 3)");
        assert_eq!(cycle(&[1, 3, 2]).to_string(), "(1 3 2)");
        assert!(cycle(&[1, 3, 2]).describe().contains("Cycle(1, 3, 2)"));
    }
}
