use std::collections::BTreeSet;
use std::fmt;
use std::ops::Mul;

use itertools::Itertools;
use num::integer::lcm;

use crate::cycle::Cycle;
use crate::cycle_decomposition::CycleDecomposition;
use crate::describe::{list, pair_list, two_column_table};
use crate::element::{Composable, HasIdentity, SymmetricGroupElement};
use crate::error::{ConstructionError, DegreeMismatch, DomainError};

/// An element of the symmetric group on {1, ..., n}, stored as its image
/// sequence: `image[i]` is where the point `i + 1` goes.
///
/// The image is validated at construction and never mutated afterwards; the
/// algebraic operations all hand back fresh instances.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Permutation {
    image: Vec<usize>,
}

impl TryFrom<Vec<usize>> for Permutation {
    type Error = ConstructionError;

    fn try_from(image: Vec<usize>) -> Result<Self, ConstructionError> {
        let degree = image.len();
        let mut seen = vec![false; degree];
        for &value in &image {
            if value < 1 {
                return Err(ConstructionError::ZeroPoint);
            }
            if value > degree {
                return Err(ConstructionError::ImageOutOfRange { value, degree });
            }
            if seen[value - 1] {
                return Err(ConstructionError::RepeatedImage(value));
            }
            seen[value - 1] = true;
        }
        Ok(Self { image })
    }
}

impl HasIdentity for Permutation {
    fn identity(degree: usize) -> Self {
        Self {
            image: (1..=degree).collect(),
        }
    }
}

impl Permutation {
    /// Build from an image known to be a permutation of 1..=n, skipping
    /// validation. The generator engines produce their images by swaps of a
    /// valid one.
    pub(crate) fn trusted(image: Vec<usize>) -> Self {
        debug_assert!(Self::try_from(image.clone()).is_ok());
        Self { image }
    }

    pub fn degree(&self) -> usize {
        self.image.len()
    }

    pub fn image(&self) -> &[usize] {
        &self.image
    }

    /// Where the permutation sends a point of {1, ..., n}.
    pub fn apply(&self, point: usize) -> Result<usize, DomainError> {
        if point < 1 || point > self.degree() {
            return Err(DomainError {
                point,
                degree: self.degree(),
            });
        }
        Ok(self.image[point - 1])
    }

    /// Act on a sequence by relocating the entry at position j to position
    /// `image[j]`. Entries past the degree stay put, so the sequence may be
    /// longer than the degree but not shorter.
    pub fn act_on_slice<T: Clone>(&self, items: &[T]) -> Result<Vec<T>, DegreeMismatch> {
        if items.len() < self.degree() {
            return Err(DegreeMismatch {
                left: self.degree(),
                right: items.len(),
            });
        }
        let mut permuted = items.to_vec();
        for (position, item) in items.iter().take(self.degree()).enumerate() {
            permuted[self.image[position] - 1] = item.clone();
        }
        Ok(permuted)
    }

    pub fn act_on_str(&self, text: &str) -> Result<String, DegreeMismatch> {
        let permuted = self.act_on_slice(&text.chars().collect_vec())?;
        Ok(permuted.into_iter().collect())
    }

    fn compose_trusted(&self, other: &Self) -> Self {
        Self {
            image: other.image.iter().map(|&mid| self.image[mid - 1]).collect(),
        }
    }

    pub fn inverse(&self) -> Self {
        let mut image = vec![0; self.degree()];
        for (position, &value) in self.image.iter().enumerate() {
            image[value - 1] = position + 1;
        }
        Self { image }
    }

    /// Exponentiation by squaring; a negative exponent powers the inverse.
    pub fn power(&self, exponent: i64) -> Self {
        let mut base = if exponent < 0 {
            self.inverse()
        } else {
            self.clone()
        };
        let mut remaining = exponent.unsigned_abs();
        let mut result = Self::identity(self.degree());
        while remaining > 0 {
            if remaining & 1 == 1 {
                result = result.compose_trusted(&base);
            }
            base = base.compose_trusted(&base);
            remaining >>= 1;
        }
        result
    }

    /// Lengths of the disjoint cycles, ascending. Fixed points count as
    /// length 1.
    pub fn cycle_type(&self) -> Vec<usize> {
        self.cycle_decomposition().cycle_type()
    }

    pub fn is_regular(&self) -> bool {
        self.cycle_type().iter().all_equal()
    }

    /// Conjugate iff the cycle types agree.
    pub fn is_conjugate(&self, other: &Self) -> Result<bool, DegreeMismatch> {
        if self.degree() != other.degree() {
            return Err(DegreeMismatch {
                left: self.degree(),
                right: other.degree(),
            });
        }
        Ok(self.cycle_type() == other.cycle_type())
    }

    /// All pairs of positions (i, j), i < j, out of order in the image.
    /// 1-indexed.
    pub fn inversions(&self) -> Vec<(usize, usize)> {
        (1..=self.degree())
            .tuple_combinations()
            .filter(|&(i, j)| self.image[i - 1] > self.image[j - 1])
            .collect()
    }

    /// Positions i with `image[i] < image[i + 1]`, 1-indexed.
    pub fn ascents(&self) -> Vec<usize> {
        self.image
            .iter()
            .tuple_windows()
            .positions(|(left, right)| left < right)
            .map(|position| position + 1)
            .collect()
    }

    /// Positions i with `image[i] > image[i + 1]`, 1-indexed.
    pub fn descents(&self) -> Vec<usize> {
        self.image
            .iter()
            .tuple_windows()
            .positions(|(left, right)| left > right)
            .map(|position| position + 1)
            .collect()
    }

    /// Positions whose image exceeds them; `weakly` admits equality.
    pub fn exceedances(&self, weakly: bool) -> Vec<usize> {
        self.image
            .iter()
            .enumerate()
            .filter(|&(position, &value)| value > position + 1 || (weakly && value == position + 1))
            .map(|(position, _)| position + 1)
            .collect()
    }

    /// Left-to-right maxima of the image, as 1-indexed positions.
    pub fn records(&self) -> Vec<usize> {
        let mut best_so_far = 0;
        let mut records = Vec::new();
        for (position, &value) in self.image.iter().enumerate() {
            if value > best_so_far {
                best_so_far = value;
                records.push(position + 1);
            }
        }
        records
    }

    /// Entry i counts the values to the right of position i that are smaller
    /// than `image[i]`.
    pub fn lehmer_code(&self) -> Vec<usize> {
        (0..self.degree())
            .map(|position| {
                self.image[position + 1..]
                    .iter()
                    .filter(|&&value| value < self.image[position])
                    .count()
            })
            .collect()
    }

    /// 0-indexed rank among all same-degree permutations in dictionary order
    /// of the image, via factorial-base weighting of the Lehmer code.
    ///
    /// Ranks live in a `u128`, which holds every rank up to degree 34 and
    /// only the low ranks past that; a rank that does not fit is an error,
    /// never a wrapped value.
    pub fn lexicographic_rank(&self) -> Result<u128, ConstructionError> {
        let degree = self.degree();
        self.lehmer_code()
            .into_iter()
            .enumerate()
            .try_fold(0u128, |rank, (position, digit)| {
                if digit == 0 {
                    return Some(rank);
                }
                let weight = factorial(degree - 1 - position)?;
                rank.checked_add((digit as u128).checked_mul(weight)?)
            })
            .ok_or(ConstructionError::RankUnrepresentable { degree })
    }

    /// Unranking: the degree-n permutation at the given 0-indexed
    /// lexicographic rank. Inverse of [`Permutation::lexicographic_rank`].
    pub fn from_lexicographic_rank(rank: u128, degree: usize) -> Result<Self, ConstructionError> {
        if let Some(group_size) = factorial(degree) {
            if rank >= group_size {
                return Err(ConstructionError::RankOutOfRange { rank, degree });
            }
        }
        let mut unused: Vec<usize> = (1..=degree).collect();
        let mut remaining = rank;
        let mut image = Vec::with_capacity(degree);
        for position in 0..degree {
            // A weight past 128 bits exceeds any representable remainder,
            // so its factorial-base digit is 0.
            let digit = match factorial(degree - 1 - position) {
                Some(weight) => {
                    let digit = (remaining / weight) as usize;
                    remaining %= weight;
                    digit
                }
                None => 0,
            };
            image.push(unused.remove(digit));
        }
        Ok(Self { image })
    }

    /// The ordered sequence of points visited by iterated application,
    /// starting at `point` and stopping just before it comes back around.
    pub fn orbit(&self, point: usize) -> Result<Vec<usize>, DomainError> {
        let mut visited = vec![point];
        let mut current = self.apply(point)?;
        while current != point {
            visited.push(current);
            current = self.apply(current)?;
        }
        Ok(visited)
    }

    pub fn one_line_notation(&self) -> String {
        self.image.iter().join("")
    }

    /// The summary table the CLI prints.
    pub fn describe(&self) -> String {
        let title = format!("Permutation({})", self.image.iter().join(", "));
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
                ("inverse", self.inverse().to_string()),
                ("parity", parity.to_string()),
                ("cycle notation", self.cycle_notation()),
                (
                    "cycle type",
                    format!("({})", self.cycle_type().iter().join(", ")),
                ),
                ("inversions", pair_list(&self.inversions())),
                ("ascents", list(&self.ascents())),
                ("descents", list(&self.descents())),
                ("exceedances", list(&self.exceedances(false))),
                ("records", list(&self.records())),
            ],
        )
    }
}

impl Composable for Permutation {
    fn compose(&self, other: &Self) -> Result<Self, DegreeMismatch> {
        if self.degree() != other.degree() {
            return Err(DegreeMismatch {
                left: self.degree(),
                right: other.degree(),
            });
        }
        Ok(self.compose_trusted(other))
    }

    fn degree(&self) -> usize {
        self.degree()
    }
}

/// Operator form of composition. Panics on a degree mismatch; use
/// [`Composable::compose`] for the checked path.
impl Mul for Permutation {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        assert!(
            self.degree() == rhs.degree(),
            "cannot multiply permutations of degrees {} and {}",
            self.degree(),
            rhs.degree()
        );
        self.compose_trusted(&rhs)
    }
}

impl SymmetricGroupElement for Permutation {
    fn order(&self) -> usize {
        self.cycle_type().into_iter().fold(1, lcm)
    }

    fn sgn(&self) -> i32 {
        if (self.degree() - self.cycle_decomposition().cycles().len()) % 2 == 0 {
            1
        } else {
            -1
        }
    }

    fn support(&self) -> BTreeSet<usize> {
        self.image
            .iter()
            .enumerate()
            .filter(|&(position, &value)| value != position + 1)
            .map(|(position, _)| position + 1)
            .collect()
    }

    /// Walk the unvisited points in increasing order, following the image
    /// back around to the start. O(n), cycles come out sorted by their
    /// minimal element, fixed points included as singletons.
    fn cycle_decomposition(&self) -> CycleDecomposition {
        let mut visited = vec![false; self.degree()];
        let mut cycles = Vec::new();
        for start in 1..=self.degree() {
            if visited[start - 1] {
                continue;
            }
            let mut points = vec![start];
            visited[start - 1] = true;
            let mut current = self.image[start - 1];
            while current != start {
                visited[current - 1] = true;
                points.push(current);
                current = self.image[current - 1];
            }
            cycles.push(Cycle::trusted(points));
        }
        CycleDecomposition::trusted(cycles)
    }

    fn is_derangement(&self) -> bool {
        self.degree() != 0
            && self
                .image
                .iter()
                .enumerate()
                .all(|(position, &value)| value != position + 1)
    }
}

impl fmt::Display for Permutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", self.image.iter().join(", "))
    }
}

/// n! when it fits in 128 bits, None from 35! up.
pub(crate) fn factorial(n: usize) -> Option<u128> {
    (1..=n as u128).try_fold(1u128, u128::checked_mul)
}
