use std::{error, fmt};

/// Rejection of an invalid image sequence, cycle or cycle decomposition at
/// construction time. No object is ever built from data that fails these
/// checks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConstructionError {
    /// A point was 0. Permutations act on {1, ..., n}.
    ZeroPoint,
    /// An image value exceeds the degree, so the map cannot be onto.
    ImageOutOfRange { value: usize, degree: usize },
    /// An image value occurs twice, so the map cannot be injective.
    RepeatedImage(usize),
    /// A cycle must move at least one point.
    EmptyCycle,
    /// A cycle listed the same point twice.
    RepeatedCycleElement(usize),
    /// Two cycles of a decomposition share this point.
    OverlappingCycles(usize),
    /// A decomposition must cover {1, ..., n} with no gaps; this point is
    /// missing from every cycle.
    MissingPoint(usize),
    /// A lexicographic rank at or beyond degree! was requested.
    RankOutOfRange { rank: u128, degree: usize },
    /// The lexicographic rank of this element exceeds 128 bits. Ranks are
    /// exact up to degree 34; past that only the low ranks fit.
    RankUnrepresentable { degree: usize },
}

impl fmt::Display for ConstructionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroPoint => {
                write!(f, "expected all strictly positive points, but got 0")
            }
            Self::ImageOutOfRange { value, degree } => {
                write!(
                    f,
                    "the value {value} is not in the image of a degree {degree} permutation"
                )
            }
            Self::RepeatedImage(value) => {
                write!(f, "the value {value} has two or more preimages")
            }
            Self::EmptyCycle => write!(f, "a cycle needs at least one element"),
            Self::RepeatedCycleElement(value) => {
                write!(f, "the point {value} appears twice in the cycle")
            }
            Self::OverlappingCycles(value) => {
                write!(
                    f,
                    "the cycles are not disjoint, the point {value} appears in two of them"
                )
            }
            Self::MissingPoint(value) => {
                write!(
                    f,
                    "every point from 1 to the largest permuted point must appear in some cycle, \
                     but {value} does not"
                )
            }
            Self::RankOutOfRange { rank, degree } => {
                write!(
                    f,
                    "the rank {rank} is not below {degree}! so it names no degree {degree} permutation"
                )
            }
            Self::RankUnrepresentable { degree } => {
                write!(
                    f,
                    "the rank of this degree {degree} permutation does not fit in 128 bits"
                )
            }
        }
    }
}

impl error::Error for ConstructionError {}

/// A binary operation was attempted between elements of different symmetric
/// groups.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DegreeMismatch {
    pub left: usize,
    pub right: usize,
}

impl fmt::Display for DegreeMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "the degrees {} and {} do not match, the elements live in different symmetric groups",
            self.left, self.right
        )
    }
}

impl error::Error for DegreeMismatch {}

/// A point query outside the domain {1, ..., n}.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DomainError {
    pub point: usize,
    pub degree: usize,
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "the point {} is outside the domain of a degree {} element",
            self.point, self.degree
        )
    }
}

impl error::Error for DomainError {}

/// An algorithm name that no generator answers to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnsupportedAlgorithm(pub String);

impl fmt::Display for UnsupportedAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "the algorithm `{}` is not supported", self.0)
    }
}

impl error::Error for UnsupportedAlgorithm {}
