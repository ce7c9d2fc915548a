use std::fmt;
use std::str::FromStr;

use log::debug;

use crate::error::UnsupportedAlgorithm;
use crate::permutation::Permutation;

/// The deterministic enumeration algorithms. Each visits every permutation
/// of the configured degree exactly once, in its own order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Algorithm {
    Lexicographic,
    Heap,
    SteinhausJohnsonTrotter,
    Zaks,
}

impl FromStr for Algorithm {
    type Err = UnsupportedAlgorithm;

    fn from_str(name: &str) -> Result<Self, UnsupportedAlgorithm> {
        match name {
            "lexicographic" => Ok(Self::Lexicographic),
            "heap" => Ok(Self::Heap),
            "steinhaus-johnson-trotter" => Ok(Self::SteinhausJohnsonTrotter),
            "zaks" => Ok(Self::Zaks),
            other => Err(UnsupportedAlgorithm(other.to_string())),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Lexicographic => "lexicographic",
            Self::Heap => "heap",
            Self::SteinhausJohnsonTrotter => "steinhaus-johnson-trotter",
            Self::Zaks => "zaks",
        })
    }
}

/// All `degree!` permutations of the given degree, lazily, in the order the
/// algorithm defines. The sequence is one-shot: once drained it stays
/// exhausted and a fresh one must be built to iterate again.
///
/// The cost of draining is proportional to `degree!`; bounding that is the
/// caller's business. [`Algorithm::Zaks`] additionally plans its whole
/// visiting order up front, so it holds all `degree!` images in memory from
/// construction; the other three step one image at a time.
pub fn generate(algorithm: Algorithm, degree: usize) -> PermutationGenerator {
    debug!("enumerating all permutations of degree {degree} with the {algorithm} algorithm");
    let state = match algorithm {
        Algorithm::Lexicographic => State::Lexicographic {
            next_image: Some((1..=degree).collect()),
        },
        Algorithm::Heap => State::Heap {
            image: (1..=degree).collect(),
            counters: vec![0; degree],
            level: 1,
            started: false,
        },
        Algorithm::SteinhausJohnsonTrotter => State::SteinhausJohnsonTrotter {
            image: (1..=degree).collect(),
            directions: vec![Direction::Left; degree],
            started: false,
        },
        Algorithm::Zaks => State::Zaks {
            planned: zaks_order(&(1..=degree).collect::<Vec<_>>()).into_iter(),
        },
    };
    PermutationGenerator { state }
}

/// As [`generate`], keyed by algorithm name.
pub fn generate_named(
    algorithm: &str,
    degree: usize,
) -> Result<PermutationGenerator, UnsupportedAlgorithm> {
    Ok(generate(algorithm.parse()?, degree))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Direction {
    Left,
    Right,
}

impl Direction {
    fn flip(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

enum State {
    Lexicographic {
        next_image: Option<Vec<usize>>,
    },
    Heap {
        image: Vec<usize>,
        counters: Vec<usize>,
        level: usize,
        started: bool,
    },
    SteinhausJohnsonTrotter {
        image: Vec<usize>,
        directions: Vec<Direction>,
        started: bool,
    },
    Zaks {
        planned: std::vec::IntoIter<Vec<usize>>,
    },
}

pub struct PermutationGenerator {
    state: State,
}

impl Iterator for PermutationGenerator {
    type Item = Permutation;

    fn next(&mut self) -> Option<Permutation> {
        match &mut self.state {
            State::Lexicographic { next_image } => {
                let image = next_image.take()?;
                *next_image = lexicographic_successor(&image);
                Some(Permutation::trusted(image))
            }
            State::Heap {
                image,
                counters,
                level,
                started,
            } => {
                if !*started {
                    *started = true;
                    return Some(Permutation::trusted(image.clone()));
                }
                // Iterative form of the recursion: counters[k] is how far the
                // loop at subarray length k + 1 has come.
                while *level < image.len() {
                    if counters[*level] < *level {
                        if *level % 2 == 0 {
                            image.swap(0, *level);
                        } else {
                            image.swap(counters[*level], *level);
                        }
                        counters[*level] += 1;
                        *level = 1;
                        return Some(Permutation::trusted(image.clone()));
                    }
                    counters[*level] = 0;
                    *level += 1;
                }
                None
            }
            State::SteinhausJohnsonTrotter {
                image,
                directions,
                started,
            } => {
                if !*started {
                    *started = true;
                    return Some(Permutation::trusted(image.clone()));
                }
                let mobile = largest_mobile(image, directions)?;
                let neighbour = match directions[mobile] {
                    Direction::Left => mobile - 1,
                    Direction::Right => mobile + 1,
                };
                image.swap(mobile, neighbour);
                directions.swap(mobile, neighbour);
                // Everything larger than the moved value turns around
                let moved = image[neighbour];
                for (position, &value) in image.iter().enumerate() {
                    if value > moved {
                        directions[position] = directions[position].flip();
                    }
                }
                Some(Permutation::trusted(image.clone()))
            }
            State::Zaks { planned } => planned.next().map(Permutation::trusted),
        }
    }
}

/// The image right after this one in dictionary order, or None at the final
/// descending image. Standard next-permutation step: last ascent, smallest
/// larger value to its right, swap, reverse the suffix.
fn lexicographic_successor(image: &[usize]) -> Option<Vec<usize>> {
    let mut successor = image.to_vec();
    let pivot = successor.windows(2).rposition(|pair| pair[0] < pair[1])?;
    let swap_with = successor.iter().rposition(|&value| value > successor[pivot])?;
    successor.swap(pivot, swap_with);
    successor[pivot + 1..].reverse();
    Some(successor)
}

/// The position of the largest value that can move one step in its current
/// direction, i.e. whose neighbour on that side is smaller.
fn largest_mobile(image: &[usize], directions: &[Direction]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (position, &value) in image.iter().enumerate() {
        let neighbour = match directions[position] {
            Direction::Left if position > 0 => position - 1,
            Direction::Right if position + 1 < image.len() => position + 1,
            _ => continue,
        };
        if value > image[neighbour] && best.map_or(true, |b| value > image[b]) {
            best = Some(position);
        }
    }
    best
}

/// The visiting order of Zaks' construction: fixed orders up to three
/// elements, then the last element threaded through every position of each
/// shorter arrangement.
fn zaks_order(elements: &[usize]) -> Vec<Vec<usize>> {
    match elements {
        [] => vec![vec![]],
        &[a] => vec![vec![a]],
        &[a, b] => vec![vec![a, b], vec![b, a]],
        &[a, b, c] => vec![
            vec![a, b, c],
            vec![b, a, c],
            vec![c, a, b],
            vec![a, c, b],
            vec![b, c, a],
            vec![c, b, a],
        ],
        [head @ .., last] => {
            let mut planned = Vec::new();
            for shorter in zaks_order(head) {
                for insert_at in 0..=shorter.len() {
                    let mut with_last = Vec::with_capacity(shorter.len() + 1);
                    with_last.extend_from_slice(&shorter[..insert_at]);
                    with_last.push(*last);
                    with_last.extend_from_slice(&shorter[insert_at..]);
                    planned.push(with_last);
                }
            }
            planned
        }
    }
}

#[cfg(test)]
mod test {
    use std::collections::BTreeSet;

    use super::*;

    fn images(algorithm: Algorithm, degree: usize) -> Vec<Vec<usize>> {
        generate(algorithm, degree)
            .map(|p| p.image().to_vec())
            .collect()
    }

    fn adjacent_transposition_apart(before: &[usize], after: &[usize]) -> bool {
        let differing: Vec<usize> = (0..before.len())
            .filter(|&i| before[i] != after[i])
            .collect();
        matches!(differing.as_slice(),
            [i, j] if j == &(i + 1) && before[*i] == after[*j] && before[*j] == after[*i])
    }

    #[test]
    fn algorithm_names() {
        assert_eq!("lexicographic".parse(), Ok(Algorithm::Lexicographic));
        assert_eq!("heap".parse(), Ok(Algorithm::Heap));
        assert_eq!(
            "steinhaus-johnson-trotter".parse(),
            Ok(Algorithm::SteinhausJohnsonTrotter)
        );
        assert_eq!("zaks".parse(), Ok(Algorithm::Zaks));
        assert_eq!(
            "bogo".parse::<Algorithm>(),
            Err(UnsupportedAlgorithm("bogo".to_string()))
        );
    }

    #[test]
    fn lexicographic_degree_three_exactly() {
        assert_eq!(
            images(Algorithm::Lexicographic, 3),
            vec![
                vec![1, 2, 3],
                vec![1, 3, 2],
                vec![2, 1, 3],
                vec![2, 3, 1],
                vec![3, 1, 2],
                vec![3, 2, 1],
            ]
        );
    }

    #[test]
    fn lexicographic_is_sorted_from_identity_to_reversal() {
        let all = images(Algorithm::Lexicographic, 5);
        assert_eq!(all.len(), 120);
        assert_eq!(all[0], vec![1, 2, 3, 4, 5]);
        assert_eq!(all[119], vec![5, 4, 3, 2, 1]);
        assert!(all.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn heap_degree_three_visits_in_the_recursive_order() {
        assert_eq!(
            images(Algorithm::Heap, 3),
            vec![
                vec![1, 2, 3],
                vec![2, 1, 3],
                vec![3, 1, 2],
                vec![1, 3, 2],
                vec![2, 3, 1],
                vec![3, 2, 1],
            ]
        );
    }

    #[test]
    fn heap_consecutive_outputs_differ_by_one_transposition() {
        let all = images(Algorithm::Heap, 5);
        for pair in all.windows(2) {
            let differing = (0..5).filter(|&i| pair[0][i] != pair[1][i]).count();
            assert_eq!(differing, 2, "{:?} -> {:?}", pair[0], pair[1]);
        }
    }

    #[test]
    fn steinhaus_johnson_trotter_degree_three_exactly() {
        assert_eq!(
            images(Algorithm::SteinhausJohnsonTrotter, 3),
            vec![
                vec![1, 2, 3],
                vec![1, 3, 2],
                vec![3, 1, 2],
                vec![3, 2, 1],
                vec![2, 3, 1],
                vec![2, 1, 3],
            ]
        );
    }

    #[test]
    fn steinhaus_johnson_trotter_moves_by_adjacent_transpositions() {
        for degree in 1..=5 {
            let all = images(Algorithm::SteinhausJohnsonTrotter, degree);
            for pair in all.windows(2) {
                assert!(
                    adjacent_transposition_apart(&pair[0], &pair[1]),
                    "{:?} -> {:?}",
                    pair[0],
                    pair[1]
                );
            }
        }
    }

    #[test]
    fn zaks_degree_three_uses_the_fixed_order() {
        assert_eq!(
            images(Algorithm::Zaks, 3),
            vec![
                vec![1, 2, 3],
                vec![2, 1, 3],
                vec![3, 1, 2],
                vec![1, 3, 2],
                vec![2, 3, 1],
                vec![3, 2, 1],
            ]
        );
    }

    #[test]
    fn zaks_threads_the_largest_element_through() {
        let all = images(Algorithm::Zaks, 4);
        assert_eq!(all.len(), 24);
        assert_eq!(all[0], vec![4, 1, 2, 3]);
        assert_eq!(all[1], vec![1, 4, 2, 3]);
        assert_eq!(all[3], vec![1, 2, 3, 4]);
    }

    #[test]
    fn every_algorithm_visits_the_whole_group_once() {
        let factorials = [1usize, 1, 2, 6, 24, 120];
        for algorithm in [
            Algorithm::Lexicographic,
            Algorithm::Heap,
            Algorithm::SteinhausJohnsonTrotter,
            Algorithm::Zaks,
        ] {
            for degree in 0..=5 {
                let all = images(algorithm, degree);
                let distinct: BTreeSet<&Vec<usize>> = all.iter().collect();
                assert_eq!(all.len(), factorials[degree], "{algorithm} at degree {degree}");
                assert_eq!(distinct.len(), all.len(), "{algorithm} repeats at degree {degree}");
            }
        }
    }

    #[test]
    fn trivial_degrees_yield_one_permutation() {
        for algorithm in [
            Algorithm::Lexicographic,
            Algorithm::Heap,
            Algorithm::SteinhausJohnsonTrotter,
            Algorithm::Zaks,
        ] {
            assert_eq!(images(algorithm, 0).len(), 1);
            assert_eq!(images(algorithm, 1), vec![vec![1]]);
        }
    }

    #[test]
    fn exhausted_generators_stay_exhausted() {
        let mut generator = generate(Algorithm::Lexicographic, 2);
        assert!(generator.next().is_some());
        assert!(generator.next().is_some());
        assert!(generator.next().is_none());
        assert!(generator.next().is_none());

        let mut generator = generate(Algorithm::Heap, 2);
        assert_eq!(generator.by_ref().count(), 2);
        assert!(generator.next().is_none());
    }

    #[test]
    fn named_lookup() {
        assert_eq!(generate_named("heap", 3).map(|g| g.count()), Ok(6));
        assert_eq!(
            generate_named("bubble", 3).map(|g| g.count()),
            Err(UnsupportedAlgorithm("bubble".to_string()))
        );
    }
}
