use std::fmt;
use std::str::FromStr;

use log::debug;
use rand::rngs::ThreadRng;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::UnsupportedAlgorithm;
use crate::permutation::Permutation;

/// How a uniform draw is produced. Both choices are exactly uniform over the
/// n! permutations; they differ only in how they consume randomness.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RandomAlgorithm {
    /// Shuffle a pool of 1..=n and read it off.
    Shuffle,
    /// The in-place Fisher-Yates walk from the top index down.
    FisherYates,
}

impl FromStr for RandomAlgorithm {
    type Err = UnsupportedAlgorithm;

    fn from_str(name: &str) -> Result<Self, UnsupportedAlgorithm> {
        match name {
            "random" => Ok(Self::Shuffle),
            "fisher-yates" => Ok(Self::FisherYates),
            other => Err(UnsupportedAlgorithm(other.to_string())),
        }
    }
}

impl fmt::Display for RandomAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Shuffle => "random",
            Self::FisherYates => "fisher-yates",
        })
    }
}

/// One permutation of the given degree, uniformly at random.
pub fn random_permutation(degree: usize) -> Permutation {
    fisher_yates(&mut rand::thread_rng(), degree)
}

/// An unbounded stream of independent uniform draws of the given degree.
/// Unlike the deterministic generators this samples with replacement and
/// never exhausts.
pub fn random_generator(
    algorithm: RandomAlgorithm,
    degree: usize,
) -> RandomPermutations<ThreadRng> {
    debug!("streaming uniform degree {degree} permutations with the {algorithm} algorithm");
    RandomPermutations::with_rng(algorithm, degree, rand::thread_rng())
}

pub struct RandomPermutations<R: Rng> {
    algorithm: RandomAlgorithm,
    degree: usize,
    rng: R,
}

impl<R: Rng> RandomPermutations<R> {
    /// Same stream, caller-supplied randomness. Seed it for reproducible
    /// draws.
    pub fn with_rng(algorithm: RandomAlgorithm, degree: usize, rng: R) -> Self {
        Self {
            algorithm,
            degree,
            rng,
        }
    }
}

impl<R: Rng> Iterator for RandomPermutations<R> {
    type Item = Permutation;

    fn next(&mut self) -> Option<Permutation> {
        Some(match self.algorithm {
            RandomAlgorithm::Shuffle => {
                let mut pool: Vec<usize> = (1..=self.degree).collect();
                pool.shuffle(&mut self.rng);
                Permutation::trusted(pool)
            }
            RandomAlgorithm::FisherYates => fisher_yates(&mut self.rng, self.degree),
        })
    }
}

fn fisher_yates<R: Rng>(rng: &mut R, degree: usize) -> Permutation {
    let mut image: Vec<usize> = (1..=degree).collect();
    for top in (1..degree).rev() {
        let swap_with = rng.gen_range(0..=top);
        image.swap(top, swap_with);
    }
    Permutation::trusted(image)
}

#[cfg(test)]
mod test {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn algorithm_names() {
        assert_eq!("random".parse(), Ok(RandomAlgorithm::Shuffle));
        assert_eq!("fisher-yates".parse(), Ok(RandomAlgorithm::FisherYates));
        assert!("riffle".parse::<RandomAlgorithm>().is_err());
    }

    #[test]
    fn draws_are_valid_permutations_of_the_degree() {
        let rng = StdRng::seed_from_u64(7);
        for p in RandomPermutations::with_rng(RandomAlgorithm::FisherYates, 9, rng).take(50) {
            assert_eq!(p.degree(), 9);
            let mut sorted = p.image().to_vec();
            sorted.sort_unstable();
            assert_eq!(sorted, (1..=9).collect::<Vec<_>>());
        }
    }

    #[test]
    fn seeded_streams_repeat() {
        let draw = |seed| {
            RandomPermutations::with_rng(
                RandomAlgorithm::Shuffle,
                6,
                StdRng::seed_from_u64(seed),
            )
            .take(20)
            .collect::<Vec<_>>()
        };
        assert_eq!(draw(3), draw(3));
        assert_ne!(draw(3), draw(4));
    }

    #[test]
    fn trivial_degrees() {
        assert_eq!(random_permutation(0).degree(), 0);
        assert_eq!(random_permutation(1).image(), &[1]);
    }

    #[test]
    fn draws_are_roughly_uniform() {
        // 6000 draws over the 6 permutations of degree 3; expectation 1000
        // per class, standard deviation just under 29, so 850..1150 is a
        // generous 5 sigma corridor.
        for algorithm in [RandomAlgorithm::Shuffle, RandomAlgorithm::FisherYates] {
            let rng = StdRng::seed_from_u64(42);
            let mut counts = [0usize; 6];
            for p in RandomPermutations::with_rng(algorithm, 3, rng).take(6000) {
                counts[p.lexicographic_rank().unwrap() as usize] += 1;
            }
            for (rank, &count) in counts.iter().enumerate() {
                assert!(
                    (850..=1150).contains(&count),
                    "{algorithm} drew rank {rank} {count} times"
                );
            }
        }
    }
}
