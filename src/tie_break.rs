//! Choosing among tied maxima.
//!
//! ID3 breaks ties uniformly at random when selecting an attribute,
//! a numeric threshold, a majority label, or the value that absorbs
//! missing entries. The source of that choice is pluggable so that
//! tests can use a seeded generator or a deterministic policy.

use rand::prelude::*;

use std::fmt;

use crate::constants::DEFAULT_SEED;


/// A source of choices among `n` tied candidates.
pub trait TieBreak {
    /// Returns an index in `0..n_tied`. `n_tied` is positive.
    fn choose(&mut self, n_tied: usize) -> usize;
}


/// Returns the candidate chosen by `tie`, or `None` if `candidates` is empty.
#[inline]
pub fn pick<'a, T, B>(tie: &mut B, candidates: &'a [T]) -> Option<&'a T>
    where B: TieBreak + ?Sized
{
    match candidates.len() {
        0 => None,
        1 => Some(&candidates[0]),
        n => candidates.get(tie.choose(n)),
    }
}


/// Uniformly random choice driven by a seeded `StdRng`.
pub struct RandomTie {
    rng: StdRng,
}


impl RandomTie {
    /// Construct a new instance with the given seed.
    #[inline]
    pub fn seed(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }


    /// Construct a new instance seeded by the operating system.
    #[inline]
    pub fn from_entropy() -> Self {
        Self { rng: StdRng::from_entropy() }
    }
}


impl TieBreak for RandomTie {
    #[inline]
    fn choose(&mut self, n_tied: usize) -> usize {
        self.rng.gen_range(0..n_tied)
    }
}


/// Always picks the first candidate.
/// Candidates are listed in first-seen order,
/// so this policy is fully deterministic.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstTie;


impl TieBreak for FirstTie {
    #[inline]
    fn choose(&mut self, _n_tied: usize) -> usize {
        0
    }
}


/// The tie breaking policy given to the builders.
/// Each call to `Id3::fit` instantiates a fresh [`TieBreak`]
/// from this policy, so fitting twice with the same seed
/// grows the same tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TieBreakPolicy {
    /// `RandomTie` seeded with the given value.
    Seeded(u64),
    /// `RandomTie` seeded by the operating system.
    Entropy,
    /// `FirstTie`.
    First,
}


impl Default for TieBreakPolicy {
    fn default() -> Self {
        Self::Seeded(DEFAULT_SEED)
    }
}


impl TieBreakPolicy {
    /// Instantiate the tie breaker.
    pub fn tie_breaker(&self) -> Box<dyn TieBreak + Send> {
        match self {
            Self::Seeded(seed) => Box::new(RandomTie::seed(*seed)),
            Self::Entropy => Box::new(RandomTie::from_entropy()),
            Self::First => Box::new(FirstTie),
        }
    }


    /// Returns the policy used for the `k`th fold of cross validation.
    /// Seeded policies get a distinct seed per fold.
    pub fn for_fold(&self, k: usize) -> Self {
        match self {
            Self::Seeded(seed) => Self::Seeded(seed.wrapping_add(k as u64)),
            other => *other,
        }
    }
}


impl fmt::Display for TieBreakPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Seeded(seed) => write!(f, "Random (seed: {seed})"),
            Self::Entropy => write!(f, "Random (OS entropy)"),
            Self::First => write!(f, "First candidate"),
        }
    }
}
