//! # Unique-Pair Sampler
//!
//! Draws distinct `(a, b)` pairs from two identifier spaces for junction
//! tables. Parent tables are generated first, so each side is either a dense
//! id range `[1, N]` or an externally supplied id population (movie ids).
//!
//! Sampling is uniform with rejection against a seen-set. The loop is bounded
//! by the Cartesian capacity `|A| × |B|` of the two spaces: once that many
//! draws have been attempted the sampler stops, even if fewer than `count`
//! rows were produced. A short result is not an error; callers inspect
//! [`Sampled::is_short`].
//!
//! When the request covers at least half the capacity, rejection sampling
//! would mostly draw duplicates, so the sampler enumerates every pair,
//! shuffles, and takes from the front instead. Both strategies give the same
//! guarantees.

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;

/// The valid primary-key values one side of a relationship may reference.
#[derive(Debug, Clone, Copy)]
pub enum IdSpace<'a> {
    /// Sequential ids `1..=n` of a table generated earlier in the run.
    Range(usize),
    /// An arbitrary set of ids. Must not contain duplicates.
    Population(&'a [i64]),
}

impl IdSpace<'_> {
    pub fn len(&self) -> usize {
        match self {
            IdSpace::Range(n) => *n,
            IdSpace::Population(ids) => ids.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Id at a zero-based position in the space.
    fn id_at(&self, index: usize) -> i64 {
        match self {
            IdSpace::Range(_) => index as i64 + 1,
            IdSpace::Population(ids) => ids[index],
        }
    }
}

/// Outcome of one sampling run.
///
/// `rows` may hold fewer than `requested` entries when the two identifier
/// spaces cannot supply enough distinct accepted pairs.
#[derive(Debug, Clone)]
pub struct Sampled<T> {
    pub rows: Vec<T>,
    pub requested: usize,
    /// Pair draws consumed, including duplicates and filtered pairs.
    pub attempts: u64,
    /// Number of distinct pairs the two spaces can form.
    pub capacity: u64,
}

impl<T> Sampled<T> {
    pub fn is_short(&self) -> bool {
        self.rows.len() < self.requested
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn into_rows(self) -> Vec<T> {
        self.rows
    }
}

type PairFilter<'a> = Box<dyn Fn(i64, i64) -> bool + 'a>;

/// Rejection-sampling engine over two identifier spaces.
pub struct PairSampler<'a> {
    left: IdSpace<'a>,
    right: IdSpace<'a>,
    filter: Option<PairFilter<'a>>,
}

impl<'a> PairSampler<'a> {
    pub fn new(left: IdSpace<'a>, right: IdSpace<'a>) -> Self {
        Self {
            left,
            right,
            filter: None,
        }
    }

    /// Discard pairs for which `accept` returns false. A discarded pair still
    /// consumes one attempt and is never drawn again.
    pub fn with_filter(mut self, accept: impl Fn(i64, i64) -> bool + 'a) -> Self {
        self.filter = Some(Box::new(accept));
        self
    }

    /// Discard `(x, x)` pairs, for relationships between rows of one table.
    pub fn reject_self_pairs(self) -> Self {
        self.with_filter(|a, b| a != b)
    }

    pub fn capacity(&self) -> u64 {
        (self.left.len() as u64).saturating_mul(self.right.len() as u64)
    }

    fn accepts(&self, a: i64, b: i64) -> bool {
        self.filter.as_ref().map_or(true, |f| f(a, b))
    }

    /// Draw up to `count` distinct accepted pairs, shaping each into a row.
    ///
    /// `shape` receives the random source so rows can carry their own random
    /// columns (timestamps, flags).
    pub fn sample<R, T, F>(&self, count: usize, rng: &mut R, shape: F) -> Sampled<T>
    where
        R: Rng,
        F: FnMut(&mut R, i64, i64) -> T,
    {
        let capacity = self.capacity();
        if count == 0 || self.left.is_empty() || self.right.is_empty() {
            return Sampled {
                rows: Vec::new(),
                requested: count,
                attempts: 0,
                capacity,
            };
        }

        if (count as u64).saturating_mul(2) >= capacity {
            tracing::debug!(
                "Pair request {} covers at least half of capacity {}; enumerating",
                count,
                capacity
            );
            self.sample_dense(count, rng, shape)
        } else {
            self.sample_sparse(count, rng, shape)
        }
    }

    fn sample_sparse<R, T, F>(&self, count: usize, rng: &mut R, mut shape: F) -> Sampled<T>
    where
        R: Rng,
        F: FnMut(&mut R, i64, i64) -> T,
    {
        let capacity = self.capacity();
        let mut seen: HashSet<(usize, usize)> = HashSet::with_capacity(count);
        let mut rows = Vec::with_capacity(count);
        let mut attempts = 0u64;

        while rows.len() < count && attempts < capacity {
            attempts += 1;
            let i = rng.random_range(0..self.left.len());
            let j = rng.random_range(0..self.right.len());
            if !seen.insert((i, j)) {
                continue;
            }
            let (a, b) = (self.left.id_at(i), self.right.id_at(j));
            if !self.accepts(a, b) {
                continue;
            }
            rows.push(shape(rng, a, b));
        }

        Sampled {
            rows,
            requested: count,
            attempts,
            capacity,
        }
    }

    fn sample_dense<R, T, F>(&self, count: usize, rng: &mut R, mut shape: F) -> Sampled<T>
    where
        R: Rng,
        F: FnMut(&mut R, i64, i64) -> T,
    {
        let capacity = self.capacity();
        let mut pairs: Vec<(usize, usize)> = (0..self.left.len())
            .flat_map(|i| (0..self.right.len()).map(move |j| (i, j)))
            .collect();
        pairs.shuffle(rng);

        let mut rows = Vec::with_capacity(count.min(pairs.len()));
        let mut attempts = 0u64;
        for (i, j) in pairs {
            if rows.len() == count {
                break;
            }
            attempts += 1;
            let (a, b) = (self.left.id_at(i), self.right.id_at(j));
            if !self.accepts(a, b) {
                continue;
            }
            rows.push(shape(rng, a, b));
        }

        Sampled {
            rows,
            requested: count,
            attempts,
            capacity,
        }
    }
}
