//! Persistent per-pair state.
//!
//! Shapes tend to stay separated along the same axis from one frame to the next. A [`PairRecord`]
//! remembers the last separating axis found for one pair of shapes so that the next query can test
//! it before any other candidate.

use std::hash::Hash;

use glam::Vec2;
use hashbrown::HashMap;

use crate::{
    shape::Shape,
    solver::{self, SatError},
    Transform2,
};

/// The cached state of one pair of shapes.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct PairRecord {
    separating_axis: Vec2,
}

impl PairRecord {
    pub fn new() -> PairRecord {
        PairRecord::default()
    }

    /// The axis which separated the pair in the most recent query, if any.
    #[inline]
    pub fn separating_axis(&self) -> Option<Vec2> {
        (self.separating_axis != Vec2::ZERO).then_some(self.separating_axis)
    }

    /// Forgets the cached axis.
    #[inline]
    pub fn reset(&mut self) {
        self.separating_axis = Vec2::ZERO;
    }

    /// Runs [`solver::solve`] with this record's separating axis cache.
    pub fn solve<'a>(
        &'a mut self,
        shape_a: &Shape,
        transform_a: &Transform2,
        shape_b: &Shape,
        transform_b: &Transform2,
        callback: Option<&'a mut dyn FnMut(Vec2, Vec2)>,
        swap: bool,
    ) -> Result<bool, SatError> {
        solver::solve(
            shape_a,
            transform_a,
            shape_b,
            transform_b,
            callback,
            swap,
            Some(&mut self.separating_axis),
        )
    }

    /// Tests the pair for overlap without generating contacts.
    ///
    /// The cache is updated when a separating axis is found, but is not cleared on collision.
    pub fn collide(
        &mut self,
        shape_a: &Shape,
        transform_a: &Transform2,
        shape_b: &Shape,
        transform_b: &Transform2,
    ) -> Result<bool, SatError> {
        self.solve(shape_a, transform_a, shape_b, transform_b, None, false)
    }
}

/// A set of [`PairRecord`]s keyed by unordered pairs of shape identifiers.
///
/// `(a, b)` and `(b, a)` refer to the same record.
#[derive(Clone, Debug)]
pub struct PairTable<K> {
    records: HashMap<(K, K), PairRecord>,
}

impl<K> Default for PairTable<K> {
    fn default() -> Self {
        PairTable {
            records: HashMap::default(),
        }
    }
}

impl<K> PairTable<K>
where
    K: Copy + Eq + Ord + Hash,
{
    pub fn new() -> PairTable<K> {
        PairTable::default()
    }

    #[inline]
    fn key(a: K, b: K) -> (K, K) {
        if a <= b {
            (a, b)
        } else {
            (b, a)
        }
    }

    pub fn get(&self, a: K, b: K) -> Option<&PairRecord> {
        self.records.get(&Self::key(a, b))
    }

    /// Returns the record for the pair, inserting an empty one if none exists.
    pub fn get_or_insert(&mut self, a: K, b: K) -> &mut PairRecord {
        self.records.entry(Self::key(a, b)).or_default()
    }

    pub fn remove(&mut self, a: K, b: K) -> Option<PairRecord> {
        self.records.remove(&Self::key(a, b))
    }

    /// Keeps only the records for which `f` returns `true`.
    ///
    /// Keys are passed in ascending order.
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(K, K, &mut PairRecord) -> bool,
    {
        self.records.retain(|&(a, b), record| f(a, b, record));
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
