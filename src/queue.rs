//! Bound-limited batch priority queue.
//!
//! Releases vertices in increasing-distance batches: every live entry below
//! `min + m` (capped at the queue's bound) comes out in one `pull`. Each frame of
//! the recursive solver owns its own queue; queues are never shared.
//!
//! A vertex is *live* at the smallest distance it was inserted with since it was
//! last pulled. Superseded heap entries stay behind and are skipped lazily.

use std::collections::{BTreeSet, HashMap};

use crate::heap::{HeapStats, MinHeap};
use crate::Vertex;

/// Smallest batch step a queue accepts.
pub const MIN_BATCH_STEP: f64 = 1.0;
/// How far past a force-popped minimum the batch limit is pushed.
pub const FORCED_PROGRESS_NUDGE: f64 = 1e-4;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PullKind { Empty, Bucket, Forced }

#[derive(Debug)]
pub struct BatchPriorityQueue<V: Vertex> {
    heap: MinHeap<V>,
    live: HashMap<V, f64>,
    bound: f64,
    step: f64,
    stale_skips: u64,
    last_pull: PullKind,
}

impl<V: Vertex> Default for BatchPriorityQueue<V> {
    fn default() -> Self { Self::new(MIN_BATCH_STEP, f64::INFINITY) }
}

impl<V: Vertex> BatchPriorityQueue<V> {
    pub fn new(m: f64, bound: f64) -> Self {
        let mut q = Self { heap: MinHeap::with_capacity(16), live: HashMap::new(), bound, step: MIN_BATCH_STEP, stale_skips: 0, last_pull: PullKind::Empty };
        q.initialize(m, bound);
        q
    }

    /// Drops all entries and reconfigures. `m` is clamped to at least [`MIN_BATCH_STEP`].
    pub fn initialize(&mut self, m: f64, bound: f64) {
        self.step = if m.is_nan() { MIN_BATCH_STEP } else { m.max(MIN_BATCH_STEP) };
        self.bound = bound;
        self.heap.clear();
        self.live.clear();
        self.last_pull = PullKind::Empty;
    }

    /// Admits `(vertex, dist)` iff `dist < bound`. Returns whether the entry became live.
    pub fn insert(&mut self, vertex: V, dist: f64) -> bool {
        if !(dist < self.bound) { return false; }
        match self.live.get_mut(&vertex) {
            Some(cur) if dist >= *cur => return false,
            Some(cur) => *cur = dist,
            None => { self.live.insert(vertex.clone(), dist); }
        }
        self.heap.push(dist, vertex);
        true
    }

    /// Releases the next batch: `(batch_limit, vertices)` with every released
    /// vertex strictly below `batch_limit`. Empty queue yields `(bound, {})`.
    pub fn pull(&mut self) -> (f64, BTreeSet<V>) {
        self.drop_stale_top();
        let Some(min) = self.heap.peek().map(|i| i.dist) else {
            self.last_pull = PullKind::Empty;
            return (self.bound, BTreeSet::new());
        };
        let mut limit = self.bound.min(min + self.step);
        let mut batch = BTreeSet::new();
        loop {
            self.drop_stale_top();
            match self.heap.peek() {
                Some(top) if top.dist < limit => {}
                _ => break,
            }
            if let Some(item) = self.heap.pop() {
                self.live.remove(&item.node);
                batch.insert(item.node);
            }
        }
        self.last_pull = PullKind::Bucket;
        if batch.is_empty() {
            // min + step rounded back onto min: take the minimum alone.
            if let Some(item) = self.heap.pop() {
                self.live.remove(&item.node);
                limit = forced_limit(item.dist, limit, self.bound);
                batch.insert(item.node);
                self.last_pull = PullKind::Forced;
            }
        }
        (limit, batch)
    }

    #[inline] pub fn is_empty(&self) -> bool { self.live.is_empty() }
    #[inline] pub fn len(&self) -> usize { self.live.len() }
    #[inline] pub fn bound(&self) -> f64 { self.bound }
    #[inline] pub fn step(&self) -> f64 { self.step }
    #[inline] pub fn last_pull(&self) -> PullKind { self.last_pull }
    #[inline] pub fn stale_skips(&self) -> u64 { self.stale_skips }
    #[inline] pub fn heap_stats(&self) -> HeapStats { self.heap.stats() }

    fn drop_stale_top(&mut self) {
        while let Some(top) = self.heap.peek() {
            if self.live.get(&top.node) == Some(&top.dist) { return; }
            self.heap.pop();
            self.stale_skips += 1;
        }
    }
}

/// Batch limit after a forced pop of `d`: strictly above `d`, at most `bound`.
#[inline]
fn forced_limit(d: f64, limit: f64, bound: f64) -> f64 {
    let mut nudged = d + FORCED_PROGRESS_NUDGE.max(d.abs() * f64::EPSILON * 4.0);
    if nudged <= d { nudged = f64::INFINITY; }
    limit.max(nudged).min(bound)
}
