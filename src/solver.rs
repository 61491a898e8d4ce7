//! Recursive BMSSP driver.
//!
//! A frame at `level > 0` selects pivots, seeds a fresh [`BatchPriorityQueue`]
//! with them and repeatedly pulls a batch, recurses one level down on it, then
//! relaxes the out-edges of whatever the child settled. Level 0 is a plain
//! bounded Dijkstra. All frames share one [`DistanceMap`] by `&mut`.
//!
//! Returned bounds are *completion* bounds: every vertex a frame reports has a
//! final distance below the bound it returns. A frame whose queue drained
//! returns its full `bound`; a frame cut short by the volume cap returns the
//! completion bound of its last child.

use std::collections::BTreeSet;

use tracing::{debug, debug_span, info, trace};

use crate::base_case::bounded_dijkstra;
use crate::distance::DistanceMap;
use crate::error::{describe, BmsspError, Result};
use crate::graph::Graph;
use crate::params::Params;
use crate::pivots::find_pivots;
use crate::queue::{BatchPriorityQueue, PullKind};
use crate::stats::{record_last, SolveStats};
use crate::Vertex;

/// A relaxation must beat the recorded distance by more than this to be written.
/// Smaller gains are float noise and would only churn the queues.
pub const RELAXATION_EPSILON: f64 = 1e-7;

#[derive(Clone, Debug, PartialEq)]
pub struct BmsspOutcome<V: Ord> {
    pub final_bound: f64,
    pub visited: BTreeSet<V>,
}

#[derive(Clone, Debug)]
pub struct Solution<V: Vertex> {
    pub distances: DistanceMap<V>,
    pub final_bound: f64,
    pub visited: BTreeSet<V>,
    pub stats: SolveStats,
}

pub struct Solver<'g, V: Vertex> {
    graph: &'g Graph<V>,
    params: Params,
    stats: SolveStats,
    top_level: u32,
}

impl<'g, V: Vertex> Solver<'g, V> {
    pub fn new(graph: &'g Graph<V>, params: Params) -> Result<Self> {
        params.validate()?;
        Ok(Self { graph, params, stats: SolveStats::default(), top_level: 0 })
    }

    /// Counters accumulated by the most recent `bmssp` call on this solver.
    pub fn stats(&self) -> SolveStats { self.stats }

    /// Creates a distance map over the graph's vertices (sources at 0) and runs
    /// `bmssp` on it.
    pub fn solve<I>(&mut self, level: u32, bound: f64, sources: I) -> Result<Solution<V>>
    where
        I: IntoIterator<Item = V>,
    {
        let sources: BTreeSet<V> = sources.into_iter().collect();
        if let Some(missing) = sources.iter().find(|s| !self.graph.contains(s)) {
            return Err(BmsspError::UnknownVertex(describe(missing)));
        }
        let mut distances = DistanceMap::with_sources(self.graph.vertices(), sources.iter().cloned());
        let out = self.bmssp(&mut distances, level, bound, &sources)?;
        Ok(Solution { distances, final_bound: out.final_bound, visited: out.visited, stats: self.stats })
    }

    /// Runs BMSSP at `level` with exclusive upper `bound` from `sources`, mutating
    /// `dist` in place. Every source must already carry a finite distance.
    pub fn bmssp(&mut self, dist: &mut DistanceMap<V>, level: u32, bound: f64, sources: &BTreeSet<V>) -> Result<BmsspOutcome<V>> {
        if sources.is_empty() { return Err(BmsspError::EmptySources); }
        if bound.is_nan() || bound <= 0.0 { return Err(BmsspError::InvalidBound(bound)); }
        if let Some(s) = sources.iter().find(|s| !dist.is_reachable(s)) {
            return Err(BmsspError::UnseededSource(describe(s)));
        }
        self.stats = SolveStats::default();
        self.top_level = level;
        let (final_bound, visited) = self.run_level(dist, level, bound, sources);
        record_last(self.stats);
        info!(
            level, bound, final_bound, visited = visited.len(),
            frames = self.stats.frames, base_cases = self.stats.base_cases,
            relaxations = self.stats.relaxations, "bmssp solve finished"
        );
        Ok(BmsspOutcome { final_bound, visited })
    }

    fn run_level(&mut self, dist: &mut DistanceMap<V>, level: u32, bound: f64, sources: &BTreeSet<V>) -> (f64, BTreeSet<V>) {
        let depth = self.top_level - level;
        if depth > self.stats.max_depth { self.stats.max_depth = depth; }
        if level == 0 {
            self.stats.base_cases += 1;
            return bounded_dijkstra(self.graph, dist, bound, sources, &mut self.stats);
        }
        self.stats.frames += 1;
        let _span = debug_span!("bmssp", level, bound).entered();

        let selection = find_pivots(self.graph, self.params.k, sources);
        let mut queue = BatchPriorityQueue::new(self.params.batch_step(level), bound);
        for x in &selection.pivots {
            if queue.insert(x.clone(), dist.get(x)) { self.stats.queue_inserts += 1; }
        }

        let mut processed: BTreeSet<V> = BTreeSet::new();
        let mut b_prime = selection.pivots.iter().map(|x| dist.get(x)).fold(f64::INFINITY, f64::min).min(bound);
        let limit_count = self.params.level_limit(level);

        while processed.len() < limit_count && !queue.is_empty() {
            let (batch_bound, batch_sources) = queue.pull();
            if batch_sources.is_empty() { break; }
            self.stats.batches += 1;
            if queue.last_pull() == PullKind::Forced { self.stats.forced_pulls += 1; }
            trace!(level, batch_bound, batch = batch_sources.len(), "pulled batch");

            let (rec_bound, rec_vertices) = self.run_level(dist, level - 1, batch_bound, &batch_sources);
            debug_assert!(rec_bound <= batch_bound);

            let mut prepend: BTreeSet<V> = BTreeSet::new();
            for u in &rec_vertices {
                let du = dist.get(u);
                for (v, w) in self.graph.outgoing(u) {
                    let nd = du + w;
                    let cur = dist.get(v);
                    let written = nd < cur - RELAXATION_EPSILON && dist.improve(v, nd);
                    if written { self.stats.relaxations += 1; }
                    // a tight edge whose head sits outside the child's reach must be
                    // re-admitted here even if a deeper frame already wrote it
                    if !(written || nd <= cur + RELAXATION_EPSILON) { continue; }
                    let dv = dist.get(v);
                    if batch_bound <= dv && dv < bound {
                        if queue.insert(v.clone(), dv) { self.stats.queue_inserts += 1; }
                    } else if rec_bound <= dv && dv < batch_bound {
                        prepend.insert(v.clone());
                    }
                }
            }
            // pulled but not completed by the child: retry on the next pull
            for x in &batch_sources {
                let dx = dist.get(x);
                if rec_bound <= dx && dx < batch_bound { prepend.insert(x.clone()); }
            }
            for x in prepend {
                let dx = dist.get(&x);
                if queue.insert(x, dx) { self.stats.queue_inserts += 1; }
            }

            processed.extend(rec_vertices);
            b_prime = rec_bound;
        }

        let drained = queue.is_empty();
        let final_bound = if drained { bound } else { b_prime.min(bound) };
        self.stats.stale_skips += queue.stale_skips();
        self.stats.absorb_heap(queue.heap_stats());
        processed.retain(|x| dist.get(x) < final_bound);
        processed.extend(selection.extra.iter().filter(|x| dist.get(x) < final_bound).cloned());
        debug!(level, processed = processed.len(), final_bound, drained, pivots_aborted = selection.aborted, "frame done");
        (final_bound, processed)
    }
}

/// One-shot convenience: default-constructs a solver and solves from `sources`.
pub fn solve<V: Vertex, I: IntoIterator<Item = V>>(graph: &Graph<V>, params: Params, level: u32, bound: f64, sources: I) -> Result<Solution<V>> {
    Solver::new(graph, params)?.solve(level, bound, sources)
}
