//! Level-0 leaf: Dijkstra restricted to `bound`, run in place on the shared
//! distance map.

use std::collections::BTreeSet;

use tracing::trace;

use crate::distance::DistanceMap;
use crate::graph::Graph;
use crate::heap::MinHeap;
use crate::solver::RELAXATION_EPSILON;
use crate::stats::SolveStats;
use crate::Vertex;

/// Settles every vertex reachable from `sources` below `bound`. Neighbours
/// improved to `>= bound` are still written but not expanded; neighbours whose
/// recorded distance this call merely matches are expanded too, since the frame
/// that recorded them may have been cut short. Returns `(bound, visited)`.
pub fn bounded_dijkstra<V: Vertex>(
    graph: &Graph<V>,
    dist: &mut DistanceMap<V>,
    bound: f64,
    sources: &BTreeSet<V>,
    stats: &mut SolveStats,
) -> (f64, BTreeSet<V>) {
    let mut pq = MinHeap::with_capacity(sources.len().max(16));
    for s in sources {
        let d = dist.get(s);
        if d < bound { pq.push(d, s.clone()); }
    }
    let mut visited = BTreeSet::new();
    while let Some(item) = pq.pop() {
        let (d, u) = (item.dist, item.node);
        if d >= bound { continue; }
        if d > dist.get(&u) { stats.stale_skips += 1; continue; }
        // equal-distance duplicates (parallel edges) settle once
        if !visited.insert(u.clone()) { continue; }
        for (v, w) in graph.outgoing(&u) {
            let nd = d + w;
            if dist.improve(v, nd) {
                stats.relaxations += 1;
                if nd < bound { pq.push(nd, v.clone()); }
            } else if nd < bound && nd <= dist.get(v) + RELAXATION_EPSILON && !visited.contains(v) {
                // already recorded by an earlier frame that never expanded it
                pq.push(dist.get(v), v.clone());
            }
        }
    }
    stats.absorb_heap(pq.stats());
    trace!(bound, settled = visited.len(), "base case done");
    (bound, visited)
}
