//! Plain multi-source Dijkstra over the same `Graph`. This is the parity
//! oracle for the recursive solver.

use crate::distance::DistanceMap;
use crate::graph::Graph;
use crate::heap::{HeapStats, MinHeap};
use crate::Vertex;

pub fn dijkstra<V: Vertex, I: IntoIterator<Item = V>>(graph: &Graph<V>, sources: I) -> (DistanceMap<V>, HeapStats) {
    let mut dist = DistanceMap::with_sources(graph.vertices(), std::iter::empty());
    let mut heap = MinHeap::with_capacity(graph.vertex_count().min(1024));
    for s in sources {
        dist.seed(s.clone(), 0.0);
        heap.push(0.0, s);
    }
    while let Some(item) = heap.pop() {
        if item.dist > dist.get(&item.node) { continue; }
        for (v, w) in graph.outgoing(&item.node) {
            let nd = item.dist + w;
            if dist.improve(v, nd) { heap.push(nd, v.clone()); }
        }
    }
    let stats = heap.stats();
    (dist, stats)
}
