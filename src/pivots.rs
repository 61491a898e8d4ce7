//! Pivot selection: a bounded breadth expansion from the sources.
//!
//! Runs at most `k` hop rounds along forward edges. If the visited volume ever
//! exceeds `k * |sources|` the expansion is abandoned and the recursion is left
//! to do the work; otherwise every vertex seen is handed back as an extra
//! candidate for the frame's result set. Every source is its own pivot.

use std::collections::BTreeSet;

use crate::graph::Graph;
use crate::Vertex;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PivotSelection<V: Ord> {
    pub pivots: BTreeSet<V>,
    pub extra: BTreeSet<V>,
    /// The volume limit was exceeded and `extra` was discarded.
    pub aborted: bool,
}

/// The frame's bound takes no part: every source already sits below it, and the
/// expansion only decides whether `extra` is reported.
pub fn find_pivots<V: Vertex>(graph: &Graph<V>, k: usize, sources: &BTreeSet<V>) -> PivotSelection<V> {
    let volume_limit = k.saturating_mul(sources.len());
    let mut visited = sources.clone();
    let mut frontier: Vec<V> = sources.iter().cloned().collect();
    for _ in 0..k {
        let mut next = Vec::new();
        for u in &frontier {
            for (v, _) in graph.outgoing(u) {
                if visited.insert(v.clone()) { next.push(v.clone()); }
            }
        }
        if visited.len() > volume_limit {
            return PivotSelection { pivots: sources.clone(), extra: BTreeSet::new(), aborted: true };
        }
        if next.is_empty() { break; }
        frontier = next;
    }
    PivotSelection { pivots: sources.clone(), extra: visited, aborted: false }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(n: u32) -> Graph<u32> {
        Graph::from_edges((0..n.saturating_sub(1)).map(|u| (u, u + 1, 1.0))).unwrap()
    }

    #[test]
    fn completes_within_volume() {
        // k=3, one source: limit 3, line 0-1-2 is exhausted in two rounds
        let g = line(3);
        let s: BTreeSet<u32> = [0].into_iter().collect();
        let sel = find_pivots(&g, 3, &s);
        assert!(!sel.aborted);
        assert_eq!(sel.pivots, s);
        assert_eq!(sel.extra, [0, 1, 2].into_iter().collect());
    }

    #[test]
    fn aborts_when_volume_exceeded() {
        let g = Graph::from_edges([(0u32, 1, 1.0), (0, 2, 1.0), (0, 3, 1.0)]).unwrap();
        let s: BTreeSet<u32> = [0].into_iter().collect();
        let sel = find_pivots(&g, 2, &s);
        assert!(sel.aborted);
        assert_eq!(sel.pivots, s);
        assert!(sel.extra.is_empty());
    }

    #[test]
    fn volume_checked_every_round() {
        let g = line(10);
        let s: BTreeSet<u32> = [0, 5].into_iter().collect();
        // limit 4: round 1 reaches exactly 4, round 2 reaches 6
        assert!(find_pivots(&g, 2, &s).aborted);
        // limit 2: {0, 9} plus vertex 1 already exceeds it
        assert!(find_pivots(&g, 1, &[0, 9].into_iter().collect()).aborted);
    }

    #[test]
    fn stops_after_k_rounds() {
        let g = Graph::from_edges([(0u32, 4, 1.0), (4, 5, 1.0), (5, 6, 1.0), (1, 2, 1.0)]).unwrap();
        let s: BTreeSet<u32> = [0, 1, 2, 3].into_iter().collect();
        let sel = find_pivots(&g, 2, &s);
        assert!(!sel.aborted);
        // vertex 6 is three hops out
        assert_eq!(sel.extra, [0, 1, 2, 3, 4, 5].into_iter().collect());
    }

    #[test]
    fn early_stop_on_empty_frontier() {
        let g = line(2);
        let s: BTreeSet<u32> = [0].into_iter().collect();
        let sel = find_pivots(&g, 5, &s);
        assert!(!sel.aborted);
        assert_eq!(sel.extra, [0, 1].into_iter().collect());
    }
}
