//! Read-only path recovery over a finished distance map: walk backwards from the
//! target along incoming edges that exactly account for the recorded distance.

use std::collections::{BTreeSet, HashSet};

use crate::distance::DistanceMap;
use crate::graph::Graph;
use crate::Vertex;

/// Two distances closer than this are treated as the same value when matching
/// `dist[p] + w` against `dist[c]`. Looser than the relaxation epsilon because
/// accumulated sums along a path drift further than a single relaxation.
pub const PATH_TIE_TOLERANCE: f64 = 1e-5;

/// Vertices from one of `sources` to `target` (inclusive), or `None` if `target`
/// is unreachable or no tight predecessor chain leads back to a source.
pub fn reconstruct_path<V: Vertex>(graph: &Graph<V>, dist: &DistanceMap<V>, sources: &BTreeSet<V>, target: &V) -> Option<Vec<V>> {
    if !dist.is_reachable(target) { return None; }
    let mut path = vec![target.clone()];
    let mut on_path: HashSet<V> = HashSet::from([target.clone()]);
    let mut cur = target.clone();
    while !sources.contains(&cur) {
        let dc = dist.get(&cur);
        let mut preds: Vec<&(V, f64)> = graph
            .incoming(&cur)
            .iter()
            .filter(|(p, w)| !on_path.contains(p) && (dist.get(p) + w - dc).abs() < PATH_TIE_TOLERANCE)
            .collect();
        preds.sort_by(|a, b| a.0.cmp(&b.0));
        let (p, _) = preds.first()?;
        on_path.insert(p.clone());
        path.push(p.clone());
        cur = p.clone();
    }
    path.reverse();
    Some(path)
}

/// Total weight along `path`, using the cheapest parallel edge between each pair.
pub fn path_cost<V: Vertex>(graph: &Graph<V>, path: &[V]) -> Option<f64> {
    path.windows(2).try_fold(0.0, |acc, pair| {
        graph
            .outgoing(&pair[0])
            .iter()
            .filter(|(v, _)| *v == pair[1])
            .map(|(_, w)| *w)
            .min_by(f64::total_cmp)
            .map(|w| acc + w)
    })
}
