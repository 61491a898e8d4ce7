//! Shared distance store. One instance per solve; every recursive frame borrows
//! it mutably and sees updates immediately. Values only ever decrease.

use std::collections::HashMap;

use crate::Vertex;

#[derive(Clone, Debug, Default)]
pub struct DistanceMap<V: Vertex> { dist: HashMap<V, f64> }

impl<V: Vertex> DistanceMap<V> {
    pub fn new() -> Self { Self { dist: HashMap::new() } }

    /// `+inf` for every vertex in `vertices`, `0` for every source.
    pub fn with_sources<I, S>(vertices: I, sources: S) -> Self
    where
        I: IntoIterator<Item = V>,
        S: IntoIterator<Item = V>,
    {
        let mut dist: HashMap<V, f64> = vertices.into_iter().map(|v| (v, f64::INFINITY)).collect();
        for s in sources { dist.insert(s, 0.0); }
        Self { dist }
    }

    /// Recorded distance; unknown vertices are unreachable.
    #[inline]
    pub fn get(&self, v: &V) -> f64 { self.dist.get(v).copied().unwrap_or(f64::INFINITY) }

    #[inline]
    pub fn is_reachable(&self, v: &V) -> bool { self.get(v).is_finite() }

    /// Writes `d` if it is strictly smaller than the recorded value. Returns whether it wrote.
    #[inline]
    pub fn improve(&mut self, v: &V, d: f64) -> bool {
        match self.dist.get_mut(v) {
            Some(cur) if d < *cur => { *cur = d; true }
            Some(_) => false,
            None if d < f64::INFINITY => { self.dist.insert(v.clone(), d); true }
            None => false,
        }
    }

    /// Seeds a source distance. Never raises an existing value.
    pub fn seed(&mut self, v: V, d: f64) {
        let cur = self.dist.entry(v).or_insert(f64::INFINITY);
        if d < *cur { *cur = d; }
    }

    pub fn len(&self) -> usize { self.dist.len() }

    pub fn is_empty(&self) -> bool { self.dist.is_empty() }

    /// `(vertex, distance)` pairs in ascending vertex order.
    pub fn to_sorted_vec(&self) -> Vec<(V, f64)> {
        let mut out: Vec<(V, f64)> = self.dist.iter().map(|(v, d)| (v.clone(), *d)).collect();
        out.sort_by(|a, b| a.0.cmp(&b.0));
        out
    }

    pub fn iter(&self) -> impl Iterator<Item = (&V, f64)> + '_ { self.dist.iter().map(|(v, d)| (v, *d)) }

    /// Reachable vertex with the largest finite distance (ties go to the larger vertex).
    /// Used as the display fallback when a requested target is unreachable.
    pub fn farthest_reachable(&self) -> Option<(V, f64)> {
        self.dist
            .iter()
            .filter(|(_, d)| d.is_finite())
            .max_by(|a, b| a.1.total_cmp(b.1).then_with(|| a.0.cmp(b.0)))
            .map(|(v, d)| (v.clone(), *d))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_sources_and_infinite_rest() {
        let d = DistanceMap::with_sources(["a", "b", "c"], ["b"]);
        assert_eq!(d.get(&"b"), 0.0);
        assert!(d.get(&"a").is_infinite());
        assert!(d.get(&"nope").is_infinite());
        assert_eq!(d.len(), 3);
    }

    #[test]
    fn improve_is_monotone() {
        let mut d = DistanceMap::with_sources([1u32, 2], [1]);
        assert!(d.improve(&2, 5.0));
        assert!(!d.improve(&2, 5.0));
        assert!(!d.improve(&2, 6.0));
        assert!(d.improve(&2, 4.5));
        assert_eq!(d.get(&2), 4.5);
        assert!(!d.improve(&9, f64::INFINITY));
        assert!(d.improve(&9, 1.0));
        d.seed(2, 10.0);
        assert_eq!(d.get(&2), 4.5);
    }

    #[test]
    fn farthest_reachable_skips_infinite() {
        let mut d = DistanceMap::with_sources(["a", "b", "c", "z"], ["a"]);
        d.improve(&"b", 3.0);
        d.improve(&"c", 3.0);
        assert_eq!(d.farthest_reachable(), Some(("c", 3.0)));
        let empty: DistanceMap<u8> = DistanceMap::new();
        assert_eq!(empty.farthest_reachable(), None);
    }
}
