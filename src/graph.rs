//! Directed weighted adjacency store with forward and reverse edge lists.
//! Built once, then only read by the solver (`&Graph`).

use std::collections::HashMap;

use crate::error::{describe, BmsspError, Result};
use crate::Vertex;

#[derive(Clone, Debug)]
pub struct Graph<V: Vertex> {
    forward: HashMap<V, Vec<(V, f64)>>,
    reverse: HashMap<V, Vec<(V, f64)>>,
    edges: usize,
}

impl<V: Vertex> Default for Graph<V> {
    fn default() -> Self { Self::new() }
}

impl<V: Vertex> Graph<V> {
    pub fn new() -> Self { Self { forward: HashMap::new(), reverse: HashMap::new(), edges: 0 } }

    pub fn from_edges<I>(edges: I) -> Result<Self>
    where
        I: IntoIterator<Item = (V, V, f64)>,
    {
        let mut g = Self::new();
        for (u, v, w) in edges { g.add_edge(u, v, w)?; }
        Ok(g)
    }

    /// Registers `v` with empty adjacency if it is not already known.
    pub fn add_vertex(&mut self, v: V) {
        self.reverse.entry(v.clone()).or_default();
        self.forward.entry(v).or_default();
    }

    /// Appends `u -> v` (weight `w`) to both lists. Parallel edges are kept.
    pub fn add_edge(&mut self, u: V, v: V, w: f64) -> Result<()> {
        if !w.is_finite() {
            return Err(BmsspError::NonFiniteWeight { from: describe(&u), to: describe(&v), weight: w });
        }
        if w < 0.0 {
            return Err(BmsspError::NegativeWeight { from: describe(&u), to: describe(&v), weight: w });
        }
        self.add_vertex(u.clone());
        self.add_vertex(v.clone());
        if let Some(out) = self.forward.get_mut(&u) { out.push((v.clone(), w)); }
        if let Some(inc) = self.reverse.get_mut(&v) { inc.push((u, w)); }
        self.edges += 1;
        Ok(())
    }

    #[inline]
    pub fn outgoing(&self, u: &V) -> &[(V, f64)] {
        self.forward.get(u).map(Vec::as_slice).unwrap_or(&[])
    }

    #[inline]
    pub fn incoming(&self, v: &V) -> &[(V, f64)] {
        self.reverse.get(v).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, v: &V) -> bool { self.forward.contains_key(v) }

    pub fn vertex_count(&self) -> usize { self.forward.len() }

    pub fn edge_count(&self) -> usize { self.edges }

    /// All vertices in ascending order.
    pub fn vertices(&self) -> Vec<V> {
        let mut out: Vec<V> = self.forward.keys().cloned().collect();
        out.sort();
        out
    }
}

impl Graph<u32> {
    /// Builds from CSR arrays: `offsets` has `n+1` entries, edges of `u` live in
    /// `targets[offsets[u]..offsets[u+1]]` / `weights[..]`. Every id in `0..n` becomes a vertex.
    pub fn from_csr(n: u32, offsets: &[u32], targets: &[u32], weights: &[f64]) -> Result<Self> {
        if offsets.len() != n as usize + 1 { return Err(BmsspError::MalformedCsr("offsets length must be n+1")); }
        let m = offsets[n as usize] as usize;
        if targets.len() < m || weights.len() < m { return Err(BmsspError::MalformedCsr("targets/weights shorter than offsets[n]")); }
        if offsets.windows(2).any(|w| w[0] > w[1]) { return Err(BmsspError::MalformedCsr("offsets must be non-decreasing")); }
        let mut g = Self::new();
        for u in 0..n { g.add_vertex(u); }
        for u in 0..n as usize {
            let (s, e) = (offsets[u] as usize, offsets[u + 1] as usize);
            for idx in s..e {
                let v = targets[idx];
                if v >= n { return Err(BmsspError::MalformedCsr("target id out of range")); }
                g.add_edge(u as u32, v, weights[idx])?;
            }
        }
        Ok(g)
    }
}
