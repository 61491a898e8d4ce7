//! Binary min-heap over `(dist, vertex)` with explicit sift ops and push/pop
//! instrumentation. Ties on distance are broken by vertex order so pop order is
//! deterministic.

use std::cmp::Ordering;

use crate::Vertex;

#[derive(Clone, Debug)]
pub(crate) struct HeapItem<V> { pub dist: f64, pub node: V }

impl<V: Ord> HeapItem<V> {
    #[inline]
    fn key_cmp(&self, o: &Self) -> Ordering {
        self.dist.total_cmp(&o.dist).then_with(|| self.node.cmp(&o.node))
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct HeapStats { pub pushes: u64, pub pops: u64, pub max_size: u64 }

#[derive(Debug)]
pub(crate) struct MinHeap<V> { data: Vec<HeapItem<V>>, stats: HeapStats }

impl<V: Vertex> MinHeap<V> {
    #[inline] pub fn with_capacity(cap: usize) -> Self { Self { data: Vec::with_capacity(cap), stats: HeapStats::default() } }
    #[inline] pub fn stats(&self) -> HeapStats { self.stats }
    #[inline] pub fn peek(&self) -> Option<&HeapItem<V>> { self.data.first() }

    #[inline]
    pub fn clear(&mut self) { self.data.clear(); }

    pub fn push(&mut self, dist: f64, node: V) {
        self.data.push(HeapItem { dist, node });
        self.stats.pushes += 1;
        if self.data.len() as u64 > self.stats.max_size { self.stats.max_size = self.data.len() as u64; }
        self.sift_up(self.data.len() - 1);
    }

    pub fn pop(&mut self) -> Option<HeapItem<V>> {
        let len = self.data.len();
        if len == 0 { return None; }
        self.data.swap(0, len - 1);
        let out = self.data.pop();
        self.stats.pops += 1;
        if !self.data.is_empty() { self.sift_down(0); }
        out
    }

    #[inline]
    fn sift_up(&mut self, mut idx: usize) {
        while idx > 0 {
            let parent = (idx - 1) / 2;
            if self.data[idx].key_cmp(&self.data[parent]) == Ordering::Less { self.data.swap(idx, parent); idx = parent; } else { break; }
        }
    }

    #[inline]
    fn sift_down(&mut self, mut idx: usize) {
        let n = self.data.len();
        loop {
            let left = idx * 2 + 1;
            if left >= n { break; }
            let right = left + 1;
            let mut best = left;
            if right < n && self.data[right].key_cmp(&self.data[left]) == Ordering::Less { best = right; }
            if self.data[best].key_cmp(&self.data[idx]) == Ordering::Less { self.data.swap(idx, best); idx = best; } else { break; }
        }
    }
}
