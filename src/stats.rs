//! Per-solve counters. The last top-level solve on each thread is kept in a
//! thread-local slot so FFI callers can fetch it after the run.

use std::cell::Cell;

use serde::Serialize;

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SolveStats {
    pub frames: u64,          // recursive (level > 0) frames entered
    pub base_cases: u64,      // level == 0 calls
    pub batches: u64,         // non-empty queue pulls
    pub forced_pulls: u64,    // pulls that fell back to popping the lone minimum
    pub relaxations: u64,     // accepted distance writes
    pub queue_inserts: u64,   // entries that became live in a batch queue
    pub stale_skips: u64,     // superseded entries dropped by queues and base-case heaps
    pub heap_pushes: u64,
    pub heap_pops: u64,
    pub max_heap_size: u64,
    pub max_depth: u32,       // deepest level count descended below the top frame
}

impl SolveStats {
    pub(crate) fn absorb_heap(&mut self, h: crate::heap::HeapStats) {
        self.heap_pushes += h.pushes;
        self.heap_pops += h.pops;
        if h.max_size > self.max_heap_size { self.max_heap_size = h.max_size; }
    }
}

thread_local! {
    static LAST_SOLVE_STATS: Cell<SolveStats> = Cell::new(SolveStats::default());
}

/// Stats of the most recent top-level `bmssp` call on this thread.
pub fn last_solve_stats() -> SolveStats { LAST_SOLVE_STATS.with(Cell::get) }

pub(crate) fn record_last(stats: SolveStats) { LAST_SOLVE_STATS.with(|c| c.set(stats)); }
