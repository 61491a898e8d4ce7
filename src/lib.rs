//! Bounded multi-source shortest paths (BMSSP).
//!
//! The solver splits the Dijkstra frontier into geometrically scaled levels:
//! each recursive frame pulls increasing-distance batches from a bound-limited
//! queue and hands them one level down, with a plain bounded Dijkstra at level
//! 0. All frames share one distance map.
//!
//! Exposed both as a generic Rust API ([`Solver`], [`Graph`]) and through a
//! small C ABI over CSR graphs (`bmssp_run_csr`).

use core::slice;
use std::fmt::Debug;
use std::hash::Hash;

pub mod base_case;
pub mod dijkstra;
pub mod distance;
pub mod error;
pub mod graph;
mod heap;
pub mod params;
pub mod path;
pub mod pivots;
pub mod queue;
pub mod scenario;
pub mod solver;
pub mod stats;

pub use distance::DistanceMap;
pub use error::{BmsspError, Result};
pub use graph::Graph;
pub use heap::HeapStats;
pub use params::Params;
pub use path::{reconstruct_path, PATH_TIE_TOLERANCE};
pub use queue::BatchPriorityQueue;
pub use scenario::{Scenario, ScenarioReport, COST_TOLERANCE};
pub use solver::{solve, BmsspOutcome, Solution, Solver, RELAXATION_EPSILON};
pub use stats::{last_solve_stats, SolveStats};

/// Vertex identifiers: hashable for the maps, totally ordered for deterministic
/// tie-breaking and set iteration.
pub trait Vertex: Clone + Eq + Hash + Ord + Debug {}
impl<T: Clone + Eq + Hash + Ord + Debug> Vertex for T {}

// ---------------- C ABI ----------------

#[repr(C)]
pub struct BmsspResultInfo {
    pub relaxations: u64,  // accepted distance writes
    pub frames: u64,       // recursive frames entered
    pub base_cases: u64,   // level-0 calls
    pub settled: u32,      // vertices reported by the top-level call
    pub final_bound: f64,  // completion bound of the top-level call
    pub error_code: i32,   // 0 == success
}

#[no_mangle]
pub extern "C" fn bmssp_version() -> u32 { 1 }

/// Copies the stats of the last solve on the calling thread into `out`.
///
/// # Safety
/// `out` must be null or valid for a write of `SolveStats`.
#[no_mangle]
pub unsafe extern "C" fn bmssp_get_solve_stats(out: *mut SolveStats) {
    if out.is_null() { return; }
    *out = last_solve_stats();
}

#[inline(always)]
unsafe fn as_slice<'a, T>(ptr: *const T, len: usize) -> &'a [T] { slice::from_raw_parts(ptr, len) }
#[inline(always)]
unsafe fn as_mut_slice<'a, T>(ptr: *mut T, len: usize) -> &'a mut [T] { slice::from_raw_parts_mut(ptr, len) }

/// Runs BMSSP from `source` over a CSR graph; `k`/`t` come from `BMSSP_K`/`BMSSP_T`.
/// Writes `n` distances (`+inf` for unreachable) to `out_dist`.
///
/// Returns 0 on success, -1 for `n == 0`, -2 for an out-of-range source, -3 for a
/// null pointer, -4 for a malformed graph, -5 for a non-positive bound.
///
/// # Safety
/// `offsets` must hold `n+1` entries; `targets`/`weights` must hold `offsets[n]`;
/// `out_dist` must hold `n`; `info` may be null.
#[no_mangle]
pub unsafe extern "C" fn bmssp_run_csr(
    n: u32,
    offsets: *const u32,  // len n+1
    targets: *const u32,  // len m
    weights: *const f64,  // len m
    source: u32,
    level: u32,
    bound: f64,
    out_dist: *mut f64,   // len n
    info: *mut BmsspResultInfo,
) -> i32 {
    if n == 0 { return -1; }
    if source >= n { return -2; }
    if offsets.is_null() || targets.is_null() || weights.is_null() || out_dist.is_null() { return -3; }
    if bound.is_nan() || bound <= 0.0 { return -5; }

    let n_usize = n as usize;
    let off = as_slice(offsets, n_usize + 1);
    let m = off[n_usize] as usize;
    let tgt = as_slice(targets, m);
    let wts = as_slice(weights, m);
    let dist = as_mut_slice(out_dist, n_usize);

    let graph = match Graph::from_csr(n, off, tgt, wts) { Ok(g) => g, Err(_) => return -4 };
    let mut solver = match Solver::new(&graph, Params::from_env()) { Ok(s) => s, Err(_) => return -4 };
    let sol = match solver.solve(level, bound, [source]) { Ok(s) => s, Err(_) => return -4 };

    for (v, d) in dist.iter_mut().enumerate() { *d = sol.distances.get(&(v as u32)); }
    if !info.is_null() {
        *info = BmsspResultInfo {
            relaxations: sol.stats.relaxations,
            frames: sol.stats.frames,
            base_cases: sol.stats.base_cases,
            settled: sol.visited.len() as u32,
            final_bound: sol.final_bound,
            error_code: 0,
        };
    }
    0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_info() -> BmsspResultInfo {
        BmsspResultInfo { relaxations: 0, frames: 0, base_cases: 0, settled: 0, final_bound: 0.0, error_code: 0 }
    }

    #[test]
    fn csr_entry_point_matches_reference() {
        // 0->1 (1.0), 0->2 (2.0), 1->2 (0.25), 2->3 (4.0); vertex 4 isolated
        let off = [0u32, 2, 3, 4, 4, 4];
        let tgt = [1u32, 2, 2, 3];
        let wts = [1.0f64, 2.0, 0.25, 4.0];
        let mut dist = vec![0f64; 5];
        let mut info = empty_info();
        let rc = unsafe { bmssp_run_csr(5, off.as_ptr(), tgt.as_ptr(), wts.as_ptr(), 0, 2, f64::INFINITY, dist.as_mut_ptr(), &mut info) };
        assert_eq!(rc, 0);
        assert_eq!(&dist[..4], &[0.0, 1.0, 1.25, 5.25]);
        assert!(dist[4].is_infinite());
        assert_eq!(info.error_code, 0);
        assert!(info.frames >= 1);

        let mut stats = SolveStats::default();
        unsafe { bmssp_get_solve_stats(&mut stats) };
        assert_eq!(stats.frames, info.frames);
    }

    #[test]
    fn csr_entry_point_error_codes() {
        let off = [0u32, 1, 1];
        let tgt = [1u32];
        let bad = [-1.0f64];
        let mut dist = vec![0f64; 2];
        unsafe {
            assert_eq!(bmssp_run_csr(0, off.as_ptr(), tgt.as_ptr(), bad.as_ptr(), 0, 1, 10.0, dist.as_mut_ptr(), std::ptr::null_mut()), -1);
            assert_eq!(bmssp_run_csr(2, off.as_ptr(), tgt.as_ptr(), bad.as_ptr(), 2, 1, 10.0, dist.as_mut_ptr(), std::ptr::null_mut()), -2);
            assert_eq!(bmssp_run_csr(2, std::ptr::null(), tgt.as_ptr(), bad.as_ptr(), 0, 1, 10.0, dist.as_mut_ptr(), std::ptr::null_mut()), -3);
            assert_eq!(bmssp_run_csr(2, off.as_ptr(), tgt.as_ptr(), bad.as_ptr(), 0, 1, 10.0, dist.as_mut_ptr(), std::ptr::null_mut()), -4);
            assert_eq!(bmssp_run_csr(2, off.as_ptr(), tgt.as_ptr(), bad.as_ptr(), 0, 1, 0.0, dist.as_mut_ptr(), std::ptr::null_mut()), -5);
        }
    }
}
