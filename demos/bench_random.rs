use std::fs::File;
use std::io::Write;
use std::time::Instant;

use bmssp_core::dijkstra::dijkstra;
use bmssp_core::{bmssp_run_csr, BmsspResultInfo, Graph, Params};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

fn make_random_graph(n: usize, avg_degree: f64, seed: u64) -> (Vec<u32>, Vec<u32>, Vec<f64>) {
    let mut rng = SmallRng::seed_from_u64(seed);
    let m_est = (n as f64 * avg_degree) as usize;
    let mut adj: Vec<Vec<(u32, f64)>> = vec![Vec::new(); n];
    for _ in 0..m_est { let u = rng.gen_range(0..n as u32); let v = rng.gen_range(0..n as u32); if u == v { continue; } let w = rng.gen_range(1.0..5.0); adj[u as usize].push((v, w)); }
    let mut offsets = Vec::with_capacity(n + 1); offsets.push(0u32); let mut targets = Vec::new(); let mut weights = Vec::new();
    for row in &adj { for &(v, w) in row { targets.push(v); weights.push(w); } offsets.push(targets.len() as u32); }
    (offsets, targets, weights)
}

fn run_one(n: usize, avg_degree: f64, seed: u64, level: u32) -> serde_json::Value {
    let (off, tgt, wt) = make_random_graph(n, avg_degree, seed);
    let graph = Graph::from_csr(n as u32, &off, &tgt, &wt).expect("generated graph is valid");

    let t0 = Instant::now();
    let (reference, heap) = dijkstra(&graph, [0u32]);
    let dt_ref = t0.elapsed().as_secs_f64() * 1000.0;

    let mut dist = vec![f64::INFINITY; n];
    let mut info = BmsspResultInfo { relaxations: 0, frames: 0, base_cases: 0, settled: 0, final_bound: 0.0, error_code: 0 };
    let t1 = Instant::now();
    let rc = unsafe { bmssp_run_csr(n as u32, off.as_ptr(), tgt.as_ptr(), wt.as_ptr(), 0, level, f64::INFINITY, dist.as_mut_ptr(), &mut info) };
    let dt_bmssp = t1.elapsed().as_secs_f64() * 1000.0;
    assert_eq!(rc, 0, "bmssp_run_csr failed");

    let mut mismatches = 0usize;
    for (i, &d) in dist.iter().enumerate() {
        let r = reference.get(&(i as u32));
        if r.is_infinite() && d.is_infinite() { continue; }
        if (r - d).abs() > 1e-6 * r.abs().max(1.0) { mismatches += 1; }
    }
    let stats = bmssp_core::last_solve_stats();
    serde_json::json!({
        "n": n, "m": wt.len(), "avg_degree": avg_degree, "level": level,
        "params": Params::from_env(),
        "reference_ms": dt_ref, "bmssp_ms": dt_bmssp,
        "speedup": dt_ref / dt_bmssp.max(1e-9),
        "reference_heap_pops": heap.pops,
        "settled": info.settled, "final_bound": info.final_bound,
        "mismatches": mismatches,
        "stats": stats,
    })
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    if args.iter().any(|a| a == "--help") { eprintln!("Usage: bench_random --sizes 1000,5000 --degrees 2,4 --seed 42 --level 3 --out benchmarks/bmssp_sample.json  (k/t via BMSSP_K, BMSSP_T)"); return; }
    let arg = |name: &str| args.iter().position(|a| a == name).and_then(|i| args.get(i + 1)).cloned();
    let sizes: Vec<usize> = arg("--sizes").unwrap_or_else(|| "1000,5000".into()).split(',').filter_map(|s| s.parse().ok()).collect();
    let degrees: Vec<f64> = arg("--degrees").unwrap_or_else(|| "4".into()).split(',').filter_map(|s| s.parse().ok()).collect();
    let seed: u64 = arg("--seed").and_then(|v| v.parse().ok()).unwrap_or(42);
    let level: u32 = arg("--level").and_then(|v| v.parse().ok()).unwrap_or(3);
    let out_path = arg("--out").unwrap_or_else(|| "benchmarks/bmssp_sample.json".into());

    let mut results = Vec::new();
    for &n in &sizes { for &deg in &degrees { results.push(run_one(n, deg, seed, level)); } }
    let json = serde_json::Value::Array(results);
    if let Some(dir) = std::path::Path::new(&out_path).parent() { std::fs::create_dir_all(dir).ok(); }
    let mut f = File::create(&out_path).expect("create out");
    f.write_all(serde_json::to_string_pretty(&json).expect("serialize").as_bytes()).expect("write out");
    eprintln!("wrote {}", out_path);
}
