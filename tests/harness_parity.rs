use bmssp_core::dijkstra::dijkstra;
use bmssp_core::{solve, DistanceMap, Graph, Params};

fn path_graph(n: u32, w: f64) -> Graph<u32> {
    let mut g = Graph::from_edges((0..n.saturating_sub(1)).map(|u| (u, u + 1, w))).unwrap();
    for u in 0..n { g.add_vertex(u); }
    g
}

fn star_graph(k: u32, w: f64) -> Graph<u32> { // center 0, leaves 1..=k
    Graph::from_edges((1..=k).map(|leaf| (0, leaf, w))).unwrap()
}

fn complete_graph(n: u32, w: f64) -> Graph<u32> {
    Graph::from_edges((0..n).flat_map(|u| (0..n).filter(move |&v| v != u).map(move |v| (u, v, w)))).unwrap()
}

fn bridge_cliques(a: u32, b: u32, w: f64) -> Graph<u32> { // two cliques joined by a single bridge a-1 -> a
    let n = a + b;
    let mut edges = Vec::new();
    for u in 0..a { for v in 0..a { if u != v { edges.push((u, v, w)); } } }
    edges.push((a - 1, a, w));
    for u in a..n { for v in a..n { if u != v { edges.push((u, v, w)); } } }
    Graph::from_edges(edges).unwrap()
}

// Simple deterministic pseudo-random directed graph generator (xorshift64*)
fn pseudo_random_graph(n: u32, m: u32, seed: u64, w_min: f64, w_max: f64) -> Graph<u32> {
    assert!(n >= 2);
    let mut state = seed | 1;
    let mut next_u32 = || {
        state ^= state >> 12; state ^= state << 25; state ^= state >> 27; state = state.wrapping_mul(2685821657736338717); (state >> 32) as u32
    };
    let mut g = Graph::new();
    for u in 0..n { g.add_vertex(u); }
    let span = w_max - w_min;
    let target_edges = m.min(n.saturating_mul(n - 1));
    let mut edges = 0u32;
    let mut attempts = 0u32;
    let attempt_limit = target_edges * 10 + 1000;
    while edges < target_edges && attempts < attempt_limit {
        attempts += 1;
        let u = next_u32() % n; let v = next_u32() % n; if u == v { continue; }
        if g.outgoing(&u).iter().any(|(x, _)| *x == v) { continue; }
        let w = w_min + span * (next_u32() as f64 / u32::MAX as f64);
        g.add_edge(u, v, w).unwrap();
        edges += 1;
    }
    g
}

fn assert_parity(base: &DistanceMap<u32>, other: &DistanceMap<u32>, n: u32, tol: f64) {
    let mut diffs = Vec::new();
    for i in 0..n {
        let (a, b) = (base.get(&i), other.get(&i));
        if a.is_finite() || b.is_finite() {
            let scale = 1.0f64.max(a.abs()).max(b.abs());
            if !((a - b).abs() <= tol * scale) { diffs.push((i, a, b)); if diffs.len() > 16 { break; } }
        }
    }
    if !diffs.is_empty() {
        let mut msg = String::from("distance parity mismatch; first differences: ");
        for (i, a, b) in &diffs { msg.push_str(&format!("[{}:{} vs {}] ", i, a, b)); }
        panic!("{} ({} diffs; n={})", msg, diffs.len(), n);
    }
}

/// Parameters whose top-level volume cap covers every vertex at `level`.
fn covering(n: u32, level: u32) -> Params {
    let mut p = Params { k: 2, t: 1 };
    while p.level_limit(level) < n as usize { p.k *= 2; }
    p
}

#[test]
fn parity_core_small_graphs() {
    let graphs = vec![
        (10, path_graph(10, 1.0)),
        (13, star_graph(12, 1.0)),
        (8, bridge_cliques(4, 4, 1.0)),
        (6, complete_graph(6, 1.0)),
    ];
    for (n, g) in &graphs {
        let (base, _) = dijkstra(g, [0]);
        for level in 0..=3 {
            let sol = solve(g, covering(*n, level), level, f64::INFINITY, [0]).unwrap();
            assert_parity(&base, &sol.distances, *n, 1e-9);
        }
    }
}

#[test]
fn parity_random_graphs() {
    for seed in 1..=5u64 {
        let g = pseudo_random_graph(40, 160, seed * 7919, 0.5, 3.5);
        let (base, _) = dijkstra(&g, [0]);
        for level in 1..=3 {
            let sol = solve(&g, covering(40, level), level, f64::INFINITY, [0]).unwrap();
            assert_parity(&base, &sol.distances, 40, 1e-6);
        }
    }
}

#[test]
fn parity_random_graphs_steep_scaling() {
    // larger t: coarse outer batches, fine inner ones
    for seed in 11..=14u64 {
        let g = pseudo_random_graph(60, 300, seed * 104729, 0.1, 9.0);
        let (base, _) = dijkstra(&g, [0]);
        let sol = solve(&g, Params { k: 4, t: 3 }, 2, f64::INFINITY, [0]).unwrap();
        assert_parity(&base, &sol.distances, 60, 1e-6);
    }
}

#[test]
fn parity_with_integer_weights_and_ties() {
    // many equal-length alternatives stress the tie-breaking and stale-entry paths
    for seed in 21..=24u64 {
        let g0 = pseudo_random_graph(50, 250, seed, 1.0, 4.0);
        let mut g = Graph::new();
        for u in g0.vertices() {
            g.add_vertex(u);
            for (v, w) in g0.outgoing(&u) { g.add_edge(u, *v, w.round()).unwrap(); }
        }
        let (base, _) = dijkstra(&g, [0]);
        let sol = solve(&g, covering(50, 2), 2, f64::INFINITY, [0]).unwrap();
        assert_parity(&base, &sol.distances, 50, 1e-9);
    }
}

#[test]
fn multi_source_parity() {
    let g = pseudo_random_graph(40, 120, 99, 0.5, 5.0);
    let (base, _) = dijkstra(&g, [0, 7, 31]);
    let sol = solve(&g, covering(40, 2), 2, f64::INFINITY, [0, 7, 31]).unwrap();
    assert_parity(&base, &sol.distances, 40, 1e-6);
}

#[test]
fn finite_bound_parity_below_bound() {
    let g = pseudo_random_graph(40, 160, 4242, 0.5, 3.5);
    let (base, _) = dijkstra(&g, [0]);
    let bound = 4.0;
    let sol = solve(&g, covering(40, 2), 2, bound, [0]).unwrap();
    for v in 0..40u32 {
        if base.get(&v) < bound {
            assert!((base.get(&v) - sol.distances.get(&v)).abs() < 1e-6, "vertex {v}");
        }
        // nothing is ever below the true distance
        assert!(sol.distances.get(&v) >= base.get(&v) - 1e-9);
    }
    for v in &sol.visited { assert!(sol.distances.get(v) < sol.final_bound); }
}
