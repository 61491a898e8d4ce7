use std::fs::File;

use bmssp_core::Scenario;

fn setup_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose { EnvFilter::new("bmssp_core=trace") } else { EnvFilter::new("bmssp_core=info") }
    });
    let _ = tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).try_init();
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    if args.iter().any(|a| a == "--help") { eprintln!("usage: run_scenario [scenario.json] [--verbose]"); return; }
    setup_tracing(args.iter().any(|a| a == "--verbose"));
    let path = args.iter().skip(1).find(|a| !a.starts_with("--")).cloned().unwrap_or_else(|| "tests/data/complex.json".into());

    let report = match File::open(&path).map_err(|e| e.to_string()).and_then(|f| Scenario::from_reader(f).map_err(|e| e.to_string())).and_then(|sc| sc.run().map_err(|e| e.to_string())) {
        Ok(r) => r,
        Err(e) => { eprintln!("{path}: {e}"); std::process::exit(1); }
    };

    println!("final_bound={} visited={}", report.final_bound, report.visited.len());
    for (v, d) in report.distances.to_sorted_vec() { println!("  {v:>8} {d}"); }
    match (&report.display_target, &report.path) {
        (Some(t), Some(p)) => println!("path to {t}: {}", p.join(" -> ")),
        (Some(t), None) => println!("no path to {t}"),
        _ => println!("nothing reachable"),
    }
    println!("stats: {}", serde_json::to_string(&report.stats).unwrap_or_default());
    if let Some(e) = report.expected_cost {
        let ok = report.matches_expected();
        println!("target cost {} expected {e}: {}", report.target_cost, if ok { "ok" } else { "MISMATCH" });
        if !ok { std::process::exit(2); }
    }
}
