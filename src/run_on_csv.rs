use anyhow::{Context, Result};
use campus_paths::campus::read_edges_from_path;
use campus_paths::{Algorithm, Graph, Location};
use clap::Parser;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "csv")]
#[command(about = "Build a walkway graph from a CSV with x1,y1,x2,y2,dist rows and time point-to-point searches on it.", long_about = None)]
struct Cli {
    /// Path to the .csv file
    #[arg(short, long)]
    csv: String,

    /// Number of runs. Picks a new (deterministic) start/end pair per run.
    #[arg(short, long)]
    num_runs: usize,

    #[arg(short, long, default_value_t = Algorithm::Lazy)]
    algorithm: Algorithm,
}

// Pair `run` walks the sorted node list with two different strides so every
// run hits a new, reproducible start/end combination.
fn pick_pair(nodes: &[Location], run: usize) -> (Location, Location) {
    let n = nodes.len();
    (nodes[run % n], nodes[(run * 7 + n / 2) % n])
}

// Walkway lengths are validated so a negative weight fails the run up front.
fn load_graph(path: &str) -> Result<Graph> {
    let edges = read_edges_from_path(path).with_context(|| format!("reading {}", path))?;
    Graph::try_build(edges).with_context(|| format!("validating walkways in {}", path))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    let graph = load_graph(&cli.csv)?;

    let mut nodes: Vec<Location> = graph.locations().copied().collect();
    if nodes.is_empty() {
        println!("Graph has no edges, nothing to run.");
        return Ok(());
    }
    nodes.sort();

    println!(
        "Graph: {} nodes, {} directed edges",
        graph.node_count(),
        graph.edge_count()
    );

    let mut duration_millis = Vec::with_capacity(cli.num_runs);
    let mut found = 0;
    for run in 0..cli.num_runs {
        let (start, end) = pick_pair(&nodes, run);
        let now = Instant::now();
        let path = cli.algorithm.find(&graph, start, end);
        duration_millis.push(now.elapsed().as_secs_f64() * 1000.0);
        if path.is_some() {
            found += 1;
        }
    }

    println!("{:?}", duration_millis);
    println!("Found a path in {} of {} runs", found, cli.num_runs);
    if !duration_millis.is_empty() {
        duration_millis.sort_by(|a, b| a.total_cmp(b));
        println!("Median (ms): {:.3}", duration_millis[duration_millis.len() / 2]);
    }

    Ok(())
}
