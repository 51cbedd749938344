use anyhow::{bail, Context, Result};
use campus_paths::{Algorithm, Campus, Path};
use clap::Parser;
use csv::Writer;
use serde::Serialize;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "route")]
#[command(about = "Load campus walkways and buildings from CSV and print the shortest walking route between two buildings, or list the buildings.", long_about = None)]
struct Cli {
    /// Path to the walkway CSV (x1,y1,x2,y2,dist)
    #[arg(short, long, env = "CAMPUS_EDGES")]
    edges: String,

    /// Path to the building CSV (shortName,longName,x,y)
    #[arg(short, long, env = "CAMPUS_BUILDINGS")]
    buildings: String,

    /// Short name of the building to start from
    #[arg(short, long, required_unless_present = "list_buildings")]
    start: Option<String>,

    /// Short name of the building to walk to
    #[arg(short = 't', long, required_unless_present = "list_buildings")]
    end: Option<String>,

    /// Print every building that can be routed between and exit
    #[arg(short, long, default_value_t = false)]
    list_buildings: bool,

    #[arg(short, long, default_value_t = Algorithm::Lazy)]
    algorithm: Algorithm,

    /// Print the route as JSON instead of a summary
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Write the route steps to this CSV (x1,y1,x2,y2,dist)
    #[arg(short, long)]
    out: Option<String>,
}

#[derive(Serialize)]
struct RouteResponse<'a> {
    path: &'a [campus_paths::Edge],
    dist: f64,
}

fn write_steps(path: &Path, out_path: &str) -> Result<()> {
    let mut wtr = Writer::from_path(out_path).with_context(|| format!("creating CSV {}", out_path))?;
    wtr.write_record(["x1", "y1", "x2", "y2", "dist"])?;
    for e in &path.steps {
        wtr.write_record(&[
            e.start.x().to_string(),
            e.start.y().to_string(),
            e.end.x().to_string(),
            e.end.y().to_string(),
            format!("{:.6}", e.dist),
        ])?;
    }
    wtr.flush()?;
    println!("Wrote {} steps to {}", path.steps.len(), out_path);
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let campus = Campus::load(&cli.edges, &cli.buildings)
        .with_context(|| format!("loading campus from {} and {}", cli.edges, cli.buildings))?;

    if cli.list_buildings {
        let list = campus.building_list();
        if cli.json {
            println!("{}", serde_json::to_string_pretty(&list)?);
        } else {
            print!("{}", list);
        }
        return Ok(());
    }

    let (Some(start), Some(end)) = (&cli.start, &cli.end) else {
        bail!("both --start and --end are required unless --list-buildings is given");
    };

    let now = Instant::now();
    let route = campus
        .route(start, end, cli.algorithm)
        .with_context(|| format!("routing {} -> {}", start, end))?;
    tracing::debug!(elapsed_ms = now.elapsed().as_secs_f64() * 1000.0, "search finished");

    let Some(path) = route else {
        bail!("No path found from {} to {}", start, end);
    };

    if let Some(out_path) = &cli.out {
        write_steps(&path, out_path)?;
    }

    if cli.json {
        let response = RouteResponse {
            path: &path.steps,
            dist: path.dist,
        };
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        println!("Route {} -> {} ({})", start, end, cli.algorithm);
        for (i, step) in path.steps.iter().enumerate() {
            println!("  {:>3}. {}", i + 1, step);
        }
        println!("Steps: {}", path.steps.len());
        println!("Total distance: {:.2}", path.dist);
    }

    Ok(())
}
