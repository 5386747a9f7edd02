//! meshkit CLI - inspect, analyze and export triangle meshes
//!
//! Loads OBJ/OFF files into the incidence structure and writes ASCII PLY.

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use clap::{Parser, Subcommand, ValueEnum};
use meshkit_analysis::{analyze, vertex_ring_areas, LogProgress, MeshReport};
use meshkit_io::{load_mesh, save_mesh};
use meshkit_math::Point3;
use meshkit_primitives::build_cube;
use meshkit_topo::TriMesh;
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod config;

use config::Config;

#[derive(Parser)]
#[command(name = "meshkit")]
#[command(about = "Triangle mesh topology, analysis and PLY export", long_about = None)]
struct Cli {
    /// More log output (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// TOML settings file with [analysis] and [export] tables
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print entity counts for a mesh file
    Info {
        /// Input mesh (.obj or .off)
        mesh: PathBuf,
    },
    /// Compute areas, edge statistics and optional extremal quantities
    Analyze {
        /// Input mesh (.obj or .off)
        mesh: PathBuf,
        /// Run the exhaustive vertex-subset scans
        #[arg(long)]
        extremal: bool,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Convert a mesh to PLY, optionally colored by a per-vertex field
    Export {
        /// Input mesh (.obj or .off)
        input: PathBuf,
        /// Output file (.ply)
        output: PathBuf,
        /// Per-vertex field rendered as vertex colors
        #[arg(long, value_enum, default_value_t = Scalars::None)]
        scalars: Scalars,
    },
    /// Write an axis-aligned cube as PLY
    Cube {
        /// Output file (.ply)
        output: PathBuf,
        /// Side length
        #[arg(long, default_value_t = 1.0)]
        side: f64,
        /// Minimum corner
        #[arg(long, num_args = 3, value_names = ["X", "Y", "Z"], allow_negative_numbers = true)]
        origin: Option<Vec<f64>>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Scalars {
    /// No colors
    None,
    /// Summed area of the triangles around each vertex
    RingArea,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Info { mesh } => show_info(&mesh),
        Commands::Analyze {
            mesh,
            extremal,
            json,
        } => run_analysis(&mesh, &config, extremal, json),
        Commands::Export {
            input,
            output,
            scalars,
        } => export_file(&input, &output, scalars, &config),
        Commands::Cube {
            output,
            side,
            origin,
        } => write_cube(&output, side, origin.as_deref(), &config),
    }
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load(path: &Path) -> Result<TriMesh> {
    let mut mesh = TriMesh::new();
    load_mesh(path, &mut mesh)?;
    Ok(mesh)
}

fn show_info(path: &Path) -> Result<()> {
    let mesh = load(path)?;
    let stats = mesh.stats();

    println!("mesh: {}", path.display());
    println!("  Vertices: {}", stats.vertices);
    println!("  Edges: {}", stats.edges);
    println!("  Triangles: {}", stats.triangles);
    println!("  Euler characteristic: {}", mesh.euler_characteristic());
    Ok(())
}

fn run_analysis(path: &Path, config: &Config, extremal: bool, json: bool) -> Result<()> {
    let mesh = load(path)?;
    let mut settings = config.analysis.clone();
    settings.extremal |= extremal;

    let report = analyze(&mesh, &settings, &mut LogProgress::default())?;
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(path, &report);
    }
    Ok(())
}

fn print_report(path: &Path, report: &MeshReport) {
    println!("mesh: {}", path.display());
    println!("  Vertices: {}", report.stats.vertices);
    println!("  Edges: {}", report.stats.edges);
    println!("  Triangles: {}", report.stats.triangles);
    println!("  Euler characteristic: {}", report.euler_characteristic);
    println!("  Surface area: {:.6}", report.total_surface_area);
    println!(
        "  Edge length: min {:.6}, max {:.6}, mean {:.6}",
        report.edge_lengths.min, report.edge_lengths.max, report.edge_lengths.mean
    );
    if let Some(aux) = &report.aux {
        println!("\nExtremal:");
        println!("  Max vertex distance: {:.6}", aux.max_vertex_distance);
        println!("  Max triangle area: {:.6}", aux.max_triangle_area);
        println!("  Max tetrahedron volume: {:.6}", aux.max_tetrahedron_volume);
    }
}

fn scalar_field(mesh: &TriMesh, scalars: Scalars) -> Result<Vec<f64>> {
    Ok(match scalars {
        Scalars::None => Vec::new(),
        Scalars::RingArea => vertex_ring_areas(mesh)?,
    })
}

fn export_file(input: &Path, output: &Path, scalars: Scalars, config: &Config) -> Result<()> {
    let mesh = load(input)?;
    let field = scalar_field(&mesh, scalars)?;
    debug!(?scalars, "exporting");
    save_mesh(&mesh, output, &field, &config.export)?;
    println!("Exported PLY to {}", output.display());
    Ok(())
}

fn write_cube(output: &Path, side: f64, origin: Option<&[f64]>, config: &Config) -> Result<()> {
    if !(side.is_finite() && side > 0.0) {
        bail!("side must be a positive number, got {side}");
    }
    let origin = match origin {
        None => Point3::origin(),
        Some(&[x, y, z]) => Point3::new(x, y, z),
        Some(other) => bail!("origin needs 3 coordinates, got {}", other.len()),
    };

    let mut mesh = TriMesh::new();
    build_cube(&mut mesh, origin, side)?;
    save_mesh(&mesh, output, &[], &config.export)?;
    println!("Wrote cube to {}", output.display());
    Ok(())
}
