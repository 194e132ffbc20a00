//! hedgemesh CLI - inspect, highlight and export OBJ meshes.
//!
//! Usage: hedgemesh <COMMAND> [OPTIONS] <INPUT> [OUTPUT]
//!
//! Run `hedgemesh --help` for available commands. Set `RUST_LOG=debug` to see
//! build pass summaries and non-manifold edge warnings.

use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::{Args, Parser, Subcommand};
use nalgebra::Point3;

use hedgemesh::algo::region::{find_region_faces, RegionBox, RegionOptions};
use hedgemesh::io::obj;
use hedgemesh::mesh::{BuildOptions, HalfEdgeMesh};

#[derive(Parser)]
#[command(name = "hedgemesh")]
#[command(author, version, about = "Half-edge mesh CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Display mesh information
    Info {
        #[command(flatten)]
        load: LoadArgs,
    },

    /// Count the faces inside a region of interest
    Region {
        #[command(flatten)]
        load: LoadArgs,

        #[command(flatten)]
        region: RegionArgs,
    },

    /// Highlight a region and write a colored OBJ
    Export {
        #[command(flatten)]
        load: LoadArgs,

        /// Output mesh file
        output: PathBuf,

        #[command(flatten)]
        region: RegionArgs,

        /// Skip region highlighting
        #[arg(long)]
        no_region: bool,
    },
}

#[derive(Args)]
struct LoadArgs {
    /// Input OBJ file
    input: PathBuf,

    /// Fail on edges shared by more than two faces
    #[arg(long)]
    strict: bool,

    /// Center the mesh and scale it to this height before building
    #[arg(long, value_name = "HEIGHT")]
    normalize: Option<f64>,
}

#[derive(Args)]
struct RegionArgs {
    /// Lower corner of the region box (default: reference ear box)
    #[arg(long, num_args = 3, value_names = ["X", "Y", "Z"], allow_negative_numbers = true, requires = "max")]
    min: Option<Vec<f64>>,

    /// Upper corner of the region box
    #[arg(long, num_args = 3, value_names = ["X", "Y", "Z"], allow_negative_numbers = true, requires = "min")]
    max: Option<Vec<f64>>,
}

impl RegionArgs {
    fn options(&self) -> hedgemesh::Result<RegionOptions> {
        let region = match (&self.min, &self.max) {
            (Some(min), Some(max)) => RegionBox::new(
                Point3::new(min[0], min[1], min[2]),
                Point3::new(max[0], max[1], max[2]),
            )?,
            _ => RegionBox::default(),
        };
        Ok(RegionOptions::default().with_region(region))
    }
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Info { load } => cmd_info(&load)?,
        Commands::Region { load, region } => cmd_region(&load, &region)?,
        Commands::Export {
            load,
            output,
            region,
            no_region,
        } => cmd_export(&load, &output, &region, no_region)?,
    }

    Ok(())
}

fn load_mesh(args: &LoadArgs) -> hedgemesh::Result<HalfEdgeMesh> {
    let start = Instant::now();
    let mut data = obj::read(&args.input)?;
    if let Some(height) = args.normalize {
        data.normalize(height);
    }

    let options = if args.strict {
        BuildOptions::strict()
    } else {
        BuildOptions::default()
    };
    let mesh = data.to_mesh(&options)?;

    log::info!(
        "loaded {} ({} vertices, {} faces) in {:.2?}",
        args.input.display(),
        mesh.num_vertices(),
        mesh.num_faces(),
        start.elapsed()
    );
    Ok(mesh)
}

fn cmd_info(args: &LoadArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mesh = load_mesh(args)?;

    println!("File: {}", args.input.display());
    println!("Vertices: {}", mesh.num_vertices());
    println!("Faces: {}", mesh.num_faces());
    println!("Half-edges: {}", mesh.num_halfedges());
    println!("Boundary half-edges: {}", mesh.num_boundary_halfedges());
    println!("Non-manifold edges: {}", mesh.non_manifold_edges().len());
    println!("Closed: {}", mesh.is_closed());
    println!("Surface area: {:.6}", mesh.surface_area());

    if let Some((min, max)) = mesh.bounding_box() {
        println!(
            "Bounding box: ({:.3}, {:.3}, {:.3}) to ({:.3}, {:.3}, {:.3})",
            min.x, min.y, min.z, max.x, max.y, max.z
        );
        let diag = max - min;
        println!("Dimensions: {:.3} x {:.3} x {:.3}", diag.x, diag.y, diag.z);
    }

    Ok(())
}

fn cmd_region(args: &LoadArgs, region: &RegionArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut mesh = load_mesh(args)?;
    let options = region.options()?;

    let faces = find_region_faces(&mut mesh, &options);
    let highlighted = mesh
        .vertex_ids()
        .filter(|&v| mesh.color(v) == options.highlight)
        .count();

    let (min, max) = (options.region.min(), options.region.max());
    println!(
        "Region: ({}, {}, {}) to ({}, {}, {})",
        min.x, min.y, min.z, max.x, max.y, max.z
    );
    println!("Faces inside: {} of {}", faces.len(), mesh.num_faces());
    println!("Highlighted vertices: {}", highlighted);

    Ok(())
}

fn cmd_export(
    args: &LoadArgs,
    output: &Path,
    region: &RegionArgs,
    no_region: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut mesh = load_mesh(args)?;

    if !no_region {
        let faces = find_region_faces(&mut mesh, &region.options()?);
        println!("Highlighted {} faces", faces.len());
    }

    let buffers = mesh.vertex_buffers()?;
    log::debug!(
        "render buffers: {} vertices, {} triangles",
        buffers.vertex_count(),
        buffers.triangle_count()
    );

    hedgemesh::io::save(&mesh, output)?;
    println!("Saved: {}", output.display());

    Ok(())
}
