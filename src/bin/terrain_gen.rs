// src/bin/terrain_gen.rs
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use serde::Serialize;

use terrain_gen::config::ConfigurationManager;
use terrain_gen::terrain::{
    HeadlessMeshOwner, TerrainComposer, WaterPlane, WorldBounds, WorldPoint, WorldSummary,
};

/// Generates a terrain world headlessly and prints what was built.
#[derive(Parser, Debug)]
#[command(name = "terrain_gen", version)]
struct Args {
    /// TOML file with [generation], [water] and [threading] tables
    #[arg(long)]
    config: Option<PathBuf>,

    /// World seed, 0 draws a random one
    #[arg(long)]
    seed: Option<i64>,

    /// -1 single chunk, 0 square, >0 square with preview multiplier
    #[arg(long, allow_negative_numbers = true, conflicts_with = "single_chunk")]
    world_size: Option<i64>,

    #[arg(long)]
    view_distance: Option<i64>,

    /// Only generate the origin chunk
    #[arg(long)]
    single_chunk: bool,

    /// Build chunks on the calling thread only
    #[arg(long)]
    serial: bool,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Write the effective configuration to this path and exit
    #[arg(long)]
    write_default_config: Option<PathBuf>,
}

#[derive(Serialize)]
struct Report {
    summary: WorldSummary,
    preview: WorldBounds,
    water: Option<WaterPlane>,
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let mut manager = match &args.config {
        Some(path) => ConfigurationManager::load_from_file(path)?,
        None => ConfigurationManager::default(),
    };

    let config = manager.get_config_mut();
    if let Some(seed) = args.seed {
        config.generation.seed = seed;
    }
    if let Some(world_size) = args.world_size {
        config.generation.world_size = world_size;
    }
    if args.single_chunk {
        config.generation.world_size = -1;
    }
    if let Some(view_distance) = args.view_distance {
        config.generation.view_distance = view_distance;
    }
    if args.serial {
        config.threading.use_parallel_processing = false;
    }

    if let Some(path) = &args.write_default_config {
        manager.set_config_path(path);
        manager.save_to_file()?;
        println!("wrote configuration to {}", path.display());
        return Ok(());
    }

    let params = manager.generation_parameters()?;
    let water = manager.water_settings();

    let mut composer = TerrainComposer::new(&manager.terrain_config());
    let mut mesh_owner = HeadlessMeshOwner::new();
    let origin = WorldPoint::ORIGIN;

    let summary = composer.generate_world(&params, &mut mesh_owner, origin)?;
    let report = Report {
        preview: WorldBounds::preview(&params, origin),
        water: WaterPlane::place(&water, &params, origin),
        summary,
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        let summary = &report.summary;
        println!("seed:      {}", summary.seed);
        println!("chunks:    {}", summary.chunk_count);
        println!("vertices:  {}", summary.vertex_count);
        println!("triangles: {}", summary.triangle_count);
        if let Some((lo, hi)) = summary.height_range {
            println!("heights:   {:.2} .. {:.2}", lo, hi);
        }
        let (min, max) = (summary.bounds.min(), summary.bounds.max());
        println!(
            "bounds:    ({:.1}, {:.1}, {:.1}) .. ({:.1}, {:.1}, {:.1})",
            min.x, min.y, min.z, max.x, max.y, max.z
        );
        if let Some(plane) = &report.water {
            println!(
                "water:     z = {:.2}, {:.1} x {:.1}",
                plane.location.z, plane.scale.x, plane.scale.y
            );
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("terrain_gen: {}", e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
