//! delve: generate a dungeon and print it
//!
//! Prints an ASCII map by default, or the full generated structure as
//! JSON with `--json`.

mod render;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use log::LevelFilter;

use delve_core::analysis::{check_invariants, is_connected};
use delve_core::{Dungeon, DungeonRng, GeneratorConfig};

/// Seeded room-and-corridor dungeon generator
#[derive(Parser, Debug)]
#[command(name = "delve")]
#[command(author, version, about = "Generate a seeded room-and-corridor dungeon", long_about = None)]
struct Args {
    /// Generator seed; drawn at random and printed when omitted
    #[arg(short, long)]
    seed: Option<u64>,

    /// JSON file with generator settings; missing fields use defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of seed points to sample
    #[arg(short, long)]
    points: Option<usize>,

    /// Grid side length in tiles
    #[arg(long)]
    size: Option<usize>,

    /// Print the generated dungeon as JSON instead of a map
    #[arg(long)]
    json: bool,

    /// Print counts and connectivity after the map
    #[arg(long)]
    summary: bool,

    /// More logging (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => GeneratorConfig::default(),
    };
    if let Some(points) = args.points {
        config.point_count = points;
    }
    if let Some(size) = args.size {
        config.dungeon_size = size;
    }

    let seed = match args.seed {
        Some(seed) => seed,
        None => {
            let seed = DungeonRng::from_entropy().seed();
            eprintln!("seed: {seed}");
            seed
        }
    };

    let dungeon = Dungeon::generate(&config, seed)
        .with_context(|| format!("failed to generate dungeon with seed {seed}"))?;

    if args.json {
        let json = serde_json::to_string_pretty(&dungeon).context("failed to encode dungeon")?;
        println!("{json}");
        return Ok(());
    }

    print!("{}", render::render_ascii(dungeon.grid()));
    if args.summary {
        println!("{}", render::render_summary(&dungeon));
        println!("connected:  {}", is_connected(&dungeon));
        if let Err(problem) = check_invariants(&dungeon) {
            log::warn!("invariant violated: {problem}");
        }
    }
    Ok(())
}

fn load_config(path: &Path) -> Result<GeneratorConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let config = serde_json::from_str(&text)
        .with_context(|| format!("failed to parse config {}", path.display()))?;
    log::debug!("loaded config from {}", path.display());
    Ok(config)
}
