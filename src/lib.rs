pub mod cli;
pub mod model;
pub mod parser;
pub mod processor;
pub mod writer;

use anyhow::Context;
use clap::Parser;

use crate::processor::RemapOptions;

pub fn run() -> anyhow::Result<()> {
    let args = cli::Cli::parse();

    // 1. ── Load ───────────────────────────────────────────────────────
    let raw_project = parser::load_project(&args.maps, &args.tilesets)
        .with_context(|| "Loading maps and tilesets")?;

    // 2. ── Process ────────────────────────────────────────────────────
    let options = RemapOptions {
        shared_tileset_pattern: args.shared_tileset,
    };
    let processed =
        processor::run(raw_project, &options).with_context(|| "Remapping tile IDs")?;

    // 3. ── Write outputs ──────────────────────────────────────────────
    std::fs::create_dir_all(&args.output)
        .with_context(|| format!("Creating {}", args.output.display()))?;

    writer::maps::emit(&processed, &args.output, args.compact)
        .with_context(|| "Writing remapped maps")?;
    writer::manifest::emit(&processed, &args.output, &args.manifest, args.compact)
        .with_context(|| "Writing remap manifest")?;

    Ok(())
}
