use clap::Parser;
use std::path::PathBuf;

use crate::processor::DEFAULT_SHARED_TILESET;
use crate::writer::manifest::DEFAULT_MANIFEST;

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Directory of map .json files
    pub maps: PathBuf,
    /// Directory of tileset .json files
    pub tilesets: PathBuf,
    /// Output directory
    pub output: PathBuf,
    /// Shared tileset path written into every map; `{key}` becomes e.g. 16x16
    #[arg(long, default_value = DEFAULT_SHARED_TILESET)]
    pub shared_tileset: String,
    /// File name of the remap manifest inside the output directory
    #[arg(long, default_value = DEFAULT_MANIFEST)]
    pub manifest: String,
    /// Write compact JSON instead of pretty-printing
    #[arg(long)]
    pub compact: bool,
}
