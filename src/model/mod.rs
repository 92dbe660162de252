use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::processor::catalog::TilesetCatalog;

/// Mask over the transformation-flag bits (flip H / V / D and hex rotation).
pub const FLAG_MASK: u32 = 0xF000_0000;
/// Mask over the global tile ID bits of a raw layer cell.
pub const GID_MASK: u32 = 0x0FFF_FFFF;

/// ─────────────────────────────────────────────────────
/// Map documents
/// ─────────────────────────────────────────────────────

/// A Tiled JSON map.
///
/// Only the fields the remapper touches are typed; everything else is
/// carried in `extra` so the rewritten map round-trips the editor's data.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TiledMap {
    #[serde(default)]
    pub tilesets: Vec<TilesetRef>,
    #[serde(default)]
    pub layers: Vec<Layer>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One row of a map's tileset table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TilesetRef {
    pub firstgid: u32,
    pub source: String,
}

/// A map layer. Object and image layers have no `data`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Layer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<u32>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A map file loaded from disk, named by its file name.
#[derive(Debug, Clone)]
pub struct MapDocument {
    pub name: String,
    pub map: TiledMap,
}

/// ─────────────────────────────────────────────────────
/// Tileset documents
/// ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct TiledTileset {
    #[serde(default)]
    pub tilewidth: u32,
    #[serde(default)]
    pub tileheight: u32,
    #[serde(default)]
    pub tiles: Vec<Tile>,
}

/// Per-tile metadata. Tiles without metadata are not listed at all.
#[derive(Debug, Clone, Deserialize)]
pub struct Tile {
    pub id: u32,
    #[serde(default)]
    pub animation: Vec<Frame>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Frame {
    /// Local tile index inside the same tileset.
    pub tileid: u32,
    #[serde(default)]
    pub duration: u32,
}

/// Tilesets with the same tile size share one key, e.g. `16x16`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct GeometryKey(String);

impl GeometryKey {
    pub fn new(tile_width: u32, tile_height: u32) -> Self {
        Self(format!("{tile_width}x{tile_height}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GeometryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// ─────────────────────────────────────────────────────
/// Pipeline stages
/// ─────────────────────────────────────────────────────

/// Everything the loader hands to the processor.
#[derive(Debug)]
pub struct RawProject {
    pub tilesets: Vec<TilesetCatalog>,
    pub maps: Vec<MapDocument>,
}

/// Fully processed output handed to `writer`.
#[derive(Debug)]
pub struct ProcessedProject {
    pub maps: Vec<MapDocument>,
    pub manifest: Manifest,
}

/// Unified numbering of every geometry class, in unified-index order.
#[derive(Debug, Clone, Serialize)]
pub struct Manifest {
    pub geometries: Vec<ManifestGeometry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ManifestGeometry {
    pub key: GeometryKey,
    pub tile_count: u32,
    pub shared_tileset: String,
    pub tiles: Vec<ManifestTile>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ManifestTile {
    pub unified: u32,
    pub source: String,
    pub local: u32,
}
