use thiserror::Error;

use crate::model::GeometryKey;

/// Failures of the remapping pipeline. All of them abort the batch.
#[derive(Debug, Error)]
pub enum RemapError {
    /// A cell points into a tileset that was never loaded.
    #[error("map {map}: tileset {tileset} not found among the loaded tilesets")]
    UnknownTileset { map: String, tileset: String },

    /// A global ID lies below every `firstgid` in the map's tileset table.
    #[error("map {map}: global tile ID {global_id} is not covered by any tileset")]
    UnresolvedTilesetRange { map: String, global_id: u32 },

    /// Rewrite asked for a tile that ingestion never saw.
    #[error("no remapped ID for {key}, {tileset}, local tile {local}")]
    RemapLookup {
        key: GeometryKey,
        tileset: String,
        local: u32,
    },

    #[error("two tileset files share the name {tileset}")]
    DuplicateTileset { tileset: String },
}
