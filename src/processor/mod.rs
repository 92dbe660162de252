//! The functional core: merge every map's tile IDs into one space per
//! tile size.
pub mod catalog;
pub mod error;
pub mod ordered;
pub mod registry;
pub mod resolve;
pub mod rewrite;

use std::path::Path;

use log::{info, warn};

use crate::model::{GeometryKey, ProcessedProject, RawProject};
use catalog::Catalogs;
use error::RemapError;
use registry::RemapRegistry;

pub const DEFAULT_SHARED_TILESET: &str = "./data/tilesets/merged-{key}.json";

#[derive(Debug, Clone)]
pub struct RemapOptions {
    /// Path written into every rewritten map's tileset table; `{key}` is
    /// replaced by the geometry key, e.g. `16x16`.
    pub shared_tileset_pattern: String,
}

impl Default for RemapOptions {
    fn default() -> Self {
        Self {
            shared_tileset_pattern: DEFAULT_SHARED_TILESET.to_string(),
        }
    }
}

impl RemapOptions {
    pub fn shared_tileset_path(&self, key: &GeometryKey) -> String {
        self.shared_tileset_pattern.replace("{key}", key.as_str())
    }
}

/// File name component of a tileset path; tilesets are matched by it.
pub fn source_identifier(path: &str) -> &str {
    Path::new(path)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(path)
}

/// Ingest every map, freeze the numbering, then rewrite every map.
pub fn run(raw: RawProject, options: &RemapOptions) -> Result<ProcessedProject, RemapError> {
    let mut registry = RemapRegistry::new(Catalogs::new(raw.tilesets)?);

    // 1. ── Ingest ─────────────────────────────────────────────────────
    for map in &raw.maps {
        if map.painted_cells().next().is_none() {
            warn!("{} has no painted tiles", map.name);
        }
        registry.ingest_map(map)?;
    }

    // 2. ── Finalize ───────────────────────────────────────────────────
    let registry = registry.finalize();
    for key in registry.geometry_keys() {
        info!("{key}: {} tiles after merge", registry.tile_count(key));
    }

    // 3. ── Rewrite ────────────────────────────────────────────────────
    let mut maps = raw.maps;
    for map in &mut maps {
        let table = registry.rewrite_map(map, options)?;
        info!("Remapped {} ({} shared tilesets)", map.name, table.len());
    }

    Ok(ProcessedProject {
        manifest: registry.manifest(options),
        maps,
    })
}
