//! Loading of map and tileset documents from disk.
//!
//! Everything here is decoded straight into the typed records of
//! [`crate::model`]; the processor never sees a dynamic JSON tree.

use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use log::{debug, info};
use thiserror::Error;

use crate::model::{MapDocument, RawProject, TiledMap, TiledTileset};
use crate::processor::catalog::TilesetCatalog;
use crate::processor::source_identifier;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("invalid document in {}: {source}", path.display())]
    Malformed {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("reading {}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },
}

fn read(path: &Path) -> Result<String, LoadError> {
    std::fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => LoadError::NotFound {
            path: path.to_path_buf(),
        },
        _ => LoadError::Io {
            path: path.to_path_buf(),
            source: e,
        },
    })
}

fn malformed(path: &Path, source: serde_json::Error) -> LoadError {
    LoadError::Malformed {
        path: path.to_path_buf(),
        source,
    }
}

/// Parse a map document; `name` is the file name it will be written back as.
pub fn map_from_json(name: &str, json: &str) -> serde_json::Result<MapDocument> {
    let map: TiledMap = serde_json::from_str(json)?;
    Ok(MapDocument {
        name: name.to_string(),
        map,
    })
}

/// Parse a tileset document; `path` only feeds the source identifier.
pub fn tileset_from_json(path: &str, json: &str) -> serde_json::Result<TilesetCatalog> {
    let tileset: TiledTileset = serde_json::from_str(json)?;
    Ok(TilesetCatalog::new(source_identifier(path), tileset))
}

pub fn load_map(path: &Path) -> Result<MapDocument, LoadError> {
    let json = read(path)?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    map_from_json(&name, &json).map_err(|e| malformed(path, e))
}

pub fn load_tileset(path: &Path) -> Result<TilesetCatalog, LoadError> {
    let json = read(path)?;
    tileset_from_json(&path.to_string_lossy(), &json).map_err(|e| malformed(path, e))
}

/// Every `*.json` file directly inside `dir`, sorted by path.
///
/// The sort fixes the ingestion order, which in turn fixes the unified
/// numbering, so repeated runs over the same tree produce the same output.
pub fn discover(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(anyhow!("{} is not a directory", dir.display()));
    }
    let pattern = dir.join("*.json");
    let pattern = pattern.to_string_lossy();

    let mut paths = glob::glob(&pattern)
        .with_context(|| format!("Bad glob pattern {pattern}"))?
        .collect::<Result<Vec<_>, _>>()
        .with_context(|| format!("Listing {}", dir.display()))?;
    paths.sort();

    debug!("{} matched {} files", pattern, paths.len());
    Ok(paths)
}

/// Load every tileset and map found in the two directories.
pub fn load_project(maps_dir: &Path, tilesets_dir: &Path) -> Result<RawProject> {
    let tilesets = discover(tilesets_dir)?
        .iter()
        .map(|p| load_tileset(p))
        .collect::<Result<Vec<_>, _>>()?;
    info!(
        "Loaded {} tilesets from {}",
        tilesets.len(),
        tilesets_dir.display()
    );

    let maps = discover(maps_dir)?
        .iter()
        .map(|p| load_map(p))
        .collect::<Result<Vec<_>, _>>()?;
    info!("Loaded {} maps from {}", maps.len(), maps_dir.display());

    Ok(RawProject { tilesets, maps })
}
