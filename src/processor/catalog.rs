//! Loaded tileset documents, keyed by source identifier.

use std::collections::HashMap;

use crate::model::{GeometryKey, Tile, TiledTileset};
use crate::processor::error::RemapError;

#[derive(Debug, Clone)]
pub struct TilesetCatalog {
    source: String,
    key: GeometryKey,
    tileset: TiledTileset,
}

impl TilesetCatalog {
    pub fn new(source: &str, tileset: TiledTileset) -> Self {
        Self {
            source: source.to_string(),
            key: GeometryKey::new(tileset.tilewidth, tileset.tileheight),
            tileset,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn geometry_key(&self) -> &GeometryKey {
        &self.key
    }

    /// Metadata for local tile `local`, if the tileset declares any.
    pub fn find_tile(&self, local: u32) -> Option<&Tile> {
        self.tileset.tiles.iter().find(|t| t.id == local)
    }
}

/// Every tileset of the batch.
#[derive(Debug, Default)]
pub struct Catalogs {
    by_source: HashMap<String, TilesetCatalog>,
}

impl Catalogs {
    pub fn new(tilesets: Vec<TilesetCatalog>) -> Result<Self, RemapError> {
        let mut by_source = HashMap::with_capacity(tilesets.len());
        for catalog in tilesets {
            let source = catalog.source.clone();
            if by_source.insert(source.clone(), catalog).is_some() {
                return Err(RemapError::DuplicateTileset { tileset: source });
            }
        }
        Ok(Self { by_source })
    }

    pub fn get(&self, source: &str) -> Option<&TilesetCatalog> {
        self.by_source.get(source)
    }

    pub fn len(&self) -> usize {
        self.by_source.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_source.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Frame;

    fn tileset(w: u32, h: u32, tiles: Vec<Tile>) -> TiledTileset {
        TiledTileset {
            tilewidth: w,
            tileheight: h,
            tiles,
        }
    }

    #[test]
    fn test_find_tile_by_declared_id() {
        let tiles = vec![
            Tile {
                id: 3,
                animation: vec![],
            },
            Tile {
                id: 1,
                animation: vec![Frame {
                    tileid: 7,
                    duration: 100,
                }],
            },
        ];
        let catalog = TilesetCatalog::new("water.json", tileset(16, 16, tiles));

        assert_eq!(catalog.geometry_key().as_str(), "16x16");
        let tile = catalog.find_tile(1).expect("tile 1 declared");
        assert_eq!(tile.animation[0].tileid, 7);
        assert!(catalog.find_tile(0).is_none());
    }

    #[test]
    fn test_duplicate_source_rejected() {
        let a = TilesetCatalog::new("a.json", tileset(8, 8, vec![]));
        let b = TilesetCatalog::new("a.json", tileset(16, 16, vec![]));

        let err = Catalogs::new(vec![a, b]).unwrap_err();
        assert!(matches!(err, RemapError::DuplicateTileset { .. }));
    }
}
