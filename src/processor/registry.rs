//! The unified tile space.
//!
//! [`RemapRegistry`] collects every `(source, local)` pair seen across the
//! batch, bucketed by geometry class. [`RemapRegistry::finalize`] freezes it
//! into a [`FinalizedRegistry`] that hands out dense unified indices; once
//! frozen nothing can be ingested any more.

use std::collections::HashMap;

use log::debug;

use crate::model::{GeometryKey, Manifest, ManifestGeometry, ManifestTile, MapDocument};
use crate::processor::RemapOptions;
use crate::processor::catalog::{Catalogs, TilesetCatalog};
use crate::processor::error::RemapError;
use crate::processor::ordered::OrderedMap;
use crate::processor::resolve::decode_flags;

/// source → local indices, both in first-seen order.
type SourceBuckets = OrderedMap<String, OrderedMap<u32, ()>>;

#[derive(Debug)]
pub struct RemapRegistry {
    catalogs: Catalogs,
    geometries: OrderedMap<GeometryKey, SourceBuckets>,
}

impl RemapRegistry {
    pub fn new(catalogs: Catalogs) -> Self {
        Self {
            catalogs,
            geometries: OrderedMap::new(),
        }
    }

    /// Register the tile behind `raw`, plus every frame of its animation.
    pub fn ingest(&mut self, map: &MapDocument, raw: u32) -> Result<(), RemapError> {
        let (source, local) = map.resolve_source_and_local(raw)?;
        let catalog = lookup(&self.catalogs, map, source)?;

        let tiles = self
            .geometries
            .get_or_insert_with(catalog.geometry_key(), OrderedMap::new)
            .get_or_insert_with(&source.to_string(), OrderedMap::new);

        tiles.insert_if_absent(local, ());
        if let Some(tile) = catalog.find_tile(local) {
            for frame in &tile.animation {
                tiles.insert_if_absent(frame.tileid, ());
            }
        }
        Ok(())
    }

    /// Ingest every painted cell of `map`.
    pub fn ingest_map(&mut self, map: &MapDocument) -> Result<(), RemapError> {
        for raw in map.painted_cells() {
            self.ingest(map, raw)?;
        }
        Ok(())
    }

    /// Number every ingested tile, per geometry class, from 0 in first-seen
    /// order: sources in the order they appeared, locals likewise.
    pub fn finalize(self) -> FinalizedRegistry {
        let mut geometries = OrderedMap::new();

        for (key, sources) in self.geometries {
            let mut unified = UnifiedGeometry::default();
            for (source, locals) in sources {
                let slots = unified.index.entry(source.clone()).or_default();
                for &local in locals.keys() {
                    slots.insert(local, unified.tiles.len() as u32);
                    unified.tiles.push((source.clone(), local));
                }
            }
            debug!("{key}: {} unified tiles", unified.tile_count());
            geometries.insert_if_absent(key, unified);
        }

        FinalizedRegistry {
            catalogs: self.catalogs,
            geometries,
        }
    }
}

fn lookup<'a>(
    catalogs: &'a Catalogs,
    map: &MapDocument,
    source: &str,
) -> Result<&'a TilesetCatalog, RemapError> {
    catalogs.get(source).ok_or_else(|| RemapError::UnknownTileset {
        map: map.name.clone(),
        tileset: source.to_string(),
    })
}

#[derive(Debug, Default)]
struct UnifiedGeometry {
    /// `(source, local)` by unified index.
    tiles: Vec<(String, u32)>,
    index: HashMap<String, HashMap<u32, u32>>,
}

impl UnifiedGeometry {
    fn tile_count(&self) -> u32 {
        self.tiles.len() as u32
    }
}

/// Read-only view of the unified numbering.
#[derive(Debug)]
pub struct FinalizedRegistry {
    catalogs: Catalogs,
    geometries: OrderedMap<GeometryKey, UnifiedGeometry>,
}

impl FinalizedRegistry {
    pub(crate) fn catalog(
        &self,
        map: &MapDocument,
        source: &str,
    ) -> Result<&TilesetCatalog, RemapError> {
        lookup(&self.catalogs, map, source)
    }

    /// Total unified tiles of a geometry class; 0 for a class never seen.
    pub fn tile_count(&self, key: &GeometryKey) -> u32 {
        self.geometries.get(key).map_or(0, UnifiedGeometry::tile_count)
    }

    pub fn unified_index(&self, key: &GeometryKey, source: &str, local: u32) -> Option<u32> {
        self.geometries
            .get(key)?
            .index
            .get(source)?
            .get(&local)
            .copied()
    }

    /// `first_gid + unified index`, with the flags of `raw` put back.
    pub fn remapped_id(
        &self,
        key: &GeometryKey,
        source: &str,
        first_gid: u32,
        raw: u32,
        local: u32,
    ) -> Result<u32, RemapError> {
        let unified = self
            .unified_index(key, source, local)
            .ok_or_else(|| RemapError::RemapLookup {
                key: key.clone(),
                tileset: source.to_string(),
                local,
            })?;
        Ok((first_gid + unified) | decode_flags(raw))
    }

    pub fn geometry_keys(&self) -> impl Iterator<Item = &GeometryKey> {
        self.geometries.keys()
    }

    /// The numbering of every geometry class, for whoever builds the atlases.
    pub fn manifest(&self, options: &RemapOptions) -> Manifest {
        let geometries = self
            .geometries
            .iter()
            .map(|(key, unified)| ManifestGeometry {
                key: key.clone(),
                tile_count: unified.tile_count(),
                shared_tileset: options.shared_tileset_path(key),
                tiles: unified
                    .tiles
                    .iter()
                    .enumerate()
                    .map(|(i, (source, local))| ManifestTile {
                        unified: i as u32,
                        source: source.clone(),
                        local: *local,
                    })
                    .collect(),
            })
            .collect();
        Manifest { geometries }
    }
}
