//! Per-map rewrite against a frozen registry.

use log::debug;

use crate::model::{GeometryKey, MapDocument, TilesetRef};
use crate::processor::RemapOptions;
use crate::processor::error::RemapError;
use crate::processor::ordered::OrderedMap;
use crate::processor::registry::FinalizedRegistry;

/// First GID of every geometry class one map uses, in first-use order.
///
/// Ranges are packed from 1 with no gaps: each class starts where the
/// previous one's unified tile count ends.
#[derive(Debug, Clone, Default)]
pub struct FirstGidTable {
    first_gids: OrderedMap<GeometryKey, u32>,
}

impl FirstGidTable {
    pub fn get(&self, key: &GeometryKey) -> Option<u32> {
        self.first_gids.get(key).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&GeometryKey, u32)> {
        self.first_gids.iter().map(|(k, &gid)| (k, gid))
    }

    pub fn len(&self) -> usize {
        self.first_gids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.first_gids.is_empty()
    }
}

impl FinalizedRegistry {
    /// Geometry classes `map` paints with, in first-encounter order.
    pub fn geometries_in_use(&self, map: &MapDocument) -> Result<Vec<GeometryKey>, RemapError> {
        let mut in_use = OrderedMap::new();
        for raw in map.painted_cells() {
            let (source, _) = map.resolve_source_and_local(raw)?;
            let catalog = self.catalog(map, source)?;
            in_use.insert_if_absent(catalog.geometry_key().clone(), ());
        }
        Ok(in_use.into_iter().map(|(key, ())| key).collect())
    }

    pub fn first_gids(&self, keys: &[GeometryKey]) -> FirstGidTable {
        let mut table = FirstGidTable::default();
        let mut next_gid = 1;
        for key in keys {
            if table.first_gids.insert_if_absent(key.clone(), next_gid) {
                next_gid += self.tile_count(key);
            }
        }
        table
    }

    /// Rewrite every painted cell of `map` into the unified space and replace
    /// its tileset table with one shared tileset per geometry class.
    ///
    /// The map is only touched once every cell has been remapped.
    pub fn rewrite_map(
        &self,
        map: &mut MapDocument,
        options: &RemapOptions,
    ) -> Result<FirstGidTable, RemapError> {
        let in_use = self.geometries_in_use(map)?;
        let table = self.first_gids(&in_use);

        let layers = self.remap_layers(map, &table)?;

        for (layer, data) in map.map.layers.iter_mut().zip(layers) {
            if data.is_some() {
                layer.data = data;
            }
        }
        map.map.tilesets = table
            .iter()
            .map(|(key, firstgid)| TilesetRef {
                firstgid,
                source: options.shared_tileset_path(key),
            })
            .collect();

        debug!(
            "{}: {}",
            map.name,
            table
                .iter()
                .map(|(key, gid)| format!("{key}@{gid}"))
                .collect::<Vec<_>>()
                .join(", ")
        );
        Ok(table)
    }

    fn remap_layers(
        &self,
        map: &MapDocument,
        table: &FirstGidTable,
    ) -> Result<Vec<Option<Vec<u32>>>, RemapError> {
        let mut layers = Vec::with_capacity(map.map.layers.len());
        for layer in &map.map.layers {
            let Some(data) = &layer.data else {
                layers.push(None);
                continue;
            };
            let remapped = data
                .iter()
                .map(|&raw| self.rewrite_cell(map, table, raw))
                .collect::<Result<Vec<_>, _>>()?;
            layers.push(Some(remapped));
        }
        Ok(layers)
    }

    fn rewrite_cell(
        &self,
        map: &MapDocument,
        table: &FirstGidTable,
        raw: u32,
    ) -> Result<u32, RemapError> {
        if raw == 0 {
            return Ok(0);
        }
        let (source, local) = map.resolve_source_and_local(raw)?;
        let key = self.catalog(map, source)?.geometry_key();
        let first_gid = table.get(key).ok_or_else(|| RemapError::RemapLookup {
            key: key.clone(),
            tileset: source.to_string(),
            local,
        })?;
        self.remapped_id(key, source, first_gid, raw, local)
    }
}
