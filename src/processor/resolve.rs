//! Raw layer cell → owning tileset and local tile index.

use crate::model::{FLAG_MASK, GID_MASK, MapDocument};
use crate::processor::error::RemapError;
use crate::processor::source_identifier;

/// Strip the transformation flags off a raw cell.
#[inline]
pub fn decode_global_id(raw: u32) -> u32 {
    raw & GID_MASK
}

/// Only the transformation flags of a raw cell.
#[inline]
pub fn decode_flags(raw: u32) -> u32 {
    raw & FLAG_MASK
}

impl MapDocument {
    /// `firstgid` and source identifier of the tileset owning `global_id`:
    /// the last table entry whose `firstgid` is not above it.
    pub fn resolve_tileset(&self, global_id: u32) -> Result<(u32, &str), RemapError> {
        let mut owner = None;
        for tileset in &self.map.tilesets {
            if tileset.firstgid > global_id {
                break;
            }
            owner = Some(tileset);
        }

        owner
            .map(|t| (t.firstgid, source_identifier(&t.source)))
            .ok_or_else(|| RemapError::UnresolvedTilesetRange {
                map: self.name.clone(),
                global_id,
            })
    }

    pub fn resolve_source_and_local(&self, raw: u32) -> Result<(&str, u32), RemapError> {
        let global_id = decode_global_id(raw);
        let (first_gid, source) = self.resolve_tileset(global_id)?;
        Ok((source, global_id - first_gid))
    }

    /// Every non-zero cell of every tile layer, layer order then cell order.
    pub fn painted_cells(&self) -> impl Iterator<Item = u32> + '_ {
        self.map
            .layers
            .iter()
            .filter_map(|layer| layer.data.as_deref())
            .flatten()
            .copied()
            .filter(|&raw| raw != 0)
    }
}
