//! Asset library: the blob registry the streaming loaders draw from
//!
//! Per category, an array of blobs indexed by integer id. An
//! out-of-range id or a blob that fails to decode both degrade to
//! "asset absent" - cells render whatever did load.

use log::warn;

use super::collision::CollisionMap;
use super::geometry::GeometryMap;
use super::tileset::Tileset;

/// Tileset categories selected by the top bits of a tile reference
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TilesetCategory {
    Regional,
    Local,
    Interior,
}

/// All blob tables for one packed world
#[derive(Debug, Clone, Default)]
pub struct AssetLibrary {
    pub world_matrix: Vec<u8>,
    pub world_headers: Vec<u8>,
    pub geometry: Vec<Vec<u8>>,
    pub collision: Vec<Vec<u8>>,
    pub regional_tilesets: Vec<Vec<u8>>,
    pub local_tilesets: Vec<Vec<u8>>,
    pub interior_tilesets: Vec<Vec<u8>>,
}

impl AssetLibrary {
    pub fn load_geometry(&self, id: u16) -> Option<GeometryMap> {
        let blob = self.geometry.get(id as usize)?;
        match GeometryMap::decode(blob) {
            Ok(map) => Some(map),
            Err(e) => {
                warn!("geometry {} failed to decode: {}", id, e);
                None
            }
        }
    }

    pub fn load_collision(&self, id: u16) -> Option<CollisionMap> {
        let blob = self.collision.get(id as usize)?;
        match CollisionMap::decode(blob) {
            Ok(map) => Some(map),
            Err(e) => {
                warn!("collision {} failed to decode: {}", id, e);
                None
            }
        }
    }

    pub fn load_tileset(&self, category: TilesetCategory, id: u16) -> Option<Tileset> {
        let table = match category {
            TilesetCategory::Regional => &self.regional_tilesets,
            TilesetCategory::Local => &self.local_tilesets,
            TilesetCategory::Interior => &self.interior_tilesets,
        };
        let blob = table.get(id as usize)?;
        match Tileset::decode(blob) {
            Ok(ts) => Some(ts),
            Err(e) => {
                warn!("{:?} tileset {} failed to decode: {}", category, id, e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::sample::{self, SampleTile};

    #[test]
    fn test_out_of_range_ids_yield_none() {
        let lib = AssetLibrary::default();
        assert!(lib.load_geometry(0).is_none());
        assert!(lib.load_collision(5).is_none());
        assert!(lib.load_tileset(TilesetCategory::Regional, 0).is_none());
    }

    #[test]
    fn test_decode_failure_yields_none() {
        let lib = AssetLibrary {
            geometry: vec![vec![0xDE, 0xAD, 0xBE, 0xEF]],
            ..Default::default()
        };
        assert!(lib.load_geometry(0).is_none());
    }

    #[test]
    fn test_category_tables_are_independent() {
        let lib = AssetLibrary {
            regional_tilesets: vec![sample::tileset_blob(&[SampleTile::air()])],
            ..Default::default()
        };
        assert!(lib.load_tileset(TilesetCategory::Regional, 0).is_some());
        assert!(lib.load_tileset(TilesetCategory::Local, 0).is_none());
        assert!(lib.load_tileset(TilesetCategory::Interior, 0).is_none());
    }
}
