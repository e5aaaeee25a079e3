//! Geometry maps: dense 32x32x32 volumes of packed tile references

use super::blob::{BlobReader, DecodeError};

pub const GEOMETRY_MAGIC: u32 = 0x474D4247; // "GBMG"
pub const GEOMETRY_VERSION: u16 = 1;

pub const MAP_WIDTH: usize = 32;
pub const MAP_HEIGHT: usize = 32;
pub const MAP_LAYERS: usize = 32;

/// Packed tile reference: top 2 bits select the tileset category
/// (0 regional, 1 local, 2 interior, 3 reserved), low 14 bits are the
/// tile index within that tileset.
///
/// Pure bit extraction, no validation. Callers check the extracted id
/// against the target tileset's tile count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TileRef {
    pub packed: u16,
}

impl TileRef {
    pub fn pack(tileset: u8, id: u16) -> Self {
        Self { packed: ((tileset as u16) << 14) | (id & 0x3FFF) }
    }

    pub fn tileset(self) -> u8 {
        ((self.packed >> 14) & 0x3) as u8
    }

    pub fn id(self) -> u16 {
        self.packed & 0x3FFF
    }
}

/// Dense tile-reference volume, indexed `tiles[layer][y][x]`.
/// The layer axis maps to world Y (height), the y axis to world Z.
pub struct GeometryMap {
    pub tiles: Box<[[[TileRef; MAP_WIDTH]; MAP_HEIGHT]; MAP_LAYERS]>,
}

impl GeometryMap {
    pub fn decode(data: &[u8]) -> Result<Self, DecodeError> {
        let mut r = BlobReader::new(data);
        r.expect_header(GEOMETRY_MAGIC, GEOMETRY_VERSION)?;

        let mut tiles = Box::new([[[TileRef::default(); MAP_WIDTH]; MAP_HEIGHT]; MAP_LAYERS]);
        for layer in 0..MAP_LAYERS {
            for y in 0..MAP_HEIGHT {
                for x in 0..MAP_WIDTH {
                    tiles[layer][y][x] = TileRef { packed: r.read_u16()? };
                }
            }
        }

        Ok(Self { tiles })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::sample;

    #[test]
    fn test_tile_ref_round_trip() {
        for tileset in 0..3u8 {
            for id in [0u16, 1, 0x1234, 0x3FFE] {
                let r = TileRef::pack(tileset, id);
                assert_eq!(r.tileset(), tileset);
                assert_eq!(r.id(), id);
            }
        }
    }

    #[test]
    fn test_tile_ref_ranges() {
        for packed in [0u16, 0x3FFF, 0x4000, 0x8000, 0xC000, 0xFFFF] {
            let r = TileRef { packed };
            assert!(r.tileset() <= 3);
            assert!(r.id() <= 0x3FFF);
        }
    }

    #[test]
    fn test_decode_round_trip() {
        let blob = sample::geometry_blob(|layer, y, x| {
            if layer == 0 && y == 3 && x == 7 {
                TileRef::pack(1, 42)
            } else {
                TileRef::default()
            }
        });

        let map = GeometryMap::decode(&blob).unwrap();
        assert_eq!(map.tiles[0][3][7], TileRef::pack(1, 42));
        assert_eq!(map.tiles[0][0][0], TileRef::default());
        assert_eq!(map.tiles[31][31][31], TileRef::default());
    }

    #[test]
    fn test_decode_bad_magic() {
        let mut blob = sample::geometry_blob(|_, _, _| TileRef::default());
        blob[0] ^= 0xFF;
        assert!(matches!(
            GeometryMap::decode(&blob),
            Err(DecodeError::BadMagic { .. })
        ));
    }

    #[test]
    fn test_decode_bad_version() {
        let mut blob = sample::geometry_blob(|_, _, _| TileRef::default());
        blob[4] = 99;
        assert!(matches!(
            GeometryMap::decode(&blob),
            Err(DecodeError::BadVersion { .. })
        ));
    }

    #[test]
    fn test_decode_truncated() {
        let blob = sample::geometry_blob(|_, _, _| TileRef::default());
        assert!(matches!(
            GeometryMap::decode(&blob[..blob.len() - 1]),
            Err(DecodeError::Truncated)
        ));
    }
}
