//! Collision maps: signed-byte volumes parallel to the geometry maps

use super::blob::{BlobReader, DecodeError};
use super::geometry::{MAP_HEIGHT, MAP_LAYERS, MAP_WIDTH};

pub const COLLISION_MAGIC: u32 = 0x434D4247; // "GBMC"
pub const COLLISION_VERSION: u16 = 1;

/// Dense collision volume, indexed like the geometry map:
/// `tiles[layer][y][x]`.
pub struct CollisionMap {
    pub tiles: Box<[[[i8; MAP_WIDTH]; MAP_HEIGHT]; MAP_LAYERS]>,
}

impl CollisionMap {
    pub fn decode(data: &[u8]) -> Result<Self, DecodeError> {
        let mut r = BlobReader::new(data);
        r.expect_header(COLLISION_MAGIC, COLLISION_VERSION)?;

        let mut tiles = Box::new([[[0i8; MAP_WIDTH]; MAP_HEIGHT]; MAP_LAYERS]);
        for layer in 0..MAP_LAYERS {
            for y in 0..MAP_HEIGHT {
                for x in 0..MAP_WIDTH {
                    tiles[layer][y][x] = r.read_i8()?;
                }
            }
        }

        Ok(Self { tiles })
    }
}
