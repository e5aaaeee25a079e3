//! Tilesets: per-tile renderable mesh prototypes decoded from blobs
//!
//! One tileset exists per (category, id) pair and is owned by the world
//! cell that loaded it. Truncated blobs keep whatever tiles decoded
//! cleanly; the remainder stay zero-initialized air tiles.

use log::warn;

use crate::rasterizer::RasterVertex;
use super::blob::{BlobReader, DecodeError};

pub const TILESET_MAGIC: u32 = 0x53544C47; // "GBTS"
pub const TILESET_VERSION: u16 = 1;

/// One renderable tile prototype. `vertices` empty means an air tile
/// that contributes nothing to rendering.
#[derive(Debug, Clone, Default)]
pub struct TileMesh {
    pub vertices: Vec<RasterVertex>,
    pub indices: Vec<u16>,
    /// Packed 0xAARRGGBB texels, row-major
    pub pixels: Vec<u32>,
    pub texture_width: u16,
    pub texture_height: u16,
}

impl TileMesh {
    pub fn is_air(&self) -> bool {
        self.vertices.is_empty()
    }
}

/// An array of tile prototypes for one tileset category
#[derive(Debug, Clone, Default)]
pub struct Tileset {
    pub tiles: Vec<TileMesh>,
}

impl Tileset {
    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    /// Look up a tile by tileset-relative id; out-of-range ids are
    /// "nothing to draw"
    pub fn tile(&self, id: u16) -> Option<&TileMesh> {
        self.tiles.get(id as usize)
    }

    pub fn decode(data: &[u8]) -> Result<Self, DecodeError> {
        let mut r = BlobReader::new(data);
        r.expect_header(TILESET_MAGIC, TILESET_VERSION)?;
        let tile_count = r.read_u16()?;

        let mut tiles = vec![TileMesh::default(); tile_count as usize];

        for i in 0..tile_count as usize {
            match decode_tile(&mut r) {
                Ok(tile) => tiles[i] = tile,
                Err(DecodeError::Truncated) => {
                    // Keep the tiles decoded so far, drop the rest
                    warn!("tileset truncated at tile {} of {}", i, tile_count);
                    break;
                }
                Err(e) => return Err(e),
            }
        }

        Ok(Self { tiles })
    }
}

fn decode_tile(r: &mut BlobReader) -> Result<TileMesh, DecodeError> {
    let vertex_count = r.read_u32()?;

    if vertex_count == 0 {
        // Air tile: the record still carries index_count and texture
        // dims so the layout stays self-describing
        let index_count = r.read_u32()?;
        let texture_width = r.read_u16()?;
        let texture_height = r.read_u16()?;
        if index_count != 0 {
            warn!("air tile with nonzero index_count {}", index_count);
        }
        return Ok(TileMesh {
            vertices: Vec::new(),
            indices: Vec::new(),
            pixels: Vec::new(),
            texture_width,
            texture_height,
        });
    }

    let mut vertices = Vec::new();
    for _ in 0..vertex_count {
        let x = r.read_f32()?;
        let y = r.read_f32()?;
        let z = r.read_f32()?;
        let u = r.read_f32()?;
        let v = r.read_f32()?;
        vertices.push(RasterVertex::new(x, y, z, u, v));
    }

    let index_count = r.read_u32()?;
    let mut indices = Vec::new();
    for _ in 0..index_count {
        indices.push(r.read_u16()?);
    }

    let texture_width = r.read_u16()?;
    let texture_height = r.read_u16()?;

    let pixel_count = texture_width as usize * texture_height as usize;
    let mut pixels = Vec::new();
    if r.remaining() < pixel_count * 4 {
        // A missing texture payload voids only the texture; the mesh
        // decoded so far stays usable
        warn!("tileset tile texture payload truncated, dropping texture");
    } else {
        for _ in 0..pixel_count {
            pixels.push(r.read_u32()?);
        }
    }

    Ok(TileMesh {
        vertices,
        indices,
        pixels,
        texture_width,
        texture_height,
    })
}
