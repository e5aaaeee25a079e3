//! Sample asset blobs
//!
//! Hand-built binary blobs in the packed world formats, used by the
//! demo binary and the tests. The real asset pipeline lives outside
//! this crate; these builders are the minimal in-crate stand-in.

use crate::rasterizer::RasterVertex;
use super::geometry::{TileRef, MAP_HEIGHT, MAP_LAYERS, MAP_WIDTH};
use super::geometry::{GEOMETRY_MAGIC, GEOMETRY_VERSION};
use super::collision::{COLLISION_MAGIC, COLLISION_VERSION};
use super::headers::{WorldHeader, HEADERS_MAGIC, HEADERS_VERSION};
use super::library::AssetLibrary;
use super::matrix::{MATRIX_MAGIC, MATRIX_VERSION};
use super::tileset::{TILESET_MAGIC, TILESET_VERSION};

fn push_u16(out: &mut Vec<u8>, v: u16) {
    out.extend_from_slice(&v.to_le_bytes());
}

fn push_u32(out: &mut Vec<u8>, v: u32) {
    out.extend_from_slice(&v.to_le_bytes());
}

fn push_f32(out: &mut Vec<u8>, v: f32) {
    out.extend_from_slice(&v.to_le_bytes());
}

fn push_header(out: &mut Vec<u8>, magic: u32, version: u16) {
    push_u32(out, magic);
    push_u16(out, version);
}

/// Build a geometry blob from a per-voxel tile reference function
pub fn geometry_blob(f: impl Fn(usize, usize, usize) -> TileRef) -> Vec<u8> {
    let mut out = Vec::new();
    push_header(&mut out, GEOMETRY_MAGIC, GEOMETRY_VERSION);
    for layer in 0..MAP_LAYERS {
        for y in 0..MAP_HEIGHT {
            for x in 0..MAP_WIDTH {
                push_u16(&mut out, f(layer, y, x).packed);
            }
        }
    }
    out
}

/// Build a collision blob from a per-voxel value function
pub fn collision_blob(f: impl Fn(usize, usize, usize) -> i8) -> Vec<u8> {
    let mut out = Vec::new();
    push_header(&mut out, COLLISION_MAGIC, COLLISION_VERSION);
    for layer in 0..MAP_LAYERS {
        for y in 0..MAP_HEIGHT {
            for x in 0..MAP_WIDTH {
                out.push(f(layer, y, x) as u8);
            }
        }
    }
    out
}

/// Build a world matrix blob
pub fn matrix_blob(width: u16, height: u16, cells: &[u16]) -> Vec<u8> {
    assert_eq!(cells.len(), width as usize * height as usize);
    let mut out = Vec::new();
    push_header(&mut out, MATRIX_MAGIC, MATRIX_VERSION);
    push_u16(&mut out, width);
    push_u16(&mut out, height);
    for &c in cells {
        push_u16(&mut out, c);
    }
    out
}

/// Build a world headers blob
pub fn headers_blob(headers: &[WorldHeader]) -> Vec<u8> {
    let mut out = Vec::new();
    push_header(&mut out, HEADERS_MAGIC, HEADERS_VERSION);
    push_u16(&mut out, headers.len() as u16);
    for h in headers {
        push_u16(&mut out, h.header_id);
        out.extend_from_slice(&h.vertical_offset.to_le_bytes());
        push_u16(&mut out, h.geometry_id);
        push_u16(&mut out, h.collision_id);
        push_u16(&mut out, h.regional_tileset_id);
        push_u16(&mut out, h.local_tileset_id);
        push_u16(&mut out, h.interior_tileset_id);
        push_u16(&mut out, 0); // reserved
    }
    out
}

/// One tile record for `tileset_blob`
#[derive(Debug, Clone, Default)]
pub struct SampleTile {
    pub vertices: Vec<RasterVertex>,
    pub indices: Vec<u16>,
    pub pixels: Vec<u32>,
    pub texture_width: u16,
    pub texture_height: u16,
}

impl SampleTile {
    /// Air tile: renders as nothing
    pub fn air() -> Self {
        Self::default()
    }

    /// Unit floor quad at layer height 0 with a single-texel texture.
    /// Winding gives a +Y face normal.
    pub fn quad(texel: u32) -> Self {
        Self {
            vertices: vec![
                RasterVertex::new(0.0, 0.0, 0.0, 0.0, 0.0),
                RasterVertex::new(1.0, 0.0, 0.0, 1.0, 0.0),
                RasterVertex::new(1.0, 0.0, 1.0, 1.0, 1.0),
                RasterVertex::new(0.0, 0.0, 1.0, 0.0, 1.0),
            ],
            indices: vec![0, 2, 1, 0, 3, 2],
            pixels: vec![texel],
            texture_width: 1,
            texture_height: 1,
        }
    }

    /// Floor quad with an 8x8 checkerboard texture
    pub fn checker_quad(texel_a: u32, texel_b: u32) -> Self {
        let mut tile = Self::quad(0);
        let mut pixels = Vec::with_capacity(64);
        for y in 0..8 {
            for x in 0..8 {
                pixels.push(if (x + y) % 2 == 0 { texel_a } else { texel_b });
            }
        }
        tile.pixels = pixels;
        tile.texture_width = 8;
        tile.texture_height = 8;
        tile
    }

    /// Unit cube with one texel on every face, outward normals
    pub fn block(texel: u32) -> Self {
        // Four corners per face so UVs stay per-face
        let faces: [[[f32; 3]; 4]; 6] = [
            // +Y (top)
            [[0.0, 1.0, 0.0], [0.0, 1.0, 1.0], [1.0, 1.0, 1.0], [1.0, 1.0, 0.0]],
            // -Y (bottom)
            [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 0.0, 1.0], [0.0, 0.0, 1.0]],
            // +X
            [[1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [1.0, 1.0, 1.0], [1.0, 0.0, 1.0]],
            // -X
            [[0.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 1.0], [0.0, 1.0, 0.0]],
            // +Z
            [[0.0, 0.0, 1.0], [1.0, 0.0, 1.0], [1.0, 1.0, 1.0], [0.0, 1.0, 1.0]],
            // -Z
            [[0.0, 0.0, 0.0], [0.0, 1.0, 0.0], [1.0, 1.0, 0.0], [1.0, 0.0, 0.0]],
        ];
        let uvs = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];

        let mut vertices = Vec::with_capacity(24);
        let mut indices = Vec::with_capacity(36);
        for (fi, face) in faces.iter().enumerate() {
            let base = (fi * 4) as u16;
            for (ci, corner) in face.iter().enumerate() {
                vertices.push(RasterVertex::new(
                    corner[0], corner[1], corner[2], uvs[ci][0], uvs[ci][1],
                ));
            }
            indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        }

        Self {
            vertices,
            indices,
            pixels: vec![texel],
            texture_width: 1,
            texture_height: 1,
        }
    }
}

/// Build a tileset blob from tile records
pub fn tileset_blob(tiles: &[SampleTile]) -> Vec<u8> {
    let mut out = Vec::new();
    push_header(&mut out, TILESET_MAGIC, TILESET_VERSION);
    push_u16(&mut out, tiles.len() as u16);

    for tile in tiles {
        push_u32(&mut out, tile.vertices.len() as u32);

        if tile.vertices.is_empty() {
            // Air record: index count plus texture dims, all zero
            push_u32(&mut out, 0);
            push_u16(&mut out, 0);
            push_u16(&mut out, 0);
            continue;
        }

        for v in &tile.vertices {
            push_f32(&mut out, v.x);
            push_f32(&mut out, v.y);
            push_f32(&mut out, v.z);
            push_f32(&mut out, v.u);
            push_f32(&mut out, v.v);
        }

        push_u32(&mut out, tile.indices.len() as u32);
        for &i in &tile.indices {
            push_u16(&mut out, i);
        }

        push_u16(&mut out, tile.texture_width);
        push_u16(&mut out, tile.texture_height);
        for &p in &tile.pixels {
            push_u32(&mut out, p);
        }
    }

    out
}

/// A small complete world: one defined cell with a checkered floor and
/// scattered blocks, surrounded by empty matrix space.
pub fn sample_library() -> AssetLibrary {
    let geometry = geometry_blob(|layer, y, x| match layer {
        0 => TileRef::pack(0, 0),
        1 if (x * 7 + y * 13) % 19 == 0 => TileRef::pack(0, 1),
        _ => TileRef { packed: 0xC000 }, // reserved = empty
    });

    let collision = collision_blob(|layer, y, x| match layer {
        0 => 1,
        1 if (x * 7 + y * 13) % 19 == 0 => 1,
        _ => 0,
    });

    let regional = tileset_blob(&[
        SampleTile::checker_quad(0xFF3A7D44, 0xFF2E6336), // grass
        SampleTile::block(0xFF8A7560),                    // stone
    ]);
    let local = tileset_blob(&[SampleTile::air()]);
    let interior = tileset_blob(&[SampleTile::air()]);

    let headers = headers_blob(&[WorldHeader {
        header_id: 1,
        vertical_offset: 0,
        geometry_id: 0,
        collision_id: 0,
        regional_tileset_id: 0,
        local_tileset_id: 0,
        interior_tileset_id: 0,
    }]);

    // Every matrix cell references the one defined header; moving off
    // the 4x4 matrix degrades to empty cells
    let matrix = matrix_blob(4, 4, &[1; 16]);

    AssetLibrary {
        world_matrix: matrix,
        world_headers: headers,
        geometry: vec![geometry],
        collision: vec![collision],
        regional_tilesets: vec![regional],
        local_tilesets: vec![local],
        interior_tilesets: vec![interior],
    }
}
