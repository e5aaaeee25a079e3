//! Map rendering: walk a geometry volume and draw every solid voxel

use crate::rasterizer::{draw_mesh, Framebuffer, Mat4, RasterMesh, RasterSettings, Vec3};
use super::geometry::{GeometryMap, MAP_HEIGHT, MAP_LAYERS, MAP_WIDTH};
use super::tileset::Tileset;

/// Walk every voxel of `geo` and dispatch one mesh draw per solid tile.
///
/// The volume's layer axis maps to world Y, its y axis to world Z, so
/// the per-voxel model is `model * translate(x, layer, y)`. Voxels are
/// skipped when the category is reserved, the category's tileset is
/// absent, the tile id is out of range, or the tile is air.
///
/// Returns the number of tile meshes dispatched.
#[allow(clippy::too_many_arguments)]
pub fn render_map(
    fb: &mut Framebuffer,
    geo: &GeometryMap,
    regional: Option<&Tileset>,
    local: Option<&Tileset>,
    interior: Option<&Tileset>,
    model: Mat4,
    view: Mat4,
    projection: Mat4,
    settings: &RasterSettings,
) -> usize {
    let mut draws = 0;

    for layer in 0..MAP_LAYERS {
        for y in 0..MAP_HEIGHT {
            for x in 0..MAP_WIDTH {
                let tile_ref = geo.tiles[layer][y][x];

                let tileset = match tile_ref.tileset() {
                    0 => regional,
                    1 => local,
                    2 => interior,
                    _ => continue, // reserved category
                };
                let Some(tileset) = tileset else { continue };
                let Some(tile) = tileset.tile(tile_ref.id()) else { continue };
                if tile.is_air() {
                    continue;
                }

                let mesh = RasterMesh {
                    vertices: &tile.vertices,
                    indices: &tile.indices,
                    pixels: &tile.pixels,
                    tex_width: tile.texture_width,
                    tex_height: tile.texture_height,
                };

                let tile_model =
                    model * Mat4::translate(Vec3::new(x as f32, layer as f32, y as f32));

                draw_mesh(fb, &mesh, tile_model, view, projection, settings);
                draws += 1;
            }
        }
    }

    draws
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rasterizer::{Color, DirectionalLight};
    use crate::world::geometry::TileRef;
    use crate::world::sample::{self, SampleTile};

    fn look_down_camera() -> (Mat4, Mat4) {
        // Straight down onto the voxel at the origin; +Z up on screen
        let view = Mat4::look_at(
            Vec3::new(0.5, 10.0, 0.5),
            Vec3::new(0.5, 0.0, 0.5),
            Vec3::new(0.0, 0.0, 1.0),
        );
        let projection = Mat4::orthographic(-2.0, 2.0, -2.0, 2.0, 0.1, 100.0);
        (view, projection)
    }

    fn overhead_settings() -> RasterSettings {
        RasterSettings {
            light: DirectionalLight {
                dir: Vec3::new(0.0, -1.0, 0.0),
                ambient: 0.25,
                intensity: 0.75,
            },
            show_uvs: false,
        }
    }

    #[test]
    fn test_single_voxel_end_to_end() {
        let geo_blob = sample::geometry_blob(|layer, y, x| {
            if layer == 0 && y == 0 && x == 0 {
                TileRef::pack(0, 0)
            } else {
                TileRef { packed: 0xC000 } // reserved category = empty
            }
        });
        let geo = GeometryMap::decode(&geo_blob).unwrap();

        let texel = 0xFF0000FFu32; // pure blue
        let ts = Tileset::decode(&sample::tileset_blob(&[SampleTile::quad(texel)])).unwrap();

        let (view, projection) = look_down_camera();
        let settings = overhead_settings();

        let mut fb = Framebuffer::new(128, 128);
        fb.clear(Color::BLACK);
        let draws = render_map(
            &mut fb,
            &geo,
            Some(&ts),
            None,
            None,
            Mat4::identity(),
            view,
            projection,
            &settings,
        );
        assert_eq!(draws, 1);

        // The quad's face normal points straight up at the light, so the
        // flat factor is ambient + intensity = 1.0 and the center pixel
        // carries the texture color unmodified
        assert_eq!(fb.get_pixel(64, 64), Color::from_texel(texel));

        // The unit footprint spans a quarter of the ortho view; all four
        // corners of it are covered
        for (x, y) in [(50, 50), (78, 50), (50, 78), (78, 78)] {
            assert_eq!(fb.get_pixel(x, y), Color::from_texel(texel), "corner ({x},{y})");
        }

        // Outside the footprint stays at the clear color
        assert_eq!(fb.get_pixel(10, 10), Color::BLACK);
    }

    #[test]
    fn test_light_factor_scales_texel() {
        let geo_blob = sample::geometry_blob(|layer, y, x| {
            if layer == 0 && y == 0 && x == 0 {
                TileRef::pack(0, 0)
            } else {
                TileRef { packed: 0xC000 }
            }
        });
        let geo = GeometryMap::decode(&geo_blob).unwrap();
        let ts = Tileset::decode(&sample::tileset_blob(&[SampleTile::quad(0xFFFFFFFF)])).unwrap();

        let (view, projection) = look_down_camera();
        let mut settings = overhead_settings();
        settings.light.ambient = 0.4;
        settings.light.intensity = 0.0;

        let mut fb = Framebuffer::new(128, 128);
        fb.clear(Color::BLACK);
        render_map(
            &mut fb,
            &geo,
            Some(&ts),
            None,
            None,
            Mat4::identity(),
            view,
            projection,
            &settings,
        );

        let c = fb.get_pixel(64, 64);
        assert!((c.r as i32 - (255.0 * 0.4) as i32).abs() <= 1);
    }

    #[test]
    fn test_all_air_draws_nothing() {
        let geo_blob = sample::geometry_blob(|_, _, _| TileRef::pack(0, 0));
        let geo = GeometryMap::decode(&geo_blob).unwrap();
        let ts = Tileset::decode(&sample::tileset_blob(&[SampleTile::air()])).unwrap();

        let (view, projection) = look_down_camera();
        let settings = overhead_settings();

        let clear = Color::new(12, 34, 56);
        let mut fb = Framebuffer::new(64, 64);
        fb.clear(clear);
        let draws = render_map(
            &mut fb,
            &geo,
            Some(&ts),
            None,
            None,
            Mat4::identity(),
            view,
            projection,
            &settings,
        );

        assert_eq!(draws, 0);
        for y in 0..64 {
            for x in 0..64 {
                assert_eq!(fb.get_pixel(x, y), clear);
            }
        }
    }

    #[test]
    fn test_missing_tileset_and_bad_ids_skip() {
        let geo_blob = sample::geometry_blob(|layer, y, x| match (layer, y, x) {
            (0, 0, 0) => TileRef::pack(1, 0),    // local tileset absent
            (0, 0, 1) => TileRef::pack(0, 500),  // id past tile_count
            (0, 0, 2) => TileRef { packed: 0xC000 }, // reserved category
            _ => TileRef::pack(0, 0),
        });
        let geo = GeometryMap::decode(&geo_blob).unwrap();
        let ts = Tileset::decode(&sample::tileset_blob(&[SampleTile::air()])).unwrap();

        let (view, projection) = look_down_camera();
        let settings = overhead_settings();

        let mut fb = Framebuffer::new(64, 64);
        fb.clear(Color::BLACK);
        let draws = render_map(
            &mut fb,
            &geo,
            Some(&ts),
            None,
            None,
            Mat4::identity(),
            view,
            projection,
            &settings,
        );
        assert_eq!(draws, 0);
    }
}
