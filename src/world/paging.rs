//! World paging: the 3x3 grid of streamed cells around the viewer
//!
//! Cells load when the viewer's center cell changes and unload by
//! dropping their decoded assets. A cell with partially-missing data
//! still occupies its grid slot and renders whatever loaded.

use log::{debug, warn};

use crate::rasterizer::{Framebuffer, Mat4, RasterSettings, Vec3};
use super::collision::CollisionMap;
use super::geometry::{GeometryMap, MAP_HEIGHT, MAP_WIDTH};
use super::headers::WorldHeaders;
use super::library::{AssetLibrary, TilesetCategory};
use super::matrix::WorldMatrix;
use super::render::render_map;
use super::tileset::Tileset;
use super::blob::DecodeError;

/// One streamed map cell. Owns its decoded assets; dropping the cell
/// releases them.
#[derive(Default)]
pub struct WorldCell {
    pub header_id: u16,
    pub world_x: i32,
    pub world_y: i32,
    pub vertical_offset: i16,

    pub geometry: Option<GeometryMap>,
    pub collision: Option<CollisionMap>,
    pub regional_tileset: Option<Tileset>,
    pub local_tileset: Option<Tileset>,
    pub interior_tileset: Option<Tileset>,
}

/// The active world centered on the viewer: center cell coordinates
/// plus the 3x3 grid of loaded cells, indexed `cells[dy+1][dx+1]`.
pub struct World {
    cx: i32,
    cy: i32,
    cells: [[WorldCell; 3]; 3],

    matrix: WorldMatrix,
    headers: WorldHeaders,

    /// Total cells decoded since init; useful for spotting reload
    /// frame spikes
    pub cell_loads: u64,
}

impl World {
    /// Decode the world matrix and header tables, then load the 3x3
    /// grid around the starting position.
    pub fn new(assets: &AssetLibrary, start_x: f32, start_z: f32) -> Result<Self, DecodeError> {
        let matrix = WorldMatrix::decode(&assets.world_matrix)?;
        let headers = WorldHeaders::decode(&assets.world_headers)?;

        let mut world = Self {
            cx: (start_x / MAP_WIDTH as f32).floor() as i32,
            cy: (start_z / MAP_HEIGHT as f32).floor() as i32,
            cells: Default::default(),
            matrix,
            headers,
            cell_loads: 0,
        };

        for dy in -1..=1 {
            for dx in -1..=1 {
                world.cells[(dy + 1) as usize][(dx + 1) as usize] =
                    world.load_cell(assets, world.cx + dx, world.cy + dy);
                world.cell_loads += 1;
            }
        }

        Ok(world)
    }

    pub fn center(&self) -> (i32, i32) {
        (self.cx, self.cy)
    }

    /// The cell at grid offset (dx, dy) from the center, each in -1..=1
    pub fn cell(&self, dx: i32, dy: i32) -> &WorldCell {
        &self.cells[(dy + 1) as usize][(dx + 1) as usize]
    }

    /// Recompute the center cell from the viewer position. If it is
    /// unchanged this is a strict no-op; otherwise every cell is
    /// reloaded around the new center. Returns whether a recenter
    /// happened.
    pub fn update(&mut self, assets: &AssetLibrary, player_x: f32, player_z: f32) -> bool {
        let new_cx = (player_x / MAP_WIDTH as f32).floor() as i32;
        let new_cy = (player_z / MAP_HEIGHT as f32).floor() as i32;

        if new_cx == self.cx && new_cy == self.cy {
            return false;
        }

        debug!("recentering world ({}, {}) -> ({}, {})", self.cx, self.cy, new_cx, new_cy);
        self.cx = new_cx;
        self.cy = new_cy;

        // Brute-force full reload: unload all nine, load all nine.
        // Simpler than shifting the overlap and the asset decode cost
        // is bounded.
        for dy in -1..=1i32 {
            for dx in -1..=1i32 {
                self.cells[(dy + 1) as usize][(dx + 1) as usize] =
                    self.load_cell(assets, new_cx + dx, new_cy + dy);
                self.cell_loads += 1;
            }
        }

        true
    }

    fn load_cell(&self, assets: &AssetLibrary, mx: i32, my: i32) -> WorldCell {
        let header_id = self.matrix.get(mx, my);

        let Some(header) = self.headers.get(header_id) else {
            // No header for this id: the slot stays occupied but empty
            warn!("no world header {} for cell ({}, {})", header_id, mx, my);
            return WorldCell {
                header_id,
                world_x: mx,
                world_y: my,
                ..Default::default()
            };
        };

        // Each asset loads independently; any may be absent
        WorldCell {
            header_id,
            world_x: mx,
            world_y: my,
            vertical_offset: header.vertical_offset,
            geometry: assets.load_geometry(header.geometry_id),
            collision: assets.load_collision(header.collision_id),
            regional_tileset: assets
                .load_tileset(TilesetCategory::Regional, header.regional_tileset_id),
            local_tileset: assets.load_tileset(TilesetCategory::Local, header.local_tileset_id),
            interior_tileset: assets
                .load_tileset(TilesetCategory::Interior, header.interior_tileset_id),
        }
    }

    /// Render every loaded cell. The grid is drawn centered on the
    /// origin: each cell's model places it at its offset from the
    /// center, lifted by the header's vertical offset.
    ///
    /// Returns the total number of tile meshes dispatched.
    pub fn render(
        &self,
        fb: &mut Framebuffer,
        view: Mat4,
        projection: Mat4,
        settings: &RasterSettings,
    ) -> usize {
        let mut draws = 0;

        for dy in -1..=1i32 {
            for dx in -1..=1i32 {
                let cell = self.cell(dx, dy);
                let Some(geo) = &cell.geometry else { continue };

                let model = Mat4::translate(Vec3::new(
                    (dx * MAP_WIDTH as i32) as f32,
                    cell.vertical_offset as f32,
                    (dy * MAP_HEIGHT as i32) as f32,
                ));

                draws += render_map(
                    fb,
                    geo,
                    cell.regional_tileset.as_ref(),
                    cell.local_tileset.as_ref(),
                    cell.interior_tileset.as_ref(),
                    model,
                    view,
                    projection,
                    settings,
                );
            }
        }

        draws
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::sample;

    fn library() -> AssetLibrary {
        sample::sample_library()
    }

    #[test]
    fn test_init_loads_nine_cells() {
        let assets = library();
        let world = World::new(&assets, 16.0, 16.0).unwrap();

        assert_eq!(world.center(), (0, 0));
        assert_eq!(world.cell_loads, 9);

        for dy in -1..=1 {
            for dx in -1..=1 {
                let cell = world.cell(dx, dy);
                assert_eq!((cell.world_x, cell.world_y), (dx, dy));
            }
        }
    }

    #[test]
    fn test_update_same_center_is_noop() {
        let assets = library();
        let mut world = World::new(&assets, 16.0, 16.0).unwrap();

        // Anywhere inside cell (0, 0) keeps the grid untouched
        assert!(!world.update(&assets, 0.1, 0.1));
        assert!(!world.update(&assets, 31.9, 31.9));
        assert_eq!(world.cell_loads, 9);
    }

    #[test]
    fn test_update_new_center_reloads_neighborhood() {
        let assets = library();
        let mut world = World::new(&assets, 16.0, 16.0).unwrap();

        assert!(world.update(&assets, 40.0, 16.0));
        assert_eq!(world.center(), (1, 0));
        assert_eq!(world.cell_loads, 18);

        for dy in -1..=1 {
            for dx in -1..=1 {
                let cell = world.cell(dx, dy);
                assert_eq!((cell.world_x, cell.world_y), (1 + dx, dy));
            }
        }
    }

    #[test]
    fn test_negative_positions_floor_toward_negative() {
        let assets = library();
        let world = World::new(&assets, -0.5, -0.5).unwrap();
        assert_eq!(world.center(), (-1, -1));
    }

    #[test]
    fn test_missing_header_gives_empty_cell() {
        let assets = library();
        let world = World::new(&assets, 16.0, 16.0).unwrap();

        // Off-matrix neighbors resolve to header id 0, which the sample
        // header table does not define
        let corner = world.cell(-1, -1);
        assert_eq!(corner.header_id, 0);
        assert!(corner.geometry.is_none());
        assert!(corner.regional_tileset.is_none());
    }

    #[test]
    fn test_center_cell_fully_loaded() {
        let assets = library();
        let world = World::new(&assets, 16.0, 16.0).unwrap();

        let center = world.cell(0, 0);
        assert!(center.geometry.is_some());
        assert!(center.collision.is_some());
        assert!(center.regional_tileset.is_some());
    }

    #[test]
    fn test_render_world_covers_framebuffer_center() {
        use crate::rasterizer::{Color, DirectionalLight};

        let assets = library();
        let world = World::new(&assets, 16.0, 16.0).unwrap();

        // Straight down over the center cell's voxel volume
        let view = Mat4::look_at(
            Vec3::new(16.0, 50.0, 16.0),
            Vec3::new(16.0, 0.0, 16.0),
            Vec3::new(0.0, 0.0, 1.0),
        );
        let projection = Mat4::orthographic(-16.0, 16.0, -16.0, 16.0, 0.1, 200.0);
        let settings = RasterSettings {
            light: DirectionalLight {
                dir: Vec3::new(0.0, -1.0, 0.0),
                ambient: 0.25,
                intensity: 0.75,
            },
            show_uvs: false,
        };

        let mut fb = Framebuffer::new(64, 64);
        fb.clear(Color::BLACK);
        let draws = world.render(&mut fb, view, projection, &settings);

        // The sample world floors the whole center cell
        assert!(draws >= MAP_WIDTH * MAP_HEIGHT);
        assert_ne!(fb.get_pixel(32, 32), Color::BLACK);
    }
}
