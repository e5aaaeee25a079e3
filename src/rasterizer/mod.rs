//! Software 3D rasterizer
//!
//! No GPU anywhere: meshes are transformed, clipped against the near
//! plane and rasterized on the CPU into a fixed-size framebuffer with a
//! matching depth buffer. Texturing is nearest-neighbor with flat
//! per-triangle directional lighting.

mod math;
mod types;
mod render;

pub use math::*;
pub use types::*;
pub use render::*;

/// Fixed framebuffer dimensions
pub const FB_WIDTH: usize = 640;
pub const FB_HEIGHT: usize = 360;
