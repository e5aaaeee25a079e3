//! Core types for the rasterizer

use serde::{Serialize, Deserialize};
use super::math::Vec3;

/// RGBA color (0-255 per channel)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0, a: 255 };
    pub const WHITE: Color = Color { r: 255, g: 255, b: 255, a: 255 };
    pub const RED: Color = Color { r: 255, g: 0, b: 0, a: 255 };
    pub const GREEN: Color = Color { r: 0, g: 255, b: 0, a: 255 };
    pub const BLUE: Color = Color { r: 0, g: 0, b: 255, a: 255 };

    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub fn with_alpha(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Extract RGB from a packed 0xAARRGGBB texel, alpha forced opaque
    pub fn from_texel(texel: u32) -> Self {
        Self {
            r: ((texel >> 16) & 0xFF) as u8,
            g: ((texel >> 8) & 0xFF) as u8,
            b: (texel & 0xFF) as u8,
            a: 255,
        }
    }

    /// Pack into 0xAARRGGBB
    pub fn to_texel(self) -> u32 {
        ((self.a as u32) << 24) | ((self.r as u32) << 16) | ((self.g as u32) << 8) | (self.b as u32)
    }

    /// Apply shading (multiply RGB by intensity 0.0-1.0)
    pub fn shade(self, intensity: f32) -> Self {
        let i = intensity.clamp(0.0, 1.0);
        Self {
            r: (self.r as f32 * i) as u8,
            g: (self.g as f32 * i) as u8,
            b: (self.b as f32 * i) as u8,
            a: self.a,
        }
    }

    /// Convert to [u8; 4] for framebuffer
    pub fn to_bytes(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// A mesh vertex: object-space position plus UV in [0,1]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RasterVertex {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub u: f32,
    pub v: f32,
}

impl RasterVertex {
    pub fn new(x: f32, y: f32, z: f32, u: f32, v: f32) -> Self {
        Self { x, y, z, u, v }
    }

    pub fn pos(self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }
}

/// Borrowed mesh view handed to the rasterizer.
///
/// Indices come in groups of three per triangle. Texels are packed
/// 0xAARRGGBB, row-major.
#[derive(Debug, Clone, Copy)]
pub struct RasterMesh<'a> {
    pub vertices: &'a [RasterVertex],
    pub indices: &'a [u16],
    pub pixels: &'a [u32],
    pub tex_width: u16,
    pub tex_height: u16,
}

/// Single global directional light, updated by the day cycle
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DirectionalLight {
    /// Unit direction the light travels in
    pub dir: Vec3,
    pub ambient: f32,
    pub intensity: f32,
}

impl Default for DirectionalLight {
    fn default() -> Self {
        Self {
            dir: Vec3::new(-0.4, -0.8, -0.3).normalize(),
            ambient: 0.35,
            intensity: 0.65,
        }
    }
}

/// Rasterizer settings
#[derive(Debug, Clone, Copy, Default)]
pub struct RasterSettings {
    pub light: DirectionalLight,
    /// Debug mode: encode interpolated UVs into R/G instead of sampling
    pub show_uvs: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_texel_round_trip() {
        let c = Color::new(0x12, 0x34, 0x56);
        assert_eq!(Color::from_texel(c.to_texel()), c);
    }

    #[test]
    fn test_from_texel_forces_opaque() {
        let c = Color::from_texel(0x0080FF40);
        assert_eq!(c.a, 255);
        assert_eq!((c.r, c.g, c.b), (0x80, 0xFF, 0x40));
    }

    #[test]
    fn test_shade_clamps() {
        let c = Color::new(100, 200, 50).shade(2.0);
        assert_eq!((c.r, c.g, c.b), (100, 200, 50));
        let d = Color::new(100, 200, 50).shade(0.5);
        assert_eq!((d.r, d.g, d.b), (50, 100, 25));
    }
}
