//! Vector and matrix math for the 3D pipeline
//!
//! Column-major 4x4 matrices: `m[col][row]`, vectors transform as
//! `M * v`. Matches the conventions of the asset toolchain.

use std::ops::{Add, Sub, Mul, Neg};
use serde::{Serialize, Deserialize};

/// 3D Vector
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 { x: 0.0, y: 0.0, z: 0.0 };
    pub const UP: Vec3 = Vec3 { x: 0.0, y: 1.0, z: 0.0 };

    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn dot(self, other: Vec3) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(self, other: Vec3) -> Vec3 {
        Vec3 {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    pub fn len_sq(self) -> f32 {
        self.dot(self)
    }

    pub fn len(self) -> f32 {
        self.dot(self).sqrt()
    }

    pub fn normalize(self) -> Vec3 {
        let l = self.len();
        if l == 0.0 {
            return Vec3::ZERO;
        }
        Vec3 {
            x: self.x / l,
            y: self.y / l,
            z: self.z / l,
        }
    }

    pub fn scale(self, s: f32) -> Vec3 {
        Vec3 {
            x: self.x * s,
            y: self.y * s,
            z: self.z * s,
        }
    }
}

impl Add for Vec3 {
    type Output = Vec3;
    fn add(self, other: Vec3) -> Vec3 {
        Vec3 {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

impl Sub for Vec3 {
    type Output = Vec3;
    fn sub(self, other: Vec3) -> Vec3 {
        Vec3 {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}

impl Mul<f32> for Vec3 {
    type Output = Vec3;
    fn mul(self, s: f32) -> Vec3 {
        self.scale(s)
    }
}

impl Neg for Vec3 {
    type Output = Vec3;
    fn neg(self) -> Vec3 {
        Vec3 {
            x: -self.x,
            y: -self.y,
            z: -self.z,
        }
    }
}

/// 2D Vector (for texture coordinates)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Homogeneous 4D vector (clip-space positions)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec4 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Vec4 {
    pub fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Promote a position to homogeneous coordinates (w = 1)
    pub fn from_point(v: Vec3) -> Self {
        Self { x: v.x, y: v.y, z: v.z, w: 1.0 }
    }

    pub fn xyz(self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }
}

/// Column-major 4x4 matrix
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat4 {
    pub m: [[f32; 4]; 4],
}

impl Mat4 {
    pub const IDENTITY: Mat4 = {
        let mut m = [[0.0; 4]; 4];
        m[0][0] = 1.0;
        m[1][1] = 1.0;
        m[2][2] = 1.0;
        m[3][3] = 1.0;
        Mat4 { m }
    };

    pub fn identity() -> Self {
        Self::IDENTITY
    }

    pub fn translate(v: Vec3) -> Self {
        let mut result = Self::IDENTITY;
        result.m[3][0] = v.x;
        result.m[3][1] = v.y;
        result.m[3][2] = v.z;
        result
    }

    pub fn scale(v: Vec3) -> Self {
        let mut result = Self::IDENTITY;
        result.m[0][0] = v.x;
        result.m[1][1] = v.y;
        result.m[2][2] = v.z;
        result
    }

    pub fn rotate_x(angle: f32) -> Self {
        let mut result = Self::IDENTITY;
        let c = angle.cos();
        let s = angle.sin();
        result.m[1][1] = c;
        result.m[1][2] = s;
        result.m[2][1] = -s;
        result.m[2][2] = c;
        result
    }

    pub fn rotate_y(angle: f32) -> Self {
        let mut result = Self::IDENTITY;
        let c = angle.cos();
        let s = angle.sin();
        result.m[0][0] = c;
        result.m[0][2] = -s;
        result.m[2][0] = s;
        result.m[2][2] = c;
        result
    }

    pub fn rotate_z(angle: f32) -> Self {
        let mut result = Self::IDENTITY;
        let c = angle.cos();
        let s = angle.sin();
        result.m[0][0] = c;
        result.m[0][1] = s;
        result.m[1][0] = -s;
        result.m[1][1] = c;
        result
    }

    /// Right-handed perspective projection, depth mapped to [-1, 1]
    pub fn perspective(fov: f32, aspect: f32, near: f32, far: f32) -> Self {
        let mut result = Mat4 { m: [[0.0; 4]; 4] };
        let f = 1.0 / (fov * 0.5).tan();

        result.m[0][0] = f / aspect;
        result.m[1][1] = f;
        result.m[2][2] = (far + near) / (near - far);
        result.m[2][3] = -1.0;
        result.m[3][2] = (2.0 * far * near) / (near - far);
        result
    }

    /// Right-handed orthographic projection, depth mapped to [-1, 1]
    pub fn orthographic(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Self {
        let mut result = Self::IDENTITY;
        result.m[0][0] = 2.0 / (right - left);
        result.m[1][1] = 2.0 / (top - bottom);
        result.m[2][2] = -2.0 / (far - near);
        result.m[3][0] = -(right + left) / (right - left);
        result.m[3][1] = -(top + bottom) / (top - bottom);
        result.m[3][2] = -(far + near) / (far - near);
        result
    }

    /// Right-handed view matrix looking from `eye` toward `center`
    pub fn look_at(eye: Vec3, center: Vec3, up: Vec3) -> Self {
        let f = (center - eye).normalize();
        let s = f.cross(up).normalize();
        let u = s.cross(f);

        let mut result = Self::IDENTITY;

        result.m[0][0] = s.x;
        result.m[0][1] = u.x;
        result.m[0][2] = -f.x;

        result.m[1][0] = s.y;
        result.m[1][1] = u.y;
        result.m[1][2] = -f.y;

        result.m[2][0] = s.z;
        result.m[2][1] = u.z;
        result.m[2][2] = -f.z;

        result.m[3][0] = -s.dot(eye);
        result.m[3][1] = -u.dot(eye);
        result.m[3][2] = f.dot(eye);

        result
    }

    pub fn mul_vec4(self, v: Vec4) -> Vec4 {
        let m = &self.m;
        Vec4 {
            x: m[0][0] * v.x + m[1][0] * v.y + m[2][0] * v.z + m[3][0] * v.w,
            y: m[0][1] * v.x + m[1][1] * v.y + m[2][1] * v.z + m[3][1] * v.w,
            z: m[0][2] * v.x + m[1][2] * v.y + m[2][2] * v.z + m[3][2] * v.w,
            w: m[0][3] * v.x + m[1][3] * v.y + m[2][3] * v.z + m[3][3] * v.w,
        }
    }
}

impl Mul for Mat4 {
    type Output = Mat4;

    /// `a * b` applies `b` first, then `a` (column-vector convention)
    fn mul(self, other: Mat4) -> Mat4 {
        let mut result = Mat4 { m: [[0.0; 4]; 4] };
        for i in 0..4 {
            for j in 0..4 {
                result.m[i][j] = self.m[0][j] * other.m[i][0]
                    + self.m[1][j] * other.m[i][1]
                    + self.m[2][j] * other.m[i][2]
                    + self.m[3][j] * other.m[i][3];
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec3_dot() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 5.0, 6.0);
        assert!((a.dot(b) - 32.0).abs() < 0.001);
    }

    #[test]
    fn test_vec3_cross() {
        let a = Vec3::new(1.0, 0.0, 0.0);
        let b = Vec3::new(0.0, 1.0, 0.0);
        let c = a.cross(b);
        assert!((c.z - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_vec3_normalize_zero() {
        assert_eq!(Vec3::ZERO.normalize(), Vec3::ZERO);
    }

    #[test]
    fn test_mat4_translate_point() {
        let m = Mat4::translate(Vec3::new(2.0, -3.0, 1.5));
        let p = m.mul_vec4(Vec4::from_point(Vec3::new(1.0, 1.0, 1.0)));
        assert!((p.x - 3.0).abs() < 0.001);
        assert!((p.y + 2.0).abs() < 0.001);
        assert!((p.z - 2.5).abs() < 0.001);
        assert!((p.w - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_mat4_multiply_order() {
        // translate * scale: scale applies first
        let m = Mat4::translate(Vec3::new(10.0, 0.0, 0.0)) * Mat4::scale(Vec3::new(2.0, 2.0, 2.0));
        let p = m.mul_vec4(Vec4::from_point(Vec3::new(1.0, 0.0, 0.0)));
        assert!((p.x - 12.0).abs() < 0.001);
    }

    #[test]
    fn test_mat4_identity_multiply() {
        let m = Mat4::rotate_y(0.7) * Mat4::identity();
        let n = Mat4::rotate_y(0.7);
        for i in 0..4 {
            for j in 0..4 {
                assert!((m.m[i][j] - n.m[i][j]).abs() < 0.0001);
            }
        }
    }

    #[test]
    fn test_perspective_maps_near_far() {
        let proj = Mat4::perspective(std::f32::consts::FRAC_PI_2, 1.0, 0.1, 100.0);

        // A point on the near plane lands at ndc z = -1
        let near = proj.mul_vec4(Vec4::new(0.0, 0.0, -0.1, 1.0));
        assert!((near.z / near.w + 1.0).abs() < 0.001);

        // A point on the far plane lands at ndc z = 1
        let far = proj.mul_vec4(Vec4::new(0.0, 0.0, -100.0, 1.0));
        assert!((far.z / far.w - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_look_at_centers_target() {
        let view = Mat4::look_at(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::UP);
        let p = view.mul_vec4(Vec4::from_point(Vec3::ZERO));
        // Target sits straight ahead on the -Z axis
        assert!(p.x.abs() < 0.001);
        assert!(p.y.abs() < 0.001);
        assert!((p.z + 5.0).abs() < 0.001);
    }
}
