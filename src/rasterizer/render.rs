//! Software rasterization pipeline
//!
//! Triangles go through model/view/projection transform, near-plane
//! clipping in clip space, perspective divide, then perspective-correct
//! textured rasterization against a shared depth buffer.

use super::math::{Mat4, Vec4};
use super::types::{Color, RasterMesh, RasterSettings};
use super::{FB_HEIGHT, FB_WIDTH};

/// Framebuffer for software rendering
pub struct Framebuffer {
    pub pixels: Vec<u8>,   // RGBA, 4 bytes per pixel
    pub zbuffer: Vec<f32>, // Depth buffer, [0,1], 1.0 = far
    pub width: usize,
    pub height: usize,
}

impl Framebuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            pixels: vec![0; width * height * 4],
            zbuffer: vec![1.0; width * height],
            width,
            height,
        }
    }

    /// Clear the color buffer and reset every depth sample to far
    pub fn clear(&mut self, color: Color) {
        let bytes = color.to_bytes();
        for i in 0..(self.width * self.height) {
            self.pixels[i * 4] = bytes[0];
            self.pixels[i * 4 + 1] = bytes[1];
            self.pixels[i * 4 + 2] = bytes[2];
            self.pixels[i * 4 + 3] = bytes[3];
            self.zbuffer[i] = 1.0;
        }
    }

    pub fn set_pixel(&mut self, x: usize, y: usize, color: Color) {
        if x < self.width && y < self.height {
            let idx = (y * self.width + x) * 4;
            let bytes = color.to_bytes();
            self.pixels[idx] = bytes[0];
            self.pixels[idx + 1] = bytes[1];
            self.pixels[idx + 2] = bytes[2];
            self.pixels[idx + 3] = bytes[3];
        }
    }

    pub fn get_pixel(&self, x: usize, y: usize) -> Color {
        let idx = (y * self.width + x) * 4;
        Color::with_alpha(
            self.pixels[idx],
            self.pixels[idx + 1],
            self.pixels[idx + 2],
            self.pixels[idx + 3],
        )
    }

    /// Draw a line from (x0, y0) to (x1, y1) using Bresenham's algorithm.
    /// Debug overlay helper, ignores the depth buffer.
    pub fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Color) {
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        let mut x = x0;
        let mut y = y0;

        loop {
            if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
                self.set_pixel(x as usize, y as usize, color);
            }

            if x == x1 && y == y1 {
                break;
            }

            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }
}

impl Default for Framebuffer {
    fn default() -> Self {
        Self::new(FB_WIDTH, FB_HEIGHT)
    }
}

/// Clip-space vertex with carried UV
#[derive(Debug, Clone, Copy, Default)]
struct ClipVert {
    p: Vec4,
    u: f32,
    v: f32,
}

/// Screen-space vertex set up for perspective-correct interpolation
#[derive(Debug, Clone, Copy)]
struct RasterVert {
    x: f32,
    y: f32,
    z_over_w: f32,
    u_over_w: f32,
    v_over_w: f32,
    inv_w: f32,
}

fn clip_lerp(a: &ClipVert, b: &ClipVert, t: f32) -> ClipVert {
    ClipVert {
        p: Vec4::new(
            a.p.x + t * (b.p.x - a.p.x),
            a.p.y + t * (b.p.y - a.p.y),
            a.p.z + t * (b.p.z - a.p.z),
            a.p.w + t * (b.p.w - a.p.w),
        ),
        u: a.u + t * (b.u - a.u),
        v: a.v + t * (b.v - a.v),
    }
}

/// Clip a single triangle against the near plane z = -w in clip space.
/// Writes 0, 1, or 2 output triangles into `out` and returns the count.
fn clip_triangle_near(input: &[ClipVert; 3], out: &mut [[ClipVert; 3]; 2]) -> usize {
    let mut d = [0.0f32; 3];
    let mut inside = [false; 3];
    let mut inside_count = 0;

    for i in 0..3 {
        d[i] = input[i].p.z + input[i].p.w; // >0 = inside
        inside[i] = d[i] > 0.0;
        if inside[i] {
            inside_count += 1;
        }
    }

    if inside_count == 0 {
        return 0;
    }

    if inside_count == 3 {
        out[0] = *input;
        return 1;
    }

    if inside_count == 1 {
        let i0 = if inside[0] { 0 } else if inside[1] { 1 } else { 2 };
        let i1 = (i0 + 1) % 3;
        let i2 = (i0 + 2) % 3;

        let t1 = d[i0] / (d[i0] - d[i1]);
        let t2 = d[i0] / (d[i0] - d[i2]);

        out[0] = [
            input[i0],
            clip_lerp(&input[i0], &input[i1], t1),
            clip_lerp(&input[i0], &input[i2], t2),
        ];
        return 1;
    }

    // Two inside: the quad gets split into two triangles
    let o = if !inside[0] { 0 } else if !inside[1] { 1 } else { 2 };
    let i0 = (o + 1) % 3;
    let i1 = (o + 2) % 3;

    let t0 = d[i0] / (d[i0] - d[o]);
    let t1 = d[i1] / (d[i1] - d[o]);

    let v0 = input[i0];
    let v1 = input[i1];
    let v2 = clip_lerp(&input[i0], &input[o], t0);
    let v3 = clip_lerp(&input[i1], &input[o], t1);

    out[0] = [v0, v1, v2];
    out[1] = [v1, v3, v2];
    2
}

/// 2D edge function: twice the signed area of triangle (a, b, c)
fn edge(ax: f32, ay: f32, bx: f32, by: f32, cx: f32, cy: f32) -> f32 {
    (bx - ax) * (cy - ay) - (by - ay) * (cx - ax)
}

/// Perspective divide and viewport transform (Y flipped, top-down framebuffer)
fn to_raster_vert(cv: &ClipVert, width: usize, height: usize) -> RasterVert {
    let inv_w = 1.0 / cv.p.w;

    let x_ndc = cv.p.x * inv_w;
    let y_ndc = cv.p.y * inv_w;
    let z_ndc = cv.p.z * inv_w;

    RasterVert {
        x: (x_ndc + 1.0) * 0.5 * width as f32,
        y: (1.0 - (y_ndc + 1.0) * 0.5) * height as f32,
        inv_w,
        z_over_w: z_ndc, // already perspective-correct
        u_over_w: cv.u * inv_w,
        v_over_w: cv.v * inv_w,
    }
}

fn draw_triangle(
    fb: &mut Framebuffer,
    a: RasterVert,
    b: RasterVert,
    c: RasterVert,
    mesh: &RasterMesh,
    light: f32,
    show_uvs: bool,
) {
    let area = edge(a.x, a.y, b.x, b.y, c.x, c.y);
    if area.abs() < 1e-6 {
        return;
    }

    if mesh.pixels.is_empty() || mesh.tex_width == 0 || mesh.tex_height == 0 {
        return;
    }

    let min_x = a.x.min(b.x).min(c.x).floor().max(0.0) as i32;
    let max_x = a.x.max(b.x).max(c.x).ceil().min(fb.width as f32 - 1.0) as i32;
    let min_y = a.y.min(b.y).min(c.y).floor().max(0.0) as i32;
    let max_y = a.y.max(b.y).max(c.y).ceil().min(fb.height as f32 - 1.0) as i32;

    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let px = x as f32 + 0.5;
            let py = y as f32 + 0.5;

            let w0 = edge(b.x, b.y, c.x, c.y, px, py) / area;
            let w1 = edge(c.x, c.y, a.x, a.y, px, py) / area;
            let w2 = 1.0 - w0 - w1;

            if w0 < 0.0 || w1 < 0.0 || w2 < 0.0 {
                continue;
            }

            // Depth interpolates linearly after the perspective divide
            let z = a.z_over_w * w0 + b.z_over_w * w1 + c.z_over_w * w2;

            // Map from [-1, 1] to [0, 1] for the depth buffer
            let z = 0.5 * z + 0.5;

            let idx = y as usize * fb.width + x as usize;
            if z >= fb.zbuffer[idx] {
                continue;
            }
            fb.zbuffer[idx] = z;

            // Perspective-correct interpolation for UVs
            let inv_w = a.inv_w * w0 + b.inv_w * w1 + c.inv_w * w2;
            if inv_w <= 0.0 {
                continue;
            }

            let u = (a.u_over_w * w0 + b.u_over_w * w1 + c.u_over_w * w2) / inv_w;
            let v = (a.v_over_w * w0 + b.v_over_w * w1 + c.v_over_w * w2) / inv_w;

            let u = u.clamp(0.0, 1.0);
            let v = v.clamp(0.0, 1.0);

            let color = if show_uvs {
                // Debug: UVs straight into R/G
                Color::new((u * 255.0) as u8, (v * 255.0) as u8, 255)
            } else {
                let tx = (u * (mesh.tex_width - 1) as f32) as usize;
                let ty = (v * (mesh.tex_height - 1) as f32) as usize;
                let texel = mesh.pixels[ty * mesh.tex_width as usize + tx];
                Color::from_texel(texel).shade(light)
            };

            let bytes = color.to_bytes();
            let pi = idx * 4;
            fb.pixels[pi] = bytes[0];
            fb.pixels[pi + 1] = bytes[1];
            fb.pixels[pi + 2] = bytes[2];
            fb.pixels[pi + 3] = bytes[3];
        }
    }
}

/// Rasterize a mesh through the full pipeline.
///
/// Lighting is flat per triangle: the face normal comes from the
/// model-transformed positions only, so view and projection never
/// affect brightness.
pub fn draw_mesh(
    fb: &mut Framebuffer,
    mesh: &RasterMesh,
    model: Mat4,
    view: Mat4,
    projection: Mat4,
    settings: &RasterSettings,
) {
    let sun = settings.light;

    for tri in mesh.indices.chunks_exact(3) {
        let Some(v0) = mesh.vertices.get(tri[0] as usize) else { continue };
        let Some(v1) = mesh.vertices.get(tri[1] as usize) else { continue };
        let Some(v2) = mesh.vertices.get(tri[2] as usize) else { continue };
        let corners = [v0, v1, v2];

        // Flat lighting from the world-space face normal
        let wp0 = model.mul_vec4(Vec4::from_point(v0.pos())).xyz();
        let wp1 = model.mul_vec4(Vec4::from_point(v1.pos())).xyz();
        let wp2 = model.mul_vec4(Vec4::from_point(v2.pos())).xyz();

        let normal = (wp1 - wp0).cross(wp2 - wp0);

        let light_factor = if normal.len_sq() < 1e-6 {
            sun.ambient
        } else {
            let ndotl = normal.normalize().dot(-sun.dir);
            let diffuse = ndotl.max(0.0);
            (sun.ambient + diffuse * sun.intensity).clamp(0.0, 1.0)
        };

        // Transform to clip space
        let mut input = [ClipVert::default(); 3];
        for (k, rv) in corners.iter().enumerate() {
            let mut p = Vec4::from_point(rv.pos());
            p = model.mul_vec4(p);
            p = view.mul_vec4(p);
            p = projection.mul_vec4(p);

            input[k] = ClipVert { p, u: rv.u, v: rv.v };
        }

        // Clip against the near plane, then rasterize each piece
        let mut clipped = [[ClipVert::default(); 3]; 2];
        let tri_count = clip_triangle_near(&input, &mut clipped);

        for piece in clipped.iter().take(tri_count) {
            let a = to_raster_vert(&piece[0], fb.width, fb.height);
            let b = to_raster_vert(&piece[1], fb.width, fb.height);
            let c = to_raster_vert(&piece[2], fb.width, fb.height);

            draw_triangle(fb, a, b, c, mesh, light_factor, settings.show_uvs);
        }
    }
}
