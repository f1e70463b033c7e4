//! Surface reconstruction and compositing.
//!
//! The height field is read as a water surface over a background image:
//! - normals from central differences of the (optionally blurred) field
//! - Blinn-Phong style diffuse and specular terms from a fixed light
//! - a refracted view ray displaces the background lookup in proportion to
//!   the local amplitude
//! - blocked cells darken the background

use crate::constants::MIN_NORMAL_LENGTH;
use crate::error::WaveError;
use crate::grid::Generation;
use crate::params::SurfaceParams;
use crate::smoothing::blur3x3;
use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3};
use rayon::prelude::*;

// =============================================================================
// Output image
// =============================================================================

/// Linear RGBA colour, laid out for direct upload.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub fn opaque(rgb: Vec3) -> Self {
        Self {
            r: rgb.x,
            g: rgb.y,
            b: rgb.z,
            a: 1.0,
        }
    }

    pub fn rgb(&self) -> Vec3 {
        Vec3::new(self.r, self.g, self.b)
    }

    pub fn to_rgba8(self) -> [u8; 4] {
        let q = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }
}

/// One composited image at lattice resolution.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    pub width: usize,
    pub height: usize,
    pixels: Vec<Rgba>,
}

impl Frame {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![Rgba::default(); width * height],
        }
    }

    /// Pixel at (x, y); out-of-range coordinates read as transparent black.
    pub fn get(&self, x: usize, y: usize) -> Rgba {
        if x < self.width && y < self.height {
            self.pixels[y * self.width + x]
        } else {
            Rgba::default()
        }
    }

    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    /// Raw bytes of the float pixels.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.pixels.as_slice())
    }

    /// Quantized 8-bit RGBA, row-major.
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|p| p.to_rgba8()).collect()
    }
}

// =============================================================================
// Backgrounds
// =============================================================================

/// Image seen through the water surface. `uv` is in [0, 1]^2 but may stray
/// outside after refraction; implementations clamp.
pub trait Background: Sync {
    fn sample(&self, uv: Vec2) -> Vec3;
}

impl<F> Background for F
where
    F: Fn(Vec2) -> Vec3 + Sync,
{
    fn sample(&self, uv: Vec2) -> Vec3 {
        self(uv)
    }
}

/// Uniform colour.
#[derive(Clone, Copy, Debug)]
pub struct SolidBackground(pub Vec3);

impl Background for SolidBackground {
    fn sample(&self, _uv: Vec2) -> Vec3 {
        self.0
    }
}

/// Procedural checkerboard, handy for seeing refraction.
#[derive(Clone, Copy, Debug)]
pub struct CheckerBackground {
    pub tiles: u32,
    pub dark: Vec3,
    pub light: Vec3,
}

impl Default for CheckerBackground {
    fn default() -> Self {
        Self {
            tiles: 8,
            dark: Vec3::new(0.1, 0.15, 0.25),
            light: Vec3::new(0.75, 0.8, 0.9),
        }
    }
}

impl Background for CheckerBackground {
    fn sample(&self, uv: Vec2) -> Vec3 {
        let uv = uv.clamp(Vec2::ZERO, Vec2::ONE);
        let cell = (uv * self.tiles as f32).floor();
        if (cell.x + cell.y) as i64 % 2 == 0 {
            self.dark
        } else {
            self.light
        }
    }
}

/// RGBA8 image with bilinear, clamp-to-edge sampling.
#[derive(Clone, Debug)]
pub struct ImageBackground {
    width: usize,
    height: usize,
    texels: Vec<Vec3>,
}

impl ImageBackground {
    pub fn from_rgba8(width: usize, height: usize, rgba: &[u8]) -> Result<Self, WaveError> {
        let expected = width * height;
        if width == 0 || height == 0 || rgba.len() != expected * 4 {
            return Err(WaveError::BackgroundSize {
                expected,
                actual: rgba.len() / 4,
            });
        }
        let texels = rgba
            .chunks_exact(4)
            .map(|p| Vec3::new(p[0] as f32, p[1] as f32, p[2] as f32) / 255.0)
            .collect();
        Ok(Self {
            width,
            height,
            texels,
        })
    }

    fn texel(&self, x: i64, y: i64) -> Vec3 {
        let x = x.clamp(0, self.width as i64 - 1) as usize;
        let y = y.clamp(0, self.height as i64 - 1) as usize;
        self.texels[y * self.width + x]
    }
}

impl Background for ImageBackground {
    fn sample(&self, uv: Vec2) -> Vec3 {
        let p = uv * Vec2::new(self.width as f32, self.height as f32) - 0.5;
        let base = p.floor();
        let t = p - base;
        let (x0, y0) = (base.x as i64, base.y as i64);

        let top = self.texel(x0, y0).lerp(self.texel(x0 + 1, y0), t.x);
        let bottom = self.texel(x0, y0 + 1).lerp(self.texel(x0 + 1, y0 + 1), t.x);
        top.lerp(bottom, t.y)
    }
}

// =============================================================================
// Shading
// =============================================================================

/// Surface normal from central differences `dx`, `dy` over a 2-texel span.
pub fn surface_normal(dx: f32, dy: f32) -> Vec3 {
    let tangent_x = Vec3::new(2.0, 0.0, dx);
    let tangent_y = Vec3::new(0.0, 2.0, dy);
    let n = tangent_x.cross(tangent_y);
    n / n.length().max(MIN_NORMAL_LENGTH)
}

/// Refract incident direction `i` through normal `n` with index ratio `eta`.
/// Returns zero on total internal reflection.
pub fn refract(i: Vec3, n: Vec3, eta: f32) -> Vec3 {
    let cos_i = n.dot(i);
    let k = 1.0 - eta * eta * (1.0 - cos_i * cos_i);
    if k < 0.0 {
        Vec3::ZERO
    } else {
        eta * i - (eta * cos_i + k.sqrt()) * n
    }
}

fn normalize_guarded(v: Vec3) -> Vec3 {
    v / v.length().max(MIN_NORMAL_LENGTH)
}

/// Fixed camera and light, shared by every pixel.
#[derive(Clone, Debug)]
pub struct Compositor {
    camera: Vec3,
    light: Vec3,
    shininess: f32,
    ambient: f32,
    ior_ratio: f32,
    refraction_gain: f32,
}

/// Lighting terms at one surface point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Shading {
    pub normal: Vec3,
    pub diffuse: f32,
    pub specular: f32,
    /// Background lookup offset in UV units.
    pub offset: Vec2,
}

impl Compositor {
    pub fn new(params: &SurfaceParams) -> Self {
        Self {
            camera: params.camera(),
            light: params.light(),
            shininess: params.shininess,
            ambient: params.ambient,
            ior_ratio: params.ior_ratio,
            refraction_gain: params.refraction_gain,
        }
    }

    /// Lighting and refraction for the surface point at `uv` with local
    /// amplitude `amplitude` and gradient (`dx`, `dy`).
    pub fn shade(&self, uv: Vec2, amplitude: f32, dx: f32, dy: f32, resolution: Vec2) -> Shading {
        let normal = surface_normal(dx, dy);
        let view = normalize_guarded(uv.extend(0.0) - self.camera);
        let half = normalize_guarded(self.light - view);

        let specular = half.dot(normal).max(0.0).powf(self.shininess);
        let diffuse = normal.dot(self.light).max(0.0);

        let refracted = refract(view, normal, self.ior_ratio);
        let offset = refracted.truncate() * amplitude.abs() * self.refraction_gain / resolution;

        Shading {
            normal,
            diffuse,
            specular,
            offset,
        }
    }

    /// Final colour from a shading sample, the background, and the blocked
    /// fraction at this pixel.
    pub fn composite<B>(&self, uv: Vec2, shading: &Shading, blocked: f32, background: &B) -> Rgba
    where
        B: Background + ?Sized,
    {
        let base = background.sample(uv + shading.offset) * (1.0 - blocked.clamp(0.0, 1.0));
        let light = (shading.diffuse + shading.specular + self.ambient).clamp(0.0, 1.0);
        Rgba::opaque(base * light)
    }

    /// Render `field` and `mask` (both `width * height`) into `frame`.
    pub fn render<B>(&self, field: &[f32], mask: &[f32], background: &B, frame: &mut Frame)
    where
        B: Background + ?Sized,
    {
        let (width, height) = (frame.width, frame.height);
        debug_assert_eq!(field.len(), width * height);
        debug_assert_eq!(mask.len(), width * height);
        let resolution = Vec2::new(width as f32, height as f32);
        let at = |x: i64, y: i64| {
            let cx = x.clamp(0, width as i64 - 1) as usize;
            let cy = y.clamp(0, height as i64 - 1) as usize;
            field[cy * width + cx]
        };

        frame
            .pixels
            .par_chunks_mut(width)
            .enumerate()
            .for_each(|(y, row)| {
                for (x, out) in row.iter_mut().enumerate() {
                    let (xi, yi) = (x as i64, y as i64);
                    let dx = at(xi + 1, yi) - at(xi - 1, yi);
                    let dy = at(xi, yi + 1) - at(xi, yi - 1);
                    let uv = (Vec2::new(x as f32, y as f32) + 0.5) / resolution;
                    let idx = y * width + x;
                    let shading = self.shade(uv, field[idx], dx, dy, resolution);
                    *out = self.composite(uv, &shading, mask[idx], background);
                }
            });
    }
}

// =============================================================================
// Per-frame buffers
// =============================================================================

/// Height and blocked-mask planes extracted from a generation, plus their
/// blurred copies. Allocated once per simulation.
#[derive(Clone, Debug)]
pub struct SurfaceBuffers {
    height: Vec<f32>,
    mask: Vec<f32>,
    smooth_height: Vec<f32>,
    smooth_mask: Vec<f32>,
}

impl SurfaceBuffers {
    pub fn new(width: usize, height: usize) -> Self {
        let n = width * height;
        Self {
            height: vec![0.0; n],
            mask: vec![0.0; n],
            smooth_height: vec![0.0; n],
            smooth_mask: vec![0.0; n],
        }
    }

    /// Fill the planes from `gen` and return the (height, mask) pair the
    /// compositor should read.
    pub fn prepare(&mut self, gen: &Generation, smoothing: bool) -> (&[f32], &[f32]) {
        for ((h, m), cell) in self
            .height
            .iter_mut()
            .zip(self.mask.iter_mut())
            .zip(gen.cells())
        {
            *h = cell.amplitude;
            *m = if cell.blocked { 1.0 } else { 0.0 };
        }

        if smoothing {
            blur3x3(gen.width, gen.height, &self.height, &mut self.smooth_height);
            blur3x3(gen.width, gen.height, &self.mask, &mut self.smooth_mask);
            (self.smooth_height.as_slice(), self.smooth_mask.as_slice())
        } else {
            (self.height.as_slice(), self.mask.as_slice())
        }
    }
}
