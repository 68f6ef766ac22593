//! Orthographic textured sphere.
//!
//! The front texture covers the hemisphere facing the viewer at rotation 0
//! (longitude in `[-pi/2, pi/2]`); the back texture, when present, covers the
//! opposite hemisphere with its own longitude origin.

use std::f64::consts::{FRAC_PI_2, PI, TAU};
use std::str::FromStr;

use crate::{
    animation::mode::GlobeMotion,
    assets::decode::LoadedImage,
    foundation::{
        core::{Frame, FrameTime, Rgba8},
        error::{CardspinError, CardspinResult},
        math::{clamp_u8, wrap_pi},
    },
    geometry::zoom::{ZOOM_IDENTITY_TOLERANCE, zoom},
    raster::composite::{filled, scale_rgb},
};

/// Lowest brightness the lighting model applies.
pub const LIGHTING_FLOOR: f64 = 0.75;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum GlobeAxis {
    /// Spin about the vertical axis; the surface moves left and right.
    #[default]
    Horizontal,
    /// Spin about the horizontal axis; the surface moves up and down.
    Vertical,
    /// Full-rate horizontal spin followed by a half-rate vertical one.
    Both,
}

impl FromStr for GlobeAxis {
    type Err = CardspinError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "horizontal" | "h" => Ok(Self::Horizontal),
            "vertical" | "v" => Ok(Self::Vertical),
            "both" => Ok(Self::Both),
            other => Err(CardspinError::invalid_input(format!(
                "unknown globe axis '{other}' (expected horizontal, vertical or both)"
            ))),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlobeStyle {
    pub axis: GlobeAxis,
    /// Shown where the texture is empty.
    pub surface: Rgba8,
    pub lighting: bool,
}

/// Textures wrapped on the sphere, zoomed once per run.
#[derive(Clone, Debug)]
pub struct GlobeTextures {
    pub front: LoadedImage,
    pub back: Option<LoadedImage>,
}

impl GlobeTextures {
    /// Apply `zoom_percent` to both textures, padding with `surface` when zooming out.
    pub fn prepare(
        front: LoadedImage,
        back: Option<LoadedImage>,
        zoom_percent: f64,
        surface: Rgba8,
    ) -> Self {
        if (zoom_percent - 100.0).abs() < ZOOM_IDENTITY_TOLERANCE {
            return Self { front, back };
        }
        let zoomed = |img: LoadedImage| {
            let rgba = zoom(&img.rgba, zoom_percent, surface);
            LoadedImage::new(rgba, img.has_alpha)
        };
        Self {
            front: zoomed(front),
            back: back.map(zoomed),
        }
    }
}

/// Unit normal of the visible sphere point under canvas offset `(x, y)` from
/// the center, rotated by `rotation_deg` about `axis`. `None` outside the disc.
fn surface_normal(x: f64, y: f64, radius: f64, rotation_deg: f64, axis: GlobeAxis) -> Option<[f64; 3]> {
    let dist_sq = x * x + y * y;
    let r_sq = radius * radius;
    if dist_sq > r_sq {
        return None;
    }
    let z = (r_sq - dist_sq).sqrt();
    let (mut nx, mut ny, mut nz) = (x / radius, y / radius, z / radius);
    let len = (nx * nx + ny * ny + nz * nz).sqrt();
    if len > 0.0 {
        nx /= len;
        ny /= len;
        nz /= len;
    }

    let rot = rotation_deg.to_radians();
    let (sin, cos) = rot.sin_cos();
    match axis {
        GlobeAxis::Horizontal => {
            (nx, nz) = (nx * cos - nz * sin, nx * sin + nz * cos);
        }
        GlobeAxis::Vertical => {
            (ny, nz) = (ny * cos - nz * sin, ny * sin + nz * cos);
        }
        GlobeAxis::Both => {
            (nx, nz) = (nx * cos - nz * sin, nx * sin + nz * cos);
            let (sin2, cos2) = (rot * 0.5).sin_cos();
            (ny, nz) = (ny * cos2 - nz * sin2, ny * sin2 + nz * cos2);
        }
    }
    Some([nx, ny, nz])
}

/// Texel at longitude/latitude (radians), bilinearly filtered in straight RGBA.
///
/// A texture with alpha whose four neighbouring texels are all fully
/// transparent yields `surface` instead.
pub fn sample_texture(textures: &GlobeTextures, lon: f64, lat: f64, surface: Rgba8) -> [u8; 4] {
    let front_side = (-FRAC_PI_2..=FRAC_PI_2).contains(&lon);
    let (texture, lon) = match (&textures.back, front_side) {
        (Some(back), false) => (back, wrap_pi(lon - PI)),
        _ => (&textures.front, lon),
    };
    let img = &texture.rgba;
    let (w, h) = img.dimensions();
    if w == 0 || h == 0 {
        return surface.to_pixel().0;
    }

    let u = (lon + PI) / TAU;
    let v = (lat + FRAC_PI_2) / PI;
    let x = (u * f64::from(w - 1)).clamp(0.0, f64::from(w - 1));
    let y = (v * f64::from(h - 1)).clamp(0.0, f64::from(h - 1));

    let x0 = x.floor() as u32;
    let y0 = y.floor() as u32;
    let x1 = (x0 + 1).min(w - 1);
    let y1 = (y0 + 1).min(h - 1);
    let fx = x - f64::from(x0);
    let fy = y - f64::from(y0);

    let c00 = img.get_pixel(x0, y0).0;
    let c10 = img.get_pixel(x1, y0).0;
    let c01 = img.get_pixel(x0, y1).0;
    let c11 = img.get_pixel(x1, y1).0;

    if texture.has_alpha && [c00, c10, c01, c11].iter().all(|c| c[3] == 0) {
        return surface.to_pixel().0;
    }

    let mut out = [0u8; 4];
    for (i, o) in out.iter_mut().enumerate() {
        let v = f64::from(c00[i]) * (1.0 - fx) * (1.0 - fy)
            + f64::from(c10[i]) * fx * (1.0 - fy)
            + f64::from(c01[i]) * (1.0 - fx) * fy
            + f64::from(c11[i]) * fx * fy;
        *o = clamp_u8(v);
    }
    out
}

/// One `side x side` globe frame at `rotation_deg`. Pixels off the disc stay transparent.
pub fn render_globe_frame(
    textures: &GlobeTextures,
    rotation_deg: f64,
    side: u32,
    style: GlobeStyle,
) -> Frame {
    let mut frame = filled(side, side, Rgba8::TRANSPARENT);
    let radius = f64::from(side) / 2.0;

    for (px, py, out) in frame.enumerate_pixels_mut() {
        let x = f64::from(px) - radius;
        let y = f64::from(py) - radius;
        let Some([nx, ny, nz]) = surface_normal(x, y, radius, rotation_deg, style.axis) else {
            continue;
        };

        let lat = ny.clamp(-1.0, 1.0).asin();
        let lon = nx.atan2(nz);
        let mut texel = sample_texture(textures, lon, lat, style.surface);
        if style.lighting {
            texel = scale_rgb(texel, nz.abs().clamp(LIGHTING_FLOOR, 1.0));
        }
        out.0 = texel;
    }
    frame
}

/// Renders globe frames for one run.
#[derive(Clone, Debug)]
pub struct GlobeRenderer {
    motion: GlobeMotion,
    textures: GlobeTextures,
    side: u32,
    surface: Rgba8,
}

impl GlobeRenderer {
    pub fn new(
        motion: GlobeMotion,
        textures: GlobeTextures,
        side: u32,
        surface: Rgba8,
    ) -> CardspinResult<Self> {
        if side == 0 {
            return Err(CardspinError::invalid_input("globe size must be positive"));
        }
        Ok(Self {
            motion,
            textures,
            side,
            surface,
        })
    }

    pub fn rotation_at(&self, time: FrameTime) -> f64 {
        self.motion.rotations * 360.0 * time.t
    }

    pub fn render(&self, time: FrameTime) -> Frame {
        let style = GlobeStyle {
            axis: self.motion.axis,
            surface: self.surface,
            lighting: self.motion.lighting,
        };
        render_globe_frame(&self.textures, self.rotation_at(time), self.side, style)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/globe/renderer.rs"]
mod tests;
