use std::str::FromStr;

use crate::foundation::error::{CardspinError, CardspinResult};

pub use kurbo::{Affine, Point, Vec2};

/// One rendered output frame: straight-alpha RGBA8, always `size x size`.
pub type Frame = image::RgbaImage;

/// Straight (non-premultiplied) RGBA8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);
    pub const BLACK: Self = Self::new(0, 0, 0, 255);
    pub const WHITE: Self = Self::new(255, 255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    pub fn to_pixel(self) -> image::Rgba<u8> {
        image::Rgba([self.r, self.g, self.b, self.a])
    }

    pub fn from_pixel(px: image::Rgba<u8>) -> Self {
        let [r, g, b, a] = px.0;
        Self { r, g, b, a }
    }

    pub fn is_transparent(self) -> bool {
        self.a == 0
    }
}

impl FromStr for Rgba8 {
    type Err = CardspinError;

    /// Accepts `transparent`, `black`, `white`, `#rrggbb` and `#rrggbbaa`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        match name.as_str() {
            "transparent" | "none" => return Ok(Self::TRANSPARENT),
            "black" => return Ok(Self::BLACK),
            "white" => return Ok(Self::WHITE),
            _ => {}
        }

        let hex = name
            .strip_prefix('#')
            .ok_or_else(|| CardspinError::invalid_input(format!("unknown color '{s}'")))?;
        let channel = |i: usize| -> CardspinResult<u8> {
            hex.get(i..i + 2)
                .and_then(|h| u8::from_str_radix(h, 16).ok())
                .ok_or_else(|| CardspinError::invalid_input(format!("invalid hex color '{s}'")))
        };
        match hex.len() {
            6 => Ok(Self::opaque(channel(0)?, channel(2)?, channel(4)?)),
            8 => Ok(Self::new(channel(0)?, channel(2)?, channel(4)?, channel(6)?)),
            _ => Err(CardspinError::invalid_input(format!(
                "hex color '{s}' must be #rrggbb or #rrggbbaa"
            ))),
        }
    }
}

/// Position of one frame inside a run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameTime {
    pub index: u64,
    /// Normalized time in `[0, 1)`.
    pub t: f64,
    /// `t` scaled to the run length in seconds.
    pub elapsed_sec: f64,
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
