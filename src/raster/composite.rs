use crate::foundation::{
    core::Rgba8,
    math::{clamp_u8, premultiply, unpremultiply},
};

pub type StraightRgba8 = [u8; 4];

/// Source-over for straight-alpha pixels.
pub fn over(dst: StraightRgba8, src: StraightRgba8) -> StraightRgba8 {
    if src[3] == 0 {
        return dst;
    }
    if src[3] == 255 || dst[3] == 0 {
        return src;
    }
    over_premul_f32(premultiply(dst), premultiply(src))
}

/// Source-over where `src` is already premultiplied (f32, 0..=255 channels).
pub fn over_premul_f32(dst_premul: [f32; 4], src_premul: [f32; 4]) -> StraightRgba8 {
    let inv = 1.0 - src_premul[3] / 255.0;
    unpremultiply([
        src_premul[0] + dst_premul[0] * inv,
        src_premul[1] + dst_premul[1] * inv,
        src_premul[2] + dst_premul[2] * inv,
        src_premul[3] + dst_premul[3] * inv,
    ])
}

/// A `width x height` image filled with `color`.
pub fn filled(width: u32, height: u32, color: Rgba8) -> image::RgbaImage {
    image::RgbaImage::from_pixel(width, height, color.to_pixel())
}

/// Composite `src` over `dst` with its top-left corner at `(x, y)`, clipping to `dst`.
pub fn draw_over(dst: &mut image::RgbaImage, src: &image::RgbaImage, x: i64, y: i64) {
    let (dw, dh) = (i64::from(dst.width()), i64::from(dst.height()));
    for (sx, sy, px) in src.enumerate_pixels() {
        let tx = x + i64::from(sx);
        let ty = y + i64::from(sy);
        if tx < 0 || ty < 0 || tx >= dw || ty >= dh {
            continue;
        }
        let d = dst.get_pixel_mut(tx as u32, ty as u32);
        d.0 = over(d.0, px.0);
    }
}

/// Scale RGB by `factor` (0..=1), leaving alpha untouched.
pub fn scale_rgb(px: StraightRgba8, factor: f64) -> StraightRgba8 {
    let f = factor.clamp(0.0, 1.0);
    [
        clamp_u8(f64::from(px[0]) * f),
        clamp_u8(f64::from(px[1]) * f),
        clamp_u8(f64::from(px[2]) * f),
        px[3],
    ]
}

#[cfg(test)]
#[path = "../../tests/unit/raster/composite.rs"]
mod tests;
