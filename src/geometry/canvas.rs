use crate::{
    foundation::core::Rgba8,
    raster::{
        composite::{draw_over, filled},
        sample::resize_premultiplied,
    },
};

/// Largest `(w, h)` with the source aspect ratio that fits in `side x side`.
///
/// Integer arithmetic truncates, never exceeding `side`; each dimension is at least 1.
pub fn fit_within_square(width: u32, height: u32, side: u32) -> (u32, u32) {
    if width == 0 || height == 0 {
        return (side.max(1), side.max(1));
    }
    let (w, h, s) = (u64::from(width), u64::from(height), u64::from(side));
    let scaled_h = s * h / w;
    let (out_w, out_h) = if scaled_h <= s {
        (s, scaled_h)
    } else {
        (s * w / h, s)
    };
    (out_w.max(1) as u32, out_h.max(1) as u32)
}

/// Center `src` on a `side x side` square filled with `background`, scaled to
/// fit while preserving its aspect ratio.
pub fn square_canvas(src: &image::RgbaImage, side: u32, background: Rgba8) -> image::RgbaImage {
    let (w, h) = fit_within_square(src.width(), src.height(), side);
    let scaled = resize_premultiplied(src, w, h);
    let mut canvas = filled(side, side, background);
    let x = i64::from((side - w) / 2);
    let y = i64::from((side - h) / 2);
    draw_over(&mut canvas, &scaled, x, y);
    canvas
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/canvas.rs"]
mod tests;
