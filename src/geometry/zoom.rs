use crate::{
    foundation::core::Rgba8,
    raster::{
        composite::{draw_over, filled},
        sample::resize_premultiplied,
    },
};

/// Percentages within this distance of 100 leave the image untouched.
pub const ZOOM_IDENTITY_TOLERANCE: f64 = 0.1;

/// Zoom by `percent` (100 = identity).
///
/// Below 100 the image shrinks and is centered on a same-size canvas padded
/// with `pad`. Above 100 a centered excerpt of `original * 100 / percent` is
/// cropped out, so features appear larger once resampled across a surface.
/// Non-positive percentages clamp to 1%.
pub fn zoom(src: &image::RgbaImage, percent: f64, pad: Rgba8) -> image::RgbaImage {
    if (percent - 100.0).abs() < ZOOM_IDENTITY_TOLERANCE || src.width() == 0 || src.height() == 0
    {
        return src.clone();
    }
    let percent = if percent <= 0.0 { 1.0 } else { percent };
    let (w, h) = src.dimensions();

    if percent > 100.0 {
        let keep = 100.0 / percent;
        let new_w = ((f64::from(w) * keep).round() as u32).max(1);
        let new_h = ((f64::from(h) * keep).round() as u32).max(1);
        let x = (w - new_w) / 2;
        let y = (h - new_h) / 2;
        image::imageops::crop_imm(src, x, y, new_w, new_h).to_image()
    } else {
        let scale = percent / 100.0;
        let new_w = ((f64::from(w) * scale).round() as u32).max(1);
        let new_h = ((f64::from(h) * scale).round() as u32).max(1);
        let shrunk = resize_premultiplied(src, new_w, new_h);
        let mut out = filled(w, h, pad);
        draw_over(
            &mut out,
            &shrunk,
            i64::from((w - new_w) / 2),
            i64::from((h - new_h) / 2),
        );
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/zoom.rs"]
mod tests;
