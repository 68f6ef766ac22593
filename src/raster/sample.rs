//! Resampling primitives.
//!
//! Pixel `(i, j)` covers the unit square `[i, i+1) x [j, j+1)`; its center is at
//! `(i + 0.5, j + 0.5)`. All interpolation happens on premultiplied values so
//! transparent texels never bleed their color into visible neighbours.

use crate::{
    foundation::{
        core::Affine,
        math::{premultiply, unpremultiply},
    },
    raster::composite::over_premul_f32,
};

fn texel_premul(img: &image::RgbaImage, x: i64, y: i64) -> [f32; 4] {
    if x < 0 || y < 0 || x >= i64::from(img.width()) || y >= i64::from(img.height()) {
        return [0.0; 4];
    }
    premultiply(img.get_pixel(x as u32, y as u32).0)
}

/// Bilinear sample at continuous image coordinates; outside the image is transparent.
pub fn sample_bilinear_premul(img: &image::RgbaImage, x: f64, y: f64) -> [f32; 4] {
    let fx = x - 0.5;
    let fy = y - 0.5;
    let x0 = fx.floor();
    let y0 = fy.floor();
    let tx = (fx - x0) as f32;
    let ty = (fy - y0) as f32;
    let (x0, y0) = (x0 as i64, y0 as i64);

    let c00 = texel_premul(img, x0, y0);
    let c10 = texel_premul(img, x0 + 1, y0);
    let c01 = texel_premul(img, x0, y0 + 1);
    let c11 = texel_premul(img, x0 + 1, y0 + 1);

    let mut out = [0.0f32; 4];
    for i in 0..4 {
        let top = c00[i] + (c10[i] - c00[i]) * tx;
        let bottom = c01[i] + (c11[i] - c01[i]) * tx;
        out[i] = top + (bottom - top) * ty;
    }
    out
}

/// Draw `src` onto `dst` under `transform` (source pixel space -> destination
/// pixel space), bilinear-filtered and composited source-over.
///
/// Singular transforms draw nothing.
pub fn warp_over(dst: &mut image::RgbaImage, src: &image::RgbaImage, transform: Affine) {
    if transform.determinant().abs() < 1e-12 {
        return;
    }
    let inv = transform.inverse();

    let (sw, sh) = (f64::from(src.width()), f64::from(src.height()));
    let bounds = transform.transform_rect_bbox(kurbo::Rect::new(0.0, 0.0, sw, sh));
    let x_start = bounds.x0.floor().max(0.0) as u32;
    let y_start = bounds.y0.floor().max(0.0) as u32;
    let x_end = (bounds.x1.ceil().max(0.0) as u32).min(dst.width());
    let y_end = (bounds.y1.ceil().max(0.0) as u32).min(dst.height());

    for y in y_start..y_end {
        for x in x_start..x_end {
            let p = inv * kurbo::Point::new(f64::from(x) + 0.5, f64::from(y) + 0.5);
            let s = sample_bilinear_premul(src, p.x, p.y);
            if s[3] <= 0.0 {
                continue;
            }
            let d = dst.get_pixel_mut(x, y);
            d.0 = over_premul_f32(premultiply(d.0), s);
        }
    }
}

/// Resize with a triangle (bilinear) filter on premultiplied values.
pub fn resize_premultiplied(src: &image::RgbaImage, width: u32, height: u32) -> image::RgbaImage {
    let width = width.max(1);
    let height = height.max(1);
    if src.width() == width && src.height() == height {
        return src.clone();
    }

    // Float buffers are clamped to 0..=1 by the resizer, so normalize first.
    let premul = image::Rgba32FImage::from_fn(src.width(), src.height(), |x, y| {
        image::Rgba(premultiply(src.get_pixel(x, y).0).map(|c| c / 255.0))
    });
    let resized = image::imageops::resize(
        &premul,
        width,
        height,
        image::imageops::FilterType::Triangle,
    );
    image::RgbaImage::from_fn(width, height, |x, y| {
        image::Rgba(unpremultiply(resized.get_pixel(x, y).0.map(|c| c * 255.0)))
    })
}

#[cfg(test)]
#[path = "../../tests/unit/raster/sample.rs"]
mod tests;
