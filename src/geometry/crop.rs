use crate::assets::decode::LoadedImage;

/// Tight pixel rectangle inside an image.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ContentBounds {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl ContentBounds {
    pub fn full(width: u32, height: u32) -> Self {
        Self {
            x: 0,
            y: 0,
            width,
            height,
        }
    }

    /// The same rectangle in a horizontally mirrored image of `image_width`.
    pub fn mirrored_x(self, image_width: u32) -> Self {
        Self {
            x: image_width.saturating_sub(self.x + self.width),
            ..self
        }
    }
}

/// Thresholds used when looking for the visible part of an image.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CropOptions {
    /// Pixels with alpha `<=` this count as transparent.
    pub alpha_threshold: u8,
    /// Max per-channel distance from the border color for a pixel to count as border.
    pub color_tolerance: u8,
}

impl Default for CropOptions {
    fn default() -> Self {
        Self {
            alpha_threshold: 8,
            color_tolerance: 2,
        }
    }
}

/// Bounds of the visible content.
///
/// Images with an alpha channel use the alpha bounding box. Opaque images erode
/// each side while the whole edge matches the top-left pixel's color. `None`
/// when nothing would remain (fully transparent or uniformly border-colored).
pub fn content_bounds(img: &LoadedImage, opts: CropOptions) -> Option<ContentBounds> {
    if img.width() == 0 || img.height() == 0 {
        return None;
    }
    if img.has_alpha {
        alpha_bounds(&img.rgba, opts.alpha_threshold)
    } else {
        border_bounds(&img.rgba, opts.color_tolerance)
    }
}

/// Crop to [`content_bounds`]; returns the image unchanged when no bounds exist.
pub fn crop_to_content(img: &LoadedImage, opts: CropOptions) -> LoadedImage {
    match content_bounds(img, opts) {
        Some(b) => crop_to_bounds(img, b),
        None => img.clone(),
    }
}

/// Crop to `bounds`, clamped to the image.
pub fn crop_to_bounds(img: &LoadedImage, bounds: ContentBounds) -> LoadedImage {
    if bounds == ContentBounds::full(img.width(), img.height()) {
        return img.clone();
    }
    let cropped = image::imageops::crop_imm(&img.rgba, bounds.x, bounds.y, bounds.width, bounds.height);
    LoadedImage::new(cropped.to_image(), img.has_alpha)
}

fn alpha_bounds(img: &image::RgbaImage, threshold: u8) -> Option<ContentBounds> {
    let (mut min_x, mut min_y) = (u32::MAX, u32::MAX);
    let (mut max_x, mut max_y) = (0u32, 0u32);
    let mut any = false;
    for (x, y, px) in img.enumerate_pixels() {
        if px.0[3] > threshold {
            any = true;
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }
    }
    any.then(|| ContentBounds {
        x: min_x,
        y: min_y,
        width: max_x - min_x + 1,
        height: max_y - min_y + 1,
    })
}

fn border_bounds(img: &image::RgbaImage, tolerance: u8) -> Option<ContentBounds> {
    let border = img.get_pixel(0, 0).0;
    let close = |x: u32, y: u32| {
        let p = img.get_pixel(x, y).0;
        (0..3).all(|i| p[i].abs_diff(border[i]) <= tolerance)
    };

    let (w, h) = img.dimensions();
    // Half-open ranges [left, right) x [top, bottom).
    let mut left = 0u32;
    while left < w && (0..h).all(|y| close(left, y)) {
        left += 1;
    }
    let mut right = w;
    while right > left && (0..h).all(|y| close(right - 1, y)) {
        right -= 1;
    }
    let mut top = 0u32;
    while top < h && (left..right).all(|x| close(x, top)) {
        top += 1;
    }
    let mut bottom = h;
    while bottom > top && (left..right).all(|x| close(x, bottom - 1)) {
        bottom -= 1;
    }

    (right > left && bottom > top).then(|| ContentBounds {
        x: left,
        y: top,
        width: right - left,
        height: bottom - top,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/crop.rs"]
mod tests;
