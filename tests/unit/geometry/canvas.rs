use super::*;

fn visible_bounds(img: &image::RgbaImage) -> (u32, u32, u32, u32) {
    let mut min = (u32::MAX, u32::MAX);
    let mut max = (0, 0);
    for (x, y, p) in img.enumerate_pixels() {
        if p.0[3] > 0 {
            min = (min.0.min(x), min.1.min(y));
            max = (max.0.max(x), max.1.max(y));
        }
    }
    (min.0, min.1, max.0 - min.0 + 1, max.1 - min.1 + 1)
}

#[test]
fn fit_keeps_aspect_and_never_exceeds_side() {
    assert_eq!(fit_within_square(200, 100, 64), (64, 32));
    assert_eq!(fit_within_square(100, 200, 64), (32, 64));
    assert_eq!(fit_within_square(50, 50, 64), (64, 64));
    assert_eq!(fit_within_square(1000, 1, 64), (64, 1));
}

#[test]
fn wide_source_is_letterboxed_and_centered() {
    let src = image::RgbaImage::from_pixel(200, 100, image::Rgba([0, 128, 0, 255]));
    let canvas = square_canvas(&src, 64, Rgba8::TRANSPARENT);
    assert_eq!(canvas.dimensions(), (64, 64));

    let (x, y, w, h) = visible_bounds(&canvas);
    assert_eq!((x, y, w, h), (0, 16, 64, 32));
    assert_eq!(w * 100, h * 200);
    assert_eq!(canvas.get_pixel(32, 32).0, [0, 128, 0, 255]);
    assert_eq!(canvas.get_pixel(32, 2).0, [0, 0, 0, 0]);
}

#[test]
fn background_fills_the_padding() {
    let src = image::RgbaImage::from_pixel(10, 40, image::Rgba([255, 0, 0, 255]));
    let canvas = square_canvas(&src, 40, Rgba8::WHITE);
    assert_eq!(canvas.get_pixel(0, 0).0, [255, 255, 255, 255]);
    assert_eq!(canvas.get_pixel(20, 20).0, [255, 0, 0, 255]);
}

#[test]
fn translucent_source_blends_over_background() {
    let src = image::RgbaImage::from_pixel(8, 8, image::Rgba([255, 255, 255, 0]));
    let canvas = square_canvas(&src, 8, Rgba8::BLACK);
    assert!(canvas.pixels().all(|p| p.0 == [0, 0, 0, 255]));
}
