use super::*;

fn alpha_card() -> LoadedImage {
    let mut img = image::RgbaImage::from_pixel(10, 8, image::Rgba([0, 0, 0, 0]));
    for y in 2..6 {
        for x in 3..8 {
            img.put_pixel(x, y, image::Rgba([200, 10, 10, 255]));
        }
    }
    // faint speck below the threshold is ignored
    img.put_pixel(0, 0, image::Rgba([255, 255, 255, 8]));
    LoadedImage::new(img, true)
}

#[test]
fn alpha_bounds_are_tight() {
    let b = content_bounds(&alpha_card(), CropOptions::default()).unwrap();
    assert_eq!(
        b,
        ContentBounds {
            x: 3,
            y: 2,
            width: 5,
            height: 4
        }
    );
}

#[test]
fn crop_is_idempotent() {
    let opts = CropOptions::default();
    let once = crop_to_content(&alpha_card(), opts);
    assert_eq!(once.rgba.dimensions(), (5, 4));

    let twice = crop_to_content(&once, opts);
    assert_eq!(twice.rgba, once.rgba);
    assert_eq!(
        content_bounds(&once, opts),
        Some(ContentBounds::full(5, 4))
    );
}

#[test]
fn opaque_images_erode_border_color_within_tolerance() {
    let mut img = image::RgbaImage::from_pixel(9, 7, image::Rgba([250, 250, 250, 255]));
    // slight noise in the border stays within +-2
    img.put_pixel(8, 6, image::Rgba([248, 252, 250, 255]));
    for y in 1..4 {
        for x in 2..6 {
            img.put_pixel(x, y, image::Rgba([0, 0, 200, 255]));
        }
    }
    let loaded = LoadedImage::new(img, false);
    let b = content_bounds(&loaded, CropOptions::default()).unwrap();
    assert_eq!(
        b,
        ContentBounds {
            x: 2,
            y: 1,
            width: 4,
            height: 3
        }
    );
    let cropped = crop_to_content(&loaded, CropOptions::default());
    assert!(cropped.rgba.pixels().all(|p| p.0 == [0, 0, 200, 255]));
}

#[test]
fn fully_transparent_or_uniform_images_are_returned_unchanged() {
    let clear = LoadedImage::new(
        image::RgbaImage::from_pixel(4, 4, image::Rgba([9, 9, 9, 0])),
        true,
    );
    assert_eq!(content_bounds(&clear, CropOptions::default()), None);
    assert_eq!(crop_to_content(&clear, CropOptions::default()).rgba, clear.rgba);

    let flat = LoadedImage::new(
        image::RgbaImage::from_pixel(4, 4, image::Rgba([9, 9, 9, 255])),
        false,
    );
    assert_eq!(content_bounds(&flat, CropOptions::default()), None);
    assert_eq!(crop_to_content(&flat, CropOptions::default()).rgba, flat.rgba);
}

#[test]
fn mirrored_bounds_reflect_across_the_width() {
    let b = content_bounds(&alpha_card(), CropOptions::default()).unwrap();
    let m = b.mirrored_x(10);
    assert_eq!((m.x, m.y, m.width, m.height), (2, 2, 5, 4));

    let mirrored = LoadedImage::new(image::imageops::flip_horizontal(&alpha_card().rgba), true);
    assert_eq!(content_bounds(&mirrored, CropOptions::default()).unwrap(), m);
}
