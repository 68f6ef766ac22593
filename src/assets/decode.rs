use std::path::Path;

use crate::foundation::error::{CardspinError, CardspinResult};

/// A decoded source image in straight RGBA8, remembering whether the encoded
/// file carried an alpha channel (content cropping depends on it).
#[derive(Clone, Debug)]
pub struct LoadedImage {
    pub rgba: image::RgbaImage,
    pub has_alpha: bool,
}

impl LoadedImage {
    pub fn new(rgba: image::RgbaImage, has_alpha: bool) -> Self {
        Self { rgba, has_alpha }
    }

    pub fn width(&self) -> u32 {
        self.rgba.width()
    }

    pub fn height(&self) -> u32 {
        self.rgba.height()
    }
}

/// Decode encoded image bytes into straight RGBA8.
pub fn decode_image(bytes: &[u8]) -> CardspinResult<LoadedImage> {
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| CardspinError::decode_failure(format!("decode image from memory: {e}")))?;
    Ok(from_dynamic(dyn_img))
}

/// Load an image file. A nonexistent path is [`CardspinError::MissingFile`];
/// an existing but unreadable one is [`CardspinError::DecodeFailure`].
pub fn load_image(path: &Path) -> CardspinResult<LoadedImage> {
    if !path.exists() {
        return Err(CardspinError::missing_file(format!(
            "'{}' does not exist",
            path.display()
        )));
    }
    let dyn_img = image::ImageReader::open(path)
        .and_then(|r| r.with_guessed_format())
        .map_err(|e| CardspinError::decode_failure(format!("open '{}': {e}", path.display())))?
        .decode()
        .map_err(|e| CardspinError::decode_failure(format!("decode '{}': {e}", path.display())))?;
    if dyn_img.width() == 0 || dyn_img.height() == 0 {
        return Err(CardspinError::decode_failure(format!(
            "'{}' has zero width or height",
            path.display()
        )));
    }
    Ok(from_dynamic(dyn_img))
}

/// Write an RGBA8 image as PNG.
pub fn save_png(img: &image::RgbaImage, path: &Path) -> CardspinResult<()> {
    img.save_with_format(path, image::ImageFormat::Png)
        .map_err(|e| CardspinError::resource_failure(format!("write png '{}': {e}", path.display())))
}

fn from_dynamic(dyn_img: image::DynamicImage) -> LoadedImage {
    let has_alpha = dyn_img.color().has_alpha();
    LoadedImage {
        rgba: dyn_img.to_rgba8(),
        has_alpha,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
