//! Decides which image represents the back face of a run.
//!
//! Resolution is a pure function of its inputs: the persisted backside mode is
//! read by the caller and passed in, never looked up here.

use std::path::{Path, PathBuf};

use crate::{
    assets::decode::{LoadedImage, load_image, save_png},
    foundation::error::{CardspinError, CardspinResult},
    geometry::crop::{CropOptions, content_bounds, crop_to_bounds, crop_to_content},
    raster::sample::resize_premultiplied,
};

/// Luma blend toward gray applied to simulated backs (share of original chroma kept).
pub const SIMULATED_SATURATION: f64 = 0.85;
/// RGB multiplier applied to simulated backs.
pub const SIMULATED_DIM: f64 = 0.90;

const SIMULATED_BACK_FILE: &str = "back_simulated.png";

/// Persisted "backside mode" setting.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum BacksideMode {
    /// Use an explicit back if given, otherwise render single-sided.
    #[default]
    Off,
    /// Synthesize the back from the front.
    Simulate,
    /// Synthesize the back and show it upside down in flip motion.
    SimulateUpsideDown,
}

impl BacksideMode {
    pub fn simulates(self) -> bool {
        !matches!(self, Self::Off)
    }

    pub fn upside_down(self) -> bool {
        matches!(self, Self::SimulateUpsideDown)
    }
}

/// Where the back face of a run comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BackSource {
    /// User-supplied path, used verbatim.
    Explicit(PathBuf),
    /// Derived from the front and written to the run's scratch directory.
    Simulated(PathBuf),
    /// No back: the front is reused.
    Absent,
}

impl BackSource {
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::Simulated(p) => Some(p),
            Self::Absent => None,
        }
    }
}

/// Resolve the back face for one run.
///
/// `scratch_dir` must outlive every consumer of the returned path.
#[tracing::instrument(skip(scratch_dir))]
pub fn resolve_backside(
    front: &Path,
    explicit_back: Option<&Path>,
    mode: BacksideMode,
    scratch_dir: &Path,
) -> CardspinResult<BackSource> {
    let explicit_back = explicit_back.filter(|p| !p.as_os_str().is_empty());

    if let Some(back) = explicit_back
        && !mode.simulates()
    {
        if !back.exists() {
            return Err(CardspinError::missing_file(format!(
                "back image '{}' does not exist",
                back.display()
            )));
        }
        return Ok(BackSource::Explicit(back.to_path_buf()));
    }

    if !mode.simulates() {
        return Ok(BackSource::Absent);
    }

    if !front.exists() {
        return Err(CardspinError::missing_file(format!(
            "front image '{}' does not exist; cannot simulate backside",
            front.display()
        )));
    }
    let front_img = load_image(front)?;
    let back = simulate_backside(&front_img.rgba);

    let out = scratch_dir.join(SIMULATED_BACK_FILE);
    save_png(&back, &out)?;
    tracing::debug!(path = %out.display(), "simulated backside written");
    Ok(BackSource::Simulated(out))
}

/// Mirror horizontally, pull 15% toward luma, darken by 10%. Alpha is kept exactly.
pub fn simulate_backside(front: &image::RgbaImage) -> image::RgbaImage {
    let mut back = image::imageops::flip_horizontal(front);
    for px in back.pixels_mut() {
        let [r, g, b, a] = px.0;
        let (r, g, b) = (f64::from(r), f64::from(g), f64::from(b));
        let gray = (0.299 * r + 0.587 * g + 0.114 * b).trunc();
        let tone = |c: f64| -> u8 {
            let desat = (gray + (c - gray) * SIMULATED_SATURATION).trunc();
            (desat * SIMULATED_DIM).trunc().clamp(0.0, 255.0) as u8
        };
        px.0 = [tone(r), tone(g), tone(b), a];
    }
    back
}

/// Front and back images ready for canvas preparation.
#[derive(Clone, Debug)]
pub struct ResolvedFaces {
    pub front: LoadedImage,
    /// Same dimensions as `front`.
    pub back: LoadedImage,
    /// True when the front stands in for the back.
    pub single_sided: bool,
    pub warnings: Vec<String>,
}

/// Load the resolved back (degrading to the front on failure), optionally crop
/// both faces, and stretch the back to the front's exact size.
pub fn load_faces(
    front: LoadedImage,
    source: &BackSource,
    crop: Option<CropOptions>,
) -> ResolvedFaces {
    let mut warnings = Vec::new();
    let loaded_back = match source.path() {
        None => None,
        Some(path) => match load_image(path) {
            Ok(img) => Some(img),
            Err(e) => {
                tracing::warn!(error = %e, "back image unusable, rendering single-sided");
                warnings.push(format!("back image ignored: {e}"));
                None
            }
        },
    };

    let full_width = front.width();
    let front_bounds = crop.and_then(|opts| content_bounds(&front, opts));
    let front = match front_bounds {
        Some(b) => crop_to_bounds(&front, b),
        None => front,
    };

    let (back, single_sided) = match loaded_back {
        None => (front.clone(), true),
        Some(back) => {
            let back = match (source, crop) {
                // The synthesized back is the mirrored front, so it takes the mirrored front crop.
                (BackSource::Simulated(_), _) => {
                    let back = LoadedImage::new(back.rgba, front.has_alpha);
                    match front_bounds {
                        Some(b) if back.width() == full_width => {
                            crop_to_bounds(&back, b.mirrored_x(full_width))
                        }
                        _ => back,
                    }
                }
                (_, Some(opts)) => crop_to_content(&back, opts),
                (_, None) => back,
            };
            let rgba = if back.rgba.dimensions() == front.rgba.dimensions() {
                back.rgba
            } else {
                resize_premultiplied(&back.rgba, front.width(), front.height())
            };
            (LoadedImage::new(rgba, back.has_alpha), false)
        }
    };

    ResolvedFaces {
        front,
        back,
        single_sided,
        warnings,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/backside/resolver.rs"]
mod tests;
