//! Cardspin turns a still image into looping animation frames.
//!
//! A flat "card" can spin, yaw, flip, wag or combine those motions with
//! pseudo-3D foreshortening, or the image can be wrapped on a rotating globe.
//! Frames are rendered on the CPU and packed into a GIF by an external encoder.
//!
//! - Describe a run with a [`RunRequest`] and an [`AnimationMode`]
//! - [`prepare_run`] to validate it and build the per-run canvases
//! - [`generate`] to render every frame and hand them to an [`AnimationSink`]
#![forbid(unsafe_code)]

mod foundation;

/// Animation modes and their parameters.
pub mod animation;
/// Image loading and saving.
pub mod assets;
/// Back face resolution and simulation.
pub mod backside;
/// Frame files and the external GIF encoder.
pub mod encode;
/// Content cropping, square canvases and texture zoom.
pub mod geometry;
/// Textured sphere rendering.
pub mod globe;
/// Flat-card pose math and frame compositing.
pub mod motion;
/// End-to-end generation runs.
pub mod pipeline;
/// Resampling and compositing primitives.
pub mod raster;
/// Frame timing and the frame loop.
pub mod sequence;
/// Persisted settings.
pub mod settings;

pub use crate::foundation::core::{Affine, Frame, FrameTime, Point, Rgba8, Vec2};
pub use crate::foundation::error::{CardspinError, CardspinResult};

pub use crate::animation::mode::{
    AnimationMode, CompositeMotion, FlipMotion, GlobeMotion, SpinMotion,
};
pub use crate::assets::decode::{LoadedImage, load_image};
pub use crate::backside::resolver::{BackSource, BacksideMode};
pub use crate::encode::magick::{AnimationSink, GifSettings, MagickGifSink};
pub use crate::globe::renderer::GlobeAxis;
pub use crate::pipeline::run::{PreparedRun, RunReport, RunRequest, generate, prepare_run};
pub use crate::sequence::schedule::{FrameSchedule, RenderThreading};
pub use crate::settings::store::{Settings, SettingsStore};
