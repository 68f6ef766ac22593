//! Frames are written as numbered PNGs and handed to an [`magick::AnimationSink`] in order.

/// Numbered PNG frame files.
pub mod frames;
/// ImageMagick-based GIF sink.
pub mod magick;
