use crate::{
    foundation::error::{CardspinError, CardspinResult},
    globe::renderer::GlobeAxis,
};

/// Smallest canvas accepted for the flat-card modes.
pub const CARD_MIN_SIZE: u32 = 32;
/// Canvas used by the flat-card modes when none is requested.
pub const CARD_DEFAULT_SIZE: u32 = 256;
/// Smallest canvas accepted for the globe.
pub const GLOBE_MIN_SIZE: u32 = 64;
/// Canvas used by the globe when none is requested.
pub const GLOBE_DEFAULT_SIZE: u32 = 512;

/// What kind of motion a run renders, with the parameters that mode needs.
#[derive(Clone, Debug, PartialEq)]
pub enum AnimationMode {
    /// Card spinning about its vertical axis with horizontal foreshortening.
    Spin(SpinMotion),
    /// Yaw with a chosen number of full rotations over the run.
    Yaw { rotations: f64 },
    /// Pitch about the horizontal axis, or a static shot of the back.
    Flip(FlipMotion),
    /// In-plane back-and-forth wag, no face swap.
    Oscillate { max_degrees: f64 },
    /// Any combination of in-plane spin, yaw and flip.
    Composite(CompositeMotion),
    /// Texture wrapped on a rotating sphere.
    Globe(GlobeMotion),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SpinMotion {
    /// One linear 0..360 degree sweep over the run.
    FullTurn,
    /// `angle = sin(2*pi*t*cycles) * max_angle_deg`.
    Oscillating { cycles: u32, max_angle_deg: f64 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FlipMotion {
    /// `false` renders a single frame showing the back outright.
    pub animate: bool,
    /// Full flips over the run (floored at 1).
    pub cycles: u32,
}

impl Default for FlipMotion {
    fn default() -> Self {
        Self {
            animate: true,
            cycles: 1,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CompositeMotion {
    /// In-plane rotation speed; `None` disables the Z axis.
    pub z_degrees_per_sec: Option<f64>,
    /// Full yaw rotations over the run; `None` disables yaw.
    pub yaw_rotations: Option<f64>,
    pub flip: Option<FlipMotion>,
}

impl CompositeMotion {
    pub fn is_empty(&self) -> bool {
        self.z_degrees_per_sec.is_none() && self.yaw_rotations.is_none() && self.flip.is_none()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlobeMotion {
    /// Full turns over the run.
    pub rotations: f64,
    pub axis: GlobeAxis,
    /// Texture zoom, 100 = unchanged.
    pub zoom_percent: f64,
    pub lighting: bool,
}

impl Default for GlobeMotion {
    fn default() -> Self {
        Self {
            rotations: 1.0,
            axis: GlobeAxis::Horizontal,
            zoom_percent: 100.0,
            lighting: true,
        }
    }
}

impl AnimationMode {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Spin(SpinMotion::FullTurn) => "spin",
            Self::Spin(SpinMotion::Oscillating { .. }) => "spin-oscillating",
            Self::Yaw { .. } => "yaw",
            Self::Flip(_) => "flip",
            Self::Oscillate { .. } => "oscillate",
            Self::Composite(_) => "composite",
            Self::Globe(_) => "globe",
        }
    }

    pub fn is_globe(&self) -> bool {
        matches!(self, Self::Globe(_))
    }

    /// Modes that always produce exactly one frame.
    pub fn is_static(&self) -> bool {
        matches!(self, Self::Flip(FlipMotion { animate: false, .. }))
    }

    pub fn min_size(&self) -> u32 {
        if self.is_globe() {
            GLOBE_MIN_SIZE
        } else {
            CARD_MIN_SIZE
        }
    }

    pub fn default_size(&self) -> u32 {
        if self.is_globe() {
            GLOBE_DEFAULT_SIZE
        } else {
            CARD_DEFAULT_SIZE
        }
    }

    /// Reject parameters no frame could be rendered from.
    pub fn validate(&self) -> CardspinResult<()> {
        fn finite(name: &str, v: f64) -> CardspinResult<()> {
            if v.is_finite() {
                Ok(())
            } else {
                Err(CardspinError::invalid_input(format!("{name} must be finite")))
            }
        }

        match *self {
            Self::Spin(SpinMotion::FullTurn) => Ok(()),
            Self::Spin(SpinMotion::Oscillating { max_angle_deg, .. }) => {
                finite("spin max angle", max_angle_deg)
            }
            Self::Yaw { rotations } => finite("yaw rotations", rotations),
            Self::Flip(_) => Ok(()),
            Self::Oscillate { max_degrees } => finite("oscillate max degrees", max_degrees),
            Self::Composite(c) => {
                if c.is_empty() {
                    return Err(CardspinError::invalid_input(
                        "composite mode needs at least one of z-spin, yaw or flip",
                    ));
                }
                if let Some(z) = c.z_degrees_per_sec {
                    finite("z-spin speed", z)?;
                }
                if let Some(r) = c.yaw_rotations {
                    finite("yaw rotations", r)?;
                }
                Ok(())
            }
            Self::Globe(g) => {
                finite("globe rotations", g.rotations)?;
                finite("globe zoom", g.zoom_percent)
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/mode.rs"]
mod tests;
