//! Per-frame pose of a flat card: in-plane rotation, foreshortening and which
//! face is visible.

use std::f64::consts::TAU;

use crate::{
    animation::mode::{AnimationMode, CompositeMotion, FlipMotion, SpinMotion},
    foundation::core::{Affine, FrameTime, Vec2},
};

/// Thickness floor: the foreshortened axis never collapses below this share.
pub const EDGE_EPSILON: f64 = 0.08;

/// True when a card rotated by `angle_deg` about an in-plane axis faces away.
///
/// Exactly 90 and 270 degrees still count as front.
pub fn shows_back(angle_deg: f64) -> bool {
    angle_deg.to_radians().cos() < 0.0
}

/// Visible extent along the foreshortened axis, in `[EDGE_EPSILON, 1]`.
pub fn foreshorten(angle_deg: f64) -> f64 {
    foreshorten_cos(angle_deg.to_radians().cos())
}

fn foreshorten_cos(c: f64) -> f64 {
    (1.0 - EDGE_EPSILON) * c.abs() + EDGE_EPSILON
}

/// Slight vertical shrink while the card turns edge-on.
pub fn depth_scale(angle_deg: f64) -> f64 {
    0.98 + 0.02 * angle_deg.to_radians().cos().abs()
}

/// Which prepared canvas a frame draws.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FaceChoice {
    Front,
    /// Plain back canvas.
    Back,
    /// Back canvas as seen after a pitch, possibly upside down.
    FlipBack,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CardPose {
    pub rotation_deg: f64,
    pub scale_x: f64,
    pub scale_y: f64,
    pub face: FaceChoice,
}

impl CardPose {
    pub const REST: Self = Self {
        rotation_deg: 0.0,
        scale_x: 1.0,
        scale_y: 1.0,
        face: FaceChoice::Front,
    };

    /// Canvas-space transform: scale, then rotate, both about the center of a
    /// `side x side` canvas.
    pub fn transform(&self, side: f64) -> Affine {
        let c = Vec2::new(side * 0.5, side * 0.5);
        Affine::translate(c)
            * Affine::rotate(self.rotation_deg.to_radians())
            * Affine::scale_non_uniform(self.scale_x, self.scale_y)
            * Affine::translate(-c)
    }
}

/// Pose of the card at `time`; `None` for modes that do not draw a flat card.
pub fn card_pose(mode: &AnimationMode, time: FrameTime) -> Option<CardPose> {
    let t = time.t;
    let pose = match *mode {
        AnimationMode::Spin(spin) => {
            let angle = match spin {
                SpinMotion::FullTurn => 360.0 * t,
                SpinMotion::Oscillating {
                    cycles,
                    max_angle_deg,
                } => (TAU * t * f64::from(cycles)).sin() * max_angle_deg,
            };
            CardPose {
                rotation_deg: 0.0,
                scale_x: foreshorten(angle),
                scale_y: depth_scale(angle),
                face: face_for(shows_back(angle), FaceChoice::Back),
            }
        }
        AnimationMode::Yaw { rotations } => {
            let angle = 360.0 * rotations.max(0.0) * t;
            CardPose {
                scale_x: foreshorten(angle),
                face: face_for(shows_back(angle), FaceChoice::Back),
                ..CardPose::REST
            }
        }
        AnimationMode::Flip(flip) => flip_pose(flip, t),
        AnimationMode::Oscillate { max_degrees } => CardPose {
            rotation_deg: max_degrees * (TAU * t).sin(),
            ..CardPose::REST
        },
        AnimationMode::Composite(c) => composite_pose(c, time),
        AnimationMode::Globe(_) => return None,
    };
    Some(pose)
}

fn face_for(back: bool, which_back: FaceChoice) -> FaceChoice {
    if back { which_back } else { FaceChoice::Front }
}

fn flip_angle(flip: FlipMotion, t: f64) -> f64 {
    360.0 * f64::from(flip.cycles.max(1)) * t
}

fn flip_pose(flip: FlipMotion, t: f64) -> CardPose {
    if !flip.animate {
        return CardPose {
            face: FaceChoice::FlipBack,
            ..CardPose::REST
        };
    }
    let angle = flip_angle(flip, t);
    CardPose {
        scale_y: foreshorten(angle),
        face: face_for(shows_back(angle), FaceChoice::FlipBack),
        ..CardPose::REST
    }
}

fn composite_pose(c: CompositeMotion, time: FrameTime) -> CardPose {
    let t = time.t;
    let rotation_deg = c
        .z_degrees_per_sec
        .map_or(0.0, |speed| speed * time.elapsed_sec);

    let (yaw_back, scale_x) = match c.yaw_rotations {
        Some(rotations) => {
            let angle = 360.0 * rotations.max(0.0) * t;
            (shows_back(angle), foreshorten(angle))
        }
        None => (false, 1.0),
    };

    let (flip_back, scale_y) = match c.flip {
        Some(flip) if flip.animate => {
            let angle = flip_angle(flip, t);
            (shows_back(angle), foreshorten(angle))
        }
        Some(_) => (true, 1.0),
        None => (false, 1.0),
    };

    let face = match (yaw_back, flip_back) {
        (false, true) => FaceChoice::FlipBack,
        (true, false) => FaceChoice::Back,
        _ => FaceChoice::Front,
    };

    CardPose {
        rotation_deg,
        scale_x,
        scale_y,
        face,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/motion/pose.rs"]
mod tests;
