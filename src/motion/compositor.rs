use crate::{
    animation::mode::AnimationMode,
    backside::resolver::ResolvedFaces,
    foundation::{
        core::{Frame, FrameTime, Rgba8},
        error::{CardspinError, CardspinResult},
    },
    geometry::canvas::square_canvas,
    motion::pose::{CardPose, FaceChoice, card_pose},
    raster::{composite::filled, sample::warp_over},
};

/// Square canvases for every face a card frame can show, built once per run
/// and shared read-only by all frames.
#[derive(Clone, Debug)]
pub struct CardFaces {
    pub front: Frame,
    pub back: Frame,
    /// Back as seen after a pitch; upside down when requested.
    pub back_for_flip: Frame,
    pub background: Rgba8,
}

impl CardFaces {
    /// Center both faces on `side x side` canvases over `background`.
    ///
    /// The upside-down variant only applies when a real back exists: a card
    /// rendered single-sided never shows its front inverted.
    pub fn prepare(faces: &ResolvedFaces, side: u32, background: Rgba8, upside_down: bool) -> Self {
        let front = square_canvas(&faces.front.rgba, side, background);
        let back = if faces.single_sided {
            front.clone()
        } else {
            square_canvas(&faces.back.rgba, side, background)
        };
        let back_for_flip = if upside_down && !faces.single_sided {
            image::imageops::flip_vertical(&back)
        } else {
            back.clone()
        };
        Self {
            front,
            back,
            back_for_flip,
            background,
        }
    }

    pub fn side(&self) -> u32 {
        self.front.width()
    }

    pub fn face(&self, choice: FaceChoice) -> &Frame {
        match choice {
            FaceChoice::Front => &self.front,
            FaceChoice::Back => &self.back,
            FaceChoice::FlipBack => &self.back_for_flip,
        }
    }

    /// Draw the chosen face under `pose` onto a background-filled frame.
    pub fn draw(&self, pose: &CardPose) -> Frame {
        let side = self.side();
        let mut frame = filled(side, side, self.background);
        warp_over(&mut frame, self.face(pose.face), pose.transform(f64::from(side)));
        frame
    }
}

/// Renders flat-card frames for one mode.
#[derive(Clone, Debug)]
pub struct CardRenderer {
    mode: AnimationMode,
    faces: CardFaces,
}

impl CardRenderer {
    pub fn new(mode: AnimationMode, faces: CardFaces) -> CardspinResult<Self> {
        if mode.is_globe() {
            return Err(CardspinError::invalid_input(
                "globe mode is not rendered as a flat card",
            ));
        }
        Ok(Self { mode, faces })
    }

    pub fn faces(&self) -> &CardFaces {
        &self.faces
    }

    pub fn render(&self, time: FrameTime) -> Frame {
        let pose = card_pose(&self.mode, time).unwrap_or(CardPose::REST);
        self.faces.draw(&pose)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/motion/compositor.rs"]
mod tests;
