//! One generation run: validated request -> prepared faces -> frames -> encoded file.
//!
//! Every intermediate file (simulated back, frame PNGs, the encoder's output)
//! lives in a run-scoped temporary directory. The requested output path is only
//! touched once encoding succeeded, so a failed run never leaves a partial file.

use std::path::{Path, PathBuf};

use crate::{
    animation::mode::AnimationMode,
    assets::decode::load_image,
    backside::resolver::{BackSource, BacksideMode, load_faces, resolve_backside},
    encode::{
        frames::FrameWriter,
        magick::{AnimationSink, GifSettings},
    },
    foundation::{
        core::{Frame, FrameTime, Rgba8},
        error::{CardspinError, CardspinResult},
    },
    geometry::crop::CropOptions,
    globe::renderer::{GlobeRenderer, GlobeTextures},
    motion::compositor::{CardFaces, CardRenderer},
    sequence::schedule::{FrameSchedule, FrameSource, RenderThreading, render_sequence},
};

/// Everything one run needs, gathered by the caller.
#[derive(Clone, Debug)]
pub struct RunRequest {
    pub front: PathBuf,
    pub back: Option<PathBuf>,
    pub output: PathBuf,
    pub fps: u32,
    pub duration_sec: f64,
    /// Square canvas side; `None` picks the mode default.
    pub size: Option<u32>,
    pub background: Rgba8,
    pub crop: bool,
    /// Read from settings (or overridden) by the caller; never looked up here.
    pub backside_mode: BacksideMode,
    pub mode: AnimationMode,
    pub threading: RenderThreading,
    pub optimize: bool,
}

impl RunRequest {
    pub fn new(front: impl Into<PathBuf>, output: impl Into<PathBuf>, mode: AnimationMode) -> Self {
        Self {
            front: front.into(),
            back: None,
            output: output.into(),
            fps: 12,
            duration_sec: 2.0,
            size: None,
            background: Rgba8::TRANSPARENT,
            crop: false,
            backside_mode: BacksideMode::Off,
            mode,
            threading: RenderThreading::default(),
            optimize: true,
        }
    }

    /// Canvas side for this request, rejecting sizes below the mode minimum.
    pub fn canvas_side(&self) -> CardspinResult<u32> {
        match self.size {
            None => Ok(self.mode.default_size()),
            Some(side) if side >= self.mode.min_size() => Ok(side),
            Some(side) => Err(CardspinError::invalid_input(format!(
                "size {side} is below the {} minimum of {}",
                self.mode.name(),
                self.mode.min_size()
            ))),
        }
    }

    /// Check every parameter that needs no file access. Timing is checked
    /// before mode parameters, since some modes derive rates from the duration.
    pub fn validate(&self) -> CardspinResult<()> {
        self.schedule()?;
        self.mode.validate()?;
        self.canvas_side()?;
        if self.front.as_os_str().is_empty() {
            return Err(CardspinError::invalid_input("no front image given"));
        }
        Ok(())
    }

    pub fn schedule(&self) -> CardspinResult<FrameSchedule> {
        if self.mode.is_globe() {
            FrameSchedule::for_globe(self.fps, self.duration_sec)
        } else {
            FrameSchedule::for_card(self.fps, self.duration_sec, self.mode.is_static())
        }
    }
}

/// Mode-specific renderer for a prepared run.
#[derive(Clone, Debug)]
pub enum RunRenderer {
    Card(CardRenderer),
    Globe(GlobeRenderer),
}

impl FrameSource for RunRenderer {
    fn render_frame(&self, time: FrameTime) -> CardspinResult<Frame> {
        Ok(match self {
            Self::Card(r) => r.render(time),
            Self::Globe(r) => r.render(time),
        })
    }
}

/// A validated run with its faces resolved and canvases built, ready to render.
#[derive(Debug)]
pub struct PreparedRun {
    scratch: tempfile::TempDir,
    schedule: FrameSchedule,
    renderer: RunRenderer,
    back_source: BackSource,
    single_sided: bool,
    warnings: Vec<String>,
}

impl PreparedRun {
    pub fn schedule(&self) -> &FrameSchedule {
        &self.schedule
    }

    pub fn renderer(&self) -> &RunRenderer {
        &self.renderer
    }

    pub fn back_source(&self) -> &BackSource {
        &self.back_source
    }

    pub fn single_sided(&self) -> bool {
        self.single_sided
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn scratch_dir(&self) -> &Path {
        self.scratch.path()
    }

    /// Render the frame at normalized time `t` in `[0, 1]`.
    pub fn render_frame_at(&self, t: f64) -> CardspinResult<Frame> {
        if !t.is_finite() || !(0.0..=1.0).contains(&t) {
            return Err(CardspinError::invalid_input(format!(
                "t must lie in [0, 1] (got {t})"
            )));
        }
        let time = FrameTime {
            index: 0,
            t,
            elapsed_sec: t * self.schedule.run_seconds(),
        };
        self.renderer.render_frame(time)
    }

    /// Render every frame of the run in order.
    pub fn render_all(&self, threading: &RenderThreading) -> CardspinResult<Vec<Frame>> {
        let mut frames = Vec::with_capacity(self.schedule.frame_count().min(4096) as usize);
        render_sequence(&self.schedule, &self.renderer, threading, |_, frame| {
            frames.push(frame);
            Ok(())
        })?;
        Ok(frames)
    }
}

/// Validate `req`, resolve the back face and build the per-run canvases.
#[tracing::instrument(skip_all, fields(mode = req.mode.name()))]
pub fn prepare_run(req: &RunRequest) -> CardspinResult<PreparedRun> {
    req.validate()?;
    let schedule = req.schedule()?;
    let side = req.canvas_side()?;
    let front = load_image(&req.front)?;

    let scratch = tempfile::Builder::new()
        .prefix("cardspin-")
        .tempdir()
        .map_err(|e| {
            CardspinError::resource_failure(format!("failed to create temporary directory: {e}"))
        })?;

    let mut warnings = Vec::new();
    let back_source = match resolve_backside(
        &req.front,
        req.back.as_deref(),
        req.backside_mode,
        scratch.path(),
    ) {
        Ok(source) => source,
        Err(e) if e.is_recoverable_for_back_face() && !req.backside_mode.simulates() => {
            tracing::warn!(error = %e, "back image unusable, rendering single-sided");
            warnings.push(format!("back image ignored: {e}"));
            BackSource::Absent
        }
        Err(e) => return Err(e),
    };
    let crop = req.crop.then(CropOptions::default);
    let faces = load_faces(front, &back_source, crop);
    warnings.extend(faces.warnings.iter().cloned());
    tracing::debug!(
        side,
        frames = schedule.frame_count(),
        single_sided = faces.single_sided,
        "faces resolved"
    );

    let single_sided = faces.single_sided;
    let renderer = match &req.mode {
        AnimationMode::Globe(motion) => {
            let back = (!faces.single_sided).then_some(faces.back);
            let textures = GlobeTextures::prepare(faces.front, back, motion.zoom_percent, req.background);
            RunRenderer::Globe(GlobeRenderer::new(*motion, textures, side, req.background)?)
        }
        mode => {
            let canvases = CardFaces::prepare(
                &faces,
                side,
                req.background,
                req.backside_mode.upside_down(),
            );
            RunRenderer::Card(CardRenderer::new(mode.clone(), canvases)?)
        }
    };

    Ok(PreparedRun {
        scratch,
        schedule,
        renderer,
        back_source,
        single_sided,
        warnings,
    })
}

/// Outcome of a successful run.
#[derive(Clone, Debug, PartialEq)]
pub struct RunReport {
    pub output: PathBuf,
    pub frame_count: u64,
    pub frame_delay_centis: u32,
    pub single_sided: bool,
    pub warnings: Vec<String>,
}

/// Render all frames of `req`, hand them to `sink` and place the result at `req.output`.
#[tracing::instrument(skip_all, fields(mode = req.mode.name(), output = %req.output.display()))]
pub fn generate(req: &RunRequest, sink: &mut dyn AnimationSink) -> CardspinResult<RunReport> {
    if req.output.as_os_str().is_empty() {
        return Err(CardspinError::invalid_input("no output path given"));
    }
    let prepared = prepare_run(req)?;
    let schedule = *prepared.schedule();
    tracing::info!(
        frames = schedule.frame_count(),
        fps = schedule.fps(),
        "rendering"
    );

    let mut writer = FrameWriter::create(prepared.scratch_dir().join("frames"))?;
    render_sequence(&schedule, prepared.renderer(), &req.threading, |time, frame| {
        writer.write(time.index, &frame)
    })?;

    let settings = GifSettings {
        delay_centis: schedule.frame_delay_centis(),
        optimize: req.optimize,
    };
    let staged = prepared.scratch_dir().join(staged_name(&req.output));
    sink.encode(writer.paths(), &settings, &staged)?;
    place_output(&staged, &req.output)?;

    tracing::info!(frames = schedule.frame_count(), "animation written");
    Ok(RunReport {
        output: req.output.clone(),
        frame_count: schedule.frame_count(),
        frame_delay_centis: settings.delay_centis,
        single_sided: prepared.single_sided(),
        warnings: prepared.warnings().to_vec(),
    })
}

fn staged_name(output: &Path) -> PathBuf {
    let ext = output
        .extension()
        .map(|e| e.to_string_lossy().into_owned())
        .unwrap_or_else(|| "gif".to_owned());
    PathBuf::from(format!("output.{ext}"))
}

pub fn ensure_parent_dir(path: &Path) -> CardspinResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| {
            CardspinError::resource_failure(format!(
                "failed to create output directory '{}': {e}",
                parent.display()
            ))
        })?;
    }
    Ok(())
}

/// Move the staged file into place, copying when a rename crosses filesystems.
fn place_output(staged: &Path, output: &Path) -> CardspinResult<()> {
    ensure_parent_dir(output)?;
    if std::fs::rename(staged, output).is_ok() {
        return Ok(());
    }
    std::fs::copy(staged, output).map_err(|e| {
        CardspinError::resource_failure(format!(
            "failed to write output '{}': {e}",
            output.display()
        ))
    })?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/run.rs"]
mod tests;
