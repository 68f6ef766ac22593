use rayon::prelude::*;

use crate::foundation::{
    core::{Frame, FrameTime},
    error::{CardspinError, CardspinResult},
};

/// Deterministic `index -> t` mapping for one run.
///
/// Frame `i` of `N` sits at `t = i / N`: uniform, strictly increasing, never
/// reaching 1.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameSchedule {
    frame_count: u64,
    fps: u32,
    run_seconds: f64,
}

/// Longest sequence one run may request.
pub const MAX_FRAME_COUNT: u64 = 1_000_000;

fn too_many_frames(fps: u32, duration_sec: f64) -> CardspinError {
    CardspinError::invalid_input(format!(
        "{fps} fps over {duration_sec}s exceeds {MAX_FRAME_COUNT} frames"
    ))
}

fn check_timing(fps: u32, duration_sec: f64) -> CardspinResult<()> {
    if fps == 0 {
        return Err(CardspinError::invalid_input("fps must be > 0"));
    }
    if !duration_sec.is_finite() || duration_sec <= 0.0 {
        return Err(CardspinError::invalid_input(format!(
            "duration must be > 0 seconds (got {duration_sec})"
        )));
    }
    Ok(())
}

impl FrameSchedule {
    /// Flat-card runs: `max(1, fps * ceil(duration))` frames, or exactly one
    /// for static modes.
    pub fn for_card(fps: u32, duration_sec: f64, is_static: bool) -> CardspinResult<Self> {
        check_timing(fps, duration_sec)?;
        let run_seconds = duration_sec.ceil();
        let frame_count = if is_static {
            1
        } else {
            if f64::from(fps) * run_seconds > MAX_FRAME_COUNT as f64 {
                return Err(too_many_frames(fps, duration_sec));
            }
            u64::from(fps)
                .checked_mul(run_seconds as u64)
                .filter(|&n| n <= MAX_FRAME_COUNT)
                .ok_or_else(|| too_many_frames(fps, duration_sec))?
                .max(1)
        };
        Ok(Self {
            frame_count,
            fps,
            run_seconds,
        })
    }

    /// Globe runs: `round(fps * duration)` frames; fewer than one is an error.
    pub fn for_globe(fps: u32, duration_sec: f64) -> CardspinResult<Self> {
        check_timing(fps, duration_sec)?;
        let frames = (f64::from(fps) * duration_sec).round();
        if frames < 1.0 {
            return Err(CardspinError::invalid_input(format!(
                "{fps} fps over {duration_sec}s yields no globe frames"
            )));
        }
        if frames > MAX_FRAME_COUNT as f64 {
            return Err(too_many_frames(fps, duration_sec));
        }
        Ok(Self {
            frame_count: frames as u64,
            fps,
            run_seconds: duration_sec,
        })
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }

    /// Seconds the normalized time axis spans.
    pub fn run_seconds(&self) -> f64 {
        self.run_seconds
    }

    pub fn time_at(&self, index: u64) -> FrameTime {
        let t = index as f64 / self.frame_count as f64;
        FrameTime {
            index,
            t,
            elapsed_sec: t * self.run_seconds,
        }
    }

    pub fn times(&self) -> impl Iterator<Item = FrameTime> + '_ {
        (0..self.frame_count).map(|i| self.time_at(i))
    }

    /// Per-frame delay for the encoder in centiseconds.
    pub fn frame_delay_centis(&self) -> u32 {
        frame_delay_centis(self.fps)
    }
}

/// `max(1, round(100 / fps))`.
pub fn frame_delay_centis(fps: u32) -> u32 {
    if fps == 0 {
        return 1;
    }
    ((100.0 / f64::from(fps)).round() as u32).max(1)
}

/// Produces the pixels of one frame. Implementations are pure in `time`.
pub trait FrameSource: Sync {
    fn render_frame(&self, time: FrameTime) -> CardspinResult<Frame>;
}

#[derive(Clone, Debug)]
pub struct RenderThreading {
    pub parallel: bool,
    /// Frames rendered per parallel batch before being handed on.
    pub chunk_size: usize,
    pub threads: Option<usize>,
}

impl Default for RenderThreading {
    fn default() -> Self {
        Self {
            parallel: false,
            chunk_size: 32,
            threads: None,
        }
    }
}

/// Render every frame of `schedule` and pass them to `emit` in index order.
///
/// With `threading.parallel` frames are rendered in chunks on a dedicated pool;
/// `emit` still sees them strictly in order, from the calling thread.
pub fn render_sequence<F>(
    schedule: &FrameSchedule,
    source: &dyn FrameSource,
    threading: &RenderThreading,
    mut emit: F,
) -> CardspinResult<u64>
where
    F: FnMut(FrameTime, Frame) -> CardspinResult<()>,
{
    if !threading.parallel {
        for time in schedule.times() {
            let frame = source.render_frame(time)?;
            emit(time, frame)?;
        }
        return Ok(schedule.frame_count());
    }

    let pool = build_thread_pool(threading.threads)?;
    let chunk = threading.chunk_size.max(1) as u64;
    let total = schedule.frame_count();

    let mut start = 0u64;
    while start < total {
        let end = (start + chunk).min(total);
        let times: Vec<FrameTime> = (start..end).map(|i| schedule.time_at(i)).collect();
        let rendered = pool.install(|| {
            times
                .par_iter()
                .map(|&time| source.render_frame(time))
                .collect::<Vec<_>>()
        });
        for (time, frame) in times.into_iter().zip(rendered) {
            emit(time, frame?)?;
        }
        start = end;
    }
    Ok(total)
}

fn build_thread_pool(threads: Option<usize>) -> CardspinResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(CardspinError::invalid_input(
            "threads must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| CardspinError::resource_failure(format!("failed to build thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/sequence/schedule.rs"]
mod tests;
