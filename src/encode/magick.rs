use std::{
    ffi::OsString,
    path::{Path, PathBuf},
    process::{Command, Stdio},
};

use crate::foundation::error::{CardspinError, CardspinResult};

/// Timing and packing options handed to an encoder.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GifSettings {
    /// Per-frame delay in centiseconds (at least 1).
    pub delay_centis: u32,
    /// Let the encoder shrink the file (`-layers Optimize`).
    pub optimize: bool,
}

impl GifSettings {
    pub fn validate(&self) -> CardspinResult<()> {
        if self.delay_centis == 0 {
            return Err(CardspinError::invalid_input("frame delay must be >= 1 centisecond"));
        }
        Ok(())
    }
}

/// Packs an ordered list of still frames into one animation file.
pub trait AnimationSink {
    fn encode(&mut self, frames: &[PathBuf], settings: &GifSettings, out: &Path)
    -> CardspinResult<()>;
}

/// Encoder binaries tried in order: ImageMagick 7, then 6.
pub const MAGICK_CANDIDATES: [&str; 2] = ["magick", "convert"];

pub fn is_program_on_path(program: &str) -> bool {
    Command::new(program)
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

/// GIF assembly through the ImageMagick command line.
#[derive(Clone, Debug)]
pub struct MagickGifSink {
    program: OsString,
}

impl MagickGifSink {
    /// Use the first ImageMagick binary that answers `-version`.
    pub fn discover() -> CardspinResult<Self> {
        MAGICK_CANDIDATES
            .iter()
            .copied()
            .find(|p| is_program_on_path(p))
            .map(|p| {
                tracing::debug!(program = p, "found ImageMagick");
                Self::with_program(p)
            })
            .ok_or_else(|| {
                CardspinError::encoder_failure(
                    "ImageMagick not found (install imagemagick so 'magick' or 'convert' is on PATH)",
                    "",
                )
            })
    }

    pub fn with_program(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &OsString {
        &self.program
    }

    /// Full argument list for one encode.
    pub fn command_args(frames: &[PathBuf], settings: &GifSettings, out: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            "-delay".into(),
            settings.delay_centis.to_string().into(),
            "-dispose".into(),
            "Background".into(),
        ];
        if settings.optimize {
            args.push("-layers".into());
            args.push("Optimize".into());
        }
        args.extend(frames.iter().map(|p| p.as_os_str().to_os_string()));
        args.push("-loop".into());
        args.push("0".into());
        args.push(out.as_os_str().to_os_string());
        args
    }
}

impl AnimationSink for MagickGifSink {
    fn encode(
        &mut self,
        frames: &[PathBuf],
        settings: &GifSettings,
        out: &Path,
    ) -> CardspinResult<()> {
        settings.validate()?;
        if frames.is_empty() {
            return Err(CardspinError::invalid_input("no frames to encode"));
        }

        let output = Command::new(&self.program)
            .args(Self::command_args(frames, settings, out))
            .stdin(Stdio::null())
            .output()
            .map_err(|e| {
                CardspinError::encoder_failure(
                    format!("failed to start {}", self.program.to_string_lossy()),
                    e.to_string(),
                )
            })?;

        if !output.status.success() {
            let mut diagnostic = String::from_utf8_lossy(&output.stderr).into_owned();
            if diagnostic.trim().is_empty() {
                diagnostic = String::from_utf8_lossy(&output.stdout).into_owned();
            }
            return Err(CardspinError::encoder_failure(
                format!(
                    "{} exited with status {}",
                    self.program.to_string_lossy(),
                    output.status
                ),
                diagnostic,
            ));
        }
        if !out.exists() {
            return Err(CardspinError::encoder_failure(
                format!("{} reported success but wrote no output", self.program.to_string_lossy()),
                "",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/magick.rs"]
mod tests;
