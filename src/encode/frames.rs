use std::path::{Path, PathBuf};

use crate::{
    assets::decode::save_png,
    foundation::{
        core::Frame,
        error::{CardspinError, CardspinResult},
    },
};

/// `frame_0000.png`, `frame_0001.png`, ... Indices past 9999 simply grow wider.
pub fn frame_file_name(index: u64) -> String {
    format!("frame_{index:04}.png")
}

/// Writes numbered PNG frames into one directory and remembers their order.
#[derive(Debug)]
pub struct FrameWriter {
    dir: PathBuf,
    written: Vec<PathBuf>,
}

impl FrameWriter {
    pub fn create(dir: impl Into<PathBuf>) -> CardspinResult<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|e| {
            CardspinError::resource_failure(format!(
                "failed to create frame directory '{}': {e}",
                dir.display()
            ))
        })?;
        Ok(Self {
            dir,
            written: Vec::new(),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn write(&mut self, index: u64, frame: &Frame) -> CardspinResult<()> {
        let path = self.dir.join(frame_file_name(index));
        save_png(frame, &path)?;
        self.written.push(path);
        Ok(())
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.written
    }

    pub fn into_paths(self) -> Vec<PathBuf> {
        self.written
    }
}

/// Write `frames` in order into `dir`.
pub fn write_frames(frames: &[Frame], dir: &Path) -> CardspinResult<Vec<PathBuf>> {
    let mut writer = FrameWriter::create(dir)?;
    for (i, frame) in frames.iter().enumerate() {
        writer.write(i as u64, frame)?;
    }
    Ok(writer.into_paths())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/frames.rs"]
mod tests;
