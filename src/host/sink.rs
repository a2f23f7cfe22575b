use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::foundation::core::FrameIndex;
use crate::foundation::error::{PatchError, PatchResult};
use crate::render::backend::FrameRGBA;

/// Destination for painted frames.
pub trait FrameSink {
    /// Accept the frame painted for `frame`.
    fn write_frame(&mut self, frame: FrameIndex, rgba: &FrameRGBA) -> PatchResult<()>;

    /// Flush and close. Called once after the last frame.
    fn finish(&mut self) -> PatchResult<()> {
        Ok(())
    }
}

/// Keeps every frame in memory. For tests and previews.
#[derive(Debug, Default)]
pub struct InMemorySink {
    /// Frames in arrival order.
    pub frames: Vec<(FrameIndex, FrameRGBA)>,
}

impl FrameSink for InMemorySink {
    fn write_frame(&mut self, frame: FrameIndex, rgba: &FrameRGBA) -> PatchResult<()> {
        self.frames.push((frame, rgba.clone()));
        Ok(())
    }
}

/// Writes `frame_00042.png` files into a directory.
#[derive(Debug)]
pub struct PngSequenceSink {
    dir: PathBuf,
    size: Option<(u32, u32)>,
    written: usize,
}

impl PngSequenceSink {
    /// Create `dir` (and parents) and write frames into it.
    pub fn new(dir: impl Into<PathBuf>) -> PatchResult<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("create frame directory '{}'", dir.display()))?;
        Ok(Self {
            dir,
            size: None,
            written: 0,
        })
    }

    /// Output directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Files written so far.
    pub fn written(&self) -> usize {
        self.written
    }

    /// File name for `frame`.
    pub fn frame_path(&self, frame: FrameIndex) -> PathBuf {
        self.dir.join(format!("frame_{:05}.png", frame.0))
    }
}

impl FrameSink for PngSequenceSink {
    fn write_frame(&mut self, frame: FrameIndex, rgba: &FrameRGBA) -> PatchResult<()> {
        let size = (rgba.width, rgba.height);
        match self.size {
            None => self.size = Some(size),
            Some(expected) if expected != size => {
                return Err(PatchError::render(format!(
                    "frame size mismatch: got {}x{}, expected {}x{}",
                    size.0, size.1, expected.0, expected.1
                )));
            }
            Some(_) => {}
        }
        rgba.save_png(&self.frame_path(frame))?;
        self.written += 1;
        Ok(())
    }

    fn finish(&mut self) -> PatchResult<()> {
        tracing::info!(dir = %self.dir.display(), frames = self.written, "png sequence written");
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/host/sink.rs"]
mod tests;
