use std::collections::VecDeque;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::Duration;

use crate::engine::veg_patch::VegPatch;
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{PatchError, PatchResult};
use crate::host::sink::FrameSink;
use crate::render::backend::RenderBackend;
use crate::sync::layer::SyncLayer;
use crate::sync::message::WidgetMessage;
use crate::sync::source::TotalsSource;

/// A message delivered before the tick of `frame`.
#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
pub struct ScriptedEvent {
    /// Loop frame at which the message arrives.
    pub frame: u64,
    /// The message.
    pub message: WidgetMessage,
}

/// Scripted messages, one JSON object per line, ordered by frame.
///
/// ```text
/// {"frame": 0, "message": {"type": "PLEDGE_SUBMITTED", "tokens": 30}}
/// {"frame": 90, "message": {"type": "PATCH_UPDATE", "total": 2000, "goal": 100000}}
/// ```
#[derive(Clone, Debug, Default)]
pub struct EventScript {
    events: VecDeque<ScriptedEvent>,
}

impl EventScript {
    /// Parse JSON lines. Blank lines are skipped; any bad line fails the whole script.
    pub fn from_reader<R: std::io::Read>(r: R) -> PatchResult<Self> {
        let mut events = Vec::new();
        for (i, line) in BufReader::new(r).lines().enumerate() {
            let line = line.map_err(|e| PatchError::validation(format!("read event script: {e}")))?;
            if line.trim().is_empty() {
                continue;
            }
            let ev: ScriptedEvent = serde_json::from_str(&line).map_err(|e| {
                PatchError::validation(format!("event script line {}: {e}", i + 1))
            })?;
            ev.message.validate().map_err(|e| {
                PatchError::validation(format!("event script line {}: {e}", i + 1))
            })?;
            events.push(ev);
        }
        events.sort_by_key(|e| e.frame);
        Ok(Self {
            events: events.into(),
        })
    }

    /// Parse a JSON-lines file.
    pub fn from_path(path: impl AsRef<Path>) -> PatchResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            PatchError::validation(format!("open event script '{}': {e}", path.display()))
        })?;
        Self::from_reader(f)
    }

    /// Events not yet delivered.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether every event was delivered.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    fn take_due(&mut self, frame: u64) -> Vec<WidgetMessage> {
        let mut due = Vec::new();
        while self.events.front().is_some_and(|e| e.frame <= frame) {
            if let Some(ev) = self.events.pop_front() {
                due.push(ev.message);
            }
        }
        due
    }
}

/// Frame loop settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameLoopOpts {
    /// Hard stop.
    pub max_frames: u64,
    /// Pull the totaliser every this many frames; `0` disables polling.
    pub poll_every: u64,
    /// Stop early once the script is drained and the engine is settled.
    pub stop_when_settled: bool,
    /// Pause between frames while sprite loads are outstanding.
    pub loading_frame_interval: Duration,
}

impl Default for FrameLoopOpts {
    fn default() -> Self {
        Self {
            max_frames: 600,
            poll_every: 0,
            stop_when_settled: true,
            loading_frame_interval: Duration::from_millis(16),
        }
    }
}

/// Summary of a finished run.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LoopReport {
    /// Frames ticked.
    pub frames: u64,
    /// Frames painted into the sink.
    pub painted: u64,
    /// Tokens committed by finished pledge animations.
    pub committed_tokens: u64,
    /// Replies the engine produced (answers to `REQUEST_UPDATE`).
    pub replies: Vec<WidgetMessage>,
}

/// Offline host: delivers scripted messages, polls totals, ticks the engine and paints frames
/// that asked for a repaint.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameLoop {
    opts: FrameLoopOpts,
}

impl FrameLoop {
    /// Loop with `opts`.
    pub fn new(opts: FrameLoopOpts) -> Self {
        Self { opts }
    }

    /// Run to completion. The first frame is always painted.
    #[tracing::instrument(level = "debug", skip_all, fields(max_frames = self.opts.max_frames))]
    pub fn run(
        &self,
        patch: &mut VegPatch,
        sync: &mut SyncLayer,
        script: &mut EventScript,
        mut totals: Option<&mut dyn TotalsSource>,
        backend: &mut dyn RenderBackend,
        sink: &mut dyn FrameSink,
    ) -> PatchResult<LoopReport> {
        let mut report = LoopReport::default();

        for i in 0..self.opts.max_frames {
            for msg in script.take_due(i) {
                let kind = msg.kind();
                match sync.on_message(patch, msg) {
                    Ok(Some(reply)) => {
                        tracing::debug!(frame = i, kind = reply.kind(), "reply");
                        report.replies.push(reply);
                    }
                    Ok(None) => {}
                    Err(e) => tracing::warn!(frame = i, kind, error = %e, "scripted message rejected"),
                }
            }
            if self.opts.poll_every > 0 && i % self.opts.poll_every == 0 {
                if let Some(src) = totals.as_deref_mut() {
                    sync.poll(patch, src);
                }
            }

            let tick = patch.tick();
            report.frames += 1;
            if let Some(t) = tick.committed {
                report.committed_tokens += t;
            }
            if tick.repaint || i == 0 {
                let scene = patch.compose();
                let frame = backend.render_scene(&scene, patch.sprites())?;
                sink.write_frame(FrameIndex(i), &frame)?;
                report.painted += 1;
            }

            if self.opts.stop_when_settled && script.is_empty() && !tick.wants_more {
                break;
            }
            if patch.sprites().is_loading() {
                std::thread::sleep(self.opts.loading_frame_interval);
            }
        }

        sink.finish()?;
        tracing::info!(
            frames = report.frames,
            painted = report.painted,
            committed = report.committed_tokens,
            "frame loop finished"
        );
        Ok(report)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/host/frame_loop.rs"]
mod tests;
