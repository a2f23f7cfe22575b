use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::{Duration, Instant};

use crate::assets::decode::decode_sprite_file;
use crate::assets::sprite::{Sprite, SpriteImage, SpriteSource};
use crate::foundation::error::{PatchError, PatchResult};

pub(crate) type LoadResult = (Sprite, PatchResult<SpriteImage>);

/// What one [`SpriteStore::poll`] call observed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoadPoll {
    /// Loads (successful or not) that settled during this call.
    pub settled: usize,
    /// True exactly once: on the call where the last expected load settled.
    pub just_completed: bool,
}

/// Fire-and-forget sprite loader.
///
/// Decoding happens on the rayon pool; results are drained without blocking by [`poll`], which the
/// engine calls once per frame. A failed load is counted as settled and logged, and the sprite
/// stays absent so primitives keep drawing their procedural fallback.
///
/// [`poll`]: SpriteStore::poll
pub struct SpriteStore {
    images: HashMap<Sprite, SpriteImage>,
    rx: Option<mpsc::Receiver<LoadResult>>,
    expected: usize,
    settled: usize,
    failed: usize,
}

impl std::fmt::Debug for SpriteStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpriteStore")
            .field("loaded", &self.images.len())
            .field("expected", &self.expected)
            .field("settled", &self.settled)
            .field("failed", &self.failed)
            .finish()
    }
}

impl Default for SpriteStore {
    fn default() -> Self {
        Self::empty()
    }
}

impl SpriteStore {
    /// Store that never loads anything.
    pub fn empty() -> Self {
        Self {
            images: HashMap::new(),
            rx: None,
            expected: 0,
            settled: 0,
            failed: 0,
        }
    }

    /// Start loading the whole catalog from `dir` in the background.
    pub fn load_dir(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        let (tx, rx) = mpsc::channel::<LoadResult>();
        for sprite in Sprite::ALL {
            let tx = tx.clone();
            let dir = dir.clone();
            rayon::spawn(move || {
                let res = resolve_sprite_path(&dir, sprite).and_then(|p| decode_sprite_file(&p));
                // The receiver is gone only if the engine was dropped.
                let _ = tx.send((sprite, res));
            });
        }
        tracing::debug!(dir = %dir.display(), count = Sprite::ALL.len(), "sprite loading started");
        Self::from_channel(rx, Sprite::ALL.len())
    }

    /// Store fed by `expected` results arriving on `rx`.
    pub(crate) fn from_channel(rx: mpsc::Receiver<LoadResult>, expected: usize) -> Self {
        Self {
            images: HashMap::new(),
            rx: Some(rx),
            expected,
            settled: 0,
            failed: 0,
        }
    }

    /// Whether loads were started and some have not settled yet.
    pub fn is_loading(&self) -> bool {
        self.expected > 0 && !self.is_complete()
    }

    /// Drain finished loads without blocking.
    pub fn poll(&mut self) -> LoadPoll {
        let mut arrived = Vec::new();
        if let Some(rx) = &self.rx {
            while let Ok(msg) = rx.try_recv() {
                arrived.push(msg);
            }
        }
        self.accept(arrived)
    }

    /// Block until every load has settled or `timeout` elapses. For offline hosts.
    pub fn wait_all(&mut self, timeout: Duration) -> LoadPoll {
        let deadline = Instant::now() + timeout;
        let mut arrived = Vec::new();
        if let Some(rx) = &self.rx {
            while self.settled + arrived.len() < self.expected {
                let left = deadline.saturating_duration_since(Instant::now());
                match rx.recv_timeout(left) {
                    Ok(msg) => arrived.push(msg),
                    Err(_) => break,
                }
            }
        }
        self.accept(arrived)
    }

    fn accept(&mut self, arrived: Vec<LoadResult>) -> LoadPoll {
        let was_complete = self.is_complete();
        let settled = arrived.len();
        for (sprite, res) in arrived {
            self.settled += 1;
            match res {
                Ok(img) => {
                    tracing::debug!(sprite = sprite.file_stem(), w = img.width, h = img.height, "sprite loaded");
                    self.images.insert(sprite, img);
                }
                Err(err) => {
                    self.failed += 1;
                    tracing::warn!(sprite = sprite.file_stem(), error = %err, "sprite failed to load");
                }
            }
        }
        let just_completed = !was_complete && self.is_complete();
        if just_completed {
            self.rx = None;
            tracing::info!(
                loaded = self.images.len(),
                failed = self.failed,
                "sprite loading finished"
            );
        }
        LoadPoll {
            settled,
            just_completed,
        }
    }

    /// Loads started.
    pub fn expected(&self) -> usize {
        self.expected
    }

    /// Loads finished, successful or not.
    pub fn settled(&self) -> usize {
        self.settled
    }

    /// Loads that failed.
    pub fn failed(&self) -> usize {
        self.failed
    }

    /// Sprites available for drawing.
    pub fn loaded(&self) -> usize {
        self.images.len()
    }

    /// Whether every started load has settled.
    pub fn is_complete(&self) -> bool {
        self.expected > 0 && self.settled >= self.expected
    }
}

impl SpriteSource for SpriteStore {
    fn sprite(&self, sprite: Sprite) -> Option<&SpriteImage> {
        self.images.get(&sprite)
    }
}

/// `<dir>/<stem>.png`, falling back to `<dir>/<stem>.svg`.
pub(crate) fn resolve_sprite_path(dir: &Path, sprite: Sprite) -> PatchResult<PathBuf> {
    for ext in ["png", "svg"] {
        let p = dir.join(format!("{}.{ext}", sprite.file_stem()));
        if p.is_file() {
            return Ok(p);
        }
    }
    Err(PatchError::asset(format!(
        "no {stem}.png or {stem}.svg in {dir}",
        stem = sprite.file_stem(),
        dir = dir.display()
    )))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/store.rs"]
mod tests;
