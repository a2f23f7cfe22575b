use std::path::PathBuf;

use crate::animation::pledge::{AnimationPhase, PhaseStep, PledgeAnimator};
use crate::animation::tween::{GrowthTween, TweenStep};
use crate::assets::store::SpriteStore;
use crate::config::PatchConfig;
use crate::foundation::core::FrameIndex;
use crate::foundation::error::PatchResult;
use crate::pledge::queue::PledgeQueue;
use crate::progress::state::{PatchState, ProgressState, ProgressSummary};
use crate::render::plan::Scene;
use crate::scene::composer::{SceneInput, compose};
use crate::scene::layout::{AssetStrategy, PatchLayout};

/// What one [`VegPatch::tick`] did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Tick {
    /// The frame changed; compose and paint it.
    pub repaint: bool,
    /// An animation, the tween, a queued event or a sprite load still needs frames.
    pub wants_more: bool,
    /// Tokens committed by a pledge animation that finished on this frame.
    pub committed: Option<u64>,
}

/// The progress visualisation engine.
///
/// One instance per page. It owns the true and displayed progress, the FIFO of pending pledge
/// events, the discrete seed/plant/water machine and the growth tween, which never run at the
/// same time. The host calls [`tick`](Self::tick) once per animation frame and paints
/// [`compose`](Self::compose) whenever the tick asks for a repaint.
///
/// The engine is single-threaded. Hosts that deliver sync events from several threads must keep
/// the engine and its [`SyncLayer`](crate::SyncLayer) behind one `Mutex`.
#[derive(Debug)]
pub struct VegPatch {
    layout: PatchLayout,
    strategy: AssetStrategy,
    assets_dir: Option<PathBuf>,
    noise_seed: u64,
    progress: ProgressState,
    queue: PledgeQueue,
    animator: PledgeAnimator,
    tween: GrowthTween,
    submissions: u64,
    sprites: SpriteStore,
    frame: FrameIndex,
    repaint_requested: bool,
    initialised: bool,
}

impl VegPatch {
    /// Build an engine from a validated configuration. Nothing is loaded until [`init`].
    ///
    /// [`init`]: Self::init
    pub fn new(config: &PatchConfig) -> PatchResult<Self> {
        config.validate()?;
        let canvas = config.canvas()?;
        Ok(Self {
            layout: PatchLayout::new(config.variant, canvas),
            strategy: config.asset_strategy(),
            assets_dir: config.assets_dir.clone(),
            noise_seed: config.noise_seed,
            progress: ProgressState::new(config.initial_total, config.goal)?,
            queue: PledgeQueue::new(),
            animator: PledgeAnimator::default(),
            tween: GrowthTween::default(),
            submissions: 0,
            sprites: SpriteStore::empty(),
            frame: FrameIndex::default(),
            repaint_requested: true,
            initialised: false,
        })
    }

    /// Start sprite loading (sprite strategy only) and grow from zero toward the initial total.
    /// Calling it again does nothing.
    pub fn init(&mut self) {
        if self.initialised {
            return;
        }
        self.initialised = true;
        if let (AssetStrategy::Raster, Some(dir)) = (self.strategy, &self.assets_dir) {
            self.sprites = SpriteStore::load_dir(dir.clone());
        }
        if self.animator.is_idle() {
            self.tween.start();
        }
        self.repaint_requested = true;
        tracing::info!(
            total = self.progress.total(),
            goal = self.progress.goal(),
            variant = ?self.layout.variant,
            strategy = ?self.strategy,
            "patch initialised"
        );
    }

    /// Replace a sprite store, e.g. one already loaded by the host.
    pub fn with_sprites(mut self, sprites: SpriteStore) -> Self {
        self.sprites = sprites;
        self.repaint_requested = true;
        self
    }

    /// Set total and goal. The display value catches up through the tween, which starts only
    /// when no pledge animation is running.
    pub fn update(&mut self, total: u64, goal: u64) -> PatchResult<()> {
        self.progress.set_totals(total, goal)?;
        if self.animator.is_idle() {
            self.tween.start();
        }
        self.repaint_requested = true;
        Ok(())
    }

    /// Overwrite the submission counter (peer sync).
    pub fn set_submissions(&mut self, submissions: u64) {
        self.submissions = submissions;
    }

    /// Append a pledge award to the FIFO and start it if nothing is animating.
    /// Non-positive awards are rejected and nothing is queued.
    pub fn queue_pledge_animation(&mut self, tokens: i64) -> PatchResult<()> {
        let ev = self.queue.push(tokens).inspect_err(|e| {
            tracing::warn!(tokens, error = %e, "pledge event rejected");
        })?;
        tracing::debug!(
            tokens = ev.tokens_awarded,
            pending = self.queue.len(),
            "pledge queued"
        );
        self.process_queue();
        Ok(())
    }

    fn process_queue(&mut self) {
        if !self.animator.is_idle() {
            return;
        }
        let Some(ev) = self.queue.pop() else {
            return;
        };
        match self.animator.start(ev) {
            Ok(()) => {
                self.tween.suspend();
                self.repaint_requested = true;
            }
            Err(e) => tracing::warn!(error = %e, "pledge animation did not start"),
        }
    }

    /// Advance one host frame.
    pub fn tick(&mut self) -> Tick {
        let mut repaint = std::mem::take(&mut self.repaint_requested);
        let mut committed = None;

        let loads = self.sprites.poll();
        if loads.settled > 0 || loads.just_completed {
            repaint = true;
        }

        match self.animator.advance() {
            PhaseStep::Idle => {
                if self.tween.step(&mut self.progress) != TweenStep::Inactive {
                    repaint = true;
                }
            }
            PhaseStep::Advanced => repaint = true,
            PhaseStep::Completed(ev) => {
                let total = self.progress.total().saturating_add(ev.tokens_awarded);
                let goal = self.progress.goal();
                self.submissions = self.submissions.saturating_add(1);
                tracing::info!(
                    tokens = ev.tokens_awarded,
                    total,
                    goal,
                    pending = self.queue.len(),
                    "pledge planted"
                );
                // Goal is known to be > 0, so this cannot fail.
                if let Err(e) = self.update(total, goal) {
                    tracing::warn!(error = %e, "commit of pledge award failed");
                }
                self.process_queue();
                committed = Some(ev.tokens_awarded);
                repaint = true;
            }
        }

        self.frame = self.frame.next();
        Tick {
            repaint,
            wants_more: !self.is_settled(),
            committed,
        }
    }

    /// Compose the current frame.
    pub fn compose(&self) -> Scene {
        let input = SceneInput {
            layout: self.layout,
            strategy: self.strategy,
            display_percentage: self.progress.display_percentage(),
            total: self.progress.total(),
            goal: self.progress.goal(),
            phase: self.animator.phase(),
            frame: self.frame,
            noise_seed: self.noise_seed,
        };
        compose(&input, &self.sprites)
    }

    /// Tick until settled, at most `max_frames` times, without pausing between frames. Returns
    /// frames ticked.
    pub fn run_until_settled(&mut self, max_frames: u64) -> u64 {
        let mut n = 0;
        while n < max_frames && !self.is_settled() {
            self.tick();
            n += 1;
        }
        n
    }

    /// Totals and submission count.
    pub fn state(&self) -> PatchState {
        PatchState {
            total: self.progress.total(),
            goal: self.progress.goal(),
            submissions: self.submissions,
        }
    }

    /// Dashboard figures.
    pub fn summary(&self) -> ProgressSummary {
        ProgressSummary {
            total: self.progress.total(),
            goal: self.progress.goal(),
            percentage: self.progress.percentage(),
            tokens_to_goal: self.progress.tokens_to_goal(),
            submissions: self.submissions,
        }
    }

    /// True and displayed progress.
    pub fn progress(&self) -> &ProgressState {
        &self.progress
    }

    /// Running discrete phase.
    pub fn phase(&self) -> AnimationPhase {
        self.animator.phase()
    }

    /// Events waiting behind the running animation.
    pub fn pending_events(&self) -> usize {
        self.queue.len()
    }

    /// Tokens queued or animating but not yet committed to the total.
    pub fn in_flight_tokens(&self) -> u64 {
        self.queue.pending_tokens() + self.animator.current_tokens().unwrap_or(0)
    }

    /// Whether the tween is moving the display value.
    pub fn is_tweening(&self) -> bool {
        self.tween.is_active()
    }

    /// No animation, no queued event, no tween and no sprite load outstanding.
    pub fn is_settled(&self) -> bool {
        self.animator.is_idle()
            && self.queue.is_empty()
            && !self.tween.is_active()
            && !self.sprites.is_loading()
    }

    /// Frame geometry.
    pub fn layout(&self) -> &PatchLayout {
        &self.layout
    }

    /// How vegetables are drawn.
    pub fn asset_strategy(&self) -> AssetStrategy {
        self.strategy
    }

    /// Sprites loaded so far.
    pub fn sprites(&self) -> &SpriteStore {
        &self.sprites
    }

    /// Mutable sprite store, for hosts that wait on loading.
    pub fn sprites_mut(&mut self) -> &mut SpriteStore {
        &mut self.sprites
    }

    /// Frames ticked since construction.
    pub fn frame(&self) -> FrameIndex {
        self.frame
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/veg_patch.rs"]
mod tests;
