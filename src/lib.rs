//! vegpatch animates a vegetable patch toward a shared pledge goal.
//!
//! The engine is frame-driven and single-threaded:
//!
//! - Build a [`VegPatch`] from a [`PatchConfig`] and call [`VegPatch::init`]
//! - Feed it pledges and totaliser updates, directly or through a [`SyncLayer`]
//! - Call [`VegPatch::tick`] once per host frame and paint [`VegPatch::compose`] with a
//!   [`RenderBackend`] such as [`CpuBackend`]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod foundation;

pub(crate) mod animation;
pub(crate) mod config;
pub(crate) mod engine;
pub(crate) mod host;
pub(crate) mod pledge;
pub(crate) mod progress;
/// Scene model and CPU rasteriser.
pub mod render;
pub(crate) mod scene;
pub(crate) mod sync;

pub use crate::foundation::core::{
    Affine, BezPath, Canvas, FrameIndex, Point, Rect, Rgba8, Vec2,
};
pub use crate::foundation::error::{PatchError, PatchResult};

pub use crate::animation::ease::Ease;
pub use crate::animation::pledge::{AnimationPhase, PhaseStep, PledgeAnimator};
pub use crate::animation::tween::{GrowthTween, TweenStep, step_toward};
pub use crate::assets::sprite::{NoSprites, Sprite, SpriteImage, SpriteSource};
pub use crate::assets::store::{LoadPoll, SpriteStore};
pub use crate::assets::text::FontBytes;
pub use crate::config::{ENV_ASSETS_DIR, ENV_FONT, PatchConfig};
pub use crate::engine::veg_patch::{Tick, VegPatch};
pub use crate::host::frame_loop::{EventScript, FrameLoop, FrameLoopOpts, LoopReport, ScriptedEvent};
pub use crate::host::sink::{FrameSink, InMemorySink, PngSequenceSink};
pub use crate::pledge::form::{GROUP_PLEDGES, HOUSEHOLD_PLEDGES, ORG_TYPES, Pathway, PledgeForm};
pub use crate::pledge::queue::{PledgeEvent, PledgeQueue};
pub use crate::progress::state::{
    DEFAULT_GOAL, DEMO_TOTAL, PatchState, ProgressState, ProgressSummary, percentage_of,
};
pub use crate::render::backend::{FrameRGBA, RenderBackend};
pub use crate::render::cpu::{CpuBackend, CpuBackendOpts};
pub use crate::render::plan::{DrawOp, Layer, LayerKind, Scene};
pub use crate::scene::composer::{SceneInput, compose, progress_caption};
pub use crate::scene::layout::{AssetStrategy, PatchLayout, PatchVariant};
pub use crate::scene::overlay::{falling_seed_position, pledge_overlay, watering_can_pose};
pub use crate::scene::slots::{
    VegetableKind, VegetableSlot, growth_fraction, visible_count, visible_slots,
};
pub use crate::sync::layer::{SyncLayer, SyncOutcome};
pub use crate::sync::message::WidgetMessage;
pub use crate::sync::source::{
    FileTotalsSource, PledgeSubmitter, Totals, TotalsSource, submit_with_fallback,
};
