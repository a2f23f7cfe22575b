use crate::animation::pledge::AnimationPhase;
use crate::assets::sprite::SpriteSource;
use crate::foundation::core::{FrameIndex, Point};
use crate::render::plan::{DrawOp, Layer, LayerKind, Scene};
use crate::render::primitives;
use crate::scene::layout::{AssetStrategy, PatchLayout, PatchVariant};
use crate::scene::overlay::pledge_overlay;
use crate::scene::slots::visible_slots;

/// Everything a frame depends on.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneInput {
    /// Geometry.
    pub layout: PatchLayout,
    /// Shape or sprite rendering.
    pub strategy: AssetStrategy,
    /// Animated display value in `[0, 100]`.
    pub display_percentage: f64,
    /// Committed total.
    pub total: u64,
    /// Goal.
    pub goal: u64,
    /// Running discrete phase (with its counter).
    pub phase: AnimationPhase,
    /// Frame being drawn; seeds the soil speckles.
    pub frame: FrameIndex,
    /// Base seed for the soil speckles.
    pub noise_seed: u64,
}

/// Caption for `display_percentage`.
pub fn progress_caption(variant: PatchVariant, display_percentage: f64) -> String {
    match variant {
        PatchVariant::Full if display_percentage >= 100.0 => "Goal Reached!".to_owned(),
        PatchVariant::Full => format!("{display_percentage:.1}% Grown"),
        PatchVariant::Compact => format!("{display_percentage:.0}%"),
    }
}

/// Compose one frame. Pure: the same input and sprites give the same scene.
#[tracing::instrument(level = "trace", skip_all, fields(frame = input.frame.0, phase = input.phase.name()))]
pub fn compose(input: &SceneInput, sprites: &dyn SpriteSource) -> Scene {
    let layout = &input.layout;
    let display = input.display_percentage;
    let mut layers = Vec::with_capacity(7);
    let mut push = |kind: LayerKind, ops: Vec<DrawOp>| layers.push(Layer { kind, ops });

    push(LayerKind::Sky, primitives::sky(layout));
    push(LayerKind::Sun, primitives::sun(layout));
    push(
        LayerKind::Soil,
        primitives::soil(layout, input.noise_seed, input.frame.0),
    );

    let slots = if display >= 100.0 {
        push(LayerKind::GoalPlate, primitives::goal_plate(layout, sprites));
        Vec::new()
    } else {
        let slots = visible_slots(layout, input.strategy, display);
        let ops = slots
            .iter()
            .flat_map(|slot| match input.strategy {
                AssetStrategy::Procedural => primitives::vegetable(slot, layout.veg_size),
                AssetStrategy::Raster => {
                    primitives::raster_vegetable(slot, layout.veg_size, sprites)
                }
            })
            .collect();
        push(LayerKind::Vegetables, ops);
        slots
    };

    if !input.phase.is_idle() {
        push(
            LayerKind::PledgeAnimation,
            pledge_overlay(layout, input.phase, sprites),
        );
    }

    if display > 0.0 && display < 100.0 && input.phase.is_idle() {
        let (w, h) = (layout.canvas.w(), layout.canvas.h());
        push(
            LayerKind::WateringCan,
            primitives::watering_can(Point::new(w - 80.0, h * 0.5), 0.0, sprites),
        );
    }

    let progress_text = progress_caption(layout.variant, display);
    push(
        LayerKind::ProgressText,
        primitives::progress_text(layout, &progress_text),
    );

    Scene {
        canvas: layout.canvas,
        layers,
        slots,
        progress_text,
        phase: input.phase,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/composer.rs"]
mod tests;
