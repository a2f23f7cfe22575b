use crate::animation::ease::Ease;
use crate::animation::pledge::{AnimationPhase, PLANT_END, PLANT_START, WATER_END, WATER_START};
use crate::assets::sprite::{Sprite, SpriteSource};
use crate::foundation::core::Point;
use crate::render::plan::DrawOp;
use crate::render::primitives;
use crate::scene::layout::PatchLayout;

/// Tilt of the can while it pours, in radians.
pub const POUR_TILT: f64 = 0.3;

/// Where the falling seed is at phase counter `t`.
pub fn falling_seed_position(layout: &PatchLayout, t: f64) -> Point {
    let (w, h) = (layout.canvas.w(), layout.canvas.h());
    let start_y = h * 0.1;
    Point::new(
        w * 0.3 + (t * 10.0).sin() * 20.0,
        start_y + Ease::InQuad.apply(t) * (layout.soil_top - start_y),
    )
}

/// Where the watering can is, and its tilt, at phase counter `t`.
pub fn watering_can_pose(layout: &PatchLayout, t: f64) -> (Point, f64) {
    let (w, h) = (layout.canvas.w(), layout.canvas.h());
    let p = (t - WATER_START).clamp(0.0, WATER_END - WATER_START);
    let center = Point::new(w * 0.7 - p * 100.0, h * 0.15 + (p * 5.0).sin() * 5.0);
    let tilt = POUR_TILT * (1.0 - Ease::OutQuad.between(p, 0.5, 1.0));
    (center, tilt)
}

/// Draw ops for the running pledge animation; empty while idle.
pub fn pledge_overlay(
    layout: &PatchLayout,
    phase: AnimationPhase,
    sprites: &dyn SpriteSource,
) -> Vec<DrawOp> {
    let seed_size = layout.veg_size;
    match phase {
        AnimationPhase::Idle => Vec::new(),
        AnimationPhase::SeedFalling { t } => {
            let frame = (t * 3.0).floor().max(0.0) as usize;
            primitives::seed(
                falling_seed_position(layout, t),
                seed_size,
                Sprite::seed(frame),
                sprites,
            )
        }
        AnimationPhase::SeedPlanting { t } => {
            let sunk = Ease::OutQuad.between(t, PLANT_START, PLANT_END);
            let mut ops = primitives::mounds(layout);
            let center = Point::new(
                layout.canvas.w() * 0.3,
                layout.soil_top + sunk * layout.mound_radius() / 4.0,
            );
            ops.extend(primitives::seed(
                center,
                seed_size * (1.0 - 0.5 * sunk),
                Sprite::Seed1,
                sprites,
            ));
            ops
        }
        AnimationPhase::Watering { t } => {
            let mut ops = primitives::mounds(layout);
            ops.extend(seeds_in_soil(layout, sprites));
            let (center, tilt) = watering_can_pose(layout, t);
            ops.extend(primitives::watering_can(center, tilt, sprites));
            ops
        }
    }
}

fn seeds_in_soil(layout: &PatchLayout, sprites: &dyn SpriteSource) -> Vec<DrawOp> {
    let size = layout.veg_size * 2.0 / 3.0;
    layout
        .mound_xs()
        .enumerate()
        .flat_map(|(i, x)| {
            primitives::seed(Point::new(x, layout.soil_top), size, Sprite::seed(i), sprites)
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/scene/overlay.rs"]
mod tests;
