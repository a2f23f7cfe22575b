use super::*;
use crate::assets::sprite::NoSprites;

fn input(display: f64, phase: AnimationPhase) -> SceneInput {
    SceneInput {
        layout: PatchLayout::new(PatchVariant::Full, PatchVariant::Full.default_canvas()),
        strategy: AssetStrategy::Procedural,
        display_percentage: display,
        total: 0,
        goal: 100_000,
        phase,
        frame: FrameIndex(3),
        noise_seed: 9,
    }
}

#[test]
fn captions_per_variant() {
    assert_eq!(progress_caption(PatchVariant::Full, 12.34), "12.3% Grown");
    assert_eq!(progress_caption(PatchVariant::Full, 100.0), "Goal Reached!");
    assert_eq!(progress_caption(PatchVariant::Compact, 12.6), "13%");
    assert_eq!(progress_caption(PatchVariant::Compact, 100.0), "100%");
}

#[test]
fn empty_patch_has_no_vegetables_or_can() {
    let scene = compose(&input(0.0, AnimationPhase::Idle), &NoSprites);
    assert!(scene.slots.is_empty());
    assert_eq!(
        scene.layer_kinds(),
        vec![
            LayerKind::Sky,
            LayerKind::Sun,
            LayerKind::Soil,
            LayerKind::Vegetables,
            LayerKind::ProgressText
        ]
    );
    assert_eq!(scene.progress_text, "0.0% Grown");
}

#[test]
fn growing_patch_shows_idle_can() {
    let scene = compose(&input(50.0, AnimationPhase::Idle), &NoSprites);
    assert_eq!(scene.slots.len(), 18);
    assert!(scene.has_layer(LayerKind::WateringCan));
    assert!(!scene.has_layer(LayerKind::PledgeAnimation));
}

#[test]
fn running_animation_replaces_idle_can() {
    let scene = compose(&input(50.0, AnimationPhase::Watering { t: 3.8 }), &NoSprites);
    assert!(scene.has_layer(LayerKind::PledgeAnimation));
    assert!(!scene.has_layer(LayerKind::WateringCan));
    let kinds = scene.layer_kinds();
    let overlay = kinds.iter().position(|k| *k == LayerKind::PledgeAnimation);
    let veg = kinds.iter().position(|k| *k == LayerKind::Vegetables);
    assert!(veg < overlay);
}

#[test]
fn goal_plate_replaces_grid_at_full_display() {
    let scene = compose(&input(100.0, AnimationPhase::Idle), &NoSprites);
    assert!(scene.slots.is_empty());
    assert!(scene.has_layer(LayerKind::GoalPlate));
    assert!(!scene.has_layer(LayerKind::Vegetables));
    assert!(!scene.has_layer(LayerKind::WateringCan));
    assert_eq!(scene.progress_text, "Goal Reached!");
}

#[test]
fn non_random_layers_are_stable_across_frames() {
    let a = compose(&input(30.0, AnimationPhase::Idle), &NoSprites);
    let mut next = input(30.0, AnimationPhase::Idle);
    next.frame = FrameIndex(4);
    let b = compose(&next, &NoSprites);
    for kind in [LayerKind::Sky, LayerKind::Sun, LayerKind::Vegetables, LayerKind::ProgressText] {
        assert_eq!(a.layer(kind), b.layer(kind), "{kind:?}");
    }
    assert_ne!(a.layer(LayerKind::Soil), b.layer(LayerKind::Soil));
}

#[test]
fn compact_variant_caps_at_twelve() {
    let mut i = input(99.0, AnimationPhase::Idle);
    i.layout = PatchLayout::new(PatchVariant::Compact, PatchVariant::Compact.default_canvas());
    let scene = compose(&i, &NoSprites);
    assert_eq!(scene.slots.len(), 11);
    assert_eq!(scene.progress_text, "99%");
}
