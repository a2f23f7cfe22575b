use super::*;
use crate::assets::sprite::NoSprites;
use crate::scene::layout::PatchVariant;

fn layout() -> PatchLayout {
    PatchLayout::new(PatchVariant::Full, PatchVariant::Full.default_canvas())
}

#[test]
fn idle_has_no_overlay() {
    assert!(pledge_overlay(&layout(), AnimationPhase::Idle, &NoSprites).is_empty());
}

#[test]
fn seed_falls_from_sky_to_soil() {
    let l = layout();
    let top = falling_seed_position(&l, 0.0);
    let bottom = falling_seed_position(&l, 1.0);
    assert_eq!(top.y, 40.0);
    assert_eq!(bottom.y, l.soil_top);
    assert_eq!(top.x, 240.0);
    for i in 1..10 {
        let t = f64::from(i) / 10.0;
        assert!(falling_seed_position(&l, t).y > falling_seed_position(&l, t - 0.1).y);
    }
}

#[test]
fn can_moves_left_and_levels_out() {
    let l = layout();
    let (start, tilt0) = watering_can_pose(&l, WATER_START);
    let (mid, tilt_mid) = watering_can_pose(&l, WATER_START + 0.4);
    let (end, tilt_end) = watering_can_pose(&l, WATER_END);
    assert_eq!(start.x, 560.0);
    assert!(mid.x < start.x && end.x < mid.x);
    assert_eq!(tilt0, POUR_TILT);
    assert_eq!(tilt_mid, POUR_TILT);
    assert!(tilt_end.abs() < 1e-12);
}

#[test]
fn later_phases_add_mounds_and_can() {
    let l = layout();
    let falling = pledge_overlay(&l, AnimationPhase::SeedFalling { t: 0.5 }, &NoSprites);
    let planting = pledge_overlay(&l, AnimationPhase::SeedPlanting { t: 1.5 }, &NoSprites);
    let watering = pledge_overlay(&l, AnimationPhase::Watering { t: 4.0 }, &NoSprites);
    assert_eq!(falling.len(), 1);
    // six mounds + one seed
    assert_eq!(planting.len(), 7);
    // six mounds + six seeds + procedural can
    assert!(watering.len() > 12);
}
