use super::*;
use crate::assets::sprite::{NoSprites, SpriteImage};
use crate::scene::layout::PatchVariant;
use std::sync::Arc;

fn layout() -> PatchLayout {
    PatchLayout::new(PatchVariant::Full, PatchVariant::Full.default_canvas())
}

fn slot(kind: VegetableKind, growth: f64) -> VegetableSlot {
    VegetableSlot {
        index: 4,
        row: 0,
        col: 4,
        origin: Point::new(100.0, 200.0),
        kind,
        growth,
    }
}

fn colors(ops: &[DrawOp]) -> Vec<Rgba8> {
    ops.iter()
        .filter_map(|op| match op {
            DrawOp::Fill { color, .. } => Some(*color),
            _ => None,
        })
        .collect()
}

struct AllSprites(SpriteImage);

impl SpriteSource for AllSprites {
    fn sprite(&self, _sprite: Sprite) -> Option<&SpriteImage> {
        Some(&self.0)
    }
}

fn all_sprites() -> AllSprites {
    AllSprites(SpriteImage {
        width: 2,
        height: 1,
        rgba8_premul: Arc::new(vec![255; 8]),
    })
}

#[test]
fn young_slots_are_bare_mounds() {
    for kind in [VegetableKind::Carrot, VegetableKind::Tomato, VegetableKind::Lettuce] {
        let ops = vegetable(&slot(kind, 0.1), 30.0);
        assert_eq!(colors(&ops), vec![SOIL_DARK]);
    }
}

#[test]
fn carrot_root_appears_past_half_growth() {
    assert!(!colors(&vegetable(&slot(VegetableKind::Carrot, 0.4), 30.0)).contains(&CARROT));
    assert!(colors(&vegetable(&slot(VegetableKind::Carrot, 0.8), 30.0)).contains(&CARROT));
}

#[test]
fn tomato_fruit_appears_when_ripe() {
    assert!(!colors(&vegetable(&slot(VegetableKind::Tomato, 0.5), 30.0)).contains(&TOMATO));
    assert!(colors(&vegetable(&slot(VegetableKind::Tomato, 0.9), 30.0)).contains(&TOMATO));
}

#[test]
fn lettuce_is_deterministic_per_slot() {
    let a = vegetable(&slot(VegetableKind::Lettuce, 0.7), 30.0);
    let b = vegetable(&slot(VegetableKind::Lettuce, 0.7), 30.0);
    assert_eq!(a, b);
    assert_eq!(a.len(), 8);
}

#[test]
fn shapes_are_placed_around_the_slot_origin() {
    let ops = vegetable(&slot(VegetableKind::Tomato, 1.0), 30.0);
    for op in &ops {
        let DrawOp::Fill { path, .. } = op else {
            panic!("expected fills");
        };
        let bb = path.bounding_box();
        assert!(bb.x0 > 50.0 && bb.x1 < 150.0, "{bb:?}");
        assert!(bb.y0 > 150.0 && bb.y1 < 250.0, "{bb:?}");
    }
}

#[test]
fn raster_slots_fall_back_to_colored_discs() {
    let ops = raster_vegetable(&slot(VegetableKind::Potato, 0.5), 30.0, &NoSprites);
    assert_eq!(colors(&ops), vec![POTATO]);

    let ops = raster_vegetable(&slot(VegetableKind::Potato, 0.5), 30.0, &all_sprites());
    assert!(matches!(
        ops.as_slice(),
        [DrawOp::Image { sprite: Sprite::Potato, size, .. }] if (size.x - 15.0).abs() < 1e-9
    ));
}

#[test]
fn sun_has_disc_and_eight_rays() {
    assert_eq!(sun(&layout()).len(), 9);
}

#[test]
fn soil_speckles_change_per_frame() {
    let l = layout();
    assert_eq!(soil(&l, 1, 5), soil(&l, 1, 5));
    assert_ne!(soil(&l, 1, 5), soil(&l, 1, 6));
    let DrawOp::Fill { path, color } = &soil(&l, 1, 5)[1] else {
        panic!("speckles are one fill");
    };
    assert_eq!(*color, SPECKLE);
    assert!(path.bounding_box().y0 >= l.soil_top);
}

#[test]
fn watering_can_uses_sprite_once_loaded() {
    let center = Point::new(300.0, 60.0);
    let procedural = watering_can(center, 0.0, &NoSprites);
    assert!(colors(&procedural).contains(&CAN));
    assert!(colors(&procedural).contains(&WATER));

    let sprite = watering_can(center, 0.3, &all_sprites());
    assert!(matches!(
        sprite.as_slice(),
        [DrawOp::Image { sprite: Sprite::WateringCan, .. }]
    ));
}

#[test]
fn plate_sprite_is_scaled_to_fit() {
    let l = layout();
    let ops = goal_plate(&l, &all_sprites());
    let [DrawOp::Image { size, .. }] = ops.as_slice() else {
        panic!("expected image");
    };
    assert!(size.x <= l.canvas.w() * 0.8 + 1e-9);
    assert!(size.y <= l.canvas.h() * 0.7 + 1e-9);

    assert!(colors(&goal_plate(&l, &NoSprites)).contains(&PLATE));
}

#[test]
fn mounds_sit_on_the_soil_line() {
    let l = layout();
    let ops = mounds(&l);
    assert_eq!(ops.len(), 6);
    for op in ops {
        let DrawOp::Fill { path, .. } = op else {
            panic!("expected fills");
        };
        let bb = path.bounding_box();
        assert!(bb.y0 < l.soil_top && bb.y1 > l.soil_top);
    }
}

#[test]
fn caption_is_centered() {
    let l = layout();
    let ops = progress_text(&l, "12.5% Grown");
    let [DrawOp::Text { anchor, size_px, outline, .. }] = ops.as_slice() else {
        panic!("expected text");
    };
    assert_eq!(anchor.x, 400.0);
    assert_eq!(anchor.y, 380.0);
    assert_eq!(*size_px, 20.0);
    assert_eq!(*outline, TEXT_OUTLINE);
}
