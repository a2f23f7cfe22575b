//! Stateless drawing routines.
//!
//! Each routine maps `(placement, growth, kind)` to draw ops in canvas space. Nothing here reads
//! engine state; the composer decides what to draw and where.

use std::f64::consts::{PI, TAU};

use kurbo::Shape;

use crate::assets::sprite::{Sprite, SpriteSource};
use crate::foundation::core::{Affine, BezPath, Point, Rect, Rgba8, Vec2};
use crate::foundation::math::hash_unit;
use crate::render::plan::DrawOp;
use crate::scene::layout::PatchLayout;
use crate::scene::slots::{VegetableKind, VegetableSlot};

const TOLERANCE: f64 = 0.1;

/// Sky gradient, top.
pub const SKY_TOP: Rgba8 = Rgba8::hex(0x87CEEB);
/// Sky gradient, horizon.
pub const SKY_HORIZON: Rgba8 = Rgba8::hex(0xB0E0E6);
/// Sun disc and rays.
pub const SUN: Rgba8 = Rgba8::hex(0xFFD700);
/// Soil gradient, top.
pub const SOIL_TOP: Rgba8 = Rgba8::hex(0x8B4513);
/// Soil gradient, bottom; also mounds and seedlings.
pub const SOIL_DARK: Rgba8 = Rgba8::hex(0x654321);
/// Soil speckle, `rgba(139, 69, 19, 0.3)`.
pub const SPECKLE: Rgba8 = Rgba8::hex(0x8B4513).with_alpha(77);
/// Foliage.
pub const LEAF: Rgba8 = Rgba8::hex(0x4CAF50);
/// Carrot root.
pub const CARROT: Rgba8 = Rgba8::hex(0xFF9800);
/// Tomato fruit.
pub const TOMATO: Rgba8 = Rgba8::hex(0xF44336);
/// Potato tuber.
pub const POTATO: Rgba8 = Rgba8::hex(0xD2691E);
/// Watering can metal.
pub const CAN: Rgba8 = Rgba8::hex(0x78909C);
/// Water drops.
pub const WATER: Rgba8 = Rgba8::hex(0x64B5F6);
/// Plate.
pub const PLATE: Rgba8 = Rgba8::hex(0xFAFAFA);
/// Seed husk.
pub const SEED: Rgba8 = Rgba8::hex(0x8D6E63);
/// Caption fill.
pub const TEXT_FILL: Rgba8 = Rgba8::hex(0xFFFFFF);
/// Caption outline.
pub const TEXT_OUTLINE: Rgba8 = Rgba8::hex(0x2E7D32);

/// Speckles scattered over the soil per frame.
pub const SPECKLE_COUNT: u64 = 100;

/// Below this growth a slot shows only a soil mound.
pub const SEEDLING_GROWTH: f64 = 0.2;

/// Collects ops under a fixed local transform.
struct Pen {
    xf: Affine,
    ops: Vec<DrawOp>,
}

impl Pen {
    fn at(origin: Point) -> Self {
        Self {
            xf: Affine::translate(origin.to_vec2()),
            ops: Vec::new(),
        }
    }

    fn with_transform(xf: Affine) -> Self {
        Self {
            xf,
            ops: Vec::new(),
        }
    }

    fn fill(&mut self, shape: &impl Shape, color: Rgba8) {
        self.fill_in(Affine::IDENTITY, shape, color);
    }

    fn fill_in(&mut self, local: Affine, shape: &impl Shape, color: Rgba8) {
        let mut path = shape.to_path(TOLERANCE);
        path.apply_affine(self.xf * local);
        self.ops.push(DrawOp::Fill { path, color });
    }

    fn stroke(&mut self, shape: &impl Shape, width: f64, color: Rgba8) {
        let mut path = stroke_outline(shape, width);
        path.apply_affine(self.xf);
        self.ops.push(DrawOp::Fill { path, color });
    }

    fn finish(self) -> Vec<DrawOp> {
        self.ops
    }
}

/// Fillable outline of a stroked shape.
fn stroke_outline(shape: &impl Shape, width: f64) -> BezPath {
    kurbo::stroke(
        shape.path_elements(TOLERANCE),
        &kurbo::Stroke::new(width),
        &kurbo::StrokeOpts::default(),
        TOLERANCE,
    )
}

fn polygon(points: &[(f64, f64)]) -> BezPath {
    let mut path = BezPath::new();
    for (i, &(x, y)) in points.iter().enumerate() {
        if i == 0 {
            path.move_to((x, y));
        } else {
            path.line_to((x, y));
        }
    }
    path.close_path();
    path
}

fn ellipse(cx: f64, cy: f64, rx: f64, ry: f64, rotation: f64) -> kurbo::Ellipse {
    kurbo::Ellipse::new((cx, cy), (rx, ry), rotation)
}

/// Sky band above the soil line.
pub fn sky(layout: &PatchLayout) -> Vec<DrawOp> {
    vec![DrawOp::LinearGradient {
        rect: Rect::new(0.0, 0.0, layout.canvas.w(), layout.soil_top),
        top: SKY_TOP,
        bottom: SKY_HORIZON,
    }]
}

/// Sun disc with eight short rays.
pub fn sun(layout: &PatchLayout) -> Vec<DrawOp> {
    let c = layout.sun_center;
    let r = layout.sun_radius;
    let mut pen = Pen::with_transform(Affine::IDENTITY);
    pen.fill(&kurbo::Circle::new(c, r), SUN);
    for i in 0..8 {
        let angle = TAU * f64::from(i) / 8.0;
        let dir = Vec2::from_angle(angle);
        let ray = kurbo::Line::new(c + dir * (r + 5.0), c + dir * (r + 15.0));
        pen.stroke(&ray, 2.0, SUN);
    }
    pen.finish()
}

/// Soil gradient plus speckles re-rolled from `(noise_seed, frame)`.
pub fn soil(layout: &PatchLayout, noise_seed: u64, frame: u64) -> Vec<DrawOp> {
    let (w, h) = (layout.canvas.w(), layout.canvas.h());
    let depth = h - layout.soil_top;
    let mut speckles = BezPath::new();
    for i in 0..SPECKLE_COUNT {
        let x = hash_unit(noise_seed, frame, i * 2) * w;
        let y = layout.soil_top + hash_unit(noise_seed, frame, i * 2 + 1) * depth;
        speckles.extend(Rect::new(x, y, x + 2.0, y + 2.0).path_elements(TOLERANCE));
    }
    vec![
        DrawOp::LinearGradient {
            rect: Rect::new(0.0, layout.soil_top, w, h),
            top: SOIL_TOP,
            bottom: SOIL_DARK,
        },
        DrawOp::Fill {
            path: speckles,
            color: SPECKLE,
        },
    ]
}

/// Procedural vegetable for one slot, scaled by `veg_size` at full growth.
pub fn vegetable(slot: &VegetableSlot, veg_size: f64) -> Vec<DrawOp> {
    let g = slot.growth;
    if g < SEEDLING_GROWTH {
        return seedling(slot.origin, (5.0 * g).max(3.0));
    }

    let s = (veg_size * g).max(5.0);
    let mut pen = Pen::at(slot.origin);
    match slot.kind {
        VegetableKind::Carrot => {
            for i in 0..3 {
                let a = TAU * f64::from(i) / 3.0 - PI / 2.0;
                pen.fill(
                    &ellipse(a.cos() * s * 0.3, a.sin() * s * 0.3 - s * 0.2, s * 0.2, s * 0.4 * g, a),
                    LEAF,
                );
            }
            if g > 0.5 {
                pen.fill(
                    &polygon(&[(0.0, 0.0), (-s * 0.15, s * 0.3 * g), (s * 0.15, s * 0.3 * g)]),
                    CARROT,
                );
            }
        }
        VegetableKind::Tomato => {
            pen.stroke(&kurbo::Line::new((0.0, 0.0), (0.0, -s * g)), 3.0, LEAF);
            for i in 0..2 {
                let leaf_y = -s * g * (0.3 + f64::from(i) * 0.3);
                pen.fill(&ellipse(-s * 0.2, leaf_y, s * 0.15, s * 0.25, -0.3), LEAF);
                pen.fill(&ellipse(s * 0.2, leaf_y, s * 0.15, s * 0.25, 0.3), LEAF);
            }
            if g > 0.6 {
                pen.fill(
                    &kurbo::Circle::new((0.0, -s * g * 0.7), (s * 0.25).max(3.0)),
                    TOMATO,
                );
            }
        }
        VegetableKind::Lettuce => {
            let leaves = (g * 8.0).floor() as u64 + 3;
            for i in 0..leaves {
                let angle = TAU * i as f64 / leaves as f64;
                let jitter = hash_unit(u64::from(slot.index), i, 0);
                let leaf = s * (0.3 + jitter * 0.2) * g;
                pen.fill_in(
                    Affine::rotate(angle),
                    &ellipse(0.0, -s * 0.3 * g, leaf, leaf * 1.5, 0.0),
                    LEAF,
                );
            }
        }
        VegetableKind::Potato => {
            pen.fill(&ellipse(-s * 0.12, -s * 0.45 * g, s * 0.1, s * 0.2, -0.4), LEAF);
            pen.fill(&ellipse(s * 0.12, -s * 0.45 * g, s * 0.1, s * 0.2, 0.4), LEAF);
            pen.fill(&ellipse(0.0, -s * 0.1, s * 0.3, s * 0.2, 0.0), POTATO);
        }
    }
    pen.finish()
}

/// Sprite-drawn vegetable, or a colored placeholder disc until the sprite has loaded.
pub fn raster_vegetable(
    slot: &VegetableSlot,
    veg_size: f64,
    sprites: &dyn SpriteSource,
) -> Vec<DrawOp> {
    let g = slot.growth;
    if g < SEEDLING_GROWTH {
        return seedling(slot.origin, 5.0);
    }

    let scale = veg_size / 30.0;
    let loaded = Sprite::for_kind(slot.kind).filter(|s| sprites.is_loaded(*s));
    match loaded {
        Some(sprite) => {
            let size = veg_size * g;
            let lift = match slot.kind {
                VegetableKind::Tomato => size * 0.3,
                VegetableKind::Carrot => size * 0.2,
                VegetableKind::Potato | VegetableKind::Lettuce => 0.0,
            };
            let top_left = slot.origin + Vec2::new(-size / 2.0, -size * 0.5 - lift - size / 2.0);
            vec![DrawOp::Image {
                sprite,
                transform: Affine::translate(top_left.to_vec2()),
                size: Vec2::new(size, size),
            }]
        }
        None => {
            let color = match slot.kind {
                VegetableKind::Potato => POTATO,
                VegetableKind::Tomato => TOMATO,
                VegetableKind::Carrot | VegetableKind::Lettuce => CARROT,
            };
            let size = 20.0 * g * scale;
            let mut pen = Pen::at(slot.origin);
            pen.fill(&kurbo::Circle::new((0.0, -size / 2.0), size / 2.0), color);
            pen.finish()
        }
    }
}

/// Bare soil mound shown for slots that have not sprouted yet.
pub fn seedling(origin: Point, radius: f64) -> Vec<DrawOp> {
    let mut pen = Pen::at(origin);
    pen.fill(&kurbo::Circle::new((0.0, 0.0), radius), SOIL_DARK);
    pen.finish()
}

/// One planting mound per column along the soil line.
pub fn mounds(layout: &PatchLayout) -> Vec<DrawOp> {
    let (rx, ry) = (layout.mound_radius(), layout.mound_radius() / 4.0);
    let mut pen = Pen::with_transform(Affine::IDENTITY);
    for x in layout.mound_xs() {
        pen.fill(&ellipse(x, layout.soil_top, rx, ry, 0.0), SOIL_DARK);
    }
    pen.finish()
}

/// Seed centered on `center`, `size` pixels across.
pub fn seed(center: Point, size: f64, sprite: Sprite, sprites: &dyn SpriteSource) -> Vec<DrawOp> {
    if sprites.is_loaded(sprite) {
        let top_left = center - Vec2::new(size / 2.0, size / 2.0);
        return vec![DrawOp::Image {
            sprite,
            transform: Affine::translate(top_left.to_vec2()),
            size: Vec2::new(size, size),
        }];
    }
    let mut pen = Pen::at(center);
    pen.fill(&ellipse(0.0, 0.0, size * 0.22, size * 0.32, 0.4), SEED);
    pen.finish()
}

/// Watering can centered on `center`, rotated by `tilt` radians.
pub fn watering_can(center: Point, tilt: f64, sprites: &dyn SpriteSource) -> Vec<DrawOp> {
    if sprites.is_loaded(Sprite::WateringCan) {
        let transform = Affine::translate(center.to_vec2())
            * Affine::rotate(tilt * 0.5)
            * Affine::translate((-30.0, -30.0));
        return vec![DrawOp::Image {
            sprite: Sprite::WateringCan,
            transform,
            size: Vec2::new(60.0, 60.0),
        }];
    }

    let s = 40.0;
    let mut pen = Pen::with_transform(Affine::translate(center.to_vec2()) * Affine::rotate(tilt));
    pen.fill(&Rect::new(-s * 0.3, -s * 0.2, s * 0.3, s * 0.3), CAN);
    pen.fill(
        &polygon(&[
            (s * 0.3, 0.0),
            (s * 0.6, -s * 0.3),
            (s * 0.6, -s * 0.2),
            (s * 0.35, 0.05),
        ]),
        CAN,
    );
    pen.stroke(
        &kurbo::Arc::new(
            (-s * 0.2, 0.0),
            (s * 0.25, s * 0.25),
            PI * 0.8,
            PI * 1.4,
            0.0,
        ),
        4.0,
        CAN,
    );
    for i in 0..3 {
        let i = f64::from(i);
        pen.fill(
            &kurbo::Circle::new((s * 0.6 + i * 5.0, -s * 0.2 + i * 8.0), 3.0),
            WATER,
        );
    }
    pen.finish()
}

/// Goal-reached plate centered slightly below the middle of the canvas.
pub fn goal_plate(layout: &PatchLayout, sprites: &dyn SpriteSource) -> Vec<DrawOp> {
    let (w, h) = (layout.canvas.w(), layout.canvas.h());
    if let Some(img) = sprites.sprite(Sprite::FoodPlate) {
        let (nw, nh) = (f64::from(img.width.max(1)), f64::from(img.height.max(1)));
        let scale = (w * 0.8 / nw).min(h * 0.7 / nh);
        let (dw, dh) = (nw * scale, nh * scale);
        return vec![DrawOp::Image {
            sprite: Sprite::FoodPlate,
            transform: Affine::translate(((w - dw) / 2.0, (h - dh) / 2.0 + 20.0)),
            size: Vec2::new(dw, dh),
        }];
    }

    let mut pen = Pen::at(Point::new(w / 2.0, h / 2.0));
    pen.fill(&ellipse(0.0, 20.0, 150.0, 60.0, 0.0), PLATE);
    pen.fill(&ellipse(-40.0, 20.0, 25.0, 15.0, 0.0), POTATO);
    pen.fill(&kurbo::Circle::new((30.0, 10.0), 20.0), TOMATO);
    pen.fill(&polygon(&[(60.0, 30.0), (80.0, 10.0), (70.0, 40.0)]), CARROT);
    pen.finish()
}

/// Outlined caption.
pub fn progress_text(layout: &PatchLayout, text: &str) -> Vec<DrawOp> {
    vec![DrawOp::Text {
        text: text.to_owned(),
        anchor: Point::new(layout.canvas.w() / 2.0, layout.text_baseline),
        size_px: layout.text_size,
        fill: TEXT_FILL,
        outline: TEXT_OUTLINE,
        outline_px: 4.0,
    }]
}

#[cfg(test)]
#[path = "../../tests/unit/render/primitives.rs"]
mod tests;
