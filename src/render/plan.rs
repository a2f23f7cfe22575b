use crate::animation::pledge::AnimationPhase;
use crate::assets::sprite::Sprite;
use crate::foundation::core::{Affine, BezPath, Canvas, Point, Rect, Rgba8, Vec2};
use crate::scene::slots::VegetableSlot;

/// Backend-agnostic drawing instruction in canvas pixel space.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    /// Solid fill of a closed path.
    Fill {
        /// Path to fill.
        path: BezPath,
        /// Fill color.
        color: Rgba8,
    },
    /// Vertical two-stop gradient covering `rect`.
    LinearGradient {
        /// Covered area.
        rect: Rect,
        /// Color at `rect.y0`.
        top: Rgba8,
        /// Color at `rect.y1`.
        bottom: Rgba8,
    },
    /// A loaded sprite stretched over `(0,0)..size`, then placed with `transform`.
    Image {
        /// Which sprite.
        sprite: Sprite,
        /// Sprite-local to canvas transform.
        transform: Affine,
        /// Drawn size before `transform`.
        size: Vec2,
    },
    /// Single line of outlined text centered horizontally on `anchor.x` with its baseline at
    /// `anchor.y`.
    Text {
        /// Characters to draw.
        text: String,
        /// Center-baseline anchor.
        anchor: Point,
        /// Font size.
        size_px: f32,
        /// Glyph fill.
        fill: Rgba8,
        /// Outline color.
        outline: Rgba8,
        /// Outline width.
        outline_px: f64,
    },
}

/// Painter's-order layer tags.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LayerKind {
    /// Sky gradient.
    Sky,
    /// Sun disc and rays.
    Sun,
    /// Soil gradient and speckles.
    Soil,
    /// Goal-reached plate, replacing the vegetable grid.
    GoalPlate,
    /// Vegetable grid.
    Vegetables,
    /// Seed, mound and watering overlays of the running pledge animation.
    PledgeAnimation,
    /// Idle watering can shown while the patch is still growing.
    WateringCan,
    /// Caption.
    ProgressText,
}

/// One tagged group of draw ops.
#[derive(Clone, Debug, PartialEq)]
pub struct Layer {
    /// Tag.
    pub kind: LayerKind,
    /// Ops in painter's order.
    pub ops: Vec<DrawOp>,
}

/// One fully composed frame: everything a backend needs to paint it.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Target surface.
    pub canvas: Canvas,
    /// Layers, back to front.
    pub layers: Vec<Layer>,
    /// Slots drawn in the vegetable layer (empty when the plate is shown).
    pub slots: Vec<VegetableSlot>,
    /// Caption text.
    pub progress_text: String,
    /// Phase the frame was composed for.
    pub phase: AnimationPhase,
}

impl Scene {
    /// Layer tags in paint order.
    pub fn layer_kinds(&self) -> Vec<LayerKind> {
        self.layers.iter().map(|l| l.kind).collect()
    }

    /// First layer with `kind`.
    pub fn layer(&self, kind: LayerKind) -> Option<&Layer> {
        self.layers.iter().find(|l| l.kind == kind)
    }

    /// Whether a layer with `kind` was composed.
    pub fn has_layer(&self, kind: LayerKind) -> bool {
        self.layer(kind).is_some()
    }

    /// Total number of draw ops.
    pub fn op_count(&self) -> usize {
        self.layers.iter().map(|l| l.ops.len()).sum()
    }
}
