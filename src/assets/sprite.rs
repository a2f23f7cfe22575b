use std::sync::Arc;

use crate::scene::slots::VegetableKind;

/// Every sprite the patch can draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Sprite {
    /// First falling-seed frame.
    Seed1,
    /// Second falling-seed frame.
    Seed2,
    /// Third falling-seed frame.
    Seed3,
    /// Potato.
    Potato,
    /// Tomato.
    Tomato,
    /// Carrot.
    Carrot,
    /// Watering can.
    WateringCan,
    /// Goal-reached plate.
    FoodPlate,
}

impl Sprite {
    /// The full catalog, in load order.
    pub const ALL: [Self; 8] = [
        Self::Seed1,
        Self::Seed2,
        Self::Seed3,
        Self::Potato,
        Self::Tomato,
        Self::Carrot,
        Self::WateringCan,
        Self::FoodPlate,
    ];

    /// File name without extension, looked up in the assets directory as `.png` then `.svg`.
    pub fn file_stem(self) -> &'static str {
        match self {
            Self::Seed1 => "Seed_01",
            Self::Seed2 => "Seed_02",
            Self::Seed3 => "Seed_03",
            Self::Potato => "Potato_01",
            Self::Tomato => "Tomato_01",
            Self::Carrot => "Carrot_01",
            Self::WateringCan => "Watering_Can_01",
            Self::FoodPlate => "Food_plate_01",
        }
    }

    /// Seed frame `n`, cycling through the three seed sprites.
    pub fn seed(n: usize) -> Self {
        [Self::Seed1, Self::Seed2, Self::Seed3][n % 3]
    }

    /// Sprite for a vegetable kind. Lettuce has no sprite.
    pub fn for_kind(kind: VegetableKind) -> Option<Self> {
        match kind {
            VegetableKind::Carrot => Some(Self::Carrot),
            VegetableKind::Tomato => Some(Self::Tomato),
            VegetableKind::Potato => Some(Self::Potato),
            VegetableKind::Lettuce => None,
        }
    }
}

/// Decoded sprite pixels in premultiplied RGBA8.
#[derive(Clone, Debug)]
pub struct SpriteImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Row-major premultiplied RGBA8 bytes.
    pub rgba8_premul: Arc<Vec<u8>>,
}

/// Read access to whatever sprites have finished loading.
pub trait SpriteSource {
    /// The sprite, if it has loaded successfully.
    fn sprite(&self, sprite: Sprite) -> Option<&SpriteImage>;

    /// Whether `sprite` can be drawn this frame.
    fn is_loaded(&self, sprite: Sprite) -> bool {
        self.sprite(sprite).is_some()
    }
}

/// Source with no sprites; everything falls back to procedural shapes.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoSprites;

impl SpriteSource for NoSprites {
    fn sprite(&self, _sprite: Sprite) -> Option<&SpriteImage> {
        None
    }
}
