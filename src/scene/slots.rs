use crate::foundation::core::Point;
use crate::scene::layout::{AssetStrategy, PatchLayout};

/// Vegetable drawn in a slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VegetableKind {
    /// Orange root with a green top.
    Carrot,
    /// Red fruit on a short stem.
    Tomato,
    /// Green leaf rosette.
    Lettuce,
    /// Brown tuber.
    Potato,
}

impl VegetableKind {
    /// Row cycle for procedurally drawn patches.
    pub const PROCEDURAL_ROWS: [Self; 3] = [Self::Carrot, Self::Tomato, Self::Lettuce];
    /// Row cycle for sprite-drawn patches.
    pub const RASTER_ROWS: [Self; 3] = [Self::Carrot, Self::Potato, Self::Tomato];

    /// Kind planted in `row` for the given strategy.
    pub fn for_row(strategy: AssetStrategy, row: u32) -> Self {
        let cycle = match strategy {
            AssetStrategy::Procedural => &Self::PROCEDURAL_ROWS,
            AssetStrategy::Raster => &Self::RASTER_ROWS,
        };
        cycle[row as usize % cycle.len()]
    }
}

/// One planted cell of the grid for the current frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VegetableSlot {
    /// Row-major index, `0..visible`.
    pub index: u32,
    /// Grid row.
    pub row: u32,
    /// Grid column.
    pub col: u32,
    /// Ground point the vegetable grows from.
    pub origin: Point,
    /// What grows here.
    pub kind: VegetableKind,
    /// Growth in `[0, 1]`.
    pub growth: f64,
}

/// Slots shown at `display_percentage`: `floor(display / 100 * max_slots)`.
pub fn visible_count(display_percentage: f64, max_slots: u32) -> u32 {
    if !display_percentage.is_finite() || display_percentage <= 0.0 {
        return 0;
    }
    let n = (display_percentage.min(100.0) / 100.0 * f64::from(max_slots)).floor();
    (n as u32).min(max_slots)
}

/// Growth of slot `index` when `visible` slots are shown: `min(1, 1.2 * index / visible)`.
///
/// Earlier slots are smaller, so the patch appears to ripen from the top-left outward.
pub fn growth_fraction(index: u32, visible: u32) -> f64 {
    if visible == 0 {
        return 0.0;
    }
    (1.2 * f64::from(index) / f64::from(visible)).min(1.0)
}

/// Row-major slots for the current display value.
pub fn visible_slots(
    layout: &PatchLayout,
    strategy: AssetStrategy,
    display_percentage: f64,
) -> Vec<VegetableSlot> {
    let visible = visible_count(display_percentage, layout.max_slots());
    (0..visible)
        .map(|index| {
            let row = index / layout.columns;
            let col = index % layout.columns;
            VegetableSlot {
                index,
                row,
                col,
                origin: layout.slot_origin(row, col),
                kind: VegetableKind::for_row(strategy, row),
                growth: growth_fraction(index, visible),
            }
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/scene/slots.rs"]
mod tests;
