use crate::foundation::core::{Canvas, Point};

/// Size class of the patch. Both share one engine; only geometry differs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatchVariant {
    /// 6×6 grid, "N% Grown" caption along the bottom.
    #[default]
    Full,
    /// 4-wide, 3-row grid for embedded widgets, "N%" caption along the top.
    Compact,
}

impl PatchVariant {
    /// Canvas used when the configuration does not give one.
    pub fn default_canvas(self) -> Canvas {
        match self {
            Self::Full => Canvas {
                width: 800,
                height: 400,
            },
            Self::Compact => Canvas {
                width: 400,
                height: 200,
            },
        }
    }
}

/// How vegetables, seeds, the can and the plate are drawn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetStrategy {
    /// Vector shapes only.
    #[default]
    Procedural,
    /// Sprite images, with procedural placeholders until each sprite has loaded.
    Raster,
}

/// Frame geometry derived from a variant and a canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PatchLayout {
    /// Size class.
    pub variant: PatchVariant,
    /// Drawing surface.
    pub canvas: Canvas,
    /// Y of the sky/soil boundary.
    pub soil_top: f64,
    /// Slots per row.
    pub columns: u32,
    /// Number of rows.
    pub rows: u32,
    /// Base vegetable size in pixels at full growth.
    pub veg_size: f64,
    /// Sun disc center.
    pub sun_center: Point,
    /// Sun disc radius.
    pub sun_radius: f64,
    /// Caption font size.
    pub text_size: f32,
    /// Caption baseline Y.
    pub text_baseline: f64,
}

impl PatchLayout {
    /// Compute the layout for `variant` drawn onto `canvas`.
    pub fn new(variant: PatchVariant, canvas: Canvas) -> Self {
        let (w, h) = (canvas.w(), canvas.h());
        let sun_center = Point::new(w - 60.0, 40.0);
        let sun_radius = (w * 0.05).clamp(15.0, 40.0);
        match variant {
            PatchVariant::Full => Self {
                variant,
                canvas,
                soil_top: h * 0.3,
                columns: 6,
                rows: 6,
                veg_size: 30.0,
                sun_center,
                sun_radius,
                text_size: 20.0,
                text_baseline: h - 20.0,
            },
            PatchVariant::Compact => Self {
                variant,
                canvas,
                soil_top: h * 0.4,
                columns: 4,
                rows: 3,
                veg_size: (w / 15.0).clamp(10.0, 25.0),
                sun_center,
                sun_radius,
                text_size: 16.0,
                text_baseline: 25.0,
            },
        }
    }

    /// Grid capacity: 36 for the full view, 12 for the compact view.
    pub fn max_slots(&self) -> u32 {
        self.columns * self.rows
    }

    /// Ground point of the slot at `(row, col)`.
    pub fn slot_origin(&self, row: u32, col: u32) -> Point {
        let (w, h) = (self.canvas.w(), self.canvas.h());
        let (row, col) = (f64::from(row), f64::from(col));
        match self.variant {
            PatchVariant::Full => {
                let row_height = (h * 0.6) / f64::from(self.rows);
                Point::new(
                    col * (w / 6.0) + w / 12.0,
                    self.soil_top + row * row_height + row_height / 2.0,
                )
            }
            PatchVariant::Compact => Point::new(
                (w / 5.0) * (col + 1.0),
                h * 0.5 + row * self.veg_size * 1.5,
            ),
        }
    }

    /// X positions of the planting mounds along the soil line, one per column.
    pub fn mound_xs(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.columns).map(|col| self.slot_origin(0, col).x)
    }

    /// Horizontal radius of a planting mound.
    pub fn mound_radius(&self) -> f64 {
        match self.variant {
            PatchVariant::Full => 40.0,
            PatchVariant::Compact => self.veg_size,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/layout.rs"]
mod tests;
