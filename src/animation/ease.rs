/// Easing curves applied to normalized phase progress.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ease {
    /// Accelerating.
    InQuad,
    /// Decelerating.
    OutQuad,
}

impl Ease {
    /// Map `t` (clamped to `[0, 1]`) through the curve.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::InQuad => t * t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
        }
    }

    /// Ease the position of `t` within `[start, end]`.
    pub fn between(self, t: f64, start: f64, end: f64) -> f64 {
        let span = end - start;
        if span <= 0.0 {
            return if t >= end { 1.0 } else { 0.0 };
        }
        self.apply((t - start) / span)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
