use crate::progress::state::ProgressState;

/// Gap below which the display value snaps to the target.
pub const SNAP_EPSILON: f64 = 0.1;
/// Smallest per-frame step, in percentage points.
pub const MIN_STEP: f64 = 0.5;
/// Fraction of the remaining gap covered per frame.
pub const STEP_RATE: f64 = 0.1;

/// Result of one tween frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TweenStep {
    /// The display value moved; another frame is wanted.
    Moved,
    /// The display value reached the target; the tween stopped.
    Settled,
    /// Nothing to do.
    Inactive,
}

/// One tween step from `display` toward `target`. Returns the new value and whether it snapped.
///
/// Both directions use `max(MIN_STEP, STEP_RATE * |gap|)` and never cross the target.
pub fn step_toward(display: f64, target: f64) -> (f64, bool) {
    let diff = target - display;
    if diff.abs() < SNAP_EPSILON {
        return (target, true);
    }
    let step = MIN_STEP.max(diff.abs() * STEP_RATE);
    let next = if diff > 0.0 {
        (display + step).clamp(0.0, target)
    } else {
        (display - step).max(target).max(0.0)
    };
    (next, false)
}

/// Continuous growth animation of `display_percentage` toward `percentage`.
#[derive(Clone, Copy, Debug, Default)]
pub struct GrowthTween {
    active: bool,
}

impl GrowthTween {
    /// Request frames until the display value settles.
    pub fn start(&mut self) {
        self.active = true;
    }

    /// Stop without touching the display value.
    pub fn suspend(&mut self) {
        self.active = false;
    }

    /// Whether the tween still wants frames.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Advance one frame.
    pub fn step(&mut self, progress: &mut ProgressState) -> TweenStep {
        if !self.active {
            return TweenStep::Inactive;
        }
        let (next, settled) = step_toward(progress.display_percentage(), progress.percentage());
        progress.set_display_percentage(next);
        if settled {
            self.active = false;
            tracing::debug!(display = next, "growth tween settled");
            TweenStep::Settled
        } else {
            TweenStep::Moved
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/tween.rs"]
mod tests;
