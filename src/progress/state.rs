use crate::foundation::error::{PatchError, PatchResult};

/// Demo total shown before the first totaliser sync.
pub const DEMO_TOTAL: u64 = 1247;
/// Campaign goal used when no other goal is configured.
pub const DEFAULT_GOAL: u64 = 100_000;

/// `min(100, 100 * total / goal)`; `goal` must be > 0.
pub fn percentage_of(total: u64, goal: u64) -> f64 {
    if goal == 0 {
        return 0.0;
    }
    ((total as f64) * 100.0 / (goal as f64)).clamp(0.0, 100.0)
}

/// Committed totals plus the animated display value.
///
/// `percentage` is always derived from `total / goal`; `display_percentage` trails it and is moved
/// only by the growth tween.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProgressState {
    total: u64,
    goal: u64,
    percentage: f64,
    display_percentage: f64,
}

impl Default for ProgressState {
    fn default() -> Self {
        Self {
            total: DEMO_TOTAL,
            goal: DEFAULT_GOAL,
            percentage: percentage_of(DEMO_TOTAL, DEFAULT_GOAL),
            display_percentage: 0.0,
        }
    }
}

impl ProgressState {
    /// New state with the display value at zero.
    pub fn new(total: u64, goal: u64) -> PatchResult<Self> {
        let mut s = Self::default();
        s.set_totals(total, goal)?;
        s.display_percentage = 0.0;
        Ok(s)
    }

    /// Replace total and goal, recomputing `percentage`. The display value is untouched.
    pub fn set_totals(&mut self, total: u64, goal: u64) -> PatchResult<()> {
        if goal == 0 {
            return Err(PatchError::validation("goal must be > 0"));
        }
        self.total = total;
        self.goal = goal;
        self.percentage = percentage_of(total, goal);
        Ok(())
    }

    /// Committed token total.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Campaign goal (always > 0).
    pub fn goal(&self) -> u64 {
        self.goal
    }

    /// True progress in `[0, 100]`.
    pub fn percentage(&self) -> f64 {
        self.percentage
    }

    /// Animated progress in `[0, 100]`.
    pub fn display_percentage(&self) -> f64 {
        self.display_percentage
    }

    /// Tokens still missing; zero once the goal is met.
    pub fn tokens_to_goal(&self) -> u64 {
        self.goal.saturating_sub(self.total)
    }

    pub(crate) fn set_display_percentage(&mut self, v: f64) {
        self.display_percentage = if v.is_finite() {
            v.clamp(0.0, 100.0)
        } else {
            0.0
        };
    }
}

/// Read-only snapshot handed to demo and control surfaces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PatchState {
    /// Committed token total.
    pub total: u64,
    /// Campaign goal.
    pub goal: u64,
    /// Number of pledges committed or reported by peers.
    pub submissions: u64,
}

/// Dashboard figures shown next to the patch.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ProgressSummary {
    /// Committed token total.
    pub total: u64,
    /// Campaign goal.
    pub goal: u64,
    /// True progress in `[0, 100]`.
    pub percentage: f64,
    /// `max(0, goal - total)`.
    pub tokens_to_goal: u64,
    /// Number of pledges committed or reported by peers.
    pub submissions: u64,
}

#[cfg(test)]
#[path = "../../tests/unit/progress/state.rs"]
mod tests;
