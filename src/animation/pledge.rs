//! Discrete seed → plant → water animation played once per pledge event.
//!
//! The phase counter `t` advances by a fixed increment per host frame, so wall-clock duration
//! depends on the host frame rate while the outcome does not.

use crate::foundation::error::{PatchError, PatchResult};
use crate::pledge::queue::PledgeEvent;

/// Per-frame counter increment while the seed falls.
pub const FALL_RATE: f64 = 0.03;
/// Per-frame counter increment while the seed is planted.
pub const PLANT_RATE: f64 = 0.02;
/// Per-frame counter increment while the can waters.
pub const WATER_RATE: f64 = 0.015;

/// Counter value where planting begins.
pub const PLANT_START: f64 = 1.0;
/// Counter value where planting hands over to watering.
pub const PLANT_END: f64 = 2.5;
/// Counter value where watering begins.
pub const WATER_START: f64 = 3.5;
/// Counter value where watering finishes and the award is committed.
pub const WATER_END: f64 = 4.5;

/// Active discrete phase. `t` is the shared progress counter.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum AnimationPhase {
    /// No pledge animation; the growth tween may run.
    #[default]
    Idle,
    /// Seed sprite descends onto the soil, `t` in `[0, 1)`.
    SeedFalling {
        /// Phase counter.
        t: f64,
    },
    /// Mounds appear and the seed sinks in, `t` in `[1, 2.5)`.
    SeedPlanting {
        /// Phase counter.
        t: f64,
    },
    /// Watering can sweeps across the planted row, `t` in `[3.5, 4.5)`.
    Watering {
        /// Phase counter.
        t: f64,
    },
}

impl AnimationPhase {
    /// Whether no discrete animation is running.
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Phase counter; zero when idle.
    pub fn progress(&self) -> f64 {
        match *self {
            Self::Idle => 0.0,
            Self::SeedFalling { t } | Self::SeedPlanting { t } | Self::Watering { t } => t,
        }
    }

    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::SeedFalling { .. } => "seed_falling",
            Self::SeedPlanting { .. } => "seed_planting",
            Self::Watering { .. } => "watering",
        }
    }
}

/// Outcome of advancing the machine by one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PhaseStep {
    /// Nothing was running.
    Idle,
    /// Still animating; repaint.
    Advanced,
    /// Watering finished; the event's award must now be committed.
    Completed(PledgeEvent),
}

/// Drives one pledge event at a time through the discrete phases.
#[derive(Clone, Debug, Default)]
pub struct PledgeAnimator {
    phase: AnimationPhase,
    current: Option<PledgeEvent>,
}

impl PledgeAnimator {
    /// Current phase.
    pub fn phase(&self) -> AnimationPhase {
        self.phase
    }

    /// Whether no event is being animated.
    pub fn is_idle(&self) -> bool {
        self.phase.is_idle()
    }

    /// Tokens of the event being animated, if any.
    pub fn current_tokens(&self) -> Option<u64> {
        self.current.map(|e| e.tokens_awarded)
    }

    /// Begin animating `event`. A running animation is never interrupted.
    pub fn start(&mut self, event: PledgeEvent) -> PatchResult<()> {
        if !self.is_idle() {
            return Err(PatchError::animation(format!(
                "cannot start a pledge animation during {}",
                self.phase.name()
            )));
        }
        tracing::debug!(tokens = event.tokens_awarded, "seed falling");
        self.phase = AnimationPhase::SeedFalling { t: 0.0 };
        self.current = Some(event);
        Ok(())
    }

    /// Advance one frame.
    pub fn advance(&mut self) -> PhaseStep {
        self.phase = match self.phase {
            AnimationPhase::Idle => return PhaseStep::Idle,
            AnimationPhase::SeedFalling { t } => {
                let t = t + FALL_RATE;
                if t < PLANT_START {
                    AnimationPhase::SeedFalling { t }
                } else {
                    tracing::debug!("seed planting");
                    AnimationPhase::SeedPlanting { t: PLANT_START }
                }
            }
            AnimationPhase::SeedPlanting { t } => {
                let t = t + PLANT_RATE;
                if t < PLANT_END {
                    AnimationPhase::SeedPlanting { t }
                } else {
                    tracing::debug!("watering");
                    AnimationPhase::Watering { t: WATER_START }
                }
            }
            AnimationPhase::Watering { t } => {
                let t = t + WATER_RATE;
                if t < WATER_END {
                    AnimationPhase::Watering { t }
                } else {
                    AnimationPhase::Idle
                }
            }
        };

        if self.phase.is_idle() {
            match self.current.take() {
                Some(event) => PhaseStep::Completed(event),
                None => PhaseStep::Idle,
            }
        } else {
            PhaseStep::Advanced
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/pledge.rs"]
mod tests;
