use crate::engine::veg_patch::VegPatch;
use crate::foundation::error::{PatchError, PatchResult};
use crate::sync::message::WidgetMessage;
use crate::sync::source::{Totals, TotalsSource};

/// What a totaliser snapshot did to the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The total grew; the difference was queued as one pledge animation.
    Enqueued(u64),
    /// The total did not grow; state was set directly without animating.
    Updated,
}

/// Adapts local submissions and shared totaliser updates into engine calls.
///
/// `last_seen_total` is the shared total as last reported, which equals the engine's committed
/// total plus every token still queued or animating. Growth past it is animated; anything else is
/// applied directly.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SyncLayer {
    last_seen_total: u64,
}

impl SyncLayer {
    /// Layer that has already seen `initial_total`.
    pub fn new(initial_total: u64) -> Self {
        Self {
            last_seen_total: initial_total,
        }
    }

    /// Shared total as last observed, including this page's own pledges.
    pub fn last_seen_total(&self) -> u64 {
        self.last_seen_total
    }

    /// A pledge accepted on this page. The award is animated here, and the totaliser echo of the
    /// same pledge is not animated a second time.
    pub fn on_local_pledge(&mut self, patch: &mut VegPatch, tokens: i64) -> PatchResult<()> {
        patch.queue_pledge_animation(tokens)?;
        self.last_seen_total = self.last_seen_total.saturating_add(tokens.unsigned_abs());
        Ok(())
    }

    /// A totaliser snapshot, pushed or pulled.
    pub fn on_totals(&mut self, patch: &mut VegPatch, totals: Totals) -> PatchResult<SyncOutcome> {
        if totals.total > self.last_seen_total {
            let delta = totals.total - self.last_seen_total;
            let tokens = i64::try_from(delta).map_err(|_| {
                PatchError::validation(format!("totaliser jump of {delta} tokens is too large"))
            })?;
            patch.update(patch.progress().total(), totals.goal)?;
            patch.queue_pledge_animation(tokens)?;
            self.last_seen_total = totals.total;
            tracing::debug!(delta, total = totals.total, "totaliser grew");
            return Ok(SyncOutcome::Enqueued(delta));
        }
        self.set_directly(patch, totals.total, totals.goal)?;
        Ok(SyncOutcome::Updated)
    }

    /// Apply a total without animating. Tokens still in flight are kept out of the committed
    /// total so they are not counted twice when their animations finish.
    fn set_directly(&mut self, patch: &mut VegPatch, total: u64, goal: u64) -> PatchResult<()> {
        let in_flight = patch.in_flight_tokens();
        let committed = total.saturating_sub(in_flight);
        patch.update(committed, goal)?;
        self.last_seen_total = committed + in_flight;
        Ok(())
    }

    /// Handle a validated widget message. Returns the reply to broadcast, if any.
    pub fn on_message(
        &mut self,
        patch: &mut VegPatch,
        msg: WidgetMessage,
    ) -> PatchResult<Option<WidgetMessage>> {
        msg.validate()?;
        match msg {
            WidgetMessage::PledgeSubmitted { tokens, .. } => {
                self.on_local_pledge(patch, tokens)?;
                Ok(None)
            }
            WidgetMessage::PatchUpdate {
                total,
                goal,
                submissions,
            } => {
                self.on_totals(patch, Totals { total, goal })?;
                if let Some(n) = submissions {
                    patch.set_submissions(n);
                }
                Ok(None)
            }
            WidgetMessage::UpdateTotal { total, goal } => {
                let goal = goal.unwrap_or_else(|| patch.progress().goal());
                self.set_directly(patch, total, goal)?;
                Ok(None)
            }
            WidgetMessage::RequestUpdate => {
                let state = patch.state();
                Ok(Some(WidgetMessage::PatchUpdate {
                    total: self.last_seen_total,
                    goal: state.goal,
                    submissions: Some(state.submissions),
                }))
            }
        }
    }

    /// Parse and handle a raw JSON message. Malformed or rejected messages are logged and
    /// dropped.
    pub fn on_raw_message(&mut self, patch: &mut VegPatch, json: &str) -> Option<WidgetMessage> {
        let msg = match WidgetMessage::parse(json) {
            Ok(m) => m,
            Err(e) => {
                tracing::warn!(error = %e, "dropping malformed widget message");
                return None;
            }
        };
        let kind = msg.kind();
        match self.on_message(patch, msg) {
            Ok(reply) => reply,
            Err(e) => {
                tracing::warn!(kind, error = %e, "widget message rejected");
                None
            }
        }
    }

    /// Pull totals from `source`. Source failures are logged and leave state untouched.
    pub fn poll(
        &mut self,
        patch: &mut VegPatch,
        source: &mut dyn TotalsSource,
    ) -> Option<SyncOutcome> {
        let totals = match source.current_totals() {
            Ok(t) => t,
            Err(e) => {
                tracing::warn!(error = %e, "totaliser poll failed");
                return None;
            }
        };
        match self.on_totals(patch, totals) {
            Ok(outcome) => Some(outcome),
            Err(e) => {
                tracing::warn!(error = %e, "totaliser snapshot rejected");
                None
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sync/layer.rs"]
mod tests;
