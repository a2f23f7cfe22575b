use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::foundation::error::{PatchError, PatchResult};
use crate::pledge::form::PledgeForm;

/// Shared totaliser snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Totals {
    /// Tokens pledged across all pages.
    pub total: u64,
    /// Campaign goal.
    pub goal: u64,
}

/// Pull side of the shared totaliser.
pub trait TotalsSource {
    /// Read the current totals. Failures leave engine state untouched.
    fn current_totals(&mut self) -> PatchResult<Totals>;
}

#[derive(serde::Deserialize)]
struct TotalsDocument {
    total_tokens: u64,
    goal: u64,
}

/// Reads a totaliser document `{ "total_tokens": .., "goal": .. }` from disk on every poll.
#[derive(Clone, Debug)]
pub struct FileTotalsSource {
    path: PathBuf,
}

impl FileTotalsSource {
    /// Source backed by `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Document path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TotalsSource for FileTotalsSource {
    fn current_totals(&mut self) -> PatchResult<Totals> {
        let bytes = std::fs::read(&self.path)
            .with_context(|| format!("read totaliser document '{}'", self.path.display()))?;
        let doc: TotalsDocument = serde_json::from_slice(&bytes)
            .with_context(|| format!("parse totaliser document '{}'", self.path.display()))?;
        if doc.goal == 0 {
            return Err(PatchError::validation(format!(
                "totaliser document '{}' has goal 0",
                self.path.display()
            )));
        }
        Ok(Totals {
            total: doc.total_tokens,
            goal: doc.goal,
        })
    }
}

/// Remote pledge submission. Returns the tokens awarded by the backend.
pub trait PledgeSubmitter {
    /// Submit a validated form.
    fn submit_pledge(&mut self, form: &PledgeForm) -> PatchResult<u64>;
}

/// Validate `form`, submit it, and fall back to the client-side estimate when the backend fails.
/// Invalid forms are never submitted.
pub fn submit_with_fallback(
    submitter: &mut dyn PledgeSubmitter,
    form: &PledgeForm,
) -> PatchResult<u64> {
    form.validate()?;
    match submitter.submit_pledge(form) {
        Ok(tokens) => Ok(tokens),
        Err(e) => {
            let tokens = form.estimate_tokens();
            tracing::warn!(
                error = %e,
                pathway = form.pathway.as_str(),
                tokens,
                "pledge submission failed, using local estimate"
            );
            Ok(tokens)
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sync/source.rs"]
mod tests;
