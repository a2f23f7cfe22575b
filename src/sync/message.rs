use crate::foundation::error::{PatchError, PatchResult};

/// Cross-widget message, tagged by `type`.
///
/// ```json
/// {"type":"PLEDGE_SUBMITTED","tokens":30,"data":{"user_type":"school"}}
/// {"type":"PATCH_UPDATE","total":4200,"goal":100000,"submissions":12}
/// {"type":"UPDATE_TOTAL","total":50000}
/// {"type":"REQUEST_UPDATE"}
/// ```
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WidgetMessage {
    /// A pledge was accepted on this page.
    PledgeSubmitted {
        /// Tokens awarded (> 0).
        tokens: i64,
        /// Opaque form payload, passed through untouched.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        data: Option<serde_json::Value>,
    },
    /// Shared state broadcast by a peer widget.
    PatchUpdate {
        /// Shared token total.
        total: u64,
        /// Campaign goal (> 0).
        goal: u64,
        /// Pledge count, when the sender tracks it.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        submissions: Option<u64>,
    },
    /// Demo control: set the total without animating.
    UpdateTotal {
        /// New total.
        total: u64,
        /// New goal; the current one is kept when absent.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        goal: Option<u64>,
    },
    /// Ask this widget to broadcast its state.
    RequestUpdate,
}

impl WidgetMessage {
    /// Deserialize and validate one message.
    pub fn parse(json: &str) -> PatchResult<Self> {
        let msg: Self = serde_json::from_str(json)
            .map_err(|e| PatchError::message(format!("parse widget message: {e}")))?;
        msg.validate()?;
        Ok(msg)
    }

    /// Reject non-positive awards and zero goals.
    pub fn validate(&self) -> PatchResult<()> {
        match self {
            Self::PledgeSubmitted { tokens, .. } if *tokens <= 0 => Err(PatchError::message(
                format!("PLEDGE_SUBMITTED tokens must be > 0, got {tokens}"),
            )),
            Self::PatchUpdate { goal: 0, .. } | Self::UpdateTotal { goal: Some(0), .. } => Err(
                PatchError::message(format!("{} goal must be > 0", self.kind())),
            ),
            _ => Ok(()),
        }
    }

    /// Serialize to a single JSON line.
    pub fn to_json(&self) -> PatchResult<String> {
        serde_json::to_string(self)
            .map_err(|e| PatchError::message(format!("serialize widget message: {e}")))
    }

    /// Wire tag.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::PledgeSubmitted { .. } => "PLEDGE_SUBMITTED",
            Self::PatchUpdate { .. } => "PATCH_UPDATE",
            Self::UpdateTotal { .. } => "UPDATE_TOTAL",
            Self::RequestUpdate => "REQUEST_UPDATE",
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sync/message.rs"]
mod tests;
