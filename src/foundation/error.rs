/// Convenience result type used across vegpatch.
pub type PatchResult<T> = Result<T, PatchError>;

/// Top-level error taxonomy used by engine APIs.
///
/// None of these reach an end user: the engine keeps painting its last good frame and callers log
/// the error.
#[derive(thiserror::Error, Debug)]
pub enum PatchError {
    /// Invalid caller-provided values (non-positive awards, zero goals, bad config).
    #[error("validation error: {0}")]
    Validation(String),

    /// Inconsistent animation state.
    #[error("animation error: {0}")]
    Animation(String),

    /// A sprite or font could not be read or decoded.
    #[error("asset error: {0}")]
    Asset(String),

    /// A cross-widget message failed to parse or validate.
    #[error("message error: {0}")]
    Message(String),

    /// Rasterisation failures (surface sizes, pixel buffer mismatches).
    #[error("render error: {0}")]
    Render(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PatchError {
    /// Build a [`PatchError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`PatchError::Animation`] value.
    pub fn animation(msg: impl Into<String>) -> Self {
        Self::Animation(msg.into())
    }

    /// Build a [`PatchError::Asset`] value.
    pub fn asset(msg: impl Into<String>) -> Self {
        Self::Asset(msg.into())
    }

    /// Build a [`PatchError::Message`] value.
    pub fn message(msg: impl Into<String>) -> Self {
        Self::Message(msg.into())
    }

    /// Build a [`PatchError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
