pub(crate) mod ease;
pub(crate) mod pledge;
pub(crate) mod tween;
