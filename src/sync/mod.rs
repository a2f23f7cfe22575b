pub(crate) mod layer;
pub(crate) mod message;
pub(crate) mod source;
